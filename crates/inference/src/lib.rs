//! Image classification on top of an opaque inference engine.
//!
//! The pipeline only sees the `Classifier` capability: a normalized
//! `[1, side, side, 3]` tensor goes in, one score per label comes out.
//! `OnnxClassifier` implements it with ONNX Runtime; `CannedClassifier`
//! returns fixed scores and stands in for a model in tests.

pub mod canned;
pub mod classifier;
pub mod error;
pub mod interpret;
pub mod labels;
pub mod modelconfig;
pub mod onnx;

pub use canned::CannedClassifier;
pub use classifier::{Classifier, check_input};
pub use error::InferError;
pub use interpret::{ClassificationResult, interpret};
pub use labels::LabelTable;
pub use modelconfig::ModelConfig;
pub use onnx::OnnxClassifier;
