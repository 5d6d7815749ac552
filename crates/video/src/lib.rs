//! Raw camera frames and frame capture for the classifier pipeline.
//!
//! The camera itself is a `FrameSource`; `VideoIn` pumps it on a blocking
//! worker thread and hands every `RawFrame` to a callback. Frames carry a
//! release hook that fires exactly once when the frame is dropped.

pub mod decode;
pub mod error;
pub mod videoframe;
pub mod videoin;

pub use decode::DecodeMode;
pub use error::VideoError;
pub use videoframe::{Plane, RawFrame};
pub use videoin::{FrameSource, SyntheticCamera, VideoIn};
