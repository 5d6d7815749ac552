//! Live frame classification sessions.
//!
//! Frames arrive from the camera thread through `Analyzer::offer`. A
//! `StreamThrottle` admits at most one frame at a time (and only every n-th
//! frame); admitted frames go to a worker that owns the `Pipeline`, and
//! results are published to a `ResultSink`.

mod config;
pub use config::*;

mod error;
pub use error::*;

mod pipeline;
pub use pipeline::*;

mod session;
pub use session::*;

mod sink;
pub use sink::*;

mod throttle;
pub use throttle::*;
