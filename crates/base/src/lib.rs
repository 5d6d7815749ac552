pub mod logging;
pub use logging::*;

mod tensor;
pub use tensor::*;

mod vec2;
pub use vec2::*;
