use crate::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Interleaved R, G, B bytes.
    Rgb8,
    /// Three separate Y, U, V planes with 2x2 chroma subsampling and
    /// per-plane row/pixel strides.
    Yuv420,
}

impl PixelFormat {
    pub fn ensure_format(&self, expected: PixelFormat) -> Result<(), ImageError> {
        if *self != expected {
            return Err(ImageError::UnsupportedFormat(*self));
        }
        Ok(())
    }
}
