use {crate::PixelFormat, std::fmt};

#[derive(Debug)]
pub enum ImageError {
    Decode(String),
    Encode(String),
    UnsupportedFormat(PixelFormat),
    Dimensions(String),
    Tensor(base::TensorError),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Decode(msg) => write!(f, "decode error: {msg}"),
            ImageError::Encode(msg) => write!(f, "encode error: {msg}"),
            ImageError::UnsupportedFormat(format) => {
                write!(f, "unsupported pixel format: {format:?}")
            }
            ImageError::Dimensions(msg) => write!(f, "invalid dimensions: {msg}"),
            ImageError::Tensor(err) => write!(f, "tensor error: {err}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<crates_image::ImageError> for ImageError {
    fn from(err: crates_image::ImageError) -> Self {
        ImageError::Decode(err.to_string())
    }
}

impl From<base::TensorError> for ImageError {
    fn from(err: base::TensorError) -> Self {
        ImageError::Tensor(err)
    }
}
