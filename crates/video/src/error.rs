use {image::PixelFormat, std::fmt};

#[derive(Debug)]
pub enum VideoError {
    Device(String),
    Stream(String),
    UnsupportedFormat(PixelFormat),
    Decode(image::ImageError),
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::Device(msg) => write!(f, "device error: {msg}"),
            VideoError::Stream(msg) => write!(f, "stream error: {msg}"),
            VideoError::UnsupportedFormat(format) => {
                write!(f, "unsupported frame format: {format:?}")
            }
            VideoError::Decode(err) => write!(f, "decode error: {err}"),
        }
    }
}

impl std::error::Error for VideoError {}

impl From<std::io::Error> for VideoError {
    fn from(err: std::io::Error) -> Self {
        VideoError::Device(err.to_string())
    }
}

impl From<image::ImageError> for VideoError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::UnsupportedFormat(format) => VideoError::UnsupportedFormat(format),
            err => VideoError::Decode(err),
        }
    }
}
