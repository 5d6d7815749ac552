use {image::ImageError, inference::InferError, std::fmt, video::VideoError};

#[derive(Debug)]
pub enum AnalyzerError {
    Video(VideoError),
    Image(ImageError),
    Infer(InferError),
    Worker(String),
}

impl fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzerError::Video(error) => write!(f, "frame error: {error}"),
            AnalyzerError::Image(error) => write!(f, "preprocessing error: {error}"),
            AnalyzerError::Infer(error) => write!(f, "{error}"),
            AnalyzerError::Worker(msg) => write!(f, "analyzer worker failed: {msg}"),
        }
    }
}

impl std::error::Error for AnalyzerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalyzerError::Video(error) => Some(error),
            AnalyzerError::Image(error) => Some(error),
            AnalyzerError::Infer(error) => Some(error),
            AnalyzerError::Worker(_) => None,
        }
    }
}

impl From<VideoError> for AnalyzerError {
    fn from(error: VideoError) -> Self {
        AnalyzerError::Video(error)
    }
}

impl From<ImageError> for AnalyzerError {
    fn from(error: ImageError) -> Self {
        AnalyzerError::Image(error)
    }
}

impl From<InferError> for AnalyzerError {
    fn from(error: InferError) -> Self {
        AnalyzerError::Infer(error)
    }
}
