use std::fmt;

#[derive(Debug)]
pub enum InferError {
    ModelLoad(String),
    LabelTableMismatch { labels: usize, outputs: usize },
    Engine(String),
    Shape(String),
    Io(String),
    Config(String),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::LabelTableMismatch { labels, outputs } => write!(
                f,
                "label table mismatch: {labels} labels for {outputs} model outputs"
            ),
            InferError::Engine(msg) => write!(f, "inference engine error: {msg}"),
            InferError::Shape(msg) => write!(f, "shape error: {msg}"),
            InferError::Io(msg) => write!(f, "io error: {msg}"),
            InferError::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<std::io::Error> for InferError {
    fn from(err: std::io::Error) -> Self {
        InferError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for InferError {
    fn from(err: serde_json::Error) -> Self {
        InferError::Config(err.to_string())
    }
}

impl From<base::TensorError> for InferError {
    fn from(err: base::TensorError) -> Self {
        InferError::Shape(err.to_string())
    }
}
