use {
    crate::{InferError, LabelTable},
    serde::{Deserialize, Serialize},
    std::path::{Path, PathBuf},
};

/// Model artifact and runtime settings.
///
/// Loadable from JSON; missing fields take their defaults:
///
/// ```json
/// { "model_path": "models/classifier.onnx", "labels_path": "models/labels.txt", "threads": 4, "input_side": 160 }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    model_path: PathBuf,
    labels_path: Option<PathBuf>,
    threads: usize,
    input_side: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/classifier.onnx"),
            labels_path: None,
            threads: 4,
            input_side: 160,
        }
    }
}

impl ModelConfig {
    pub fn from_json(text: &str) -> Result<Self, InferError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, InferError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| InferError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), InferError> {
        if self.threads == 0 {
            return Err(InferError::Config("threads must be at least 1".to_string()));
        }
        if self.input_side == 0 {
            return Err(InferError::Config("input_side must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Set the model file path.
    pub fn with_model_path(mut self, model_path: impl Into<PathBuf>) -> Self {
        self.model_path = model_path.into();
        self
    }

    /// Set the label file path (one label per line).
    pub fn with_labels_path(mut self, labels_path: impl Into<PathBuf>) -> Self {
        self.labels_path = Some(labels_path.into());
        self
    }

    /// Set the number of intra-op threads the engine may use.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set the square input resolution.
    pub fn with_input_side(mut self, input_side: usize) -> Self {
        self.input_side = input_side;
        self
    }

    // Getters
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn labels_path(&self) -> Option<&Path> {
        self.labels_path.as_deref()
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn input_side(&self) -> usize {
        self.input_side
    }

    /// Labels from `labels_path`, or the default table when none is set.
    pub fn label_table(&self) -> Result<LabelTable, InferError> {
        match &self.labels_path {
            Some(path) => LabelTable::from_file(path),
            None => Ok(LabelTable::default()),
        }
    }
}
