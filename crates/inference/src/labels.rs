use {
    crate::InferError,
    std::{fmt, path::Path, sync::Arc},
};

// labels of the produce model the default configuration points at
const DEFAULT_LABELS: [&str; 4] = ["onion_brown", "onion_purple", "peach", "unknown"];

/// Ordered class names, indexed by position in the model output.
///
/// Cloning is cheap; results keep a handle to the table they were read with.
#[derive(Clone, PartialEq)]
pub struct LabelTable {
    labels: Arc<[String]>,
}

impl LabelTable {
    pub fn new<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Result<Self, InferError> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(InferError::Config("label table is empty".to_string()));
        }
        Ok(Self {
            labels: labels.into(),
        })
    }

    /// One label per line; surrounding whitespace and blank lines are ignored.
    pub fn parse(text: &str) -> Result<Self, InferError> {
        Self::new(text.lines().map(str::trim).filter(|line| !line.is_empty()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InferError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| InferError::Io(format!("{}: {e}", path.display())))?;
        Self::parse(&text)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Fails with `LabelTableMismatch` unless there is one label per output.
    pub fn ensure_matches(&self, outputs: usize) -> Result<(), InferError> {
        if self.len() != outputs {
            return Err(InferError::LabelTableMismatch {
                labels: self.len(),
                outputs,
            });
        }
        Ok(())
    }
}

impl Default for LabelTable {
    fn default() -> Self {
        Self {
            labels: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl fmt::Debug for LabelTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.labels.iter()).finish()
    }
}
