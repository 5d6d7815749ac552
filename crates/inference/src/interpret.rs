use {
    crate::{InferError, LabelTable},
    std::fmt,
};

/// Top class of one inference, with the full score vector.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub label: String,
    pub index: usize,
    pub confidence: f32,
    pub distribution: Vec<f32>,
    pub labels: LabelTable,
}

/// Picks the highest score; on ties the lowest index wins.
///
/// # Errors
///
/// Returns `InferError::LabelTableMismatch` when `scores` and `labels`
/// differ in length.
pub fn interpret(scores: &[f32], labels: &LabelTable) -> Result<ClassificationResult, InferError> {
    labels.ensure_matches(scores.len())?;

    let mut best = 0;
    for (i, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = i;
        }
    }

    let label = labels
        .get(best)
        .ok_or(InferError::LabelTableMismatch {
            labels: labels.len(),
            outputs: scores.len(),
        })?
        .to_string();

    Ok(ClassificationResult {
        label,
        index: best,
        confidence: scores[best],
        distribution: scores.to_vec(),
        labels: labels.clone(),
    })
}

// Two overlay lines: the prediction, then every class score.
impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pred: {} ({:.1}%)", self.label, self.confidence * 100.0)?;
        for (i, (label, score)) in self.labels.iter().zip(&self.distribution).enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{label}: {score:.2}")?;
        }
        Ok(())
    }
}
