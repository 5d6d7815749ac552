use {
    crate::AnalyzerError,
    image::prepare,
    inference::{ClassificationResult, Classifier, InferError, LabelTable, interpret},
    video::{DecodeMode, RawFrame},
};

/// decode → preprocess → classify → interpret, for one frame at a time.
pub struct Pipeline {
    classifier: Box<dyn Classifier>,
    labels: LabelTable,
}

impl Pipeline {
    /// Fails with `LabelTableMismatch` unless `labels` has one entry per
    /// classifier output.
    pub fn new(classifier: Box<dyn Classifier>, labels: LabelTable) -> Result<Self, AnalyzerError> {
        labels.ensure_matches(classifier.output_len())?;
        if classifier.input_side() == 0 {
            return Err(InferError::Config("classifier input side is zero".to_string()).into());
        }
        Ok(Self { classifier, labels })
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    pub fn input_side(&self) -> usize {
        self.classifier.input_side()
    }

    /// Runs one frame through every stage. The frame is only borrowed.
    pub fn run(
        &mut self,
        frame: &RawFrame,
        decode_mode: DecodeMode,
    ) -> Result<ClassificationResult, AnalyzerError> {
        let image = frame.decode(decode_mode)?;
        let input = prepare(&image, self.classifier.input_side())?;
        let scores = self.classifier.classify(&input)?;
        Ok(interpret(&scores, &self.labels)?)
    }
}
