use {
    crate::AnalyzerError,
    inference::ClassificationResult,
    tokio::sync::mpsc::UnboundedSender,
};

/// Where a session publishes its output. Called on the worker thread.
pub trait ResultSink: Send + 'static {
    fn on_result(&mut self, result: ClassificationResult);

    /// A frame failed somewhere in the pipeline; the session keeps going.
    fn on_diagnostic(&mut self, error: &AnalyzerError) {
        log::warn!("frame dropped: {}", error);
    }
}

impl<F> ResultSink for F
where
    F: FnMut(ClassificationResult) + Send + 'static,
{
    fn on_result(&mut self, result: ClassificationResult) {
        self(result)
    }
}

impl ResultSink for UnboundedSender<ClassificationResult> {
    fn on_result(&mut self, result: ClassificationResult) {
        if self.send(result).is_err() {
            log::debug!("result receiver closed, dropping result");
        }
    }
}
