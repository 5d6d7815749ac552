use {
    crate::*,
    std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    tokio::{
        sync::mpsc,
        task::{JoinHandle, spawn_blocking},
    },
    video::RawFrame,
};

// the throttle keeps at most one frame in flight
const HANDOFF_CAPACITY: usize = 1;

/// What `Analyzer::offer` did with a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    Accepted,
    Busy,
    Skipped,
    Stopped,
}

struct Job {
    frame: RawFrame,
    permit: ThrottlePermit,
}

/// A running classification session.
///
/// The worker runs on tokio's blocking pool and owns the `Pipeline` until
/// `stop` hands it back. Dropping the analyzer cancels the session; frames
/// still queued are released without being processed.
pub struct Analyzer {
    throttle: StreamThrottle,
    cancel: Arc<AtomicBool>,
    job_tx: Option<mpsc::Sender<Job>>,
    join_handle: Option<JoinHandle<Pipeline>>,
}

impl Analyzer {
    /// Starts a session. Must be called from within a tokio runtime.
    pub fn start(mut pipeline: Pipeline, mut sink: impl ResultSink, config: AnalyzerConfig) -> Self {
        let decode_mode = config.decode_mode();
        let cancel = Arc::new(AtomicBool::new(false));
        let (job_tx, mut job_rx) = mpsc::channel::<Job>(HANDOFF_CAPACITY);

        log::info!(
            "analyzer: starting session (sample interval {}, {:?})",
            config.sample_interval(),
            config.decode_mode()
        );

        let join_handle = spawn_blocking({
            let cancel = Arc::clone(&cancel);
            move || {
                while let Some(Job { frame, permit }) = job_rx.blocking_recv() {
                    if cancel.load(Ordering::Relaxed) {
                        continue;
                    }
                    match pipeline.run(&frame, decode_mode) {
                        Ok(result) => {
                            log::debug!("analyzer: {} ({:.3})", result.label, result.confidence);
                            sink.on_result(result);
                        }
                        Err(error) => {
                            log::debug!("analyzer: frame at {:?} failed", frame.timestamp);
                            sink.on_diagnostic(&error);
                        }
                    }
                    drop(frame);
                    drop(permit);
                }
                log::info!("analyzer: session stopped");
                pipeline
            }
        });

        Self {
            throttle: StreamThrottle::new(config.sample_interval()),
            cancel,
            job_tx: Some(job_tx),
            join_handle: Some(join_handle),
        }
    }

    /// Hands `frame` to the worker if the throttle admits it. Never blocks;
    /// frames that are not accepted are released before this returns.
    pub fn offer(&self, frame: RawFrame) -> Offer {
        let Some(job_tx) = self.job_tx.as_ref() else {
            return Offer::Stopped;
        };
        if self.cancel.load(Ordering::Relaxed) {
            return Offer::Stopped;
        }
        let permit = match self.throttle.admit() {
            Admission::Accepted(permit) => permit,
            Admission::Busy => {
                log::debug!("analyzer: busy, dropping frame at {:?}", frame.timestamp);
                return Offer::Busy;
            }
            Admission::Skipped => return Offer::Skipped,
        };
        match job_tx.try_send(Job { frame, permit }) {
            Ok(()) => Offer::Accepted,
            Err(mpsc::error::TrySendError::Full(_)) => Offer::Busy,
            Err(mpsc::error::TrySendError::Closed(_)) => Offer::Stopped,
        }
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.load(Ordering::Relaxed)
            && self
                .join_handle
                .as_ref()
                .is_some_and(|handle| !handle.is_finished())
    }

    pub fn throttle(&self) -> &StreamThrottle {
        &self.throttle
    }

    /// Cancels the session, waits for the worker and returns the pipeline
    /// so another session can be started with it.
    pub async fn stop(mut self) -> Result<Pipeline, AnalyzerError> {
        self.cancel.store(true, Ordering::Relaxed);
        self.job_tx.take();
        let join_handle = self
            .join_handle
            .take()
            .ok_or_else(|| AnalyzerError::Worker("session already stopped".to_string()))?;
        join_handle
            .await
            .map_err(|e| AnalyzerError::Worker(e.to_string()))
    }
}

impl Drop for Analyzer {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}
