use {
    crate::*,
    std::{
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
        time::Duration,
    },
    tokio::{
        sync::oneshot,
        task::{JoinHandle, spawn_blocking},
    },
};

mod synthetic;
pub use synthetic::SyntheticCamera;

// delay before reconnecting after failure
const WAIT_BEFORE_RECONNECT_MS: u64 = 100;

/// A camera, seen from the consumer side.
///
/// `open` and `blocking_capture` are always called from the same worker
/// thread, since some backends have thread affinity.
pub trait FrameSource: Send {
    fn open(&mut self) -> Result<(), VideoError>; // open the device
    fn close(&mut self); // close the device, if open
    fn blocking_capture(&mut self) -> Result<RawFrame, VideoError>; // capture a frame
}

/// Running capture loop feeding a frame callback.
///
/// The callback runs on the capture thread and should return quickly; the
/// camera is never paused waiting for it.
pub struct VideoIn {
    cancel: Arc<AtomicBool>,
    join_handle: Option<JoinHandle<()>>,
}

impl VideoIn {
    /// Opens `source` on a blocking worker and starts delivering frames.
    ///
    /// Fails if the first `open` fails. Later capture failures are logged and
    /// followed by close, a short wait and reopen until the loop is closed.
    pub async fn open<F>(mut source: Box<dyn FrameSource>, mut deliver: F) -> Result<Self, VideoError>
    where
        F: FnMut(RawFrame) + Send + 'static,
    {
        let cancel = Arc::new(AtomicBool::new(false));
        let (init_tx, init_rx) = oneshot::channel::<Result<(), VideoError>>();

        let join_handle = spawn_blocking({
            let cancel = Arc::clone(&cancel);
            move || {
                if let Err(error) = source.open() {
                    let _ = init_tx.send(Err(error));
                    return;
                }
                let _ = init_tx.send(Ok(()));

                while !cancel.load(Ordering::Relaxed) {
                    log::info!("video worker: starting capture loop");
                    while !cancel.load(Ordering::Relaxed) {
                        match source.blocking_capture() {
                            Ok(frame) => deliver(frame),
                            Err(error) => {
                                log::error!("video worker: capture failed: {}", error);
                                break;
                            }
                        }
                    }

                    // close, wait, and reopen the device
                    while !cancel.load(Ordering::Relaxed) {
                        log::info!("video worker: reconnecting...");
                        source.close();
                        std::thread::sleep(Duration::from_millis(WAIT_BEFORE_RECONNECT_MS));
                        match source.open() {
                            Ok(()) => break,
                            Err(error) => log::warn!("video worker: reopen failed: {}", error),
                        }
                    }
                }
                source.close();
                log::info!("video worker: stopped");
            }
        });

        init_rx
            .await
            .map_err(|_| VideoError::Device("worker thread died during init".to_string()))??;

        Ok(Self {
            cancel,
            join_handle: Some(join_handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.join_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stops the capture loop and waits for the device to be closed.
    pub async fn close(mut self) -> Result<(), VideoError> {
        self.cancel.store(true, Ordering::Relaxed);
        if let Some(join_handle) = self.join_handle.take() {
            join_handle
                .await
                .map_err(|e| VideoError::Stream(format!("video worker failed: {e}")))?;
        }
        Ok(())
    }
}

impl Drop for VideoIn {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}
