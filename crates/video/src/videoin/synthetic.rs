use {
    crate::*,
    base::Vec2,
    std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::{Duration, Instant},
    },
};

/// Camera stand-in producing uniform-luma YUV 4:2:0 frames.
///
/// Counts captured and released frames, and can be told to fail every
/// n-th capture to exercise reconnect handling.
pub struct SyntheticCamera {
    size: Vec2<usize>,
    luma: u8,
    frame_interval: Duration,
    fail_every: Option<usize>,
    started: Option<Instant>,
    opened: Arc<AtomicUsize>,
    captured: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
}

impl SyntheticCamera {
    pub fn new(size: Vec2<usize>) -> Self {
        Self {
            size,
            luma: 128,
            frame_interval: Duration::from_millis(33),
            fail_every: None,
            started: None,
            opened: Arc::new(AtomicUsize::new(0)),
            captured: Arc::new(AtomicUsize::new(0)),
            released: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_luma(mut self, luma: u8) -> Self {
        self.luma = luma;
        self
    }

    pub fn with_frame_interval(mut self, frame_interval: Duration) -> Self {
        self.frame_interval = frame_interval;
        self
    }

    pub fn with_fail_every(mut self, n: usize) -> Self {
        self.fail_every = (n > 0).then_some(n);
        self
    }

    /// Shared counters: (opens, capture attempts, released frames).
    pub fn counters(&self) -> (Arc<AtomicUsize>, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        (
            Arc::clone(&self.opened),
            Arc::clone(&self.captured),
            Arc::clone(&self.released),
        )
    }
}

impl FrameSource for SyntheticCamera {
    fn open(&mut self) -> Result<(), VideoError> {
        self.opened.fetch_add(1, Ordering::Relaxed);
        self.started.get_or_insert_with(Instant::now);
        Ok(())
    }

    fn close(&mut self) {}

    fn blocking_capture(&mut self) -> Result<RawFrame, VideoError> {
        let started = self
            .started
            .ok_or_else(|| VideoError::Device("synthetic camera not open".to_string()))?;
        std::thread::sleep(self.frame_interval);

        let index = self.captured.fetch_add(1, Ordering::Relaxed) + 1;
        if self.fail_every.is_some_and(|n| index % n == 0) {
            return Err(VideoError::Stream(format!("synthetic failure at frame {index}")));
        }

        let released = Arc::clone(&self.released);
        Ok(RawFrame::uniform(started.elapsed(), self.size, self.luma).with_release(move || {
            released.fetch_add(1, Ordering::Relaxed);
        }))
    }
}
