use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

/// Outcome of offering one frame to a `StreamThrottle`.
#[derive(Debug)]
pub enum Admission {
    /// Process this frame; the throttle stays busy until the permit is dropped.
    Accepted(ThrottlePermit),
    /// A frame is already being processed.
    Busy,
    /// Idle, but this frame falls between sampling points.
    Skipped,
}

/// Admission control for a frame stream: at most one frame in flight, and
/// only every `interval`-th idle frame admitted.
///
/// Frames that arrive while busy do not advance the frame counter.
#[derive(Debug)]
pub struct StreamThrottle {
    interval: u64,
    counter: AtomicU64,
    busy: Arc<AtomicBool>,
}

impl StreamThrottle {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            counter: AtomicU64::new(0),
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn admit(&self) -> Admission {
        if self.busy.load(Ordering::Acquire) {
            return Admission::Busy;
        }
        let count = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        if count % self.interval != 0 {
            return Admission::Skipped;
        }
        match self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => Admission::Accepted(ThrottlePermit {
                busy: Arc::clone(&self.busy),
            }),
            Err(_) => Admission::Busy,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Frames counted so far (busy frames excluded).
    pub fn frame_count(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Zeroes the counter and clears the busy flag.
    ///
    /// A permit still alive after a reset clears the flag again when dropped.
    pub fn reset(&self) {
        self.counter.store(0, Ordering::Relaxed);
        self.busy.store(false, Ordering::Release);
    }
}

impl Default for StreamThrottle {
    fn default() -> Self {
        Self::new(crate::DEFAULT_SAMPLE_INTERVAL)
    }
}

/// Proof of admission; returns the throttle to idle when dropped.
#[derive(Debug)]
pub struct ThrottlePermit {
    busy: Arc<AtomicBool>,
}

impl Drop for ThrottlePermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
