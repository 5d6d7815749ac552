use video::DecodeMode;

// process every other frame unless told otherwise
pub const DEFAULT_SAMPLE_INTERVAL: u64 = 2;

/// Per-session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerConfig {
    sample_interval: u64,
    decode_mode: DecodeMode,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            decode_mode: DecodeMode::Direct,
        }
    }
}

impl AnalyzerConfig {
    /// Only every `interval`-th idle frame is processed. Zero is treated as 1.
    pub fn with_sample_interval(mut self, interval: u64) -> Self {
        self.sample_interval = interval.max(1);
        self
    }

    pub fn with_decode_mode(mut self, decode_mode: DecodeMode) -> Self {
        self.decode_mode = decode_mode;
        self
    }

    pub fn sample_interval(&self) -> u64 {
        self.sample_interval
    }

    pub fn decode_mode(&self) -> DecodeMode {
        self.decode_mode
    }
}
