use {
    log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError},
    std::{
        io::Write,
        time::{SystemTime, UNIX_EPOCH},
    },
};

// environment variable holding the maximum level (error, warn, info, debug, trace)
const LEVEL_ENV: &str = "LOG_LEVEL";

pub fn format_timestamp() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let (year, month, day) = civil_from_days((secs / 86400) as i64);
    let time_of_day = secs % 86400;
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        year,
        month,
        day,
        time_of_day / 3600,
        (time_of_day % 3600) / 60,
        time_of_day % 60
    )
}

// days since 1970-01-01 to (year, month, day)
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

pub fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Line-oriented logger for the `log` facade.
///
/// Each record is printed as `[ThreadId:LEVEL:timestamp - file:line] message`.
pub struct StdoutLogger {
    level: LevelFilter,
}

impl StdoutLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    pub fn format(level: Level, file: &str, line: u32, message: &str) -> String {
        format!(
            "[{:?}:{}:{} - {}:{}] {}",
            std::thread::current().id(),
            level,
            format_timestamp(),
            file,
            line,
            message
        )
    }
}

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format(
            record.level(),
            record.file().unwrap_or("?"),
            record.line().unwrap_or(0),
            &record.args().to_string(),
        );
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{}", line);
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

/// Install `StdoutLogger` as the global logger.
///
/// The level comes from `LOG_LEVEL` and defaults to `info`. Calling this
/// more than once returns the error from `log::set_boxed_logger`.
pub fn init_stdout_logger() -> Result<(), SetLoggerError> {
    let level = std::env::var(LEVEL_ENV)
        .ok()
        .and_then(|value| parse_level(&value))
        .unwrap_or(LevelFilter::Info);
    log::set_boxed_logger(Box::new(StdoutLogger::new(level)))?;
    log::set_max_level(level);
    Ok(())
}
