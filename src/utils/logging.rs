// Wed Oct 14 2026 - Alex

use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::time::Instant;

const CRATE_TARGET: &str = "header_abi_util";

pub struct LoggingUtils;

impl LoggingUtils {
    /// Installs the coloured stderr logger. A second call is a no-op.
    pub fn init_logger(level: LevelFilter) {
        Self::init_logger_with_color(level, true);
    }

    pub fn init_logger_with_color(level: LevelFilter, use_color: bool) {
        if !use_color {
            colored::control::set_override(false);
        }
        let logger = Box::new(ColoredLogger::new(level));
        if log::set_boxed_logger(logger).is_ok() {
            log::set_max_level(level);
        }
    }

    /// Defers to `RUST_LOG` through env_logger.
    pub fn init_from_env() {
        let _ = env_logger::Builder::from_default_env()
            .format_timestamp(None)
            .try_init();
    }

    pub fn level_from_str(s: &str) -> Option<LevelFilter> {
        match s.to_lowercase().as_str() {
            "error" => Some(LevelFilter::Error),
            "warn" | "warning" => Some(LevelFilter::Warn),
            "info" => Some(LevelFilter::Info),
            "debug" => Some(LevelFilter::Debug),
            "trace" => Some(LevelFilter::Trace),
            "off" => Some(LevelFilter::Off),
            _ => None,
        }
    }

    pub fn level_from_verbosity(verbosity: u8) -> LevelFilter {
        match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

struct ColoredLogger {
    level: LevelFilter,
}

impl ColoredLogger {
    fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    fn format_level(level: Level) -> ColoredString {
        match level {
            Level::Error => "ERROR".red().bold(),
            Level::Warn => "WARN ".yellow().bold(),
            Level::Info => "INFO ".green().bold(),
            Level::Debug => "DEBUG".blue().bold(),
            Level::Trace => "TRACE".magenta().bold(),
        }
    }
}

impl Log for ColoredLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let target = short_target(record.target());
        eprintln!(
            "{} {} {}",
            Self::format_level(record.level()),
            format!("[{}]", target).dimmed(),
            record.args()
        );
    }

    fn flush(&self) {}
}

/// `header_abi_util::version_script::parser` becomes `version_script::parser`.
fn short_target(target: &str) -> &str {
    target
        .strip_prefix(CRATE_TARGET)
        .map(|rest| rest.trim_start_matches("::"))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(target)
}

/// Logs how long the enclosing scope took, at debug level.
pub struct ScopedTimer {
    name: String,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(name: &str) -> Self {
        log::debug!("{} started", name);
        Self {
            name: name.to_string(),
            start: Instant::now(),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        log::debug!("{} took {:.2}ms", self.name, self.start.elapsed().as_secs_f64() * 1000.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str() {
        assert_eq!(LoggingUtils::level_from_str("WARNING"), Some(LevelFilter::Warn));
        assert_eq!(LoggingUtils::level_from_str("trace"), Some(LevelFilter::Trace));
        assert_eq!(LoggingUtils::level_from_str("loud"), None);
    }

    #[test]
    fn test_level_from_verbosity() {
        assert_eq!(LoggingUtils::level_from_verbosity(0), LevelFilter::Warn);
        assert_eq!(LoggingUtils::level_from_verbosity(2), LevelFilter::Debug);
        assert_eq!(LoggingUtils::level_from_verbosity(9), LevelFilter::Trace);
    }

    #[test]
    fn test_short_target() {
        assert_eq!(short_target("header_abi_util::linker"), "linker");
        assert_eq!(short_target("header_abi_util"), "header_abi_util");
        assert_eq!(short_target("rayon_core"), "rayon_core");
    }
}
