use std::sync::Arc;
use std::time::Duration;

use spdlog::sink::{RotatingFileSink, RotationPolicy, StdStream, StdStreamSink};
use spdlog::{Level, LevelFilter, Logger};

use crate::config::{Config, Log, LogLevel};

impl LogLevel {
    /// Records at this level and everything more severe.
    pub fn level_filter(self) -> LevelFilter {
        let level = match self {
            LogLevel::Critical => Level::Critical,
            LogLevel::Error => Level::Error,
            LogLevel::Warn => Level::Warn,
            LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
            LogLevel::Trace => Level::Trace,
        };
        LevelFilter::MoreSevereEqual(level)
    }
}

fn console_sink(stream: StdStream, filter: LevelFilter) -> spdlog::Result<Arc<StdStreamSink>> {
    let sink = StdStreamSink::builder()
        .std_stream(stream)
        .level_filter(filter)
        .build()?;
    Ok(Arc::new(sink))
}

fn build_logger(log: &Log) -> spdlog::Result<Arc<Logger>> {
    let mut builder = Logger::builder();

    if let Some(ref location) = log.location {
        let daily_sink = RotatingFileSink::builder()
            .base_path(location.clone())
            .rotation_policy(RotationPolicy::Daily { hour: 0, minute: 0 })
            .max_files(30)
            .rotate_on_open(false)
            .build()?;
        builder.sink(Arc::new(daily_sink));
    }

    // Build progress goes to stdout, problems to stderr
    if log.log_to_console || log.location.is_none() {
        builder
            .sink(console_sink(StdStream::Stdout, LevelFilter::MoreVerbose(Level::Warn))?)
            .sink(console_sink(StdStream::Stderr, LevelFilter::MoreSevereEqual(Level::Warn))?);
    }

    let logger = Arc::new(builder.build()?);
    logger.set_flush_level_filter(LevelFilter::MoreSevereEqual(Level::Info));
    logger.set_flush_period(Some(Duration::from_secs(2)));
    logger.set_level_filter(log.level.level_filter());
    Ok(logger)
}

/// Installs the default logger described by the `[log]` section.
///
/// Without a `[log]` section the spdlog default (console) logger stays in place.
/// Without a location only the console sinks are installed.
pub fn configure_logger(config: &Config) -> spdlog::Result<()> {
    let Some(ref log) = config.log else {
        return Ok(());
    };

    spdlog::set_default_logger(build_logger(log)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_level_filter() {
        let filter = LogLevel::Warn.level_filter();
        assert!(filter.test(Level::Error));
        assert!(filter.test(Level::Warn));
        assert!(!filter.test(Level::Info));
        assert!(LogLevel::Trace.level_filter().test(Level::Trace));
    }

    #[test]
    fn test_build_logger_console_only() {
        let log = Log { level: LogLevel::Debug, log_to_console: false, location: None };
        let logger = build_logger(&log).unwrap();
        assert_eq!(logger.sinks().len(), 2);
        assert!(logger.should_log(Level::Debug));
        assert!(!logger.should_log(Level::Trace));
    }

    #[test]
    fn test_build_logger_file_and_console() {
        let dir = TempDir::new().unwrap();
        let location = dir.path().join("brewlog.log");

        let log = Log { level: LogLevel::Info, log_to_console: false, location: Some(location.clone()) };
        assert_eq!(build_logger(&log).unwrap().sinks().len(), 1);

        let log = Log { level: LogLevel::Info, log_to_console: true, location: Some(location) };
        assert_eq!(build_logger(&log).unwrap().sinks().len(), 3);
    }

    #[test]
    fn test_no_log_section_keeps_default_logger() {
        assert!(configure_logger(&Config::default()).is_ok());
    }
}
