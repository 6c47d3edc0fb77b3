//! Logging initialization.
//!
//! Sets up the tracing subscriber according to the `[logger]` configuration
//! section. When a log file is configured the output goes through a
//! non-blocking appender; if the file cannot be opened the system falls back
//! to stdout and reports a warning.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggerConfig;

/// Result of logging initialization.
///
/// The guard must be kept alive for the duration of the program, otherwise
/// buffered log lines are lost.
pub struct LoggingInit {
    pub guard: WorkerGuard,
    pub warning: Option<String>,
}

/// Initializes the global tracing subscriber. Call once, at startup, after
/// the configuration has been loaded.
pub fn init(config: &LoggerConfig) -> LoggingInit {
    let (writer, warning): (Box<dyn std::io::Write + Send + Sync>, Option<String>) =
        if config.file.is_empty() {
            (Box::new(std::io::stdout()), None)
        } else {
            match std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.file)
            {
                Ok(file) => (Box::new(file), None),
                Err(e) => (
                    Box::new(std::io::stdout()),
                    Some(format!(
                        "failed to open log file '{}': {}. Falling back to stdout.",
                        config.file, e
                    )),
                ),
            }
        };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_ansi(config.file.is_empty())
        .init();

    LoggingInit { guard, warning }
}
