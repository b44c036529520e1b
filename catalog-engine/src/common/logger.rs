//! Logging Infrastructure
//!
//! Structured logging setup. `RUST_LOG` wins when set; otherwise the
//! caller-supplied level (default `info`) applies to the whole engine.

use tracing_subscriber::EnvFilter;

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with optional daily-rolling file output
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.unwrap_or("info")));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_dir {
        Some(dir) if std::path::Path::new(dir).exists() => {
            let file_appender = tracing_appender::rolling::daily(dir, "catalog-engine");
            subscriber.with_writer(file_appender).with_ansi(false).init();
        }
        _ => subscriber.init(),
    }
}
