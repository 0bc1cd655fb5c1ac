//! Logging setup for the exporter.
//!
//! Installs a global `tracing` subscriber writing text, JSON or journald
//! output, filtered by an `EnvFilter` expression.

mod config;
pub use config::LoggerConfig;

mod error;
pub use error::{LoggerError, LoggerResult};

mod format;
pub use format::LoggerFormat;

mod level;
pub use level::LoggerLevel;

mod timer;
pub use timer::{LoggerRfc3339, LoggerTimeZone, init_local_offset};

mod init;

/// Installs the global tracing subscriber described by `cfg`.
///
/// Call once, early in `main()`. With [`LoggerTimeZone::Local`] also call
/// [`init_local_offset`] first, before any thread is spawned.
///
/// # Examples
/// ```rust
/// use lastrun_observe::{LoggerConfig, init_logger};
///
/// let config = LoggerConfig::default();
/// init_logger(&config).expect("failed to initialize logger");
///
/// tracing::info!("logger initialized");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> LoggerResult<()> {
    match cfg.format {
        LoggerFormat::Text => init::logger_text(cfg),
        LoggerFormat::Json => init::logger_json(cfg),
        LoggerFormat::Journald => init::logger_journald(cfg),
    }
}
