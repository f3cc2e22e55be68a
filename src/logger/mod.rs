//! # Logging setup for the simulation binary and demos.
//!
//! Installs a global `tracing` subscriber. Components log through `tracing`
//! macros directly; the event bus is a separate telemetry path.
//!
//! ```text
//! LoggerConfig ──► logger_init ──► registry()
//!                                   ├─ EnvFilter (level directive)
//!                                   └─ fmt layer (text | json)
//! ```

mod config;
mod error;
mod format;
mod log;

pub use config::LoggerConfig;
pub use error::LoggerError;
pub use format::LoggerFormat;

/// Installs the global subscriber described by `cfg`.
///
/// Fails with [`LoggerError::AlreadyInitialized`] on a second call.
pub fn logger_init(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    match cfg.format {
        LoggerFormat::Text => log::Logger::text(cfg),
        LoggerFormat::Json => log::Logger::json(cfg),
    }
}
