mod config;
mod error;
mod format;
mod log;

pub use config::LoggerConfig;
pub use error::LoggerError;
pub use format::LoggerFormat;

use time::UtcOffset;

/// Install the global `tracing` subscriber described by `cfg`.
///
/// Timestamps are rendered in `offset`. Can only succeed once per process; later calls
/// return [`LoggerError::AlreadyInitialized`].
pub fn logger_init(cfg: &LoggerConfig, offset: UtcOffset) -> Result<(), LoggerError> {
    log::install(cfg, offset)
}
