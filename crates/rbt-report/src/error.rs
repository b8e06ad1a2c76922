use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write log file {path}: {source}")]
    LogWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("console write failed: {0}")]
    Console(#[from] std::io::Error),

    #[error("notification to {recipient} was not delivered: {reason}")]
    NotificationDeliveryFailed { recipient: String, reason: String },

    #[error("notification request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("notification sink is not configured: {0}")]
    NotConfigured(&'static str),
}
