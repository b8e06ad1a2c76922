use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("instance directory unavailable: {0}")]
    DirectoryUnavailable(String),

    #[error("restart rejected: {0}")]
    RestartRejected(String),

    #[error("status query failed: {0}")]
    StatusQueryFailed(String),

    #[error("batch '{batch}' could not be loaded: {reason}")]
    BatchConfigMissing { batch: String, reason: String },

    #[error("verifier cannot handle {event} while {state}")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },
}
