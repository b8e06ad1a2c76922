use async_trait::async_trait;

use crate::error::ReportError;

mod twilio;
pub use twilio::{NotifyConfig, TwilioSink};

/// Delivers a pre-formatted message to one recipient.
#[async_trait]
pub trait NotificationSink: Send + Sync + 'static {
    /// Returns the provider's message id on success.
    async fn deliver(&self, recipient: &str, message: &str) -> Result<String, ReportError>;
}
