use async_trait::async_trait;
use rbt_model::{Instance, InstanceId};

use crate::error::CoreError;

/// Lists every instance known to the control service.
#[async_trait]
pub trait InstanceDirectory: Send + Sync + 'static {
    /// Full listing, or [`CoreError::DirectoryUnavailable`] when the service refuses it.
    async fn list_instances(&self) -> Result<Vec<Instance>, CoreError>;
}

/// Commands and queries against a single instance.
#[async_trait]
pub trait InstanceControl: Send + Sync + 'static {
    /// Ask the service to reboot the instance.
    ///
    /// Only an explicit acceptance counts as success; anything else is [`CoreError::RestartRejected`].
    async fn restart(&self, id: &InstanceId) -> Result<(), CoreError>;

    /// Current status string as reported by the service.
    ///
    /// Side-effect free. Transport and decode failures are [`CoreError::StatusQueryFailed`].
    async fn status(&self, id: &InstanceId) -> Result<String, CoreError>;
}
