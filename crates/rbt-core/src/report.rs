use async_trait::async_trait;
use rbt_model::BatchReport;

/// Receives the outcome set of each completed batch.
///
/// Implementations handle their own delivery failures; a batch is never failed by reporting.
#[async_trait]
pub trait Reporter: Send + Sync + 'static {
    async fn report(&self, report: &BatchReport);
}
