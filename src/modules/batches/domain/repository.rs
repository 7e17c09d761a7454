/// Repository trait for batch persistence
use super::entities::Batch;
use super::value_objects::BatchStatus;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait BatchRepository: Send + Sync {
    /// Persist a new batch
    async fn create(&self, batch: &Batch) -> AppResult<Batch>;

    /// Get batch by ID
    async fn find_by_id(&self, batch_id: Uuid) -> AppResult<Option<Batch>>;

    /// Write the derived status projection
    async fn update_status(&self, batch_id: Uuid, status: BatchStatus) -> AppResult<()>;

    /// Update the progress percentage (0-100)
    async fn update_progress(&self, batch_id: Uuid, progress: i32) -> AppResult<()>;
}
