/// Repository trait for upload persistence
use super::entities::Upload;
use super::value_objects::UploadStatus;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait UploadRepository: Send + Sync {
    /// Persist a set of new uploads
    async fn insert_many(&self, uploads: &[Upload]) -> AppResult<Vec<Upload>>;

    /// Get upload by ID
    async fn find_by_id(&self, upload_id: Uuid) -> AppResult<Option<Upload>>;

    /// All uploads of a batch, regardless of status
    async fn find_by_batch(&self, batch_id: Uuid) -> AppResult<Vec<Upload>>;

    /// The unresolved pool: uploads of a batch still in status `uploaded`
    async fn find_uploaded_by_batch(&self, batch_id: Uuid) -> AppResult<Vec<Upload>>;

    /// Transition a single upload's status
    async fn update_status(&self, upload_id: Uuid, status: UploadStatus) -> AppResult<()>;
}
