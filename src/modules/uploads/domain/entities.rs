use super::value_objects::UploadStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One physical image file in a batch
///
/// Filename and storage path are immutable after creation; only the status
/// transitions (pairing, manual resolution, deletion).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Upload {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub batch_id: Uuid,
    pub filename: String,
    pub storage_path: String,
    pub status: UploadStatus,
    pub uploaded_at: DateTime<Utc>,
}

impl Upload {
    pub fn new(profile_id: Uuid, batch_id: Uuid, filename: String, storage_path: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            profile_id,
            batch_id,
            filename,
            storage_path,
            status: UploadStatus::Uploaded,
            uploaded_at: Utc::now(),
        }
    }
}
