use super::value_objects::BatchStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Aggregate container for the uploads of one scanning session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub name: String,
    pub status: BatchStatus,
    pub total_files: i32,
    pub progress: i32,
    pub created_at: DateTime<Utc>,
}

impl Batch {
    pub fn new(profile_id: Uuid, name: String, total_files: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            profile_id,
            name,
            status: BatchStatus::Uploaded,
            total_files,
            progress: 0,
            created_at: Utc::now(),
        }
    }
}
