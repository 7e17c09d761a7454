/// Diesel models for the batches table
use crate::modules::batches::domain::entities::Batch;
use crate::modules::batches::domain::value_objects::BatchStatus;
use crate::schema::batches;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = batches)]
pub struct BatchModel {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub name: String,
    pub status: BatchStatus,
    pub total_files: i32,
    pub progress: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = batches)]
pub struct NewBatch {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub name: String,
    pub status: BatchStatus,
    pub total_files: i32,
}

impl BatchModel {
    pub fn to_domain(self) -> Batch {
        Batch {
            id: self.id,
            profile_id: self.profile_id,
            name: self.name,
            status: self.status,
            total_files: self.total_files,
            progress: self.progress,
            created_at: self.created_at,
        }
    }
}

impl From<&Batch> for NewBatch {
    fn from(batch: &Batch) -> Self {
        Self {
            id: batch.id,
            profile_id: batch.profile_id,
            name: batch.name.clone(),
            status: batch.status,
            total_files: batch.total_files,
        }
    }
}
