/// Diesel models for the uploads table
use crate::modules::uploads::domain::entities::Upload;
use crate::modules::uploads::domain::value_objects::UploadStatus;
use crate::schema::uploads;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = uploads)]
pub struct UploadModel {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub batch_id: Uuid,
    pub filename: String,
    pub storage_path: String,
    pub status: UploadStatus,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = uploads)]
pub struct NewUpload {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub batch_id: Uuid,
    pub filename: String,
    pub storage_path: String,
    pub status: UploadStatus,
}

impl UploadModel {
    pub fn to_domain(self) -> Upload {
        Upload {
            id: self.id,
            profile_id: self.profile_id,
            batch_id: self.batch_id,
            filename: self.filename,
            storage_path: self.storage_path,
            status: self.status,
            uploaded_at: self.uploaded_at,
        }
    }
}

impl From<&Upload> for NewUpload {
    fn from(upload: &Upload) -> Self {
        Self {
            id: upload.id,
            profile_id: upload.profile_id,
            batch_id: upload.batch_id,
            filename: upload.filename.clone(),
            storage_path: upload.storage_path.clone(),
            status: upload.status,
        }
    }
}
