/// Diesel-based implementation of UploadRepository
use crate::modules::uploads::domain::entities::Upload;
use crate::modules::uploads::domain::repository::UploadRepository;
use crate::modules::uploads::domain::value_objects::UploadStatus;
use crate::modules::uploads::infrastructure::models::{NewUpload, UploadModel};
use crate::schema::uploads;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::database::{DbConnection, DbPool};
use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

pub struct UploadRepositoryImpl {
    pool: DbPool,
}

impl UploadRepositoryImpl {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn get_conn(&self) -> AppResult<DbConnection> {
        self.pool
            .get()
            .map_err(|e| AppError::DatabaseError(format!("Failed to get connection: {}", e)))
    }
}

#[async_trait]
impl UploadRepository for UploadRepositoryImpl {
    async fn insert_many(&self, new_uploads: &[Upload]) -> AppResult<Vec<Upload>> {
        let rows: Vec<NewUpload> = new_uploads.iter().map(NewUpload::from).collect();
        let mut conn = self.get_conn()?;

        let inserted: Vec<UploadModel> = diesel::insert_into(uploads::table)
            .values(&rows)
            .get_results(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to insert uploads: {}", e)))?;

        Ok(inserted.into_iter().map(|u| u.to_domain()).collect())
    }

    async fn find_by_id(&self, upload_id: Uuid) -> AppResult<Option<Upload>> {
        let mut conn = self.get_conn()?;

        let upload: Option<UploadModel> = uploads::table
            .find(upload_id)
            .first(&mut conn)
            .optional()
            .map_err(|e| AppError::DatabaseError(format!("Failed to get upload by id: {}", e)))?;

        Ok(upload.map(|u| u.to_domain()))
    }

    async fn find_by_batch(&self, batch_id: Uuid) -> AppResult<Vec<Upload>> {
        let mut conn = self.get_conn()?;

        let rows: Vec<UploadModel> = uploads::table
            .filter(uploads::batch_id.eq(batch_id))
            .order(uploads::uploaded_at.asc())
            .load(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to get batch uploads: {}", e)))?;

        Ok(rows.into_iter().map(|u| u.to_domain()).collect())
    }

    async fn find_uploaded_by_batch(&self, batch_id: Uuid) -> AppResult<Vec<Upload>> {
        let mut conn = self.get_conn()?;

        let rows: Vec<UploadModel> = uploads::table
            .filter(uploads::batch_id.eq(batch_id))
            .filter(uploads::status.eq(UploadStatus::Uploaded))
            .order(uploads::uploaded_at.asc())
            .load(&mut conn)
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to get unresolved uploads: {}", e))
            })?;

        Ok(rows.into_iter().map(|u| u.to_domain()).collect())
    }

    async fn update_status(&self, upload_id: Uuid, status: UploadStatus) -> AppResult<()> {
        let mut conn = self.get_conn()?;

        diesel::update(uploads::table.find(upload_id))
            .set(uploads::status.eq(status))
            .execute(&mut conn)
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to update upload status: {}", e))
            })?;

        Ok(())
    }
}
