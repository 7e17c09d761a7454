/// Diesel-based implementation of BatchRepository
use crate::modules::batches::domain::entities::Batch;
use crate::modules::batches::domain::repository::BatchRepository;
use crate::modules::batches::domain::value_objects::BatchStatus;
use crate::modules::batches::infrastructure::models::{BatchModel, NewBatch};
use crate::schema::batches;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::database::{DbConnection, DbPool};
use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

pub struct BatchRepositoryImpl {
    pool: DbPool,
}

impl BatchRepositoryImpl {
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
impl BatchRepository for BatchRepositoryImpl {
    async fn create(&self, batch: &Batch) -> AppResult<Batch> {
        let new_batch = NewBatch::from(batch);
        let mut conn = self.get_conn()?;

        let inserted: BatchModel = diesel::insert_into(batches::table)
            .values(&new_batch)
            .get_result(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to create batch: {}", e)))?;

        Ok(inserted.to_domain())
    }

    async fn find_by_id(&self, batch_id: Uuid) -> AppResult<Option<Batch>> {
        let mut conn = self.get_conn()?;

        let batch: Option<BatchModel> = batches::table
            .find(batch_id)
            .first(&mut conn)
            .optional()
            .map_err(|e| AppError::DatabaseError(format!("Failed to get batch by id: {}", e)))?;

        Ok(batch.map(|b| b.to_domain()))
    }

    async fn update_status(&self, batch_id: Uuid, status: BatchStatus) -> AppResult<()> {
        let mut conn = self.get_conn()?;

        diesel::update(batches::table.find(batch_id))
            .set(batches::status.eq(status))
            .execute(&mut conn)
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to update batch status: {}", e))
            })?;

        Ok(())
    }

    async fn update_progress(&self, batch_id: Uuid, progress: i32) -> AppResult<()> {
        let mut conn = self.get_conn()?;

        diesel::update(batches::table.find(batch_id))
            .set(batches::progress.eq(progress.clamp(0, 100)))
            .execute(&mut conn)
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to update batch progress: {}", e))
            })?;

        Ok(())
    }
}
