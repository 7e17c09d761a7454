/// Diesel-based implementation of JobEventRepository
///
/// The audit trail is append-only: there is no update or delete path.
use crate::modules::jobs::domain::entities::JobEvent;
use crate::modules::jobs::domain::repository::JobEventRepository;
use crate::modules::jobs::domain::value_objects::EventLevel;
use crate::modules::jobs::infrastructure::models::{JobEventModel, NewJobEvent};
use crate::schema::job_events;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::database::{DbConnection, DbPool};
use async_trait::async_trait;
use diesel::prelude::*;
use serde_json::Value as JsonValue;
use uuid::Uuid;

pub struct JobEventRepositoryImpl {
    pool: DbPool,
}

impl JobEventRepositoryImpl {
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
impl JobEventRepository for JobEventRepositoryImpl {
    async fn append(
        &self,
        job_id: Uuid,
        level: EventLevel,
        message: &str,
        data: Option<JsonValue>,
    ) -> AppResult<()> {
        let new_event = NewJobEvent {
            job_id,
            level,
            message: message.to_string(),
            data,
        };
        let mut conn = self.get_conn()?;

        diesel::insert_into(job_events::table)
            .values(&new_event)
            .execute(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to append job event: {}", e)))?;

        Ok(())
    }

    async fn list_for_job(&self, job_id: Uuid) -> AppResult<Vec<JobEvent>> {
        let mut conn = self.get_conn()?;

        let rows: Vec<JobEventModel> = job_events::table
            .filter(job_events::job_id.eq(job_id))
            .order(job_events::at.asc())
            .load(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to list job events: {}", e)))?;

        Ok(rows.into_iter().map(|e| e.to_domain()).collect())
    }
}
