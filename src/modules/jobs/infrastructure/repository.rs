/// Diesel-based implementation of JobRepository
///
/// Uses PostgreSQL with SELECT FOR UPDATE SKIP LOCKED for atomic job
/// claiming, so overlapping orchestration passes never process the same
/// job twice.
use crate::modules::jobs::domain::entities::{Job, JobOutcome, JobRecord, JobType};
use crate::modules::jobs::domain::repository::{JobRepository, JobStatistics};
use crate::modules::jobs::domain::value_objects::JobStatus;
use crate::modules::jobs::infrastructure::models::{JobModel, NewJob};
use crate::schema::jobs;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::database::{DbConnection, DbPool};
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

pub struct JobRepositoryImpl {
    pool: DbPool,
}

impl JobRepositoryImpl {
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
impl JobRepository for JobRepositoryImpl {
    async fn enqueue(&self, job: Job) -> AppResult<JobRecord> {
        let new_job = NewJob::from(&job);
        let mut conn = self.get_conn()?;

        let inserted: JobModel = diesel::insert_into(jobs::table)
            .values(&new_job)
            .get_result(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to enqueue job: {}", e)))?;

        Ok(inserted.to_job_record())
    }

    async fn claim_next_batch(&self, limit: i64) -> AppResult<Vec<JobRecord>> {
        let mut conn = self.get_conn()?;

        // Atomic claim using SELECT FOR UPDATE SKIP LOCKED: the transition
        // to `running` happens in the same statement as the selection, so
        // concurrent passes skip over each other's rows.
        let claimed: Vec<JobModel> = diesel::sql_query(
            r#"
            UPDATE jobs
            SET status = 'running',
                started_at = NOW(),
                attempts = attempts + 1
            WHERE id IN (
                SELECT id
                FROM jobs
                WHERE status = 'queued'
                  AND job_type IN ('pairing', 'ocr')
                ORDER BY created_at ASC
                LIMIT $1
                FOR UPDATE SKIP LOCKED
            )
            RETURNING id, profile_id, batch_id, job_type, status, payload,
                      result, error, attempts, created_at,
                      started_at, completed_at
            "#,
        )
        .bind::<diesel::sql_types::BigInt, _>(limit)
        .load(&mut conn)
        .map_err(|e| AppError::DatabaseError(format!("Failed to claim jobs: {}", e)))?;

        // RETURNING does not guarantee ordering; restore FIFO for the pass
        let mut records: Vec<JobRecord> =
            claimed.into_iter().map(|j| j.to_job_record()).collect();
        records.sort_by_key(|r| r.created_at);

        Ok(records)
    }

    async fn mark_completed(&self, job_id: Uuid, outcome: &JobOutcome) -> AppResult<()> {
        let result = serde_json::to_value(outcome)
            .map_err(|e| AppError::SerializationError(e.to_string()))?;
        let mut conn = self.get_conn()?;

        diesel::update(jobs::table.find(job_id))
            .set((
                jobs::status.eq(JobStatus::Completed),
                jobs::result.eq(Some(result)),
                jobs::completed_at.eq(Some(Utc::now())),
            ))
            .execute(&mut conn)
            .map_err(|e| {
                AppError::DatabaseError(format!("Failed to mark job as completed: {}", e))
            })?;

        Ok(())
    }

    async fn mark_failed(&self, job_id: Uuid, error: &str) -> AppResult<()> {
        let mut conn = self.get_conn()?;

        diesel::update(jobs::table.find(job_id))
            .set((
                jobs::status.eq(JobStatus::Failed),
                jobs::error.eq(Some(error)),
                jobs::completed_at.eq(Some(Utc::now())),
            ))
            .execute(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to mark job as failed: {}", e)))?;

        Ok(())
    }

    async fn find_active(
        &self,
        batch_id: Uuid,
        job_type: JobType,
    ) -> AppResult<Option<JobRecord>> {
        let mut conn = self.get_conn()?;

        let job: Option<JobModel> = jobs::table
            .filter(jobs::batch_id.eq(batch_id))
            .filter(jobs::job_type.eq(job_type.to_string()))
            .filter(jobs::status.eq_any([JobStatus::Queued, JobStatus::Running]))
            .order(jobs::created_at.asc())
            .first(&mut conn)
            .optional()
            .map_err(|e| AppError::DatabaseError(format!("Failed to find active job: {}", e)))?;

        Ok(job.map(|j| j.to_job_record()))
    }

    async fn get_by_id(&self, job_id: Uuid) -> AppResult<Option<JobRecord>> {
        let mut conn = self.get_conn()?;

        let job: Option<JobModel> = jobs::table
            .find(job_id)
            .first(&mut conn)
            .optional()
            .map_err(|e| AppError::DatabaseError(format!("Failed to get job by id: {}", e)))?;

        Ok(job.map(|j| j.to_job_record()))
    }

    async fn get_statistics(&self) -> AppResult<JobStatistics> {
        let mut conn = self.get_conn()?;

        let count_for = |status: JobStatus, conn: &mut DbConnection| -> AppResult<i64> {
            jobs::table
                .filter(jobs::status.eq(status))
                .count()
                .get_result(conn)
                .map_err(|e| AppError::DatabaseError(format!("Failed to count jobs: {}", e)))
        };

        let queued = count_for(JobStatus::Queued, &mut conn)?;
        let running = count_for(JobStatus::Running, &mut conn)?;
        let completed = count_for(JobStatus::Completed, &mut conn)?;
        let failed = count_for(JobStatus::Failed, &mut conn)?;

        let total: i64 = jobs::table
            .count()
            .get_result(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to count jobs: {}", e)))?;

        Ok(JobStatistics {
            queued_count: queued,
            running_count: running,
            completed_count: completed,
            failed_count: failed,
            total_count: total,
        })
    }

    async fn delete_old_terminal(&self, days: i32) -> AppResult<usize> {
        let mut conn = self.get_conn()?;

        let deleted = diesel::sql_query(
            "DELETE FROM jobs
             WHERE status IN ('completed', 'failed')
             AND completed_at < NOW() - INTERVAL '1 day' * $1",
        )
        .bind::<diesel::sql_types::Integer, _>(days)
        .execute(&mut conn)
        .map_err(|e| AppError::DatabaseError(format!("Failed to delete old jobs: {}", e)))?;

        Ok(deleted)
    }
}
