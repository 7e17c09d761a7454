/// Repository traits for job persistence
///
/// The atomic claim in `claim_next_batch` is the only way a job leaves
/// `queued`: callers cannot read-then-write their way into claiming the
/// same job twice.
use super::entities::{Job, JobEvent, JobOutcome, JobRecord, JobType};
use super::value_objects::EventLevel;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use uuid::Uuid;

#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Enqueue a new job
    async fn enqueue(&self, job: Job) -> AppResult<JobRecord>;

    /// Atomically claim up to `limit` queued jobs, oldest first
    ///
    /// Claimed jobs are already marked `running` (with started_at stamped
    /// and attempts incremented) when they are returned, so two concurrent
    /// passes can never pick up the same job.
    async fn claim_next_batch(&self, limit: i64) -> AppResult<Vec<JobRecord>>;

    /// Mark job as completed with its typed outcome
    async fn mark_completed(&self, job_id: Uuid, outcome: &JobOutcome) -> AppResult<()>;

    /// Mark job as failed with error message
    async fn mark_failed(&self, job_id: Uuid, error: &str) -> AppResult<()>;

    /// The queued or running job of a given type for a batch, if any
    ///
    /// Enqueue paths call this first and reuse the returned job instead of
    /// creating a duplicate.
    async fn find_active(&self, batch_id: Uuid, job_type: JobType) -> AppResult<Option<JobRecord>>;

    /// Get job by ID
    async fn get_by_id(&self, job_id: Uuid) -> AppResult<Option<JobRecord>>;

    /// Get job queue statistics
    async fn get_statistics(&self) -> AppResult<JobStatistics>;

    /// Delete terminal jobs older than the given number of days (cleanup)
    async fn delete_old_terminal(&self, days: i32) -> AppResult<usize>;
}

#[async_trait]
pub trait JobEventRepository: Send + Sync {
    /// Append one audit log entry for a job
    async fn append(
        &self,
        job_id: Uuid,
        level: EventLevel,
        message: &str,
        data: Option<JsonValue>,
    ) -> AppResult<()>;

    /// All events of a job, oldest first
    async fn list_for_job(&self, job_id: Uuid) -> AppResult<Vec<JobEvent>>;
}

/// Job queue statistics
#[derive(Debug, Clone)]
pub struct JobStatistics {
    pub queued_count: i64,
    pub running_count: i64,
    pub completed_count: i64,
    pub failed_count: i64,
    pub total_count: i64,
}
