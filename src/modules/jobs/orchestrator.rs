/// Job orchestrator: drives claimed jobs through their lifecycle
///
/// One pass claims a bounded batch of queued jobs atomically, dispatches
/// each to the pairing engine or the extraction worker in creation order,
/// writes the terminal state plus the derived batch status, and appends an
/// audit event. A failure in one job never touches its siblings; only an
/// unreachable queue aborts the pass itself.
use crate::modules::batches::domain::repository::BatchRepository;
use crate::modules::batches::domain::value_objects::BatchStatus;
use crate::modules::jobs::domain::entities::{JobOutcome, JobRecord, JobType};
use crate::modules::jobs::domain::repository::{JobEventRepository, JobRepository};
use crate::modules::jobs::domain::value_objects::EventLevel;
use crate::modules::pairing::application::engine::PairingEngine;
use crate::modules::extraction::application::worker::ExtractionWorker;
use crate::shared::errors::{AppError, AppResult};
use crate::{log_error, log_info, log_warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Upper bound of jobs claimed per pass
const CLAIM_BATCH_LIMIT: i64 = 10;

pub struct Orchestrator {
    jobs: Arc<dyn JobRepository>,
    events: Arc<dyn JobEventRepository>,
    batches: Arc<dyn BatchRepository>,
    pairing_engine: Arc<PairingEngine>,
    extraction_worker: Arc<ExtractionWorker>,
}

/// Outcome of a single job within a pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResult {
    pub job_id: Uuid,
    pub job_type: String,
    pub success: bool,
    pub detail: String,
}

/// Outcome of one orchestration pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PassReport {
    pub processed: usize,
    pub results: Vec<JobResult>,
}

impl Orchestrator {
    pub fn new(
        jobs: Arc<dyn JobRepository>,
        events: Arc<dyn JobEventRepository>,
        batches: Arc<dyn BatchRepository>,
        pairing_engine: Arc<PairingEngine>,
        extraction_worker: Arc<ExtractionWorker>,
    ) -> Self {
        Self {
            jobs,
            events,
            batches,
            pairing_engine,
            extraction_worker,
        }
    }

    /// Run one orchestration pass
    ///
    /// The claim is the only fatal point: if the queue cannot be read the
    /// whole pass reports failure. Everything after is isolated per job.
    pub async fn process_queued_jobs(&self) -> AppResult<PassReport> {
        let claimed = self.jobs.claim_next_batch(CLAIM_BATCH_LIMIT).await?;

        if claimed.is_empty() {
            return Ok(PassReport::default());
        }

        log_info!("Orchestration pass claimed {} job(s)", claimed.len());

        let mut results = Vec::with_capacity(claimed.len());
        for job in &claimed {
            results.push(self.process_job(job).await);
        }

        Ok(PassReport {
            processed: results.len(),
            results,
        })
    }

    /// Drive one claimed job to a terminal state
    ///
    /// Nothing propagates past this boundary: any error becomes the job's
    /// `failed` state plus an error event, and the sibling jobs of the pass
    /// continue untouched.
    async fn process_job(&self, job: &JobRecord) -> JobResult {
        log_info!(
            "Processing job {} (type: {}, attempt {})",
            job.id,
            job.job_type,
            job.attempts
        );

        match self.run_job(job).await {
            Ok(detail) => {
                log_info!("Job {} completed: {}", job.id, detail);
                JobResult {
                    job_id: job.id,
                    job_type: job.job_type.clone(),
                    success: true,
                    detail,
                }
            }
            Err(e) => {
                let error = e.to_string();
                log_warn!("Job {} failed: {}", job.id, error);

                if let Err(persist_err) = self.jobs.mark_failed(job.id, &error).await {
                    log_error!("Failed to mark job {} failed: {}", job.id, persist_err);
                }
                if let Err(event_err) = self
                    .events
                    .append(job.id, EventLevel::Error, &error, None)
                    .await
                {
                    log_error!("Failed to append error event for job {}: {}", job.id, event_err);
                }

                JobResult {
                    job_id: job.id,
                    job_type: job.job_type.clone(),
                    success: false,
                    detail: error,
                }
            }
        }
    }

    async fn run_job(&self, job: &JobRecord) -> AppResult<String> {
        // Validate type and payload at the boundary: a malformed job fails
        // by itself, not the pass
        let job_type = job
            .parse_job_type()
            .map_err(AppError::ValidationError)?;
        let payload = job.parse_payload().map_err(|e| {
            AppError::ValidationError(format!("Invalid job payload: {}", e))
        })?;

        match job_type {
            JobType::Pairing => self.run_pairing(job, payload.batch_id).await,
            JobType::Ocr => self.run_extraction(job, payload.batch_id).await,
        }
    }

    async fn run_pairing(&self, job: &JobRecord, batch_id: Uuid) -> AppResult<String> {
        let report = self
            .pairing_engine
            .pair_batch(batch_id, job.profile_id)
            .await?;

        self.jobs
            .mark_completed(job.id, &JobOutcome::Pairing(report.clone()))
            .await?;

        // The job is terminal from here on; projection failures are logged
        // but can no longer change its state
        let batch_status = if report.has_orphans() {
            BatchStatus::NeedsPairing
        } else {
            BatchStatus::Paired
        };
        if let Err(e) = self.batches.update_status(batch_id, batch_status).await {
            log_error!("Failed to update batch {} status: {}", batch_id, e);
        }

        let message = format!(
            "Pairing complete: {} pairs created, {} orphaned, {} errors",
            report.pairs_created,
            report.orphaned_upload_ids.len(),
            report.errors.len()
        );
        if let Err(e) = self
            .events
            .append(
                job.id,
                EventLevel::Info,
                &message,
                Some(json!({
                    "pairs_created": report.pairs_created,
                    "orphaned": report.orphaned_upload_ids.len(),
                    "errors": report.errors.len(),
                })),
            )
            .await
        {
            log_error!("Failed to append event for job {}: {}", job.id, e);
        }

        Ok(message)
    }

    async fn run_extraction(&self, job: &JobRecord, batch_id: Uuid) -> AppResult<String> {
        let report = self
            .extraction_worker
            .process_batch_extraction(batch_id, job.profile_id)
            .await?;

        if !report.success {
            // Every attempted pair failed: surface it as a job failure and
            // project the batch as failed
            if let Err(e) = self
                .batches
                .update_status(batch_id, BatchStatus::Failed)
                .await
            {
                log_error!("Failed to update batch {} status: {}", batch_id, e);
            }
            return Err(AppError::ExternalServiceError(format!(
                "Extraction failed for batch {}: {}",
                batch_id,
                report.errors.join("; ")
            )));
        }

        self.jobs
            .mark_completed(job.id, &JobOutcome::Extraction(report.clone()))
            .await?;

        if let Err(e) = self
            .batches
            .update_status(batch_id, BatchStatus::OcrComplete)
            .await
        {
            log_error!("Failed to update batch {} status: {}", batch_id, e);
        }
        let progress = if report.cards_processed == 0 {
            100
        } else {
            (report.cards_created * 100 / report.cards_processed) as i32
        };
        if let Err(e) = self.batches.update_progress(batch_id, progress).await {
            log_error!("Failed to update batch {} progress: {}", batch_id, e);
        }

        let message = format!(
            "Extraction complete: {}/{} cards created, {} errors",
            report.cards_created,
            report.cards_processed,
            report.errors.len()
        );
        if let Err(e) = self
            .events
            .append(
                job.id,
                EventLevel::Info,
                &message,
                Some(json!({
                    "cards_processed": report.cards_processed,
                    "cards_created": report.cards_created,
                    "errors": report.errors.len(),
                })),
            )
            .await
        {
            log_error!("Failed to append event for job {}: {}", job.id, e);
        }

        Ok(message)
    }
}
