/// Upload intake: registers a scanning session and queues its pairing work
use crate::modules::batches::domain::entities::Batch;
use crate::modules::batches::domain::repository::BatchRepository;
use crate::modules::batches::domain::value_objects::BatchStatus;
use crate::modules::jobs::domain::entities::{Job, JobRecord, JobType};
use crate::modules::jobs::domain::repository::JobRepository;
use crate::modules::uploads::domain::entities::Upload;
use crate::modules::uploads::domain::repository::UploadRepository;
use crate::log_info;
use crate::shared::errors::{AppError, AppResult};
use std::sync::Arc;
use uuid::Uuid;

/// One incoming image file, already persisted to the object store
#[derive(Debug, Clone)]
pub struct NewUploadFile {
    pub filename: String,
    pub storage_path: String,
}

/// Result of registering a batch of files
#[derive(Debug, Clone)]
pub struct IntakeResult {
    pub batch: Batch,
    pub uploads: Vec<Upload>,
    /// The pairing job queued (or reused) for the batch; None when there
    /// was nothing to pair
    pub pairing_job: Option<JobRecord>,
}

pub struct IntakeService {
    uploads: Arc<dyn UploadRepository>,
    batches: Arc<dyn BatchRepository>,
    jobs: Arc<dyn JobRepository>,
}

impl IntakeService {
    pub fn new(
        uploads: Arc<dyn UploadRepository>,
        batches: Arc<dyn BatchRepository>,
        jobs: Arc<dyn JobRepository>,
    ) -> Self {
        Self {
            uploads,
            batches,
            jobs,
        }
    }

    /// Register a set of files as a new batch and queue its pairing job
    ///
    /// An empty file set is not an error: the batch is created with nothing
    /// to pair and no job is queued.
    pub async fn register_uploads(
        &self,
        profile_id: Uuid,
        batch_name: &str,
        files: Vec<NewUploadFile>,
    ) -> AppResult<IntakeResult> {
        if batch_name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Batch name cannot be empty".to_string(),
            ));
        }
        if files.iter().any(|f| f.filename.trim().is_empty()) {
            return Err(AppError::ValidationError(
                "Upload filename cannot be empty".to_string(),
            ));
        }

        let batch = Batch::new(profile_id, batch_name.trim().to_string(), files.len() as i32);
        let batch = self.batches.create(&batch).await?;

        if files.is_empty() {
            log_info!("Batch {} registered with no files", batch.id);
            return Ok(IntakeResult {
                batch,
                uploads: Vec::new(),
                pairing_job: None,
            });
        }

        let new_uploads: Vec<Upload> = files
            .into_iter()
            .map(|f| Upload::new(profile_id, batch.id, f.filename, f.storage_path))
            .collect();
        let uploads = self.uploads.insert_many(&new_uploads).await?;

        let job = self.enqueue_pairing(profile_id, batch.id).await?;

        self.batches
            .update_status(batch.id, BatchStatus::Processing)
            .await?;

        log_info!(
            "Batch {} registered: {} uploads, pairing job {}",
            batch.id,
            uploads.len(),
            job.id
        );

        Ok(IntakeResult {
            batch,
            uploads,
            pairing_job: Some(job),
        })
    }

    /// Queue a pairing job for a batch, reusing any active one
    ///
    /// Safe to call repeatedly: as long as a queued or running pairing job
    /// exists for the batch no duplicate is created.
    pub async fn enqueue_pairing(&self, profile_id: Uuid, batch_id: Uuid) -> AppResult<JobRecord> {
        if let Some(existing) = self.jobs.find_active(batch_id, JobType::Pairing).await? {
            log_info!(
                "Reusing active pairing job {} for batch {}",
                existing.id,
                batch_id
            );
            return Ok(existing);
        }

        self.jobs.enqueue(Job::pairing(profile_id, batch_id)).await
    }

    /// Queue an ocr job for a batch, reusing any active one
    pub async fn enqueue_ocr(&self, profile_id: Uuid, batch_id: Uuid) -> AppResult<JobRecord> {
        let batch = self
            .batches
            .find_by_id(batch_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Batch {} not found", batch_id)))?;

        if let Some(existing) = self.jobs.find_active(batch_id, JobType::Ocr).await? {
            log_info!(
                "Reusing active ocr job {} for batch {}",
                existing.id,
                batch_id
            );
            return Ok(existing);
        }

        let job = self.jobs.enqueue(Job::ocr(profile_id, batch_id)).await?;

        self.batches
            .update_status(batch.id, BatchStatus::OcrProcessing)
            .await?;

        Ok(job)
    }
}
