/// In-memory fakes for the persistence ports and external collaborators
///
/// Every fake keeps rows in insertion order and supports simple failure
/// injection, which is all the orchestration and pairing tests need.
use async_trait::async_trait;
use chrono::Utc;
use deckscan::modules::batches::domain::entities::Batch;
use deckscan::modules::batches::domain::repository::BatchRepository;
use deckscan::modules::batches::domain::value_objects::BatchStatus;
use deckscan::modules::extraction::domain::entities::Card;
use deckscan::modules::extraction::domain::ports::{InferenceClient, ObjectStore};
use deckscan::modules::extraction::domain::repository::CardRepository;
use deckscan::modules::jobs::domain::entities::{Job, JobEvent, JobOutcome, JobRecord, JobType};
use deckscan::modules::jobs::domain::repository::{
    JobEventRepository, JobRepository, JobStatistics,
};
use deckscan::modules::jobs::domain::value_objects::{EventLevel, JobStatus};
use deckscan::modules::pairing::domain::entities::CardPair;
use deckscan::modules::pairing::domain::repository::CardPairRepository;
use deckscan::modules::uploads::domain::entities::Upload;
use deckscan::modules::uploads::domain::repository::UploadRepository;
use deckscan::modules::uploads::domain::value_objects::UploadStatus;
use deckscan::shared::errors::{AppError, AppResult};
use serde_json::Value as JsonValue;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;

// ============= UPLOADS =============

#[derive(Default)]
pub struct InMemoryUploadRepository {
    rows: Mutex<Vec<Upload>>,
    pub fail_status_updates: AtomicBool,
}

impl InMemoryUploadRepository {
    pub fn all(&self) -> Vec<Upload> {
        self.rows.lock().unwrap().clone()
    }

    pub fn get(&self, upload_id: Uuid) -> Option<Upload> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == upload_id)
            .cloned()
    }
}

#[async_trait]
impl UploadRepository for InMemoryUploadRepository {
    async fn insert_many(&self, uploads: &[Upload]) -> AppResult<Vec<Upload>> {
        let mut rows = self.rows.lock().unwrap();
        rows.extend_from_slice(uploads);
        Ok(uploads.to_vec())
    }

    async fn find_by_id(&self, upload_id: Uuid) -> AppResult<Option<Upload>> {
        Ok(self.get(upload_id))
    }

    async fn find_by_batch(&self, batch_id: Uuid) -> AppResult<Vec<Upload>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.batch_id == batch_id)
            .cloned()
            .collect())
    }

    async fn find_uploaded_by_batch(&self, batch_id: Uuid) -> AppResult<Vec<Upload>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.batch_id == batch_id && u.status == UploadStatus::Uploaded)
            .cloned()
            .collect())
    }

    async fn update_status(&self, upload_id: Uuid, status: UploadStatus) -> AppResult<()> {
        if self.fail_status_updates.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(
                "simulated status update failure".to_string(),
            ));
        }
        let mut rows = self.rows.lock().unwrap();
        let upload = rows
            .iter_mut()
            .find(|u| u.id == upload_id)
            .ok_or_else(|| AppError::NotFound(format!("Upload {} not found", upload_id)))?;
        upload.status = status;
        Ok(())
    }
}

// ============= CARD PAIRS =============

#[derive(Default)]
pub struct InMemoryCardPairRepository {
    rows: Mutex<Vec<CardPair>>,
    pub fail_inserts: AtomicBool,
}

impl InMemoryCardPairRepository {
    pub fn all(&self) -> Vec<CardPair> {
        self.rows.lock().unwrap().clone()
    }

    pub fn push(&self, pair: CardPair) {
        self.rows.lock().unwrap().push(pair);
    }
}

#[async_trait]
impl CardPairRepository for InMemoryCardPairRepository {
    async fn insert(&self, pair: &CardPair) -> AppResult<CardPair> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(
                "simulated pair insert failure".to_string(),
            ));
        }
        self.rows.lock().unwrap().push(pair.clone());
        Ok(pair.clone())
    }

    async fn find_by_batch(&self, batch_id: Uuid) -> AppResult<Vec<CardPair>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.batch_id == batch_id)
            .cloned()
            .collect())
    }

    async fn find_paired_by_batch(&self, batch_id: Uuid) -> AppResult<Vec<CardPair>> {
        use deckscan::modules::pairing::domain::value_objects::PairStatus;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.batch_id == batch_id && p.status == PairStatus::Paired)
            .cloned()
            .collect())
    }
}

// ============= CARDS =============

#[derive(Default)]
pub struct InMemoryCardRepository {
    rows: Mutex<Vec<Card>>,
    pub fail_inserts: AtomicBool,
}

impl InMemoryCardRepository {
    pub fn all(&self) -> Vec<Card> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl CardRepository for InMemoryCardRepository {
    async fn insert(&self, card: &Card) -> AppResult<Card> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError(
                "simulated card insert failure".to_string(),
            ));
        }
        self.rows.lock().unwrap().push(card.clone());
        Ok(card.clone())
    }

    async fn find_by_batch(&self, batch_id: Uuid) -> AppResult<Vec<Card>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.batch_id == batch_id)
            .cloned()
            .collect())
    }

    async fn exists_for_pair(&self, pair_id: Uuid) -> AppResult<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.pair_id == pair_id))
    }
}

// ============= BATCHES =============

#[derive(Default)]
pub struct InMemoryBatchRepository {
    rows: Mutex<Vec<Batch>>,
}

impl InMemoryBatchRepository {
    pub fn get(&self, batch_id: Uuid) -> Option<Batch> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == batch_id)
            .cloned()
    }
}

#[async_trait]
impl BatchRepository for InMemoryBatchRepository {
    async fn create(&self, batch: &Batch) -> AppResult<Batch> {
        self.rows.lock().unwrap().push(batch.clone());
        Ok(batch.clone())
    }

    async fn find_by_id(&self, batch_id: Uuid) -> AppResult<Option<Batch>> {
        Ok(self.get(batch_id))
    }

    async fn update_status(&self, batch_id: Uuid, status: BatchStatus) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let batch = rows
            .iter_mut()
            .find(|b| b.id == batch_id)
            .ok_or_else(|| AppError::NotFound(format!("Batch {} not found", batch_id)))?;
        batch.status = status;
        Ok(())
    }

    async fn update_progress(&self, batch_id: Uuid, progress: i32) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let batch = rows
            .iter_mut()
            .find(|b| b.id == batch_id)
            .ok_or_else(|| AppError::NotFound(format!("Batch {} not found", batch_id)))?;
        batch.progress = progress;
        Ok(())
    }
}

// ============= JOBS =============

#[derive(Default)]
pub struct InMemoryJobRepository {
    rows: Mutex<Vec<JobRecord>>,
}

impl InMemoryJobRepository {
    pub fn all(&self) -> Vec<JobRecord> {
        self.rows.lock().unwrap().clone()
    }

    pub fn get(&self, job_id: Uuid) -> Option<JobRecord> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|j| j.id == job_id)
            .cloned()
    }

    /// Insert a raw record directly, bypassing the typed constructors
    /// (used to exercise the orchestrator's boundary validation)
    pub fn push_raw(&self, record: JobRecord) {
        self.rows.lock().unwrap().push(record);
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn enqueue(&self, job: Job) -> AppResult<JobRecord> {
        let record = JobRecord {
            id: Uuid::new_v4(),
            profile_id: job.profile_id,
            batch_id: job.batch_id,
            job_type: job.job_type.to_string(),
            status: JobStatus::Queued,
            payload: job.payload,
            result: None,
            error: None,
            attempts: 0,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
        };
        self.rows.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn claim_next_batch(&self, limit: i64) -> AppResult<Vec<JobRecord>> {
        let mut rows = self.rows.lock().unwrap();

        let mut queued: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, j)| {
                j.status == JobStatus::Queued && matches!(j.job_type.as_str(), "pairing" | "ocr")
            })
            .map(|(i, _)| i)
            .collect();
        queued.sort_by_key(|&i| rows[i].created_at);
        queued.truncate(limit as usize);

        let mut claimed = Vec::with_capacity(queued.len());
        for i in queued {
            let job = &mut rows[i];
            job.status = JobStatus::Running;
            job.started_at = Some(Utc::now());
            job.attempts += 1;
            claimed.push(job.clone());
        }

        Ok(claimed)
    }

    async fn mark_completed(&self, job_id: Uuid, outcome: &JobOutcome) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let job = rows
            .iter_mut()
            .find(|j| j.id == job_id)
            .ok_or_else(|| AppError::NotFound(format!("Job {} not found", job_id)))?;
        job.status = JobStatus::Completed;
        job.result = Some(serde_json::to_value(outcome).unwrap());
        job.completed_at = Some(Utc::now());
        Ok(())
    }

    async fn mark_failed(&self, job_id: Uuid, error: &str) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let job = rows
            .iter_mut()
            .find(|j| j.id == job_id)
            .ok_or_else(|| AppError::NotFound(format!("Job {} not found", job_id)))?;
        job.status = JobStatus::Failed;
        job.error = Some(error.to_string());
        job.completed_at = Some(Utc::now());
        Ok(())
    }

    async fn find_active(
        &self,
        batch_id: Uuid,
        job_type: JobType,
    ) -> AppResult<Option<JobRecord>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|j| {
                j.batch_id == batch_id
                    && j.job_type == job_type.to_string()
                    && matches!(j.status, JobStatus::Queued | JobStatus::Running)
            })
            .min_by_key(|j| j.created_at)
            .cloned())
    }

    async fn get_by_id(&self, job_id: Uuid) -> AppResult<Option<JobRecord>> {
        Ok(self.get(job_id))
    }

    async fn get_statistics(&self) -> AppResult<JobStatistics> {
        let rows = self.rows.lock().unwrap();
        let count = |status: JobStatus| rows.iter().filter(|j| j.status == status).count() as i64;
        Ok(JobStatistics {
            queued_count: count(JobStatus::Queued),
            running_count: count(JobStatus::Running),
            completed_count: count(JobStatus::Completed),
            failed_count: count(JobStatus::Failed),
            total_count: rows.len() as i64,
        })
    }

    async fn delete_old_terminal(&self, _days: i32) -> AppResult<usize> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|j| !j.status.is_terminal());
        Ok(before - rows.len())
    }
}

// ============= JOB EVENTS =============

#[derive(Default)]
pub struct InMemoryJobEventRepository {
    rows: Mutex<Vec<JobEvent>>,
}

impl InMemoryJobEventRepository {
    pub fn all(&self) -> Vec<JobEvent> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobEventRepository for InMemoryJobEventRepository {
    async fn append(
        &self,
        job_id: Uuid,
        level: EventLevel,
        message: &str,
        data: Option<JsonValue>,
    ) -> AppResult<()> {
        self.rows.lock().unwrap().push(JobEvent {
            id: Uuid::new_v4(),
            job_id,
            level,
            message: message.to_string(),
            data,
            at: Utc::now(),
        });
        Ok(())
    }

    async fn list_for_job(&self, job_id: Uuid) -> AppResult<Vec<JobEvent>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.job_id == job_id)
            .cloned()
            .collect())
    }
}

// ============= EXTERNAL COLLABORATORS =============

/// Object store fake: deterministic signed URLs, no network
#[derive(Default)]
pub struct FakeObjectStore;

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn signed_url(&self, storage_path: &str, _ttl: Duration) -> AppResult<String> {
        Ok(format!("https://store.test/signed/{}", storage_path))
    }
}

/// Inference client fake with a scripted response queue
///
/// Responses are consumed in order; once the script runs dry every further
/// call returns the default well-formed card JSON.
pub struct FakeInferenceClient {
    script: Mutex<VecDeque<AppResult<String>>>,
    pub calls: Mutex<Vec<Vec<String>>>,
}

pub const DEFAULT_CARD_JSON: &str = r#"{
  "player": "Ken Griffey Jr.",
  "year": 1989,
  "card_number": "1",
  "set_name": "Upper Deck",
  "condition_estimate": "near_mint",
  "is_parallel": false,
  "parallel_type": null,
  "confidence": 0.91
}"#;

impl Default for FakeInferenceClient {
    fn default() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeInferenceClient {
    pub fn with_script(responses: Vec<AppResult<String>>) -> Self {
        Self {
            script: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl InferenceClient for FakeInferenceClient {
    async fn extract(&self, _prompt: &str, image_urls: &[String]) -> AppResult<String> {
        self.calls.lock().unwrap().push(image_urls.to_vec());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(DEFAULT_CARD_JSON.to_string()))
    }
}
