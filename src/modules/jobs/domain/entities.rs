/// Domain entities for the background job system
///
/// Jobs represent the async batch operations (pairing, ocr) that are queued
/// durably and processed by orchestration passes.
use super::value_objects::{EventLevel, JobStatus};
use crate::modules::extraction::domain::entities::ExtractionReport;
use crate::modules::pairing::domain::entities::PairingReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Job type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Pairing,
    Ocr,
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobType::Pairing => write!(f, "pairing"),
            JobType::Ocr => write!(f, "ocr"),
        }
    }
}

impl std::str::FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pairing" => Ok(JobType::Pairing),
            "ocr" => Ok(JobType::Ocr),
            _ => Err(format!("Invalid job type: {}", s)),
        }
    }
}

/// Typed payload shared by both job types: the batch to operate on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPayload {
    pub batch_id: Uuid,
}

/// Discriminated result stored on a completed job
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobOutcome {
    Pairing(PairingReport),
    Extraction(ExtractionReport),
}

/// New job to be queued (before insertion to database)
#[derive(Debug, Clone)]
pub struct Job {
    pub job_type: JobType,
    pub profile_id: Uuid,
    pub batch_id: Uuid,
    pub payload: JsonValue,
}

impl Job {
    /// Create a new pairing job for a batch
    pub fn pairing(profile_id: Uuid, batch_id: Uuid) -> Self {
        let payload = JobPayload { batch_id };
        Self {
            job_type: JobType::Pairing,
            profile_id,
            batch_id,
            payload: serde_json::to_value(payload).unwrap(),
        }
    }

    /// Create a new ocr job for a batch
    pub fn ocr(profile_id: Uuid, batch_id: Uuid) -> Self {
        let payload = JobPayload { batch_id };
        Self {
            job_type: JobType::Ocr,
            profile_id,
            batch_id,
            payload: serde_json::to_value(payload).unwrap(),
        }
    }
}

/// Job record from database (with metadata)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub batch_id: Uuid,
    pub job_type: String,
    pub status: JobStatus,
    pub payload: JsonValue,
    pub result: Option<JsonValue>,
    pub error: Option<String>,
    pub attempts: i32,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl JobRecord {
    /// Parse job type
    pub fn parse_job_type(&self) -> Result<JobType, String> {
        self.job_type.parse()
    }

    /// Parse and validate the typed payload
    pub fn parse_payload(&self) -> Result<JobPayload, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }

    /// Parse the typed outcome of a completed job
    pub fn parse_outcome(&self) -> Option<JobOutcome> {
        self.result
            .as_ref()
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}

/// Immutable audit log entry for one job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobEvent {
    pub id: Uuid,
    pub job_id: Uuid,
    pub level: EventLevel,
    pub message: String,
    pub data: Option<JsonValue>,
    pub at: DateTime<Utc>,
}
