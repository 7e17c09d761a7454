/// Diesel models for the jobs and job_events tables
use crate::modules::jobs::domain::entities::{Job, JobEvent, JobRecord};
use crate::modules::jobs::domain::value_objects::{EventLevel, JobStatus};
use crate::schema::{job_events, jobs};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Diesel model for inserting new jobs
#[derive(Insertable, Debug)]
#[diesel(table_name = jobs)]
pub struct NewJob {
    pub profile_id: Uuid,
    pub batch_id: Uuid,
    pub job_type: String,
    pub payload: JsonValue,
}

impl From<&Job> for NewJob {
    fn from(job: &Job) -> Self {
        Self {
            profile_id: job.profile_id,
            batch_id: job.batch_id,
            job_type: job.job_type.to_string(),
            payload: job.payload.clone(),
        }
    }
}

/// Diesel model for querying existing jobs
#[derive(Queryable, Selectable, QueryableByName, Debug, Clone)]
#[diesel(table_name = jobs)]
pub struct JobModel {
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

impl JobModel {
    /// Convert to domain JobRecord
    pub fn to_job_record(self) -> JobRecord {
        JobRecord {
            id: self.id,
            profile_id: self.profile_id,
            batch_id: self.batch_id,
            job_type: self.job_type,
            status: self.status,
            payload: self.payload,
            result: self.result,
            error: self.error,
            attempts: self.attempts,
            created_at: self.created_at,
            started_at: self.started_at,
            completed_at: self.completed_at,
        }
    }
}

/// Diesel model for inserting job events
#[derive(Insertable, Debug)]
#[diesel(table_name = job_events)]
pub struct NewJobEvent {
    pub job_id: Uuid,
    pub level: EventLevel,
    pub message: String,
    pub data: Option<JsonValue>,
}

/// Diesel model for querying job events
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = job_events)]
pub struct JobEventModel {
    pub id: Uuid,
    pub job_id: Uuid,
    pub level: EventLevel,
    pub message: String,
    pub data: Option<JsonValue>,
    pub at: DateTime<Utc>,
}

impl JobEventModel {
    pub fn to_domain(self) -> JobEvent {
        JobEvent {
            id: self.id,
            job_id: self.job_id,
            level: self.level,
            message: self.message,
            data: self.data,
            at: self.at,
        }
    }
}
