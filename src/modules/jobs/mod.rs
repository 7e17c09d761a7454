/// Background job system module
///
/// Provides a PostgreSQL-backed job queue for the async batch operations:
/// - Pairing (matching a batch's uploads into front/back pairs)
/// - Ocr (extracting card data for every paired card)
///
/// Architecture:
/// - Domain: Entities, typed payload/outcome and repository traits
/// - Infrastructure: Diesel-based repository implementations
/// - Orchestrator: claims queued jobs atomically and drives each to a
///   terminal state
/// - Worker: poll loop that runs orchestration passes
pub mod domain;
pub mod infrastructure;
pub mod orchestrator;
pub mod worker;

// Re-exports for easy access
pub use domain::{
    entities::{Job, JobEvent, JobOutcome, JobPayload, JobRecord, JobType},
    repository::{JobEventRepository, JobRepository, JobStatistics},
    value_objects::{EventLevel, JobStatus},
};
pub use infrastructure::{JobEventRepositoryImpl, JobRepositoryImpl};
pub use orchestrator::{JobResult, Orchestrator, PassReport};
pub use worker::{BackgroundWorker, WorkerStatistics};
