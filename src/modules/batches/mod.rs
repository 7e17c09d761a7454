/// Batch aggregate module
///
/// A batch groups the uploads from one scanning session. Its status is a
/// derived projection written by the job orchestrator after each job reaches
/// a terminal state; scheduling decisions never read it.
pub mod domain;
pub mod infrastructure;

// Re-exports for easy access
pub use domain::{
    entities::Batch,
    repository::BatchRepository,
    value_objects::BatchStatus,
};
pub use infrastructure::BatchRepositoryImpl;
