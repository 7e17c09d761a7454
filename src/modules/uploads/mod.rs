/// Upload intake module
///
/// Accepts the image files of a scanning session, persists them as uploads
/// and enqueues the pairing job for the batch. Upload rows are mutated only
/// by the pairing engine and manual pairing; the extraction worker never
/// touches them.
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy access
pub use application::intake_service::{IntakeResult, IntakeService, NewUploadFile};
pub use domain::{
    entities::Upload,
    repository::UploadRepository,
    value_objects::UploadStatus,
};
pub use infrastructure::UploadRepositoryImpl;
