/// Extraction module
///
/// Turns paired scans into structured card data: resolves both images to
/// short-lived signed URLs, calls the vision inference API once per pair,
/// defensively parses the response and persists a card with
/// confidence-based review flagging.
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy access
pub use application::worker::ExtractionWorker;
pub use domain::{
    entities::{Card, ExtractedFields, ExtractionReport},
    ports::{InferenceClient, ObjectStore},
    repository::CardRepository,
};
pub use infrastructure::external::vision::{VisionClient, VisionConfig};
pub use infrastructure::storage::{StorageClient, StorageConfig};
pub use infrastructure::CardRepositoryImpl;
