pub mod modules;
mod schema;
pub mod shared;

// Re-exports of the main entry points
pub use modules::jobs::{BackgroundWorker, Orchestrator};
pub use modules::pairing::{ManualPairingService, PairingEngine};
pub use modules::uploads::IntakeService;
