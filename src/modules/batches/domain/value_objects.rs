/// Value objects for the batches domain
use serde::{Deserialize, Serialize};

/// Batch status enum matching database type
///
/// Derived projection only: written by the orchestrator after each job
/// completes, never consulted for scheduling.
#[derive(
    diesel_derive_enum::DbEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::BatchStatus"]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Uploaded,
    Processing,
    NeedsPairing,
    Paired,
    OcrProcessing,
    OcrComplete,
    Failed,
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchStatus::Uploaded => write!(f, "uploaded"),
            BatchStatus::Processing => write!(f, "processing"),
            BatchStatus::NeedsPairing => write!(f, "needs_pairing"),
            BatchStatus::Paired => write!(f, "paired"),
            BatchStatus::OcrProcessing => write!(f, "ocr_processing"),
            BatchStatus::OcrComplete => write!(f, "ocr_complete"),
            BatchStatus::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for BatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uploaded" => Ok(BatchStatus::Uploaded),
            "processing" => Ok(BatchStatus::Processing),
            "needs_pairing" => Ok(BatchStatus::NeedsPairing),
            "paired" => Ok(BatchStatus::Paired),
            "ocr_processing" => Ok(BatchStatus::OcrProcessing),
            "ocr_complete" => Ok(BatchStatus::OcrComplete),
            "failed" => Ok(BatchStatus::Failed),
            _ => Err(format!("Invalid batch status: {}", s)),
        }
    }
}
