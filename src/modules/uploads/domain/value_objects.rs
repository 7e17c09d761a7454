/// Value objects for the uploads domain
use serde::{Deserialize, Serialize};

/// Upload status enum matching database type
#[derive(
    diesel_derive_enum::DbEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::UploadStatus"]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Uploaded,
    Paired,
    Orphaned,
    Deleted,
}

impl std::fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadStatus::Uploaded => write!(f, "uploaded"),
            UploadStatus::Paired => write!(f, "paired"),
            UploadStatus::Orphaned => write!(f, "orphaned"),
            UploadStatus::Deleted => write!(f, "deleted"),
        }
    }
}

impl std::str::FromStr for UploadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uploaded" => Ok(UploadStatus::Uploaded),
            "paired" => Ok(UploadStatus::Paired),
            "orphaned" => Ok(UploadStatus::Orphaned),
            "deleted" => Ok(UploadStatus::Deleted),
            _ => Err(format!("Invalid upload status: {}", s)),
        }
    }
}
