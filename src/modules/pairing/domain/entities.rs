use super::value_objects::{PairStatus, PairingMethod};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An association of one required front upload and one optional back upload
///
/// The unit of work for extraction. Rows are append-only: a pair is never
/// updated after insertion, re-pairing creates a new row. Each upload belongs
/// to at most one pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardPair {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub batch_id: Uuid,
    pub front_upload_id: Uuid,
    pub back_upload_id: Option<Uuid>,
    pub status: PairStatus,
    pub method: PairingMethod,
    pub confidence: f32,
    pub created_at: DateTime<Utc>,
}

impl CardPair {
    pub fn new(
        profile_id: Uuid,
        batch_id: Uuid,
        front_upload_id: Uuid,
        back_upload_id: Option<Uuid>,
        method: PairingMethod,
        confidence: f32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            profile_id,
            batch_id,
            front_upload_id,
            back_upload_id,
            status: PairStatus::Paired,
            method,
            confidence,
            created_at: Utc::now(),
        }
    }

    /// True if the given upload is a member of this pair
    pub fn contains_upload(&self, upload_id: Uuid) -> bool {
        self.front_upload_id == upload_id || self.back_upload_id == Some(upload_id)
    }
}

/// Outcome of one pairing engine run over a batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PairingReport {
    pub pairs_created: usize,
    pub orphaned_upload_ids: Vec<Uuid>,
    pub errors: Vec<String>,
}

impl PairingReport {
    pub fn has_orphans(&self) -> bool {
        !self.orphaned_upload_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pair_is_paired() {
        let front = Uuid::new_v4();
        let pair = CardPair::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            front,
            None,
            PairingMethod::Manual,
            1.0,
        );
        assert_eq!(pair.status, PairStatus::Paired);
        assert!(pair.contains_upload(front));
        assert!(!pair.contains_upload(Uuid::new_v4()));
    }

    #[test]
    fn test_contains_upload_checks_back() {
        let back = Uuid::new_v4();
        let pair = CardPair::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            Some(back),
            PairingMethod::AutoFilename,
            0.95,
        );
        assert!(pair.contains_upload(back));
    }
}
