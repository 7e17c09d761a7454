/// Manual pairing: the resolution path for orphaned uploads
use crate::modules::pairing::domain::entities::CardPair;
use crate::modules::pairing::domain::repository::CardPairRepository;
use crate::modules::pairing::domain::value_objects::PairingMethod;
use crate::modules::uploads::domain::entities::Upload;
use crate::modules::uploads::domain::repository::UploadRepository;
use crate::modules::uploads::domain::value_objects::UploadStatus;
use crate::log_info;
use crate::shared::errors::{AppError, AppResult};
use std::sync::Arc;
use uuid::Uuid;

const MANUAL_CONFIDENCE: f32 = 1.0;

pub struct ManualPairingService {
    uploads: Arc<dyn UploadRepository>,
    pairs: Arc<dyn CardPairRepository>,
}

impl ManualPairingService {
    pub fn new(uploads: Arc<dyn UploadRepository>, pairs: Arc<dyn CardPairRepository>) -> Self {
        Self { uploads, pairs }
    }

    /// Pair two uploads by explicit user choice
    ///
    /// The back upload is optional - single-sided cards are allowed. Both
    /// uploads must belong to the batch and must not already be members of
    /// a pair (pairs are append-only, so membership is checked against all
    /// existing pairs of the batch).
    pub async fn pair_manually(
        &self,
        profile_id: Uuid,
        batch_id: Uuid,
        front_upload_id: Uuid,
        back_upload_id: Option<Uuid>,
    ) -> AppResult<CardPair> {
        if back_upload_id == Some(front_upload_id) {
            return Err(AppError::ValidationError(
                "Front and back cannot be the same upload".to_string(),
            ));
        }

        let front = self.validated_member(front_upload_id, batch_id).await?;
        let back = match back_upload_id {
            Some(id) => Some(self.validated_member(id, batch_id).await?),
            None => None,
        };

        let existing = self.pairs.find_by_batch(batch_id).await?;
        for upload in [Some(&front), back.as_ref()].into_iter().flatten() {
            if existing.iter().any(|p| p.contains_upload(upload.id)) {
                return Err(AppError::ValidationError(format!(
                    "Upload {} already belongs to a pair",
                    upload.id
                )));
            }
        }

        let pair = CardPair::new(
            profile_id,
            batch_id,
            front.id,
            back.as_ref().map(|b| b.id),
            PairingMethod::Manual,
            MANUAL_CONFIDENCE,
        );
        let saved = self.pairs.insert(&pair).await?;

        self.uploads
            .update_status(front.id, UploadStatus::Paired)
            .await?;
        if let Some(back) = &back {
            self.uploads
                .update_status(back.id, UploadStatus::Paired)
                .await?;
        }

        log_info!(
            "Manually paired uploads in batch {}: front {}, back {:?}",
            batch_id,
            front.id,
            back.as_ref().map(|b| b.id)
        );

        Ok(saved)
    }

    async fn validated_member(&self, upload_id: Uuid, batch_id: Uuid) -> AppResult<Upload> {
        let upload = self
            .uploads
            .find_by_id(upload_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Upload {} not found", upload_id)))?;

        if upload.batch_id != batch_id {
            return Err(AppError::ValidationError(format!(
                "Upload {} does not belong to batch {}",
                upload_id, batch_id
            )));
        }
        if upload.status == UploadStatus::Deleted {
            return Err(AppError::ValidationError(format!(
                "Upload {} has been deleted",
                upload_id
            )));
        }

        Ok(upload)
    }
}
