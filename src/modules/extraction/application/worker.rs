/// Extraction worker: one vision call per paired card
use crate::modules::extraction::application::parser::parse_card_fields;
use crate::modules::extraction::application::prompt::CARD_EXTRACTION_PROMPT;
use crate::modules::extraction::domain::entities::{Card, ExtractionReport};
use crate::modules::extraction::domain::ports::{InferenceClient, ObjectStore};
use crate::modules::extraction::domain::repository::CardRepository;
use crate::modules::pairing::domain::entities::CardPair;
use crate::modules::pairing::domain::repository::CardPairRepository;
use crate::modules::uploads::domain::repository::UploadRepository;
use crate::shared::errors::{AppError, AppResult};
use crate::{log_debug, log_info, log_warn};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Self-reported confidence below this flags the card for human review
const REVIEW_THRESHOLD: f64 = 0.70;

/// Lifetime of the signed URLs handed to the inference API
const SIGNED_URL_TTL: Duration = Duration::from_secs(900);

pub struct ExtractionWorker {
    pairs: Arc<dyn CardPairRepository>,
    uploads: Arc<dyn UploadRepository>,
    cards: Arc<dyn CardRepository>,
    store: Arc<dyn ObjectStore>,
    inference: Arc<dyn InferenceClient>,
}

impl ExtractionWorker {
    pub fn new(
        pairs: Arc<dyn CardPairRepository>,
        uploads: Arc<dyn UploadRepository>,
        cards: Arc<dyn CardRepository>,
        store: Arc<dyn ObjectStore>,
        inference: Arc<dyn InferenceClient>,
    ) -> Self {
        Self {
            pairs,
            uploads,
            cards,
            store,
            inference,
        }
    }

    /// Extract card data for every paired card of a batch
    ///
    /// A pair that fails URL resolution or the inference call is recorded in
    /// the error list and produces no card, but never aborts its siblings.
    /// Pairs that already have a card (a previous partial run) are skipped.
    pub async fn process_batch_extraction(
        &self,
        batch_id: Uuid,
        profile_id: Uuid,
    ) -> AppResult<ExtractionReport> {
        let pairs = self.pairs.find_paired_by_batch(batch_id).await?;

        let mut report = ExtractionReport {
            success: true,
            ..Default::default()
        };
        if pairs.is_empty() {
            log_debug!("Extraction batch {}: no paired cards, nothing to do", batch_id);
            return Ok(report);
        }

        log_info!(
            "Extracting batch {}: {} paired cards",
            batch_id,
            pairs.len()
        );

        for pair in &pairs {
            match self.cards.exists_for_pair(pair.id).await {
                Ok(true) => {
                    log_debug!("Pair {} already has a card, skipping", pair.id);
                    continue;
                }
                Ok(false) => {}
                Err(e) => {
                    report
                        .errors
                        .push(format!("Failed to check pair {}: {}", pair.id, e));
                    continue;
                }
            }

            report.cards_processed += 1;

            match self.extract_pair(pair, profile_id).await {
                Ok(card) => match self.cards.insert(&card).await {
                    Ok(_) => report.cards_created += 1,
                    Err(e) => report
                        .errors
                        .push(format!("Failed to store card for pair {}: {}", pair.id, e)),
                },
                Err(e) => {
                    log_warn!("Extraction failed for pair {}: {}", pair.id, e);
                    report
                        .errors
                        .push(format!("Extraction failed for pair {}: {}", pair.id, e));
                }
            }
        }

        // Partial progress still counts; only a run where every attempted
        // pair failed reports failure upward.
        report.success = report.cards_created > 0 || report.errors.is_empty();

        log_info!(
            "Extraction batch {} complete: {}/{} cards created, {} errors",
            batch_id,
            report.cards_created,
            report.cards_processed,
            report.errors.len()
        );

        Ok(report)
    }

    async fn extract_pair(&self, pair: &CardPair, profile_id: Uuid) -> AppResult<Card> {
        let image_urls = match pair.back_upload_id {
            Some(back_id) => {
                let (front, back) = futures::try_join!(
                    self.resolve_url(pair.front_upload_id),
                    self.resolve_url(back_id)
                )?;
                vec![front, back]
            }
            None => vec![self.resolve_url(pair.front_upload_id).await?],
        };

        let raw = self
            .inference
            .extract(CARD_EXTRACTION_PROMPT, &image_urls)
            .await?;

        let card = match parse_card_fields(&raw) {
            Some(fields) => {
                let confidence = fields.confidence.unwrap_or(0.0);
                Card::from_extraction(
                    profile_id,
                    pair.batch_id,
                    pair.id,
                    fields,
                    raw,
                    confidence < REVIEW_THRESHOLD,
                )
            }
            None => {
                log_warn!(
                    "Pair {}: response contained no parseable JSON, flagging for review",
                    pair.id
                );
                Card::unparsed(profile_id, pair.batch_id, pair.id, raw)
            }
        };

        Ok(card)
    }

    async fn resolve_url(&self, upload_id: Uuid) -> AppResult<String> {
        let upload = self
            .uploads
            .find_by_id(upload_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Upload {} not found", upload_id)))?;

        self.store
            .signed_url(&upload.storage_path, SIGNED_URL_TTL)
            .await
    }
}
