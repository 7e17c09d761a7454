use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Structured extraction output for one card pair
///
/// Created exactly once per successfully processed pair. Later manual
/// corrections happen elsewhere; this module only ever inserts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub batch_id: Uuid,
    pub pair_id: Uuid,
    pub player: Option<String>,
    pub year: Option<i32>,
    pub card_number: Option<String>,
    pub set_name: Option<String>,
    pub condition_estimate: Option<String>,
    pub is_parallel: Option<bool>,
    pub parallel_type: Option<String>,
    pub raw_response: String,
    pub confidence: f32,
    pub needs_human_review: bool,
    pub created_at: DateTime<Utc>,
}

/// The recognized field set of a model response
///
/// Every field is optional: whatever the model omits or mangles defaults
/// to null on the card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub player: Option<String>,
    pub year: Option<i32>,
    pub card_number: Option<String>,
    pub set_name: Option<String>,
    pub condition_estimate: Option<String>,
    pub is_parallel: Option<bool>,
    pub parallel_type: Option<String>,
    pub confidence: Option<f64>,
}

impl Card {
    /// Build a card from a parsed model response
    pub fn from_extraction(
        profile_id: Uuid,
        batch_id: Uuid,
        pair_id: Uuid,
        fields: ExtractedFields,
        raw_response: String,
        needs_human_review: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            profile_id,
            batch_id,
            pair_id,
            player: fields.player,
            year: fields.year,
            card_number: fields.card_number,
            set_name: fields.set_name,
            condition_estimate: fields.condition_estimate,
            is_parallel: fields.is_parallel,
            parallel_type: fields.parallel_type,
            raw_response,
            confidence: fields.confidence.unwrap_or(0.0) as f32,
            needs_human_review,
            created_at: Utc::now(),
        }
    }

    /// Build a card for a response that contained no parseable JSON
    ///
    /// The raw response is preserved and the card is flagged for review
    /// instead of being dropped.
    pub fn unparsed(profile_id: Uuid, batch_id: Uuid, pair_id: Uuid, raw_response: String) -> Self {
        Self::from_extraction(
            profile_id,
            batch_id,
            pair_id,
            ExtractedFields::default(),
            raw_response,
            true,
        )
    }
}

/// Outcome of one extraction run over a batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub success: bool,
    pub cards_processed: usize,
    pub cards_created: usize,
    pub errors: Vec<String>,
}
