/// Diesel models for the cards table
use crate::modules::extraction::domain::entities::Card;
use crate::schema::cards;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = cards)]
pub struct CardModel {
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

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = cards)]
pub struct NewCard {
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
}

impl CardModel {
    pub fn to_domain(self) -> Card {
        Card {
            id: self.id,
            profile_id: self.profile_id,
            batch_id: self.batch_id,
            pair_id: self.pair_id,
            player: self.player,
            year: self.year,
            card_number: self.card_number,
            set_name: self.set_name,
            condition_estimate: self.condition_estimate,
            is_parallel: self.is_parallel,
            parallel_type: self.parallel_type,
            raw_response: self.raw_response,
            confidence: self.confidence,
            needs_human_review: self.needs_human_review,
            created_at: self.created_at,
        }
    }
}

impl From<&Card> for NewCard {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id,
            profile_id: card.profile_id,
            batch_id: card.batch_id,
            pair_id: card.pair_id,
            player: card.player.clone(),
            year: card.year,
            card_number: card.card_number.clone(),
            set_name: card.set_name.clone(),
            condition_estimate: card.condition_estimate.clone(),
            is_parallel: card.is_parallel,
            parallel_type: card.parallel_type.clone(),
            raw_response: card.raw_response.clone(),
            confidence: card.confidence,
            needs_human_review: card.needs_human_review,
        }
    }
}
