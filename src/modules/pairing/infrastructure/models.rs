/// Diesel models for the card_pairs table
use crate::modules::pairing::domain::entities::CardPair;
use crate::modules::pairing::domain::value_objects::{PairStatus, PairingMethod};
use crate::schema::card_pairs;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = card_pairs)]
pub struct CardPairModel {
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

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = card_pairs)]
pub struct NewCardPair {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub batch_id: Uuid,
    pub front_upload_id: Uuid,
    pub back_upload_id: Option<Uuid>,
    pub status: PairStatus,
    pub method: PairingMethod,
    pub confidence: f32,
}

impl CardPairModel {
    pub fn to_domain(self) -> CardPair {
        CardPair {
            id: self.id,
            profile_id: self.profile_id,
            batch_id: self.batch_id,
            front_upload_id: self.front_upload_id,
            back_upload_id: self.back_upload_id,
            status: self.status,
            method: self.method,
            confidence: self.confidence,
            created_at: self.created_at,
        }
    }
}

impl From<&CardPair> for NewCardPair {
    fn from(pair: &CardPair) -> Self {
        Self {
            id: pair.id,
            profile_id: pair.profile_id,
            batch_id: pair.batch_id,
            front_upload_id: pair.front_upload_id,
            back_upload_id: pair.back_upload_id,
            status: pair.status,
            method: pair.method,
            confidence: pair.confidence,
        }
    }
}
