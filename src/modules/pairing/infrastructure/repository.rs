/// Diesel-based implementation of CardPairRepository
use crate::modules::pairing::domain::entities::CardPair;
use crate::modules::pairing::domain::repository::CardPairRepository;
use crate::modules::pairing::domain::value_objects::PairStatus;
use crate::modules::pairing::infrastructure::models::{CardPairModel, NewCardPair};
use crate::schema::card_pairs;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::database::{DbConnection, DbPool};
use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

pub struct CardPairRepositoryImpl {
    pool: DbPool,
}

impl CardPairRepositoryImpl {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn get_conn(&self) -> AppResult<DbConnection> {
        self.pool
            .get()
            .map_err(|e| AppError::DatabaseError(format!("Failed to get connection: {}", e)))
    }
}

#[async_trait]
impl CardPairRepository for CardPairRepositoryImpl {
    async fn insert(&self, pair: &CardPair) -> AppResult<CardPair> {
        let new_pair = NewCardPair::from(pair);
        let mut conn = self.get_conn()?;

        let inserted: CardPairModel = diesel::insert_into(card_pairs::table)
            .values(&new_pair)
            .get_result(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to insert pair: {}", e)))?;

        Ok(inserted.to_domain())
    }

    async fn find_by_batch(&self, batch_id: Uuid) -> AppResult<Vec<CardPair>> {
        let mut conn = self.get_conn()?;

        let rows: Vec<CardPairModel> = card_pairs::table
            .filter(card_pairs::batch_id.eq(batch_id))
            .order(card_pairs::created_at.asc())
            .load(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to get batch pairs: {}", e)))?;

        Ok(rows.into_iter().map(|p| p.to_domain()).collect())
    }

    async fn find_paired_by_batch(&self, batch_id: Uuid) -> AppResult<Vec<CardPair>> {
        let mut conn = self.get_conn()?;

        let rows: Vec<CardPairModel> = card_pairs::table
            .filter(card_pairs::batch_id.eq(batch_id))
            .filter(card_pairs::status.eq(PairStatus::Paired))
            .order(card_pairs::created_at.asc())
            .load(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to get paired pairs: {}", e)))?;

        Ok(rows.into_iter().map(|p| p.to_domain()).collect())
    }
}
