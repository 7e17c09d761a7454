/// Diesel-based implementation of CardRepository
use crate::modules::extraction::domain::entities::Card;
use crate::modules::extraction::domain::repository::CardRepository;
use crate::modules::extraction::infrastructure::models::{CardModel, NewCard};
use crate::schema::cards;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::database::{DbConnection, DbPool};
use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use uuid::Uuid;

pub struct CardRepositoryImpl {
    pool: DbPool,
}

impl CardRepositoryImpl {
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
impl CardRepository for CardRepositoryImpl {
    async fn insert(&self, card: &Card) -> AppResult<Card> {
        let new_card = NewCard::from(card);
        let mut conn = self.get_conn()?;

        let inserted: CardModel = diesel::insert_into(cards::table)
            .values(&new_card)
            .get_result(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to insert card: {}", e)))?;

        Ok(inserted.to_domain())
    }

    async fn find_by_batch(&self, batch_id: Uuid) -> AppResult<Vec<Card>> {
        let mut conn = self.get_conn()?;

        let rows: Vec<CardModel> = cards::table
            .filter(cards::batch_id.eq(batch_id))
            .order(cards::created_at.asc())
            .load(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to get batch cards: {}", e)))?;

        Ok(rows.into_iter().map(|c| c.to_domain()).collect())
    }

    async fn exists_for_pair(&self, pair_id: Uuid) -> AppResult<bool> {
        let mut conn = self.get_conn()?;

        let count: i64 = cards::table
            .filter(cards::pair_id.eq(pair_id))
            .select(count_star())
            .first(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to count pair cards: {}", e)))?;

        Ok(count > 0)
    }
}
