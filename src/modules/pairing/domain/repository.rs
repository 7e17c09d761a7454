/// Repository trait for card pair persistence
use super::entities::CardPair;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait CardPairRepository: Send + Sync {
    /// Insert a new pair (pairs are append-only, there is no update)
    async fn insert(&self, pair: &CardPair) -> AppResult<CardPair>;

    /// All pairs of a batch, regardless of status
    async fn find_by_batch(&self, batch_id: Uuid) -> AppResult<Vec<CardPair>>;

    /// Pairs of a batch ready for extraction (status `paired`)
    async fn find_paired_by_batch(&self, batch_id: Uuid) -> AppResult<Vec<CardPair>>;
}
