/// Repository trait for card persistence
use super::entities::Card;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait CardRepository: Send + Sync {
    /// Persist a new card
    async fn insert(&self, card: &Card) -> AppResult<Card>;

    /// All cards of a batch
    async fn find_by_batch(&self, batch_id: Uuid) -> AppResult<Vec<Card>>;

    /// Whether a card was already created for the given pair
    async fn exists_for_pair(&self, pair_id: Uuid) -> AppResult<bool>;
}
