use crate::domain::product::ProductRecord;
use crate::error::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Read access to the product catalog.
/// Abstracts the data store (direct Postgres or the hosted REST interface).
///
/// Every listing is ordered newest first (`created_at DESC`).
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Look a product up by its public `uid`, or by `id` when the reference is a UUID
    async fn find_by_reference(&self, reference: &str) -> AppResult<Option<ProductRecord>>;

    /// Newest products whose id is not in `exclude`, at most `limit` of them
    async fn find_unseen(&self, exclude: &[Uuid], limit: i64) -> AppResult<Vec<ProductRecord>>;

    /// Number of products whose id is not in `exclude`
    async fn count_unseen(&self, exclude: &[Uuid]) -> AppResult<i64>;
}
