use crate::domain::interaction::NewInteraction;
use crate::error::AppResult;
use async_trait::async_trait;

/// Append-only store of interaction events
#[async_trait]
pub trait InteractionRepository: Send + Sync {
    /// Insert one event.
    ///
    /// # Errors
    /// `AppError::NotFound` when the product does not exist
    async fn insert(&self, interaction: &NewInteraction) -> AppResult<()>;
}
