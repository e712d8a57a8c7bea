use super::interaction_repository::InteractionRepository;
use crate::domain::interaction::NewInteraction;
use crate::error::{AppError, AppResult};
use crate::infrastructure::rest::RestDataClient;
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;

const TABLE: &str = "link_stduser_product";

/// Interaction log written through the hosted data service
pub struct RestInteractionRepository {
    client: Arc<RestDataClient>,
}

impl RestInteractionRepository {
    pub fn new(client: Arc<RestDataClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InteractionRepository for RestInteractionRepository {
    async fn insert(&self, interaction: &NewInteraction) -> AppResult<()> {
        let request = self
            .client
            .request(Method::POST, TABLE)
            .header("Prefer", "return=minimal")
            .json(interaction);

        match self.client.send(request).await {
            Ok(_) => Ok(()),
            Err(err) if err.is_foreign_key_violation() => {
                Err(AppError::NotFound("Product not found".to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }
}
