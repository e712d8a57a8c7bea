use super::error::InteractionServiceError;
use super::model::{InteractionAction, NewInteraction};
use super::RecordInteractionRequest;
use crate::error::AppError;
use crate::infrastructure::repositories::InteractionRepository;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

pub struct InteractionService {
    interaction_repo: Arc<dyn InteractionRepository>,
}

impl InteractionService {
    pub fn new(interaction_repo: Arc<dyn InteractionRepository>) -> Self {
        Self { interaction_repo }
    }
}

#[async_trait]
pub trait InteractionServiceApi: Send + Sync {
    /// Append one interaction event.
    ///
    /// `user_agent` is kept as anonymous metadata when the request has no user id.
    async fn record_interaction(
        &self,
        request: RecordInteractionRequest,
        user_agent: Option<String>,
    ) -> Result<InteractionAction, InteractionServiceError>;
}

#[async_trait]
impl InteractionServiceApi for InteractionService {
    async fn record_interaction(
        &self,
        request: RecordInteractionRequest,
        user_agent: Option<String>,
    ) -> Result<InteractionAction, InteractionServiceError> {
        let product_id = self.parse_product_id(request.product_id.as_deref())?;
        let user_id = self.parse_user_id(request.user_id.as_deref())?;

        let mut flags = request.flags();
        let action = match request.action.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => InteractionAction::parse(raw),
            _ => InteractionAction::from_flags(&flags),
        };
        action.apply_to(&mut flags);

        let anonymous_data = match user_id {
            Some(_) => None,
            None => Some(json!({ "userAgent": user_agent })),
        };

        let interaction = NewInteraction {
            product_id,
            user_id,
            flags,
            action: action.as_str().to_string(),
            anonymous_data,
        };

        self.interaction_repo
            .insert(&interaction)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => InteractionServiceError::ProductNotFound,
                other => InteractionServiceError::Dependency(other.to_string()),
            })?;

        tracing::info!(
            product_id = %product_id,
            action = %action,
            anonymous = user_id.is_none(),
            "Interaction recorded"
        );

        Ok(action)
    }
}

impl InteractionService {
    fn parse_product_id(&self, raw: Option<&str>) -> Result<Uuid, InteractionServiceError> {
        let raw = raw
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| InteractionServiceError::Invalid("Product ID is required".to_string()))?;

        Uuid::parse_str(raw)
            .map_err(|_| InteractionServiceError::Invalid("Invalid product ID".to_string()))
    }

    fn parse_user_id(&self, raw: Option<&str>) -> Result<Option<Uuid>, InteractionServiceError> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(None),
            Some(raw) => Uuid::parse_str(raw)
                .map(Some)
                .map_err(|_| InteractionServiceError::Invalid("Invalid user ID".to_string())),
        }
    }
}
