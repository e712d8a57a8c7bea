pub mod error;
pub mod model;
pub mod service;

pub use error::InteractionServiceError;
pub use model::{InteractionAction, InteractionFlags, NewInteraction};
pub use service::{InteractionService, InteractionServiceApi};

use serde::{Deserialize, Serialize};

/// Request for POST /api/interactions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordInteractionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disliked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clicked_buy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clicked_details: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clicked_share: Option<bool>,
    /// Alternative to the flags: a single action name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl RecordInteractionRequest {
    /// A request carrying only an action name
    pub fn for_action(product_id: impl ToString, action: &InteractionAction) -> Self {
        Self {
            product_id: Some(product_id.to_string()),
            action: Some(action.as_str().to_string()),
            ..Default::default()
        }
    }

    pub fn flags(&self) -> InteractionFlags {
        InteractionFlags {
            liked: self.liked,
            disliked: self.disliked,
            clicked_buy: self.clicked_buy.unwrap_or(false),
            clicked_details: self.clicked_details.unwrap_or(false),
            clicked_share: self.clicked_share.unwrap_or(false),
        }
    }
}

/// Response for POST /api/interactions
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordInteractionResponse {
    pub success: bool,
}
