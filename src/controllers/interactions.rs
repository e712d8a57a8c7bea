use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::USER_AGENT, HeaderMap},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::interaction::{
        InteractionService, InteractionServiceApi, RecordInteractionRequest,
        RecordInteractionResponse,
    },
    error::AppResult,
};

pub struct InteractionController {
    interaction_service: Arc<InteractionService>,
}

impl InteractionController {
    pub fn new(interaction_service: Arc<InteractionService>) -> Self {
        Self {
            interaction_service,
        }
    }

    /// POST /api/interactions - Append one interaction event
    pub async fn record_interaction(
        State(controller): State<Arc<InteractionController>>,
        headers: HeaderMap,
        payload: Result<Json<RecordInteractionRequest>, JsonRejection>,
    ) -> AppResult<Json<RecordInteractionResponse>> {
        let Json(request) = payload?;
        let user_agent = headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        controller
            .interaction_service
            .record_interaction(request, user_agent)
            .await?;

        Ok(Json(RecordInteractionResponse { success: true }))
    }
}
