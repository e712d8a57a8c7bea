use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::config::Config;

/// Settings a browser client may see. Never carries the service key.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfigResponse {
    pub supabase_url: Option<String>,
    pub anon_key: Option<String>,
}

impl From<&Config> for PublicConfigResponse {
    fn from(config: &Config) -> Self {
        Self {
            supabase_url: config.supabase_url.clone(),
            anon_key: config.supabase_anon_key.clone(),
        }
    }
}

/// GET /api/config
pub async fn public_config(State(config): State<Arc<Config>>) -> Json<PublicConfigResponse> {
    Json(PublicConfigResponse::from(config.as_ref()))
}
