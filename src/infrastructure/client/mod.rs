//! HTTP client for the feed API, used by `FeedSession` outside the server.

use crate::domain::feed_session::{FeedSessionError, FeedSource, InteractionSink};
use crate::domain::interaction::RecordInteractionRequest;
use crate::domain::product::{PageRequest, ProductPage};
use crate::error::ErrorResponse;
use async_trait::async_trait;
use reqwest::Response;

pub struct HttpFeedClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpFeedClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    /// Query parameters for GET /api/products
    pub fn page_query(request: &PageRequest) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(limit) = request.limit {
            query.push(("limit", limit.to_string()));
        }
        if !request.exclude.is_empty() {
            let exclude = request
                .exclude
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            query.push(("exclude", exclude));
        }
        if let Some(target) = &request.target {
            query.push(("p", target.clone()));
        }
        query
    }

    async fn rejected(response: Response) -> FeedSessionError {
        let status = response.status().as_u16();
        let message = response
            .json::<ErrorResponse>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| "unexpected error".to_string());
        FeedSessionError::Rejected { status, message }
    }
}

#[async_trait]
impl FeedSource for HttpFeedClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<ProductPage, FeedSessionError> {
        let response = self
            .http_client
            .get(format!("{}/api/products", self.base_url))
            .query(&Self::page_query(request))
            .send()
            .await
            .map_err(|e| FeedSessionError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::rejected(response).await);
        }

        response
            .json::<ProductPage>()
            .await
            .map_err(|e| FeedSessionError::Decode(e.to_string()))
    }
}

#[async_trait]
impl InteractionSink for HttpFeedClient {
    async fn record(&self, request: RecordInteractionRequest) -> Result<(), FeedSessionError> {
        let response = self
            .http_client
            .post(format!("{}/api/interactions", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| FeedSessionError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::rejected(response).await);
        }
        Ok(())
    }
}
