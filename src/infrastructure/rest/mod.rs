//! Client for the hosted data service's REST interface (PostgREST dialect).
//!
//! Requests are authenticated with the service role key, which must never leave the server.

use crate::error::AppError;
use reqwest::{header, Method, RequestBuilder, Response};
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

const REST_PATH: &str = "/rest/v1";

/// PostgREST reports Postgres error codes verbatim
const FOREIGN_KEY_VIOLATION: &str = "23503";

pub struct RestDataClient {
    base_url: String,
    service_key: String,
    http_client: reqwest::Client,
}

impl RestDataClient {
    pub fn new(project_url: &str, service_key: String, timeout: Duration) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: format!("{}{}", project_url.trim_end_matches('/'), REST_PATH),
            service_key,
            http_client,
        })
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    /// Start an authenticated request against a table
    pub fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.http_client
            .request(method, self.table_url(table))
            .header("apikey", &self.service_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.service_key))
    }

    /// Send a request and turn non-2xx answers into `RestDataError`
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, RestDataError> {
        let response = request.send().await.map_err(RestDataError::transport)?;
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body: RestErrorBody = response.json().await.unwrap_or_default();
        Err(RestDataError {
            status,
            code: body.code,
            message: body
                .message
                .unwrap_or_else(|| "unexpected response from data service".to_string()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct RestErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// A failed call to the data service
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("data service returned {status}: {message}")]
pub struct RestDataError {
    /// HTTP status, 0 when the request never got an answer
    pub status: u16,
    pub code: Option<String>,
    pub message: String,
}

impl RestDataError {
    fn transport(err: reqwest::Error) -> Self {
        Self {
            status: 0,
            code: None,
            message: err.to_string(),
        }
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        self.code.as_deref() == Some(FOREIGN_KEY_VIOLATION)
    }
}

impl From<RestDataError> for AppError {
    fn from(err: RestDataError) -> Self {
        AppError::DataStore(err.to_string())
    }
}

/// `not.in.(a,b,c)` filter value, or `None` when there is nothing to exclude
pub fn not_in_filter(ids: &[Uuid]) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    let joined = ids
        .iter()
        .map(Uuid::to_string)
        .collect::<Vec<_>>()
        .join(",");
    Some(format!("not.in.({})", joined))
}

/// Total row count from a `Content-Range` header such as `0-9/42` or `*/0`
pub fn parse_content_range_total(value: &str) -> Option<i64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}
