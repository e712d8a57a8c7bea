use super::product_repository::ProductRepository;
use crate::domain::product::ProductRecord;
use crate::error::{AppError, AppResult};
use crate::infrastructure::rest::{not_in_filter, parse_content_range_total, RestDataClient};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use uuid::Uuid;

const TABLE: &str = "products";
const SELECT: &str = "id,uid,title,body,producer_id,created_at,producers(name)";

/// Product row as returned by the REST interface, producer embedded
#[derive(Debug, Deserialize)]
struct ProductRow {
    id: Uuid,
    uid: String,
    title: String,
    #[serde(default)]
    body: JsonValue,
    producer_id: Uuid,
    created_at: DateTime<Utc>,
    producers: Option<ProducerName>,
}

#[derive(Debug, Deserialize)]
struct ProducerName {
    name: String,
}

impl From<ProductRow> for ProductRecord {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            uid: row.uid,
            title: row.title,
            body: row.body,
            producer_id: row.producer_id,
            producer_name: row.producers.map(|p| p.name),
            created_at: row.created_at,
        }
    }
}

/// Product catalog read through the hosted data service
pub struct RestProductRepository {
    client: Arc<RestDataClient>,
}

impl RestProductRepository {
    pub fn new(client: Arc<RestDataClient>) -> Self {
        Self { client }
    }

    async fn fetch_rows(&self, query: &[(&str, String)]) -> AppResult<Vec<ProductRow>> {
        let request = self.client.request(Method::GET, TABLE).query(query);
        let response = self.client.send(request).await?;
        response
            .json::<Vec<ProductRow>>()
            .await
            .map_err(|e| AppError::DataStore(format!("Malformed product rows: {}", e)))
    }
}

#[async_trait]
impl ProductRepository for RestProductRepository {
    async fn find_by_reference(&self, reference: &str) -> AppResult<Option<ProductRecord>> {
        let mut query = vec![("select", SELECT.to_string()), ("limit", "2".to_string())];
        match Uuid::parse_str(reference) {
            Ok(id) => query.push(("or", format!("(uid.eq.{},id.eq.{})", reference, id))),
            Err(_) => query.push(("uid", format!("eq.{}", reference))),
        }

        let rows = self.fetch_rows(&query).await?;

        // A uid match wins over an id match
        let position = rows
            .iter()
            .position(|row| row.uid == reference)
            .unwrap_or(0);
        Ok(rows.into_iter().nth(position).map(ProductRecord::from))
    }

    async fn find_unseen(&self, exclude: &[Uuid], limit: i64) -> AppResult<Vec<ProductRecord>> {
        let mut query = vec![
            ("select", SELECT.to_string()),
            ("order", "created_at.desc,id.asc".to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(filter) = not_in_filter(exclude) {
            query.push(("id", filter));
        }

        let rows = self.fetch_rows(&query).await?;
        Ok(rows.into_iter().map(ProductRecord::from).collect())
    }

    async fn count_unseen(&self, exclude: &[Uuid]) -> AppResult<i64> {
        let mut query = vec![("select", "id".to_string())];
        if let Some(filter) = not_in_filter(exclude) {
            query.push(("id", filter));
        }

        let request = self
            .client
            .request(Method::HEAD, TABLE)
            .query(&query)
            .header("Prefer", "count=exact");
        let response = self.client.send(request).await?;

        response
            .headers()
            .get(reqwest::header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| AppError::DataStore("Missing row count in Content-Range".to_string()))
    }
}
