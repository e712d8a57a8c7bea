pub mod error;
pub mod model;
pub mod service;

pub use error::ProductServiceError;
pub use model::{ProductBody, ProductRecord};
pub use service::{ProductService, ProductServiceApi};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEFAULT_CURRENCY: &str = "€";
const PLACEHOLDER_IMAGE: &str = "/placeholder.jpg";

/// Flat display shape of a product, as rendered by the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: Uuid,
    pub uid: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub image_url: String,
    pub checkout_url: String,
    pub producer_id: Uuid,
    pub producer_name: String,
}

/// Response for GET /api/products
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub experiences: Vec<Experience>,
    pub has_more: bool,
}

impl ProductPage {
    pub fn empty() -> Self {
        Self {
            experiences: Vec::new(),
            has_more: false,
        }
    }
}

/// A validated request for one page of the feed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRequest {
    /// Identifiers the caller has already seen
    pub exclude: Vec<Uuid>,
    /// Requested page size; the service default applies when absent
    pub limit: Option<i64>,
    /// Product `uid` or `id` to show first
    pub target: Option<String>,
}

impl From<ProductRecord> for Experience {
    fn from(product: ProductRecord) -> Self {
        let body = ProductBody::from_json(&product.body);
        let image_url = body
            .primary_image()
            .unwrap_or(PLACEHOLDER_IMAGE)
            .to_string();

        Self {
            id: product.id,
            uid: product.uid,
            title: product.title,
            description: body.description.unwrap_or_default(),
            price: body.price.unwrap_or(0.0),
            currency: body.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            image_url,
            checkout_url: body.checkout_url.unwrap_or_default(),
            producer_id: product.producer_id,
            producer_name: product.producer_name.unwrap_or_default(),
        }
    }
}

/// Parse a comma-separated list of product ids, skipping empty segments.
///
/// Returns the first segment that is not a UUID as the error.
pub fn parse_id_list(raw: &str) -> Result<Vec<Uuid>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| Uuid::parse_str(segment).map_err(|_| segment.to_string()))
        .collect()
}
