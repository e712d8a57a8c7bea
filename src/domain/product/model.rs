use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// A product row joined with its producer's name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductRecord {
    pub id: Uuid,
    pub uid: String,
    pub title: String,
    pub body: JsonValue,
    pub producer_id: Uuid,
    pub producer_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Typed view over the opaque `body` payload of a product.
///
/// Fields are read one by one so a malformed entry only loses that entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductBody {
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub image_url: Option<String>,
    pub images: Vec<String>,
    pub checkout_url: Option<String>,
    pub details: Option<JsonValue>,
}

impl ProductBody {
    pub fn from_json(value: &JsonValue) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(JsonValue::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        // "NaN" and "inf" parse as f64 but have no JSON form
        let price = value
            .get("price")
            .and_then(|p| {
                p.as_f64()
                    .or_else(|| p.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
            })
            .filter(|p| p.is_finite());

        let images = value
            .get("images")
            .and_then(JsonValue::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(JsonValue::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            description: text("description"),
            price,
            currency: text("currency"),
            image_url: text("imageUrl"),
            images,
            checkout_url: text("checkoutUrl"),
            details: value.get("details").filter(|d| d.is_object()).cloned(),
        }
    }

    /// The main image: `imageUrl`, else the first of `images`
    pub fn primary_image(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .or_else(|| self.images.first().map(String::as_str))
    }
}
