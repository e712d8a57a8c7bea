use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    domain::product::{parse_id_list, PageRequest, ProductPage, ProductService, ProductServiceApi},
    error::{AppError, AppResult},
};

/// Query string of GET /api/products
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub exclude: Option<String>, // Comma-separated
    #[serde(default)]
    pub loaded_ids: Option<String>, // Same meaning as exclude
    #[serde(default)]
    pub p: Option<String>,
}

impl ListProductsQuery {
    pub fn into_page_request(self) -> AppResult<PageRequest> {
        let limit = match self.limit.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(
                raw.parse::<i64>()
                    .map_err(|_| AppError::BadRequest("limit must be a number".to_string()))?,
            ),
            None => None,
        };

        let mut exclude = Vec::new();
        for raw in [self.exclude, self.loaded_ids].into_iter().flatten() {
            let ids = parse_id_list(&raw).map_err(|segment| {
                AppError::BadRequest(format!("Invalid product id in exclusion list: {}", segment))
            })?;
            exclude.extend(ids);
        }

        let target = self
            .p
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        Ok(PageRequest {
            exclude,
            limit,
            target,
        })
    }
}

pub struct ProductController {
    product_service: Arc<ProductService>,
}

impl ProductController {
    pub fn new(product_service: Arc<ProductService>) -> Self {
        Self { product_service }
    }

    /// GET /api/products - One page of the feed
    pub async fn list_products(
        State(controller): State<Arc<ProductController>>,
        query: Result<Query<ListProductsQuery>, QueryRejection>,
    ) -> AppResult<Json<ProductPage>> {
        let Query(query) = query?;
        let request = query.into_page_request()?;
        let page = controller.product_service.list_products(request).await?;
        Ok(Json(page))
    }
}
