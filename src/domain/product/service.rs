use super::error::ProductServiceError;
use crate::domain::product::{Experience, PageRequest, ProductPage, ProductRecord};
use crate::infrastructure::repositories::ProductRepository;
use async_trait::async_trait;
use moka::future::Cache;
use regex::Regex;
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use uuid::Uuid;

/// Public product references are slugs or UUIDs
static REFERENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,128}$").expect("valid reference pattern"));

pub struct ProductService {
    product_repo: Arc<dyn ProductRepository>,
    default_page_size: i64,
    max_page_size: i64,
    cache: Option<Cache<String, ProductRecord>>,
}

impl ProductService {
    pub fn new(
        product_repo: Arc<dyn ProductRepository>,
        default_page_size: i64,
        max_page_size: i64,
        cache_ttl: Option<Duration>,
    ) -> Self {
        // Products never change under the feed; resolved targets stay valid for the TTL
        let cache = cache_ttl.map(|ttl| {
            Cache::builder()
                .max_capacity(1_000)
                .time_to_live(ttl)
                .build()
        });

        Self {
            product_repo,
            default_page_size,
            max_page_size,
            cache,
        }
    }
}

#[async_trait]
pub trait ProductServiceApi: Send + Sync {
    /// Assemble one page of the feed.
    ///
    /// The target (when it resolves and is not excluded) comes first, then the newest
    /// unseen products. `has_more` tells whether unseen products remain after this page.
    async fn list_products(&self, request: PageRequest) -> Result<ProductPage, ProductServiceError>;
}

#[async_trait]
impl ProductServiceApi for ProductService {
    async fn list_products(&self, request: PageRequest) -> Result<ProductPage, ProductServiceError> {
        let limit = self.resolve_limit(request.limit)?;
        if let Some(target) = request.target.as_deref() {
            self.validate_reference(target)?;
        }

        let mut seen: Vec<Uuid> = Vec::with_capacity(request.exclude.len() + limit as usize);
        let mut seen_set: HashSet<Uuid> = HashSet::with_capacity(seen.capacity());
        for id in request.exclude {
            if seen_set.insert(id) {
                seen.push(id);
            }
        }

        let head = match request.target.as_deref() {
            Some(target) => self
                .resolve_target(target)
                .await?
                .filter(|product| !seen_set.contains(&product.id)),
            None => None,
        };

        let products = match head {
            Some(head) => {
                tracing::debug!(product_id = %head.id, "Target product placed first");
                seen_set.insert(head.id);
                seen.push(head.id);
                let mut products = vec![head];
                if limit > 1 {
                    products.extend(self.find_unseen(&seen, limit - 1).await?);
                }
                products
            }
            // Fallback: the newest unseen product leads the page
            None => self.find_unseen(&seen, limit).await?,
        };

        if products.is_empty() {
            tracing::info!(excluded = seen.len(), "No unseen products left");
            return Ok(ProductPage::empty());
        }

        for product in &products {
            if seen_set.insert(product.id) {
                seen.push(product.id);
            }
        }
        let remaining = self
            .product_repo
            .count_unseen(&seen)
            .await
            .map_err(|e| ProductServiceError::Dependency(e.to_string()))?;

        tracing::info!(
            limit,
            returned = products.len(),
            excluded = seen.len() - products.len(),
            remaining,
            "Product page assembled"
        );

        Ok(ProductPage {
            experiences: products.into_iter().map(Experience::from).collect(),
            has_more: remaining > 0,
        })
    }
}

impl ProductService {
    fn resolve_limit(&self, requested: Option<i64>) -> Result<i64, ProductServiceError> {
        let limit = requested.unwrap_or(self.default_page_size);
        if limit < 1 || limit > self.max_page_size {
            return Err(ProductServiceError::Invalid(format!(
                "limit must be between 1 and {}",
                self.max_page_size
            )));
        }
        Ok(limit)
    }

    fn validate_reference(&self, reference: &str) -> Result<(), ProductServiceError> {
        if !REFERENCE_PATTERN.is_match(reference) {
            return Err(ProductServiceError::Invalid(
                "Invalid product reference".to_string(),
            ));
        }
        Ok(())
    }

    async fn resolve_target(
        &self,
        reference: &str,
    ) -> Result<Option<ProductRecord>, ProductServiceError> {
        if let Some(cache) = &self.cache {
            if let Some(product) = cache.get(reference).await {
                tracing::debug!(reference, "Product reference cache hit");
                return Ok(Some(product));
            }
        }

        let product = self
            .product_repo
            .find_by_reference(reference)
            .await
            .map_err(|e| ProductServiceError::Dependency(e.to_string()))?;

        match (&product, &self.cache) {
            (Some(found), Some(cache)) => {
                cache.insert(reference.to_string(), found.clone()).await;
            }
            (None, _) => {
                tracing::info!(reference, "Target product not found, using fallback");
            }
            _ => {}
        }

        Ok(product)
    }

    async fn find_unseen(
        &self,
        exclude: &[Uuid],
        limit: i64,
    ) -> Result<Vec<ProductRecord>, ProductServiceError> {
        self.product_repo
            .find_unseen(exclude, limit)
            .await
            .map_err(|e| ProductServiceError::Dependency(e.to_string()))
    }
}
