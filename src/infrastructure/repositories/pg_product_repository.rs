use super::product_repository::ProductRepository;
use crate::domain::product::ProductRecord;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

const PRODUCT_COLUMNS: &str = r#"
    p.id, p.uid, p.title, p.body, p.producer_id,
    pr.name AS producer_name, p.created_at
"#;

/// Postgres implementation of the product catalog
pub struct PgProductRepository {
    pool: Arc<DbPool>,
}

impl PgProductRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_by_reference(&self, reference: &str) -> AppResult<Option<ProductRecord>> {
        let pool = self.pool.as_ref();
        let as_id = Uuid::parse_str(reference).ok();

        let product = sqlx::query_as::<_, ProductRecord>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products p
            LEFT JOIN producers pr ON pr.id = p.producer_id
            WHERE p.uid = $1 OR p.id = $2
            ORDER BY (p.uid = $1) DESC
            LIMIT 1
            "#
        ))
        .bind(reference)
        .bind(as_id)
        .fetch_optional(pool)
        .await?;

        Ok(product)
    }

    async fn find_unseen(&self, exclude: &[Uuid], limit: i64) -> AppResult<Vec<ProductRecord>> {
        let pool = self.pool.as_ref();
        let products = sqlx::query_as::<_, ProductRecord>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products p
            LEFT JOIN producers pr ON pr.id = p.producer_id
            WHERE p.id <> ALL($1)
            ORDER BY p.created_at DESC, p.id
            LIMIT $2
            "#
        ))
        .bind(exclude)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(products)
    }

    async fn count_unseen(&self, exclude: &[Uuid]) -> AppResult<i64> {
        let pool = self.pool.as_ref();
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM products
            WHERE id <> ALL($1)
            "#,
        )
        .bind(exclude)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }
}
