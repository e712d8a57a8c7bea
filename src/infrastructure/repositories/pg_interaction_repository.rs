use super::interaction_repository::InteractionRepository;
use crate::domain::interaction::NewInteraction;
use crate::error::{AppError, AppResult};
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use std::sync::Arc;

/// Postgres implementation of the interaction log
pub struct PgInteractionRepository {
    pool: Arc<DbPool>,
}

impl PgInteractionRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InteractionRepository for PgInteractionRepository {
    async fn insert(&self, interaction: &NewInteraction) -> AppResult<()> {
        let pool = self.pool.as_ref();
        let now = chrono::Utc::now();

        sqlx::query(
            r#"
            INSERT INTO link_stduser_product (
                user_id, product_id, liked, disliked,
                clicked_buy, clicked_details, clicked_share,
                action, anonymous_data, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            "#,
        )
        .bind(interaction.user_id)
        .bind(interaction.product_id)
        .bind(interaction.flags.liked)
        .bind(interaction.flags.disliked)
        .bind(interaction.flags.clicked_buy)
        .bind(interaction.flags.clicked_details)
        .bind(interaction.flags.clicked_share)
        .bind(&interaction.action)
        .bind(&interaction.anonymous_data)
        .bind(now)
        .execute(pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_foreign_key_violation() {
                    return AppError::NotFound("Product not found".to_string());
                }
            }
            AppError::Database(e)
        })?;

        Ok(())
    }
}
