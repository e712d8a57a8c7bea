use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::infrastructure::config::Config;
use crate::infrastructure::middleware::request_id_middleware;
use crate::infrastructure::repositories::ProductRepository;
use crate::controllers::{
    health, interactions::InteractionController, products::ProductController, public_config,
};

/// Everything the router hands to its handlers
pub struct AppState {
    pub config: Arc<Config>,
    pub product_repo: Arc<dyn ProductRepository>,
    pub product_controller: Arc<ProductController>,
    pub interaction_controller: Arc<InteractionController>,
}

/// Build the application router with all routes and layers
pub fn build_router(state: AppState) -> Router {
    let product_routes = Router::new()
        .route("/api/products", get(ProductController::list_products))
        .with_state(state.product_controller);

    let interaction_routes = Router::new()
        .route(
            "/api/interactions",
            post(InteractionController::record_interaction),
        )
        .with_state(state.interaction_controller);

    let config_routes = Router::new()
        .route("/api/config", get(public_config::public_config))
        .with_state(state.config);

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(state.product_repo);

    Router::new()
        .merge(health_routes)
        .merge(product_routes)
        .merge(interaction_routes)
        .merge(config_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
