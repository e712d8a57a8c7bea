use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tuuura_backend::controllers::{
    interactions::InteractionController, products::ProductController,
};
use tuuura_backend::domain::{interaction::InteractionService, product::ProductService};
use tuuura_backend::infrastructure::config::{Config, DataBackend, LogFormat};
use tuuura_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use tuuura_backend::infrastructure::http::{build_router, start_http_server, AppState};
use tuuura_backend::infrastructure::repositories::{
    InteractionRepository, PgInteractionRepository, PgProductRepository, ProductRepository,
    RestInteractionRepository, RestProductRepository,
};
use tuuura_backend::infrastructure::rest::RestDataClient;

type Repositories = (Arc<dyn ProductRepository>, Arc<dyn InteractionRepository>);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        backend = ?config.data_backend,
        "Starting Tuuura Backend on {}:{}",
        config.host,
        config.port
    );

    if config.is_development() && config.supabase_anon_key.is_none() {
        tracing::warn!("SUPABASE_ANON_KEY is not set, /api/config will return no anon key");
    }

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories for the configured data backend
    tracing::info!("Instantiating repositories...");
    let (product_repo, interaction_repo) = match config.data_backend {
        DataBackend::Postgres => postgres_repositories(&config).await?,
        DataBackend::Rest => rest_repositories(&config)?,
    };

    // 2. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let cache_ttl = config
        .product_cache_enabled
        .then(|| Duration::from_secs(config.product_cache_ttl_secs));
    let product_service = Arc::new(ProductService::new(
        product_repo.clone(),
        config.default_page_size,
        config.max_page_size,
        cache_ttl,
    ));
    let interaction_service = Arc::new(InteractionService::new(interaction_repo));

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let product_controller = Arc::new(ProductController::new(product_service));
    let interaction_controller = Arc::new(InteractionController::new(interaction_service));

    let app = build_router(AppState {
        config: config.clone(),
        product_repo,
        product_controller,
        interaction_controller,
    });

    start_http_server(config, app).await?;

    Ok(())
}

async fn postgres_repositories(config: &Config) -> Result<Repositories, Box<dyn std::error::Error>> {
    let database_url = config
        .database_url
        .as_deref()
        .ok_or("DATABASE_URL is required for the postgres backend")?;

    // Create database connection pool
    let pool = create_pool(database_url).await?;
    tracing::info!("Database connection pool created");

    // Verify database connection
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let pool = Arc::new(pool);
    Ok((
        Arc::new(PgProductRepository::new(pool.clone())),
        Arc::new(PgInteractionRepository::new(pool)),
    ))
}

fn rest_repositories(config: &Config) -> Result<Repositories, Box<dyn std::error::Error>> {
    let project_url = config
        .supabase_url
        .as_deref()
        .ok_or("SUPABASE_URL is required for the rest backend")?;
    let service_key = config
        .supabase_service_role_key
        .clone()
        .ok_or("SUPABASE_SERVICE_ROLE_KEY is required for the rest backend")?;

    let client = Arc::new(RestDataClient::new(
        project_url,
        service_key,
        Duration::from_secs(config.rest_timeout_secs),
    )?);
    tracing::info!(project_url, "REST data client initialized");

    Ok((
        Arc::new(RestProductRepository::new(client.clone())),
        Arc::new(RestInteractionRepository::new(client)),
    ))
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "tuuura_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "tuuura_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
