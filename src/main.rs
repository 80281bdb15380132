use std::{sync::Arc, time::Duration};

use tracing_subscriber::EnvFilter;

use pantry_api::{
    config::Config,
    db::{create_pool, create_redis_client, ApiUsage, PgUserStore},
    routes::{create_router, AppState},
    services::providers::SpoonacularProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    let redis_client = create_redis_client(&config.redis_url)?;
    let usage = ApiUsage::new(redis_client, "spoonacular", config.daily_request_limit);

    let provider = SpoonacularProvider::new(
        config.spoonacular_api_key.clone(),
        config.spoonacular_api_url.clone(),
        Duration::from_secs(config.http_timeout_secs),
        config.search_result_limit,
    )?
    .with_usage(usage);

    let state = AppState::new(
        Arc::new(PgUserStore::new(pool.clone())),
        Arc::new(provider),
    );
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
