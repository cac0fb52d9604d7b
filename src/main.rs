use std::sync::Arc;

use group_api::{
    create_router,
    db::{create_pool, run_migrations},
    group::{GroupRepository, PgGroupService},
    AppState, Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,group_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Sanitize URL for logging (hide credentials)
    let url_for_logging = match config.database_url.rsplit_once('@') {
        Some((_, host)) => format!("<hidden>@{}", host),
        None => "<invalid format>".to_string(),
    };
    tracing::info!("Connecting to database at {}...", url_for_logging);
    let db = create_pool(&config.database_url, config.database_max_connections).await?;

    tracing::info!("Running migrations...");
    run_migrations(&db).await?;

    let group_service = PgGroupService::new(GroupRepository::new(db.clone()));
    let state = AppState::new(
        tracing::info_span!("group_api"),
        Arc::new(group_service),
    );

    let app = create_router(state, &config.cors_allowed_origins);

    let addr = config.bind_addr();
    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {:?}", e);
        std::future::pending::<()>().await;
    }
}
