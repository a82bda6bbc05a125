//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{Argon2PasswordAdapter, DbAdapter, JwtSessionAdapter, MemoryAdapter},
    config::{Config, Storage},
    error::ApiError,
    web::{router, state::AppState},
};
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use story_hub_core::ports::DatabaseService;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to the Store & Run Migrations ---
    let db: Arc<dyn DatabaseService> = match &config.storage {
        Storage::Postgres(database_url) => {
            info!("Connecting to database...");
            let db_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;
            let db_adapter = DbAdapter::new(db_pool);
            info!("Running database migrations...");
            db_adapter.run_migrations().await?;
            info!("Database migrations complete.");
            Arc::new(db_adapter)
        }
        Storage::Memory => {
            warn!("Using the in-memory store; data is lost on shutdown.");
            Arc::new(MemoryAdapter::new())
        }
    };

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        db,
        passwords: Arc::new(Argon2PasswordAdapter::new()),
        sessions: Arc::new(JwtSessionAdapter::new(
            config.session_secret.as_bytes(),
            Duration::hours(config.session_ttl_hours),
        )),
        config: config.clone(),
    });

    // --- 4. Create the Web Router ---
    let app = router(app_state);

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for the shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received.");
}
