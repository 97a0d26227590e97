use std::sync::{Arc, Mutex};

use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use frontdesk::config::AppConfig;
use frontdesk::db;
use frontdesk::handlers;
use frontdesk::state::AppState;
use frontdesk::tenant::FirstBusinessResolver;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        tenant: Box::new(FirstBusinessResolver),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/bootstrap", post(handlers::bootstrap::bootstrap))
        .route("/staff", get(handlers::staff::list_staff))
        .route("/staff", post(handlers::staff::create_staff))
        .route("/staff/:id", patch(handlers::staff::patch_staff))
        .route("/services", get(handlers::services::list_services))
        .route("/services", post(handlers::services::create_service))
        .route("/services/:id", patch(handlers::services::patch_service))
        .route("/api/dev/businesses", get(handlers::dev::list_businesses))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
