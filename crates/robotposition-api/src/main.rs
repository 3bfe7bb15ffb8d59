//! Robot position API server entry point.

use std::error::Error;
use std::sync::Arc;

use robotposition_api::config::Config;
use robotposition_api::state::AppState;
use robotposition_api::telemetry;
use robotposition_core::clock::SystemClock;
use robotposition_event_store::pg_event_repository::PgEventRepository;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    let tracer_provider = telemetry::init(&config)?;

    tracing::info!(service = %config.service_name, "Starting robot position API server");

    // Create database connection pool and bring the schema up to date.
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    let event_repository = Arc::new(PgEventRepository::new(pool));
    let app_state = AppState::new(Arc::new(SystemClock), event_repository);

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = robotposition_api::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let served = axum::serve(listener, app).await;

    telemetry::shutdown(tracer_provider);
    served?;

    Ok(())
}
