use anyhow::Result;
use axum::http::{header, HeaderValue, Method};
use axum::middleware;
use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use api::config::PortalConfig;
use api::gateway::PgStore;
use api::metrics;
use api::observability::Observability;
use api::routes;
use api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    let obs = Observability::init()?;
    let config = PortalConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.connection_string)
        .await?;

    sqlx::migrate!("../database/migrations").run(&pool).await?;
    tracing::info!("Database connected and migrations applied");

    let bind_port = config.bind_port;
    let state = AppState::new(Arc::new(PgStore::new(pool)), config, obs.registry);

    let cors = CorsLayer::new()
        .allow_origin([HeaderValue::from_static("http://localhost:3000")])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    // Build router
    let app = routes::app(state)
        .layer(middleware::from_fn(request_logger))
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], bind_port));
    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn request_logger(
    req: axum::http::Request<axum::body::Body>,
    next: middleware::Next,
) -> axum::response::Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = std::time::Instant::now();

    let response = next.run(req).await;

    let elapsed = start.elapsed().as_millis();
    let status = response.status().as_u16();
    metrics::HTTP_REQUESTS_TOTAL
        .with_label_values(&[method.as_str(), uri.path(), &status.to_string()])
        .inc();

    tracing::info!("{method} {uri} {status} {elapsed}ms");

    response
}
