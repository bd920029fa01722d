use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, metrics_handler, state::AppState};

pub fn submission_routes() -> Router<AppState> {
    Router::new()
        .route("/api/submissions", post(handlers::create_submission))
        .route(
            "/api/submissions/open",
            post(handlers::create_submission_lenient),
        )
}

pub fn scoring_routes() -> Router<AppState> {
    Router::new().route("/api/scores", post(handlers::create_score))
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health_check))
}

pub fn observability_routes() -> Router<AppState> {
    Router::new().route("/metrics", get(metrics_handler::metrics_endpoint))
}

/// Full application router. `main` and the integration tests build the
/// same tree; middleware is layered on in `main` only.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(submission_routes())
        .merge(scoring_routes())
        .merge(health_routes())
        .merge(observability_routes())
        .fallback(handlers::route_not_found)
        .with_state(state)
}
