//! Router construction.

use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use tracing::{info, instrument};

/// Builds the HTTP router with request logging.
#[instrument(skip(state))]
pub fn router(state: AppState) -> Router {
    info!("Building router");
    Router::new()
        .route("/guess-word", post(handlers::guess_word))
        .route("/guess-word/structured", post(handlers::guess_word_structured))
        .route("/validate-word", post(handlers::validate_word))
        .route("/get-hint", post(handlers::get_hint))
        .route("/health", get(handlers::health))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    info!(method = %method, uri = %uri, "Incoming HTTP request");

    let response = next.run(req).await;
    info!(status = %response.status(), method = %method, uri = %uri, "Response sent");
    response
}
