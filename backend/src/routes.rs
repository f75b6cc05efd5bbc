use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{download_handler, generate_handler, index_handler};
use crate::models::SharedState;

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/generate", post(generate_handler))
        .route("/download", get(download_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
