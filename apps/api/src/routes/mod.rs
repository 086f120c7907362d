pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::extraction::handlers::handle_parse_document;
use crate::improve::handlers::{handle_catalog, handle_improve};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/catalog", get(handle_catalog))
        .route(
            "/api/v1/documents/parse",
            post(handle_parse_document).layer(upload_limit),
        )
        .route("/api/v1/resumes/improve", post(handle_improve))
        .with_state(state)
}
