//! Admin API endpoints for the agency dashboard

pub mod creators;
pub mod upload_links;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create admin API router
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/upload-links", post(upload_links::issue_upload_link))
        .route("/creators", get(creators::list_creators))
}
