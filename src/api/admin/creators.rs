//! Creator listing for the admin API

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::Creator;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatorResponse {
    pub id: String,
    pub display_name: String,
    pub of_username: Option<String>,
    /// Links can only be issued when this is true
    pub has_upload_account: bool,
}

impl From<&Creator> for CreatorResponse {
    fn from(creator: &Creator) -> Self {
        Self {
            id: creator.id().as_str().to_string(),
            display_name: creator.display_name().to_string(),
            of_username: creator.of_username().map(String::from),
            has_upload_account: creator.upload_account().is_some(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCreatorsResponse {
    pub creators: Vec<CreatorResponse>,
    pub total: usize,
}

/// GET /admin/creators
pub async fn list_creators(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<ListCreatorsResponse>, ApiError> {
    debug!("Admin listing creators");

    let creators = state.creator_repository.list().await?;
    let creators: Vec<CreatorResponse> = creators.iter().map(CreatorResponse::from).collect();
    let total = creators.len();

    Ok(Json(ListCreatorsResponse { creators, total }))
}
