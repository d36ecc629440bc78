//! Upload link issuance

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, ValidatedJson};
use crate::infrastructure::upload_link::IssuedUploadLink;

/// One week
pub const MAX_TTL_MINUTES: i64 = 7 * 24 * 60;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IssueUploadLinkRequest {
    #[validate(length(min = 1, max = 128))]
    pub creator_id: String,
    #[validate(range(min = 1, max = MAX_TTL_MINUTES))]
    #[serde(default)]
    pub ttl_minutes: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadLinkResponse {
    pub token: String,
    pub url: String,
    pub expires_at: i64,
    pub creator_id: String,
    pub creator_name: String,
}

impl From<IssuedUploadLink> for UploadLinkResponse {
    fn from(link: IssuedUploadLink) -> Self {
        Self {
            token: link.token,
            url: link.url,
            expires_at: link.expires_at,
            creator_id: link.creator_id,
            creator_name: link.creator_name,
        }
    }
}

/// POST /admin/upload-links
pub async fn issue_upload_link(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    ValidatedJson(request): ValidatedJson<IssueUploadLinkRequest>,
) -> Result<(StatusCode, Json<UploadLinkResponse>), ApiError> {
    debug!(
        creator_id = %request.creator_id,
        ttl_minutes = ?request.ttl_minutes,
        "Admin issuing upload link"
    );

    let link = state
        .upload_link_service
        .issue(&request.creator_id, request.ttl_minutes)
        .await?;

    Ok((StatusCode::CREATED, Json(UploadLinkResponse::from(link))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(ttl_minutes: Option<i64>) -> IssueUploadLinkRequest {
        IssueUploadLinkRequest {
            creator_id: "creator_123".to_string(),
            ttl_minutes,
        }
    }

    #[test]
    fn test_ttl_bounds() {
        assert!(request(None).validate().is_ok());
        assert!(request(Some(1)).validate().is_ok());
        assert!(request(Some(MAX_TTL_MINUTES)).validate().is_ok());
        assert!(request(Some(0)).validate().is_err());
        assert!(request(Some(-5)).validate().is_err());
        assert!(request(Some(MAX_TTL_MINUTES + 1)).validate().is_err());
    }

    #[test]
    fn test_empty_creator_id_is_invalid() {
        let request = IssueUploadLinkRequest {
            creator_id: String::new(),
            ttl_minutes: None,
        };

        assert!(request.validate().is_err());
    }
}
