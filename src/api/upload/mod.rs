//! Public upload link endpoints
//!
//! The token in the query string is the only credential on these routes.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiErrorType};
use crate::domain::{DomainError, VaultFile};

const FILE_FIELD: &str = "file";
const FALLBACK_FILE_NAME: &str = "upload";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenQuery {
    #[serde(default)]
    pub token: Option<String>,
}

impl TokenQuery {
    fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Body read by the upload page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LinkStatusResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LinkStatusResponse {
    fn invalid(status: StatusCode, error: &str) -> Response {
        let body = Self {
            valid: false,
            creator_name: None,
            expires_at: None,
            error: Some(error.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub file_name: String,
    pub file_size: usize,
    pub vault_id: Option<String>,
}

/// GET /api/vault-upload?token=
pub async fn check_link(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
) -> Response {
    let Some(token) = query.token() else {
        return LinkStatusResponse::invalid(StatusCode::BAD_REQUEST, "Missing token");
    };

    match state.upload_link_service.inspect(token).await {
        Ok(status) => Json(LinkStatusResponse {
            valid: true,
            creator_name: Some(status.creator_name),
            expires_at: Some(status.expires_at),
            error: None,
        })
        .into_response(),
        Err(DomainError::Unauthorized { .. }) => {
            LinkStatusResponse::invalid(StatusCode::UNAUTHORIZED, "Invalid or expired link")
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// POST /api/vault-upload?token=
///
/// The token is checked before any of the body is read.
pub async fn upload_file(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let token = query
        .token()
        .ok_or_else(|| ApiError::bad_request("Missing token").with_param("token"))?;

    let grant = state.upload_link_service.authorize(token)?;

    let mut multipart = multipart
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let file = read_file_field(&mut multipart)
        .await?
        .ok_or_else(|| ApiError::bad_request("No file provided").with_param(FILE_FIELD))?;

    debug!(
        creator_id = %grant.creator_id,
        file_name = %file.file_name,
        size = file.size(),
        "Received file on upload link"
    );

    let completed = state.upload_link_service.upload(&grant, file).await?;

    Ok(Json(UploadResponse {
        success: true,
        file_name: completed.file_name,
        file_size: completed.file_size,
        vault_id: completed.vault_id,
    }))
}

async fn read_file_field(multipart: &mut Multipart) -> Result<Option<VaultFile>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_FILE_NAME)
            .to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        return Ok(Some(VaultFile::new(file_name, content_type, bytes)));
    }

    Ok(None)
}

fn multipart_error(err: MultipartError) -> ApiError {
    let status = err.status();
    let message = err.body_text();

    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::new(status, ApiErrorType::InvalidRequestError, message)
    } else {
        ApiError::bad_request(message)
    }
}
