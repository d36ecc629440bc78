//! Admin authentication
//!
//! The admin API is guarded by one shared key, sent either as
//! `Authorization: Bearer <key>` or as `X-API-Key: <key>`.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;

/// Shared secret for the admin API
#[derive(Clone)]
pub struct AdminApiKey(String);

impl AdminApiKey {
    /// Blank keys are treated as absent
    pub fn from_config(value: Option<&str>) -> Option<Self> {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| Self(v.to_string()))
    }

    pub fn matches(&self, candidate: &str) -> bool {
        let expected = self.0.as_bytes();
        let candidate = candidate.as_bytes();

        // ct_eq on slices returns false for unequal lengths
        expected.ct_eq(candidate).into()
    }
}

impl std::fmt::Debug for AdminApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminApiKey([hidden])")
    }
}

/// Extractor that requires the admin API key
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.admin_api_key.as_ref() else {
            warn!("Admin request refused: no admin API key configured");
            return Err(ApiError::unauthorized("Admin API is disabled"));
        };

        let provided = extract_api_key_from_headers(&parts.headers)?
            .ok_or_else(|| ApiError::unauthorized("Missing admin API key"))?;

        if !expected.matches(&provided) {
            debug!("Admin request with wrong key");
            return Err(ApiError::unauthorized("Invalid admin API key"));
        }

        Ok(RequireAdmin)
    }
}

/// Key from `Authorization: Bearer` first, then `X-API-Key`
pub fn extract_api_key_from_headers(headers: &HeaderMap) -> Result<Option<String>, ApiError> {
    if let Some(value) = headers.get("authorization") {
        let value = value
            .to_str()
            .map_err(|_| ApiError::unauthorized("Invalid Authorization header encoding"))?;

        if let Some(key) = value.strip_prefix("Bearer ") {
            return Ok(Some(key.trim().to_string()));
        }
    }

    if let Some(value) = headers.get("x-api-key") {
        let value = value
            .to_str()
            .map_err(|_| ApiError::unauthorized("Invalid X-API-Key header encoding"))?;

        return Ok(Some(value.trim().to_string()));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_from_config_ignores_blank() {
        assert!(AdminApiKey::from_config(None).is_none());
        assert!(AdminApiKey::from_config(Some("   ")).is_none());
        assert!(AdminApiKey::from_config(Some("k")).is_some());
    }

    #[test]
    fn test_matches() {
        let key = AdminApiKey::from_config(Some("admin-key")).unwrap();

        assert!(key.matches("admin-key"));
        assert!(!key.matches("admin-kez"));
        assert!(!key.matches("admin-key-longer"));
        assert!(!key.matches(""));
    }

    #[test]
    fn test_debug_hides_key() {
        let key = AdminApiKey::from_config(Some("admin-key")).unwrap();
        assert!(!format!("{:?}", key).contains("admin-key"));
    }

    #[test]
    fn test_extract_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc"));

        assert_eq!(
            extract_api_key_from_headers(&headers).unwrap().as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn test_extract_x_api_key() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_static("xyz"));

        assert_eq!(
            extract_api_key_from_headers(&headers).unwrap().as_deref(),
            Some("xyz")
        );
    }

    #[test]
    fn test_non_bearer_authorization_falls_through() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic Zm9v"));
        headers.insert("x-api-key", HeaderValue::from_static("xyz"));

        assert_eq!(
            extract_api_key_from_headers(&headers).unwrap().as_deref(),
            Some("xyz")
        );
    }

    #[test]
    fn test_extract_none() {
        assert!(extract_api_key_from_headers(&HeaderMap::new())
            .unwrap()
            .is_none());
    }
}
