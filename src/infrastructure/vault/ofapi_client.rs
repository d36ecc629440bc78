//! OnlyFans API proxy vault client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::VaultConfig;
use crate::domain::{DomainError, VaultFile, VaultReceipt, VaultUploader};

const PROVIDER: &str = "ofapi";
const MAX_ERROR_DETAIL_CHARS: usize = 200;

/// Uploads files to `{base_url}/api/{account}/media/vault`
#[derive(Clone)]
pub struct OfApiVaultClient {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for OfApiVaultClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OfApiVaultClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[hidden]"))
            .finish()
    }
}

impl OfApiVaultClient {
    pub fn new(config: &VaultConfig) -> Result<Self, DomainError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|key| !key.trim().is_empty()),
        })
    }

    fn vault_url(&self, account: &str) -> String {
        format!("{}/api/{}/media/vault", self.base_url, account)
    }
}

#[async_trait]
impl VaultUploader for OfApiVaultClient {
    async fn upload(&self, account: &str, file: VaultFile) -> Result<VaultReceipt, DomainError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| DomainError::configuration("API key not configured"))?;

        let content_type = file.resolved_content_type();
        let size = file.size();

        let part = Part::stream_with_length(Body::from(file.bytes), size as u64)
            .file_name(file.file_name.clone())
            .mime_str(&content_type)
            .map_err(|e| {
                DomainError::validation(format!("Invalid content type '{}': {}", content_type, e))
            })?;

        let form = Form::new().part("file", part);

        let response = self
            .http_client
            .post(self.vault_url(account))
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    "Request timed out".to_string()
                } else if e.is_connect() {
                    "Connection failed".to_string()
                } else {
                    format!("Request failed: {}", e)
                };
                DomainError::provider(PROVIDER, message)
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail: String = body.chars().take(MAX_ERROR_DETAIL_CHARS).collect();

            warn!(
                account = %account,
                status = status.as_u16(),
                detail = %detail,
                "Vault upload rejected upstream"
            );

            return Err(DomainError::upstream(
                status.as_u16(),
                format!("Upload failed ({})", status.as_u16()),
                Some(detail).filter(|d| !d.is_empty()),
            ));
        }

        let body = response.json::<Value>().await.unwrap_or_else(|e| {
            warn!(error = %e, "Vault upload response was not JSON");
            Value::Null
        });

        let vault_id = extract_vault_id(&body);

        info!(
            account = %account,
            file_name = %file.file_name,
            size = size,
            vault_id = vault_id.as_deref().unwrap_or("-"),
            "Uploaded file to vault"
        );

        Ok(VaultReceipt { vault_id })
    }
}

/// `data.id`, else top-level `id`; string or numeric
fn extract_vault_id(body: &Value) -> Option<String> {
    let id = body
        .pointer("/data/id")
        .filter(|v| !v.is_null())
        .or_else(|| body.get("id"))?;

    match id {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
