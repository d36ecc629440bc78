//! Upload link service: issue links, check them, accept uploads on them

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::{
    CreatorId, CreatorRepository, DomainError, TokenVerification, UploadTokenCodec,
    UploadTokenPayload, VaultFile, VaultUploader, DEFAULT_TTL_MINUTES,
};
use crate::domain::creator::UNKNOWN_CREATOR_NAME;
use crate::infrastructure::observability::{record_upload_token, record_vault_upload, TokenOutcome};

#[cfg(test)]
use mockall::automock;

/// Message for every rejected link, whatever the cause
pub const INVALID_LINK_MESSAGE: &str = "Invalid or expired upload link";

/// A link handed to an external party
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedUploadLink {
    pub token: String,
    pub url: String,
    pub expires_at: i64,
    pub creator_id: String,
    pub creator_name: String,
}

/// What the upload page shows for a valid link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadLinkStatus {
    pub creator_name: String,
    pub expires_at: i64,
}

/// Outcome of a file accepted on a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedUpload {
    pub file_name: String,
    pub file_size: usize,
    pub vault_id: Option<String>,
}

/// Settings for link issuance
#[derive(Debug, Clone)]
pub struct UploadLinkSettings {
    pub public_base_url: String,
    pub default_ttl_minutes: i64,
}

impl Default for UploadLinkSettings {
    fn default() -> Self {
        Self {
            public_base_url: "http://localhost:8080".to_string(),
            default_ttl_minutes: DEFAULT_TTL_MINUTES,
        }
    }
}

/// Trait for upload link operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UploadLinkServiceTrait: Send + Sync {
    /// Issues a link for a creator; `None` uses the configured lifetime
    async fn issue(
        &self,
        creator_id: &str,
        ttl_minutes: Option<i64>,
    ) -> Result<IssuedUploadLink, DomainError>;

    /// Verifies a token, mapping every rejection to one unauthorized error
    fn authorize(&self, token: &str) -> Result<UploadTokenPayload, DomainError>;

    /// Verifies a token and resolves the creator name for display
    async fn inspect(&self, token: &str) -> Result<UploadLinkStatus, DomainError>;

    /// Forwards a file to the vault of an authorized link
    async fn upload(
        &self,
        grant: &UploadTokenPayload,
        file: VaultFile,
    ) -> Result<CompletedUpload, DomainError>;
}

/// Upload link service implementation
pub struct UploadLinkService {
    codec: Arc<UploadTokenCodec>,
    creators: Arc<dyn CreatorRepository>,
    vault: Arc<dyn VaultUploader>,
    settings: UploadLinkSettings,
}

impl UploadLinkService {
    pub fn new(
        codec: Arc<UploadTokenCodec>,
        creators: Arc<dyn CreatorRepository>,
        vault: Arc<dyn VaultUploader>,
        settings: UploadLinkSettings,
    ) -> Self {
        Self {
            codec,
            creators,
            vault,
            settings,
        }
    }

    fn link_url(&self, token: &str) -> String {
        format!(
            "{}/upload?token={}",
            self.settings.public_base_url.trim_end_matches('/'),
            token
        )
    }
}

#[async_trait]
impl UploadLinkServiceTrait for UploadLinkService {
    async fn issue(
        &self,
        creator_id: &str,
        ttl_minutes: Option<i64>,
    ) -> Result<IssuedUploadLink, DomainError> {
        let ttl_minutes = ttl_minutes.unwrap_or(self.settings.default_ttl_minutes);

        if ttl_minutes <= 0 {
            return Err(DomainError::validation("ttl_minutes must be positive"));
        }

        let id = CreatorId::new(creator_id)?;
        let creator = self
            .creators
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Creator '{}' not found", id)))?;

        let account = creator.upload_account().ok_or_else(|| {
            DomainError::validation(format!(
                "Creator '{}' has no linked OnlyFans account",
                id
            ))
        })?;

        let issued = self.codec.issue(id.as_str(), account, ttl_minutes)?;
        record_upload_token(TokenOutcome::Issued);

        info!(
            creator_id = %id,
            ttl_seconds = issued.payload.ttl_seconds(),
            expires_at = issued.payload.exp,
            "Issued upload link"
        );

        Ok(IssuedUploadLink {
            url: self.link_url(&issued.token),
            expires_at: issued.payload.exp,
            token: issued.token,
            creator_id: id.to_string(),
            creator_name: creator.display_name().to_string(),
        })
    }

    fn authorize(&self, token: &str) -> Result<UploadTokenPayload, DomainError> {
        match self.codec.verify(token) {
            TokenVerification::Valid(payload) => {
                record_upload_token(TokenOutcome::Accepted);
                Ok(payload)
            }
            TokenVerification::Rejected => {
                record_upload_token(TokenOutcome::Rejected);
                warn!("Rejected upload link");
                Err(DomainError::unauthorized(INVALID_LINK_MESSAGE))
            }
        }
    }

    async fn inspect(&self, token: &str) -> Result<UploadLinkStatus, DomainError> {
        let payload = self.authorize(token)?;

        let creator = match CreatorId::new(payload.creator_id.as_str()) {
            Ok(id) => self.creators.find_by_id(&id).await?,
            Err(_) => None,
        };

        Ok(UploadLinkStatus {
            creator_name: creator
                .as_ref()
                .map(|c| c.display_name())
                .unwrap_or(UNKNOWN_CREATOR_NAME)
                .to_string(),
            expires_at: payload.exp,
        })
    }

    async fn upload(
        &self,
        grant: &UploadTokenPayload,
        file: VaultFile,
    ) -> Result<CompletedUpload, DomainError> {
        if file.is_empty() {
            return Err(DomainError::validation("Uploaded file is empty"));
        }

        let file_name = file.file_name.clone();
        let file_size = file.size();
        let start = Instant::now();

        let result = self.vault.upload(&grant.account, file).await;
        record_vault_upload(result.is_ok(), file_size as u64, start.elapsed());

        let receipt = result.inspect_err(|e| {
            warn!(
                creator_id = %grant.creator_id,
                file_name = %file_name,
                error = %e,
                "Vault upload failed"
            );
        })?;

        info!(
            creator_id = %grant.creator_id,
            file_name = %file_name,
            file_size = file_size,
            "Accepted upload on link"
        );

        Ok(CompletedUpload {
            file_name,
            file_size,
            vault_id: receipt.vault_id,
        })
    }
}
