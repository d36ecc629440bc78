//! Vault upload gateway
//!
//! Issues time-limited, HMAC-signed upload links for creators and accepts
//! files on them, forwarding each file to the creator's OnlyFans vault.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;

use crate::api::middleware::AdminApiKey;
use crate::api::state::AppState;
use crate::config::{CreatorSeed, StorageBackend};
use crate::domain::{
    Creator, CreatorId, CreatorRepository, DomainError, UploadTokenCodec, UploadTokenSecret,
};
use crate::infrastructure::{
    creator::{InMemoryCreatorRepository, PostgresCreatorRepository},
    upload_link::{UploadLinkService, UploadLinkSettings},
    vault::OfApiVaultClient,
};
use tracing::{info, warn};

/// Build the token codec; fails when no secret is configured
pub fn build_token_codec(config: &AppConfig) -> Result<UploadTokenCodec, DomainError> {
    let secret = UploadTokenSecret::from_config(config.upload_link.secret.as_deref())?;
    Ok(UploadTokenCodec::new(secret))
}

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let codec = Arc::new(build_token_codec(config)?);
    let creators = create_creator_repository(config).await?;
    let vault = Arc::new(OfApiVaultClient::new(&config.vault)?);

    if config.vault.api_key.is_none() {
        warn!("OFAPI_API_KEY is not set; uploads will fail until it is configured");
    }

    let admin_api_key = AdminApiKey::from_config(config.upload_link.admin_api_key.as_deref());

    if admin_api_key.is_none() {
        warn!("UPLOAD_ADMIN_API_KEY is not set; admin API is disabled");
    }

    let service = UploadLinkService::new(
        codec,
        creators.clone(),
        vault,
        UploadLinkSettings {
            public_base_url: config.upload_link.public_base_url.clone(),
            default_ttl_minutes: config.upload_link.default_ttl_minutes,
        },
    );

    Ok(AppState::new(Arc::new(service), creators)
        .with_admin_api_key(admin_api_key)
        .with_max_upload_bytes(config.upload_link.max_upload_bytes))
}

async fn create_creator_repository(
    config: &AppConfig,
) -> anyhow::Result<Arc<dyn CreatorRepository>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            let creators = config
                .creators
                .iter()
                .map(seed_to_creator)
                .collect::<Result<Vec<_>, _>>()?;

            info!(count = creators.len(), "Using in-memory creator store");
            Ok(Arc::new(InMemoryCreatorRepository::with_creators(creators)))
        }
        StorageBackend::Postgres => {
            let url = config.storage.database_url.as_deref().ok_or_else(|| {
                DomainError::configuration("DATABASE_URL is required for the postgres backend")
            })?;

            let repository =
                PostgresCreatorRepository::connect(url, config.storage.max_connections).await?;

            info!("Using PostgreSQL creator store");
            Ok(Arc::new(repository))
        }
    }
}

fn seed_to_creator(seed: &CreatorSeed) -> Result<Creator, DomainError> {
    let mut creator = Creator::new(CreatorId::new(seed.id.as_str())?);

    if let Some(name) = &seed.name {
        creator = creator.with_name(name.as_str());
    }

    if let Some(username) = &seed.of_username {
        creator = creator.with_of_username(username.as_str());
    }

    if let Some(account) = &seed.ofapi_account_id {
        creator = creator.with_ofapi_account_id(account.as_str());
    }

    Ok(creator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret(secret: Option<&str>) -> AppConfig {
        let mut config = AppConfig::default();
        config.upload_link.secret = secret.map(str::to_string);
        config.creators = vec![CreatorSeed {
            id: "creator_123".to_string(),
            name: None,
            of_username: Some("jane_of".to_string()),
            ofapi_account_id: Some("acct_abc".to_string()),
        }];
        config
    }

    #[test]
    fn test_build_token_codec_requires_secret() {
        assert!(build_token_codec(&config_with_secret(None)).is_err());
        assert!(build_token_codec(&config_with_secret(Some(""))).is_err());
        assert!(build_token_codec(&config_with_secret(Some("s3cret"))).is_ok());
    }

    #[test]
    fn test_seed_to_creator() {
        let config = config_with_secret(None);
        let creator = seed_to_creator(&config.creators[0]).unwrap();

        assert_eq!(creator.display_name(), "jane_of");
        assert_eq!(creator.upload_account(), Some("acct_abc"));
    }

    #[test]
    fn test_seed_with_invalid_id() {
        let seed = CreatorSeed {
            id: "bad id".to_string(),
            name: None,
            of_username: None,
            ofapi_account_id: None,
        };

        assert!(seed_to_creator(&seed).is_err());
    }

    #[tokio::test]
    async fn test_create_app_state_in_memory() {
        let state = create_app_state(&config_with_secret(Some("s3cret")))
            .await
            .unwrap();

        assert_eq!(state.creator_repository.count().await.unwrap(), 1);
        assert!(state.admin_api_key.is_none());

        let link = state
            .upload_link_service
            .issue("creator_123", None)
            .await
            .unwrap();
        assert!(state.upload_link_service.authorize(&link.token).is_ok());
    }

    #[tokio::test]
    async fn test_create_app_state_without_secret_fails() {
        assert!(create_app_state(&config_with_secret(None)).await.is_err());
    }

    #[tokio::test]
    async fn test_postgres_backend_requires_url() {
        let mut config = config_with_secret(Some("s3cret"));
        config.storage.backend = StorageBackend::Postgres;
        config.storage.database_url = None;

        assert!(create_app_state(&config).await.is_err());
    }
}
