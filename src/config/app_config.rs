use std::env;
use std::fmt::Debug;

use serde::Deserialize;

use crate::domain::DEFAULT_TTL_MINUTES;
use crate::infrastructure::observability::ObservabilityConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub upload_link: UploadLinkConfig,
    #[serde(default)]
    pub vault: VaultConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    /// Creators served by the in-memory store
    #[serde(default)]
    pub creators: Vec<CreatorSeed>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Upload link issuance and acceptance
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct UploadLinkConfig {
    /// HMAC secret shared by every instance that issues or verifies links
    pub secret: Option<String>,
    pub default_ttl_minutes: i64,
    /// Base URL of the public upload page, e.g. `https://dashboard.example.com`
    pub public_base_url: String,
    pub max_upload_bytes: usize,
    /// Key guarding the admin endpoints; admin routes reject everything when unset
    pub admin_api_key: Option<String>,
}

/// OnlyFans API proxy used as the vault backend
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

/// Creator record loaded into the in-memory store
#[derive(Debug, Clone, Deserialize)]
pub struct CreatorSeed {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_username: Option<String>,
    #[serde(default)]
    pub ofapi_account_id: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for UploadLinkConfig {
    fn default() -> Self {
        Self {
            secret: None,
            default_ttl_minutes: DEFAULT_TTL_MINUTES,
            public_base_url: "http://localhost:8080".to_string(),
            max_upload_bytes: 512 * 1024 * 1024,
            admin_api_key: None,
        }
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            base_url: "https://app.onlyfansapi.com".to_string(),
            api_key: None,
            timeout_secs: 120,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_url: None,
            max_connections: 5,
        }
    }
}

impl Debug for UploadLinkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadLinkConfig")
            .field("secret", &self.secret.as_ref().map(|_| "[hidden]"))
            .field("default_ttl_minutes", &self.default_ttl_minutes)
            .field("public_base_url", &self.public_base_url)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("admin_api_key", &self.admin_api_key.as_ref().map(|_| "[hidden]"))
            .finish()
    }
}

impl Debug for VaultConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[hidden]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AppConfig {
    /// Load from `config/default`, `config/local`, `APP__*` variables and
    /// the well-known deployment variables
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("upload_link.secret", env::var("UPLOAD_LINK_SECRET").ok())?
            .set_override_option(
                "upload_link.admin_api_key",
                env::var("UPLOAD_ADMIN_API_KEY").ok(),
            )?
            .set_override_option("vault.api_key", env::var("OFAPI_API_KEY").ok())?
            .set_override_option("storage.database_url", env::var("DATABASE_URL").ok())?;

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    fn from_toml(toml: &str) -> AppConfig {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = from_toml("");

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert!(config.upload_link.secret.is_none());
        assert_eq!(config.upload_link.default_ttl_minutes, 30);
        assert_eq!(config.vault.base_url, "https://app.onlyfansapi.com");
        assert_eq!(config.vault.timeout_secs, 120);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.creators.is_empty());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = from_toml(
            r#"
            [server]
            port = 9090

            [upload_link]
            secret = "s3cret"
            public_base_url = "https://dash.example.com"

            [logging]
            format = "json"
            "#,
        );

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.upload_link.secret.as_deref(), Some("s3cret"));
        assert_eq!(config.upload_link.default_ttl_minutes, 30);
        assert_eq!(config.upload_link.public_base_url, "https://dash.example.com");
        assert!(matches!(config.logging.format, LogFormat::Json));
    }

    #[test]
    fn test_creator_seeds() {
        let config = from_toml(
            r#"
            [storage]
            backend = "memory"

            [[creators]]
            id = "creator_123"
            name = "Jane"
            ofapi_account_id = "acct_abc"

            [[creators]]
            id = "creator_456"
            "#,
        );

        assert_eq!(config.creators.len(), 2);
        assert_eq!(config.creators[0].ofapi_account_id.as_deref(), Some("acct_abc"));
        assert!(config.creators[1].name.is_none());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = from_toml(
            r#"
            [upload_link]
            secret = "upload-secret-value"
            admin_api_key = "admin-key-value"

            [vault]
            api_key = "vault-key-value"
            "#,
        );

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("upload-secret-value"));
        assert!(!rendered.contains("admin-key-value"));
        assert!(!rendered.contains("vault-key-value"));
    }
}
