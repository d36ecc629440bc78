//! Vault upload contract
//!
//! Files received on an upload link are forwarded to the creator's media
//! vault on the OnlyFans API proxy.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::error::DomainError;

#[cfg(test)]
use mockall::automock;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// A file received from an upload link
#[derive(Debug, Clone)]
pub struct VaultFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl VaultFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Declared content type, else a guess from the file extension
    pub fn resolved_content_type(&self) -> String {
        match self.content_type.as_deref() {
            Some(declared) if !declared.trim().is_empty() => declared.to_string(),
            _ => mime_guess::from_path(&self.file_name)
                .first_raw()
                .unwrap_or(FALLBACK_CONTENT_TYPE)
                .to_string(),
        }
    }
}

/// Result of a vault upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultReceipt {
    pub vault_id: Option<String>,
}

/// Destination for files uploaded through signed links
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VaultUploader: Send + Sync {
    /// Uploads a file into the vault of the given external account
    async fn upload(&self, account: &str, file: VaultFile) -> Result<VaultReceipt, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content_type: Option<&str>) -> VaultFile {
        VaultFile::new(
            name,
            content_type.map(str::to_string),
            Bytes::from_static(b"data"),
        )
    }

    #[test]
    fn test_declared_content_type_wins() {
        assert_eq!(
            file("clip.bin", Some("video/mp4")).resolved_content_type(),
            "video/mp4"
        );
    }

    #[test]
    fn test_content_type_guessed_from_extension() {
        assert_eq!(file("photo.jpg", None).resolved_content_type(), "image/jpeg");
        assert_eq!(file("clip.mp4", Some("")).resolved_content_type(), "video/mp4");
    }

    #[test]
    fn test_unknown_extension_falls_back() {
        assert_eq!(
            file("mystery", None).resolved_content_type(),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_size_and_empty() {
        let f = file("a.txt", None);
        assert_eq!(f.size(), 4);
        assert!(!f.is_empty());

        let empty = VaultFile::new("a.txt", None, Bytes::new());
        assert!(empty.is_empty());
    }
}
