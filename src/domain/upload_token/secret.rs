use std::fmt::Debug;

use crate::domain::DomainError;

/// Shared HMAC key for upload tokens
#[derive(Clone)]
pub struct UploadTokenSecret(Vec<u8>);

impl UploadTokenSecret {
    /// Wrap a configured secret, rejecting empty values
    pub fn new(secret: impl Into<String>) -> Result<Self, DomainError> {
        let secret = secret.into();

        if secret.trim().is_empty() {
            return Err(DomainError::configuration("UPLOAD_LINK_SECRET is not set"));
        }

        Ok(Self(secret.into_bytes()))
    }

    /// Build from an optional configuration value
    pub fn from_config(secret: Option<&str>) -> Result<Self, DomainError> {
        match secret {
            Some(secret) => Self::new(secret),
            None => Err(DomainError::configuration("UPLOAD_LINK_SECRET is not set")),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for UploadTokenSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("UploadTokenSecret([hidden])")
    }
}
