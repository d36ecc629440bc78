use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Upstream error ({status}): {message}")]
    Upstream {
        status: u16,
        message: String,
        detail: Option<String>,
    },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn upstream(status: u16, message: impl Into<String>, detail: Option<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
            detail,
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Creator 'creator_123' not found");
        assert_eq!(
            error.to_string(),
            "Not found: Creator 'creator_123' not found"
        );
    }

    #[test]
    fn test_unauthorized_error() {
        let error = DomainError::unauthorized("Invalid or expired upload link");
        assert_eq!(
            error.to_string(),
            "Unauthorized: Invalid or expired upload link"
        );
    }

    #[test]
    fn test_upstream_error_keeps_status() {
        let error = DomainError::upstream(413, "Upload failed (413)", Some("too big".into()));
        assert_eq!(error.to_string(), "Upstream error (413): Upload failed (413)");

        match error {
            DomainError::Upstream { status, detail, .. } => {
                assert_eq!(status, 413);
                assert_eq!(detail.as_deref(), Some("too big"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
