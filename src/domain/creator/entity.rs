//! Creator entity

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Maximum length for creator IDs
pub const MAX_CREATOR_ID_LENGTH: usize = 128;

static CREATOR_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Name shown when a creator has neither a display name nor a username
pub const UNKNOWN_CREATOR_NAME: &str = "Unknown";

/// Creator identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CreatorId(String);

impl CreatorId {
    /// Create a new creator ID with validation
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();

        if id.is_empty() {
            return Err(DomainError::invalid_id("Creator ID cannot be empty"));
        }

        if id.len() > MAX_CREATOR_ID_LENGTH {
            return Err(DomainError::invalid_id(format!(
                "Creator ID cannot exceed {} characters",
                MAX_CREATOR_ID_LENGTH
            )));
        }

        if !CREATOR_ID_PATTERN.is_match(&id) {
            return Err(DomainError::invalid_id(
                "Creator ID can only contain alphanumeric characters, hyphens, and underscores",
            ));
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CreatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CreatorId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CreatorId> for String {
    fn from(id: CreatorId) -> Self {
        id.0
    }
}

/// A creator account managed by the agency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    id: CreatorId,
    name: Option<String>,
    of_username: Option<String>,
    ofapi_account_id: Option<String>,
}

impl Creator {
    pub fn new(id: CreatorId) -> Self {
        Self {
            id,
            name: None,
            of_username: None,
            ofapi_account_id: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = non_blank(name.into());
        self
    }

    pub fn with_of_username(mut self, username: impl Into<String>) -> Self {
        self.of_username = non_blank(username.into());
        self
    }

    pub fn with_ofapi_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.ofapi_account_id = non_blank(account_id.into());
        self
    }

    pub fn id(&self) -> &CreatorId {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn of_username(&self) -> Option<&str> {
        self.of_username.as_deref()
    }

    pub fn ofapi_account_id(&self) -> Option<&str> {
        self.ofapi_account_id.as_deref()
    }

    /// Name for display: the creator name, then the OnlyFans username
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.of_username.as_deref())
            .unwrap_or(UNKNOWN_CREATOR_NAME)
    }

    /// External account the vault upload goes to, if linked
    pub fn upload_account(&self) -> Option<&str> {
        self.ofapi_account_id.as_deref()
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
