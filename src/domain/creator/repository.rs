//! Creator repository trait

use super::{Creator, CreatorId};
use crate::domain::error::DomainError;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// Read access to the creator records upload links are scoped to
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CreatorRepository: Send + Sync {
    /// Finds a creator by ID
    async fn find_by_id(&self, id: &CreatorId) -> Result<Option<Creator>, DomainError>;

    /// Lists all creators
    async fn list(&self) -> Result<Vec<Creator>, DomainError>;

    /// Counts creators, used by readiness probes
    async fn count(&self) -> Result<u64, DomainError>;
}
