//! In-memory creator repository

use crate::domain::{Creator, CreatorId, CreatorRepository, DomainError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory implementation of CreatorRepository
pub struct InMemoryCreatorRepository {
    creators: RwLock<HashMap<String, Creator>>,
}

impl InMemoryCreatorRepository {
    /// Creates a new empty repository
    pub fn new() -> Self {
        Self {
            creators: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a repository holding the given creators, later IDs win
    pub fn with_creators(creators: impl IntoIterator<Item = Creator>) -> Self {
        let creators = creators
            .into_iter()
            .map(|c| (c.id().as_str().to_string(), c))
            .collect();

        Self {
            creators: RwLock::new(creators),
        }
    }
}

impl Default for InMemoryCreatorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CreatorRepository for InMemoryCreatorRepository {
    async fn find_by_id(&self, id: &CreatorId) -> Result<Option<Creator>, DomainError> {
        let creators = self
            .creators
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        Ok(creators.get(id.as_str()).cloned())
    }

    async fn list(&self) -> Result<Vec<Creator>, DomainError> {
        let creators = self
            .creators
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        let mut result: Vec<_> = creators.values().cloned().collect();
        result.sort_by(|a, b| a.id().as_str().cmp(b.id().as_str()));
        Ok(result)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let creators = self
            .creators
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        Ok(creators.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creator(id: &str) -> Creator {
        Creator::new(CreatorId::new(id).unwrap())
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = InMemoryCreatorRepository::with_creators(vec![
            creator("creator_1").with_name("One"),
            creator("creator_2"),
        ]);

        let found = repo
            .find_by_id(&CreatorId::new("creator_1").unwrap())
            .await
            .unwrap();
        assert_eq!(found.unwrap().display_name(), "One");

        let missing = repo
            .find_by_id(&CreatorId::new("creator_9").unwrap())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_is_sorted() {
        let repo = InMemoryCreatorRepository::with_creators(vec![
            creator("b"),
            creator("c"),
            creator("a"),
        ]);

        let ids: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .map(|c| c.id().to_string())
            .collect();

        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_empty_repository() {
        let repo = InMemoryCreatorRepository::default();

        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.list().await.unwrap().is_empty());
    }
}
