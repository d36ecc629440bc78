//! PostgreSQL creator repository
//!
//! Reads the dashboard's `"Creator"` table, whose columns keep the camelCase
//! names of the dashboard schema.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::warn;

use crate::domain::{Creator, CreatorId, CreatorRepository, DomainError};

/// PostgreSQL implementation of CreatorRepository
#[derive(Debug, Clone)]
pub struct PostgresCreatorRepository {
    pool: PgPool,
}

impl PostgresCreatorRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool to `database_url`
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl CreatorRepository for PostgresCreatorRepository {
    async fn find_by_id(&self, id: &CreatorId) -> Result<Option<Creator>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, "ofUsername", "ofapiCreatorId"
            FROM "Creator"
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get creator: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_creator(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Creator>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, "ofUsername", "ofapiCreatorId"
            FROM "Creator"
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list creators: {}", e)))?;

        let mut creators = Vec::with_capacity(rows.len());

        for row in &rows {
            match row_to_creator(row) {
                Ok(creator) => creators.push(creator),
                Err(e) => warn!(error = %e, "Skipping creator row"),
            }
        }

        Ok(creators)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "Creator""#)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count creators: {}", e)))?;

        Ok(count.max(0) as u64)
    }
}

fn row_to_creator(row: &PgRow) -> Result<Creator, DomainError> {
    let id: String = column(row, "id")?;
    let name: Option<String> = column(row, "name")?;
    let of_username: Option<String> = column(row, "ofUsername")?;
    let ofapi_account_id: Option<String> = column(row, "ofapiCreatorId")?;

    let mut creator = Creator::new(CreatorId::new(id)?);

    if let Some(name) = name {
        creator = creator.with_name(name);
    }

    if let Some(username) = of_username {
        creator = creator.with_of_username(username);
    }

    if let Some(account) = ofapi_account_id {
        creator = creator.with_ofapi_account_id(account);
    }

    Ok(creator)
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::storage(format!("Failed to read column '{}': {}", name, e)))
}
