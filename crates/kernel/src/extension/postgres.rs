//! PostgreSQL implementation of ExtensionStore.
//!
//! One row per resource in the `extension` table; the document is kept as
//! JSONB and the version is mirrored into its own column so optimistic
//! updates are a single conditional `UPDATE`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::types::Json;

use super::{ExtensionStore, document_version};

/// Direct database implementation of ExtensionStore.
#[derive(Clone)]
pub struct PgExtensionStore {
    pool: PgPool,
}

impl PgExtensionStore {
    /// Create a new store with a database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `extension` table if it doesn't exist.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS extension (
                kind TEXT NOT NULL,
                name TEXT NOT NULL,
                version BIGINT NOT NULL,
                data JSONB NOT NULL,
                PRIMARY KEY (kind, name)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("failed to create extension table")?;

        Ok(())
    }
}

#[async_trait]
impl ExtensionStore for PgExtensionStore {
    async fn load(&self, kind: &str, name: &str) -> Result<Option<Value>> {
        let row = sqlx::query_as::<_, (Json<Value>,)>(
            "SELECT data FROM extension WHERE kind = $1 AND name = $2",
        )
        .bind(kind)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch extension")?;

        Ok(row.map(|(Json(data),)| data))
    }

    async fn list(&self, kind: &str) -> Result<Vec<Value>> {
        let rows = sqlx::query_as::<_, (Json<Value>,)>(
            "SELECT data FROM extension WHERE kind = $1 ORDER BY name",
        )
        .bind(kind)
        .fetch_all(&self.pool)
        .await
        .context("failed to list extensions")?;

        Ok(rows.into_iter().map(|(Json(data),)| data).collect())
    }

    async fn insert(&self, kind: &str, name: &str, value: Value) -> Result<bool> {
        let version = document_version(&value).unwrap_or(1);
        let result = sqlx::query(
            r#"
            INSERT INTO extension (kind, name, version, data)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (kind, name) DO NOTHING
            "#,
        )
        .bind(kind)
        .bind(name)
        .bind(version)
        .bind(Json(&value))
        .execute(&self.pool)
        .await
        .context("failed to insert extension")?;

        Ok(result.rows_affected() > 0)
    }

    async fn replace(
        &self,
        kind: &str,
        name: &str,
        expected_version: i64,
        value: Value,
    ) -> Result<bool> {
        let version = document_version(&value).unwrap_or(expected_version + 1);
        let result = sqlx::query(
            r#"
            UPDATE extension
            SET data = $4, version = $5
            WHERE kind = $1 AND name = $2 AND version = $3
            "#,
        )
        .bind(kind)
        .bind(name)
        .bind(expected_version)
        .bind(Json(&value))
        .bind(version)
        .execute(&self.pool)
        .await
        .context("failed to update extension")?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, kind: &str, name: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM extension WHERE kind = $1 AND name = $2")
            .bind(kind)
            .bind(name)
            .execute(&self.pool)
            .await
            .context("failed to delete extension")?;

        Ok(result.rows_affected() > 0)
    }

    async fn healthy(&self) -> bool {
        crate::db::check_health(&self.pool).await
    }
}
