use crate::job::JobKey;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

/// Pending translation jobs, keyed by [`JobKey`].
///
/// `put` overwrites: submitting the same job twice keeps the last content.
/// `list` returns every stored key in one unpaginated snapshot, ordered by key.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn put(&self, key: &JobKey, content: &str) -> Result<(), StoreError>;

    /// Read back a stored file. Interaction handling never calls this; it is
    /// for operator tooling and tests.
    async fn get(&self, key: &JobKey) -> Result<Option<String>, StoreError>;

    async fn list(&self) -> Result<Vec<String>, StoreError>;
}

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `database_url` and ensure the
    /// schema exists.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Private in-memory database. Pinned to a single connection that never
    /// expires, since each SQLite memory connection is its own database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS translation_jobs (
                key TEXT PRIMARY KEY,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl JobStore for SqliteStore {
    async fn put(&self, key: &JobKey, content: &str) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO translation_jobs (key, content, created_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET content = excluded.content, created_at = excluded.created_at",
        )
        .bind(key.to_string())
        .bind(content)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, key: &JobKey) -> Result<Option<String>, StoreError> {
        let content = sqlx::query_scalar::<_, String>(
            "SELECT content FROM translation_jobs WHERE key = ?1",
        )
        .bind(key.to_string())
        .fetch_optional(&self.pool)
        .await?;
        Ok(content)
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let keys = sqlx::query_scalar::<_, String>("SELECT key FROM translation_jobs ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }
}
