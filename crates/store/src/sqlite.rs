//! SQLite backend for profiles and chat history.
//!
//! A single database file holds two tables:
//! - `user_profiles` — one row per (user, attribute key), upserted in place
//! - `chat_log` — append-only (question, answer) pairs per user
//!
//! The schema is created on startup; pass `"sqlite::memory:"` for an
//! ephemeral database in tests.

use async_trait::async_trait;
use chrono::Utc;
use mentora_core::error::StorageError;
use mentora_core::history::{HistoryStore, TurnRecord};
use mentora_core::profile::{Profile, ProfileStore};
use mentora_core::turn::UserId;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

/// Production store backed by SQLite in WAL mode.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) a database at the given path and run
    /// schema migrations.
    pub async fn new(path: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(path)
            .map_err(|e| StorageError::Backend(format!("Invalid SQLite path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Backend(format!("Failed to open SQLite: {e}")))?;

        let store = Self { pool };
        store.run_migrations().await?;
        info!("SQLite store initialized at {path}");
        Ok(store)
    }

    /// Create from an existing pool (useful for testing).
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StorageError> {
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_profiles (
                user_id    TEXT NOT NULL,
                attr_key   TEXT NOT NULL,
                attr_value TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (user_id, attr_key)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::MigrationFailed(format!("user_profiles table: {e}")))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chat_log (
                id         INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id    TEXT NOT NULL,
                question   TEXT NOT NULL,
                answer     TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::MigrationFailed(format!("chat_log table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_chat_log_user ON chat_log(user_id, id DESC)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::MigrationFailed(format!("chat_log index: {e}")))?;

        debug!("SQLite migrations complete");
        Ok(())
    }

    fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<TurnRecord, StorageError> {
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| StorageError::QueryFailed(format!("user_id column: {e}")))?;
        let question: String = row
            .try_get("question")
            .map_err(|e| StorageError::QueryFailed(format!("question column: {e}")))?;
        let answer: String = row
            .try_get("answer")
            .map_err(|e| StorageError::QueryFailed(format!("answer column: {e}")))?;
        let created_at_str: String = row
            .try_get("created_at")
            .map_err(|e| StorageError::QueryFailed(format!("created_at column: {e}")))?;

        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(TurnRecord {
            user_id: UserId::new(user_id),
            question,
            answer,
            created_at,
        })
    }
}

#[async_trait]
impl ProfileStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn get(&self, user_id: &UserId) -> Result<Profile, StorageError> {
        let rows = sqlx::query(
            "SELECT attr_key, attr_value FROM user_profiles WHERE user_id = ?1",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::QueryFailed(format!("profile SELECT: {e}")))?;

        let mut profile = Profile::new();
        for row in &rows {
            let key: String = row
                .try_get("attr_key")
                .map_err(|e| StorageError::QueryFailed(format!("attr_key column: {e}")))?;
            let value: String = row
                .try_get("attr_value")
                .map_err(|e| StorageError::QueryFailed(format!("attr_value column: {e}")))?;
            profile.set(&key, &value);
        }
        Ok(profile)
    }

    async fn set(&self, user_id: &UserId, key: &str, value: &str) -> Result<(), StorageError> {
        // Keys are normalized here so the same attribute written with
        // different casing collapses to one row.
        let key = Profile::normalize_key(key);
        sqlx::query(
            r#"
            INSERT INTO user_profiles (user_id, attr_key, attr_value, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(user_id, attr_key) DO UPDATE SET
                attr_value = excluded.attr_value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(user_id.as_str())
        .bind(&key)
        .bind(value.trim())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Backend(format!("profile UPSERT: {e}")))?;

        debug!(user = user_id.as_str(), key = %key, "Profile attribute updated");
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn append(
        &self,
        user_id: &UserId,
        question: &str,
        answer: &str,
    ) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO chat_log (user_id, question, answer, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(user_id.as_str())
        .bind(question)
        .bind(answer)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Backend(format!("chat_log INSERT: {e}")))?;
        Ok(())
    }

    async fn list(&self, user_id: &UserId, limit: usize) -> Result<Vec<TurnRecord>, StorageError> {
        let rows = sqlx::query(
            "SELECT user_id, question, answer, created_at FROM chat_log
             WHERE user_id = ?1 ORDER BY id DESC LIMIT ?2",
        )
        .bind(user_id.as_str())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::QueryFailed(format!("chat_log SELECT: {e}")))?;

        rows.iter().map(Self::row_to_record).collect()
    }

    async fn clear(&self, user_id: &UserId) -> Result<u64, StorageError> {
        let result = sqlx::query("DELETE FROM chat_log WHERE user_id = ?1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Backend(format!("chat_log DELETE: {e}")))?;
        Ok(result.rows_affected())
    }

    async fn is_first_time(&self, user_id: &UserId) -> Result<bool, StorageError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM chat_log WHERE user_id = ?1")
            .bind(user_id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::QueryFailed(format!("chat_log COUNT: {e}")))?;

        let cnt: i64 = row
            .try_get("cnt")
            .map_err(|e| StorageError::QueryFailed(format!("cnt column: {e}")))?;
        Ok(cnt == 0)
    }
}
