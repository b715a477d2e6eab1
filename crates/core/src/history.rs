//! HistoryStore trait — durable per-user chat logs.
//!
//! History is an append-only log of (question, answer) pairs. The persisted
//! log is the source of truth for display; any in-process transcript is a
//! cache of it. Writes are fail-soft at the call site: a storage error must
//! never prevent the user from receiving their answer.

use crate::error::StorageError;
use crate::turn::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted (question, answer) exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Which user this turn belongs to
    pub user_id: UserId,

    /// The user's message
    pub question: String,

    /// The advisor's reply
    pub answer: String,

    /// When the turn completed
    pub created_at: DateTime<Utc>,
}

/// The HistoryStore trait.
///
/// Implementations: SQLite, in-memory (for testing).
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// The backend name (e.g., "sqlite", "in_memory").
    fn name(&self) -> &str;

    /// Append a completed turn to the user's log.
    async fn append(
        &self,
        user_id: &UserId,
        question: &str,
        answer: &str,
    ) -> std::result::Result<(), StorageError>;

    /// The last `limit` turns for a user, newest first.
    async fn list(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> std::result::Result<Vec<TurnRecord>, StorageError>;

    /// Delete all turns for a user. Returns the number deleted.
    async fn clear(&self, user_id: &UserId) -> std::result::Result<u64, StorageError>;

    /// Whether this user has no recorded history yet.
    async fn is_first_time(&self, user_id: &UserId) -> std::result::Result<bool, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_record_serialization() {
        let record = TurnRecord {
            user_id: UserId::new("alice"),
            question: "What does a data engineer do?".into(),
            answer: "They build pipelines.".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("alice"));
        assert!(json.contains("pipelines"));
    }
}
