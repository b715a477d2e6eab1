//! In-memory store — useful for testing and ephemeral sessions.

use async_trait::async_trait;
use chrono::Utc;
use mentora_core::error::StorageError;
use mentora_core::history::{HistoryStore, TurnRecord};
use mentora_core::profile::{Profile, ProfileStore};
use mentora_core::turn::UserId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Stores profiles and chat logs in process memory.
///
/// Implements both storage traits so a single instance can back a whole
/// test advisor. Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryStore {
    profiles: Arc<RwLock<HashMap<String, Profile>>>,
    history: Arc<RwLock<HashMap<String, Vec<TurnRecord>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn get(&self, user_id: &UserId) -> Result<Profile, StorageError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(user_id.as_str()).cloned().unwrap_or_default())
    }

    async fn set(&self, user_id: &UserId, key: &str, value: &str) -> Result<(), StorageError> {
        let mut profiles = self.profiles.write().await;
        profiles
            .entry(user_id.as_str().to_string())
            .or_default()
            .set(key, value);
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn append(
        &self,
        user_id: &UserId,
        question: &str,
        answer: &str,
    ) -> Result<(), StorageError> {
        let mut history = self.history.write().await;
        history
            .entry(user_id.as_str().to_string())
            .or_default()
            .push(TurnRecord {
                user_id: user_id.clone(),
                question: question.to_string(),
                answer: answer.to_string(),
                created_at: Utc::now(),
            });
        Ok(())
    }

    async fn list(&self, user_id: &UserId, limit: usize) -> Result<Vec<TurnRecord>, StorageError> {
        let history = self.history.read().await;
        let records = match history.get(user_id.as_str()) {
            Some(records) => records,
            None => return Ok(vec![]),
        };
        Ok(records.iter().rev().take(limit).cloned().collect())
    }

    async fn clear(&self, user_id: &UserId) -> Result<u64, StorageError> {
        let mut history = self.history.write().await;
        let removed = history
            .remove(user_id.as_str())
            .map(|records| records.len() as u64)
            .unwrap_or(0);
        Ok(removed)
    }

    async fn is_first_time(&self, user_id: &UserId) -> Result<bool, StorageError> {
        let history = self.history.read().await;
        Ok(history
            .get(user_id.as_str())
            .map(|records| records.is_empty())
            .unwrap_or(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_user_gets_empty_profile() {
        let store = InMemoryStore::new();
        let profile = ProfileStore::get(&store, &UserId::new("ghost")).await.unwrap();
        assert!(profile.is_empty());
    }

    #[tokio::test]
    async fn profile_set_and_get() {
        let store = InMemoryStore::new();
        let user = UserId::new("alice");
        store.set(&user, "goal", "become a PM").await.unwrap();
        store.set(&user, "Stage", "professional").await.unwrap();

        let profile = ProfileStore::get(&store, &user).await.unwrap();
        assert_eq!(profile.get("goal"), Some("become a PM"));
        assert_eq!(profile.get("stage"), Some("professional"));
    }

    #[tokio::test]
    async fn profiles_are_per_user() {
        let store = InMemoryStore::new();
        store.set(&UserId::new("alice"), "goal", "PM").await.unwrap();

        let bob = ProfileStore::get(&store, &UserId::new("bob")).await.unwrap();
        assert!(bob.is_empty());
    }

    #[tokio::test]
    async fn history_lists_newest_first() {
        let store = InMemoryStore::new();
        let user = UserId::new("alice");
        store.append(&user, "q1", "a1").await.unwrap();
        store.append(&user, "q2", "a2").await.unwrap();
        store.append(&user, "q3", "a3").await.unwrap();

        let records = store.list(&user, 2).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].question, "q3");
        assert_eq!(records[1].question, "q2");
    }

    #[tokio::test]
    async fn clear_reports_deleted_count() {
        let store = InMemoryStore::new();
        let user = UserId::new("alice");
        store.append(&user, "q1", "a1").await.unwrap();
        store.append(&user, "q2", "a2").await.unwrap();

        assert_eq!(store.clear(&user).await.unwrap(), 2);
        assert_eq!(store.clear(&user).await.unwrap(), 0);
        assert!(store.list(&user, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn first_time_flips_after_first_turn() {
        let store = InMemoryStore::new();
        let user = UserId::new("alice");
        assert!(store.is_first_time(&user).await.unwrap());

        store.append(&user, "hello", "hi there").await.unwrap();
        assert!(!store.is_first_time(&user).await.unwrap());
    }
}
