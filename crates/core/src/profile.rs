//! User profile — free-text career attributes collected during conversation.
//!
//! A profile is a keyed set of attributes ("goal", "stage", "skills", ...)
//! with no schema: keys are case-insensitive and trimmed, values are
//! arbitrary strings, last write wins. Profiles are created lazily on first
//! write and only mutated by explicit tool calls.

use crate::error::StorageError;
use crate::turn::UserId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-user attribute map. BTreeMap keeps rendering order stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    attributes: BTreeMap<String, String>,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize an attribute key: trimmed and case-folded.
    pub fn normalize_key(key: &str) -> String {
        key.trim().to_lowercase()
    }

    /// Upsert an attribute. The key is normalized, the value trimmed.
    pub fn set(&mut self, key: &str, value: &str) {
        self.attributes
            .insert(Self::normalize_key(key), value.trim().to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .get(&Self::normalize_key(key))
            .map(|v| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render the profile as a text block for prompts.
    pub fn to_text(&self) -> String {
        if self.attributes.is_empty() {
            return "No profile information collected yet.".to_string();
        }
        self.attributes
            .iter()
            .map(|(k, v)| format!("{}: {}", capitalize(k), v))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// The ProfileStore trait — durable per-user attribute storage.
///
/// Implementations must support safe concurrent upsert per user key;
/// last-write-wins semantics are acceptable since a user's own turns are
/// serialized by the front end.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// The backend name (e.g., "sqlite", "in_memory").
    fn name(&self) -> &str;

    /// Fetch the profile for a user. Missing users get an empty profile.
    async fn get(&self, user_id: &UserId) -> std::result::Result<Profile, StorageError>;

    /// Upsert a single attribute for a user, creating the profile if needed.
    async fn set(
        &self,
        user_id: &UserId,
        key: &str,
        value: &str,
    ) -> std::result::Result<(), StorageError>;
}
