//! Condenser trait — lossy compression of evicted conversation turns.
//!
//! When the summary memory goes over budget, the oldest verbatim turns are
//! handed to a condenser, which folds them into the evolving summary text.
//! The default is deterministic extraction; an LLM-backed condenser can be
//! slotted in behind the same trait.

use async_trait::async_trait;
use mentora_core::error::MemoryError;
use mentora_core::turn::{ConversationTurn, Speaker};

/// Compresses evicted turns into an updated summary blob.
#[async_trait]
pub trait Condenser: Send + Sync {
    /// The condenser name (e.g., "extractive").
    fn name(&self) -> &str;

    /// Fold `evicted` turns into `prior_summary`, returning the new summary.
    async fn condense(
        &self,
        prior_summary: &str,
        evicted: &[ConversationTurn],
    ) -> std::result::Result<String, MemoryError>;
}

/// Deterministic condenser: keeps the leading sentence of each evicted turn.
///
/// No model call involved, so memory maintenance never depends on the
/// decision service being reachable.
pub struct ExtractiveCondenser {
    /// Maximum characters kept per evicted turn.
    max_chars_per_turn: usize,
}

impl ExtractiveCondenser {
    pub fn new() -> Self {
        Self {
            max_chars_per_turn: 100,
        }
    }

    /// First sentence of the text, clipped to the per-turn limit.
    fn extract(&self, text: &str) -> String {
        let text = text.trim();
        let sentence_end = text
            .char_indices()
            .find(|(_, c)| matches!(c, '.' | '?' | '!'))
            .map(|(i, c)| i + c.len_utf8());

        let mut extracted = match sentence_end {
            Some(end) => &text[..end],
            None => text,
        }
        .to_string();

        if extracted.chars().count() > self.max_chars_per_turn {
            extracted = extracted.chars().take(self.max_chars_per_turn).collect();
            extracted.push('…');
        }
        extracted
    }
}

impl Default for ExtractiveCondenser {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Condenser for ExtractiveCondenser {
    fn name(&self) -> &str {
        "extractive"
    }

    async fn condense(
        &self,
        prior_summary: &str,
        evicted: &[ConversationTurn],
    ) -> std::result::Result<String, MemoryError> {
        let mut summary = prior_summary.trim_end().to_string();

        for turn in evicted {
            let speaker = match turn.speaker {
                Speaker::User => "User",
                Speaker::Advisor => "Advisor",
            };
            if !summary.is_empty() {
                summary.push('\n');
            }
            summary.push_str(&format!("{}: {}", speaker, self.extract(&turn.text)));
        }

        Ok(summary)
    }
}
