//! Rolling summary memory — bounded context for the advisor loop.
//!
//! Holds the most recent turns verbatim plus a single evolving summary of
//! everything older. After each completed turn, `summarize_if_needed`
//! restores the size invariant: rendered size never exceeds the budget.
//! Older content is condensed (lossy) before anything recent is touched.

use crate::condenser::{Condenser, ExtractiveCondenser};
use mentora_core::error::MemoryError;
use mentora_core::turn::{ConversationTurn, Speaker};
use std::collections::VecDeque;
use tracing::debug;

/// Session-scoped conversation memory with a token budget.
///
/// Not persisted across process restarts; one per active user session.
pub struct SummaryMemory {
    /// Condensed account of evicted turns.
    summary: String,

    /// Recent turns kept verbatim, oldest first.
    recent: VecDeque<ConversationTurn>,

    /// Size budget in approximate tokens (4 chars ≈ 1 token).
    budget_tokens: usize,

    /// How many recent turns to keep verbatim when compressing.
    keep_recent: usize,

    condenser: Box<dyn Condenser>,
}

impl SummaryMemory {
    /// Create a memory with the given budget and the default condenser.
    pub fn new(budget_tokens: usize) -> Self {
        Self::with_condenser(budget_tokens, 2, Box::new(ExtractiveCondenser::new()))
    }

    pub fn with_condenser(
        budget_tokens: usize,
        keep_recent: usize,
        condenser: Box<dyn Condenser>,
    ) -> Self {
        Self {
            summary: String::new(),
            recent: VecDeque::new(),
            budget_tokens,
            // At least the newest turn is always kept.
            keep_recent: keep_recent.max(1),
            condenser,
        }
    }

    /// Append a completed turn. Call `summarize_if_needed` afterwards.
    pub fn append(&mut self, turn: ConversationTurn) {
        self.recent.push_back(turn);
    }

    /// Current size in approximate tokens.
    pub fn size_tokens(&self) -> usize {
        let summary_tokens = self.summary.len() / 4;
        let recent_tokens: usize = self.recent.iter().map(|t| t.estimated_tokens()).sum();
        summary_tokens + recent_tokens
    }

    pub fn budget_tokens(&self) -> usize {
        self.budget_tokens
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn recent_turns(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.recent.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.recent.is_empty()
    }

    /// Restore the size invariant: `size_tokens() <= budget_tokens`.
    ///
    /// Compression order, least valuable content first:
    /// 1. turns older than the newest `keep_recent` are condensed away;
    /// 2. if still over, kept turns are condensed too, down to the newest;
    /// 3. the summary head (oldest content) is trimmed to whatever room
    ///    the verbatim turns leave;
    /// 4. last resort, a single oversized turn is clipped in place.
    pub async fn summarize_if_needed(&mut self) -> Result<(), MemoryError> {
        if self.size_tokens() <= self.budget_tokens {
            return Ok(());
        }

        if self.recent.len() > self.keep_recent {
            let evict_count = self.recent.len() - self.keep_recent;
            let evicted: Vec<ConversationTurn> = self.recent.drain(..evict_count).collect();
            debug!(evicted = evicted.len(), "Condensing old turns into summary");
            self.summary = self.condenser.condense(&self.summary, &evicted).await?;
        }

        while self.size_tokens() > self.budget_tokens && self.recent.len() > 1 {
            let turn = self.recent.pop_front().expect("recent is non-empty");
            self.summary = self
                .condenser
                .condense(&self.summary, std::slice::from_ref(&turn))
                .await?;
        }

        let recent_tokens: usize = self.recent.iter().map(|t| t.estimated_tokens()).sum();
        let allowed_summary_tokens = self.budget_tokens.saturating_sub(recent_tokens);
        trim_front_to_bytes(&mut self.summary, allowed_summary_tokens * 4);

        if self.size_tokens() > self.budget_tokens
            && let Some(turn) = self.recent.front_mut()
        {
            clip_to_bytes(&mut turn.text, self.budget_tokens * 4);
        }

        debug_assert!(self.size_tokens() <= self.budget_tokens);
        Ok(())
    }

    /// Render the memory as a context block for the decision service.
    pub fn render(&self) -> String {
        let mut out = String::new();

        if !self.summary.is_empty() {
            out.push_str("## Conversation so far (condensed)\n");
            out.push_str(&self.summary);
            out.push_str("\n\n");
        }

        if !self.recent.is_empty() {
            out.push_str("## Recent turns\n");
            for turn in &self.recent {
                let speaker = match turn.speaker {
                    Speaker::User => "User",
                    Speaker::Advisor => "Advisor",
                };
                out.push_str(&format!("{}: {}\n", speaker, turn.text));
            }
        }

        out
    }

    /// Discard everything (session end).
    pub fn clear(&mut self) {
        self.summary.clear();
        self.recent.clear();
    }
}

/// Drop the oldest content: keep at most `keep_bytes` from the tail,
/// respecting char boundaries.
fn trim_front_to_bytes(s: &mut String, keep_bytes: usize) {
    if s.len() <= keep_bytes {
        return;
    }
    let mut cut = s.len() - keep_bytes;
    while cut < s.len() && !s.is_char_boundary(cut) {
        cut += 1;
    }
    s.drain(..cut);
}

/// Clip the tail: keep at most `keep_bytes` from the front,
/// respecting char boundaries.
fn clip_to_bytes(s: &mut String, keep_bytes: usize) {
    if s.len() <= keep_bytes {
        return;
    }
    let mut cut = keep_bytes;
    while cut > 0 && !s.is_char_boundary(cut) {
        cut -= 1;
    }
    s.truncate(cut);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(text_len: usize) -> String {
        "x".repeat(text_len)
    }

    #[tokio::test]
    async fn stays_within_budget_after_many_turns() {
        let mut mem = SummaryMemory::new(100);
        for i in 0..50 {
            mem.append(ConversationTurn::user(format!(
                "Question number {i} about careers in technology and beyond."
            )));
            mem.append(ConversationTurn::advisor(format!(
                "Answer number {i} with a fair amount of advisory detail in it."
            )));
            mem.summarize_if_needed().await.unwrap();
            assert!(
                mem.size_tokens() <= mem.budget_tokens(),
                "over budget after turn {i}: {} > {}",
                mem.size_tokens(),
                mem.budget_tokens()
            );
        }
    }

    #[tokio::test]
    async fn small_conversations_are_untouched() {
        let mut mem = SummaryMemory::new(1000);
        mem.append(ConversationTurn::user("Hi"));
        mem.append(ConversationTurn::advisor("Hello! How can I help?"));
        mem.summarize_if_needed().await.unwrap();
        assert!(mem.summary().is_empty());
        assert_eq!(mem.recent_turns().count(), 2);
    }

    #[tokio::test]
    async fn recent_turns_survive_compression() {
        let mut mem = SummaryMemory::new(60);
        for _ in 0..10 {
            mem.append(ConversationTurn::user(filled(120)));
            mem.summarize_if_needed().await.unwrap();
        }
        mem.append(ConversationTurn::user("keep me around please"));
        mem.append(ConversationTurn::advisor("and me as well"));
        mem.summarize_if_needed().await.unwrap();

        let recent: Vec<_> = mem.recent_turns().map(|t| t.text.clone()).collect();
        assert!(recent.contains(&"keep me around please".to_string()));
        assert!(recent.contains(&"and me as well".to_string()));
        assert!(mem.size_tokens() <= mem.budget_tokens());
    }

    #[tokio::test]
    async fn single_oversized_turn_is_clipped() {
        let mut mem = SummaryMemory::new(10);
        mem.append(ConversationTurn::user(filled(500)));
        mem.summarize_if_needed().await.unwrap();
        assert!(mem.size_tokens() <= mem.budget_tokens());
        assert_eq!(mem.recent_turns().count(), 1);
    }

    #[tokio::test]
    async fn render_includes_summary_and_recent() {
        let mut mem = SummaryMemory::new(40);
        for i in 0..6 {
            mem.append(ConversationTurn::user(format!(
                "A long question about topic {i}. With a trailing clause."
            )));
            mem.summarize_if_needed().await.unwrap();
        }
        let rendered = mem.render();
        assert!(rendered.contains("## Conversation so far (condensed)"));
        assert!(rendered.contains("## Recent turns"));
    }

    #[tokio::test]
    async fn clear_empties_everything() {
        let mut mem = SummaryMemory::new(50);
        mem.append(ConversationTurn::user(filled(400)));
        mem.append(ConversationTurn::user("more"));
        mem.summarize_if_needed().await.unwrap();
        mem.clear();
        assert!(mem.is_empty());
        assert_eq!(mem.size_tokens(), 0);
    }

    #[test]
    fn trim_front_respects_char_boundaries() {
        let mut s = "日本語のテキスト".to_string();
        trim_front_to_bytes(&mut s, 7);
        assert!(s.len() <= 7);
        // Still valid UTF-8 by construction; check it parses as chars.
        assert!(s.chars().count() <= 3);
    }
}
