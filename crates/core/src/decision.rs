//! DecisionService trait — the abstraction over the LLM decision step.
//!
//! At each iteration the advisor loop asks the decision service one
//! question: given the accumulated context, either produce the final answer
//! or request exactly one tool invocation. The decision is modeled as an
//! explicit sum type so the loop never pattern-matches on free text.
//!
//! Implementations: OpenAI-compatible HTTP endpoints, scripted mocks.

use crate::error::DecisionError;
use crate::tool::ToolSpec;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Everything the decision service sees for one Thinking step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// The advisor's system prompt (persona, phases, tone).
    pub system_prompt: String,

    /// Accumulated context: memory summary, profile text, and the
    /// action/observation trace so far this turn.
    pub context: String,

    /// The latest user message.
    pub user_message: String,

    /// The tools available this turn (name + description only).
    pub tools: Vec<ToolSpec>,
}

/// The outcome of one Thinking step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decision {
    /// Answer the user directly; the turn is over.
    Final { text: String },

    /// Invoke exactly one tool and come back with the observation.
    ToolCall { name: String, input: String },
}

/// The core DecisionService trait.
///
/// The loop calls `decide()` without knowing which backend is in use —
/// pure polymorphism, and the one place an external LLM is involved.
#[async_trait]
pub trait DecisionService: Send + Sync {
    /// A human-readable name for this service (e.g., "openai_compat").
    fn name(&self) -> &str;

    /// Make one decision: final answer or a single tool call.
    async fn decide(
        &self,
        request: DecisionRequest,
    ) -> std::result::Result<Decision, DecisionError>;
}
