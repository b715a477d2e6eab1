//! Decision-service implementations for Mentora.
//!
//! The advisor loop talks to a `DecisionService`; this crate provides the
//! production implementation against OpenAI-compatible chat endpoints
//! (OpenAI, OpenRouter, Ollama, vLLM, Gemini's compat layer, ...) plus the
//! line-protocol parser that turns raw model text into a typed decision.

pub mod openai_compat;
pub mod parser;

pub use openai_compat::OpenAiCompatDecider;
pub use parser::parse_decision;
