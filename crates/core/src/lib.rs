//! # Mentora Core
//!
//! Domain types, traits, and error definitions for the Mentora
//! career-advisory agent. This crate has **zero framework dependencies** —
//! it defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every subsystem is defined as a trait here. Implementations live in their
//! respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod decision;
pub mod error;
pub mod history;
pub mod profile;
pub mod tool;
pub mod turn;

// Re-export key types at crate root for ergonomics
pub use decision::{Decision, DecisionRequest, DecisionService};
pub use error::{Error, Result};
pub use history::{HistoryStore, TurnRecord};
pub use profile::{Profile, ProfileStore};
pub use tool::{Tool, ToolRegistry, ToolSpec};
pub use turn::{ConversationTurn, Speaker, UserId};
