//! The advisor loop for Mentora.
//!
//! Implements the Thinking → ToolCall → Observing cycle: at each iteration
//! the decision service either answers the user or requests exactly one
//! tool call, whose output is fed back as an observation. Everything here
//! is constructed with explicit handles — no singletons.
//!
//! [`AdvisorLoop`] is the bare state machine for a single turn;
//! [`Advisor`] wraps it with per-user sessions, memory, profile rendering,
//! and history logging.

pub mod advisor;
pub mod advisor_loop;
pub mod prompt;
pub mod trace;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use advisor::{Advisor, AgentOutcome};
pub use advisor_loop::{AdvisorLoop, LoopOutcome, TerminalReason};
pub use trace::{TraceEntry, TraceKind, TurnTrace};
