//! Turn trace — in-process scratchpad for a single advisor turn.
//!
//! Records the Action/Observation sequence plus loop notices (timeouts,
//! parse failures), tracks the iteration counter against the cap, and
//! renders the whole thing as a text section for the decision context.
//! Cleared implicitly: a new turn gets a new trace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry in the turn trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    pub kind: TraceKind,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// The kind of trace entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TraceKind {
    /// A tool invocation request (name and input).
    Action,
    /// What came back from the tool — output or error text.
    Observation,
    /// A loop-level event: decision timeout, parse failure, retry.
    Notice,
}

/// The scratchpad for one turn of the advisor loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnTrace {
    pub entries: Vec<TraceEntry>,

    /// Thinking steps taken so far.
    pub iterations: u32,

    /// Maximum Thinking steps allowed.
    pub max_iterations: u32,
}

impl TurnTrace {
    pub fn new(max_iterations: u32) -> Self {
        Self {
            entries: Vec::new(),
            iterations: 0,
            max_iterations,
        }
    }

    /// Record an Action entry (a tool invocation request).
    pub fn add_action(&mut self, action: &str) {
        self.push(TraceKind::Action, action);
    }

    /// Record an Observation entry (tool output or error text).
    pub fn add_observation(&mut self, observation: &str) {
        self.push(TraceKind::Observation, observation);
    }

    /// Record a Notice entry (loop-level event).
    pub fn add_notice(&mut self, notice: &str) {
        self.push(TraceKind::Notice, notice);
    }

    fn push(&mut self, kind: TraceKind, content: &str) {
        self.entries.push(TraceEntry {
            kind,
            content: content.to_string(),
            timestamp: Utc::now(),
        });
    }

    /// Increment the iteration counter. Returns `false` once the cap is
    /// exceeded.
    pub fn tick(&mut self) -> bool {
        self.iterations += 1;
        self.iterations <= self.max_iterations
    }

    /// The most recent tool observation, if any.
    pub fn last_observation(&self) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.kind == TraceKind::Observation)
            .map(|e| e.content.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the trace as a text section for the decision context.
    pub fn render(&self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }

        let mut out = String::from("## This turn so far\n");
        for entry in &self.entries {
            let label = match entry.kind {
                TraceKind::Action => "Action",
                TraceKind::Observation => "Observation",
                TraceKind::Notice => "Notice",
            };
            out.push_str(&format!("[{}] {}\n", label, entry.content));
        }
        out
    }
}
