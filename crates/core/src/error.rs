//! Error types for the Mentora domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Mentora operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Decision service errors ---
    #[error("Decision error: {0}")]
    Decision(#[from] DecisionError),

    // --- Conversation memory errors ---
    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    // --- Profile / history storage errors ---
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("A tool named '{0}' is already registered")]
    DuplicateName(String),

    #[error("Unknown tool: {0}")]
    Unknown(String),

    #[error("Invalid input format: {0}")]
    MalformedInput(String),

    #[error("Tool execution failed: {tool_name} — {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Tool timed out: {tool_name} after {timeout_secs}s")]
    Timeout { tool_name: String, timeout_secs: u64 },
}

#[derive(Debug, Clone, Error)]
pub enum DecisionError {
    #[error("Decision service unavailable: {0}")]
    Unavailable(String),

    #[error("Decision service timed out: {0}")]
    Timeout(String),

    #[error("Could not parse model output into a decision: {0}")]
    Parse(String),

    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),
}

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("Summary condensation failed: {0}")]
    Condense(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

impl DecisionError {
    /// Whether the loop should keep retrying after this error.
    ///
    /// Everything except authentication failures is treated as retryable
    /// (bounded by the iteration cap): transient outages, timeouts, and
    /// unparseable model output all become observations, not aborts.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, DecisionError::AuthenticationFailed(_))
    }
}
