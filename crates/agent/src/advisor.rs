//! The session-aware advisor orchestrator.
//!
//! [`Advisor`] wraps [`AdvisorLoop`](crate::AdvisorLoop) with everything a
//! front end needs for a multi-user deployment: per-user tool registries and
//! conversation memory, profile rendering into the decision context, and
//! history logging. One `Advisor` serves all users of a process; front ends
//! (gateway, CLI) call [`Advisor::chat`] and render the outcome.
//!
//! History writes are fail-soft: a storage error is logged and the user
//! still receives their answer.

use crate::advisor_loop::{AdvisorLoop, APOLOGY};
use crate::prompt::default_system_prompt;
use crate::trace::TurnTrace;
use mentora_config::AppConfig;
use mentora_core::decision::DecisionService;
use mentora_core::history::HistoryStore;
use mentora_core::profile::ProfileStore;
use mentora_core::tool::{ToolRegistry, ToolSpec};
use mentora_core::turn::{ConversationTurn, UserId};
use mentora_memory::{ExtractiveCondenser, SummaryMemory};
use mentora_tools::default_registry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use crate::advisor_loop::TerminalReason;

/// What a front end gets back from one turn. Never an `Err`: validation
/// failures and service breakdowns surface as `answer` text with
/// `reason = Error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentOutcome {
    pub answer: String,
    pub iterations: u32,
    pub tool_calls: u32,
    pub reason: TerminalReason,

    /// Whether this user had no recorded history before this turn.
    pub first_time: bool,

    /// The action/observation trace of the turn.
    pub trace: TurnTrace,
}

impl AgentOutcome {
    fn rejected(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            iterations: 0,
            tool_calls: 0,
            reason: TerminalReason::Error,
            first_time: false,
            trace: TurnTrace::new(0),
        }
    }
}

/// Per-user session state, created lazily on the first turn.
struct Session {
    registry: Arc<ToolRegistry>,
    memory: SummaryMemory,
}

pub struct Advisor {
    looper: AdvisorLoop,
    profiles: Arc<dyn ProfileStore>,
    history: Arc<dyn HistoryStore>,
    memory_budget_tokens: usize,
    memory_keep_recent: usize,
    sessions: Mutex<HashMap<String, Arc<tokio::sync::Mutex<Session>>>>,
}

impl Advisor {
    pub fn new(
        decider: Arc<dyn DecisionService>,
        profiles: Arc<dyn ProfileStore>,
        history: Arc<dyn HistoryStore>,
        config: &AppConfig,
    ) -> Self {
        Self {
            looper: AdvisorLoop::new(decider, default_system_prompt(), &config.advisor),
            profiles,
            history,
            memory_budget_tokens: config.memory.budget_tokens,
            memory_keep_recent: config.memory.keep_recent,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Process one user message end to end.
    pub async fn chat(&self, user_id: &str, message: &str) -> AgentOutcome {
        if user_id.trim().is_empty() {
            return AgentOutcome::rejected("Error: User ID is required");
        }
        if message.trim().is_empty() {
            return AgentOutcome::rejected("Please provide a valid input message");
        }

        let uid = UserId::new(user_id.trim());
        let message = message.trim();

        let session = match self.session_for(&uid) {
            Ok(session) => session,
            Err(e) => {
                warn!(user_id = %uid, error = %e, "Could not assemble tool registry");
                return AgentOutcome::rejected(APOLOGY);
            }
        };

        // A user's own turns are serialized; different users proceed in
        // parallel.
        let mut session = session.lock().await;

        let first_time = match self.history.is_first_time(&uid).await {
            Ok(first_time) => first_time,
            Err(e) => {
                warn!(user_id = %uid, error = %e, "History lookup failed");
                false
            }
        };

        let context = self.render_context(&uid, &session.memory).await;

        let outcome = self
            .looper
            .run(&session.registry, &context, message)
            .await;

        info!(
            user_id = %uid,
            iterations = outcome.iterations,
            tool_calls = outcome.tool_calls,
            reason = ?outcome.reason,
            "Turn completed"
        );

        // Fail-soft: the answer goes out even if the log write fails.
        if let Err(e) = self.history.append(&uid, message, &outcome.answer).await {
            warn!(user_id = %uid, error = %e, "Failed to log chat turn");
        }

        session.memory.append(ConversationTurn::user(message));
        session
            .memory
            .append(ConversationTurn::advisor(&outcome.answer));
        if let Err(e) = session.memory.summarize_if_needed().await {
            warn!(user_id = %uid, error = %e, "Memory condensation failed");
        }

        AgentOutcome {
            answer: outcome.answer,
            iterations: outcome.iterations,
            tool_calls: outcome.tool_calls,
            reason: outcome.reason,
            first_time,
            trace: outcome.trace,
        }
    }

    /// The tools a user session gets, as specs. Static across users.
    pub fn tool_specs(&self) -> Vec<ToolSpec> {
        mentora_tools::default_specs()
    }

    /// Handle to the history store, for front-end listing and clearing.
    pub fn history(&self) -> Arc<dyn HistoryStore> {
        Arc::clone(&self.history)
    }

    /// Drop the in-process session for a user. Their next turn starts with
    /// fresh conversation memory; profile and history are unaffected.
    pub fn reset_session(&self, user_id: &str) {
        if let Ok(mut sessions) = self.sessions.lock() {
            sessions.remove(user_id.trim());
        }
    }

    fn session_for(
        &self,
        uid: &UserId,
    ) -> Result<Arc<tokio::sync::Mutex<Session>>, mentora_core::error::ToolError> {
        let mut sessions = match self.sessions.lock() {
            Ok(sessions) => sessions,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(session) = sessions.get(uid.as_str()) {
            return Ok(Arc::clone(session));
        }

        let registry = default_registry(Arc::clone(&self.profiles), uid.clone())?;
        let memory = SummaryMemory::with_condenser(
            self.memory_budget_tokens,
            self.memory_keep_recent,
            Box::new(ExtractiveCondenser::new()),
        );
        let session = Arc::new(tokio::sync::Mutex::new(Session {
            registry: Arc::new(registry),
            memory,
        }));
        sessions.insert(uid.as_str().to_string(), Arc::clone(&session));
        Ok(session)
    }

    /// Profile block plus the rendered conversation memory.
    async fn render_context(&self, uid: &UserId, memory: &SummaryMemory) -> String {
        let profile_text = match self.profiles.get(uid).await {
            Ok(profile) => profile.to_text(),
            Err(e) => {
                warn!(user_id = %uid, error = %e, "Profile fetch failed");
                "No profile information collected yet.".to_string()
            }
        };

        let mut context = format!("## User profile\n{profile_text}");
        let memory_block = memory.render();
        if !memory_block.is_empty() {
            context.push_str("\n\n");
            context.push_str(&memory_block);
        }
        context
    }
}
