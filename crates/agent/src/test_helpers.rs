//! Shared test doubles for the agent crate.

use async_trait::async_trait;
use mentora_core::decision::{Decision, DecisionRequest, DecisionService};
use mentora_core::error::DecisionError;
use std::sync::{Arc, Mutex};

/// A decision service that replays a scripted sequence of results, one per
/// call, and records every request it receives. Once the script runs out it
/// keeps returning the last entry.
pub(crate) struct ScriptedDecider {
    script: Mutex<Vec<Result<Decision, DecisionError>>>,
    requests: Arc<Mutex<Vec<DecisionRequest>>>,
}

impl ScriptedDecider {
    pub(crate) fn new(script: Vec<Result<Decision, DecisionError>>) -> Self {
        Self {
            script: Mutex::new(script),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A script with a single final answer.
    pub(crate) fn single_final(text: &str) -> Self {
        Self::new(vec![Ok(Decision::Final { text: text.into() })])
    }

    /// Handle to the recorded requests, for asserting on prompts/context.
    pub(crate) fn requests(&self) -> Arc<Mutex<Vec<DecisionRequest>>> {
        Arc::clone(&self.requests)
    }
}

#[async_trait]
impl DecisionService for ScriptedDecider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn decide(&self, request: DecisionRequest) -> Result<Decision, DecisionError> {
        self.requests.lock().unwrap().push(request);
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            script.remove(0)
        } else {
            script
                .first()
                .cloned()
                .unwrap_or_else(|| Err(DecisionError::Unavailable("script exhausted".into())))
        }
    }
}
