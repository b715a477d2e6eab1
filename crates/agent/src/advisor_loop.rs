//! The advisor loop state machine.
//!
//! `Start → Thinking → {ToolCall → Observing → Thinking}* → Finished`.
//!
//! One turn: repeatedly ask the decision service what to do next; a
//! `Final` decision ends the turn, a `ToolCall` decision produces an
//! observation and loops. Tool failures, parse failures, and service
//! timeouts are absorbed as retryable trace entries — the loop never
//! returns an error for valid input, only an outcome with a terminal
//! reason. Both the decision call and each tool call run under their own
//! timeout, and no lock is held across either await point.

use crate::trace::TurnTrace;
use mentora_config::AdvisorConfig;
use mentora_core::decision::{Decision, DecisionRequest, DecisionService};
use mentora_core::tool::ToolRegistry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Why the loop finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalReason {
    /// The decision service produced a final answer.
    Answered,
    /// The iteration cap was reached without a final answer.
    MaxIterations,
    /// The decision service failed through to the end of the turn.
    Error,
}

/// The result of one turn through the loop. `answer` is never empty.
#[derive(Debug, Clone)]
pub struct LoopOutcome {
    pub answer: String,
    pub iterations: u32,
    pub tool_calls: u32,
    pub reason: TerminalReason,
    pub trace: TurnTrace,
}

/// User-visible fallback when the decision service stays broken.
pub const APOLOGY: &str =
    "I encountered an unexpected error. Please try again or contact support if the issue persists.";

/// Fallback when the model answers with nothing.
pub const EMPTY_ANSWER_FALLBACK: &str =
    "I apologize, but I couldn't generate a proper response. Please try rephrasing your question.";

const MAX_ITERATIONS_PREFIX: &str =
    "I've reached the maximum number of reasoning iterations. Here's what I found so far:";

pub struct AdvisorLoop {
    decider: Arc<dyn DecisionService>,
    system_prompt: String,
    max_iterations: u32,
    decision_timeout: Duration,
    tool_timeout: Duration,
}

impl AdvisorLoop {
    pub fn new(
        decider: Arc<dyn DecisionService>,
        system_prompt: impl Into<String>,
        config: &AdvisorConfig,
    ) -> Self {
        Self {
            decider,
            system_prompt: config
                .system_prompt_override
                .clone()
                .unwrap_or_else(|| system_prompt.into()),
            max_iterations: config.max_iterations,
            decision_timeout: Duration::from_secs(config.decision_timeout_secs),
            tool_timeout: Duration::from_secs(config.tool_timeout_secs),
        }
    }

    /// Run one turn.
    ///
    /// `base_context` is the memory/profile block rendered by the caller;
    /// the per-turn trace is appended to it on every iteration.
    pub async fn run(
        &self,
        registry: &ToolRegistry,
        base_context: &str,
        user_message: &str,
    ) -> LoopOutcome {
        let mut trace = TurnTrace::new(self.max_iterations);
        let specs = registry.specs();
        let mut tool_calls = 0u32;

        // Whether the most recent iteration ended in a decision-service
        // failure, as opposed to a tool observation.
        let mut last_step_failed = false;

        info!(
            decider = self.decider.name(),
            max_iterations = self.max_iterations,
            "Advisor loop starting"
        );

        while trace.tick() {
            debug!(iteration = trace.iterations, "Thinking");

            let mut context = base_context.to_string();
            let rendered_trace = trace.render();
            if !rendered_trace.is_empty() {
                if !context.is_empty() {
                    context.push_str("\n\n");
                }
                context.push_str(&rendered_trace);
            }

            let request = DecisionRequest {
                system_prompt: self.system_prompt.clone(),
                context,
                user_message: user_message.to_string(),
                tools: specs.clone(),
            };

            let decision =
                match tokio::time::timeout(self.decision_timeout, self.decider.decide(request))
                    .await
                {
                    Err(_) => {
                        warn!(
                            timeout_secs = self.decision_timeout.as_secs(),
                            "Decision service timed out"
                        );
                        trace.add_notice("The decision step timed out; trying again.");
                        last_step_failed = true;
                        continue;
                    }
                    Ok(Err(e)) if !e.is_retryable() => {
                        warn!(error = %e, "Decision service failed unrecoverably");
                        return LoopOutcome {
                            answer: APOLOGY.to_string(),
                            iterations: trace.iterations,
                            tool_calls,
                            reason: TerminalReason::Error,
                            trace,
                        };
                    }
                    Ok(Err(e)) => {
                        debug!(error = %e, "Decision step failed, retrying");
                        trace.add_notice(&format!("The decision step failed: {e}"));
                        last_step_failed = true;
                        continue;
                    }
                    Ok(Ok(decision)) => decision,
                };

            last_step_failed = false;

            match decision {
                Decision::Final { text } => {
                    let text = text.trim();
                    let answer = if text.is_empty() {
                        EMPTY_ANSWER_FALLBACK.to_string()
                    } else {
                        text.to_string()
                    };
                    info!(
                        iterations = trace.iterations,
                        tool_calls, "Advisor loop answered"
                    );
                    return LoopOutcome {
                        answer,
                        iterations: trace.iterations,
                        tool_calls,
                        reason: TerminalReason::Answered,
                        trace,
                    };
                }
                Decision::ToolCall { name, input } => {
                    tool_calls += 1;
                    trace.add_action(&format!("{name}({input})"));

                    let observation = match tokio::time::timeout(
                        self.tool_timeout,
                        registry.invoke(&name, &input),
                    )
                    .await
                    {
                        Err(_) => format!(
                            "Error: tool '{}' timed out after {}s",
                            name,
                            self.tool_timeout.as_secs()
                        ),
                        Ok(Err(e)) => format!("Error: {e}"),
                        Ok(Ok(output)) => output,
                    };
                    debug!(tool = %name, "Observation recorded");
                    trace.add_observation(&observation);
                }
            }
        }

        // Cap reached.
        warn!(max_iterations = self.max_iterations, "Iteration cap reached");

        if last_step_failed {
            return LoopOutcome {
                answer: APOLOGY.to_string(),
                iterations: self.max_iterations,
                tool_calls,
                reason: TerminalReason::Error,
                trace,
            };
        }

        let answer = match trace.last_observation() {
            Some(observation) => format!("{MAX_ITERATIONS_PREFIX} {observation}"),
            None => EMPTY_ANSWER_FALLBACK.to_string(),
        };

        LoopOutcome {
            answer,
            iterations: self.max_iterations,
            tool_calls,
            reason: TerminalReason::MaxIterations,
            trace,
        }
    }
}
