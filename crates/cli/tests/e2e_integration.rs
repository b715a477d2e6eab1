//! End-to-end integration tests for the Mentora career advisor.
//!
//! These exercise the full pipeline from user message to advisor reply:
//! the decision loop, tool execution, profile storage, conversation
//! memory, and history logging — against a scripted decision service.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mentora_agent::{Advisor, TerminalReason};
use mentora_config::AppConfig;
use mentora_core::decision::{Decision, DecisionRequest, DecisionService};
use mentora_core::error::DecisionError;
use mentora_core::history::HistoryStore;
use mentora_core::profile::ProfileStore;
use mentora_core::turn::UserId;
use mentora_store::InMemoryStore;

// ── Mock decision service ────────────────────────────────────────────────

/// Replays scripted decisions in sequence and counts calls.
struct ScriptedDecider {
    decisions: Mutex<Vec<Result<Decision, DecisionError>>>,
    call_count: Mutex<usize>,
}

impl ScriptedDecider {
    fn new(decisions: Vec<Result<Decision, DecisionError>>) -> Self {
        Self {
            decisions: Mutex::new(decisions),
            call_count: Mutex::new(0),
        }
    }

    fn finals(texts: &[&str]) -> Self {
        Self::new(
            texts
                .iter()
                .map(|t| {
                    Ok(Decision::Final {
                        text: t.to_string(),
                    })
                })
                .collect(),
        )
    }

    fn calls(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl DecisionService for ScriptedDecider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn decide(&self, _request: DecisionRequest) -> Result<Decision, DecisionError> {
        let mut count = self.call_count.lock().unwrap();
        let decisions = self.decisions.lock().unwrap();
        if *count >= decisions.len() {
            panic!(
                "ScriptedDecider exhausted: call #{}, have {}",
                *count,
                decisions.len()
            );
        }
        let decision = decisions[*count].clone();
        *count += 1;
        decision
    }
}

fn tool_call(name: &str, input: &str) -> Result<Decision, DecisionError> {
    Ok(Decision::ToolCall {
        name: name.into(),
        input: input.into(),
    })
}

fn final_text(text: &str) -> Result<Decision, DecisionError> {
    Ok(Decision::Final { text: text.into() })
}

fn build_advisor(decider: Arc<ScriptedDecider>) -> Advisor {
    let store = Arc::new(InMemoryStore::new());
    Advisor::new(
        decider,
        Arc::clone(&store) as Arc<dyn ProfileStore>,
        store as Arc<dyn HistoryStore>,
        &AppConfig::default(),
    )
}

// ── Tests ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn direct_answer_pipeline() {
    let decider = Arc::new(ScriptedDecider::finals(&[
        "A data engineering role would suit your SQL background.",
    ]));
    let advisor = build_advisor(Arc::clone(&decider));

    let outcome = advisor.chat("alice", "I know SQL. What roles fit?").await;

    assert_eq!(
        outcome.answer,
        "A data engineering role would suit your SQL background."
    );
    assert_eq!(outcome.reason, TerminalReason::Answered);
    assert_eq!(outcome.iterations, 1);
    assert_eq!(decider.calls(), 1);
}

#[tokio::test]
async fn tool_assisted_turn_persists_profile_and_history() {
    let decider = Arc::new(ScriptedDecider::new(vec![
        tool_call("update_user_profile", "skills=SQL, Python"),
        tool_call("salary_benchmark", "data engineer"),
        final_text("Data engineers with your skills earn a solid range."),
    ]));
    let advisor = build_advisor(Arc::clone(&decider));

    let outcome = advisor
        .chat("bob", "I know SQL and Python. What would I earn as a data engineer?")
        .await;

    assert_eq!(outcome.reason, TerminalReason::Answered);
    assert_eq!(outcome.tool_calls, 2);
    assert_eq!(outcome.iterations, 3);

    // The turn is in the durable log.
    let records = advisor
        .history()
        .list(&UserId::new("bob"), 5)
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].answer.contains("solid range"));
}

#[tokio::test]
async fn multi_turn_conversation_carries_context() {
    let decider = Arc::new(ScriptedDecider::new(vec![
        tool_call("update_user_profile", "goal=product management"),
        final_text("Noted — you're aiming for product management."),
        final_text("Given your PM goal, start with a side project."),
    ]));
    let advisor = build_advisor(Arc::clone(&decider));

    let first = advisor.chat("carol", "I want to move into product management").await;
    let second = advisor.chat("carol", "Where do I start?").await;

    assert!(first.first_time);
    assert!(!second.first_time);
    assert_eq!(decider.calls(), 3);

    let records = advisor
        .history()
        .list(&UserId::new("carol"), 5)
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
    // Newest first.
    assert_eq!(records[0].question, "Where do I start?");
}

#[tokio::test]
async fn iteration_cap_is_respected_end_to_end() {
    // The model never answers — it keeps requesting an unknown tool.
    let decisions: Vec<_> = (0..5).map(|_| tool_call("crystal_ball", "future")).collect();
    let decider = Arc::new(ScriptedDecider::new(decisions));
    let advisor = build_advisor(Arc::clone(&decider));

    let outcome = advisor.chat("dave", "Tell me my future").await;

    assert_eq!(outcome.reason, TerminalReason::MaxIterations);
    assert_eq!(outcome.iterations, 5);
    assert_eq!(decider.calls(), 5);
    assert!(!outcome.answer.is_empty());
}

#[tokio::test]
async fn clearing_history_resets_first_time() {
    let decider = Arc::new(ScriptedDecider::finals(&["one", "two"]));
    let advisor = build_advisor(decider);

    advisor.chat("erin", "hello").await;
    let uid = UserId::new("erin");
    assert!(!advisor.history().is_first_time(&uid).await.unwrap());

    let deleted = advisor.history().clear(&uid).await.unwrap();
    assert_eq!(deleted, 1);
    assert!(advisor.history().is_first_time(&uid).await.unwrap());

    let outcome = advisor.chat("erin", "hello again").await;
    assert!(outcome.first_time);
}
