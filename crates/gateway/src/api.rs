//! HTTP API v1 — the REST surface for the career advisor.
//!
//! Endpoints:
//!
//! - `POST   /v1/chat`                — Send a message, get the advisor's reply
//! - `GET    /v1/history/{user_id}`   — Recent turns, newest first (`?limit=`)
//! - `DELETE /v1/history/{user_id}`   — Clear a user's history and session
//! - `GET    /v1/tools`               — List available tools

use crate::SharedState;
use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    routing::post,
};
use mentora_agent::TerminalReason;
use mentora_core::turn::UserId;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Build the v1 API router. Nest this under "/v1" in the main router.
pub fn v1_router(state: SharedState) -> Router {
    Router::new()
        .route("/chat", post(chat_handler))
        .route(
            "/history/{user_id}",
            get(get_history_handler).delete(clear_history_handler),
        )
        .route("/tools", get(list_tools_handler))
        .with_state(state)
}

// ── Request / Response types ──────────────────────────────────────────────

#[derive(Deserialize)]
struct ChatRequest {
    user_id: String,
    message: String,
}

#[derive(Serialize)]
struct ChatResponse {
    reply: String,
    iterations: u32,
    tool_calls: u32,
    reason: TerminalReason,
    first_time: bool,
    trace: Vec<TraceEntryDto>,
}

#[derive(Serialize)]
struct TraceEntryDto {
    kind: String,
    content: String,
}

#[derive(Deserialize)]
struct HistoryQuery {
    #[serde(default = "default_history_limit")]
    limit: usize,
}

fn default_history_limit() -> usize {
    20
}

#[derive(Serialize)]
struct HistoryResponse {
    turns: Vec<TurnDto>,
    count: usize,
}

#[derive(Serialize)]
struct TurnDto {
    question: String,
    answer: String,
    created_at: String,
}

#[derive(Serialize)]
struct ClearHistoryResponse {
    deleted: u64,
}

#[derive(Serialize)]
struct ToolListResponse {
    tools: Vec<ToolDto>,
    count: usize,
}

#[derive(Serialize)]
struct ToolDto {
    name: String,
    description: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// ── Handlers ──────────────────────────────────────────────────────────────

/// Send a message through the advisor loop. Always returns 200: validation
/// failures and decision-service breakdowns surface as reply text with
/// `reason = "error"`.
async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Json<ChatResponse> {
    info!(user_id = %payload.user_id, "v1/chat request");

    let outcome = state.advisor.chat(&payload.user_id, &payload.message).await;

    let trace: Vec<TraceEntryDto> = outcome
        .trace
        .entries
        .iter()
        .map(|e| TraceEntryDto {
            kind: format!("{:?}", e.kind),
            content: e.content.clone(),
        })
        .collect();

    Json(ChatResponse {
        reply: outcome.answer,
        iterations: outcome.iterations,
        tool_calls: outcome.tool_calls,
        reason: outcome.reason,
        first_time: outcome.first_time,
        trace,
    })
}

async fn get_history_handler(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, (StatusCode, Json<ErrorResponse>)> {
    let uid = UserId::new(user_id);
    let records = state
        .advisor
        .history()
        .list(&uid, query.limit)
        .await
        .map_err(|e| {
            error!(user_id = %uid, error = %e, "History lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("History lookup failed: {e}"),
                }),
            )
        })?;

    let turns: Vec<TurnDto> = records
        .into_iter()
        .map(|r| TurnDto {
            question: r.question,
            answer: r.answer,
            created_at: r.created_at.to_rfc3339(),
        })
        .collect();

    let count = turns.len();
    Ok(Json(HistoryResponse { turns, count }))
}

async fn clear_history_handler(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
) -> Result<Json<ClearHistoryResponse>, (StatusCode, Json<ErrorResponse>)> {
    let uid = UserId::new(user_id.clone());
    let deleted = state.advisor.history().clear(&uid).await.map_err(|e| {
        error!(user_id = %uid, error = %e, "History clear failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("History clear failed: {e}"),
            }),
        )
    })?;

    // Their next turn starts with fresh conversation memory too.
    state.advisor.reset_session(&user_id);

    info!(user_id = %uid, deleted, "History cleared");
    Ok(Json(ClearHistoryResponse { deleted }))
}

async fn list_tools_handler(State(state): State<SharedState>) -> Json<ToolListResponse> {
    let tools: Vec<ToolDto> = state
        .advisor
        .tool_specs()
        .into_iter()
        .map(|s| ToolDto {
            name: s.name,
            description: s.description,
        })
        .collect();
    let count = tools.len();
    Json(ToolListResponse { tools, count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GatewayState, build_router};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use mentora_agent::Advisor;
    use mentora_config::AppConfig;
    use mentora_core::decision::{Decision, DecisionRequest, DecisionService};
    use mentora_core::error::DecisionError;
    use mentora_core::history::HistoryStore;
    use mentora_core::profile::ProfileStore;
    use mentora_store::InMemoryStore;
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Always answers with the same final text.
    struct CannedDecider(String);

    #[async_trait]
    impl DecisionService for CannedDecider {
        fn name(&self) -> &str {
            "canned"
        }
        async fn decide(&self, _request: DecisionRequest) -> Result<Decision, DecisionError> {
            Ok(Decision::Final {
                text: self.0.clone(),
            })
        }
    }

    fn test_router(reply: &str) -> axum::Router {
        let store = Arc::new(InMemoryStore::new());
        let advisor = Advisor::new(
            Arc::new(CannedDecider(reply.to_string())),
            Arc::clone(&store) as Arc<dyn ProfileStore>,
            store as Arc<dyn HistoryStore>,
            &AppConfig::default(),
        );
        build_router(Arc::new(GatewayState { advisor }))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = test_router("unused");
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn chat_returns_the_reply() {
        let app = test_router("Try a data analytics bootcamp.");
        let req = json_request(
            "POST",
            "/v1/chat",
            serde_json::json!({ "user_id": "alice", "message": "What should I learn?" }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["reply"], "Try a data analytics bootcamp.");
        assert_eq!(json["reason"], "answered");
        assert_eq!(json["first_time"], true);
    }

    #[tokio::test]
    async fn chat_with_blank_user_id_is_absorbed() {
        let app = test_router("unused");
        let req = json_request(
            "POST",
            "/v1/chat",
            serde_json::json!({ "user_id": "  ", "message": "hi" }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["reply"], "Error: User ID is required");
        assert_eq!(json["reason"], "error");
    }

    #[tokio::test]
    async fn history_lists_newest_first() {
        let app = test_router("answer");

        for message in ["first question", "second question"] {
            let req = json_request(
                "POST",
                "/v1/chat",
                serde_json::json!({ "user_id": "bob", "message": message }),
            );
            app.clone().oneshot(req).await.unwrap();
        }

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/history/bob?limit=10")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["count"], 2);
        assert_eq!(json["turns"][0]["question"], "second question");
        assert_eq!(json["turns"][1]["question"], "first question");
    }

    #[tokio::test]
    async fn clear_history_reports_deleted_count() {
        let app = test_router("answer");

        let req = json_request(
            "POST",
            "/v1/chat",
            serde_json::json!({ "user_id": "carol", "message": "hello" }),
        );
        app.clone().oneshot(req).await.unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/v1/history/carol")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["deleted"], 1);

        // Gone from subsequent listings.
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/history/carol")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["count"], 0);
    }

    #[tokio::test]
    async fn tools_endpoint_lists_the_catalog() {
        let app = test_router("unused");
        let response = app
            .oneshot(Request::builder().uri("/v1/tools").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["count"], 8);
        let names: Vec<&str> = json["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"salary_benchmark"));
        assert!(names.contains(&"career_doc_search"));
    }
}
