//! OpenAI-compatible decision service.
//!
//! Works with any endpoint exposing `/v1/chat/completions`: OpenAI,
//! OpenRouter, Ollama, vLLM, Together AI, and Gemini's compatibility layer.
//! One non-streaming completion per Thinking step; the reply is parsed with
//! the line protocol in [`crate::parser`].

use crate::parser::parse_decision;
use async_trait::async_trait;
use mentora_core::decision::{Decision, DecisionRequest, DecisionService};
use mentora_core::error::DecisionError;
use mentora_core::tool::ToolSpec;
use mentora_config::AppConfig;
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct OpenAiCompatDecider {
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    client: reqwest::Client,
}

impl OpenAiCompatDecider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            temperature,
            client,
        }
    }

    /// Build a decider from application config.
    pub fn from_config(config: &AppConfig) -> Result<Self, DecisionError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            DecisionError::AuthenticationFailed(
                "no API key configured (set MENTORA_API_KEY or api_key in config.toml)".into(),
            )
        })?;
        Ok(Self::new(
            &config.base_url,
            api_key,
            &config.model,
            config.temperature,
        ))
    }

    /// The protocol block appended to the system prompt: available tools
    /// and the exact reply format.
    fn render_tool_instructions(tools: &[ToolSpec]) -> String {
        let mut out = String::from("You have access to the following tools:\n");
        for tool in tools {
            out.push_str(&format!("- {}: {}\n", tool.name, tool.description));
        }
        out.push_str(
            "\nTo use a tool, reply with exactly two lines:\n\
             TOOL: <tool name>\n\
             INPUT: <input for the tool>\n\
             \n\
             To answer the user directly, reply with the answer text and nothing else. \
             Use at most one tool per reply.",
        );
        out
    }

    fn render_user_content(request: &DecisionRequest) -> String {
        let mut out = String::new();
        if !request.context.is_empty() {
            out.push_str(&request.context);
            out.push_str("\n\n");
        }
        out.push_str("User message: ");
        out.push_str(&request.user_message);
        out
    }
}

#[async_trait]
impl DecisionService for OpenAiCompatDecider {
    fn name(&self) -> &str {
        "openai_compat"
    }

    async fn decide(&self, request: DecisionRequest) -> Result<Decision, DecisionError> {
        let url = format!("{}/chat/completions", self.base_url);

        let system = format!(
            "{}\n\n{}",
            request.system_prompt,
            Self::render_tool_instructions(&request.tools)
        );

        let body = serde_json::json!({
            "model": self.model,
            "temperature": self.temperature,
            "stream": false,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": Self::render_user_content(&request) },
            ],
        });

        debug!(model = %self.model, tools = request.tools.len(), "Sending decision request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DecisionError::Timeout(e.to_string())
                } else {
                    DecisionError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(DecisionError::Unavailable("rate limited by provider".into()));
        }

        if status == 401 || status == 403 {
            return Err(DecisionError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Decision service returned error");
            return Err(DecisionError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse =
            response.json().await.map_err(|e| DecisionError::ApiError {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        parse_decision(&content)
    }
}

// --- OpenAI API types (internal) ---

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    content: Option<String>,
}
