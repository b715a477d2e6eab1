//! Tool trait — the abstraction over advisor capabilities.
//!
//! Tools are what give the advisor the ability to consult data during a
//! conversation: salary benchmarks, resume feedback, career guide lookup,
//! and the user's stored profile.
//!
//! Each tool takes a single free-text input and produces a single free-text
//! output; the decision service only ever sees the name and description.

use crate::error::ToolError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What the decision service is told about a tool: name and routing
/// description only, never the implementation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    /// The unique tool name
    pub name: String,

    /// Description of what the tool does (used for routing)
    pub description: String,
}

/// The core Tool trait.
///
/// Each career tool (salary_benchmark, resume_reviewer, career_doc_search,
/// get_user_profile, ...) implements this trait. Tools are registered in the
/// ToolRegistry and made available to the advisor loop.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "salary_benchmark").
    fn name(&self) -> &str;

    /// A description of what this tool does (sent to the decision service).
    fn description(&self) -> &str;

    /// Invoke the tool with a single free-text input.
    async fn invoke(&self, input: &str) -> std::result::Result<String, ToolError>;

    /// Convert this tool into a ToolSpec for the decision service.
    fn to_spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
        }
    }
}

/// A registry of available tools.
///
/// The advisor loop uses this to:
/// 1. Get tool specs to send to the decision service
/// 2. Look up and invoke tools when the decision service requests them
///
/// The registry is assembled once at session start and is read-only at
/// runtime.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Fails if a tool with the same name already exists.
    pub fn register(&mut self, tool: Box<dyn Tool>) -> std::result::Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolError::DuplicateName(name));
        }
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Get all tool specs (for sending to the decision service).
    ///
    /// Sorted by name so the rendered tool list is stable across turns.
    pub fn specs(&self) -> Vec<ToolSpec> {
        let mut specs: Vec<ToolSpec> = self.tools.values().map(|t| t.to_spec()).collect();
        specs.sort_by(|a, b| a.name.cmp(&b.name));
        specs
    }

    /// Invoke a tool by name with a free-text input.
    pub async fn invoke(
        &self,
        name: &str,
        input: &str,
    ) -> std::result::Result<String, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::Unknown(name.to_string()))?;
        tool.invoke(input).await
    }

    /// List all registered tool names.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A simple test tool for unit tests.
    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "Echoes back the input"
        }
        async fn invoke(&self, input: &str) -> Result<String, ToolError> {
            Ok(input.to_string())
        }
    }

    struct FailingTool;

    #[async_trait]
    impl Tool for FailingTool {
        fn name(&self) -> &str {
            "always_fails"
        }
        fn description(&self) -> &str {
            "Fails every time"
        }
        async fn invoke(&self, _input: &str) -> Result<String, ToolError> {
            Err(ToolError::ExecutionFailed {
                tool_name: "always_fails".into(),
                reason: "intentional".into(),
            })
        }
    }

    #[test]
    fn registry_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();
        assert!(registry.get("echo").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();
        let err = registry.register(Box::new(EchoTool)).unwrap_err();
        assert!(matches!(err, ToolError::DuplicateName(name) if name == "echo"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registry_specs_are_sorted() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(FailingTool)).unwrap();
        registry.register(Box::new(EchoTool)).unwrap();
        let specs = registry.specs();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].name, "always_fails");
        assert_eq!(specs[1].name, "echo");
    }

    #[tokio::test]
    async fn registry_invoke_tool() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();
        let output = registry.invoke("echo", "hello world").await.unwrap();
        assert_eq!(output, "hello world");
    }

    #[tokio::test]
    async fn registry_invoke_missing_tool() {
        let registry = ToolRegistry::new();
        let err = registry.invoke("nonexistent", "input").await.unwrap_err();
        assert!(matches!(err, ToolError::Unknown(_)));
    }

    #[tokio::test]
    async fn registry_invoke_propagates_tool_failure() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(FailingTool)).unwrap();
        let err = registry.invoke("always_fails", "x").await.unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed { .. }));
    }
}
