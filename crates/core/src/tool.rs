//! Tool trait — the abstraction over callable capabilities.
//!
//! Tools are discrete, named operations the mentoring runtime can invoke:
//! calculate a GPA, draft a study plan, lay out a semester schedule.
//! They are registered in an [`EntityRegistry`](crate::registry::EntityRegistry)
//! and looked up by name.

use crate::error::ToolError;
use crate::registry::Describe;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The result of a tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Whether the tool executed successfully
    pub success: bool,

    /// Human-readable output summary
    pub output: String,

    /// Structured result data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ToolOutput {
    /// A successful execution with structured data.
    pub fn ok(output: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            success: true,
            output: output.into(),
            data: Some(data),
        }
    }
}

/// The core tool trait.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "calculate_gpa").
    fn name(&self) -> &str;

    /// A description of what this tool does.
    fn description(&self) -> &str;

    /// JSON Schema describing this tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments.
    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<ToolOutput, ToolError>;
}

impl Describe for Arc<dyn Tool> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }
    fn description(&self) -> &str {
        self.as_ref().description()
    }
}
