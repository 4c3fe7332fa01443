//! ReasoningProcedure trait — multi-step reasoning with a structured trace.
//!
//! A reasoning procedure is an ordered pipeline of named steps. Executing
//! it produces a [`ProcedureResult`] carrying a [`ReasoningTrace`]: one
//! entry per step that actually ran, in declaration order. The trace is
//! preserved even when a step fails partway through — partial reasoning
//! is still useful reasoning.

use crate::context::Context;
use crate::registry::Describe;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The declared shape of a single step in a reasoning procedure.
///
/// The input/output schemas are advisory structural contracts: they
/// document what a step consumes and produces but are not enforced at
/// runtime. Consumers must tolerate missing optional fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepSpec {
    /// Step name, unique within its procedure
    pub name: String,

    /// What this step does
    pub description: String,

    /// Advisory schema of the step's inputs
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub input_schema: serde_json::Value,

    /// Advisory schema of the step's output
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub output_schema: serde_json::Value,
}

impl StepSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: serde_json::Value::Null,
            output_schema: serde_json::Value::Null,
        }
    }

    pub fn with_schemas(
        mut self,
        input_schema: serde_json::Value,
        output_schema: serde_json::Value,
    ) -> Self {
        self.input_schema = input_schema;
        self.output_schema = output_schema;
        self
    }
}

/// One completed step's recorded output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    pub step: String,
    pub output: serde_json::Value,
}

/// Ordered record of completed step outputs.
///
/// Entry order always equals the declaration order of the steps that ran.
/// A step that failed (or never ran) has no entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReasoningTrace {
    entries: Vec<TraceEntry>,
}

impl ReasoningTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed step's output.
    pub fn record(&mut self, step: impl Into<String>, output: serde_json::Value) {
        self.entries.push(TraceEntry {
            step: step.into(),
            output,
        });
    }

    /// Look up a completed step's output by name.
    pub fn get(&self, step: &str) -> Option<&serde_json::Value> {
        self.entries
            .iter()
            .find(|entry| entry.step == step)
            .map(|entry| &entry.output)
    }

    /// Step names in completion order.
    pub fn step_names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.step.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraceEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The outcome of executing a reasoning procedure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcedureResult {
    /// Whether every step completed
    pub success: bool,

    /// Human-readable summary (on failure, derived from the failing step)
    pub message: String,

    /// Outputs of every step that ran, in declaration order
    pub reasoning_trace: ReasoningTrace,

    /// Aggregate structured payload — present only on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

impl ProcedureResult {
    /// A fully-completed execution.
    pub fn completed(
        message: impl Into<String>,
        reasoning_trace: ReasoningTrace,
        result: serde_json::Value,
    ) -> Self {
        Self {
            success: true,
            message: message.into(),
            reasoning_trace,
            result: Some(result),
        }
    }

    /// An execution aborted partway through. The trace holds every step
    /// that completed before the failure.
    pub fn failed(message: impl Into<String>, reasoning_trace: ReasoningTrace) -> Self {
        Self {
            success: false,
            message: message.into(),
            reasoning_trace,
            result: None,
        }
    }
}

/// The core reasoning-procedure trait.
///
/// Implementations declare their steps up front and execute them strictly
/// in declaration order. `execute` is infallible at the signature: all
/// failure information travels inside the [`ProcedureResult`], so callers
/// always get a trace to report.
#[async_trait]
pub trait ReasoningProcedure: Send + Sync {
    /// Unique procedure name (the registry key).
    fn name(&self) -> &str;

    /// What this procedure reasons about.
    fn description(&self) -> &str;

    /// The declared steps, in execution order.
    fn steps(&self) -> &[StepSpec];

    /// Run every step in order against the request context.
    async fn execute(&self, context: &Context) -> ProcedureResult;
}

impl Describe for Arc<dyn ReasoningProcedure> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }
    fn description(&self) -> &str {
        self.as_ref().description()
    }
}
