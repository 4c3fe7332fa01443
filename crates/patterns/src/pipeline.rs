//! The step pipeline engine — the heart of Mentora's reasoning layer.
//!
//! A [`Pipeline`] owns an ordered sequence of boxed steps and executes
//! them strictly in declaration order:
//!
//! 1. Each step reads the request context and the outputs of earlier
//!    steps (via the trace), computes an output, and the engine records
//!    it before the next step starts.
//! 2. If a step fails, execution stops immediately. The returned
//!    [`ProcedureResult`] carries `success = false`, a message derived
//!    from the failure, and the partial trace of every step that did
//!    complete. The trace is never discarded.
//! 3. No step is retried, no output is cached across calls: re-executing
//!    a pipeline re-runs every step from scratch.
//!
//! On success, a synthesis function aggregates the externally meaningful
//! fields out of the full trace into the result payload.

use async_trait::async_trait;
use mentora_core::context::Context;
use mentora_core::error::ProcedureError;
use mentora_core::procedure::{ProcedureResult, ReasoningProcedure, ReasoningTrace, StepSpec};
use tracing::{debug, warn};

/// One unit of work inside a pipeline.
#[async_trait]
pub trait PipelineStep: Send + Sync {
    /// The declared shape of this step.
    fn spec(&self) -> &StepSpec;

    /// Execute the step against the request context and the outputs of
    /// the steps that ran before it.
    async fn run(
        &self,
        context: &Context,
        trace: &ReasoningTrace,
    ) -> Result<serde_json::Value, ProcedureError>;
}

/// Aggregates the final result payload from a completed trace.
type SynthesisFn = Box<dyn Fn(&ReasoningTrace) -> serde_json::Value + Send + Sync>;

/// An ordered, named pipeline of reasoning steps.
///
/// `Pipeline` implements [`ReasoningProcedure`], so a fully built
/// pipeline can be registered and executed anywhere a procedure is
/// expected.
pub struct Pipeline {
    name: String,
    description: String,
    steps: Vec<Box<dyn PipelineStep>>,
    specs: Vec<StepSpec>,
    synthesis: SynthesisFn,
}

impl Pipeline {
    /// Start building a pipeline.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            steps: Vec::new(),
            specs: Vec::new(),
            synthesis: Box::new(|trace| {
                // Default synthesis: the last step's output is the result.
                trace
                    .iter()
                    .last()
                    .map(|entry| entry.output.clone())
                    .unwrap_or(serde_json::Value::Null)
            }),
        }
    }

    /// Append a step. Steps execute in the order they are added.
    pub fn with_step(mut self, step: Box<dyn PipelineStep>) -> Self {
        self.specs.push(step.spec().clone());
        self.steps.push(step);
        self
    }

    /// Replace the default synthesis (last step's output) with a custom
    /// aggregation over the full trace.
    pub fn with_synthesis(
        mut self,
        synthesis: impl Fn(&ReasoningTrace) -> serde_json::Value + Send + Sync + 'static,
    ) -> Self {
        self.synthesis = Box::new(synthesis);
        self
    }
}

#[async_trait]
impl ReasoningProcedure for Pipeline {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn steps(&self) -> &[StepSpec] {
        &self.specs
    }

    async fn execute(&self, context: &Context) -> ProcedureResult {
        let mut trace = ReasoningTrace::new();

        for step in &self.steps {
            let step_name = step.spec().name.clone();
            debug!(procedure = %self.name, step = %step_name, "running step");

            match step.run(context, &trace).await {
                Ok(output) => trace.record(step_name, output),
                Err(err) => {
                    warn!(
                        procedure = %self.name,
                        step = %step_name,
                        error = %err,
                        "step failed, aborting procedure"
                    );
                    return ProcedureResult::failed(
                        format!("'{}' aborted: {}", self.name, err),
                        trace,
                    );
                }
            }
        }

        let result = (self.synthesis)(&trace);
        debug!(procedure = %self.name, steps = trace.len(), "procedure complete");

        ProcedureResult::completed(
            format!("'{}' completed successfully", self.name),
            trace,
            result,
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
