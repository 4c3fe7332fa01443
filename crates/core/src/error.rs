//! Error types for the Mentora domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.
//!
//! The error taxonomy mirrors the containment policy of the runtime:
//! most faults are recovered close to where they occur (a failed
//! generation becomes a fallback payload, a failed step becomes a
//! partial-trace result, a handler fault becomes an apologetic
//! response). Only `Error::Config` — an empty registry at dispatch
//! time — is allowed to cross the coordinator boundary.

use thiserror::Error;

/// The top-level error type for all Mentora operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Generator errors ---
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    // --- Procedure errors ---
    #[error("Procedure error: {0}")]
    Procedure(#[from] ProcedureError),

    // --- Resource errors ---
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Session errors ---
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    // --- Configuration errors (the only fatal request-path case) ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures of the external text-generation capability.
///
/// Steps that call the generator are expected to catch these and
/// substitute a deterministic fallback payload rather than fail.
#[derive(Debug, Clone, Error)]
pub enum GeneratorError {
    #[error("Generation request failed: {0}")]
    RequestFailed(String),

    #[error("Generator returned unparseable content: {0}")]
    UnparseableContent(String),

    #[error("Generator not configured: {0}")]
    NotConfigured(String),
}

/// Failures inside a reasoning procedure.
#[derive(Debug, Clone, Error)]
pub enum ProcedureError {
    #[error("Step '{step}' failed: {reason}")]
    Step { step: String, reason: String },

    #[error("Required context value missing: {0}")]
    MissingContext(String),
}

impl ProcedureError {
    /// Convenience constructor for a step failure.
    pub fn step(step: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Step {
            step: step.into(),
            reason: reason.into(),
        }
    }
}

/// Failures of the resource-lookup capability.
#[derive(Debug, Clone, Error)]
pub enum ResourceError {
    #[error("Resource read failed for '{uri}': {reason}")]
    ReadFailed { uri: String, reason: String },

    #[error("Malformed resource uri: {0}")]
    MalformedUri(String),
}

/// Failures of tool execution.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool execution failed: {tool_name} — {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}

/// Failures of the session history store.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_error_displays_step_and_reason() {
        let err = Error::Procedure(ProcedureError::step("identify_trends", "bad payload"));
        assert!(err.to_string().contains("identify_trends"));
        assert!(err.to_string().contains("bad payload"));
    }

    #[test]
    fn config_error_displays_message() {
        let err = Error::Config {
            message: "no handlers registered".into(),
        };
        assert!(err.to_string().contains("no handlers registered"));
    }
}
