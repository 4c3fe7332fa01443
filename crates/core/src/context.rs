//! Request context — the mutable, call-scoped state of one request.
//!
//! The context carries caller-supplied values, the recent chat history,
//! and — once the coordinator has chosen one — the selected reasoning
//! procedure. It lives for exactly one request; cross-request memory is
//! an external collaborator's responsibility.

use crate::message::Message;
use crate::procedure::ReasoningProcedure;
use std::sync::Arc;

/// Call-scoped request state.
///
/// The selected procedure occupies a dedicated typed slot rather than an
/// entry in the value map: it is the one reserved key of the context, and
/// the type system keeps it from colliding with caller data.
#[derive(Default)]
pub struct Context {
    values: serde_json::Map<String, serde_json::Value>,
    history: Vec<Message>,
    procedure: Option<Arc<dyn ReasoningProcedure>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a caller-supplied value.
    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.values.insert(key.into(), value);
    }

    /// Builder-style insert, handy in tests and at call sites.
    pub fn with_value(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a caller-supplied value.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    /// Merge a map of caller-supplied values (later keys win).
    pub fn extend(&mut self, values: serde_json::Map<String, serde_json::Value>) {
        self.values.extend(values);
    }

    /// Replace the chat history visible to this request.
    pub fn set_history(&mut self, history: Vec<Message>) {
        self.history = history;
    }

    /// The chat history visible to this request.
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Stash the coordinator's chosen procedure for the handler to run.
    pub fn select_procedure(&mut self, procedure: Arc<dyn ReasoningProcedure>) {
        self.procedure = Some(procedure);
    }

    /// The procedure selected for this request, if any.
    pub fn selected_procedure(&self) -> Option<&Arc<dyn ReasoningProcedure>> {
        self.procedure.as_ref()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("values", &self.values)
            .field("history_len", &self.history.len())
            .field(
                "selected_procedure",
                &self.procedure.as_ref().map(|p| p.name().to_string()),
            )
            .finish()
    }
}
