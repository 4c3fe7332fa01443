//! Handler trait — the abstraction over message-processing agents.
//!
//! A handler turns a user message plus request context into a final
//! [`Response`]. Handlers are stateless across calls; any history they
//! need arrives via the context.

use crate::context::Context;
use crate::message::Response;
use crate::registry::Describe;
use async_trait::async_trait;
use std::sync::Arc;

/// The core handler trait.
///
/// `process_message` returns a `Response` directly — there is no error
/// channel. This is the system's most important failure-containment
/// boundary: any internal fault (missing field, unexpected payload shape,
/// failed procedure) must be converted into an apologetic response with
/// `metadata.error` set, never propagated to the caller.
#[async_trait]
pub trait Handler: Send + Sync {
    /// The unique name of this handler (the registry key, matched
    /// against intent labels).
    fn name(&self) -> &str;

    /// What this handler specializes in.
    fn description(&self) -> &str;

    /// Process a message and produce the final response.
    ///
    /// If the context carries a selected reasoning procedure, the handler
    /// decides when and whether to execute it.
    async fn process_message(&self, message: &str, context: &mut Context) -> Response;
}

impl Describe for Arc<dyn Handler> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }
    fn description(&self) -> &str {
        self.as_ref().description()
    }
}
