//! The coordinator — routes every request from raw message to response.
//!
//! One request moves through a fixed sequence of stages:
//!
//! ```text
//! Received → Classified → HandlerSelected → ProcedureSelected → Responded
//! ```
//!
//! Every stage has an explicit fallback, so every path ends in a
//! response. The single exception: an empty handler or procedure
//! registry is a configuration error — with zero handlers there is no
//! one left to even produce an apology — and surfaces as
//! [`Error::Config`].

use crate::classifier::IntentClassifier;
use mentora_core::context::Context;
use mentora_core::error::{Error, Result};
use mentora_core::handler::Handler;
use mentora_core::message::Response;
use mentora_core::procedure::ReasoningProcedure;
use mentora_core::registry::{EntityInfo, EntityRegistry};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Registries are shared, read-only on the request path.
pub type HandlerRegistry = EntityRegistry<Arc<dyn Handler>>;
pub type ProcedureRegistry = EntityRegistry<Arc<dyn ReasoningProcedure>>;

/// Coordinates classification, handler/procedure selection, and response
/// assembly for each inbound message.
pub struct Coordinator {
    handlers: Arc<HandlerRegistry>,
    procedures: Arc<ProcedureRegistry>,
    classifier: IntentClassifier,
    /// Handler name → procedure name. Sparse by design: unmapped handlers
    /// fall back to the first registered procedure.
    procedure_routes: HashMap<String, String>,
}

impl Coordinator {
    pub fn new(
        handlers: Arc<HandlerRegistry>,
        procedures: Arc<ProcedureRegistry>,
        classifier: IntentClassifier,
    ) -> Self {
        let mut procedure_routes = HashMap::new();
        procedure_routes.insert(
            "academic_advisor".to_string(),
            "academic_progress_analysis".to_string(),
        );
        Self {
            handlers,
            procedures,
            classifier,
            procedure_routes,
        }
    }

    /// Add or replace a handler → procedure route.
    pub fn with_procedure_route(
        mut self,
        handler: impl Into<String>,
        procedure: impl Into<String>,
    ) -> Self {
        self.procedure_routes.insert(handler.into(), procedure.into());
        self
    }

    /// Handle one message end to end. Always returns a response unless a
    /// registry is empty (`Error::Config` — the only fatal outcome).
    pub async fn handle(&self, message: &str, context: &mut Context) -> Result<Response> {
        // Received → Classified
        let intent = self.classifier.classify(message);
        info!(intent, "classified message");

        // Classified → HandlerSelected
        let handler = match self.handlers.get(intent) {
            Some(handler) => handler,
            None => {
                warn!(intent, "no handler for intent, falling back to first registered");
                self.handlers.first().ok_or_else(|| Error::Config {
                    message: "no handlers registered".into(),
                })?
            }
        };
        info!(handler = handler.name(), "selected handler");

        // HandlerSelected → ProcedureSelected
        let routed = self
            .procedure_routes
            .get(handler.name())
            .and_then(|name| self.procedures.get(name));
        let procedure = match routed {
            Some(procedure) => procedure,
            None => {
                warn!(
                    handler = handler.name(),
                    "no procedure routed, falling back to first registered"
                );
                self.procedures.first().ok_or_else(|| Error::Config {
                    message: "no reasoning procedures registered".into(),
                })?
            }
        };
        info!(procedure = procedure.name(), "selected procedure");

        // The handler decides when (and whether) to execute the procedure.
        context.select_procedure(procedure.clone());
        Ok(handler.process_message(message, context).await)
    }

    /// Introspection: all registered handlers.
    pub fn list_handlers(&self) -> Vec<EntityInfo> {
        self.handlers.list()
    }

    /// Introspection: all registered procedures.
    pub fn list_procedures(&self) -> Vec<EntityInfo> {
        self.procedures.list()
    }
}
