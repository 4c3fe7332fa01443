//! The Mentora request path — classify, route, reason, respond.
//!
//! One inbound message flows through:
//!
//! 1. **Classify** — keyword rules map the text to an intent label
//! 2. **Select handler** — registry lookup by label, fallback to the
//!    first registered handler
//! 3. **Select procedure** — handler→procedure route table, fallback to
//!    the first registered procedure
//! 4. **Process** — the handler runs the procedure and composes the
//!    final response, degrading gracefully on any failure
//!
//! Every stage falls back rather than fails; only an empty registry
//! aborts a request.

pub mod advisor;
pub mod classifier;
pub mod coordinator;
pub mod generation;

pub use advisor::AcademicAdvisor;
pub use classifier::{IntentClassifier, IntentRule};
pub use coordinator::{Coordinator, HandlerRegistry, ProcedureRegistry};
pub use generation::ConfiguredGenerator;
