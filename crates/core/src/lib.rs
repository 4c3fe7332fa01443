//! # Mentora Core
//!
//! Domain types, traits, and error definitions for the Mentora mentoring
//! runtime. This crate has **zero framework dependencies** — it defines
//! the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every subsystem is defined as a trait here. Implementations live in
//! their respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod context;
pub mod error;
pub mod generator;
pub mod handler;
pub mod message;
pub mod procedure;
pub mod registry;
pub mod resource;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use context::Context;
pub use error::{Error, GeneratorError, ProcedureError, ResourceError, Result, SessionError, ToolError};
pub use generator::{generate_json, GenerationRequest, GenerationResponse, TextGenerator};
pub use handler::Handler;
pub use message::{Message, Response, Role, SessionId};
pub use procedure::{ProcedureResult, ReasoningProcedure, ReasoningTrace, StepSpec, TraceEntry};
pub use registry::{Describe, EntityInfo, EntityRegistry};
pub use resource::ResourceStore;
pub use tool::{Tool, ToolOutput};
