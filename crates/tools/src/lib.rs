//! Built-in academic and planning tools.
//!
//! Each tool implements [`mentora_core::Tool`] and is registered by name.
//! The generator-backed tools ask the configured [`TextGenerator`] for a
//! structured plan and substitute a deterministic fallback when the
//! generator is unavailable or returns malformed output, so a tool call
//! degrades rather than fails.

use std::sync::Arc;

use mentora_core::generator::TextGenerator;
use mentora_core::registry::EntityRegistry;
use mentora_core::resource::ResourceStore;
use mentora_core::tool::Tool;

pub mod degree_path;
pub mod gpa;
pub mod schedule;
pub mod study_plan;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use degree_path::DegreePathTool;
pub use gpa::CalculateGpaTool;
pub use schedule::SemesterScheduleTool;
pub use study_plan::StudyPlanTool;

/// The standard tool set, wired to the given generator and resources.
pub fn default_registry(
    generator: Arc<dyn TextGenerator>,
    resources: Arc<dyn ResourceStore>,
) -> EntityRegistry<Arc<dyn Tool>> {
    let mut registry: EntityRegistry<Arc<dyn Tool>> = EntityRegistry::new();
    registry.register(Arc::new(CalculateGpaTool));
    registry.register(Arc::new(StudyPlanTool::new(
        generator.clone(),
        resources.clone(),
    )));
    registry.register(Arc::new(SemesterScheduleTool::new(
        generator.clone(),
        resources.clone(),
    )));
    registry.register(Arc::new(DegreePathTool::new(generator, resources)));
    registry
}
