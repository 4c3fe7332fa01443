//! Reasoning procedures — Mentora's structured multi-step analysis layer.
//!
//! A procedure is an ordered pipeline of named steps producing a
//! reasoning trace and an aggregate result. This crate provides:
//!
//! 1. **Pipeline** — the execution engine (strict step order,
//!    abort-on-failure with a partial trace, no retries)
//! 2. **Academic progress analysis** — the five-step reference pipeline
//! 3. **Career guidance** — profile → career paths → development plan

pub mod academic_progress;
pub mod career_guidance;
pub mod pipeline;

pub use academic_progress::{academic_progress_analysis, aggregate_gpa};
pub use career_guidance::career_guidance;
pub use pipeline::{Pipeline, PipelineStep};

#[cfg(test)]
pub(crate) mod test_helpers;
