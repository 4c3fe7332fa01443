//! Career guidance — matches a student's profile to career paths and
//! plans their development.
//!
//! Three steps: profile the student's interests and skills, match them
//! to career paths (generator-backed), and lay out a 3-month development
//! plan (generator-backed). Same engine contracts as every pipeline:
//! strict order, partial trace on failure, deterministic fallbacks when
//! the generator is unavailable.

use crate::pipeline::{Pipeline, PipelineStep};
use async_trait::async_trait;
use mentora_core::context::Context;
use mentora_core::error::ProcedureError;
use mentora_core::generator::{generate_json, TextGenerator};
use mentora_core::procedure::{ReasoningTrace, StepSpec};
use std::sync::Arc;

/// Registry name of this procedure.
pub const NAME: &str = "career_guidance";

/// Build the career guidance pipeline.
pub fn career_guidance(generator: Arc<dyn TextGenerator>) -> Pipeline {
    Pipeline::new(
        NAME,
        "Matches student interests and skills to career paths and plans next steps",
    )
    .with_step(Box::new(ProfileInterestsSkills::new()))
    .with_step(Box::new(MatchCareerPaths::new(generator.clone())))
    .with_step(Box::new(PlanCareerDevelopment::new(generator)))
    .with_synthesis(|trace| {
        serde_json::json!({
            "career_paths": trace
                .get("match_career_paths")
                .and_then(|v| v.get("career_paths")),
            "action_plan": trace.get("plan_career_development"),
        })
    })
}

// ── Step 1: profile interests and skills ──────────────────────────────────

struct ProfileInterestsSkills {
    spec: StepSpec,
}

impl ProfileInterestsSkills {
    fn new() -> Self {
        Self {
            spec: StepSpec::new(
                "profile_interests_skills",
                "Collect the student's interests, skills, courses, and goals",
            )
            .with_schemas(
                serde_json::json!({"student_profile": {"type": "object"}}),
                serde_json::json!({"profile": {"type": "object"}}),
            ),
        }
    }
}

#[async_trait]
impl PipelineStep for ProfileInterestsSkills {
    fn spec(&self) -> &StepSpec {
        &self.spec
    }

    async fn run(
        &self,
        context: &Context,
        _trace: &ReasoningTrace,
    ) -> Result<serde_json::Value, ProcedureError> {
        let profile = context
            .get("student_profile")
            .cloned()
            .unwrap_or(serde_json::json!({}));

        Ok(serde_json::json!({
            "interests": profile.get("interests").cloned().unwrap_or(serde_json::json!([])),
            "skills": profile.get("skills").cloned().unwrap_or(serde_json::json!([])),
            "courses": profile.get("courses").cloned().unwrap_or(serde_json::json!([])),
            "career_goals": profile.get("career_goals").cloned().unwrap_or(serde_json::json!([])),
        }))
    }
}

// ── Step 2: match career paths ────────────────────────────────────────────

struct MatchCareerPaths {
    spec: StepSpec,
    generator: Arc<dyn TextGenerator>,
}

impl MatchCareerPaths {
    fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            spec: StepSpec::new(
                "match_career_paths",
                "Match the profile to potential career paths",
            )
            .with_schemas(
                serde_json::json!({"profile": {"type": "object"}}),
                serde_json::json!({"career_paths": {"type": "array"}}),
            ),
            generator,
        }
    }

    fn fallback(profile: &serde_json::Value) -> serde_json::Value {
        let existing_skills = profile
            .get("skills")
            .and_then(|v| v.as_array())
            .map(|skills| skills.iter().take(2).cloned().collect::<Vec<_>>())
            .filter(|skills| !skills.is_empty())
            .unwrap_or_else(|| vec![serde_json::json!("Not enough information")]);

        serde_json::json!({
            "career_paths": [
                {
                    "path_name": "Based on your interests",
                    "description": "Provide more specific information about your interests and skills for better recommendations",
                    "existing_skills": existing_skills,
                    "skills_to_develop": ["Research skills", "Communication skills"],
                    "recommended_courses": ["Courses related to your interests"],
                    "job_titles": ["Entry-level positions in your field of interest"]
                }
            ]
        })
    }
}

#[async_trait]
impl PipelineStep for MatchCareerPaths {
    fn spec(&self) -> &StepSpec {
        &self.spec
    }

    async fn run(
        &self,
        _context: &Context,
        trace: &ReasoningTrace,
    ) -> Result<serde_json::Value, ProcedureError> {
        let profile = trace
            .get("profile_interests_skills")
            .cloned()
            .unwrap_or(serde_json::json!({}));

        let prompt = format!(
            "Analyze potential career paths for a student with this profile:\n{}\n\n\
            Respond with a JSON object with key career_paths: an array of objects \
            with keys path_name, description, existing_skills, skills_to_develop, \
            recommended_courses, job_titles.",
            profile
        );

        Ok(generate_json(self.generator.as_ref(), &self.spec.name, prompt)
            .await
            .filter(|value| value.get("career_paths").is_some())
            .unwrap_or_else(|| Self::fallback(&profile)))
    }
}

// ── Step 3: plan career development ───────────────────────────────────────

struct PlanCareerDevelopment {
    spec: StepSpec,
    generator: Arc<dyn TextGenerator>,
}

impl PlanCareerDevelopment {
    fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            spec: StepSpec::new(
                "plan_career_development",
                "Create a 3-month career exploration and preparation plan",
            )
            .with_schemas(
                serde_json::json!({"career_paths": {"type": "array"}}),
                serde_json::json!({"action_plan": {"type": "object"}}),
            ),
            generator,
        }
    }

    fn fallback() -> serde_json::Value {
        serde_json::json!({
            "research_activities": [
                "Research job descriptions for positions of interest",
                "Read industry publications and blogs",
                "Watch informational videos about careers of interest"
            ],
            "skill_development": [
                "Identify online courses related to desired skills",
                "Practice projects to build a portfolio",
                "Join student organizations related to career interests"
            ],
            "networking": [
                "Attend university career events",
                "Connect with alumni in fields of interest",
                "Join professional groups online"
            ],
            "timeline": [
                {"month": 1, "focus": "Research and exploration"},
                {"month": 2, "focus": "Skill building and initial networking"},
                {"month": 3, "focus": "Applied projects and informational interviews"}
            ]
        })
    }
}

#[async_trait]
impl PipelineStep for PlanCareerDevelopment {
    fn spec(&self) -> &StepSpec {
        &self.spec
    }

    async fn run(
        &self,
        _context: &Context,
        trace: &ReasoningTrace,
    ) -> Result<serde_json::Value, ProcedureError> {
        let career_paths = trace
            .get("match_career_paths")
            .cloned()
            .unwrap_or(serde_json::json!({}));

        let prompt = format!(
            "Based on these career path recommendations:\n{}\n\n\
            Create a 3-month action plan to explore and prepare for these \
            paths. Respond with a JSON object with keys: research_activities, \
            skill_development, networking, timeline.",
            career_paths
        );

        Ok(generate_json(self.generator.as_ref(), &self.spec.name, prompt)
            .await
            .filter(|value| value.is_object())
            .unwrap_or_else(Self::fallback))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
