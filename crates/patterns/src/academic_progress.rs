//! Academic progress analysis — the reference reasoning procedure.
//!
//! Five steps, executed in this fixed order:
//!
//! 1. `assess_current_performance` — pure GPA aggregation over the
//!    student's course list
//! 2. `identify_trends` — performance trends over time (generator-backed)
//! 3. `pinpoint_strengths_weaknesses` — splits course performance into
//!    strengths and weaknesses
//! 4. `generate_improvement_strategies` — strategies targeting the
//!    weaknesses (generator-backed)
//! 5. `create_actionable_plan` — a concrete weekly plan (generator-backed)
//!
//! Each step consumes the previous steps' trace entries verbatim. Every
//! generator-backed step carries a hand-authored fallback payload, so a
//! dead generator degrades the advice without failing the procedure.

use crate::pipeline::{Pipeline, PipelineStep};
use async_trait::async_trait;
use mentora_core::context::Context;
use mentora_core::error::ProcedureError;
use mentora_core::generator::{generate_json, TextGenerator};
use mentora_core::procedure::{ReasoningTrace, StepSpec};
use std::sync::Arc;

/// Registry name of this procedure.
pub const NAME: &str = "academic_progress_analysis";

/// Build the academic progress analysis pipeline.
pub fn academic_progress_analysis(generator: Arc<dyn TextGenerator>) -> Pipeline {
    Pipeline::new(
        NAME,
        "Analyzes student academic progress and identifies areas for improvement",
    )
    .with_step(Box::new(AssessPerformance::new()))
    .with_step(Box::new(IdentifyTrends::new(generator.clone())))
    .with_step(Box::new(PinpointStrengthsWeaknesses::new()))
    .with_step(Box::new(GenerateStrategies::new(generator.clone())))
    .with_step(Box::new(CreateActionPlan::new(generator)))
    .with_synthesis(|trace| {
        let strengths_weaknesses = trace.get("pinpoint_strengths_weaknesses");
        serde_json::json!({
            "performance_assessment": trace.get("assess_current_performance"),
            "strengths": strengths_weaknesses.and_then(|v| v.get("strengths")),
            "weaknesses": strengths_weaknesses.and_then(|v| v.get("weaknesses")),
            "strategies": trace.get("generate_improvement_strategies"),
            "action_plan": trace.get("create_actionable_plan"),
        })
    })
}

/// Aggregate a course list into (gpa, total_credits, total_grade_points).
///
/// Pure: identical course lists always yield identical numbers. An empty
/// list yields zeros — no division fault.
pub fn aggregate_gpa(courses: &[serde_json::Value]) -> (f64, f64, f64) {
    let total_credits: f64 = courses
        .iter()
        .map(|c| c.get("credits").and_then(|v| v.as_f64()).unwrap_or(0.0))
        .sum();
    let total_grade_points: f64 = courses
        .iter()
        .map(|c| {
            let credits = c.get("credits").and_then(|v| v.as_f64()).unwrap_or(0.0);
            let grade_points = c.get("grade_points").and_then(|v| v.as_f64()).unwrap_or(0.0);
            credits * grade_points
        })
        .sum();
    let gpa = if total_credits > 0.0 {
        total_grade_points / total_credits
    } else {
        0.0
    };
    ((gpa * 100.0).round() / 100.0, total_credits, total_grade_points)
}

fn courses_from_context(context: &Context) -> Vec<serde_json::Value> {
    context
        .get("student_data")
        .and_then(|data| data.get("courses"))
        .and_then(|courses| courses.as_array())
        .cloned()
        .unwrap_or_default()
}

// ── Step 1: assess current performance ───────────────────────────────────

struct AssessPerformance {
    spec: StepSpec,
}

impl AssessPerformance {
    fn new() -> Self {
        Self {
            spec: StepSpec::new(
                "assess_current_performance",
                "Assess the student's current academic performance",
            )
            .with_schemas(
                serde_json::json!({"student_data": {"type": "object"}}),
                serde_json::json!({"performance_assessment": {"type": "object"}}),
            ),
        }
    }
}

#[async_trait]
impl PipelineStep for AssessPerformance {
    fn spec(&self) -> &StepSpec {
        &self.spec
    }

    async fn run(
        &self,
        context: &Context,
        _trace: &ReasoningTrace,
    ) -> Result<serde_json::Value, ProcedureError> {
        let courses = courses_from_context(context);
        let (gpa, total_credits, _) = aggregate_gpa(&courses);

        let course_performance: Vec<serde_json::Value> = courses
            .iter()
            .map(|course| {
                let grade_points = course
                    .get("grade_points")
                    .and_then(|v| v.as_f64())
                    .unwrap_or(0.0);
                serde_json::json!({
                    "course": course.get("name").cloned().unwrap_or(serde_json::json!("unknown")),
                    "grade_points": grade_points,
                    "status": if grade_points >= 3.0 { "good" } else { "needs_improvement" },
                })
            })
            .collect();

        Ok(serde_json::json!({
            "gpa": gpa,
            "total_credits": total_credits,
            "overall_assessment": if gpa >= 3.0 { "good" } else { "needs_improvement" },
            "course_performance": course_performance,
        }))
    }
}

// ── Step 2: identify trends ───────────────────────────────────────────────

struct IdentifyTrends {
    spec: StepSpec,
    generator: Arc<dyn TextGenerator>,
}

impl IdentifyTrends {
    fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            spec: StepSpec::new(
                "identify_trends",
                "Identify trends in student performance over time",
            )
            .with_schemas(
                serde_json::json!({
                    "performance_assessment": {"type": "object"},
                    "historical_data": {"type": "array"},
                }),
                serde_json::json!({"trends": {"type": "array"}}),
            ),
            generator,
        }
    }

    fn fallback() -> serde_json::Value {
        serde_json::json!([
            {"trend_type": "stable", "subject": "overall", "confidence": 0.8}
        ])
    }
}

#[async_trait]
impl PipelineStep for IdentifyTrends {
    fn spec(&self) -> &StepSpec {
        &self.spec
    }

    async fn run(
        &self,
        context: &Context,
        trace: &ReasoningTrace,
    ) -> Result<serde_json::Value, ProcedureError> {
        let assessment = trace
            .get("assess_current_performance")
            .cloned()
            .unwrap_or_default();
        let historical = context
            .get("historical_data")
            .cloned()
            .unwrap_or(serde_json::json!([]));

        let prompt = format!(
            "Given this performance assessment:\n{}\n\n\
            And this historical data:\n{}\n\n\
            Identify performance trends. Respond with a JSON array of objects, \
            each with keys: trend_type, subject, confidence.",
            assessment, historical
        );

        Ok(generate_json(self.generator.as_ref(), &self.spec.name, prompt)
            .await
            .filter(|value| value.is_array())
            .unwrap_or_else(Self::fallback))
    }
}

// ── Step 3: pinpoint strengths and weaknesses ─────────────────────────────

struct PinpointStrengthsWeaknesses {
    spec: StepSpec,
}

impl PinpointStrengthsWeaknesses {
    fn new() -> Self {
        Self {
            spec: StepSpec::new(
                "pinpoint_strengths_weaknesses",
                "Pinpoint specific strengths and weaknesses",
            )
            .with_schemas(
                serde_json::json!({
                    "performance_assessment": {"type": "object"},
                    "trends": {"type": "array"},
                }),
                serde_json::json!({
                    "strengths": {"type": "array"},
                    "weaknesses": {"type": "array"},
                }),
            ),
        }
    }
}

#[async_trait]
impl PipelineStep for PinpointStrengthsWeaknesses {
    fn spec(&self) -> &StepSpec {
        &self.spec
    }

    async fn run(
        &self,
        _context: &Context,
        trace: &ReasoningTrace,
    ) -> Result<serde_json::Value, ProcedureError> {
        let mut strengths = Vec::new();
        let mut weaknesses = Vec::new();

        let course_performance = trace
            .get("assess_current_performance")
            .and_then(|v| v.get("course_performance"))
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();

        for course in &course_performance {
            let subject = course
                .get("course")
                .cloned()
                .unwrap_or(serde_json::json!("general"));
            if course.get("status").and_then(|v| v.as_str()) == Some("good") {
                strengths.push(serde_json::json!({
                    "subject": subject,
                    "reason": "consistently strong grades",
                }));
            } else {
                weaknesses.push(serde_json::json!({
                    "subject": subject,
                    "reason": "grades below target",
                }));
            }
        }

        Ok(serde_json::json!({
            "strengths": strengths,
            "weaknesses": weaknesses,
        }))
    }
}

// ── Step 4: generate improvement strategies ───────────────────────────────

struct GenerateStrategies {
    spec: StepSpec,
    generator: Arc<dyn TextGenerator>,
}

impl GenerateStrategies {
    fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            spec: StepSpec::new(
                "generate_improvement_strategies",
                "Generate strategies for improvement",
            )
            .with_schemas(
                serde_json::json!({
                    "weaknesses": {"type": "array"},
                    "student_learning_style": {"type": "string"},
                }),
                serde_json::json!({"strategies": {"type": "array"}}),
            ),
            generator,
        }
    }

    fn fallback() -> serde_json::Value {
        serde_json::json!([
            "Review course materials regularly",
            "Connect with professors during office hours",
            "Form study groups with classmates",
            "Practice time management",
            "Use campus resources like tutoring centers"
        ])
    }
}

#[async_trait]
impl PipelineStep for GenerateStrategies {
    fn spec(&self) -> &StepSpec {
        &self.spec
    }

    async fn run(
        &self,
        context: &Context,
        trace: &ReasoningTrace,
    ) -> Result<serde_json::Value, ProcedureError> {
        let weaknesses = trace
            .get("pinpoint_strengths_weaknesses")
            .and_then(|v| v.get("weaknesses"))
            .cloned()
            .unwrap_or(serde_json::json!([]));
        let learning_style = context
            .get("student_learning_style")
            .and_then(|v| v.as_str())
            .unwrap_or("visual");

        let prompt = format!(
            "A student with a {} learning style has these weaknesses:\n{}\n\n\
            Generate 5 specific, actionable strategies to improve. Respond \
            with a JSON array of strings.",
            learning_style, weaknesses
        );

        Ok(generate_json(self.generator.as_ref(), &self.spec.name, prompt)
            .await
            .filter(|value| value.is_array())
            .unwrap_or_else(Self::fallback))
    }
}

// ── Step 5: create actionable plan ────────────────────────────────────────

struct CreateActionPlan {
    spec: StepSpec,
    generator: Arc<dyn TextGenerator>,
}

impl CreateActionPlan {
    fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            spec: StepSpec::new(
                "create_actionable_plan",
                "Create an actionable improvement plan",
            )
            .with_schemas(
                serde_json::json!({
                    "strategies": {"type": "array"},
                    "student_schedule": {"type": "object"},
                    "student_goals": {"type": "array"},
                }),
                serde_json::json!({"action_plan": {"type": "object"}}),
            ),
            generator,
        }
    }

    fn fallback() -> serde_json::Value {
        serde_json::json!({
            "weekly_actions": [
                {"day": "Monday", "focus": "Review", "activities": ["Review notes", "Identify weak areas"]},
                {"day": "Wednesday", "focus": "Practice", "activities": ["Complete practice problems", "Online tutorials"]},
                {"day": "Friday", "focus": "Assessment", "activities": ["Self-quiz", "Summarize learning"]}
            ],
            "resources": [
                {"name": "Khan Academy", "url": "https://www.khanacademy.org/"},
                {"name": "University Tutoring Center", "url": "Contact academic advisor for details"}
            ],
            "progress_metrics": ["Weekly self-assessment", "Course grade improvement"]
        })
    }
}

#[async_trait]
impl PipelineStep for CreateActionPlan {
    fn spec(&self) -> &StepSpec {
        &self.spec
    }

    async fn run(
        &self,
        context: &Context,
        trace: &ReasoningTrace,
    ) -> Result<serde_json::Value, ProcedureError> {
        let strategies = trace
            .get("generate_improvement_strategies")
            .cloned()
            .unwrap_or(serde_json::json!([]));
        let goals = context
            .get("student_goals")
            .cloned()
            .unwrap_or(serde_json::json!([]));
        let schedule = context
            .get("student_schedule")
            .cloned()
            .unwrap_or(serde_json::json!({}));

        let prompt = format!(
            "Based on these strategies:\n{}\n\n\
            Student goals: {}\nStudent schedule: {}\n\n\
            Create a weekly action plan. Respond with a JSON object with \
            keys: weekly_actions, resources, progress_metrics.",
            strategies, goals, schedule
        );

        Ok(generate_json(self.generator.as_ref(), &self.spec.name, prompt)
            .await
            .filter(|value| value.is_object())
            .unwrap_or_else(Self::fallback))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{FailingGenerator, SequentialMockGenerator, StaticGenerator};
    use mentora_core::procedure::ReasoningProcedure;

    fn student_context() -> Context {
        Context::new().with_value(
            "student_data",
            serde_json::json!({
                "courses": [
                    {"name": "Data Structures", "credits": 4, "grade_points": 3.7},
                    {"name": "Linear Algebra", "credits": 3, "grade_points": 2.3},
                ]
            }),
        )
    }

    #[test]
    fn gpa_aggregation_is_pure() {
        let courses = vec![
            serde_json::json!({"credits": 4, "grade_points": 3.7}),
            serde_json::json!({"credits": 3, "grade_points": 2.3}),
        ];
        let first = aggregate_gpa(&courses);
        let second = aggregate_gpa(&courses);
        assert_eq!(first, second);
        // (4*3.7 + 3*2.3) / 7 = 21.7 / 7 = 3.1
        assert!((first.0 - 3.1).abs() < 1e-9);
        assert!((first.1 - 7.0).abs() < 1e-9);
    }

    #[test]
    fn gpa_of_empty_course_list_is_zero() {
        let (gpa, credits, grade_points) = aggregate_gpa(&[]);
        assert_eq!(gpa, 0.0);
        assert_eq!(credits, 0.0);
        assert_eq!(grade_points, 0.0);
    }

    #[tokio::test]
    async fn five_steps_run_in_declared_order() {
        let generator = Arc::new(StaticGenerator::new("not json"));
        let procedure = academic_progress_analysis(generator);

        let result = procedure.execute(&student_context()).await;
        assert!(result.success);
        assert_eq!(
            result.reasoning_trace.step_names(),
            vec![
                "assess_current_performance",
                "identify_trends",
                "pinpoint_strengths_weaknesses",
                "generate_improvement_strategies",
                "create_actionable_plan",
            ]
        );
    }

    #[tokio::test]
    async fn dead_generator_still_succeeds_with_fallbacks() {
        let generator = Arc::new(FailingGenerator);
        let procedure = academic_progress_analysis(generator);

        let result = procedure.execute(&student_context()).await;
        assert!(result.success, "generator failure must not fail the procedure");

        let payload = result.result.unwrap();
        // Fallback strategies are the hand-authored defaults.
        assert_eq!(
            payload["strategies"][0],
            "Review course materials regularly"
        );
        assert_eq!(payload["action_plan"]["weekly_actions"][0]["day"], "Monday");
    }

    #[tokio::test]
    async fn result_aggregates_assessment_and_plan() {
        let generator = Arc::new(StaticGenerator::new(
            r#"["Target weak courses first"]"#,
        ));
        let procedure = academic_progress_analysis(generator);

        let result = procedure.execute(&student_context()).await;
        let payload = result.result.unwrap();

        assert!((payload["performance_assessment"]["gpa"].as_f64().unwrap() - 3.1).abs() < 1e-9);
        assert_eq!(payload["strengths"][0]["subject"], "Data Structures");
        assert_eq!(payload["weaknesses"][0]["subject"], "Linear Algebra");
        // Generator returned a JSON array, so it is used verbatim.
        assert_eq!(payload["strategies"][0], "Target weak courses first");
    }

    #[tokio::test]
    async fn scripted_outputs_flow_into_their_steps() {
        // Three generator-backed steps, scripted in execution order.
        let generator = Arc::new(SequentialMockGenerator::new(vec![
            r#"[{"trend_type": "improving", "subject": "Data Structures", "confidence": 0.9}]"#,
            r#"["Practice problems daily"]"#,
            r#"{"weekly_actions": [], "resources": [], "progress_metrics": ["gpa"]}"#,
        ]));
        let procedure = academic_progress_analysis(generator.clone());

        let result = procedure.execute(&student_context()).await;
        assert!(result.success);
        assert_eq!(generator.call_count(), 3);

        let trends = result.reasoning_trace.get("identify_trends").unwrap();
        assert_eq!(trends[0]["trend_type"], "improving");
        let payload = result.result.unwrap();
        assert_eq!(payload["strategies"][0], "Practice problems daily");
        assert_eq!(payload["action_plan"]["progress_metrics"][0], "gpa");
    }

    #[tokio::test]
    async fn missing_student_data_is_tolerated() {
        let generator = Arc::new(FailingGenerator);
        let procedure = academic_progress_analysis(generator);

        let result = procedure.execute(&Context::new()).await;
        assert!(result.success);
        let payload = result.result.unwrap();
        assert_eq!(payload["performance_assessment"]["gpa"], 0.0);
    }
}
