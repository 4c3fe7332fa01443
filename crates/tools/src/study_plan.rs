//! Weekly study plan generation for a single course.

use std::sync::Arc;

use async_trait::async_trait;
use mentora_core::error::ToolError;
use mentora_core::generator::{generate_json, TextGenerator};
use mentora_core::resource::ResourceStore;
use mentora_core::tool::{Tool, ToolOutput};

pub struct StudyPlanTool {
    generator: Arc<dyn TextGenerator>,
    resources: Arc<dyn ResourceStore>,
}

impl StudyPlanTool {
    pub fn new(generator: Arc<dyn TextGenerator>, resources: Arc<dyn ResourceStore>) -> Self {
        Self {
            generator,
            resources,
        }
    }
}

#[async_trait]
impl Tool for StudyPlanTool {
    fn name(&self) -> &str {
        "generate_study_plan"
    }

    fn description(&self) -> &str {
        "Generate a personalized weekly study plan for a course"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "course_id": { "type": "string" },
                "hours_available": { "type": "integer" },
                "goals": {
                    "type": "array",
                    "items": { "type": "string" }
                }
            },
            "required": ["course_id", "hours_available"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<ToolOutput, ToolError> {
        let course_id = arguments["course_id"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'course_id'".into()))?
            .to_string();
        let hours_available = arguments["hours_available"].as_u64().unwrap_or(3);
        let goals = arguments["goals"].as_array().cloned();

        let course = self
            .resources
            .read(&format!("courses://{course_id}"))
            .await
            .map_err(|err| ToolError::ExecutionFailed {
                tool_name: self.name().into(),
                reason: err.to_string(),
            })?;

        let Some(course_data) = course else {
            return Ok(ToolOutput {
                success: false,
                output: "Course not found".into(),
                data: Some(serde_json::json!({
                    "course_id": course_id,
                    "plan": null,
                })),
            });
        };

        let course_name = course_data["name"]
            .as_str()
            .unwrap_or(&course_id)
            .to_string();
        let goals_text = goals
            .as_ref()
            .map(|g| {
                g.iter()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "general mastery of the subject".to_string());

        let prompt = format!(
            "Create a weekly study plan for a student taking {course_name}.\n\
             Course details: {course_data}\n\
             The student has {hours_available} hours available per week for this course.\n\
             Their learning goals are: {goals_text}\n\
             Respond with JSON keys: weekly_schedule, study_strategies, resources, progress_tracking"
        );

        let plan = generate_json(self.generator.as_ref(), self.name(), prompt)
            .await
            .filter(|value| value.get("weekly_schedule").is_some())
            .unwrap_or_else(|| fallback_plan());

        Ok(ToolOutput::ok(
            format!("Study plan created for {course_name}"),
            serde_json::json!({
                "course_id": course_id,
                "course_name": course_name,
                "hours_available": hours_available,
                "goals": goals,
                "plan": plan,
            }),
        ))
    }
}

fn fallback_plan() -> serde_json::Value {
    serde_json::json!({
        "weekly_schedule": [
            {"day": "Monday", "duration": "1 hour", "focus": "Review last week's material"},
            {"day": "Wednesday", "duration": "1 hour", "focus": "Work on new concepts"},
            {"day": "Friday", "duration": "1 hour", "focus": "Practice problems"},
        ],
        "study_strategies": [
            "Active recall through self-testing",
            "Spaced repetition of key concepts",
            "Teaching concepts to others",
        ],
        "resources": [
            {"name": "Course textbook", "type": "Primary reading"},
            {"name": "Online tutorials", "type": "Supplementary material"},
        ],
        "progress_tracking": [
            "Weekly self-assessment quizzes",
            "Track completion of practice problems",
        ],
    })
}
