//! Semester schedule builder — balances class meetings and study blocks.

use std::sync::Arc;

use async_trait::async_trait;
use mentora_core::error::ToolError;
use mentora_core::generator::{generate_json, TextGenerator};
use mentora_core::resource::ResourceStore;
use mentora_core::tool::{Tool, ToolOutput};

const CLASS_DAYS: [&str; 3] = ["Monday", "Wednesday", "Friday"];
const CLASS_TIMES: [&str; 4] = ["9:00 AM", "11:00 AM", "1:00 PM", "3:00 PM"];
const STUDY_DAYS: [&str; 3] = ["Tuesday", "Thursday", "Saturday"];

pub struct SemesterScheduleTool {
    generator: Arc<dyn TextGenerator>,
    resources: Arc<dyn ResourceStore>,
}

impl SemesterScheduleTool {
    pub fn new(generator: Arc<dyn TextGenerator>, resources: Arc<dyn ResourceStore>) -> Self {
        Self {
            generator,
            resources,
        }
    }
}

#[async_trait]
impl Tool for SemesterScheduleTool {
    fn name(&self) -> &str {
        "create_semester_schedule"
    }

    fn description(&self) -> &str {
        "Create a balanced semester schedule for a set of courses"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "courses": {
                    "type": "array",
                    "items": { "type": "string" }
                },
                "credits_target": { "type": "integer", "default": 15 },
                "include_study_time": { "type": "boolean", "default": true }
            },
            "required": ["courses"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<ToolOutput, ToolError> {
        let course_ids = arguments["courses"]
            .as_array()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'courses' array".into()))?;
        let credits_target = arguments["credits_target"].as_i64().unwrap_or(15);
        let include_study_time = arguments["include_study_time"].as_bool().unwrap_or(true);

        let mut course_details = Vec::new();
        let mut total_credits: i64 = 0;
        for course_id in course_ids.iter().filter_map(|v| v.as_str()) {
            if let Some(course) = self
                .resources
                .read(&format!("courses://{course_id}"))
                .await
                .map_err(|err| ToolError::ExecutionFailed {
                    tool_name: self.name().into(),
                    reason: err.to_string(),
                })?
            {
                total_credits += course["credits"].as_i64().unwrap_or(0);
                course_details.push(course);
            }
        }

        if course_details.is_empty() {
            return Ok(ToolOutput {
                success: false,
                output: "No valid courses found".into(),
                data: Some(serde_json::json!({ "schedule": null })),
            });
        }

        let credits_message = if total_credits < credits_target {
            format!("Warning: Schedule has {total_credits} credits, below target of {credits_target}")
        } else if total_credits > credits_target {
            format!("Warning: Schedule has {total_credits} credits, above target of {credits_target}")
        } else {
            format!("Schedule has {total_credits} credits, meeting the target")
        };

        let study_line = if include_study_time {
            "Include study time blocks in the schedule"
        } else {
            "No study time blocks needed"
        };
        let prompt = format!(
            "Create an optimized semester schedule for a student taking these courses:\n\
             {}\n\
             Total credits: {total_credits} (target: {credits_target})\n\
             {study_line}\n\
             Respond with JSON keys: weekly_schedule, workload_distribution, study_blocks",
            serde_json::Value::Array(course_details.clone())
        );

        let schedule = generate_json(self.generator.as_ref(), self.name(), prompt)
            .await
            .filter(|value| value.get("weekly_schedule").is_some())
            .unwrap_or_else(|| fallback_schedule(&course_details, include_study_time));

        Ok(ToolOutput::ok(
            credits_message.clone(),
            serde_json::json!({
                "courses": course_details,
                "total_credits": total_credits,
                "credits_message": credits_message,
                "schedule": schedule,
            }),
        ))
    }
}

/// Alternating-day schedule used when generation is unavailable. Courses
/// worth four or more credits get a second weekly meeting.
fn fallback_schedule(courses: &[serde_json::Value], include_study_time: bool) -> serde_json::Value {
    let mut weekly_schedule = Vec::new();
    let mut day_index = 0usize;
    let mut time_index = 0usize;

    for course in courses {
        let course_id = course["id"].clone();
        let course_name = course["name"].clone();
        weekly_schedule.push(serde_json::json!({
            "day": CLASS_DAYS[day_index % CLASS_DAYS.len()],
            "time": CLASS_TIMES[time_index % CLASS_TIMES.len()],
            "course_id": course_id,
            "course_name": course_name,
        }));

        if course["credits"].as_i64().unwrap_or(0) >= 4 {
            day_index += 1;
            weekly_schedule.push(serde_json::json!({
                "day": CLASS_DAYS[day_index % CLASS_DAYS.len()],
                "time": CLASS_TIMES[time_index % CLASS_TIMES.len()],
                "course_id": course["id"].clone(),
                "course_name": course["name"].clone(),
            }));
        }

        day_index += 1;
        time_index += 1;
    }

    let study_blocks: Vec<serde_json::Value> = if include_study_time {
        courses
            .iter()
            .enumerate()
            .map(|(i, course)| {
                serde_json::json!({
                    "day": STUDY_DAYS[i % STUDY_DAYS.len()],
                    "time": "2:00 PM",
                    "duration": "2 hours",
                    "course_id": course["id"].clone(),
                    "course_name": course["name"].clone(),
                })
            })
            .collect()
    } else {
        Vec::new()
    };

    let light = if include_study_time { "Light" } else { "None" };
    serde_json::json!({
        "weekly_schedule": weekly_schedule,
        "workload_distribution": {
            "Monday": "Moderate",
            "Tuesday": light,
            "Wednesday": "Moderate",
            "Thursday": light,
            "Friday": "Moderate",
            "Saturday": light,
            "Sunday": "None",
        },
        "study_blocks": study_blocks,
    })
}
