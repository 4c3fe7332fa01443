//! GPA calculator tool — pure arithmetic over a course list.

use async_trait::async_trait;
use mentora_core::error::ToolError;
use mentora_core::tool::{Tool, ToolOutput};

pub struct CalculateGpaTool;

#[async_trait]
impl Tool for CalculateGpaTool {
    fn name(&self) -> &str {
        "calculate_gpa"
    }

    fn description(&self) -> &str {
        "Calculate GPA from a list of courses with credits and grade points"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "courses": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "credits": { "type": "number" },
                            "grade_points": { "type": "number" }
                        }
                    }
                }
            },
            "required": ["courses"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<ToolOutput, ToolError> {
        let courses = arguments["courses"]
            .as_array()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'courses' array".into()))?;

        if courses.is_empty() {
            return Ok(ToolOutput::ok(
                "No courses provided",
                serde_json::json!({
                    "gpa": 0.0,
                    "total_credits": 0.0,
                    "total_grade_points": 0.0,
                }),
            ));
        }

        let total_credits: f64 = courses
            .iter()
            .map(|c| c.get("credits").and_then(|v| v.as_f64()).unwrap_or(0.0))
            .sum();
        let total_grade_points: f64 = courses
            .iter()
            .map(|c| {
                c.get("credits").and_then(|v| v.as_f64()).unwrap_or(0.0)
                    * c.get("grade_points").and_then(|v| v.as_f64()).unwrap_or(0.0)
            })
            .sum();
        let gpa = if total_credits > 0.0 {
            (total_grade_points / total_credits * 100.0).round() / 100.0
        } else {
            0.0
        };

        Ok(ToolOutput::ok(
            format!("Calculated GPA from {} courses", courses.len()),
            serde_json::json!({
                "gpa": gpa,
                "total_credits": total_credits,
                "total_grade_points": (total_grade_points * 100.0).round() / 100.0,
            }),
        ))
    }
}
