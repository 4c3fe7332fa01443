//! Degree path planning — distributes catalog courses across the
//! remaining semesters.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use mentora_core::error::ToolError;
use mentora_core::generator::{generate_json, TextGenerator};
use mentora_core::resource::ResourceStore;
use mentora_core::tool::{Tool, ToolOutput};

const FINAL_SEMESTER: i64 = 8;

pub struct DegreePathTool {
    generator: Arc<dyn TextGenerator>,
    resources: Arc<dyn ResourceStore>,
}

impl DegreePathTool {
    pub fn new(generator: Arc<dyn TextGenerator>, resources: Arc<dyn ResourceStore>) -> Self {
        Self {
            generator,
            resources,
        }
    }
}

#[async_trait]
impl Tool for DegreePathTool {
    fn name(&self) -> &str {
        "plan_degree_path"
    }

    fn description(&self) -> &str {
        "Plan a semester-by-semester degree path to graduation"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "major": { "type": "string" },
                "current_semester": { "type": "integer", "default": 1 },
                "completed_courses": {
                    "type": "array",
                    "items": { "type": "string" }
                }
            },
            "required": ["major"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Value,
    ) -> std::result::Result<ToolOutput, ToolError> {
        let major = arguments["major"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'major'".into()))?
            .to_string();
        let current_semester = arguments["current_semester"]
            .as_i64()
            .unwrap_or(1)
            .clamp(1, FINAL_SEMESTER);
        let completed: Vec<String> = arguments["completed_courses"]
            .as_array()
            .map(|a| {
                a.iter()
                    .filter_map(|v| v.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let catalog = self
            .resources
            .read("courses://catalog")
            .await
            .map_err(|err| ToolError::ExecutionFailed {
                tool_name: self.name().into(),
                reason: err.to_string(),
            })?;

        let Some(catalog) = catalog.as_ref().and_then(|v| v.as_array()).cloned() else {
            return Ok(ToolOutput {
                success: false,
                output: "Could not retrieve course catalog".into(),
                data: Some(serde_json::json!({ "path": null })),
            });
        };

        let prompt = format!(
            "Create a degree path for a student majoring in {major}, currently in \
             semester {current_semester} of {FINAL_SEMESTER}.\n\
             Available courses: {}\n\
             Completed courses: {}\n\
             Respond with JSON: {{\"semesters\": [{{semester_number, recommended_courses, credits, focus_areas}}]}}",
            serde_json::Value::Array(catalog.clone()),
            serde_json::json!(completed),
        );

        let path = generate_json(self.generator.as_ref(), self.name(), prompt)
            .await
            .filter(|value| value.get("semesters").is_some())
            .unwrap_or_else(|| fallback_path(&major, current_semester, &completed, &catalog));

        Ok(ToolOutput::ok(
            format!("Degree path planned for {major}"),
            serde_json::json!({
                "major": major,
                "current_semester": current_semester,
                "completed_courses": completed,
                "path": path,
            }),
        ))
    }
}

/// Spread catalog courses across the remaining semesters, major
/// department first up to 12 credits, then general courses up to 15.
fn fallback_path(
    major: &str,
    current_semester: i64,
    completed: &[String],
    catalog: &[serde_json::Value],
) -> serde_json::Value {
    let mut major_courses: Vec<&serde_json::Value> = catalog
        .iter()
        .filter(|c| c["department"].as_str() == Some(major))
        .collect();
    let mut general_courses: Vec<&serde_json::Value> = catalog
        .iter()
        .filter(|c| c["department"].as_str() != Some(major))
        .collect();
    major_courses.sort_by_key(|c| c["id"].as_str().unwrap_or("").to_string());
    general_courses.sort_by_key(|c| c["id"].as_str().unwrap_or("").to_string());

    let mut recommended: HashSet<String> = completed.iter().cloned().collect();
    let mut semesters = Vec::new();

    for semester_number in current_semester..=FINAL_SEMESTER {
        let mut semester_courses = Vec::new();
        let mut credits: i64 = 0;

        for course in &major_courses {
            let id = course["id"].as_str().unwrap_or("").to_string();
            if !recommended.contains(&id) && credits < 12 {
                credits += course["credits"].as_i64().unwrap_or(3);
                recommended.insert(id.clone());
                semester_courses.push(id);
            }
        }
        for course in &general_courses {
            let id = course["id"].as_str().unwrap_or("").to_string();
            if !recommended.contains(&id) && credits < 15 {
                credits += course["credits"].as_i64().unwrap_or(3);
                recommended.insert(id.clone());
                semester_courses.push(id);
            }
        }

        semesters.push(serde_json::json!({
            "semester_number": semester_number,
            "recommended_courses": semester_courses,
            "credits": credits,
            "focus_areas": [format!("{major} fundamentals"), "General education"],
        }));
    }

    serde_json::json!({ "semesters": semesters })
}
