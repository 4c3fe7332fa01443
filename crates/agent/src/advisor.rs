//! The academic advisor — the reference handler implementation.
//!
//! If the coordinator selected a reasoning procedure, the advisor runs it
//! and branches on the outcome: a successful analysis becomes a templated
//! natural-language reply, a failed one becomes a generic advising reply.
//! Nothing escapes this handler as an error — malformed payloads and
//! failed procedures all end in a content-bearing response, with a
//! diagnostic marker in `metadata.error` when something went wrong.

use async_trait::async_trait;
use mentora_core::context::Context;
use mentora_core::handler::Handler;
use mentora_core::message::Response;
use mentora_core::procedure::ProcedureResult;
use tracing::warn;

/// Handler specialized in academic advising and educational guidance.
pub struct AcademicAdvisor;

/// Registry name of this handler (matches the academic intent label).
pub const NAME: &str = "academic_advisor";

#[async_trait]
impl Handler for AcademicAdvisor {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Specialized in academic advising, course selection, and educational guidance"
    }

    async fn process_message(&self, _message: &str, context: &mut Context) -> Response {
        let Some(procedure) = context.selected_procedure().cloned() else {
            return Response::new(fallback_reply())
                .with_meta("handler", serde_json::json!(NAME))
                .with_meta("pattern_used", serde_json::Value::Null);
        };

        let result = procedure.execute(context).await;

        if result.success {
            Response::new(compose_reply(&result))
                .with_meta("handler", serde_json::json!(NAME))
                .with_meta("pattern_used", serde_json::json!(procedure.name()))
        } else {
            warn!(
                procedure = %procedure.name(),
                message = %result.message,
                "procedure execution failed, using fallback response"
            );
            Response::new(fallback_reply())
                .with_meta("handler", serde_json::json!(NAME))
                .with_meta("pattern_used", serde_json::json!(procedure.name()))
                .with_meta("error", serde_json::json!(result.message))
        }
    }
}

/// Template a natural-language reply from a successful analysis.
///
/// Tolerates any missing or oddly-shaped field: every access degrades to
/// a sensible default instead of failing.
fn compose_reply(result: &ProcedureResult) -> String {
    let payload = result.result.clone().unwrap_or(serde_json::Value::Null);

    let Some(action_plan) = payload.get("action_plan").filter(|v| v.is_object()) else {
        return "I've analyzed your academic situation and have some insights to share. \
                To provide more specific guidance, could you tell me more about your \
                current courses, grades, and what specific academic goals you have?"
            .to_string();
    };

    let mut reply = String::from("Based on my analysis of your academic performance, ");

    let subjects = |key: &str| -> Vec<String> {
        payload
            .get(key)
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .take(2)
                    .filter_map(|item| item.get("subject").and_then(|s| s.as_str()))
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    };

    let strengths = subjects("strengths");
    if !strengths.is_empty() {
        reply.push_str(&format!(
            "I can see you're doing well in {}. ",
            strengths.join(", ")
        ));
    }

    let weaknesses = subjects("weaknesses");
    if !weaknesses.is_empty() {
        reply.push_str(&format!(
            "You might want to focus more on {}. ",
            weaknesses.join(", ")
        ));
    }

    reply.push_str("\n\nHere's an action plan to help you improve:\n");

    if let Some(actions) = action_plan.get("weekly_actions").and_then(|v| v.as_array()) {
        for action in actions {
            let day = action.get("day").and_then(|v| v.as_str()).unwrap_or("Any day");
            let focus = action.get("focus").and_then(|v| v.as_str()).unwrap_or("study");
            let activities: Vec<&str> = action
                .get("activities")
                .and_then(|v| v.as_array())
                .map(|items| items.iter().filter_map(|a| a.as_str()).collect())
                .unwrap_or_default();
            reply.push_str(&format!(
                "- {}: Focus on {} with activities like {}\n",
                day,
                focus,
                activities.join(", ")
            ));
        }
    }

    if let Some(resources) = action_plan.get("resources").and_then(|v| v.as_array()) {
        if !resources.is_empty() {
            reply.push_str("\nRecommended resources:\n");
            for resource in resources {
                let name = resource.get("name").and_then(|v| v.as_str()).unwrap_or("Resource");
                let url = resource.get("url").and_then(|v| v.as_str()).unwrap_or("");
                reply.push_str(&format!("- {}: {}\n", name, url));
            }
        }
    }

    reply
}

/// The generic advising reply used whenever no analysis is available.
fn fallback_reply() -> String {
    "I'm here to help with your academic questions and concerns. \
     Could you provide more details about your current academic situation, \
     such as your courses, grades, and any specific challenges you're facing? \
     This will help me provide more tailored advice."
        .to_string()
}
