use career_guidance_core::agents::{run_agent, AgentInput};
use career_guidance_core::contract::DEFAULT_QUERY;
use career_guidance_core::fanout::LookupKind;
use career_guidance_core::interpreter::{interpret, CareerGoal, Major, MatchStrategy, StudentType};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::handlers::event::normalize_apigw_event;
use crate::telemetry::{log_error, log_info};

const COMPONENT: &str = "agent";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(rename = "sessionId", alias = "session_id", default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub student_type: Option<String>,
    #[serde(default)]
    pub career_goal: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: Value,
}

pub fn handle_agent_event(agent: &str, event: Value, strategy: MatchStrategy) -> AgentResponse {
    let Some(kind) = LookupKind::parse(agent) else {
        return agent_error(agent, format!("Unknown agent kind '{agent}'"));
    };

    let request = match normalize_apigw_event(event).and_then(|payload| {
        serde_json::from_value::<AgentRequest>(payload)
            .map_err(|error| format!("Malformed agent request: {error}"))
    }) {
        Ok(value) => value,
        Err(message) => return agent_error(kind.agent_name(), message),
    };

    let session_id = request
        .session_id
        .clone()
        .unwrap_or_else(|| "default".to_string());
    let input = match resolve_agent_input(request, strategy) {
        Ok(value) => value,
        Err(message) => return agent_error(kind.agent_name(), message),
    };

    let response = run_agent(kind, &input);
    log_info(
        COMPONENT,
        "agent_completed",
        json!({
            "agent": kind.agent_name(),
            "session_id": session_id.clone(),
            "major": input.major,
            "student_type": input.student_type,
            "career_goal": input.career_goal,
            "response_chars": response.chars().count(),
        }),
    );

    AgentResponse {
        status_code: 200,
        body: json!({
            "agent": kind.agent_name(),
            "query": input.query,
            "sessionId": session_id,
            "result": {"response": response},
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }),
    }
}

/// Explicit fields win over what the query implies; absent fields are interpreted.
pub fn resolve_agent_input(
    request: AgentRequest,
    strategy: MatchStrategy,
) -> Result<AgentInput, String> {
    let query = request
        .query
        .map(|query| query.trim().to_string())
        .filter(|query| !query.is_empty())
        .unwrap_or_else(|| DEFAULT_QUERY.to_string());
    let interpretation = interpret(&query, strategy);

    let major = match request.major.as_deref() {
        Some(label) => Major::parse(label).ok_or_else(|| format!("Unsupported major '{label}'"))?,
        None => interpretation.major(),
    };
    let student_type = match request.student_type.as_deref() {
        Some(label) => StudentType::parse(label)
            .ok_or_else(|| format!("Unsupported student type '{label}'"))?,
        None => interpretation.student_type(),
    };
    let career_goal = match request.career_goal.as_deref() {
        Some(label) => CareerGoal::parse(label)
            .ok_or_else(|| format!("Unsupported career goal '{label}'"))?,
        None => interpretation.career_goal(),
    };

    Ok(AgentInput {
        query,
        major,
        student_type,
        career_goal,
    })
}

fn agent_error(agent: &str, message: String) -> AgentResponse {
    log_error(
        COMPONENT,
        "agent_failed",
        json!({
            "agent": agent,
            "error": message.clone(),
        }),
    );
    AgentResponse {
        status_code: 500,
        body: json!({
            "error": message,
            "agent": agent,
        }),
    }
}
