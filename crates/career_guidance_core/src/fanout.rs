use std::time::Instant;

use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::contract::NormalizedRequest;
use crate::interpreter::Interpretation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupKind {
    JobMarket,
    CourseCatalog,
    CareerMatching,
    ProjectAdvisor,
}

impl LookupKind {
    /// Invocation order in sequential mode; report order in both modes.
    pub const ALL: [LookupKind; 4] = [
        Self::JobMarket,
        Self::CourseCatalog,
        Self::CareerMatching,
        Self::ProjectAdvisor,
    ];

    pub fn agent_name(self) -> &'static str {
        match self {
            Self::JobMarket => "job_market_agent",
            Self::CourseCatalog => "course_catalog_agent",
            Self::CareerMatching => "career_matching_agent",
            Self::ProjectAdvisor => "project_advisor_agent",
        }
    }

    pub fn step(self) -> &'static str {
        match self {
            Self::JobMarket => "market_analysis",
            Self::CourseCatalog => "course_catalog",
            Self::CareerMatching => "career_matching",
            Self::ProjectAdvisor => "project_recommendations",
        }
    }

    /// Accepts `job_market`, `job_market_agent` and dashed variants.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        let name = normalized.strip_suffix("_agent").unwrap_or(&normalized);
        match name {
            "job_market" => Some(Self::JobMarket),
            "course_catalog" => Some(Self::CourseCatalog),
            "career_matching" => Some(Self::CareerMatching),
            "project_advisor" => Some(Self::ProjectAdvisor),
            _ => None,
        }
    }

    pub fn prompt(self, interpretation: &Interpretation) -> String {
        let career = interpretation.career_goal();
        let major = interpretation.major();
        let student_type = interpretation.student_type();
        match self {
            Self::JobMarket => format!(
                "Analyze job market for {career} roles: salary ranges, growth outlook, in-demand skills and hiring industries."
            ),
            Self::CourseCatalog => format!(
                "Recommend {major} courses for a {student_type} student preparing for {career} roles."
            ),
            Self::CareerMatching => format!(
                "Match the {major} {student_type} curriculum against the skills required for {career} roles."
            ),
            Self::ProjectAdvisor => format!(
                "Suggest portfolio projects for a {major} student targeting {career} roles."
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FanOutMode {
    #[default]
    Concurrent,
    Sequential,
}

impl FanOutMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "concurrent" | "parallel" => Some(Self::Concurrent),
            "sequential" | "serial" => Some(Self::Sequential),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Concurrent => "concurrent",
            Self::Sequential => "sequential",
        }
    }
}

#[async_trait]
pub trait LookupInvoker: Send + Sync {
    async fn invoke(&self, kind: LookupKind, payload: &[u8]) -> Result<Vec<u8>, String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Completed { text: String },
    Degraded { error: String },
}

impl LookupOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Text placed into the response document.
    pub fn embedded_text(&self) -> String {
        match self {
            Self::Completed { text } => text.clone(),
            Self::Degraded { error } => format!("Error: {error}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    pub kind: LookupKind,
    pub outcome: LookupOutcome,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanOutReport {
    pub mode: FanOutMode,
    pub results: Vec<LookupResult>,
}

impl FanOutReport {
    pub fn outcome(&self, kind: LookupKind) -> Option<&LookupOutcome> {
        self.results
            .iter()
            .find(|result| result.kind == kind)
            .map(|result| &result.outcome)
    }

    pub fn embedded_text(&self, kind: LookupKind) -> String {
        self.outcome(kind)
            .map(LookupOutcome::embedded_text)
            .unwrap_or_else(|| format!("Error: {} was not invoked", kind.agent_name()))
    }

    pub fn succeeded(&self) -> usize {
        self.results
            .iter()
            .filter(|result| result.outcome.is_completed())
            .count()
    }

    pub fn all_completed(&self) -> bool {
        self.results.len() == LookupKind::ALL.len() && self.succeeded() == self.results.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LookupPayload {
    pub query: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub step: String,
    pub major: String,
    pub student_type: String,
    pub career_goal: String,
    pub prompt: String,
}

impl LookupPayload {
    pub fn new(kind: LookupKind, request: &NormalizedRequest, interpretation: &Interpretation) -> Self {
        Self {
            query: request.query.clone(),
            session_id: request.session_id.clone(),
            step: kind.step().to_string(),
            major: interpretation.major().to_string(),
            student_type: interpretation.student_type().to_string(),
            career_goal: interpretation.career_goal().to_string(),
            prompt: kind.prompt(interpretation),
        }
    }
}

pub async fn fan_out(
    invoker: &dyn LookupInvoker,
    request: &NormalizedRequest,
    interpretation: &Interpretation,
    mode: FanOutMode,
) -> FanOutReport {
    let results = match mode {
        FanOutMode::Concurrent => {
            join_all(
                LookupKind::ALL
                    .iter()
                    .map(|kind| run_lookup(invoker, *kind, request, interpretation)),
            )
            .await
        }
        FanOutMode::Sequential => {
            let mut results = Vec::with_capacity(LookupKind::ALL.len());
            for kind in LookupKind::ALL {
                results.push(run_lookup(invoker, kind, request, interpretation).await);
            }
            results
        }
    };

    FanOutReport { mode, results }
}

async fn run_lookup(
    invoker: &dyn LookupInvoker,
    kind: LookupKind,
    request: &NormalizedRequest,
    interpretation: &Interpretation,
) -> LookupResult {
    let started = Instant::now();
    let payload = LookupPayload::new(kind, request, interpretation);
    let outcome = match serde_json::to_vec(&payload) {
        Ok(bytes) => match invoker.invoke(kind, &bytes).await {
            Ok(response) => decode_lookup_response(&response),
            Err(error) => LookupOutcome::Degraded { error },
        },
        Err(error) => LookupOutcome::Degraded {
            error: format!("failed to serialize lookup payload: {error}"),
        },
    };

    LookupResult {
        kind,
        outcome,
        duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    }
}

/// Decodes a downstream function response into an outcome.
///
/// Accepts the agent envelope `{statusCode, body}` (body as object or JSON
/// string), a bare `{response}` object, and Lambda's `{errorMessage}` shape.
pub fn decode_lookup_response(bytes: &[u8]) -> LookupOutcome {
    let value: Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(error) => {
            return LookupOutcome::Degraded {
                error: format!("undecodable lookup response: {error}"),
            }
        }
    };

    if let Some(message) = value.get("errorMessage").and_then(Value::as_str) {
        return LookupOutcome::Degraded {
            error: message.to_string(),
        };
    }

    let body = match value.get("body") {
        Some(Value::String(text)) => {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.clone()))
        }
        Some(body) => body.clone(),
        None => value.clone(),
    };

    if let Some(status) = value.get("statusCode").and_then(Value::as_u64) {
        if status != 200 {
            let error = body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("lookup returned status {status}"));
            return LookupOutcome::Degraded { error };
        }
    }

    if body.get("success").and_then(Value::as_bool) == Some(false) {
        let error = body
            .get("error")
            .or_else(|| body.get("response"))
            .and_then(Value::as_str)
            .unwrap_or("lookup reported failure")
            .to_string();
        return LookupOutcome::Degraded { error };
    }

    if let Some(text) = body.pointer("/result/response").and_then(Value::as_str) {
        return LookupOutcome::Completed {
            text: text.to_string(),
        };
    }
    if let Some(text) = body.get("response").and_then(Value::as_str) {
        return LookupOutcome::Completed {
            text: text.to_string(),
        };
    }

    match body {
        Value::String(text) => LookupOutcome::Completed { text },
        other => LookupOutcome::Completed {
            text: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::interpreter::{interpret, MatchStrategy};

    #[derive(Default)]
    struct ScriptedInvoker {
        calls: Mutex<Vec<(LookupKind, LookupPayload)>>,
        failing: Vec<LookupKind>,
    }

    #[async_trait]
    impl LookupInvoker for ScriptedInvoker {
        async fn invoke(&self, kind: LookupKind, payload: &[u8]) -> Result<Vec<u8>, String> {
            let decoded: LookupPayload =
                serde_json::from_slice(payload).map_err(|error| error.to_string())?;
            self.calls
                .lock()
                .expect("calls lock should not be poisoned")
                .push((kind, decoded));

            if self.failing.contains(&kind) {
                return Err(format!("{} unavailable", kind.agent_name()));
            }
            let response = json!({
                "statusCode": 200,
                "body": {"result": {"response": format!("{} ok", kind.step())}}
            });
            Ok(response.to_string().into_bytes())
        }
    }

    fn sample_request() -> NormalizedRequest {
        NormalizedRequest {
            query: "I am a Computer Science graduate student. I want to become a software engineer."
                .to_string(),
            session_id: "session-1".to_string(),
        }
    }

    #[tokio::test]
    async fn sequential_fan_out_calls_lookups_in_fixed_order() {
        let invoker = ScriptedInvoker::default();
        let request = sample_request();
        let interpretation = interpret(&request.query, MatchStrategy::FirstMatch);

        let report = fan_out(&invoker, &request, &interpretation, FanOutMode::Sequential).await;

        let calls = invoker.calls.lock().expect("calls lock should not be poisoned");
        let kinds: Vec<LookupKind> = calls.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(kinds, LookupKind::ALL.to_vec());
        assert!(report.all_completed());
        assert_eq!(report.embedded_text(LookupKind::JobMarket), "market_analysis ok");
    }

    #[tokio::test]
    async fn payload_carries_interpreted_fields_and_prompt() {
        let invoker = ScriptedInvoker::default();
        let request = sample_request();
        let interpretation = interpret(&request.query, MatchStrategy::FirstMatch);

        fan_out(&invoker, &request, &interpretation, FanOutMode::Concurrent).await;

        let calls = invoker.calls.lock().expect("calls lock should not be poisoned");
        assert_eq!(calls.len(), 4);
        let (_, payload) = calls
            .iter()
            .find(|(kind, _)| *kind == LookupKind::JobMarket)
            .expect("job market call should be recorded");
        assert_eq!(payload.session_id, "session-1");
        assert_eq!(payload.step, "market_analysis");
        assert_eq!(payload.major, "Computer Science");
        assert_eq!(payload.student_type, "Graduate");
        assert_eq!(payload.career_goal, "Software Engineer");
        assert!(payload.prompt.starts_with("Analyze job market for Software Engineer roles"));
    }

    #[tokio::test]
    async fn one_failing_lookup_degrades_without_aborting_others() {
        let invoker = ScriptedInvoker {
            failing: vec![LookupKind::CareerMatching],
            ..ScriptedInvoker::default()
        };
        let request = sample_request();
        let interpretation = interpret(&request.query, MatchStrategy::FirstMatch);

        let report = fan_out(&invoker, &request, &interpretation, FanOutMode::Concurrent).await;

        assert_eq!(report.succeeded(), 3);
        assert!(!report.all_completed());
        assert_eq!(
            report.embedded_text(LookupKind::CareerMatching),
            "Error: career_matching_agent unavailable"
        );
        let kinds: Vec<LookupKind> = report.results.iter().map(|result| result.kind).collect();
        assert_eq!(kinds, LookupKind::ALL.to_vec());
    }

    #[test]
    fn decode_reads_agent_envelope_with_string_body() {
        let body = json!({"result": {"response": "market text"}}).to_string();
        let bytes = json!({"statusCode": 200, "body": body}).to_string();

        assert_eq!(
            decode_lookup_response(bytes.as_bytes()),
            LookupOutcome::Completed {
                text: "market text".to_string()
            }
        );
    }

    #[test]
    fn decode_degrades_non_200_status_with_body_error() {
        let bytes = json!({"statusCode": 500, "body": {"error": "boom", "agent": "x"}}).to_string();
        assert_eq!(
            decode_lookup_response(bytes.as_bytes()),
            LookupOutcome::Degraded {
                error: "boom".to_string()
            }
        );

        let bytes = json!({"statusCode": 502, "body": {}}).to_string();
        assert_eq!(
            decode_lookup_response(bytes.as_bytes()),
            LookupOutcome::Degraded {
                error: "lookup returned status 502".to_string()
            }
        );
    }

    #[test]
    fn decode_falls_back_to_top_level_response_then_compact_json() {
        let bytes = json!({"response": "plain"}).to_string();
        assert_eq!(
            decode_lookup_response(bytes.as_bytes()),
            LookupOutcome::Completed {
                text: "plain".to_string()
            }
        );

        let bytes = json!({"statusCode": 200, "body": {"jobs": 3}}).to_string();
        assert_eq!(
            decode_lookup_response(bytes.as_bytes()),
            LookupOutcome::Completed {
                text: r#"{"jobs":3}"#.to_string()
            }
        );
    }

    #[test]
    fn decode_degrades_function_errors_and_garbage() {
        let bytes = json!({"errorMessage": "Task timed out", "errorType": "Runtime"}).to_string();
        assert_eq!(
            decode_lookup_response(bytes.as_bytes()),
            LookupOutcome::Degraded {
                error: "Task timed out".to_string()
            }
        );

        let outcome = decode_lookup_response(b"not json");
        assert!(matches!(outcome, LookupOutcome::Degraded { .. }));
    }

    #[test]
    fn decode_degrades_explicit_unsuccessful_response() {
        let bytes = json!({"response": "Error: model unavailable", "success": false}).to_string();
        assert_eq!(
            decode_lookup_response(bytes.as_bytes()),
            LookupOutcome::Degraded {
                error: "Error: model unavailable".to_string()
            }
        );
    }

    #[test]
    fn lookup_kind_parses_agent_names() {
        assert_eq!(LookupKind::parse("job_market_agent"), Some(LookupKind::JobMarket));
        assert_eq!(LookupKind::parse("Course-Catalog"), Some(LookupKind::CourseCatalog));
        assert_eq!(LookupKind::parse("resume_agent"), None);
    }

    #[test]
    fn fan_out_mode_parses_aliases() {
        assert_eq!(FanOutMode::parse("PARALLEL"), Some(FanOutMode::Concurrent));
        assert_eq!(FanOutMode::parse("sequential"), Some(FanOutMode::Sequential));
        assert_eq!(FanOutMode::parse("batched"), None);
    }
}
