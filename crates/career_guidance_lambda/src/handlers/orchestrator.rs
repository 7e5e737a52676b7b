use std::time::Instant;

use career_guidance_core::assembler::{assemble, AssemblyMetadata};
use career_guidance_core::catalog::plan_for;
use career_guidance_core::contract::{
    normalize_request, request_fingerprint, ErrorBody, GuidanceError, GuidanceRequest,
    GuidanceResponse,
};
use career_guidance_core::fanout::{fan_out, LookupInvoker, LookupOutcome};
use career_guidance_core::interpreter::interpret;
use serde_json::{json, Value};

use crate::config::OrchestratorConfig;
use crate::handlers::event::{error_response, normalize_apigw_event, success_response, ApiGatewayResponse};
use crate::telemetry::{log_error, log_info};

const COMPONENT: &str = "orchestrator";

pub async fn handle_orchestrator_event(
    event: Value,
    config: &OrchestratorConfig,
    invoker: &dyn LookupInvoker,
) -> ApiGatewayResponse {
    match orchestrate(event, config, invoker).await {
        Ok(response) => success_response(response),
        Err(error) => {
            log_error(
                COMPONENT,
                "request_failed",
                json!({
                    "error": error.to_string(),
                }),
            );
            error_response(500, &ErrorBody::from_error(&error))
        }
    }
}

pub async fn orchestrate(
    event: Value,
    config: &OrchestratorConfig,
    invoker: &dyn LookupInvoker,
) -> Result<GuidanceResponse, GuidanceError> {
    let started_at = Instant::now();

    let payload = normalize_apigw_event(event).map_err(GuidanceError::InvalidRequest)?;
    let request = serde_json::from_value::<GuidanceRequest>(payload)
        .map_err(|error| GuidanceError::InvalidRequest(format!("Malformed request: {error}")))?;
    let normalized = normalize_request(request, &config.default_query);
    let fingerprint = request_fingerprint(&normalized)?;

    let interpretation = interpret(&normalized.query, config.match_strategy);
    log_info(
        COMPONENT,
        "request_interpreted",
        json!({
            "session_id": normalized.session_id.clone(),
            "request_fingerprint": fingerprint.clone(),
            "match_strategy": config.match_strategy.as_str(),
            "major": interpretation.major(),
            "student_type": interpretation.student_type(),
            "career_goal": interpretation.career_goal(),
            "matched_keywords": {
                "major": interpretation.major.keyword,
                "student_type": interpretation.student_type.keyword,
                "career_goal": interpretation.career_goal.keyword,
            },
        }),
    );

    let report = fan_out(invoker, &normalized, &interpretation, config.fanout_mode).await;
    for result in &report.results {
        if let LookupOutcome::Degraded { error } = &result.outcome {
            log_error(
                COMPONENT,
                "lookup_degraded",
                json!({
                    "session_id": normalized.session_id.clone(),
                    "agent": result.kind.agent_name(),
                    "function_name": config.function_names.for_kind(result.kind),
                    "error": error.clone(),
                    "duration_ms": result.duration_ms,
                }),
            );
        }
    }
    log_info(
        COMPONENT,
        "fanout_completed",
        json!({
            "session_id": normalized.session_id.clone(),
            "fanout_mode": report.mode.as_str(),
            "agents_succeeded": report.succeeded(),
            "durations_ms": report
                .results
                .iter()
                .map(|result| json!({"agent": result.kind.agent_name(), "duration_ms": result.duration_ms}))
                .collect::<Vec<_>>(),
        }),
    );

    let plan = plan_for(
        interpretation.major(),
        interpretation.student_type(),
        interpretation.career_goal(),
    );
    let response = assemble(
        &normalized,
        &interpretation,
        plan,
        &report,
        AssemblyMetadata {
            timestamp: chrono::Utc::now().to_rfc3339(),
            processing_time_ms: u64::try_from(started_at.elapsed().as_millis())
                .unwrap_or(u64::MAX),
            request_fingerprint: fingerprint,
        },
    );

    log_info(
        COMPONENT,
        "response_assembled",
        json!({
            "session_id": response.session_id.clone(),
            "total_courses": response.total_courses,
            "total_credits": response.total_credits,
            "coordination_successful": response.agent_coordination.coordination_successful,
            "processing_time_ms": response.agent_coordination.processing_time_ms,
        }),
    );
    Ok(response)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use career_guidance_core::fanout::LookupKind;

    use super::*;

    struct CapturingInvoker {
        kinds: Mutex<Vec<LookupKind>>,
    }

    impl CapturingInvoker {
        fn new() -> Self {
            Self {
                kinds: Mutex::new(Vec::new()),
            }
        }

        fn kinds(&self) -> Vec<LookupKind> {
            self.kinds.lock().expect("poisoned mutex").clone()
        }
    }

    #[async_trait]
    impl LookupInvoker for CapturingInvoker {
        async fn invoke(&self, kind: LookupKind, _payload: &[u8]) -> Result<Vec<u8>, String> {
            self.kinds.lock().expect("poisoned mutex").push(kind);
            Ok(json!({"response": format!("{} ok", kind.agent_name())})
                .to_string()
                .into_bytes())
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_500_without_fan_out() {
        let invoker = CapturingInvoker::new();
        let response = handle_orchestrator_event(
            json!({"body": "{not json"}),
            &OrchestratorConfig::default(),
            &invoker,
        )
        .await;

        assert_eq!(response.status_code, 500);
        let body = response.body_json().expect("error body should parse");
        assert!(body["error"]
            .as_str()
            .expect("error text")
            .contains("Malformed JSON body"));
        assert_eq!(body["message"], "Error processing course recommendations");
        assert!(invoker.kinds().is_empty());
    }

    #[tokio::test]
    async fn string_body_holding_an_array_is_a_500_without_fan_out() {
        let invoker = CapturingInvoker::new();
        let response = handle_orchestrator_event(
            json!({"body": "[\"I want to become a data engineer\", \"s1\"]"}),
            &OrchestratorConfig::default(),
            &invoker,
        )
        .await;

        assert_eq!(response.status_code, 500);
        let body: ErrorBody = serde_json::from_str(&response.body).expect("error body");
        assert_eq!(
            body,
            ErrorBody::from_error(&GuidanceError::InvalidRequest(
                "Request body must be a JSON object".to_string()
            ))
        );
        assert!(invoker.kinds().is_empty());
    }

    #[tokio::test]
    async fn empty_event_uses_configured_default_query() {
        let invoker = CapturingInvoker::new();
        let config = OrchestratorConfig {
            default_query: "I want to become a data engineer".to_string(),
            ..OrchestratorConfig::default()
        };

        let response = orchestrate(json!({}), &config, &invoker)
            .await
            .expect("orchestration should succeed");

        assert_eq!(response.query, "I want to become a data engineer");
        assert_eq!(response.session_id, "default");
        assert_eq!(response.career_goal.as_str(), "Data Engineer");
        assert_eq!(invoker.kinds().len(), 4);
        assert_eq!(response.market_analysis, "job_market_agent ok");
    }
}
