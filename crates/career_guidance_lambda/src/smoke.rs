//! Fixed smoke-test sequence run by `guidance_cli smoke`.

use async_trait::async_trait;
use career_guidance_core::contract::GuidanceResponse;
use career_guidance_core::fanout::LookupInvoker;
use serde_json::{json, Value};

use crate::config::OrchestratorConfig;
use crate::handlers::event::ApiGatewayResponse;
use crate::handlers::orchestrator::handle_orchestrator_event;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmokeCase {
    pub name: &'static str,
    pub query: &'static str,
    pub major: &'static str,
    pub student_type: &'static str,
    pub career_goal: &'static str,
}

pub const SMOKE_CASES: &[SmokeCase] = &[
    SmokeCase {
        name: "business_analytics_undergraduate",
        query: "I am a Business Analytics undergraduate student at UTD. I want to become a data scientist.",
        major: "Business Analytics",
        student_type: "Undergraduate",
        career_goal: "Data Scientist",
    },
    SmokeCase {
        name: "computer_science_graduate",
        query: "I am a Computer Science graduate student. I want to become a software engineer.",
        major: "Computer Science",
        student_type: "Graduate",
        career_goal: "Software Engineer",
    },
    SmokeCase {
        name: "default_query",
        query: "I want to become a data scientist",
        major: "Business Analytics",
        student_type: "Undergraduate",
        career_goal: "Data Scientist",
    },
    SmokeCase {
        name: "itm_masters_data_engineer",
        query: "I'm an ITM master's student and I want to become a data engineer",
        major: "Information Technology Management",
        student_type: "Graduate",
        career_goal: "Data Engineer",
    },
    SmokeCase {
        name: "machine_learning_engineer",
        query: "I study CS and want to work as an ML engineer",
        major: "Computer Science",
        student_type: "Undergraduate",
        career_goal: "Machine Learning Engineer",
    },
    SmokeCase {
        name: "unrecognized_career_defaults",
        query: "I want to become a web developer",
        major: "Business Analytics",
        student_type: "Undergraduate",
        career_goal: "Data Scientist",
    },
];

/// Something that answers orchestrator events: the in-process handler or a
/// deployed function.
#[async_trait]
pub trait OrchestratorTarget: Send + Sync {
    async fn call(&self, event: Value) -> Result<ApiGatewayResponse, String>;
}

pub struct LocalOrchestrator<I> {
    config: OrchestratorConfig,
    invoker: I,
}

impl<I: LookupInvoker> LocalOrchestrator<I> {
    pub fn new(config: OrchestratorConfig, invoker: I) -> Self {
        Self { config, invoker }
    }
}

#[async_trait]
impl<I: LookupInvoker> OrchestratorTarget for LocalOrchestrator<I> {
    async fn call(&self, event: Value) -> Result<ApiGatewayResponse, String> {
        Ok(handle_orchestrator_event(event, &self.config, &self.invoker).await)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeCaseResult {
    pub name: &'static str,
    pub failure: Option<String>,
}

impl SmokeCaseResult {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmokeSummary {
    pub results: Vec<SmokeCaseResult>,
}

impl SmokeSummary {
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|result| result.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

pub async fn run_smoke(target: &dyn OrchestratorTarget, cases: &[SmokeCase]) -> SmokeSummary {
    let mut results = Vec::with_capacity(cases.len());
    for (index, case) in cases.iter().enumerate() {
        let event = json!({
            "query": case.query,
            "sessionId": format!("smoke-{}-{}", index + 1, case.name),
        });
        let failure = match target.call(event).await {
            Ok(response) => check_response(case, &response).err(),
            Err(error) => Some(error),
        };
        results.push(SmokeCaseResult {
            name: case.name,
            failure,
        });
    }
    SmokeSummary { results }
}

pub fn check_response(case: &SmokeCase, response: &ApiGatewayResponse) -> Result<(), String> {
    if response.status_code != 200 {
        return Err(format!(
            "expected statusCode 200, got {}: {}",
            response.status_code, response.body
        ));
    }

    let body: GuidanceResponse = serde_json::from_str(&response.body)
        .map_err(|error| format!("response body does not match the schema: {error}"))?;

    let checks = [
        ("major", body.major.as_str(), case.major),
        ("student_type", body.student_type.as_str(), case.student_type),
        ("career_goal", body.career_goal.as_str(), case.career_goal),
    ];
    for (field, actual, expected) in checks {
        if actual != expected {
            return Err(format!("{field}: expected {expected:?}, got {actual:?}"));
        }
    }

    if body.core_courses.is_empty() || body.elective_courses.is_empty() {
        return Err("course lists must not be empty".to_string());
    }
    Ok(())
}
