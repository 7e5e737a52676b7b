use std::sync::Arc;

use career_guidance_core::fanout::LookupInvoker;
use career_guidance_lambda::adapters::invoke::{AwsLambdaInvoker, LocalAgentInvoker};
use career_guidance_lambda::config::OrchestratorConfig;
use career_guidance_lambda::handlers::event::ApiGatewayResponse;
use career_guidance_lambda::handlers::orchestrator::handle_orchestrator_event;
use career_guidance_lambda::telemetry::log_info;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::{json, Value};

struct Orchestrator {
    config: OrchestratorConfig,
    invoker: Box<dyn LookupInvoker>,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    orchestrator: &Orchestrator,
) -> Result<ApiGatewayResponse, Error> {
    Ok(handle_orchestrator_event(
        event.payload,
        &orchestrator.config,
        orchestrator.invoker.as_ref(),
    )
    .await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = OrchestratorConfig::from_env()?;

    let invoker: Box<dyn LookupInvoker> = if config.local_agents {
        Box::new(LocalAgentInvoker::new(config.match_strategy))
    } else {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Box::new(AwsLambdaInvoker::new(
            aws_sdk_lambda::Client::new(&aws_config),
            config.function_names.clone(),
        ))
    };

    log_info(
        "orchestrator",
        "runtime_started",
        json!({
            "local_agents": config.local_agents,
            "fanout_mode": config.fanout_mode.as_str(),
            "match_strategy": config.match_strategy.as_str(),
            "function_names": [
                config.function_names.job_market.clone(),
                config.function_names.course_catalog.clone(),
                config.function_names.career_matching.clone(),
                config.function_names.project_advisor.clone(),
            ],
        }),
    );

    let orchestrator = Arc::new(Orchestrator { config, invoker });
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let orchestrator = Arc::clone(&orchestrator);
        async move { handle_request(event, &orchestrator).await }
    }))
    .await
}
