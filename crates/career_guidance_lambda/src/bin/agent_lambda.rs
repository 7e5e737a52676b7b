use std::sync::Arc;

use career_guidance_lambda::config::AgentConfig;
use career_guidance_lambda::handlers::agent::{handle_agent_event, AgentResponse};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(event: LambdaEvent<Value>, config: &AgentConfig) -> Result<AgentResponse, Error> {
    Ok(handle_agent_event(
        &config.agent,
        event.payload,
        config.match_strategy,
    ))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Arc::new(AgentConfig::from_env()?);
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let config = Arc::clone(&config);
        async move { handle_request(event, &config).await }
    }))
    .await
}
