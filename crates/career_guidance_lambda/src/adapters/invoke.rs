use async_trait::async_trait;
use aws_sdk_lambda::types::InvocationType;
use career_guidance_core::fanout::{LookupInvoker, LookupKind};
use career_guidance_core::interpreter::MatchStrategy;
use serde_json::Value;

use crate::config::FunctionNames;
use crate::handlers::agent::handle_agent_event;
use crate::handlers::event::ApiGatewayResponse;
use crate::smoke::OrchestratorTarget;

/// Invokes downstream agent functions synchronously through the Lambda API.
pub struct AwsLambdaInvoker {
    client: aws_sdk_lambda::Client,
    function_names: FunctionNames,
}

impl AwsLambdaInvoker {
    pub fn new(client: aws_sdk_lambda::Client, function_names: FunctionNames) -> Self {
        Self {
            client,
            function_names,
        }
    }
}

#[async_trait]
impl LookupInvoker for AwsLambdaInvoker {
    async fn invoke(&self, kind: LookupKind, payload: &[u8]) -> Result<Vec<u8>, String> {
        invoke_function(&self.client, self.function_names.for_kind(kind), payload).await
    }
}

/// `RequestResponse` invocation; a reported `FunctionError` becomes an `Err`.
pub async fn invoke_function(
    client: &aws_sdk_lambda::Client,
    function_name: &str,
    payload: &[u8],
) -> Result<Vec<u8>, String> {
    let output = client
        .invoke()
        .function_name(function_name)
        .invocation_type(InvocationType::RequestResponse)
        .set_payload(Some(payload.to_vec().into()))
        .send()
        .await
        .map_err(|error| format!("failed to invoke {function_name}: {error}"))?;

    let response = output
        .payload()
        .map(|blob| blob.as_ref().to_vec())
        .unwrap_or_default();

    if let Some(function_error) = output.function_error() {
        return Err(format!(
            "{function_name} raised {function_error}: {}",
            String::from_utf8_lossy(&response)
        ));
    }
    Ok(response)
}

/// A deployed orchestrator function, invoked directly rather than through API Gateway.
pub struct RemoteOrchestrator {
    client: aws_sdk_lambda::Client,
    function_name: String,
}

impl RemoteOrchestrator {
    pub fn new(client: aws_sdk_lambda::Client, function_name: impl Into<String>) -> Self {
        Self {
            client,
            function_name: function_name.into(),
        }
    }
}

#[async_trait]
impl OrchestratorTarget for RemoteOrchestrator {
    async fn call(&self, event: Value) -> Result<ApiGatewayResponse, String> {
        let payload = serde_json::to_vec(&event)
            .map_err(|error| format!("failed to encode orchestrator event: {error}"))?;
        let bytes = invoke_function(&self.client, &self.function_name, &payload).await?;
        serde_json::from_slice(&bytes).map_err(|error| {
            format!(
                "{} returned an unexpected payload ({error}): {}",
                self.function_name,
                String::from_utf8_lossy(&bytes)
            )
        })
    }
}

/// Runs the agents in-process; used for local runs and the smoke sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalAgentInvoker {
    match_strategy: MatchStrategy,
}

impl LocalAgentInvoker {
    pub fn new(match_strategy: MatchStrategy) -> Self {
        Self { match_strategy }
    }
}

#[async_trait]
impl LookupInvoker for LocalAgentInvoker {
    async fn invoke(&self, kind: LookupKind, payload: &[u8]) -> Result<Vec<u8>, String> {
        let event: Value = serde_json::from_slice(payload)
            .map_err(|error| format!("invalid payload for {}: {error}", kind.agent_name()))?;
        let response = handle_agent_event(kind.agent_name(), event, self.match_strategy);
        serde_json::to_vec(&response)
            .map_err(|error| format!("failed to encode {} response: {error}", kind.agent_name()))
    }
}
