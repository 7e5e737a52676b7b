use career_guidance_core::contract::{ErrorBody, GENERIC_FAILURE_MESSAGE};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

impl ApiGatewayResponse {
    pub fn body_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

const NON_OBJECT_BODY: &str = "Request body must be a JSON object";

/// Unwraps an API Gateway proxy event; direct invocations pass through.
pub fn normalize_apigw_event(event: Value) -> Result<Value, String> {
    let Some(object) = event.as_object() else {
        return Err("Request payload must be a JSON object".to_string());
    };

    let Some(body) = object.get("body") else {
        return Ok(event);
    };

    match body {
        Value::Null => Ok(json!({})),
        Value::Object(_) => Ok(body.clone()),
        Value::String(text) if text.trim().is_empty() => Ok(json!({})),
        Value::String(text) => {
            match serde_json::from_str::<Value>(text)
                .map_err(|error| format!("Malformed JSON body: {error}"))?
            {
                decoded @ Value::Object(_) => Ok(decoded),
                _ => Err(NON_OBJECT_BODY.to_string()),
            }
        }
        _ => Err(NON_OBJECT_BODY.to_string()),
    }
}

pub fn response_headers() -> Value {
    json!({
        "Content-Type": "application/json",
        "Access-Control-Allow-Origin": "*",
        "Access-Control-Allow-Headers": "Content-Type",
        "Access-Control-Allow-Methods": "OPTIONS,POST",
    })
}

pub fn success_response(payload: impl Serialize) -> ApiGatewayResponse {
    json_response(200, payload)
}

pub fn error_response(status_code: u16, body: &ErrorBody) -> ApiGatewayResponse {
    json_response(status_code, body)
}

fn json_response(status_code: u16, payload: impl Serialize) -> ApiGatewayResponse {
    match serde_json::to_string(&payload) {
        Ok(body) => ApiGatewayResponse {
            status_code,
            headers: response_headers(),
            body,
        },
        Err(error) => ApiGatewayResponse {
            status_code: 500,
            headers: response_headers(),
            body: json!({
                "error": format!("failed to serialize response: {error}"),
                "message": GENERIC_FAILURE_MESSAGE,
            })
            .to_string(),
        },
    }
}
