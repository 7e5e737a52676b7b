use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::interpreter::{CareerGoal, Major, StudentType};

pub const RESPONSE_SCHEMA_VERSION: &str = "v1";
pub const DEFAULT_QUERY: &str = "I want to become a data scientist";
pub const DEFAULT_SESSION_ID: &str = "default";
pub const GENERIC_FAILURE_MESSAGE: &str = "Error processing course recommendations";

#[derive(Debug, Error)]
pub enum GuidanceError {
    #[error("invalid request payload: {0}")]
    InvalidRequest(String),

    #[error("failed to serialize {context}: {source}")]
    Serialization {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl GuidanceError {
    pub fn serialization(context: &'static str, source: serde_json::Error) -> Self {
        Self::Serialization { context, source }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuidanceRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(rename = "sessionId", alias = "session_id", default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedRequest {
    pub query: String,
    pub session_id: String,
}

pub fn normalize_request(request: GuidanceRequest, default_query: &str) -> NormalizedRequest {
    let query = request
        .query
        .map(|query| query.trim().to_string())
        .filter(|query| !query.is_empty())
        .unwrap_or_else(|| default_query.to_string());
    let session_id = request
        .session_id
        .map(|session_id| session_id.trim().to_string())
        .filter(|session_id| !session_id.is_empty())
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

    NormalizedRequest { query, session_id }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseRecord {
    pub code: String,
    pub name: String,
    pub description: String,
    pub credits: u32,
    pub prerequisites: Vec<String>,
    pub skills_taught: Vec<String>,
    pub career_relevance: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentCoordination {
    pub agents_involved: usize,
    pub agents_succeeded: usize,
    pub coordination_successful: bool,
    pub fanout_mode: String,
    pub processing_time_ms: u64,
    pub focus: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuidanceResponse {
    pub career_goal: CareerGoal,
    pub major: Major,
    pub student_type: StudentType,
    pub core_courses: Vec<CourseRecord>,
    pub elective_courses: Vec<CourseRecord>,
    pub total_courses: usize,
    pub total_credits: u32,
    pub market_analysis: String,
    pub career_insights: String,
    pub project_recommendations: String,
    pub catalog_notes: String,
    pub agent_coordination: AgentCoordination,
    pub query: String,
    pub session_id: String,
    pub timestamp: String,
    pub schema_version: String,
    pub catalog_version: String,
    pub request_fingerprint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl ErrorBody {
    pub fn from_error(error: &GuidanceError) -> Self {
        Self {
            error: error.to_string(),
            message: GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

pub fn request_fingerprint(request: &NormalizedRequest) -> Result<String, GuidanceError> {
    let mut hasher = Sha256::new();
    hasher.update(stable_contract_json(request)?);
    Ok(format!("{:x}", hasher.finalize()))
}

pub fn stable_contract_json(value: impl Serialize) -> Result<String, GuidanceError> {
    serde_json::to_string(&value)
        .map_err(|source| GuidanceError::serialization("contract value", source))
}
