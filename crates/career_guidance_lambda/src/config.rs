use career_guidance_core::contract::DEFAULT_QUERY;
use career_guidance_core::fanout::{FanOutMode, LookupKind};
use career_guidance_core::interpreter::MatchStrategy;
use thiserror::Error;

pub const DEFAULT_FUNCTION_PREFIX: &str = "utd-career-guidance-";
pub const DEFAULT_ORCHESTRATOR_FUNCTION: &str = "utd-career-guidance-orchestrator";

pub const FUNCTION_PREFIX_ENV: &str = "GUIDANCE_FUNCTION_PREFIX";
pub const MATCH_STRATEGY_ENV: &str = "GUIDANCE_MATCH_STRATEGY";
pub const FANOUT_MODE_ENV: &str = "GUIDANCE_FANOUT_MODE";
pub const LOCAL_AGENTS_ENV: &str = "GUIDANCE_LOCAL_AGENTS";
pub const DEFAULT_QUERY_ENV: &str = "GUIDANCE_DEFAULT_QUERY";
pub const AGENT_KIND_ENV: &str = "AGENT_KIND";
pub const ORCHESTRATOR_FUNCTION_ENV: &str = "GUIDANCE_ORCHESTRATOR_FUNCTION";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}={value:?} is not valid, expected {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{key} must be set")]
    Missing { key: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionNames {
    pub job_market: String,
    pub course_catalog: String,
    pub career_matching: String,
    pub project_advisor: String,
}

impl FunctionNames {
    pub fn with_prefix(prefix: &str) -> Self {
        let name = |kind: LookupKind| format!("{prefix}{}", kind.agent_name());
        Self {
            job_market: name(LookupKind::JobMarket),
            course_catalog: name(LookupKind::CourseCatalog),
            career_matching: name(LookupKind::CareerMatching),
            project_advisor: name(LookupKind::ProjectAdvisor),
        }
    }

    pub fn for_kind(&self, kind: LookupKind) -> &str {
        match kind {
            LookupKind::JobMarket => &self.job_market,
            LookupKind::CourseCatalog => &self.course_catalog,
            LookupKind::CareerMatching => &self.career_matching,
            LookupKind::ProjectAdvisor => &self.project_advisor,
        }
    }

    fn slot_mut(&mut self, kind: LookupKind) -> &mut String {
        match kind {
            LookupKind::JobMarket => &mut self.job_market,
            LookupKind::CourseCatalog => &mut self.course_catalog,
            LookupKind::CareerMatching => &mut self.career_matching,
            LookupKind::ProjectAdvisor => &mut self.project_advisor,
        }
    }
}

pub fn function_override_env(kind: LookupKind) -> &'static str {
    match kind {
        LookupKind::JobMarket => "JOB_MARKET_FUNCTION",
        LookupKind::CourseCatalog => "COURSE_CATALOG_FUNCTION",
        LookupKind::CareerMatching => "CAREER_MATCHING_FUNCTION",
        LookupKind::ProjectAdvisor => "PROJECT_ADVISOR_FUNCTION",
    }
}

/// Orchestrator settings, resolved once and passed into the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    pub function_names: FunctionNames,
    pub match_strategy: MatchStrategy,
    pub fanout_mode: FanOutMode,
    pub local_agents: bool,
    pub default_query: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            function_names: FunctionNames::with_prefix(DEFAULT_FUNCTION_PREFIX),
            match_strategy: MatchStrategy::default(),
            fanout_mode: FanOutMode::default(),
            local_agents: false,
            default_query: DEFAULT_QUERY.to_string(),
        }
    }
}

impl OrchestratorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| read_setting(&lookup, key);

        let prefix = read(FUNCTION_PREFIX_ENV).unwrap_or_else(|| DEFAULT_FUNCTION_PREFIX.to_string());
        let mut function_names = FunctionNames::with_prefix(&prefix);
        for kind in LookupKind::ALL {
            if let Some(name) = read(function_override_env(kind)) {
                *function_names.slot_mut(kind) = name;
            }
        }

        let match_strategy = read_match_strategy(&lookup)?;

        let fanout_mode = match read(FANOUT_MODE_ENV) {
            Some(value) => FanOutMode::parse(&value).ok_or(ConfigError::InvalidValue {
                key: FANOUT_MODE_ENV,
                value,
                expected: "concurrent or sequential",
            })?,
            None => FanOutMode::default(),
        };

        let local_agents = match read(LOCAL_AGENTS_ENV) {
            Some(value) => parse_flag(&value).ok_or(ConfigError::InvalidValue {
                key: LOCAL_AGENTS_ENV,
                value,
                expected: "true or false",
            })?,
            None => false,
        };

        Ok(Self {
            function_names,
            match_strategy,
            fanout_mode,
            local_agents,
            default_query: read(DEFAULT_QUERY_ENV).unwrap_or_else(|| DEFAULT_QUERY.to_string()),
        })
    }
}

/// Agent function settings. The agent name is resolved per event so an
/// unknown name answers with an error envelope instead of failing the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub agent: String,
    pub match_strategy: MatchStrategy,
}

impl AgentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let agent = read_setting(&lookup, AGENT_KIND_ENV).ok_or(ConfigError::Missing {
            key: AGENT_KIND_ENV,
        })?;
        let match_strategy = read_match_strategy(&lookup)?;

        Ok(Self {
            agent,
            match_strategy,
        })
    }
}

/// Trimmed value of `key`; blank values count as unset.
fn read_setting(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn read_match_strategy(
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<MatchStrategy, ConfigError> {
    match read_setting(lookup, MATCH_STRATEGY_ENV) {
        Some(value) => MatchStrategy::parse(&value).ok_or(ConfigError::InvalidValue {
            key: MATCH_STRATEGY_ENV,
            value,
            expected: "first_match or scored",
        }),
        None => Ok(MatchStrategy::default()),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
