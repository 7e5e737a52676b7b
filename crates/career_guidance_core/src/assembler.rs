use crate::catalog::{CoursePlan, CATALOG_VERSION};
use crate::contract::{AgentCoordination, GuidanceResponse, NormalizedRequest, RESPONSE_SCHEMA_VERSION};
use crate::fanout::{FanOutReport, LookupKind};
use crate::interpreter::Interpretation;

/// Values produced by the caller rather than derived from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyMetadata {
    pub timestamp: String,
    pub processing_time_ms: u64,
    pub request_fingerprint: String,
}

pub fn assemble(
    request: &NormalizedRequest,
    interpretation: &Interpretation,
    plan: CoursePlan,
    report: &FanOutReport,
    metadata: AssemblyMetadata,
) -> GuidanceResponse {
    let total_courses = plan.total_courses();
    let total_credits = plan.total_credits();
    let career_goal = interpretation.career_goal();

    GuidanceResponse {
        career_goal,
        major: interpretation.major(),
        student_type: interpretation.student_type(),
        core_courses: plan.core_courses,
        elective_courses: plan.elective_courses,
        total_courses,
        total_credits,
        market_analysis: report.embedded_text(LookupKind::JobMarket),
        career_insights: report.embedded_text(LookupKind::CareerMatching),
        project_recommendations: report.embedded_text(LookupKind::ProjectAdvisor),
        catalog_notes: report.embedded_text(LookupKind::CourseCatalog),
        agent_coordination: AgentCoordination {
            agents_involved: LookupKind::ALL.len(),
            agents_succeeded: report.succeeded(),
            coordination_successful: report.all_completed(),
            fanout_mode: report.mode.as_str().to_string(),
            processing_time_ms: metadata.processing_time_ms,
            focus: format!("Single career focus: {career_goal}"),
        },
        query: request.query.clone(),
        session_id: request.session_id.clone(),
        timestamp: metadata.timestamp,
        schema_version: RESPONSE_SCHEMA_VERSION.to_string(),
        catalog_version: CATALOG_VERSION.to_string(),
        request_fingerprint: metadata.request_fingerprint,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::plan_for;
    use crate::fanout::{FanOutMode, LookupOutcome, LookupResult};
    use crate::interpreter::{interpret, MatchStrategy};

    fn sample_report(degraded: Option<LookupKind>) -> FanOutReport {
        FanOutReport {
            mode: FanOutMode::Concurrent,
            results: LookupKind::ALL
                .iter()
                .map(|kind| LookupResult {
                    kind: *kind,
                    outcome: if Some(*kind) == degraded {
                        LookupOutcome::Degraded {
                            error: "timeout".to_string(),
                        }
                    } else {
                        LookupOutcome::Completed {
                            text: format!("{} text", kind.step()),
                        }
                    },
                    duration_ms: 5,
                })
                .collect(),
        }
    }

    fn sample_metadata() -> AssemblyMetadata {
        AssemblyMetadata {
            timestamp: "2024-09-01T00:00:00+00:00".to_string(),
            processing_time_ms: 12,
            request_fingerprint: "abc".to_string(),
        }
    }

    #[test]
    fn assemble_maps_each_lookup_into_its_field() {
        let request = NormalizedRequest {
            query: "I want to become a data engineer".to_string(),
            session_id: "s".to_string(),
        };
        let interpretation = interpret(&request.query, MatchStrategy::FirstMatch);
        let plan = plan_for(
            interpretation.major(),
            interpretation.student_type(),
            interpretation.career_goal(),
        );

        let response = assemble(
            &request,
            &interpretation,
            plan,
            &sample_report(None),
            sample_metadata(),
        );

        assert_eq!(response.market_analysis, "market_analysis text");
        assert_eq!(response.catalog_notes, "course_catalog text");
        assert_eq!(response.career_insights, "career_matching text");
        assert_eq!(response.project_recommendations, "project_recommendations text");
        assert_eq!(
            response.total_courses,
            response.core_courses.len() + response.elective_courses.len()
        );
        assert_eq!(response.total_credits, response.total_courses as u32 * 3);
        assert!(response.agent_coordination.coordination_successful);
        assert_eq!(response.agent_coordination.agents_succeeded, 4);
        assert_eq!(
            response.agent_coordination.focus,
            "Single career focus: Data Engineer"
        );
        assert_eq!(response.catalog_version, CATALOG_VERSION);
    }

    #[test]
    fn degraded_lookup_embeds_error_text() {
        let request = NormalizedRequest {
            query: "anything".to_string(),
            session_id: "s".to_string(),
        };
        let interpretation = interpret(&request.query, MatchStrategy::FirstMatch);
        let plan = plan_for(
            interpretation.major(),
            interpretation.student_type(),
            interpretation.career_goal(),
        );

        let response = assemble(
            &request,
            &interpretation,
            plan,
            &sample_report(Some(LookupKind::ProjectAdvisor)),
            sample_metadata(),
        );

        assert_eq!(response.project_recommendations, "Error: timeout");
        assert_eq!(response.agent_coordination.agents_involved, 4);
        assert_eq!(response.agent_coordination.agents_succeeded, 3);
        assert!(!response.agent_coordination.coordination_successful);
        assert!(!response.core_courses.is_empty());
    }
}
