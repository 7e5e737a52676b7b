//! Static report generators behind the four downstream lookups.

use std::collections::BTreeSet;

use crate::careers;
use crate::catalog::{self, CoursePlan};
use crate::fanout::LookupKind;
use crate::interpreter::{CareerGoal, Interpretation, Major, StudentType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentInput {
    pub query: String,
    pub major: Major,
    pub student_type: StudentType,
    pub career_goal: CareerGoal,
}

impl AgentInput {
    pub fn from_interpretation(query: impl Into<String>, interpretation: &Interpretation) -> Self {
        Self {
            query: query.into(),
            major: interpretation.major(),
            student_type: interpretation.student_type(),
            career_goal: interpretation.career_goal(),
        }
    }

    fn plan(&self) -> CoursePlan {
        catalog::plan_for(self.major, self.student_type, self.career_goal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectIdea {
    pub title: &'static str,
    pub summary: &'static str,
    pub technologies: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillMatch {
    pub matched: Vec<&'static str>,
    pub gaps: Vec<&'static str>,
    pub score_percent: f64,
}

pub fn run_agent(kind: LookupKind, input: &AgentInput) -> String {
    match kind {
        LookupKind::JobMarket => job_market_report(input),
        LookupKind::CourseCatalog => course_catalog_report(input),
        LookupKind::CareerMatching => career_matching_report(input),
        LookupKind::ProjectAdvisor => project_advisor_report(input),
    }
}

pub fn job_market_report(input: &AgentInput) -> String {
    let profile = careers::profile(input.career_goal);
    let mut lines = vec![
        format!("Job market analysis for {} roles", input.career_goal),
        profile.description.to_string(),
        format!("Salary range: {}", profile.salary_range),
        format!("Growth outlook: {}", profile.growth_outlook),
        format!("Top skills in demand: {}", profile.key_skills.join(", ")),
        format!("Hiring industries: {}", profile.industries.join(", ")),
    ];
    if input.student_type == StudentType::Graduate {
        lines.push(
            "Graduate degree holders typically enter at senior or specialist levels.".to_string(),
        );
    }
    lines.join("\n")
}

pub fn course_catalog_report(input: &AgentInput) -> String {
    let plan = input.plan();
    let mut lines = vec![format!(
        "{} {} course plan for {} ({} courses, {} credits)",
        input.major,
        input.student_type,
        input.career_goal,
        plan.total_courses(),
        plan.total_credits()
    )];

    lines.push("Core courses:".to_string());
    for course in &plan.core_courses {
        lines.push(format!("- {} {} ({} credits)", course.code, course.name, course.credits));
    }
    lines.push("Recommended electives:".to_string());
    for course in &plan.elective_courses {
        lines.push(format!(
            "- {} {}: {}",
            course.code,
            course.name,
            course.skills_taught.join(", ")
        ));
    }
    lines.join("\n")
}

pub fn skill_match(input: &AgentInput) -> SkillMatch {
    let profile = careers::profile(input.career_goal);
    let plan = input.plan();
    let taught: BTreeSet<String> = plan
        .courses()
        .flat_map(|course| course.skills_taught.iter())
        .map(|skill| skill.to_ascii_lowercase())
        .collect();

    let (matched, gaps): (Vec<&'static str>, Vec<&'static str>) = profile
        .key_skills
        .iter()
        .copied()
        .partition(|skill| taught.contains(&skill.to_ascii_lowercase()));

    let score_percent = if profile.key_skills.is_empty() {
        0.0
    } else {
        (matched.len() as f64 / profile.key_skills.len() as f64) * 100.0
    };

    SkillMatch {
        matched,
        gaps,
        score_percent,
    }
}

pub fn career_matching_report(input: &AgentInput) -> String {
    let result = skill_match(input);
    let gaps = if result.gaps.is_empty() {
        "none".to_string()
    } else {
        result.gaps.join(", ")
    };

    [
        format!(
            "Career match for {} {} students targeting {}",
            input.major, input.student_type, input.career_goal
        ),
        format!("Match score: {:.0}%", result.score_percent),
        format!("Skills covered by your program: {}", result.matched.join(", ")),
        format!("Skill gaps to close: {gaps}"),
    ]
    .join("\n")
}

pub fn project_ideas(major: Major, career: CareerGoal) -> &'static [ProjectIdea] {
    PROJECT_TABLE
        .iter()
        .find(|(table_major, table_career, _)| *table_major == major && *table_career == career)
        .map(|(_, _, ideas)| *ideas)
        .unwrap_or(PORTFOLIO_DEFAULT)
}

pub fn project_advisor_report(input: &AgentInput) -> String {
    let mut lines = vec![format!(
        "Project recommendations for a {} student targeting {}",
        input.major, input.career_goal
    )];
    for (index, idea) in project_ideas(input.major, input.career_goal).iter().enumerate() {
        lines.push(format!(
            "{}. {}: {} [{}]",
            index + 1,
            idea.title,
            idea.summary,
            idea.technologies.join(", ")
        ));
    }
    lines.join("\n")
}

const PORTFOLIO_DEFAULT: &[ProjectIdea] = &[ProjectIdea {
    title: "Portfolio Website",
    summary: "Publish a personal site that showcases coursework, projects and skills.",
    technologies: &["HTML", "CSS", "JavaScript", "GitHub Pages"],
}];

const PROJECT_TABLE: &[(Major, CareerGoal, &[ProjectIdea])] = &[
    (
        Major::BusinessAnalytics,
        CareerGoal::DataScientist,
        &[
            ProjectIdea {
                title: "Customer Churn Prediction",
                summary: "Model churn risk from subscription data and explain the drivers.",
                technologies: &["Python", "scikit-learn", "pandas"],
            },
            ProjectIdea {
                title: "Sales Forecasting Dashboard",
                summary: "Forecast monthly sales and present scenarios in a dashboard.",
                technologies: &["Python", "Prophet", "Tableau"],
            },
        ],
    ),
    (
        Major::BusinessAnalytics,
        CareerGoal::DataEngineer,
        &[ProjectIdea {
            title: "Retail Data Pipeline",
            summary: "Ingest daily transaction files into a warehouse with tested transformations.",
            technologies: &["Python", "Airflow", "PostgreSQL"],
        }],
    ),
    (
        Major::BusinessAnalytics,
        CareerGoal::BusinessIntelligenceAnalyst,
        &[ProjectIdea {
            title: "Executive KPI Dashboard",
            summary: "Model a star schema and build an executive KPI dashboard on top of it.",
            technologies: &["SQL", "Power BI"],
        }],
    ),
    (
        Major::InformationTechnologyManagement,
        CareerGoal::SoftwareEngineer,
        &[
            ProjectIdea {
                title: "IT Asset Tracker",
                summary: "Build a web application that tracks hardware and license inventory.",
                technologies: &["Java", "Spring Boot", "PostgreSQL"],
            },
            ProjectIdea {
                title: "Help Desk Ticketing System",
                summary: "Design a ticket workflow with roles, SLAs and reporting.",
                technologies: &["TypeScript", "React", "REST"],
            },
        ],
    ),
    (
        Major::InformationTechnologyManagement,
        CareerGoal::BusinessAnalyst,
        &[ProjectIdea {
            title: "Process Improvement Case Study",
            summary: "Map a business process, gather requirements and quantify improvements.",
            technologies: &["BPMN", "Excel", "SQL"],
        }],
    ),
    (
        Major::ComputerScience,
        CareerGoal::DataScientist,
        &[
            ProjectIdea {
                title: "Image Classification Service",
                summary: "Train a convolutional network and serve predictions over HTTP.",
                technologies: &["Python", "PyTorch", "FastAPI"],
            },
            ProjectIdea {
                title: "Recommendation Engine",
                summary: "Build collaborative filtering recommendations from rating data.",
                technologies: &["Python", "Spark", "MLlib"],
            },
        ],
    ),
    (
        Major::ComputerScience,
        CareerGoal::SoftwareEngineer,
        &[
            ProjectIdea {
                title: "Distributed Key-Value Store",
                summary: "Implement a replicated key-value store with leader election.",
                technologies: &["Rust", "gRPC", "Raft"],
            },
            ProjectIdea {
                title: "Open Source Contribution",
                summary: "Land a reviewed change in an established open source project.",
                technologies: &["Git", "GitHub"],
            },
        ],
    ),
    (
        Major::ComputerScience,
        CareerGoal::MachineLearningEngineer,
        &[ProjectIdea {
            title: "Model Serving Platform",
            summary: "Package a model behind a versioned API with monitoring and rollbacks.",
            technologies: &["Python", "Docker", "Kubernetes"],
        }],
    ),
];
