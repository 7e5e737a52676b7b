//! Versioned static course catalog.
//!
//! One table keyed by major and student type. Course plans are derived from it
//! per career goal; nothing else in the workspace carries course data.

use crate::careers;
use crate::contract::CourseRecord;
use crate::interpreter::{CareerGoal, Major, StudentType};

pub const CATALOG_VERSION: &str = "2024-fall.1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseEntry {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub credits: u32,
    pub prerequisites: &'static [&'static str],
    pub skills_taught: &'static [&'static str],
    pub relevance: &'static str,
}

impl CourseEntry {
    pub fn skill_overlap(&self, career: CareerGoal) -> usize {
        let profile = careers::profile(career);
        self.skills_taught
            .iter()
            .filter(|skill| profile.requires_skill(skill))
            .count()
    }

    pub fn to_record(&self, career: CareerGoal) -> CourseRecord {
        CourseRecord {
            code: self.code.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            credits: self.credits,
            prerequisites: self.prerequisites.iter().map(|code| code.to_string()).collect(),
            skills_taught: self.skills_taught.iter().map(|skill| skill.to_string()).collect(),
            career_relevance: format!("{} for {} roles", self.relevance, career),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProgramTable {
    pub major: Major,
    pub student_type: StudentType,
    pub core: &'static [CourseEntry],
    pub electives: &'static [CourseEntry],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoursePlan {
    pub major: Major,
    pub student_type: StudentType,
    pub career_goal: CareerGoal,
    pub core_courses: Vec<CourseRecord>,
    pub elective_courses: Vec<CourseRecord>,
}

impl CoursePlan {
    pub fn total_courses(&self) -> usize {
        self.core_courses.len() + self.elective_courses.len()
    }

    pub fn total_credits(&self) -> u32 {
        self.core_courses
            .iter()
            .chain(self.elective_courses.iter())
            .map(|course| course.credits)
            .sum()
    }

    pub fn courses(&self) -> impl Iterator<Item = &CourseRecord> {
        self.core_courses.iter().chain(self.elective_courses.iter())
    }
}

pub fn program(major: Major, student_type: StudentType) -> Option<&'static ProgramTable> {
    PROGRAMS
        .iter()
        .find(|table| table.major == major && table.student_type == student_type)
}

/// Core courses keep table order; electives are ordered by how many of the
/// career's key skills they teach, ties kept in table order.
pub fn plan_for(major: Major, student_type: StudentType, career: CareerGoal) -> CoursePlan {
    let (core, electives): (&[CourseEntry], &[CourseEntry]) = match program(major, student_type) {
        Some(table) => (table.core, table.electives),
        None => (&[], &[]),
    };

    let mut ranked: Vec<&CourseEntry> = electives.iter().collect();
    ranked.sort_by_key(|entry| std::cmp::Reverse(entry.skill_overlap(career)));

    CoursePlan {
        major,
        student_type,
        career_goal: career,
        core_courses: core.iter().map(|entry| entry.to_record(career)).collect(),
        elective_courses: ranked.into_iter().map(|entry| entry.to_record(career)).collect(),
    }
}

pub fn find_course(major: Major, code: &str) -> Option<&'static CourseEntry> {
    let wanted = normalize_code(code);
    PROGRAMS
        .iter()
        .filter(|table| table.major == major)
        .flat_map(|table| table.core.iter().chain(table.electives.iter()))
        .find(|entry| normalize_code(entry.code) == wanted)
}

fn normalize_code(code: &str) -> String {
    code.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase()
}

const fn course(
    code: &'static str,
    name: &'static str,
    description: &'static str,
    prerequisites: &'static [&'static str],
    skills_taught: &'static [&'static str],
    relevance: &'static str,
) -> CourseEntry {
    CourseEntry {
        code,
        name,
        description,
        credits: 3,
        prerequisites,
        skills_taught,
        relevance,
    }
}

const ESSENTIAL: &str = "Essential foundation";
const CORE_SKILL: &str = "Core technical skill";
const SPECIALIZATION: &str = "Specialized depth";
const PRACTICE: &str = "Hands-on applied experience";

const BUAN_UNDERGRADUATE_CORE: &[CourseEntry] = &[
    course(
        "BUAN 3341",
        "Business Analytics",
        "Introduction to analytical methods for business decision making.",
        &["MATH 1325", "STAT 1342"],
        &["Statistics", "Excel", "Data Visualization"],
        ESSENTIAL,
    ),
    course(
        "BUAN 4341",
        "Advanced Business Analytics",
        "Regression, forecasting and optimization applied to business problems.",
        &["BUAN 3341"],
        &["Statistics", "Python", "Data Mining"],
        CORE_SKILL,
    ),
    course(
        "BUAN 4342",
        "Data Mining and Machine Learning",
        "Supervised and unsupervised learning techniques for business data.",
        &["BUAN 3341"],
        &["Machine Learning", "Python", "Data Mining"],
        CORE_SKILL,
    ),
    course(
        "BUAN 4343",
        "Big Data Analytics",
        "Processing and analyzing large datasets with distributed tools.",
        &["BUAN 4341"],
        &["Big Data", "SQL", "Distributed Systems"],
        CORE_SKILL,
    ),
    course(
        "BUAN 4344",
        "Business Intelligence",
        "Reporting, dashboards and KPI design for business stakeholders.",
        &["BUAN 3341"],
        &["Business Intelligence", "Data Visualization", "Tableau"],
        ESSENTIAL,
    ),
];

const BUAN_UNDERGRADUATE_ELECTIVES: &[CourseEntry] = &[
    course(
        "MIS 4356",
        "Database Systems",
        "Relational database design, normalization and SQL programming.",
        &["MIS 3300"],
        &["SQL", "Database Design", "Data Modeling"],
        CORE_SKILL,
    ),
    course(
        "MIS 4354",
        "Data Visualization",
        "Visual encoding, dashboard design and storytelling with data.",
        &["BUAN 3341"],
        &["Data Visualization", "Tableau", "Communication"],
        SPECIALIZATION,
    ),
    course(
        "MKT 4330",
        "Marketing Analytics",
        "Customer segmentation, campaign measurement and marketing mix analysis.",
        &["BUAN 3341"],
        &["Statistics", "Excel", "Communication"],
        PRACTICE,
    ),
    course(
        "MIS 4357",
        "Cloud Computing",
        "Cloud service models and deploying data workloads on managed platforms.",
        &["MIS 3300"],
        &["Cloud Computing", "ETL"],
        SPECIALIZATION,
    ),
];

const BUAN_GRADUATE_CORE: &[CourseEntry] = &[
    course(
        "BUAN 6341",
        "Advanced Business Analytics",
        "Graduate survey of predictive and prescriptive analytics.",
        &[],
        &["Statistics", "Python", "Machine Learning"],
        ESSENTIAL,
    ),
    course(
        "BUAN 6343",
        "Big Data Analytics",
        "Scalable analytics on distributed storage and compute engines.",
        &["BUAN 6341"],
        &["Big Data", "Distributed Systems", "SQL"],
        CORE_SKILL,
    ),
    course(
        "BUAN 6344",
        "Business Intelligence and Analytics",
        "Enterprise BI architecture, semantic models and reporting.",
        &[],
        &["Business Intelligence", "Data Warehousing", "Data Visualization"],
        CORE_SKILL,
    ),
    course(
        "BUAN 6346",
        "Statistical Computing and Programming",
        "Programming for statistical analysis and reproducible research.",
        &[],
        &["Python", "Statistics"],
        ESSENTIAL,
    ),
    course(
        "BUAN 6348",
        "Advanced Database Systems",
        "Query optimization, transactions and analytical database design.",
        &[],
        &["SQL", "Database Design", "Data Modeling"],
        CORE_SKILL,
    ),
];

const BUAN_GRADUATE_ELECTIVES: &[CourseEntry] = &[
    course(
        "BUAN 6349",
        "Cloud Computing for Analytics",
        "Running analytics workloads on public cloud platforms.",
        &["BUAN 6343"],
        &["Cloud Computing", "Big Data"],
        SPECIALIZATION,
    ),
    course(
        "BUAN 6353",
        "Data Pipeline Engineering",
        "Batch and streaming ingestion, transformation and orchestration.",
        &["BUAN 6348"],
        &["ETL", "Python", "Data Modeling"],
        SPECIALIZATION,
    ),
    course(
        "BUAN 6354",
        "Distributed Systems for Data",
        "Partitioning, replication and consistency in data platforms.",
        &["BUAN 6343"],
        &["Distributed Systems", "Big Data"],
        SPECIALIZATION,
    ),
    course(
        "BUAN 6356",
        "Data Security and Governance",
        "Data privacy, access control and governance frameworks.",
        &[],
        &["Data Governance", "Communication"],
        SPECIALIZATION,
    ),
    course(
        "BUAN 6358",
        "Analytics Capstone Project",
        "Team project delivering an end-to-end analytics solution for a sponsor.",
        &["BUAN 6341"],
        &["Python", "Data Visualization", "Communication", "Project Management"],
        PRACTICE,
    ),
];

const MIS_UNDERGRADUATE_CORE: &[CourseEntry] = &[
    course(
        "MIS 3300",
        "Business Programming",
        "Programming fundamentals for business applications.",
        &[],
        &["Python", "Software Engineering"],
        ESSENTIAL,
    ),
    course(
        "MIS 3310",
        "Database Systems I",
        "Data modeling and SQL for information systems.",
        &["MIS 3300"],
        &["SQL", "Database Design", "Data Modeling"],
        ESSENTIAL,
    ),
    course(
        "MIS 4350",
        "Data Mining and Business Intelligence",
        "Pattern discovery and BI reporting on enterprise data.",
        &["MIS 3310"],
        &["Data Mining", "Business Intelligence"],
        CORE_SKILL,
    ),
    course(
        "MIS 4352",
        "Machine Learning for Business",
        "Applied machine learning for business prediction tasks.",
        &["MIS 3300"],
        &["Machine Learning", "Python"],
        CORE_SKILL,
    ),
    course(
        "MIS 4353",
        "Big Data Analytics",
        "Working with large-scale data using distributed frameworks.",
        &["MIS 3310"],
        &["Big Data", "Distributed Systems"],
        CORE_SKILL,
    ),
];

const MIS_UNDERGRADUATE_ELECTIVES: &[CourseEntry] = &[
    course(
        "MIS 4354",
        "Data Visualization",
        "Dashboard and report design for decision makers.",
        &["MIS 3310"],
        &["Data Visualization", "Tableau"],
        SPECIALIZATION,
    ),
    course(
        "MIS 4355",
        "Software Engineering",
        "Requirements, design and testing of information systems.",
        &["MIS 3300"],
        &["Software Engineering", "Requirements Analysis", "System Design"],
        SPECIALIZATION,
    ),
    course(
        "MIS 4357",
        "Cloud Computing",
        "Cloud architectures and services for enterprise IT.",
        &["MIS 3300"],
        &["Cloud Computing", "ETL"],
        SPECIALIZATION,
    ),
    course(
        "BUAN 3341",
        "Business Analytics",
        "Introduction to analytical methods for business decision making.",
        &["MATH 1325", "STAT 1342"],
        &["Statistics", "Excel"],
        PRACTICE,
    ),
];

const MIS_GRADUATE_CORE: &[CourseEntry] = &[
    course(
        "MIS 6341",
        "Advanced Information Technology Management",
        "Strategic management of enterprise technology portfolios.",
        &[],
        &["Project Management", "Requirements Analysis", "Communication"],
        ESSENTIAL,
    ),
    course(
        "MIS 6343",
        "Big Data Analytics",
        "Enterprise big data platforms and analytical processing.",
        &[],
        &["Big Data", "SQL", "Distributed Systems"],
        CORE_SKILL,
    ),
    course(
        "MIS 6344",
        "Business Intelligence and Analytics",
        "BI strategy, data warehousing and executive reporting.",
        &[],
        &["Business Intelligence", "Data Warehousing"],
        CORE_SKILL,
    ),
    course(
        "MIS 6348",
        "Advanced Database Systems",
        "Database administration, tuning and analytical schemas.",
        &[],
        &["SQL", "Database Design", "Data Modeling"],
        CORE_SKILL,
    ),
];

const MIS_GRADUATE_ELECTIVES: &[CourseEntry] = &[
    course(
        "MIS 6349",
        "Cloud Computing for Analytics",
        "Designing cloud-hosted analytics and data services.",
        &["MIS 6343"],
        &["Cloud Computing", "Big Data"],
        SPECIALIZATION,
    ),
    course(
        "MIS 6353",
        "Data Pipeline Engineering",
        "Building reliable ingestion and transformation pipelines.",
        &["MIS 6348"],
        &["ETL", "Python", "Data Modeling"],
        SPECIALIZATION,
    ),
    course(
        "MIS 6356",
        "Data Security and Governance",
        "Security controls, compliance and data stewardship.",
        &[],
        &["Data Governance"],
        SPECIALIZATION,
    ),
    course(
        "MIS 6358",
        "Information Technology Capstone",
        "Sponsored project applying IT management practice end to end.",
        &["MIS 6341"],
        &["Project Management", "Communication", "System Design"],
        PRACTICE,
    ),
];

const CS_UNDERGRADUATE_CORE: &[CourseEntry] = &[
    course(
        "CS 1336",
        "Programming Fundamentals",
        "Introductory programming, control flow and problem solving.",
        &[],
        &["Python", "Algorithms"],
        ESSENTIAL,
    ),
    course(
        "CS 2336",
        "Computer Science II",
        "Object-oriented programming and basic data structures.",
        &["CS 1336"],
        &["Java", "Data Structures"],
        ESSENTIAL,
    ),
    course(
        "CS 3345",
        "Data Structures and Introduction to Algorithmic Analysis",
        "Trees, graphs, hashing and complexity analysis.",
        &["CS 2336"],
        &["Data Structures", "Algorithms"],
        CORE_SKILL,
    ),
    course(
        "CS 4351",
        "Software Engineering",
        "Software process, design patterns and team development.",
        &["CS 3345"],
        &["Software Engineering", "System Design"],
        CORE_SKILL,
    ),
    course(
        "CS 4352",
        "Database Systems",
        "Relational theory, SQL and database implementation.",
        &["CS 3345"],
        &["SQL", "Database Design"],
        CORE_SKILL,
    ),
    course(
        "CS 4353",
        "Computer Networks",
        "Network protocols, layered architectures and socket programming.",
        &["CS 3345"],
        &["Networking", "Distributed Systems"],
        CORE_SKILL,
    ),
];

const CS_UNDERGRADUATE_ELECTIVES: &[CourseEntry] = &[
    course(
        "CS 4348",
        "Operating Systems Concepts",
        "Processes, concurrency, memory management and file systems.",
        &["CS 3345"],
        &["Operating Systems", "System Design"],
        SPECIALIZATION,
    ),
    course(
        "CS 4365",
        "Artificial Intelligence",
        "Search, knowledge representation and reasoning under uncertainty.",
        &["CS 3345"],
        &["Algorithms", "Machine Learning"],
        SPECIALIZATION,
    ),
    course(
        "CS 4375",
        "Introduction to Machine Learning",
        "Classification, regression and model evaluation.",
        &["CS 3345", "STAT 3341"],
        &["Machine Learning", "Python", "Statistics"],
        SPECIALIZATION,
    ),
    course(
        "CS 4485",
        "Computer Science Project",
        "Team capstone building a complete software system.",
        &["CS 4351"],
        &["Software Engineering", "Project Management", "Communication"],
        PRACTICE,
    ),
];

const CS_GRADUATE_CORE: &[CourseEntry] = &[
    course(
        "CS 6363",
        "Design and Analysis of Computer Algorithms",
        "Advanced algorithm design techniques and complexity.",
        &[],
        &["Algorithms", "Data Structures"],
        ESSENTIAL,
    ),
    course(
        "CS 6360",
        "Database Design",
        "Advanced data modeling, indexing and query processing.",
        &[],
        &["SQL", "Database Design", "Data Modeling"],
        CORE_SKILL,
    ),
    course(
        "CS 6375",
        "Machine Learning",
        "Statistical learning theory and modern learning algorithms.",
        &[],
        &["Machine Learning", "Python", "Statistics"],
        CORE_SKILL,
    ),
    course(
        "CS 6378",
        "Advanced Operating Systems",
        "Distributed operating system design and synchronization.",
        &[],
        &["Operating Systems", "Distributed Systems"],
        CORE_SKILL,
    ),
];

const CS_GRADUATE_ELECTIVES: &[CourseEntry] = &[
    course(
        "CS 6313",
        "Statistical Methods for Data Science",
        "Probability, inference and regression for data science.",
        &[],
        &["Statistics", "Python"],
        SPECIALIZATION,
    ),
    course(
        "CS 6350",
        "Big Data Management and Analytics",
        "Large-scale data processing with distributed frameworks.",
        &["CS 6360"],
        &["Big Data", "Distributed Systems", "ETL"],
        SPECIALIZATION,
    ),
    course(
        "CS 6301",
        "Deep Learning",
        "Neural network architectures and training at scale.",
        &["CS 6375"],
        &["Deep Learning", "Machine Learning", "Python"],
        SPECIALIZATION,
    ),
    course(
        "CS 6359",
        "Object-Oriented Analysis and Design",
        "Modeling, design patterns and architecture for large systems.",
        &[],
        &["Software Engineering", "System Design", "Java"],
        SPECIALIZATION,
    ),
];

const PROGRAMS: &[ProgramTable] = &[
    ProgramTable {
        major: Major::BusinessAnalytics,
        student_type: StudentType::Undergraduate,
        core: BUAN_UNDERGRADUATE_CORE,
        electives: BUAN_UNDERGRADUATE_ELECTIVES,
    },
    ProgramTable {
        major: Major::BusinessAnalytics,
        student_type: StudentType::Graduate,
        core: BUAN_GRADUATE_CORE,
        electives: BUAN_GRADUATE_ELECTIVES,
    },
    ProgramTable {
        major: Major::InformationTechnologyManagement,
        student_type: StudentType::Undergraduate,
        core: MIS_UNDERGRADUATE_CORE,
        electives: MIS_UNDERGRADUATE_ELECTIVES,
    },
    ProgramTable {
        major: Major::InformationTechnologyManagement,
        student_type: StudentType::Graduate,
        core: MIS_GRADUATE_CORE,
        electives: MIS_GRADUATE_ELECTIVES,
    },
    ProgramTable {
        major: Major::ComputerScience,
        student_type: StudentType::Undergraduate,
        core: CS_UNDERGRADUATE_CORE,
        electives: CS_UNDERGRADUATE_ELECTIVES,
    },
    ProgramTable {
        major: Major::ComputerScience,
        student_type: StudentType::Graduate,
        core: CS_GRADUATE_CORE,
        electives: CS_GRADUATE_ELECTIVES,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_program_has_core_and_elective_courses() {
        for major in Major::ALL {
            for student_type in StudentType::ALL {
                let plan = plan_for(major, student_type, CareerGoal::DataScientist);
                assert!(
                    !plan.core_courses.is_empty(),
                    "{major} {student_type} has no core courses"
                );
                assert!(
                    !plan.elective_courses.is_empty(),
                    "{major} {student_type} has no electives"
                );
            }
        }
    }

    #[test]
    fn every_planned_course_is_found_again_by_major_and_code() {
        for major in Major::ALL {
            for student_type in StudentType::ALL {
                for career in CareerGoal::ALL {
                    let plan = plan_for(major, student_type, career);
                    for course in plan.courses() {
                        let found = find_course(major, &course.code)
                            .unwrap_or_else(|| panic!("{} missing for {major}", course.code));
                        assert_eq!(found.code, course.code);
                        assert_eq!(found.name, course.name);
                    }
                }
            }
        }
    }

    #[test]
    fn course_codes_are_unique_within_a_program() {
        for table in PROGRAMS {
            let mut codes: Vec<&str> = table
                .core
                .iter()
                .chain(table.electives.iter())
                .map(|entry| entry.code)
                .collect();
            let before = codes.len();
            codes.sort_unstable();
            codes.dedup();
            assert_eq!(codes.len(), before, "{} {}", table.major, table.student_type);
        }
    }

    #[test]
    fn electives_are_ordered_by_career_skill_overlap() {
        let plan = plan_for(
            Major::BusinessAnalytics,
            StudentType::Graduate,
            CareerGoal::DataEngineer,
        );
        let overlaps: Vec<usize> = plan
            .elective_courses
            .iter()
            .map(|course| {
                find_course(Major::BusinessAnalytics, &course.code)
                    .map(|entry| entry.skill_overlap(CareerGoal::DataEngineer))
                    .unwrap_or_default()
            })
            .collect();

        assert!(overlaps.windows(2).all(|pair| pair[0] >= pair[1]));
        assert_eq!(plan.elective_courses[0].code, "BUAN 6353");
    }

    #[test]
    fn career_relevance_names_the_career() {
        let plan = plan_for(
            Major::ComputerScience,
            StudentType::Graduate,
            CareerGoal::SoftwareEngineer,
        );
        assert!(plan
            .courses()
            .all(|course| course.career_relevance.ends_with("for Software Engineer roles")));
    }

    #[test]
    fn totals_add_up_across_core_and_electives() {
        let plan = plan_for(
            Major::InformationTechnologyManagement,
            StudentType::Undergraduate,
            CareerGoal::BusinessAnalyst,
        );
        assert_eq!(plan.total_courses(), 9);
        assert_eq!(plan.total_credits(), 27);
    }

    #[test]
    fn find_course_normalizes_case_and_spacing() {
        let entry = find_course(Major::ComputerScience, "cs  3345").expect("course should exist");
        assert_eq!(entry.code, "CS 3345");
        assert!(find_course(Major::BusinessAnalytics, "CS 3345").is_none());
    }
}
