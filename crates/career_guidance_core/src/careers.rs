use crate::interpreter::CareerGoal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CareerProfile {
    pub goal: CareerGoal,
    pub description: &'static str,
    pub salary_range: &'static str,
    pub growth_outlook: &'static str,
    pub key_skills: &'static [&'static str],
    pub industries: &'static [&'static str],
}

impl CareerProfile {
    pub fn requires_skill(&self, skill: &str) -> bool {
        self.key_skills
            .iter()
            .any(|key_skill| key_skill.eq_ignore_ascii_case(skill))
    }
}

const DATA_SCIENTIST: CareerProfile = CareerProfile {
    goal: CareerGoal::DataScientist,
    description: "Builds statistical and machine learning models that turn business data into predictions and decisions.",
    salary_range: "$95,000 - $165,000",
    growth_outlook: "36% projected growth through 2033, much faster than average",
    key_skills: &[
        "Python",
        "Statistics",
        "Machine Learning",
        "SQL",
        "Data Visualization",
        "Data Mining",
    ],
    industries: &["Technology", "Finance", "Healthcare", "Retail", "Consulting"],
};

const DATA_ENGINEER: CareerProfile = CareerProfile {
    goal: CareerGoal::DataEngineer,
    description: "Designs and operates the pipelines, warehouses and platforms that move and store data at scale.",
    salary_range: "$90,000 - $160,000",
    growth_outlook: "High demand as organizations modernize cloud data platforms",
    key_skills: &[
        "Python",
        "SQL",
        "ETL",
        "Big Data",
        "Cloud Computing",
        "Distributed Systems",
        "Data Modeling",
    ],
    industries: &["Technology", "Finance", "E-commerce", "Telecommunications"],
};

const DATA_ANALYST: CareerProfile = CareerProfile {
    goal: CareerGoal::DataAnalyst,
    description: "Analyzes operational and business data to answer questions and report on performance.",
    salary_range: "$60,000 - $105,000",
    growth_outlook: "23% projected growth, steady demand across every sector",
    key_skills: &[
        "SQL",
        "Excel",
        "Data Visualization",
        "Statistics",
        "Business Intelligence",
        "Python",
    ],
    industries: &["Retail", "Healthcare", "Finance", "Government", "Marketing"],
};

const MACHINE_LEARNING_ENGINEER: CareerProfile = CareerProfile {
    goal: CareerGoal::MachineLearningEngineer,
    description: "Takes machine learning models from experiments to reliable production services.",
    salary_range: "$110,000 - $190,000",
    growth_outlook: "Among the fastest growing engineering roles as AI adoption expands",
    key_skills: &[
        "Python",
        "Machine Learning",
        "Deep Learning",
        "Cloud Computing",
        "Software Engineering",
        "Distributed Systems",
    ],
    industries: &["Technology", "Automotive", "Finance", "Healthcare"],
};

const SOFTWARE_ENGINEER: CareerProfile = CareerProfile {
    goal: CareerGoal::SoftwareEngineer,
    description: "Designs, builds and maintains software systems and applications.",
    salary_range: "$85,000 - $170,000",
    growth_outlook: "17% projected growth through 2033",
    key_skills: &[
        "Data Structures",
        "Algorithms",
        "Software Engineering",
        "System Design",
        "Java",
        "Database Design",
    ],
    industries: &["Technology", "Finance", "Defense", "Telecommunications", "Gaming"],
};

const BUSINESS_ANALYST: CareerProfile = CareerProfile {
    goal: CareerGoal::BusinessAnalyst,
    description: "Bridges business stakeholders and technical teams by turning needs into requirements and insights.",
    salary_range: "$65,000 - $115,000",
    growth_outlook: "11% projected growth, driven by process improvement initiatives",
    key_skills: &[
        "Requirements Analysis",
        "SQL",
        "Business Intelligence",
        "Data Visualization",
        "Statistics",
        "Communication",
    ],
    industries: &["Consulting", "Finance", "Healthcare", "Insurance", "Government"],
};

const BUSINESS_INTELLIGENCE_ANALYST: CareerProfile = CareerProfile {
    goal: CareerGoal::BusinessIntelligenceAnalyst,
    description: "Builds dashboards, reports and data models that give leadership a reliable view of the business.",
    salary_range: "$70,000 - $120,000",
    growth_outlook: "Strong demand as companies invest in self-service analytics",
    key_skills: &[
        "Business Intelligence",
        "Data Warehousing",
        "SQL",
        "Data Visualization",
        "ETL",
        "Tableau",
    ],
    industries: &["Retail", "Finance", "Healthcare", "Energy", "Logistics"],
};

pub fn profile(goal: CareerGoal) -> &'static CareerProfile {
    match goal {
        CareerGoal::DataScientist => &DATA_SCIENTIST,
        CareerGoal::DataEngineer => &DATA_ENGINEER,
        CareerGoal::DataAnalyst => &DATA_ANALYST,
        CareerGoal::MachineLearningEngineer => &MACHINE_LEARNING_ENGINEER,
        CareerGoal::SoftwareEngineer => &SOFTWARE_ENGINEER,
        CareerGoal::BusinessAnalyst => &BUSINESS_ANALYST,
        CareerGoal::BusinessIntelligenceAnalyst => &BUSINESS_INTELLIGENCE_ANALYST,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_goal_has_a_matching_profile() {
        for goal in CareerGoal::ALL {
            let profile = profile(goal);
            assert_eq!(profile.goal, goal);
            assert!(!profile.key_skills.is_empty());
            assert!(!profile.industries.is_empty());
        }
    }

    #[test]
    fn requires_skill_ignores_case() {
        let profile = profile(CareerGoal::DataEngineer);
        assert!(profile.requires_skill("etl"));
        assert!(!profile.requires_skill("Tableau"));
    }
}
