use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Major {
    #[serde(rename = "Business Analytics")]
    BusinessAnalytics,
    #[serde(rename = "Information Technology Management")]
    InformationTechnologyManagement,
    #[serde(rename = "Computer Science")]
    ComputerScience,
}

impl Major {
    pub const ALL: [Major; 3] = [
        Self::BusinessAnalytics,
        Self::InformationTechnologyManagement,
        Self::ComputerScience,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BusinessAnalytics => "Business Analytics",
            Self::InformationTechnologyManagement => "Information Technology Management",
            Self::ComputerScience => "Computer Science",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|major| major.as_str().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for Major {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StudentType {
    Undergraduate,
    Graduate,
}

impl StudentType {
    pub const ALL: [StudentType; 2] = [Self::Undergraduate, Self::Graduate];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Undergraduate => "Undergraduate",
            Self::Graduate => "Graduate",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|student_type| student_type.as_str().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for StudentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CareerGoal {
    #[serde(rename = "Data Scientist")]
    DataScientist,
    #[serde(rename = "Data Engineer")]
    DataEngineer,
    #[serde(rename = "Data Analyst")]
    DataAnalyst,
    #[serde(rename = "Machine Learning Engineer")]
    MachineLearningEngineer,
    #[serde(rename = "Software Engineer")]
    SoftwareEngineer,
    #[serde(rename = "Business Analyst")]
    BusinessAnalyst,
    #[serde(rename = "Business Intelligence Analyst")]
    BusinessIntelligenceAnalyst,
}

impl CareerGoal {
    pub const ALL: [CareerGoal; 7] = [
        Self::DataScientist,
        Self::DataEngineer,
        Self::DataAnalyst,
        Self::MachineLearningEngineer,
        Self::SoftwareEngineer,
        Self::BusinessAnalyst,
        Self::BusinessIntelligenceAnalyst,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DataScientist => "Data Scientist",
            Self::DataEngineer => "Data Engineer",
            Self::DataAnalyst => "Data Analyst",
            Self::MachineLearningEngineer => "Machine Learning Engineer",
            Self::SoftwareEngineer => "Software Engineer",
            Self::BusinessAnalyst => "Business Analyst",
            Self::BusinessIntelligenceAnalyst => "Business Intelligence Analyst",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|goal| goal.as_str().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for CareerGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How competing keyword rules for one field are resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// The first rule in table order with any matching keyword wins.
    #[default]
    FirstMatch,
    /// The rule with the most matching keywords wins; ties go to table order.
    Scored,
}

impl MatchStrategy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "first_match" | "first-match" | "firstmatch" => Some(Self::FirstMatch),
            "scored" | "score" => Some(Self::Scored),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstMatch => "first_match",
            Self::Scored => "scored",
        }
    }
}

/// One keyword of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// Matches anywhere in the lower-cased query, so inflections such as
    /// "postgraduate" or "data engineering" still count.
    Term(&'static str),
    /// Short abbreviation; matches only as whole tokens.
    Token(&'static str),
}

impl Keyword {
    pub fn text(self) -> &'static str {
        match self {
            Self::Term(text) | Self::Token(text) => text,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct KeywordRule<T: 'static> {
    pub label: T,
    pub keywords: &'static [Keyword],
    /// Blanked out of the query before this rule's keywords are tested.
    pub excluded: &'static [&'static str],
}

use Keyword::{Term, Token};

pub const MAJOR_RULES: &[KeywordRule<Major>] = &[
    KeywordRule {
        label: Major::BusinessAnalytics,
        keywords: &[Term("business analytics"), Term("buan"), Token("ba")],
        excluded: &[],
    },
    KeywordRule {
        label: Major::InformationTechnologyManagement,
        keywords: &[
            Term("information technology management"),
            Term("information technology"),
            Term("information systems"),
            Token("itm"),
            Token("mis"),
        ],
        excluded: &[],
    },
    KeywordRule {
        label: Major::ComputerScience,
        keywords: &[
            Term("computer science"),
            Term("computer engineering"),
            Token("cs"),
        ],
        excluded: &[],
    },
];

// Graduate is tested first so a current master's program outranks a prior
// bachelor's. "undergrad" contains "grad", so it is blanked for that rule.
pub const STUDENT_TYPE_RULES: &[KeywordRule<StudentType>] = &[
    KeywordRule {
        label: StudentType::Graduate,
        keywords: &[
            Term("graduate"),
            Token("grad"),
            Term("master"),
            Token("ms"),
            Token("mba"),
            Token("phd"),
            Term("doctoral"),
        ],
        excluded: &["undergrad"],
    },
    KeywordRule {
        label: StudentType::Undergraduate,
        keywords: &[Term("undergrad"), Term("bachelor"), Token("bs")],
        excluded: &[],
    },
];

pub const CAREER_GOAL_RULES: &[KeywordRule<CareerGoal>] = &[
    KeywordRule {
        label: CareerGoal::DataScientist,
        keywords: &[Term("data scientist")],
        excluded: &[],
    },
    KeywordRule {
        label: CareerGoal::DataEngineer,
        keywords: &[Term("data engineer")],
        excluded: &[],
    },
    KeywordRule {
        label: CareerGoal::DataAnalyst,
        keywords: &[Term("data analyst")],
        excluded: &[],
    },
    KeywordRule {
        label: CareerGoal::MachineLearningEngineer,
        keywords: &[Term("machine learning engineer"), Token("ml engineer")],
        excluded: &[],
    },
    KeywordRule {
        label: CareerGoal::SoftwareEngineer,
        keywords: &[Term("software engineer"), Term("software developer")],
        excluded: &[],
    },
    KeywordRule {
        label: CareerGoal::BusinessAnalyst,
        keywords: &[Term("business analyst")],
        excluded: &[],
    },
    KeywordRule {
        label: CareerGoal::BusinessIntelligenceAnalyst,
        keywords: &[
            Term("business intelligence analyst"),
            Term("business intelligence"),
            Token("bi analyst"),
        ],
        excluded: &[],
    },
];

pub const DEFAULT_MAJOR: Major = Major::BusinessAnalytics;
pub const DEFAULT_STUDENT_TYPE: StudentType = StudentType::Undergraduate;
pub const DEFAULT_CAREER_GOAL: CareerGoal = CareerGoal::DataScientist;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolved<T> {
    pub value: T,
    /// Keyword that selected `value`; `None` when the default applied.
    pub keyword: Option<&'static str>,
}

impl<T> Resolved<T> {
    pub fn defaulted(&self) -> bool {
        self.keyword.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interpretation {
    pub major: Resolved<Major>,
    pub student_type: Resolved<StudentType>,
    pub career_goal: Resolved<CareerGoal>,
}

impl Interpretation {
    pub fn major(&self) -> Major {
        self.major.value
    }

    pub fn student_type(&self) -> StudentType {
        self.student_type.value
    }

    pub fn career_goal(&self) -> CareerGoal {
        self.career_goal.value
    }
}

/// Lower-cased query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryText {
    lowered: String,
}

impl QueryText {
    pub fn new(query: &str) -> Self {
        Self {
            lowered: query.to_lowercase(),
        }
    }

    /// Copy of the text with every occurrence of `excluded` replaced by a space.
    pub fn without(&self, excluded: &[&str]) -> Self {
        let mut lowered = self.lowered.clone();
        for pattern in excluded {
            lowered = lowered.replace(pattern, " ");
        }
        Self { lowered }
    }

    pub fn contains(&self, keyword: Keyword) -> bool {
        match keyword {
            Keyword::Term(text) => self.lowered.contains(text),
            Keyword::Token(text) => self.contains_token_phrase(text),
        }
    }

    fn contains_token_phrase(&self, phrase: &str) -> bool {
        let parts: Vec<&str> = phrase.split_whitespace().collect();
        let tokens: Vec<&str> = self
            .lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .collect();
        if parts.is_empty() || parts.len() > tokens.len() {
            return false;
        }

        tokens
            .windows(parts.len())
            .any(|window| window == parts.as_slice())
    }
}

pub fn interpret(query: &str, strategy: MatchStrategy) -> Interpretation {
    let text = QueryText::new(query);
    Interpretation {
        major: resolve(&text, MAJOR_RULES, DEFAULT_MAJOR, strategy),
        student_type: resolve(&text, STUDENT_TYPE_RULES, DEFAULT_STUDENT_TYPE, strategy),
        career_goal: resolve(&text, CAREER_GOAL_RULES, DEFAULT_CAREER_GOAL, strategy),
    }
}

pub fn resolve<T: Copy>(
    text: &QueryText,
    rules: &[KeywordRule<T>],
    default: T,
    strategy: MatchStrategy,
) -> Resolved<T> {
    let mut best: Option<(usize, T, &'static str)> = None;

    for rule in rules {
        let text = text.without(rule.excluded);
        let mut matched = rule
            .keywords
            .iter()
            .copied()
            .filter(|keyword| text.contains(*keyword))
            .map(Keyword::text);
        let Some(first_keyword) = matched.next() else {
            continue;
        };

        match strategy {
            MatchStrategy::FirstMatch => {
                return Resolved {
                    value: rule.label,
                    keyword: Some(first_keyword),
                };
            }
            MatchStrategy::Scored => {
                let score = 1 + matched.count();
                if best.map_or(true, |(best_score, _, _)| score > best_score) {
                    best = Some((score, rule.label, first_keyword));
                }
            }
        }
    }

    match best {
        Some((_, value, keyword)) => Resolved {
            value,
            keyword: Some(keyword),
        },
        None => Resolved {
            value: default,
            keyword: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_match(query: &str) -> Interpretation {
        interpret(query, MatchStrategy::FirstMatch)
    }

    #[test]
    fn business_analytics_undergraduate_scenario() {
        let parsed = first_match(
            "I am a Business Analytics undergraduate student at UTD. I want to become a data scientist.",
        );

        assert_eq!(parsed.major(), Major::BusinessAnalytics);
        assert_eq!(parsed.student_type(), StudentType::Undergraduate);
        assert_eq!(parsed.career_goal(), CareerGoal::DataScientist);
        assert_eq!(parsed.student_type.keyword, Some("undergrad"));
    }

    #[test]
    fn computer_science_graduate_scenario() {
        let parsed = first_match(
            "I am a Computer Science graduate student. I want to become a software engineer.",
        );

        assert_eq!(parsed.major(), Major::ComputerScience);
        assert_eq!(parsed.student_type(), StudentType::Graduate);
        assert_eq!(parsed.career_goal(), CareerGoal::SoftwareEngineer);
    }

    #[test]
    fn graduate_and_master_keywords_select_graduate() {
        for query in [
            "graduate student in analytics",
            "I'm doing a master's degree",
            "pursuing my masters",
            "MS student",
        ] {
            assert_eq!(
                first_match(query).student_type(),
                StudentType::Graduate,
                "query: {query}"
            );
        }
    }

    #[test]
    fn student_type_defaults_to_undergraduate() {
        let parsed = first_match("I like working with data");
        assert_eq!(parsed.student_type(), StudentType::Undergraduate);
        assert!(parsed.student_type.defaulted());
    }

    #[test]
    fn current_graduate_program_outranks_prior_degree() {
        for strategy in [MatchStrategy::FirstMatch, MatchStrategy::Scored] {
            for query in [
                "I have a BS in computer science and I am now a master's student",
                "After my bachelor's I started a masters in business analytics",
                "undergraduate degree done, now a graduate student",
            ] {
                assert_eq!(
                    interpret(query, strategy).student_type(),
                    StudentType::Graduate,
                    "{strategy:?} query: {query}"
                );
            }
        }
    }

    #[test]
    fn undergraduate_does_not_read_as_graduate() {
        for query in [
            "undergraduate junior in information systems",
            "cs undergrad looking for internships",
        ] {
            let parsed = first_match(query);
            assert_eq!(parsed.student_type(), StudentType::Undergraduate, "query: {query}");
            assert_eq!(parsed.student_type.keyword, Some("undergrad"));
        }
    }

    #[test]
    fn inflected_keywords_still_match() {
        let parsed = first_match("I am a postgraduate student in computer science");
        assert_eq!(parsed.student_type(), StudentType::Graduate);
        assert_eq!(parsed.major(), Major::ComputerScience);

        assert_eq!(
            first_match("I recently graduated and want to become a data analyst").student_type(),
            StudentType::Graduate
        );
        assert_eq!(
            first_match("I want a career in software engineering").career_goal(),
            CareerGoal::SoftwareEngineer
        );
        assert_eq!(
            first_match("I want to work in data engineering").career_goal(),
            CareerGoal::DataEngineer
        );
    }

    #[test]
    fn scored_strategy_weighs_student_type_keywords() {
        let query = "undergrad double major, bachelor of science, bs in cs, then an mba";

        let first = interpret(query, MatchStrategy::FirstMatch);
        assert_eq!(first.student_type(), StudentType::Graduate);
        assert_eq!(first.student_type.keyword, Some("mba"));

        let scored = interpret(query, MatchStrategy::Scored);
        assert_eq!(scored.student_type(), StudentType::Undergraduate);
        assert_eq!(scored.student_type.keyword, Some("undergrad"));
    }

    #[test]
    fn scored_student_type_ties_go_to_graduate() {
        let parsed = interpret(
            "bachelor's finished, now a master's candidate",
            MatchStrategy::Scored,
        );
        assert_eq!(parsed.student_type(), StudentType::Graduate);
    }

    #[test]
    fn grad_abbreviation_needs_a_word_boundary() {
        let parsed = first_match("I want to upgrade my skills");
        assert_eq!(parsed.student_type(), StudentType::Undergraduate);
        assert!(parsed.student_type.defaulted());
        assert_eq!(first_match("grad student").student_type(), StudentType::Graduate);
    }

    #[test]
    fn cs_abbreviation_selects_computer_science() {
        assert_eq!(first_match("cs junior").major(), Major::ComputerScience);
        assert_eq!(
            first_match("I study computer science").major(),
            Major::ComputerScience
        );
    }

    #[test]
    fn abbreviations_do_not_match_inside_words() {
        let parsed = first_match("I enjoy physics and basketball problems");

        assert_eq!(parsed.major(), Major::BusinessAnalytics);
        assert!(parsed.major.defaulted());
        assert_eq!(parsed.student_type(), StudentType::Undergraduate);
        assert!(parsed.student_type.defaulted());
    }

    #[test]
    fn first_match_prefers_earlier_major_rule() {
        let parsed = first_match("double major in computer science and business analytics");
        assert_eq!(parsed.major(), Major::BusinessAnalytics);
        assert_eq!(parsed.major.keyword, Some("business analytics"));
    }

    #[test]
    fn scored_strategy_prefers_rule_with_more_matches() {
        let query = "cs student taking computer science courses with a business analytics minor";
        assert_eq!(
            interpret(query, MatchStrategy::FirstMatch).major(),
            Major::BusinessAnalytics
        );
        assert_eq!(
            interpret(query, MatchStrategy::Scored).major(),
            Major::ComputerScience
        );
    }

    #[test]
    fn scored_strategy_breaks_ties_by_rule_order() {
        let parsed = interpret(
            "computer science or business analytics",
            MatchStrategy::Scored,
        );
        assert_eq!(parsed.major(), Major::BusinessAnalytics);
    }

    #[test]
    fn career_goal_defaults_to_data_scientist() {
        let parsed = first_match("I want to become a web developer");
        assert_eq!(parsed.career_goal(), CareerGoal::DataScientist);
        assert!(parsed.career_goal.defaulted());
    }

    #[test]
    fn career_goal_recognizes_abbreviated_titles() {
        assert_eq!(
            first_match("aiming for ml engineer roles").career_goal(),
            CareerGoal::MachineLearningEngineer
        );
        assert_eq!(
            first_match("I want to be a BI analyst").career_goal(),
            CareerGoal::BusinessIntelligenceAnalyst
        );
        assert_eq!(
            first_match("becoming a business intelligence analyst").career_goal(),
            CareerGoal::BusinessIntelligenceAnalyst
        );
    }

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(
            Major::parse("information technology management"),
            Some(Major::InformationTechnologyManagement)
        );
        assert_eq!(StudentType::parse(" graduate "), Some(StudentType::Graduate));
        assert_eq!(
            CareerGoal::parse("Data Engineer"),
            Some(CareerGoal::DataEngineer)
        );
        assert_eq!(Major::parse("Mathematics"), None);
    }

    #[test]
    fn match_strategy_parses_known_names() {
        assert_eq!(
            MatchStrategy::parse("first-match"),
            Some(MatchStrategy::FirstMatch)
        );
        assert_eq!(MatchStrategy::parse("SCORED"), Some(MatchStrategy::Scored));
        assert_eq!(MatchStrategy::parse("best"), None);
    }

    #[test]
    fn labels_serialize_as_display_names() {
        let json = serde_json::to_string(&Major::InformationTechnologyManagement)
            .expect("major should serialize");
        assert_eq!(json, "\"Information Technology Management\"");
        let json = serde_json::to_string(&CareerGoal::MachineLearningEngineer)
            .expect("career should serialize");
        assert_eq!(json, "\"Machine Learning Engineer\"");
    }
}
