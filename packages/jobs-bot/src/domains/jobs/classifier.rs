//! Keyword classifier that assigns every job posting exactly one category.
//!
//! Rules are evaluated in order and the first match wins. Sales, Marketing,
//! Finance and Healthcare come first because their vocabulary is the least
//! ambiguous. Product Management is checked before Project Management, and
//! Supply Chain refuses "operations manager" when it is part of "people
//! operations manager" so those postings fall through to Human Resources.

use lazy_static::lazy_static;
use regex::Regex;

use super::models::{JobCategory, RawJobRecord};

lazy_static! {
    static ref SALES_REGEX: Regex = Regex::new(
        r"\b(?:sales|account executive|account manager|bdr|sdr|business development|customer success|revenue|quota)\b"
    ).unwrap();

    static ref MARKETING_REGEX: Regex = Regex::new(
        r"\b(?:marketing|growth|seo|sem|content marketing|brand|campaign|digital marketing|social media|copywriter|creative director)\b"
    ).unwrap();

    static ref FINANCE_REGEX: Regex = Regex::new(
        r"\b(?:finance|accounting|financial analyst|controller|treasury|audit|tax|bookkeeping|bookkeeper|cfo|actuarial|investment|banker)\b"
    ).unwrap();

    static ref HEALTHCARE_REGEX: Regex = Regex::new(
        r"\b(?:healthcare|medical|clinical|nurse|doctor|physician|therapist|pharmaceutical|biotech|hospital|patient care)\b"
    ).unwrap();

    static ref PRODUCT_REGEX: Regex = Regex::new(
        r"\b(?:product manager|product owner|product marketing|pm|product lead|product strategy|product analyst)\b"
    ).unwrap();

    // "operations manager" lives in its own pattern, see `is_supply_chain`.
    static ref SUPPLY_CHAIN_REGEX: Regex = Regex::new(
        r"\b(?:supply chain|logistics|procurement|inventory|warehouse|distribution|sourcing|fulfillment|shipping)\b"
    ).unwrap();

    static ref OPERATIONS_MANAGER_REGEX: Regex = Regex::new(r"\boperations manager\b").unwrap();

    static ref PROJECT_REGEX: Regex = Regex::new(
        r"\b(?:project manager|program manager|scrum master|agile coach|pmo|project coordinator|delivery manager)\b"
    ).unwrap();

    static ref HR_REGEX: Regex = Regex::new(
        r"\b(?:human resources|hr|recruiter|talent acquisition|people operations|compensation|benefits|hiring manager|recruitment|workforce)\b"
    ).unwrap();

    static ref RULES: Vec<ClassificationRule> = vec![
        ClassificationRule::pattern(JobCategory::Sales, &SALES_REGEX),
        ClassificationRule::pattern(JobCategory::Marketing, &MARKETING_REGEX),
        ClassificationRule::pattern(JobCategory::Finance, &FINANCE_REGEX),
        ClassificationRule::pattern(JobCategory::Healthcare, &HEALTHCARE_REGEX),
        ClassificationRule::pattern(JobCategory::ProductManagement, &PRODUCT_REGEX),
        ClassificationRule::predicate(JobCategory::SupplyChain, is_supply_chain),
        ClassificationRule::pattern(JobCategory::ProjectManagement, &PROJECT_REGEX),
        ClassificationRule::pattern(JobCategory::HumanResources, &HR_REGEX),
    ];
}

/// How a rule decides whether it applies to the lower-cased search text.
pub enum Matcher {
    Pattern(&'static Regex),
    Predicate(fn(&str) -> bool),
}

/// One `(matcher, category)` entry of the ordered rule table.
pub struct ClassificationRule {
    pub category: JobCategory,
    pub matcher: Matcher,
}

impl ClassificationRule {
    fn pattern(category: JobCategory, regex: &'static Regex) -> Self {
        Self {
            category,
            matcher: Matcher::Pattern(regex),
        }
    }

    fn predicate(category: JobCategory, predicate: fn(&str) -> bool) -> Self {
        Self {
            category,
            matcher: Matcher::Predicate(predicate),
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        match &self.matcher {
            Matcher::Pattern(regex) => regex.is_match(text),
            Matcher::Predicate(predicate) => predicate(text),
        }
    }
}

/// The rule table in evaluation order. Tech is implicit: it is what you get
/// when nothing here matches.
pub fn rules() -> &'static [ClassificationRule] {
    &RULES
}

/// First rule matching already lower-cased text, if any.
pub fn matching_rule(text: &str) -> Option<&'static ClassificationRule> {
    RULES.iter().find(|rule| rule.matches(text))
}

/// Category for a job posting, decided from its title and description only.
pub fn classify(job: &RawJobRecord) -> JobCategory {
    matching_rule(&job.search_text())
        .map(|rule| rule.category)
        .unwrap_or_default()
}

fn is_supply_chain(text: &str) -> bool {
    if SUPPLY_CHAIN_REGEX.is_match(text) {
        return true;
    }

    OPERATIONS_MANAGER_REGEX
        .find_iter(text)
        .any(|m| !text[..m.start()].ends_with("people "))
}
