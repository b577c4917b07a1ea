use std::fmt;

use serde::{Deserialize, Serialize};

use super::RawJobRecord;

/// Dedup key for a job posting, derived from employer, title and city.
///
/// Two records that differ only in case, whitespace width or punctuation map
/// to the same identifier. Description, apply link, posting date and any
/// upstream id play no part, so re-scrapes of the same job always collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobIdentifier(String);

impl JobIdentifier {
    /// `normalize(employer)-normalize(title)-normalize(city)`. Never fails.
    pub fn compute(job: &RawJobRecord) -> Self {
        Self(format!(
            "{}-{}-{}",
            normalize_part(job.employer()),
            normalize_part(job.title()),
            normalize_part(job.city())
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for JobIdentifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for JobIdentifier {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for JobIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercase, dash-separated slug restricted to `[a-z0-9_-]`.
///
/// Whitespace runs and every other character become `-`, dash runs collapse
/// to one, and leading/trailing dashes are dropped.
pub fn normalize_part(value: &str) -> String {
    let lowered = value.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());

    for word in lowered.split_whitespace() {
        if !slug.is_empty() {
            slug.push('-');
        }
        for c in word.chars() {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-' {
                slug.push(c);
            } else {
                slug.push('-');
            }
        }
    }

    let mut collapsed = String::with_capacity(slug.len());
    for c in slug.chars() {
        if c == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(c);
    }

    collapsed.trim_matches('-').to_string()
}
