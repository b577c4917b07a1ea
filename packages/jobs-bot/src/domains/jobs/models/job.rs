use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One scraped job posting as written by the fetcher into `new_jobs.json`.
///
/// Every field is optional; the scraper output is noisy. Upstream identifiers
/// (the `id` key some fetchers emit) are intentionally not deserialized: the
/// only dedup key is the locally computed [`JobIdentifier`](super::JobIdentifier).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawJobRecord {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub employer_name: Option<String>,
    #[serde(default)]
    pub job_city: Option<String>,
    #[serde(default)]
    pub job_state: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub job_apply_link: Option<String>,
    #[serde(default)]
    pub job_posted_at_datetime_utc: Option<String>,
}

impl RawJobRecord {
    pub fn title(&self) -> &str {
        self.job_title.as_deref().unwrap_or_default()
    }

    pub fn employer(&self) -> &str {
        self.employer_name.as_deref().unwrap_or_default()
    }

    pub fn city(&self) -> &str {
        self.job_city.as_deref().unwrap_or_default()
    }

    pub fn state(&self) -> &str {
        self.job_state.as_deref().unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.job_description.as_deref().unwrap_or_default()
    }

    /// Lower-cased `title + " " + description`, the text keyword rules run against.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title(), self.description()).to_lowercase()
    }

    /// Load the fetcher's job list. A missing file means there is nothing to post.
    pub fn load_all(path: &Path) -> Result<Vec<RawJobRecord>> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No jobs file found");
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read jobs file {}", path.display()))?;
        let jobs: Vec<RawJobRecord> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse jobs file {}", path.display()))?;

        Ok(jobs)
    }
}
