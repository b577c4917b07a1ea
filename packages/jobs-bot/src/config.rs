use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::domains::jobs::{ChannelRoutes, JobCategory, LocationChannel};
use crate::domains::posting::PostingOptions;

const DEFAULT_DATA_DIR: &str = ".github/data";
const JOBS_FILE_NAME: &str = "new_jobs.json";
const POSTED_JOBS_FILE_NAME: &str = "posted_jobs.json";

/// Env var holding the channel id for each category.
pub const CATEGORY_CHANNEL_VARS: [(JobCategory, &str); 9] = [
    (JobCategory::Tech, "DISCORD_TECH_CHANNEL_ID"),
    (JobCategory::Sales, "DISCORD_SALES_CHANNEL_ID"),
    (JobCategory::Marketing, "DISCORD_MARKETING_CHANNEL_ID"),
    (JobCategory::Finance, "DISCORD_FINANCE_CHANNEL_ID"),
    (JobCategory::Healthcare, "DISCORD_HEALTHCARE_CHANNEL_ID"),
    (JobCategory::ProductManagement, "DISCORD_PRODUCT_CHANNEL_ID"),
    (JobCategory::SupplyChain, "DISCORD_SUPPLY_CHANNEL_ID"),
    (JobCategory::ProjectManagement, "DISCORD_PM_CHANNEL_ID"),
    (JobCategory::HumanResources, "DISCORD_HR_CHANNEL_ID"),
];

/// Env var holding the channel id for each city channel.
pub const LOCATION_CHANNEL_VARS: [(LocationChannel, &str); 10] = [
    (LocationChannel::RemoteUsa, "DISCORD_REMOTE_USA_CHANNEL_ID"),
    (LocationChannel::NewYork, "DISCORD_NY_CHANNEL_ID"),
    (LocationChannel::Austin, "DISCORD_AUSTIN_CHANNEL_ID"),
    (LocationChannel::Chicago, "DISCORD_CHICAGO_CHANNEL_ID"),
    (LocationChannel::Seattle, "DISCORD_SEATTLE_CHANNEL_ID"),
    (LocationChannel::Redmond, "DISCORD_REDMOND_CHANNEL_ID"),
    (LocationChannel::MountainView, "DISCORD_MV_CHANNEL_ID"),
    (LocationChannel::SanFrancisco, "DISCORD_SF_CHANNEL_ID"),
    (LocationChannel::Sunnyvale, "DISCORD_SUNNYVALE_CHANNEL_ID"),
    (LocationChannel::SanBruno, "DISCORD_SAN_BRUNO_CHANNEL_ID"),
];

/// Bot configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot token. Only optional so `--dry-run` works without credentials.
    pub discord_token: Option<String>,
    pub data_dir: PathBuf,
    pub routes: ChannelRoutes,
    pub posting: PostingOptions,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut routes = ChannelRoutes::new();
        if let Some(default_channel) = get("DISCORD_CHANNEL_ID") {
            routes = routes.with_default(default_channel);
        }
        for (category, key) in CATEGORY_CHANNEL_VARS {
            if let Some(channel_id) = get(key) {
                routes = routes.with_category(category, channel_id);
            }
        }
        for (location, key) in LOCATION_CHANNEL_VARS {
            if let Some(channel_id) = get(key) {
                routes = routes.with_location(location, channel_id);
            }
        }

        let defaults = PostingOptions::default();
        let posting = PostingOptions {
            post_delay: parse_millis(get("JOBS_POST_DELAY_MS"), defaults.post_delay)
                .context("JOBS_POST_DELAY_MS must be a number of milliseconds")?,
            channel_switch_delay: parse_millis(
                get("JOBS_CHANNEL_SWITCH_DELAY_MS"),
                defaults.channel_switch_delay,
            )
            .context("JOBS_CHANNEL_SWITCH_DELAY_MS must be a number of milliseconds")?,
        };

        Ok(Self {
            discord_token: get("DISCORD_TOKEN"),
            data_dir: get("JOBS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            routes,
            posting,
        })
    }

    /// Token or a config error. Live runs cannot work without it.
    pub fn require_token(&self) -> Result<&str> {
        self.discord_token
            .as_deref()
            .context("DISCORD_TOKEN must be set")
    }

    pub fn jobs_path(&self) -> PathBuf {
        self.data_dir.join(JOBS_FILE_NAME)
    }

    pub fn posted_jobs_path(&self) -> PathBuf {
        self.data_dir.join(POSTED_JOBS_FILE_NAME)
    }
}

fn parse_millis(value: Option<String>, default: Duration) -> Result<Duration> {
    match value {
        Some(raw) => Ok(Duration::from_millis(raw.parse::<u64>()?)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_any_vars() {
        let config = config(&[]).unwrap();

        assert!(config.discord_token.is_none());
        assert!(config.require_token().is_err());
        assert_eq!(config.jobs_path(), PathBuf::from(".github/data/new_jobs.json"));
        assert_eq!(
            config.posted_jobs_path(),
            PathBuf::from(".github/data/posted_jobs.json")
        );
        assert_eq!(config.posting.post_delay, Duration::from_millis(1500));
        assert_eq!(config.posting.channel_switch_delay, Duration::from_millis(3000));
        assert!(!config.routes.is_multi_channel());
        assert_eq!(config.routes.default_channel(), None);
    }

    #[test]
    fn reads_channels_and_ignores_blank_values() {
        let config = config(&[
            ("DISCORD_TOKEN", "abc"),
            ("DISCORD_CHANNEL_ID", "100"),
            ("DISCORD_SALES_CHANNEL_ID", "200"),
            ("DISCORD_HR_CHANNEL_ID", "   "),
            ("DISCORD_SEATTLE_CHANNEL_ID", "300"),
        ])
        .unwrap();

        assert_eq!(config.require_token().unwrap(), "abc");
        assert_eq!(config.routes.resolve_channel(JobCategory::Sales), Some("200"));
        assert_eq!(config.routes.resolve_channel(JobCategory::HumanResources), None);
        assert_eq!(config.routes.destination(JobCategory::HumanResources), Some("100"));
        assert_eq!(config.routes.location_count(), 1);
    }

    #[test]
    fn custom_data_dir_and_delays() {
        let config = config(&[
            ("JOBS_DATA_DIR", "/tmp/jobs"),
            ("JOBS_POST_DELAY_MS", "0"),
            ("JOBS_CHANNEL_SWITCH_DELAY_MS", "250"),
        ])
        .unwrap();

        assert_eq!(config.jobs_path(), PathBuf::from("/tmp/jobs/new_jobs.json"));
        assert_eq!(config.posting.post_delay, Duration::ZERO);
        assert_eq!(config.posting.channel_switch_delay, Duration::from_millis(250));
    }

    #[test]
    fn invalid_delay_is_an_error() {
        assert!(config(&[("JOBS_POST_DELAY_MS", "soon")]).is_err());
    }
}
