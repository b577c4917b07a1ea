use std::collections::HashMap;

use super::location::{detect_location, LocationChannel};
use super::models::{JobCategory, RawJobRecord};

/// Static category/location → Discord channel lookup built from config.
#[derive(Debug, Clone, Default)]
pub struct ChannelRoutes {
    categories: HashMap<JobCategory, String>,
    locations: HashMap<LocationChannel, String>,
    default_channel: Option<String>,
}

impl ChannelRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: JobCategory, channel_id: impl Into<String>) -> Self {
        self.categories.insert(category, channel_id.into());
        self
    }

    pub fn with_location(mut self, location: LocationChannel, channel_id: impl Into<String>) -> Self {
        self.locations.insert(location, channel_id.into());
        self
    }

    pub fn with_default(mut self, channel_id: impl Into<String>) -> Self {
        self.default_channel = Some(channel_id.into());
        self
    }

    /// Channel configured for `category`, without any fallback.
    pub fn resolve_channel(&self, category: JobCategory) -> Option<&str> {
        self.categories.get(&category).map(String::as_str)
    }

    /// Where a job of `category` goes: its own channel, else the default one.
    pub fn destination(&self, category: JobCategory) -> Option<&str> {
        self.resolve_channel(category)
            .or(self.default_channel.as_deref())
    }

    pub fn default_channel(&self) -> Option<&str> {
        self.default_channel.as_deref()
    }

    /// Secondary per-city channel for a job, when one is configured.
    pub fn location_channel(&self, job: &RawJobRecord) -> Option<&str> {
        if self.locations.is_empty() {
            return None;
        }
        let location = detect_location(job)?;
        self.locations.get(&location).map(String::as_str)
    }

    /// True when at least one category has its own channel.
    pub fn is_multi_channel(&self) -> bool {
        !self.categories.is_empty()
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_returns_none_for_unconfigured_category() {
        let routes = ChannelRoutes::new()
            .with_category(JobCategory::Sales, "sales-1")
            .with_default("general");

        assert_eq!(routes.resolve_channel(JobCategory::Sales), Some("sales-1"));
        assert_eq!(routes.resolve_channel(JobCategory::Finance), None);
    }

    #[test]
    fn destination_falls_back_to_default() {
        let routes = ChannelRoutes::new()
            .with_category(JobCategory::Sales, "sales-1")
            .with_default("general");

        assert_eq!(routes.destination(JobCategory::Finance), Some("general"));
        assert_eq!(routes.destination(JobCategory::Sales), Some("sales-1"));
    }

    #[test]
    fn no_destination_without_default() {
        let routes = ChannelRoutes::new().with_category(JobCategory::Tech, "tech-1");

        assert_eq!(routes.destination(JobCategory::HumanResources), None);
        assert!(routes.is_multi_channel());
    }

    #[test]
    fn location_channel_requires_configured_location() {
        let routes = ChannelRoutes::new().with_location(LocationChannel::Seattle, "sea-1");
        let seattle = RawJobRecord {
            job_title: Some("Engineer".into()),
            job_city: Some("Seattle".into()),
            ..Default::default()
        };
        let austin = RawJobRecord {
            job_title: Some("Engineer".into()),
            job_city: Some("Austin".into()),
            ..Default::default()
        };

        assert_eq!(routes.location_channel(&seattle), Some("sea-1"));
        assert_eq!(routes.location_channel(&austin), None);
    }
}
