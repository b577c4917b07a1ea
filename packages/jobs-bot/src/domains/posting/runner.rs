//! The posting loop: dedup, classify, route, post, remember.
//!
//! Jobs are handled one at a time in ingestion order. A job is marked as
//! posted only after Discord accepted it, and the store is saved right away,
//! so an aborted run never re-announces what already went out.

use std::time::Duration;

use chrono::Utc;

use super::render::{build_job_message, JobMessage};
use super::store::PostedJobStore;
use crate::domains::jobs::{classify, ChannelRoutes, JobIdentifier, RawJobRecord};
use crate::kernel::JobMessenger;

pub const DEFAULT_POST_DELAY: Duration = Duration::from_millis(1500);
pub const DEFAULT_CHANNEL_SWITCH_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy)]
pub struct PostingOptions {
    /// Pause between consecutive posts to the same channel.
    pub post_delay: Duration,
    /// Pause before posting to a different channel than the previous post.
    pub channel_switch_delay: Duration,
}

impl Default for PostingOptions {
    fn default() -> Self {
        Self {
            post_delay: DEFAULT_POST_DELAY,
            channel_switch_delay: DEFAULT_CHANNEL_SWITCH_DELAY,
        }
    }
}

impl PostingOptions {
    pub fn without_delays() -> Self {
        Self {
            post_delay: Duration::ZERO,
            channel_switch_delay: Duration::ZERO,
        }
    }
}

/// End-of-run counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub already_posted: usize,
    pub posted: usize,
    pub failed: usize,
    /// No category channel and no default channel configured.
    pub unrouted: usize,
}

pub struct JobPoster<'a> {
    messenger: &'a dyn JobMessenger,
    routes: &'a ChannelRoutes,
    options: PostingOptions,
}

impl<'a> JobPoster<'a> {
    pub fn new(messenger: &'a dyn JobMessenger, routes: &'a ChannelRoutes) -> Self {
        Self {
            messenger,
            routes,
            options: PostingOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PostingOptions) -> Self {
        self.options = options;
        self
    }

    /// Announce every job not yet in `store`. Per-job failures are counted
    /// and logged; the loop always runs to the end.
    pub async fn post_jobs(&self, jobs: &[RawJobRecord], store: &mut PostedJobStore) -> RunSummary {
        let mut summary = RunSummary {
            total: jobs.len(),
            ..Default::default()
        };
        let mut last_channel: Option<String> = None;

        for job in jobs {
            let id = JobIdentifier::compute(job);
            if store.has_been_posted(&id) {
                tracing::debug!(
                    job_id = %id,
                    title = job.title(),
                    employer = job.employer(),
                    "Skipping already posted job"
                );
                summary.already_posted += 1;
                continue;
            }

            let category = classify(job);
            let Some(channel_id) = self.routes.destination(category) else {
                tracing::warn!(
                    job_id = %id,
                    category = %category,
                    "No channel configured for job, skipping"
                );
                summary.unrouted += 1;
                continue;
            };

            self.pause_before(channel_id, &mut last_channel).await;

            let message = build_job_message(job, Utc::now());
            match self.messenger.post_job(channel_id, &message).await {
                Ok(()) => {
                    tracing::info!(
                        job_id = %id,
                        category = %category,
                        channel_id,
                        "Posted job"
                    );
                    store.mark_posted(id);
                    summary.posted += 1;
                    self.post_location_copy(job, channel_id, &message, &mut last_channel)
                        .await;
                }
                Err(e) => {
                    tracing::error!(
                        job_id = %id,
                        channel_id,
                        error = %format!("{:#}", e),
                        "Failed to post job"
                    );
                    summary.failed += 1;
                }
            }
        }

        summary
    }

    /// Wait before posting to `channel_id`: `post_delay` after a post to the
    /// same channel, `channel_switch_delay` after any other. Nothing before
    /// the first post of the run.
    async fn pause_before(&self, channel_id: &str, last_channel: &mut Option<String>) {
        if let Some(previous) = last_channel.as_deref() {
            let pause = if previous == channel_id {
                self.options.post_delay
            } else {
                self.options.channel_switch_delay
            };
            if !pause.is_zero() {
                tokio::time::sleep(pause).await;
            }
        }
        *last_channel = Some(channel_id.to_string());
    }

    /// Best-effort copy to the job's city channel. Failures are only logged:
    /// the job already counts as posted.
    async fn post_location_copy(
        &self,
        job: &RawJobRecord,
        primary_channel: &str,
        message: &JobMessage,
        last_channel: &mut Option<String>,
    ) {
        let Some(location_channel) = self.routes.location_channel(job) else {
            return;
        };
        if location_channel == primary_channel {
            return;
        }

        self.pause_before(location_channel, last_channel).await;
        if let Err(e) = self.messenger.post_job(location_channel, message).await {
            tracing::warn!(
                channel_id = location_channel,
                error = %format!("{:#}", e),
                "Failed to post job to location channel"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::jobs::{JobCategory, LocationChannel};
    use crate::kernel::RecordingMessenger;

    fn job(title: &str, employer: &str, city: &str) -> RawJobRecord {
        RawJobRecord {
            job_title: Some(title.to_string()),
            employer_name: Some(employer.to_string()),
            job_city: Some(city.to_string()),
            ..Default::default()
        }
    }

    fn store(dir: &tempfile::TempDir) -> PostedJobStore {
        PostedJobStore::load(dir.path().join("posted_jobs.json"))
    }

    #[tokio::test]
    async fn same_job_twice_posts_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);
        let messenger = RecordingMessenger::new();
        let routes = ChannelRoutes::new().with_default("general");
        let poster = JobPoster::new(&messenger, &routes).with_options(PostingOptions::without_delays());

        let meta = job("Software Engineer, Backend", "Meta", "San Francisco");
        let summary = poster.post_jobs(&[meta.clone(), meta], &mut store).await;

        assert_eq!(messenger.call_count(), 1);
        assert_eq!(summary.posted, 1);
        assert_eq!(summary.already_posted, 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn routes_by_category() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);
        let messenger = RecordingMessenger::new();
        let routes = ChannelRoutes::new()
            .with_category(JobCategory::Tech, "tech")
            .with_category(JobCategory::HumanResources, "hr");
        let poster = JobPoster::new(&messenger, &routes).with_options(PostingOptions::without_delays());

        poster
            .post_jobs(
                &[
                    job("Backend Engineer", "Stripe", "Seattle"),
                    job("People Operations Manager", "Stripe", "Seattle"),
                ],
                &mut store,
            )
            .await;

        assert_eq!(messenger.channels(), vec!["tech", "hr"]);
    }

    #[tokio::test]
    async fn failed_post_is_not_marked() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);
        let messenger = RecordingMessenger::new().fail_title("Recruiter");
        let routes = ChannelRoutes::new().with_default("general");
        let poster = JobPoster::new(&messenger, &routes).with_options(PostingOptions::without_delays());

        let recruiter = job("Recruiter", "Acme", "Austin");
        let summary = poster
            .post_jobs(&[recruiter.clone(), job("Engineer", "Acme", "Austin")], &mut store)
            .await;

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.posted, 1);
        assert!(!store.has_been_posted(&JobIdentifier::compute(&recruiter)));
    }

    #[tokio::test(start_paused = true)]
    async fn delays_depend_on_channel_changes() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);
        let messenger = RecordingMessenger::new();
        let routes = ChannelRoutes::new()
            .with_category(JobCategory::Sales, "sales")
            .with_default("general");
        let poster = JobPoster::new(&messenger, &routes).with_options(PostingOptions {
            post_delay: Duration::from_millis(100),
            channel_switch_delay: Duration::from_millis(1000),
        });

        let started = tokio::time::Instant::now();
        poster
            .post_jobs(
                &[
                    job("Engineer", "A", "X"),
                    job("Engineer", "B", "X"),
                    job("Account Executive", "C", "X"),
                ],
                &mut store,
            )
            .await;

        // general -> general (100ms), general -> sales (1000ms)
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(1100), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(1200), "{elapsed:?}");

        // tech -> seattle copy -> tech -> seattle copy: three channel switches.
        let messenger = RecordingMessenger::new();
        let routes = ChannelRoutes::new()
            .with_category(JobCategory::Tech, "tech")
            .with_location(LocationChannel::Seattle, "seattle");
        let poster = JobPoster::new(&messenger, &routes).with_options(PostingOptions {
            post_delay: Duration::from_millis(100),
            channel_switch_delay: Duration::from_millis(1000),
        });

        let started = tokio::time::Instant::now();
        poster
            .post_jobs(
                &[
                    job("Engineer", "D", "Seattle"),
                    job("Engineer", "E", "Seattle"),
                ],
                &mut store,
            )
            .await;

        assert_eq!(messenger.channels(), vec!["tech", "seattle", "tech", "seattle"]);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(3000), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(3100), "{elapsed:?}");
    }

    #[tokio::test]
    async fn duplicate_of_evicted_job_posts_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir).with_max_entries(3);
        for id in ["z1", "z2", "z3"] {
            store.mark_posted(JobIdentifier::from(id));
        }
        let messenger = RecordingMessenger::new();
        let routes = ChannelRoutes::new().with_default("general");
        let poster = JobPoster::new(&messenger, &routes).with_options(PostingOptions::without_delays());

        let acme = job("Engineer", "Acme", "Austin");
        let summary = poster.post_jobs(&[acme.clone(), acme], &mut store).await;

        assert_eq!(messenger.call_count(), 1);
        assert_eq!(summary.posted, 1);
        assert_eq!(summary.already_posted, 1);
    }
}
