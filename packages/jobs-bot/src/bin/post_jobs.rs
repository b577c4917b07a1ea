//! Post newly scraped jobs to Discord
//!
//! Reads the fetcher's `new_jobs.json`, skips jobs already recorded in
//! `posted_jobs.json`, and posts the rest to their category channels.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use discord::DiscordClient;
use jobs_bot_core::config::Config;
use jobs_bot_core::domains::jobs::RawJobRecord;
use jobs_bot_core::domains::posting::{JobPoster, PostedJobStore};
use jobs_bot_core::kernel::{DiscordMessenger, DryRunMessenger, JobMessenger};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "post_jobs")]
#[command(about = "Post new job listings to Discord channels")]
struct Cli {
    /// Jobs to post (defaults to <JOBS_DATA_DIR>/new_jobs.json)
    #[arg(long)]
    jobs_file: Option<PathBuf>,

    /// Posted job ids store (defaults to <JOBS_DATA_DIR>/posted_jobs.json)
    #[arg(long)]
    posted_file: Option<PathBuf>,

    /// Log what would be posted without calling Discord or saving the store
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,jobs_bot_core=debug,discord=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        multi_channel = config.routes.is_multi_channel(),
        location_channels = config.routes.location_count(),
        dry_run = cli.dry_run,
        "Configuration loaded"
    );

    let jobs_path = cli.jobs_file.unwrap_or_else(|| config.jobs_path());
    let jobs = RawJobRecord::load_all(&jobs_path)?;
    if jobs.is_empty() {
        tracing::info!("No new jobs to post");
        return Ok(());
    }

    let messenger: Box<dyn JobMessenger> = if cli.dry_run {
        Box::new(DryRunMessenger)
    } else {
        let token = config.require_token()?;
        Box::new(DiscordMessenger::new(DiscordClient::new(token.to_string())))
    };

    // Dry runs read the real store but write to a scratch copy.
    let posted_path = cli.posted_file.unwrap_or_else(|| config.posted_jobs_path());
    let scratch_dir = cli
        .dry_run
        .then(|| std::env::temp_dir().join(format!("post_jobs_dry_run_{}", std::process::id())));
    let mut store = PostedJobStore::load(&posted_path);
    if let Some(dir) = &scratch_dir {
        store = store.with_path(dir.join("posted_jobs.json"));
    }

    tracing::info!(
        jobs = jobs.len(),
        already_recorded = store.len(),
        "Posting jobs"
    );

    let poster = JobPoster::new(messenger.as_ref(), &config.routes).with_options(config.posting);
    let summary = poster.post_jobs(&jobs, &mut store).await;

    tracing::info!(
        total = summary.total,
        posted = summary.posted,
        already_posted = summary.already_posted,
        failed = summary.failed,
        unrouted = summary.unrouted,
        "Posting complete"
    );

    if let Some(dir) = scratch_dir {
        remove_scratch_dir(&dir);
    }

    Ok(())
}

/// Best-effort cleanup. The directory only exists once something was marked.
fn remove_scratch_dir(dir: &Path) {
    if !dir.exists() {
        return;
    }
    if let Err(e) = std::fs::remove_dir_all(dir) {
        tracing::warn!(
            path = %dir.display(),
            error = %e,
            "Failed to remove dry-run scratch directory"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scratch_dir_is_removed_with_contents() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("post_jobs_dry_run");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("posted_jobs.json"), "[]").unwrap();

        remove_scratch_dir(&dir);

        assert!(!dir.exists());
    }

    #[test]
    fn missing_scratch_dir_is_ignored() {
        let root = tempfile::tempdir().unwrap();

        remove_scratch_dir(&root.path().join("never_created"));

        assert!(root.path().exists());
    }
}
