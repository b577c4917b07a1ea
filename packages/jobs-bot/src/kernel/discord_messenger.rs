//! Discord-backed messenger (implements JobMessenger trait)

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use discord::{Channel, CreateMessage, DiscordClient, ForumTag, StartForumThread};
use tokio::sync::Mutex;

use crate::domains::posting::JobMessage;
use crate::kernel::JobMessenger;

/// Forum posts auto-archive after 7 days without activity.
const FORUM_AUTO_ARCHIVE_MINUTES: u32 = 10080;

/// Discord caps applied tags per forum post at 5.
const MAX_APPLIED_TAGS: usize = 5;

/// Posts jobs as forum threads (forum channels) or plain messages (everything else).
pub struct DiscordMessenger {
    client: DiscordClient,
    channels: Mutex<HashMap<String, Channel>>,
}

impl DiscordMessenger {
    pub fn new(client: DiscordClient) -> Self {
        Self {
            client,
            channels: Mutex::new(HashMap::new()),
        }
    }

    async fn channel(&self, channel_id: &str) -> Result<Channel> {
        let mut channels = self.channels.lock().await;
        if let Some(channel) = channels.get(channel_id) {
            return Ok(channel.clone());
        }

        let channel = self
            .client
            .get_channel(channel_id)
            .await
            .with_context(|| format!("Channel not found: {}", channel_id))?;
        channels.insert(channel_id.to_string(), channel.clone());
        Ok(channel)
    }
}

#[async_trait]
impl JobMessenger for DiscordMessenger {
    async fn post_job(&self, channel_id: &str, message: &JobMessage) -> Result<()> {
        let channel = self.channel(channel_id).await?;
        let body = CreateMessage::with_embed(message.embed.clone());

        if channel.is_forum() {
            let thread = StartForumThread {
                name: message.thread_name.clone(),
                auto_archive_duration: Some(FORUM_AUTO_ARCHIVE_MINUTES),
                applied_tags: select_forum_tags(&channel.available_tags, &message.tags),
                message: body,
            };
            self.client
                .start_forum_thread(channel_id, &thread)
                .await
                .context("Failed to create forum post")?;
            tracing::info!(
                thread = %message.thread_name,
                channel = channel.display_name(),
                "Created forum post"
            );
        } else {
            self.client
                .create_message(channel_id, &body)
                .await
                .context("Failed to send message")?;
            tracing::info!(
                title = %message.embed.title,
                channel = channel.display_name(),
                "Posted message"
            );
        }

        Ok(())
    }
}

/// Forum tag ids whose name equals or contains one of the job's tags
/// (case-insensitive), in job-tag order, at most five.
pub fn select_forum_tags(available: &[ForumTag], job_tags: &[String]) -> Vec<String> {
    let mut applied: Vec<String> = Vec::new();

    for tag in job_tags {
        if applied.len() >= MAX_APPLIED_TAGS {
            break;
        }
        let tag = tag.to_lowercase();
        let found = available.iter().find(|forum_tag| {
            let name = forum_tag.name.to_lowercase();
            name == tag || name.contains(&tag)
        });
        if let Some(forum_tag) = found {
            if !applied.contains(&forum_tag.id) {
                applied.push(forum_tag.id.clone());
            }
        }
    }

    applied
}

/// Logs what would be posted instead of calling Discord (`--dry-run`).
#[derive(Default)]
pub struct DryRunMessenger;

#[async_trait]
impl JobMessenger for DryRunMessenger {
    async fn post_job(&self, channel_id: &str, message: &JobMessage) -> Result<()> {
        tracing::info!(
            channel_id,
            thread = %message.thread_name,
            tags = %message.tags.join(","),
            "[dry-run] Would post job"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forum_tag(id: &str, name: &str) -> ForumTag {
        ForumTag {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn matches_forum_tags_case_insensitively() {
        let available = vec![forum_tag("1", "remote"), forum_tag("2", "Senior Roles")];

        let applied = select_forum_tags(&available, &tags(&["Senior", "Remote", "Python"]));

        assert_eq!(applied, vec!["2", "1"]);
    }

    #[test]
    fn caps_applied_tags_at_five() {
        let available: Vec<ForumTag> = (0..8)
            .map(|i| forum_tag(&i.to_string(), &format!("t{}", i)))
            .collect();
        let job_tags: Vec<String> = (0..8).map(|i| format!("T{}", i)).collect();

        assert_eq!(select_forum_tags(&available, &job_tags).len(), MAX_APPLIED_TAGS);
    }

    #[test]
    fn no_forum_tags_means_none_applied() {
        assert!(select_forum_tags(&[], &tags(&["Remote"])).is_empty());
    }

    #[tokio::test]
    async fn dry_run_always_succeeds() {
        let message = JobMessage {
            thread_name: "🏢 Engineer @ Acme".into(),
            embed: discord::Embed::new("Engineer"),
            tags: tags(&["MidLevel"]),
        };

        assert!(DryRunMessenger.post_job("123", &message).await.is_ok());
    }
}
