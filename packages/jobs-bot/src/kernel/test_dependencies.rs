//! Test doubles for the messaging seam.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::posting::JobMessage;
use crate::kernel::JobMessenger;

// =============================================================================
// Recording Messenger
// =============================================================================

/// Arguments captured from a post_job call
#[derive(Debug, Clone)]
pub struct PostCall {
    pub channel_id: String,
    pub message: JobMessage,
}

/// Records every post and fails for configured channels or embed titles.
#[derive(Clone, Default)]
pub struct RecordingMessenger {
    calls: Arc<Mutex<Vec<PostCall>>>,
    failing_channels: Arc<Mutex<HashSet<String>>>,
    failing_titles: Arc<Mutex<HashSet<String>>>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every post to this channel returns an error.
    pub fn fail_channel(self, channel_id: &str) -> Self {
        self.failing_channels
            .lock()
            .unwrap()
            .insert(channel_id.to_string());
        self
    }

    /// Every post whose embed title equals `title` returns an error.
    pub fn fail_title(self, title: &str) -> Self {
        self.failing_titles.lock().unwrap().insert(title.to_string());
        self
    }

    /// Attempted posts, successful or not, in call order.
    pub fn calls(&self) -> Vec<PostCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Channel ids of attempted posts, in call order.
    pub fn channels(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|call| call.channel_id)
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl JobMessenger for RecordingMessenger {
    async fn post_job(&self, channel_id: &str, message: &JobMessage) -> Result<()> {
        self.calls.lock().unwrap().push(PostCall {
            channel_id: channel_id.to_string(),
            message: message.clone(),
        });

        if self.failing_channels.lock().unwrap().contains(channel_id) {
            anyhow::bail!("channel {} rejected the message", channel_id);
        }
        if self
            .failing_titles
            .lock()
            .unwrap()
            .contains(&message.embed.title)
        {
            anyhow::bail!("message '{}' rejected", message.embed.title);
        }

        Ok(())
    }
}
