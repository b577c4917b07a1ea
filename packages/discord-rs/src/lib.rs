//! Minimal Discord REST API client.
//!
//! Covers what a posting bot needs: look up a channel, send a message to a
//! text channel, and open a new post in a forum channel. Authenticates as a
//! bot user.
//!
//! # Example
//!
//! ```rust,ignore
//! use discord::{CreateMessage, DiscordClient, Embed};
//!
//! let client = DiscordClient::new("bot-token".into());
//! let embed = Embed::new("Backend Engineer").url("https://example.com/apply");
//! client.create_message("1234", &CreateMessage::with_embed(embed)).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{DiscordError, Result};
pub use types::{
    Channel, ChannelType, CreateMessage, Embed, EmbedField, ForumTag, Message, StartForumThread,
    ThreadChannel,
};

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use types::RateLimitBody;

const BASE_URL: &str = "https://discord.com/api/v10";

pub struct DiscordClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl DiscordClient {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root (proxies, local fakes).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Fetch a channel, including the forum tags for forum channels.
    pub async fn get_channel(&self, channel_id: &str) -> Result<Channel> {
        let url = format!("{}/channels/{}", self.base_url, channel_id);
        self.send(self.client.get(&url)).await
    }

    /// Post a message into a text or announcement channel.
    pub async fn create_message(
        &self,
        channel_id: &str,
        message: &CreateMessage,
    ) -> Result<Message> {
        let url = format!("{}/channels/{}/messages", self.base_url, channel_id);
        let message: Message = self.send(self.client.post(&url).json(message)).await?;
        tracing::debug!(channel_id, message_id = %message.id, "Discord message created");
        Ok(message)
    }

    /// Create a new post (thread + starter message) in a forum channel.
    pub async fn start_forum_thread(
        &self,
        channel_id: &str,
        thread: &StartForumThread,
    ) -> Result<ThreadChannel> {
        let url = format!("{}/channels/{}/threads", self.base_url, channel_id);
        let created: ThreadChannel = self.send(self.client.post(&url).json(thread)).await?;
        tracing::debug!(channel_id, thread_id = %created.id, "Discord forum thread created");
        Ok(created)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let resp = request
            .header("Authorization", format!("Bot {}", self.token))
            .send()
            .await?;

        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }
}

async fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    if status == StatusCode::TOO_MANY_REQUESTS {
        if let Ok(limit) = serde_json::from_str::<RateLimitBody>(&body) {
            tracing::warn!(retry_after = limit.retry_after, "Discord rate limit hit");
            return Err(DiscordError::RateLimited {
                retry_after: limit.retry_after,
            });
        }
    }

    Err(DiscordError::Api {
        status: status.as_u16(),
        message: body,
    })
}
