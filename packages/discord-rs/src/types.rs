use serde::{Deserialize, Serialize};

/// Discord channel type codes we care about.
///
/// See <https://discord.com/developers/docs/resources/channel#channel-object-channel-types>.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelType {
    GuildText,
    GuildAnnouncement,
    GuildForum,
    Other(u8),
}

impl From<u8> for ChannelType {
    fn from(code: u8) -> Self {
        match code {
            0 => ChannelType::GuildText,
            5 => ChannelType::GuildAnnouncement,
            15 => ChannelType::GuildForum,
            other => ChannelType::Other(other),
        }
    }
}

/// A tag that can be applied to posts in a forum channel.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForumTag {
    pub id: String,
    pub name: String,
}

/// The subset of the channel object needed to decide how to post.
#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: Option<String>,
    #[serde(default)]
    pub available_tags: Vec<ForumTag>,
}

impl Channel {
    pub fn channel_type(&self) -> ChannelType {
        ChannelType::from(self.kind)
    }

    pub fn is_forum(&self) -> bool {
        self.channel_type() == ChannelType::GuildForum
    }

    /// Name for log lines; falls back to the id for unnamed channels.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

impl Embed {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Look up a field value by name. Handy in tests.
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

/// Body for `POST /channels/{id}/messages`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

impl CreateMessage {
    pub fn with_embed(embed: Embed) -> Self {
        Self {
            content: None,
            embeds: vec![embed],
        }
    }
}

/// Body for `POST /channels/{id}/threads` on a forum channel.
#[derive(Debug, Clone, Serialize)]
pub struct StartForumThread {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_archive_duration: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub applied_tags: Vec<String>,
    pub message: CreateMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub id: String,
    pub channel_id: String,
}

/// Thread channel returned when a forum post is created.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadChannel {
    pub id: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RateLimitBody {
    pub retry_after: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embed_skips_empty_optionals() {
        let embed = Embed::new("Backend Engineer");
        let json = serde_json::to_value(&embed).unwrap();

        assert_eq!(json, serde_json::json!({ "title": "Backend Engineer" }));
    }

    #[test]
    fn forum_channel_detection() {
        let channel: Channel = serde_json::from_value(serde_json::json!({
            "id": "123",
            "type": 15,
            "name": "tech-jobs",
            "available_tags": [{ "id": "9", "name": "Remote" }]
        }))
        .unwrap();

        assert!(channel.is_forum());
        assert_eq!(channel.display_name(), "tech-jobs");
        assert_eq!(channel.available_tags.len(), 1);
    }

    #[test]
    fn text_channel_without_tags() {
        let channel: Channel =
            serde_json::from_value(serde_json::json!({ "id": "7", "type": 0 })).unwrap();

        assert_eq!(channel.channel_type(), ChannelType::GuildText);
        assert!(channel.available_tags.is_empty());
        assert_eq!(channel.display_name(), "7");
    }
}
