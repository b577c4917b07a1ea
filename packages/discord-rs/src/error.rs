use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiscordError>;

#[derive(Debug, Error)]
pub enum DiscordError {
    /// Request never got a response (DNS, TLS, connection reset, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Discord answered with a non-success status.
    #[error("Discord API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// 429 from Discord. `retry_after` is in seconds.
    #[error("rate limited, retry after {retry_after}s")]
    RateLimited { retry_after: f64 },
}
