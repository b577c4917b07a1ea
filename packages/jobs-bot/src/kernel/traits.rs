use anyhow::Result;
use async_trait::async_trait;

use crate::domains::posting::JobMessage;

// =============================================================================
// Messenger Trait (Infrastructure - Discord)
// =============================================================================

#[async_trait]
pub trait JobMessenger: Send + Sync {
    /// Announce one job in `channel_id`. An `Err` means nothing was posted.
    async fn post_job(&self, channel_id: &str, message: &JobMessage) -> Result<()>;
}
