//! Kernel module - outbound messaging and test doubles.

pub mod discord_messenger;
pub mod test_dependencies;
pub mod traits;

pub use discord_messenger::{DiscordMessenger, DryRunMessenger};
pub use test_dependencies::{PostCall, RecordingMessenger};
pub use traits::*;
