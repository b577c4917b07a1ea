//! Announcing jobs: the posted-jobs store, message rendering and the posting loop.

pub mod render;
pub mod runner;
pub mod store;

pub use render::{build_job_message, clean_description, format_posted_date, thread_name, JobMessage};
pub use runner::{JobPoster, PostingOptions, RunSummary};
pub use store::{PostedJobStore, MAX_POSTED_ENTRIES};
