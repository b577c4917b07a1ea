pub mod jobs;
pub mod posting;
