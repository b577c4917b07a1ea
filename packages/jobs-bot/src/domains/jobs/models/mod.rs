pub mod category;
pub mod identifier;
pub mod job;

pub use category::JobCategory;
pub use identifier::{normalize_part, JobIdentifier};
pub use job::RawJobRecord;
