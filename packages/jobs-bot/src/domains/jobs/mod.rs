//! Job postings: identity, classification, routing and tagging.

pub mod classifier;
pub mod location;
pub mod models;
pub mod routing;
pub mod tags;

pub use classifier::{classify, matching_rule, ClassificationRule};
pub use location::{detect_location, LocationChannel};
pub use models::{JobCategory, JobIdentifier, RawJobRecord};
pub use routing::ChannelRoutes;
pub use tags::generate_tags;
