//! Location detection for the optional per-city channels.
//!
//! The city field is the most reliable signal, so it is checked before the
//! free text. State codes only count for remote postings; otherwise a "CA"
//! inside a company blurb would route everything to San Francisco.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::models::RawJobRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationChannel {
    RemoteUsa,
    NewYork,
    Austin,
    Chicago,
    Seattle,
    Redmond,
    MountainView,
    SanFrancisco,
    Sunnyvale,
    SanBruno,
}

impl LocationChannel {
    pub const ALL: [LocationChannel; 10] = [
        LocationChannel::RemoteUsa,
        LocationChannel::NewYork,
        LocationChannel::Austin,
        LocationChannel::Chicago,
        LocationChannel::Seattle,
        LocationChannel::Redmond,
        LocationChannel::MountainView,
        LocationChannel::SanFrancisco,
        LocationChannel::Sunnyvale,
        LocationChannel::SanBruno,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            LocationChannel::RemoteUsa => "remote-usa",
            LocationChannel::NewYork => "new-york",
            LocationChannel::Austin => "austin",
            LocationChannel::Chicago => "chicago",
            LocationChannel::Seattle => "seattle",
            LocationChannel::Redmond => "redmond",
            LocationChannel::MountainView => "mountain-view",
            LocationChannel::SanFrancisco => "san-francisco",
            LocationChannel::Sunnyvale => "sunnyvale",
            LocationChannel::SanBruno => "san-bruno",
        }
    }
}

impl fmt::Display for LocationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Substring city matches, checked in this order.
const CITY_NAMES: &[(&str, LocationChannel)] = &[
    ("san francisco", LocationChannel::SanFrancisco),
    ("mountain view", LocationChannel::MountainView),
    ("sunnyvale", LocationChannel::Sunnyvale),
    ("san bruno", LocationChannel::SanBruno),
    ("new york", LocationChannel::NewYork),
    ("manhattan", LocationChannel::NewYork),
    ("brooklyn", LocationChannel::NewYork),
    ("austin", LocationChannel::Austin),
    ("chicago", LocationChannel::Chicago),
    ("seattle", LocationChannel::Seattle),
    ("redmond", LocationChannel::Redmond),
];

/// Abbreviations only match as whole tokens of the city field.
const CITY_ABBREVIATIONS: &[(&str, LocationChannel)] = &[
    ("sf", LocationChannel::SanFrancisco),
    ("nyc", LocationChannel::NewYork),
];

lazy_static! {
    static ref REMOTE_REGEX: Regex = Regex::new(r"\b(?:remote|work from home|wfh)\b").unwrap();
    static ref REMOTE_ANYWHERE_REGEX: Regex =
        Regex::new(r"\b(?:remote|work from home|wfh|distributed|anywhere)\b").unwrap();
    static ref USA_REGEX: Regex =
        Regex::new(r"\b(?:usa|united states|u\.s\.|us only|us-based|us remote)\b").unwrap();
    static ref CA_REGEX: Regex = Regex::new(r"\bca\b").unwrap();
    static ref NY_REGEX: Regex = Regex::new(r"\bny\b").unwrap();
    static ref TX_REGEX: Regex = Regex::new(r"\btx\b").unwrap();
    static ref WA_REGEX: Regex = Regex::new(r"\bwa\b").unwrap();
    static ref IL_REGEX: Regex = Regex::new(r"\bil\b").unwrap();
}

pub fn detect_location(job: &RawJobRecord) -> Option<LocationChannel> {
    let city = job.city().trim().to_lowercase();
    let state = job.state().trim().to_lowercase();
    let combined = format!(
        "{} {} {} {}",
        job.title().to_lowercase(),
        job.description().to_lowercase(),
        city,
        state
    );

    if let Some(location) = match_city_name(&city) {
        return Some(location);
    }

    for (abbr, location) in CITY_ABBREVIATIONS {
        if city.split_whitespace().any(|token| token == *abbr) {
            return Some(*location);
        }
    }

    if let Some(location) = match_city_name(&combined) {
        return Some(location);
    }

    if REMOTE_REGEX.is_match(&combined) {
        if let Some(location) = remote_state(&state, &combined) {
            return Some(location);
        }
    }

    if REMOTE_ANYWHERE_REGEX.is_match(&combined) && USA_REGEX.is_match(&combined) {
        return Some(LocationChannel::RemoteUsa);
    }

    None
}

fn match_city_name(text: &str) -> Option<LocationChannel> {
    CITY_NAMES
        .iter()
        .find(|(name, _)| text.contains(name))
        .map(|(_, location)| *location)
}

fn remote_state(state: &str, combined: &str) -> Option<LocationChannel> {
    if state == "ca" || CA_REGEX.is_match(combined) {
        return Some(LocationChannel::SanFrancisco);
    }
    if state == "ny" || NY_REGEX.is_match(combined) {
        return Some(LocationChannel::NewYork);
    }
    if state == "tx" || TX_REGEX.is_match(combined) {
        return Some(LocationChannel::Austin);
    }
    // Redmond never reaches here: city names were matched first.
    if state == "wa" || WA_REGEX.is_match(combined) {
        return Some(LocationChannel::Seattle);
    }
    if state == "il" || IL_REGEX.is_match(combined) {
        return Some(LocationChannel::Chicago);
    }
    None
}
