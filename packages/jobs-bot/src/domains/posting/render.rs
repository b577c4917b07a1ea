//! Turns a job record into the Discord payload the messenger sends.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use discord::Embed;
use lazy_static::lazy_static;
use regex::Regex;

use crate::domains::jobs::{generate_tags, RawJobRecord};

pub const EMBED_COLOR: u32 = 0x00A8E8;

const MAX_THREAD_NAME_CHARS: usize = 100;
const MAX_EMBED_TITLE_CHARS: usize = 256;
const MIN_DESCRIPTION_CHARS: usize = 20;
const MAX_DESCRIPTION_CHARS: usize = 300;
const DESCRIPTION_WORD_BREAK_AFTER: usize = 250;
const DEFAULT_COMPANY_EMOJI: &str = "🏢";

lazy_static! {
    static ref CATEGORY_META_REGEX: Regex = Regex::new(r"(?i)Category:\s*[\w\s]+\.\s*").unwrap();
    static ref LEVEL_META_REGEX: Regex = Regex::new(r"(?i)Level:\s*\w+\.\s*").unwrap();
    static ref POSTED_META_REGEX: Regex = Regex::new(r"(?i)Posted:\s*[\w\s]+\.\s*").unwrap();
    static ref FULL_TITLE_META_REGEX: Regex = Regex::new(r"(?i)Full Title:\s*[^.]+\.\s*").unwrap();
    static ref HTML_TAG_REGEX: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
}

/// Everything needed to announce one job.
#[derive(Debug, Clone, PartialEq)]
pub struct JobMessage {
    /// Forum post title.
    pub thread_name: String,
    pub embed: Embed,
    pub tags: Vec<String>,
}

pub fn build_job_message(job: &RawJobRecord, now: DateTime<Utc>) -> JobMessage {
    let tags = generate_tags(job);

    let location = format!(
        "{}, {}",
        non_empty(job.city()).unwrap_or("Not specified"),
        non_empty(job.state()).unwrap_or("Remote")
    );

    let mut embed = Embed::new(truncate_chars(job.title(), MAX_EMBED_TITLE_CHARS))
        .color(EMBED_COLOR)
        .field(
            "🏢 Company",
            non_empty(job.employer()).unwrap_or("Not specified"),
            true,
        )
        .field("📍 Location", location, true)
        .field(
            "💰 Posted",
            format_posted_date(job.job_posted_at_datetime_utc.as_deref(), now),
            true,
        );

    if let Some(link) = job.job_apply_link.as_deref().and_then(non_empty) {
        embed = embed.url(link);
    }

    if !tags.is_empty() {
        let hashtags = tags
            .iter()
            .map(|t| format!("#{}", t))
            .collect::<Vec<_>>()
            .join(" ");
        embed = embed.field("🏷️ Tags", hashtags, false);
    }

    if let Some(description) = clean_description(job.job_description.as_deref()) {
        embed = embed.field("📋 Description", description, false);
    }

    JobMessage {
        thread_name: thread_name(job),
        embed,
        tags,
    }
}

/// `🏢 {title} @ {employer}`, capped at Discord's 100 character thread name limit.
pub fn thread_name(job: &RawJobRecord) -> String {
    let name = format!("{} {} @ {}", DEFAULT_COMPANY_EMOJI, job.title(), job.employer());
    truncate_chars(&name, MAX_THREAD_NAME_CHARS)
}

/// Human friendly "posted" label. Unknown or unparsable dates read "Recently".
pub fn format_posted_date(raw: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(posted) = raw.and_then(parse_posted_at) else {
        return "Recently".to_string();
    };

    let days = (now - posted).num_days();
    match days {
        d if d <= 0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        d if d < 7 => format!("{} days ago", d),
        d if d < 30 => {
            let weeks = d / 7;
            format!("{} week{} ago", weeks, if weeks > 1 { "s" } else { "" })
        }
        _ if posted.year() == now.year() => posted.format("%b %-d").to_string(),
        _ => posted.format("%b %-d, %Y").to_string(),
    }
}

fn parse_posted_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}

/// Strip scraper metadata and markup from a description and shorten it for
/// the embed. `None` when too little text is left to be worth showing.
pub fn clean_description(raw: Option<&str>) -> Option<String> {
    let raw = raw?;

    let mut cleaned = CATEGORY_META_REGEX.replace_all(raw, "").into_owned();
    cleaned = LEVEL_META_REGEX.replace_all(&cleaned, "").into_owned();
    cleaned = POSTED_META_REGEX.replace_all(&cleaned, "").into_owned();
    cleaned = FULL_TITLE_META_REGEX.replace_all(&cleaned, "").into_owned();
    cleaned = HTML_TAG_REGEX.replace_all(&cleaned, "").into_owned();
    let cleaned = WHITESPACE_REGEX.replace_all(&cleaned, " ").trim().to_string();

    if cleaned.chars().count() < MIN_DESCRIPTION_CHARS {
        return None;
    }
    if cleaned.chars().count() <= MAX_DESCRIPTION_CHARS {
        return Some(cleaned);
    }

    let mut truncated: String = cleaned.chars().take(MAX_DESCRIPTION_CHARS).collect();
    if let Some(last_space) = truncated.rfind(' ') {
        if truncated[..last_space].chars().count() > DESCRIPTION_WORD_BREAK_AFTER {
            truncated.truncate(last_space);
        }
    }
    truncated.push_str("...");
    Some(truncated)
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
