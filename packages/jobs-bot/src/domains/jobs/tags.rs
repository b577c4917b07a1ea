use lazy_static::lazy_static;
use regex::Regex;

use super::models::RawJobRecord;

const MAJOR_CITIES: &[(&str, &str)] = &[
    ("san francisco", "SF"),
    ("sf", "SF"),
    ("bay area", "SF"),
    ("new york", "NYC"),
    ("nyc", "NYC"),
    ("manhattan", "NYC"),
    ("seattle", "Seattle"),
    ("bellevue", "Seattle"),
    ("redmond", "Seattle"),
    ("austin", "Austin"),
    ("los angeles", "LA"),
    ("la", "LA"),
    ("boston", "Boston"),
    ("chicago", "Chicago"),
    ("denver", "Denver"),
];

const TECH_STACK: &[(&str, &str)] = &[
    ("react", "React"),
    ("vue", "Vue"),
    ("angular", "Angular"),
    ("node", "NodeJS"),
    ("python", "Python"),
    ("java", "Java"),
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("aws", "AWS"),
    ("azure", "Azure"),
    ("gcp", "GCP"),
    ("cloud", "Cloud"),
    ("kubernetes", "K8s"),
    ("docker", "Docker"),
    ("terraform", "Terraform"),
    ("machine learning", "ML"),
    ("ai", "AI"),
    ("data science", "DataScience"),
    ("ios", "iOS"),
    ("android", "Android"),
    ("mobile", "Mobile"),
    ("frontend", "Frontend"),
    ("backend", "Backend"),
    ("fullstack", "FullStack"),
    ("devops", "DevOps"),
    ("security", "Security"),
    ("blockchain", "Blockchain"),
];

lazy_static! {
    // Whole-word matching; plain substrings would tag "email" as AI.
    static ref TECH_STACK_REGEXES: Vec<(Regex, &'static str)> = TECH_STACK
        .iter()
        .map(|(keyword, tag)| {
            let pattern = format!(r"\b{}\b", regex::escape(keyword));
            (Regex::new(&pattern).unwrap(), *tag)
        })
        .collect();

    static ref DESIGN_REGEX: Regex = Regex::new(r"\b(?:designer|ux|ui)\b").unwrap();
    static ref PM_REGEX: Regex = Regex::new(r"\bpm\b").unwrap();
}

/// Hashtag-style labels shown on the embed and matched against forum tags.
pub fn generate_tags(job: &RawJobRecord) -> Vec<String> {
    let title = job.title().to_lowercase();
    let description = job.description().to_lowercase();
    let city = job.city().trim().to_lowercase();
    let mut tags: Vec<&str> = Vec::new();

    if ["senior", "sr.", "staff", "principal"]
        .iter()
        .any(|k| title.contains(k))
    {
        tags.push("Senior");
    } else if ["junior", "jr.", "entry", "new grad", "graduate"]
        .iter()
        .any(|k| title.contains(k))
    {
        tags.push("EntryLevel");
    } else {
        tags.push("MidLevel");
    }

    if description.contains("remote") || title.contains("remote") || city.contains("remote") {
        tags.push("Remote");
    }

    if let Some((_, tag)) = MAJOR_CITIES.iter().find(|(name, _)| *name == city) {
        tags.push(tag);
    }

    let search_text = format!("{} {}", title, description);
    for (regex, tag) in TECH_STACK_REGEXES.iter() {
        if regex.is_match(&search_text) {
            tags.push(tag);
        }
    }

    if title.contains("data scientist") || title.contains("analyst") {
        tags.push("DataScience");
    }
    if title.contains("machine learning") || title.contains("ml engineer") {
        tags.push("ML");
    }
    if title.contains("product manager") || PM_REGEX.is_match(&title) {
        tags.push("ProductManager");
    }
    if DESIGN_REGEX.is_match(&title) {
        tags.push("Design");
    }

    let mut unique: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !unique.iter().any(|t| t == tag) {
            unique.push(tag.to_string());
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, city: &str, description: &str) -> RawJobRecord {
        RawJobRecord {
            job_title: Some(title.to_string()),
            job_city: Some(city.to_string()),
            job_description: Some(description.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn experience_city_and_stack() {
        let tags = generate_tags(&job(
            "Senior Backend Engineer",
            "Seattle",
            "Python services on AWS with Docker",
        ));

        assert_eq!(
            tags,
            vec!["Senior", "Seattle", "Python", "AWS", "Docker", "Backend"]
        );
    }

    #[test]
    fn defaults_to_mid_level() {
        let tags = generate_tags(&job("Software Engineer", "", ""));
        assert_eq!(tags, vec!["MidLevel"]);
    }

    #[test]
    fn entry_level_and_remote() {
        let tags = generate_tags(&job("New Grad Software Engineer", "Remote", ""));
        assert_eq!(tags, vec!["EntryLevel", "Remote"]);
    }

    #[test]
    fn keywords_need_whole_words() {
        let tags = generate_tags(&job("Support Engineer", "", "Answer email tickets, guide users"));
        assert!(!tags.contains(&"AI".to_string()));
        assert!(!tags.contains(&"Design".to_string()));
    }

    #[test]
    fn role_tags_are_deduplicated() {
        let tags = generate_tags(&job("Machine Learning Engineer", "", "machine learning platform"));
        assert_eq!(tags.iter().filter(|t| *t == "ML").count(), 1);
    }

    #[test]
    fn product_and_design_roles() {
        assert!(generate_tags(&job("Senior PM, Payments", "", "")).contains(&"ProductManager".to_string()));
        assert!(generate_tags(&job("UX Designer", "", "")).contains(&"Design".to_string()));
    }
}
