//! Structured-data extraction from raw page markup.
//!
//! Modern job boards ship their postings as JavaScript state blobs or
//! JSON-LD rather than server-rendered HTML. Two additive passes recover
//! them without executing any scripts: an embedded-JSON pass driven by
//! vendor regexes, and a JSON-LD `JobPosting` pass. Candidates produced
//! here bypass heuristic classification entirely; malformed JSON is
//! swallowed because extraction is best-effort.

use regex::Regex;
use serde_json::Value;

use crate::classifier::keyword_matches;
use crate::models::{JobCandidate, RELEVANT_CATEGORY, UNKNOWN_POSITION};

/// Regexes capturing embedded job data, in the order they are tried.
/// Each captures either a JS object assignment or a bare `jobs` array.
const VENDOR_PATTERNS: &[&str] = &[
    // Qualtrics/Phenom
    r"(?is)phApp\.ddo\s*=\s*(\{.*?\});",
    // General SPA state
    r"(?is)window\.__INITIAL_STATE__\s*=\s*(\{.*?\});",
    r"(?is)window\.jobData\s*=\s*(\{.*?\});",
    r"(?is)window\.jobs\s*=\s*(\[.*?\]);",
    // Bare job arrays
    r#"(?is)"jobs"\s*:\s*(\[.*?\])"#,
    r#"(?is)"jobListings"\s*:\s*(\[.*?\])"#,
    // Greenhouse
    r"(?is)window\.gon\s*=\s*(\{.*?\});",
    // Lever
    r"(?is)window\.INITIAL_STATE\s*=\s*(\{.*?\});",
    // BambooHR
    r"(?is)window\.APP_STATE\s*=\s*(\{.*?\});",
    // Workday
    r"(?is)var\s+wdAppInstanceData\s*=\s*(\{.*?\});",
    // Indeed
    r"(?is)window\.mosaic\.providerData\s*=\s*(\{.*?\});",
];

const JSONLD_PATTERN: &str =
    r#"(?is)<script[^>]*type=["']application/ld\+json["'][^>]*>(.*?)</script>"#;

const GREENHOUSE_HOST: &str = "https://boards.greenhouse.io";

/// Known embedded-JSON layouts, tried in this order. The first shape
/// that structurally matches a blob consumes it, whether or not it
/// yields candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorShape {
    /// `eagerLoadRefineSearch.data.jobs[]`
    Phenom,
    /// `departments[].jobs[]`
    Greenhouse,
    /// `postings[]`
    Lever,
    /// Top-level `jobs[]` array.
    Generic,
}

impl VendorShape {
    const PRIORITY: [VendorShape; 4] = [
        VendorShape::Phenom,
        VendorShape::Greenhouse,
        VendorShape::Lever,
        VendorShape::Generic,
    ];

    fn matches(self, data: &Value) -> bool {
        match self {
            VendorShape::Phenom => data
                .get("eagerLoadRefineSearch")
                .is_some_and(|e| e.get("data").is_some()),
            VendorShape::Greenhouse => {
                data.get("gon").is_some() || data.get("departments").is_some()
            }
            VendorShape::Lever => data.get("postings").is_some(),
            // Bare array captures match no shape: blobs with a `jobs`
            // array inside an object are already claimed by an
            // object-level pattern, and extracting the array again
            // would duplicate them.
            VendorShape::Generic => data.get("jobs").is_some_and(Value::is_array),
        }
    }

    fn extract(self, data: &Value, source_url: &str, keywords: &[String]) -> Vec<JobCandidate> {
        match self {
            VendorShape::Phenom => extract_phenom(data, source_url, keywords),
            VendorShape::Greenhouse => extract_greenhouse(data, source_url, keywords),
            VendorShape::Lever => extract_lever(data, source_url, keywords),
            VendorShape::Generic => extract_generic(data, source_url, keywords),
        }
    }
}

/// Scans raw markup for embedded job data and JSON-LD `JobPosting`
/// blocks, producing candidates without touching the classifier.
pub struct StructuredDataExtractor {
    vendor_patterns: Vec<Regex>,
    jsonld: Regex,
}

impl Default for StructuredDataExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuredDataExtractor {
    pub fn new() -> Self {
        let vendor_patterns = VENDOR_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("vendor pattern is valid"))
            .collect();
        let jsonld = Regex::new(JSONLD_PATTERN).expect("JSON-LD pattern is valid");
        Self {
            vendor_patterns,
            jsonld,
        }
    }

    /// Run both passes over `markup`. Results are concatenated; global
    /// dedup happens later in the aggregator.
    pub fn extract(
        &self,
        markup: &str,
        source_url: &str,
        keywords: &[String],
    ) -> Vec<JobCandidate> {
        let mut jobs = self.extract_embedded(markup, source_url, keywords);
        jobs.extend(self.extract_jsonld(markup, source_url, keywords));
        jobs
    }

    /// Embedded-JSON pass. For each vendor regex, each captured blob is
    /// parsed and dispatched through the shapes; the first blob of a
    /// pattern that yields candidates ends that pattern, but every
    /// pattern is tried.
    fn extract_embedded(
        &self,
        markup: &str,
        source_url: &str,
        keywords: &[String],
    ) -> Vec<JobCandidate> {
        let mut jobs = Vec::new();
        for pattern in &self.vendor_patterns {
            for caps in pattern.captures_iter(markup) {
                let blob = &caps[1];
                let data: Value = match serde_json::from_str(blob) {
                    Ok(data) => data,
                    Err(err) => {
                        tracing::debug!(%err, "embedded blob is not valid JSON");
                        continue;
                    }
                };

                let extracted = VendorShape::PRIORITY
                    .iter()
                    .find(|shape| shape.matches(&data))
                    .map(|shape| shape.extract(&data, source_url, keywords))
                    .unwrap_or_default();

                if !extracted.is_empty() {
                    tracing::info!(count = extracted.len(), "extracted jobs from embedded data");
                    jobs.extend(extracted);
                    break;
                }
            }
        }
        jobs
    }

    /// JSON-LD pass: `JobPosting` objects with a usable URL and at least
    /// one keyword match.
    fn extract_jsonld(
        &self,
        markup: &str,
        source_url: &str,
        keywords: &[String],
    ) -> Vec<JobCandidate> {
        let mut jobs = Vec::new();
        for caps in self.jsonld.captures_iter(markup) {
            let Ok(data) = serde_json::from_str::<Value>(&caps[1]) else {
                continue;
            };
            if data.get("@type").and_then(Value::as_str) != Some("JobPosting") {
                continue;
            }

            let title = str_field(&data, "title").unwrap_or(UNKNOWN_POSITION);
            let Some(url) = str_field(&data, "directApply").or_else(|| str_field(&data, "url"))
            else {
                continue;
            };

            let text = format!("{title} {}", str_field(&data, "description").unwrap_or(""));
            let matched = keyword_matches(&text.to_lowercase(), keywords);
            if !matched.is_empty() {
                jobs.push(JobCandidate {
                    title: title.to_string(),
                    url: url.to_string(),
                    source_url: source_url.to_string(),
                    matched_keywords: matched,
                });
            }
        }
        jobs
    }
}

fn extract_phenom(data: &Value, source_url: &str, keywords: &[String]) -> Vec<JobCandidate> {
    let Some(entries) = data
        .pointer("/eagerLoadRefineSearch/data/jobs")
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    let on_category_page = source_url.contains("/c/");
    let mut jobs = Vec::new();
    for job in entries {
        let title = str_field(job, "title").unwrap_or(UNKNOWN_POSITION);
        let url = match str_field(job, "applyUrl").filter(|u| !u.is_empty()) {
            Some(u) => u.to_string(),
            None => {
                // Category pages carry the job ID but no direct apply
                // link; synthesize one from the site base.
                let base = source_url.split("/c/").next().unwrap_or(source_url);
                format!("{base}/job/{}", id_field(job, "jobId"))
            }
        };

        let text = format!(
            "{title} {} {}",
            str_field(job, "descriptionTeaser").unwrap_or(""),
            str_field(job, "category").unwrap_or(""),
        );
        let mut matched = keyword_matches(&text.to_lowercase(), keywords);

        // Jobs on a /c/ category page are pre-filtered to a relevant
        // category, so a missing keyword match does not disqualify them.
        if matched.is_empty() && on_category_page {
            matched = vec![RELEVANT_CATEGORY.to_string()];
        }
        if !matched.is_empty() {
            jobs.push(JobCandidate {
                title: title.to_string(),
                url,
                source_url: source_url.to_string(),
                matched_keywords: matched,
            });
        }
    }
    jobs
}

fn extract_greenhouse(data: &Value, source_url: &str, keywords: &[String]) -> Vec<JobCandidate> {
    let departments = data
        .get("departments")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut jobs = Vec::new();
    for dept in departments {
        let Some(entries) = dept.get("jobs").and_then(Value::as_array) else {
            continue;
        };
        for job in entries {
            let title = str_field(job, "title").unwrap_or(UNKNOWN_POSITION);
            let Some(raw_url) = str_field(job, "absolute_url").filter(|u| !u.is_empty()) else {
                continue;
            };
            let url = if raw_url.starts_with("http") {
                raw_url.to_string()
            } else {
                format!("{GREENHOUSE_HOST}{raw_url}")
            };

            let text = format!("{title} {}", str_field(job, "content").unwrap_or(""));
            let matched = keyword_matches(&text.to_lowercase(), keywords);
            if !matched.is_empty() {
                jobs.push(JobCandidate {
                    title: title.to_string(),
                    url,
                    source_url: source_url.to_string(),
                    matched_keywords: matched,
                });
            }
        }
    }
    jobs
}

fn extract_lever(data: &Value, source_url: &str, keywords: &[String]) -> Vec<JobCandidate> {
    let Some(entries) = data.get("postings").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut jobs = Vec::new();
    for job in entries {
        let title = str_field(job, "text").unwrap_or(UNKNOWN_POSITION);
        let Some(url) = str_field(job, "hostedUrl").filter(|u| !u.is_empty()) else {
            continue;
        };

        let text = format!("{title} {}", str_field(job, "description").unwrap_or(""));
        let matched = keyword_matches(&text.to_lowercase(), keywords);
        if !matched.is_empty() {
            jobs.push(JobCandidate {
                title: title.to_string(),
                url: url.to_string(),
                source_url: source_url.to_string(),
                matched_keywords: matched,
            });
        }
    }
    jobs
}

fn extract_generic(data: &Value, source_url: &str, keywords: &[String]) -> Vec<JobCandidate> {
    let entries = data
        .get("jobs")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut jobs = Vec::new();
    for job in entries.iter().filter(|j| j.is_object()) {
        let title = str_field(job, "title")
            .or_else(|| str_field(job, "name"))
            .or_else(|| str_field(job, "jobTitle"))
            .unwrap_or(UNKNOWN_POSITION);
        let Some(url) = str_field(job, "url")
            .or_else(|| str_field(job, "link"))
            .or_else(|| str_field(job, "applyUrl"))
            .or_else(|| str_field(job, "applicationUrl"))
            .filter(|u| !u.is_empty())
        else {
            continue;
        };

        let text = format!(
            "{title} {}",
            str_field(job, "description")
                .or_else(|| str_field(job, "summary"))
                .unwrap_or(""),
        );
        let matched = keyword_matches(&text.to_lowercase(), keywords);
        if !matched.is_empty() {
            jobs.push(JobCandidate {
                title: title.to_string(),
                url: url.to_string(),
                source_url: source_url.to_string(),
                matched_keywords: matched,
            });
        }
    }
    jobs
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

/// Job IDs appear both as strings and as numbers in the wild.
fn id_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn extractor() -> StructuredDataExtractor {
        StructuredDataExtractor::new()
    }

    #[test]
    fn greenhouse_relative_url_gets_host_prefix() {
        let markup = r#"<script>window.gon = {"departments":[{"jobs":[
            {"title":"Engineer","absolute_url":"/jobs/1"}]}]};</script>"#;
        let jobs = extractor().extract(markup, "https://acme.dev/careers", &kw(&["engineer"]));
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].url, "https://boards.greenhouse.io/jobs/1");
        assert_eq!(jobs[0].title, "Engineer");
        assert_eq!(jobs[0].matched_keywords, vec!["engineer"]);
    }

    #[test]
    fn greenhouse_absolute_url_is_kept() {
        let markup = r#"<script>window.gon = {"departments":[{"jobs":[
            {"title":"Engineer","absolute_url":"https://acme.dev/jobs/1"}]}]};</script>"#;
        let jobs = extractor().extract(markup, "https://acme.dev", &kw(&["engineer"]));
        assert_eq!(jobs[0].url, "https://acme.dev/jobs/1");
    }

    #[test]
    fn phenom_category_page_accepts_without_keyword_match() {
        let markup = r#"<script>phApp.ddo = {"eagerLoadRefineSearch":{"data":{"jobs":[
            {"title":"Field Technician","jobId":"77"}]}}};</script>"#;
        let jobs = extractor().extract(
            markup,
            "https://acme.dev/c/engineering",
            &kw(&["astronaut"]),
        );
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].matched_keywords, vec![RELEVANT_CATEGORY]);
        // Apply URL synthesized from the part before /c/.
        assert_eq!(jobs[0].url, "https://acme.dev/job/77");
    }

    #[test]
    fn phenom_outside_category_page_requires_keyword() {
        let markup = r#"<script>phApp.ddo = {"eagerLoadRefineSearch":{"data":{"jobs":[
            {"title":"Field Technician","applyUrl":"https://acme.dev/apply/77"}]}}};</script>"#;
        let jobs = extractor().extract(markup, "https://acme.dev/search", &kw(&["astronaut"]));
        assert!(jobs.is_empty());

        let jobs = extractor().extract(markup, "https://acme.dev/search", &kw(&["technician"]));
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].url, "https://acme.dev/apply/77");
    }

    #[test]
    fn phenom_numeric_job_id_synthesizes_url() {
        let markup = r#"<script>phApp.ddo = {"eagerLoadRefineSearch":{"data":{"jobs":[
            {"title":"Analyst","jobId":42}]}}};</script>"#;
        let jobs = extractor().extract(markup, "https://acme.dev/c/data", &kw(&[]));
        assert_eq!(jobs[0].url, "https://acme.dev/job/42");
    }

    #[test]
    fn lever_requires_keyword_match() {
        let markup = r#"<script>window.INITIAL_STATE = {"postings":[
            {"text":"Platform Engineer","hostedUrl":"https://jobs.lever.co/acme/1",
             "description":"distributed systems"}]};</script>"#;
        let none = extractor().extract(markup, "https://acme.dev", &kw(&["astronaut"]));
        assert!(none.is_empty());

        let jobs = extractor().extract(markup, "https://acme.dev", &kw(&["distributed systems"]));
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Platform Engineer");
        assert_eq!(jobs[0].url, "https://jobs.lever.co/acme/1");
    }

    #[test]
    fn generic_shape_tries_field_aliases() {
        let markup = r#"<script>window.jobData = {"jobs":[
            {"name":"QA Analyst","link":"https://acme.dev/jobs/5","summary":"testing"}]};</script>"#;
        let jobs = extractor().extract(markup, "https://acme.dev", &kw(&["qa"]));
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "QA Analyst");
        assert_eq!(jobs[0].url, "https://acme.dev/jobs/5");
    }

    #[test]
    fn overlapping_array_capture_does_not_duplicate() {
        // The bare "jobs": [...] pattern also fires on this blob; only
        // the object-level pattern may produce the candidate.
        let markup = r#"<script>window.jobData = {"jobs":[
            {"title":"Kernel Engineer","url":"https://acme.dev/jobs/9"}]};</script>"#;
        let jobs = extractor().extract(markup, "https://acme.dev", &kw(&["kernel"]));
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].url, "https://acme.dev/jobs/9");
    }

    #[test]
    fn jobs_without_any_url_are_dropped() {
        let markup = r#"<script>window.jobData = {"jobs":[
            {"title":"Ghost Role","description":"kernel work"}]};</script>"#;
        let jobs = extractor().extract(markup, "https://acme.dev", &kw(&["kernel"]));
        assert!(jobs.is_empty());
    }

    #[test]
    fn first_structural_match_consumes_the_blob() {
        // Greenhouse matches structurally (departments) but yields
        // nothing; the Lever-shaped postings in the same blob must not
        // be tried afterwards.
        let markup = r#"<script>window.gon = {"departments":[],"postings":[
            {"text":"Engineer","hostedUrl":"https://jobs.lever.co/acme/1",
             "description":"engineer"}]};</script>"#;
        let jobs = extractor().extract(markup, "https://acme.dev", &kw(&["engineer"]));
        assert!(jobs.is_empty());
    }

    #[test]
    fn jsonld_job_posting_is_extracted() {
        let markup = r#"<html><head>
            <script type="application/ld+json">
            {"@type":"JobPosting","title":"Data Scientist",
             "url":"https://x/y","description":"ml models"}
            </script></head></html>"#;
        let jobs = extractor().extract(markup, "https://x", &kw(&["data scientist"]));
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Data Scientist");
        assert_eq!(jobs[0].url, "https://x/y");
    }

    #[test]
    fn jsonld_prefers_direct_apply_url() {
        let markup = r#"<script type="application/ld+json">
            {"@type":"JobPosting","title":"Data Scientist",
             "directApply":"https://x/apply","url":"https://x/y"}
            </script>"#;
        let jobs = extractor().extract(markup, "https://x", &kw(&["data scientist"]));
        assert_eq!(jobs[0].url, "https://x/apply");
    }

    #[test]
    fn jsonld_ignores_other_types_and_requires_keywords() {
        let markup = r#"<script type="application/ld+json">
            {"@type":"Organization","name":"Acme"}
            </script>
            <script type="application/ld+json">
            {"@type":"JobPosting","title":"Data Scientist","url":"https://x/y"}
            </script>"#;
        let jobs = extractor().extract(markup, "https://x", &kw(&["astronaut"]));
        assert!(jobs.is_empty());
    }

    #[test]
    fn malformed_json_is_swallowed() {
        let markup = r#"<script>phApp.ddo = {"unterminated": };</script>
            <script type="application/ld+json">{not json}</script>"#;
        let jobs = extractor().extract(markup, "https://x", &kw(&["engineer"]));
        assert!(jobs.is_empty());
    }

    #[test]
    fn both_passes_accumulate() {
        let markup = r#"
            <script>window.gon = {"departments":[{"jobs":[
                {"title":"Engineer","absolute_url":"/jobs/1"}]}]};</script>
            <script type="application/ld+json">
            {"@type":"JobPosting","title":"Engineer II","url":"https://x/2",
             "description":"engineer"}
            </script>"#;
        let jobs = extractor().extract(markup, "https://x", &kw(&["engineer"]));
        assert_eq!(jobs.len(), 2);
    }
}
