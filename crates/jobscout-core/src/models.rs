/// Sentinel standing in for matched keywords when a structured job is
/// accepted because it came from an already-filtered category page.
pub const RELEVANT_CATEGORY: &str = "relevant category";

/// Fallback title for structured data that carries no title field.
pub const UNKNOWN_POSITION: &str = "Unknown Position";

/// Fallback title when a crawled page classifies as a job but exposes
/// no heading or `<title>`.
pub const GENERIC_JOB_TITLE: &str = "Job Posting";

/// The plain text of a fetched page together with its originating URL.
#[derive(Debug, Clone)]
pub struct PageContent {
    pub url: String,
    pub text: String,
}

/// Priority bucket assigned to an outbound link before crawl slots are
/// allocated. `High` and `HighJobId` share a pool when filling slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityTier {
    /// Anchor text carries an explicit action phrase ("apply now", ...).
    High,
    /// Href matches a numeric job-identifier path, e.g. `/jobs/42`.
    HighJobId,
    /// Anchor text or href carries a generic job-domain term.
    Medium,
    /// Anchor text contains one of the caller's search keywords.
    Low,
}

/// An outbound link slated for a follow-up fetch.
#[derive(Debug, Clone)]
pub struct Link {
    /// Absolute URL, already joined against the page base.
    pub url: String,
    /// Anchor text, trimmed and lowercased.
    pub anchor_text: String,
    pub tier: PriorityTier,
}

/// A discovered job posting. `url` is the dedup key across the whole run.
///
/// Candidates are created during a single crawl pass and never mutated;
/// the aggregator only drops duplicates.
#[derive(Debug, Clone, serde::Serialize)]
pub struct JobCandidate {
    pub title: String,
    pub url: String,
    /// The site URL this candidate was discovered from.
    pub source_url: String,
    /// Keywords found in the candidate's text, or the
    /// [`RELEVANT_CATEGORY`] sentinel for category-page extractions.
    pub matched_keywords: Vec<String>,
}
