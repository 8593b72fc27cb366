//! Static phrase, selector, and pattern sets driving classification and
//! link discovery.
//!
//! Pure data. Behavior lives in the consumers ([`crate::classifier`],
//! [`crate::links`], [`crate::crawl`]); keeping the sets here makes them
//! independently testable and tunable.

/// Immutable indicator sets injected into the classifier and prioritizer.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorLexicon {
    /// Phrases that strongly suggest job-posting content.
    pub strong_indicators: &'static [&'static str],
    /// Supporting phrases; at least two must appear to count as evidence.
    pub weak_indicators: &'static [&'static str],
    /// Phrases whose presence rejects a page outright.
    pub anti_patterns: &'static [&'static str],
    /// Narrow subset of strong indicators marking an individual posting.
    pub specific_indicators: &'static [&'static str],
    /// Phrases marking a search/listing page rather than a single posting.
    pub listing_indicators: &'static [&'static str],
    /// Anchor-text phrases marking a direct application/job-detail link.
    pub action_phrases: &'static [&'static str],
    /// Generic job-domain terms for medium-priority links.
    pub job_link_terms: &'static [&'static str],
    /// CSS selectors for elements likely to hold a single job posting.
    pub job_element_selectors: &'static [&'static str],
    /// Ordered CSS selectors for the main content region of a page.
    pub main_content_selectors: &'static [&'static str],
    /// CSS selectors for page chrome (header/nav/footer/breadcrumbs)
    /// whose links are never followed.
    pub chrome_selectors: &'static [&'static str],
    /// Social-media hosts whose links are never followed.
    pub social_hosts: &'static [&'static str],
    /// URL path patterns identifying individual job postings.
    pub job_id_patterns: &'static [&'static str],
    /// Combined job-ID pattern used by the classifier's URL check.
    pub job_id_url_pattern: &'static str,
}

impl Default for IndicatorLexicon {
    fn default() -> Self {
        Self {
            strong_indicators: &[
                "apply now",
                "apply for this position",
                "job description",
                "requirements",
                "responsibilities",
                "qualifications",
                "years of experience",
                "submit resume",
                "cv",
                "application",
                "candidate",
                "hiring",
                "employment",
                "position details",
                "role description",
                "job summary",
                "what you'll do",
                "what you will do",
                "required skills",
                "preferred qualifications",
                "salary",
                "compensation",
                "benefits package",
                "location:",
                "reports to",
                "department:",
                "job type",
                "full-time",
                "part-time",
                "contract",
                "permanent",
                "temporary",
            ],
            weak_indicators: &[
                "career",
                "opportunity",
                "role",
                "position",
                "team",
                "join us",
                "remote",
                "on-site",
                "hybrid",
                "office",
                "skills",
                "experience",
            ],
            anti_patterns: &[
                "developer tools",
                "documentation",
                "api reference",
                "getting started",
                "tutorials",
                "examples",
                "download",
                "pricing",
                "features",
                "product",
                "solutions",
                "services",
                "about us",
                "contact us",
                "news",
                "blog",
                "press release",
                "company overview",
                "our story",
                "mission",
                "vision",
                "job search",
                "search jobs",
                "all jobs",
                "job listings",
                "browse jobs",
                "filter jobs",
                "sort by",
                "results found",
                "showing",
                "page",
            ],
            specific_indicators: &[
                "apply now",
                "apply for this position",
                "job description",
                "responsibilities",
                "requirements",
                "qualifications",
                "submit resume",
                "submit application",
            ],
            listing_indicators: &[
                "search results",
                "filter by",
                "sort by",
                "results found",
                "showing",
                "job listings",
                "browse jobs",
                "all jobs",
                "find jobs",
                "job search",
                "total jobs",
                "open positions",
                "view all",
                "more jobs",
            ],
            action_phrases: &[
                "apply now",
                "apply for",
                "view job",
                "job details",
                "apply today",
                "submit application",
                "apply here",
                "learn more",
                "see details",
                "view position",
                "more info",
            ],
            job_link_terms: &[
                "job",
                "career",
                "position",
                "opening",
                "vacancy",
                "hiring",
                "opportunity",
                "role",
                "employment",
            ],
            job_element_selectors: &[
                ".job-listing",
                ".job-post",
                ".position",
                ".opening",
                "[class*=\"job\"]",
                "[class*=\"position\"]",
                "[class*=\"career\"]",
                "article",
                ".listing",
                ".vacancy",
            ],
            main_content_selectors: &[
                "main",
                ".main",
                "#main",
                ".content",
                "#content",
                ".main-content",
                ".page-content",
                ".job-listings",
                ".jobs",
                ".positions",
                ".careers-content",
                "article",
                ".container",
                ".wrapper",
            ],
            chrome_selectors: &[
                "header",
                "nav",
                ".header",
                ".nav",
                ".navbar",
                ".navigation",
                ".menu",
                ".top-nav",
                ".main-nav",
                ".site-header",
                ".page-header",
                ".breadcrumb",
                ".breadcrumbs",
                ".footer",
                ".site-footer",
            ],
            social_hosts: &[
                "facebook.com",
                "twitter.com",
                "linkedin.com",
                "instagram.com",
                "youtube.com",
            ],
            job_id_patterns: &[
                r"/jobs/\d+",
                r"/job/\d+",
                r"/position/\d+",
                r"/opening/\d+",
                r"/careers/\d+",
                r"/opportunity/\d+",
                r"/role/\d+",
            ],
            job_id_url_pattern: r"(?i)/jobs?/\d+",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use scraper::Selector;

    #[test]
    fn default_sets_are_populated() {
        let lex = IndicatorLexicon::default();
        assert!(!lex.strong_indicators.is_empty());
        assert!(lex.weak_indicators.len() >= 2);
        assert!(!lex.anti_patterns.is_empty());
        assert!(!lex.listing_indicators.is_empty());
        assert!(!lex.job_id_patterns.is_empty());
    }

    #[test]
    fn specific_indicators_are_a_subset_of_strong() {
        let lex = IndicatorLexicon::default();
        for phrase in lex.specific_indicators {
            assert!(
                lex.strong_indicators.contains(phrase),
                "{phrase} missing from strong indicators"
            );
        }
    }

    #[test]
    fn all_selectors_parse() {
        let lex = IndicatorLexicon::default();
        for sel in lex
            .job_element_selectors
            .iter()
            .chain(lex.main_content_selectors)
            .chain(lex.chrome_selectors)
        {
            assert!(Selector::parse(sel).is_ok(), "bad selector: {sel}");
        }
    }

    #[test]
    fn all_patterns_compile() {
        let lex = IndicatorLexicon::default();
        for pat in lex.job_id_patterns {
            assert!(Regex::new(pat).is_ok(), "bad pattern: {pat}");
        }
        assert!(Regex::new(lex.job_id_url_pattern).is_ok());
    }

    #[test]
    fn phrases_are_lowercase() {
        let lex = IndicatorLexicon::default();
        for phrase in lex
            .strong_indicators
            .iter()
            .chain(lex.weak_indicators)
            .chain(lex.anti_patterns)
            .chain(lex.listing_indicators)
            .chain(lex.action_phrases)
        {
            assert_eq!(*phrase, phrase.to_lowercase().as_str());
        }
    }
}
