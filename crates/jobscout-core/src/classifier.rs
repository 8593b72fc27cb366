use regex::Regex;

use crate::lexicon::IndicatorLexicon;

/// Outcome of classifying a block of page text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub is_job: bool,
    /// Keywords found in the text, in the caller's order.
    pub matched_keywords: Vec<String>,
}

impl Classification {
    fn rejected() -> Self {
        Self {
            is_job: false,
            matched_keywords: Vec::new(),
        }
    }
}

/// Decides whether a block of text reads like an individual job posting.
///
/// The decision combines keyword matches with indicator phrases from the
/// injected lexicon. Anti-patterns veto first; listing/marketing pages
/// that merely mention job-adjacent words are filtered by requiring a
/// specific posting indicator, unless the URL itself carries a numeric
/// job ID.
pub struct PageClassifier {
    lexicon: IndicatorLexicon,
    job_id_url: Regex,
}

impl PageClassifier {
    pub fn new(lexicon: IndicatorLexicon) -> Self {
        let job_id_url =
            Regex::new(lexicon.job_id_url_pattern).expect("lexicon job-ID pattern is valid");
        Self {
            lexicon,
            job_id_url,
        }
    }

    /// Classify `text` against `keywords` (already lowercased).
    ///
    /// Passing the page `url` enables the job-ID leniency: a URL like
    /// `/jobs/42` is strong prior evidence, so the specific-indicator
    /// requirement is dropped there.
    pub fn classify(&self, text: &str, keywords: &[String], url: Option<&str>) -> Classification {
        let lower = text.to_lowercase();

        if let Some(pattern) = self
            .lexicon
            .anti_patterns
            .iter()
            .find(|p| lower.contains(*p))
        {
            tracing::debug!(%pattern, "rejected by anti-pattern");
            return Classification::rejected();
        }

        let has_strong = self
            .lexicon
            .strong_indicators
            .iter()
            .any(|p| lower.contains(p));
        let weak_count = self
            .lexicon
            .weak_indicators
            .iter()
            .filter(|p| lower.contains(*p))
            .count();
        let has_weak = weak_count >= 2;
        let has_specific = self
            .lexicon
            .specific_indicators
            .iter()
            .any(|p| lower.contains(p));

        let matched_keywords = keyword_matches(&lower, keywords);

        let is_job_id_url = url.is_some_and(|u| self.job_id_url.is_match(u));
        let is_job = if is_job_id_url {
            !matched_keywords.is_empty() && (has_strong || has_weak)
        } else {
            !matched_keywords.is_empty()
                && (has_strong || has_weak)
                && (has_specific || has_strong)
        };

        tracing::debug!(
            url = url.unwrap_or(""),
            keywords = matched_keywords.len(),
            has_strong,
            weak_count,
            has_specific,
            is_job_id_url,
            is_job,
            "classified text block"
        );

        Classification {
            is_job,
            matched_keywords,
        }
    }
}

/// Keywords present as substrings of `lower` (which must already be
/// lowercased), in the caller's order.
pub(crate) fn keyword_matches(lower: &str, keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .filter(|k| lower.contains(k.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> PageClassifier {
        PageClassifier::new(IndicatorLexicon::default())
    }

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    const STRONG_TEXT: &str = "Apply now: we are hiring a Rust developer. \
        Salary is competitive and the job description lists responsibilities.";

    #[test]
    fn strong_indicators_with_keyword_accept() {
        let c = classifier().classify(STRONG_TEXT, &kw(&["rust"]), None);
        assert!(c.is_job);
        assert_eq!(c.matched_keywords, vec!["rust"]);
    }

    #[test]
    fn anti_pattern_vetoes_regardless_of_indicators() {
        let text = format!("{STRONG_TEXT} See our pricing for details.");
        let c = classifier().classify(&text, &kw(&["rust"]), None);
        assert!(!c.is_job);
        assert!(c.matched_keywords.is_empty());
    }

    #[test]
    fn no_keyword_match_rejects() {
        let c = classifier().classify(STRONG_TEXT, &kw(&["haskell"]), None);
        assert!(!c.is_job);
        assert!(c.matched_keywords.is_empty());
    }

    #[test]
    fn empty_keyword_set_rejects() {
        let c = classifier().classify(STRONG_TEXT, &[], None);
        assert!(!c.is_job);
    }

    // Weak indicators alone are not enough at an ordinary URL, but a
    // job-ID URL relaxes the specific-indicator requirement.
    #[test]
    fn job_id_url_relaxes_specific_requirement() {
        let text = "Join our team in a remote role working with rust.";
        let c = classifier();

        let plain = c.classify(text, &kw(&["rust"]), Some("https://x.dev/careers"));
        assert!(!plain.is_job);

        let job_id = c.classify(text, &kw(&["rust"]), Some("https://x.dev/jobs/42"));
        assert!(job_id.is_job);
        assert_eq!(job_id.matched_keywords, vec!["rust"]);
    }

    #[test]
    fn job_id_url_pattern_is_case_insensitive() {
        let text = "Join our team in a remote role working with rust.";
        let c = classifier().classify(text, &kw(&["rust"]), Some("https://x.dev/Jobs/7"));
        assert!(c.is_job);
    }

    #[test]
    fn single_weak_indicator_is_not_enough() {
        // Only "team" from the weak set, no strong indicators.
        let text = "Our team builds things with rust.";
        let c = classifier().classify(text, &kw(&["rust"]), Some("https://x.dev/jobs/42"));
        assert!(!c.is_job);
    }

    #[test]
    fn multiple_keywords_all_reported_in_order() {
        let text = format!("{STRONG_TEXT} Knowledge of tokio is a plus.");
        let c = classifier().classify(&text, &kw(&["rust", "tokio", "haskell"]), None);
        assert!(c.is_job);
        assert_eq!(c.matched_keywords, vec!["rust", "tokio"]);
    }

    #[test]
    fn matching_is_case_insensitive_on_text() {
        let text = "APPLY NOW: RUST DEVELOPER, SALARY LISTED, JOB DESCRIPTION INSIDE";
        let c = classifier().classify(text, &kw(&["rust"]), None);
        assert!(c.is_job);
    }
}
