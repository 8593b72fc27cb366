//! Outbound-link discovery and prioritization.
//!
//! Links are discovered inside the page's main content region, filtered
//! of chrome/social/fragment noise, bucketed into priority tiers, and
//! greedily assembled into a bounded crawl list. Ties within a tier keep
//! document order; this is a priority fill, not a global rank.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::lexicon::IndicatorLexicon;
use crate::models::{Link, PriorityTier};

/// High-and-HighJobId links get at least this many slots before Medium
/// and Low links are considered.
const HIGH_TIER_FLOOR: usize = 8;

/// Buckets a page's outbound anchors by how likely they are to lead to a
/// job posting, then fills up to `max_links` crawl slots.
pub struct LinkPrioritizer {
    lexicon: IndicatorLexicon,
    main_content: Vec<Selector>,
    chrome: Vec<Selector>,
    job_id: Vec<Regex>,
}

impl LinkPrioritizer {
    pub fn new(lexicon: IndicatorLexicon) -> Self {
        let main_content = lexicon
            .main_content_selectors
            .iter()
            .map(|s| Selector::parse(s).expect("lexicon selector is valid"))
            .collect();
        let chrome = lexicon
            .chrome_selectors
            .iter()
            .map(|s| Selector::parse(s).expect("lexicon selector is valid"))
            .collect();
        let job_id = lexicon
            .job_id_patterns
            .iter()
            .map(|p| Regex::new(&format!("(?i){p}")).expect("lexicon pattern is valid"))
            .collect();

        Self {
            lexicon,
            main_content,
            chrome,
            job_id,
        }
    }

    /// Produce up to `max_links` candidate links from a parsed page,
    /// ordered by tier and document position.
    pub fn prioritize(
        &self,
        doc: &Html,
        base: &Url,
        keywords: &[String],
        max_links: usize,
    ) -> Vec<Link> {
        let mut high = Vec::new();
        let mut medium = Vec::new();
        let mut low = Vec::new();

        for anchor in self.anchors(doc) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if self.is_noise(href) || self.in_chrome(&anchor) {
                continue;
            }

            let anchor_text = crate::dom::element_text(&anchor).to_lowercase();
            let Some(tier) = self.tier_for(&anchor_text, href, keywords) else {
                continue;
            };

            let Ok(url) = base.join(href) else {
                tracing::debug!(%href, "skipping unjoinable href");
                continue;
            };

            let link = Link {
                url: url.to_string(),
                anchor_text,
                tier,
            };
            match tier {
                PriorityTier::High | PriorityTier::HighJobId => high.push(link),
                PriorityTier::Medium => medium.push(link),
                PriorityTier::Low => low.push(link),
            }
        }

        tracing::info!(
            high = high.len(),
            medium = medium.len(),
            low = low.len(),
            "categorized outbound links"
        );

        let high_take = HIGH_TIER_FLOOR.max(max_links / 2).min(max_links);
        let mut out: Vec<Link> = high.into_iter().take(high_take).collect();
        for pool in [medium, low] {
            let remaining = max_links.saturating_sub(out.len());
            out.extend(pool.into_iter().take(remaining));
        }
        out
    }

    /// Anchors inside the first matching main-content region, falling
    /// back to the whole document.
    fn anchors<'a>(&self, doc: &'a Html) -> impl Iterator<Item = ElementRef<'a>> {
        static ANCHOR: OnceLock<Selector> = OnceLock::new();
        let anchor = ANCHOR.get_or_init(|| Selector::parse("a[href]").expect("valid selector"));

        let region = self
            .main_content
            .iter()
            .find_map(|sel| doc.select(sel).next())
            .unwrap_or_else(|| doc.root_element());
        region.select(anchor)
    }

    /// Fragment, mailto, and social-media hrefs are never followed.
    fn is_noise(&self, href: &str) -> bool {
        href.starts_with('#')
            || href.starts_with("mailto:")
            || self.lexicon.social_hosts.iter().any(|h| href.contains(h))
    }

    /// True if any ancestor is part of the page chrome (header, nav,
    /// footer, breadcrumbs).
    fn in_chrome(&self, anchor: &ElementRef) -> bool {
        anchor
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| self.chrome.iter().any(|sel| sel.matches(&ancestor)))
    }

    /// First matching tier wins; links matching nothing are discarded.
    fn tier_for(&self, anchor_text: &str, href: &str, keywords: &[String]) -> Option<PriorityTier> {
        if self
            .lexicon
            .action_phrases
            .iter()
            .any(|p| anchor_text.contains(p))
        {
            return Some(PriorityTier::High);
        }
        if self.job_id.iter().any(|re| re.is_match(href)) {
            return Some(PriorityTier::HighJobId);
        }
        let href_lower = href.to_lowercase();
        if self
            .lexicon
            .job_link_terms
            .iter()
            .any(|t| anchor_text.contains(t) || href_lower.contains(t))
        {
            return Some(PriorityTier::Medium);
        }
        if keywords.iter().any(|k| anchor_text.contains(k.as_str())) {
            return Some(PriorityTier::Low);
        }
        None
    }
}
