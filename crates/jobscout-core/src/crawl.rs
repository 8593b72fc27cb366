//! Per-site crawl orchestration.
//!
//! For each site: fetch, recover structured job data from the raw body,
//! classify the page itself and its job-ish elements, then follow a
//! bounded set of prioritized links and classify each target. Transport
//! errors skip the current fetch; nothing here aborts the run.

use std::collections::HashSet;
use std::time::Duration;

use scraper::{Html, Selector};
use url::Url;

use crate::aggregate;
use crate::classifier::PageClassifier;
use crate::dom;
use crate::extract::StructuredDataExtractor;
use crate::lexicon::IndicatorLexicon;
use crate::links::LinkPrioritizer;
use crate::models::{GENERIC_JOB_TITLE, JobCandidate, Link, PageContent};
use crate::throttle::PoliteFetcher;
use crate::traits::Fetcher;

/// Knobs for a crawl run.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Upper bound on followed links per site.
    pub max_links_per_site: usize,
    /// Minimum spacing between fetches against the same host.
    pub link_delay: Duration,
    /// Pause between consecutive sites.
    pub site_delay: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_links_per_site: 10,
            link_delay: Duration::from_millis(500),
            site_delay: Duration::from_secs(2),
        }
    }
}

/// Drives the full pipeline for a list of sites, one site at a time.
pub struct CrawlOrchestrator<F: Fetcher> {
    fetcher: PoliteFetcher<F>,
    classifier: PageClassifier,
    prioritizer: LinkPrioritizer,
    extractor: StructuredDataExtractor,
    lexicon: IndicatorLexicon,
    job_selectors: Vec<Selector>,
    config: CrawlConfig,
}

impl<F: Fetcher> CrawlOrchestrator<F> {
    pub fn new(fetcher: F, lexicon: IndicatorLexicon, config: CrawlConfig) -> Self {
        let job_selectors = lexicon
            .job_element_selectors
            .iter()
            .map(|s| Selector::parse(s).expect("lexicon selector is valid"))
            .collect();
        Self {
            fetcher: PoliteFetcher::new(fetcher, config.link_delay),
            classifier: PageClassifier::new(lexicon),
            prioritizer: LinkPrioritizer::new(lexicon),
            extractor: StructuredDataExtractor::new(),
            lexicon,
            job_selectors,
            config,
        }
    }

    /// Crawl every site sequentially and dedupe the combined results
    /// by URL.
    pub async fn crawl_all(&self, sites: &[String], keywords: &[String]) -> Vec<JobCandidate> {
        let mut all = Vec::new();
        for (i, site) in sites.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.config.site_delay).await;
            }
            let found = self.crawl_site(site, keywords).await;
            tracing::info!(site = %site, count = found.len(), "finished site");
            all.extend(found);
        }
        aggregate::dedupe_by_url(all)
    }

    /// Crawl a single site. Fetch failure yields an empty result.
    pub async fn crawl_site(&self, site_url: &str, keywords: &[String]) -> Vec<JobCandidate> {
        tracing::info!(url = %site_url, "crawling site");
        let body = match self.fetcher.fetch(site_url).await {
            Ok(body) => body,
            Err(err) => {
                tracing::error!(url = %site_url, %err, "failed to fetch site");
                return Vec::new();
            }
        };

        let mut jobs = self.extractor.extract(&body, site_url, keywords);
        let links = self.survey_page(&body, site_url, keywords, &mut jobs);

        for link in links {
            tracing::info!(url = %link.url, tier = ?link.tier, "checking prioritized link");
            match self.fetcher.fetch(&link.url).await {
                Ok(body) => {
                    if let Some(job) = self.classify_linked_page(&body, &link, site_url, keywords)
                    {
                        tracing::info!(title = %job.title, "found job");
                        jobs.push(job);
                    }
                }
                Err(err) => tracing::debug!(url = %link.url, %err, "skipping link"),
            }
        }
        jobs
    }

    /// The DOM-bound part of a site crawl: page-level classification,
    /// the element pass, and link prioritization. Synchronous so the
    /// non-`Send` parsed document never lives across an await.
    fn survey_page(
        &self,
        body: &str,
        site_url: &str,
        keywords: &[String],
        jobs: &mut Vec<JobCandidate>,
    ) -> Vec<Link> {
        let doc = Html::parse_document(body);
        let page = PageContent {
            url: site_url.to_string(),
            text: dom::page_text(&doc),
        };

        let classification = self.classifier.classify(&page.text, keywords, Some(&page.url));
        let lower = page.text.to_lowercase();
        let is_listing = self
            .lexicon
            .listing_indicators
            .iter()
            .any(|p| lower.contains(p));

        // A listing page mentions many postings; emitting it as one job
        // would shadow the individual links below.
        if classification.is_job && !is_listing {
            let title = dom::page_title(&doc).unwrap_or_else(|| GENERIC_JOB_TITLE.to_string());
            tracing::info!(%title, "page itself is a job posting");
            jobs.push(JobCandidate {
                title,
                url: page.url.clone(),
                source_url: page.url.clone(),
                matched_keywords: classification.matched_keywords,
            });
        } else if is_listing {
            tracing::info!("page looks like a listing, following individual links");
        }

        let base = match Url::parse(site_url) {
            Ok(base) => base,
            Err(err) => {
                tracing::warn!(url = %site_url, %err, "unparseable site URL, skipping links");
                return Vec::new();
            }
        };

        self.element_pass(&doc, &base, site_url, keywords, jobs);
        self.prioritizer
            .prioritize(&doc, &base, keywords, self.config.max_links_per_site)
    }

    /// Classify job-ish elements independently of the whole page.
    /// Elements matched by several selectors are visited once.
    fn element_pass(
        &self,
        doc: &Html,
        base: &Url,
        site_url: &str,
        keywords: &[String],
        jobs: &mut Vec<JobCandidate>,
    ) {
        let mut seen = HashSet::new();
        for selector in &self.job_selectors {
            for element in doc.select(selector) {
                if !seen.insert(element.id()) {
                    continue;
                }
                let text = dom::element_text(&element);
                let classification = self.classifier.classify(&text, keywords, Some(site_url));
                if !classification.is_job {
                    continue;
                }

                let title =
                    dom::element_title(&element).unwrap_or_else(|| dom::truncate(&text, 100));
                let url = dom::first_href(&element)
                    .and_then(|href| base.join(&href).ok())
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| site_url.to_string());
                tracing::debug!(%title, %url, "element classified as a job");
                jobs.push(JobCandidate {
                    title,
                    url,
                    source_url: site_url.to_string(),
                    matched_keywords: classification.matched_keywords,
                });
            }
        }
    }

    /// Classify a followed link's page; synchronous for the same reason
    /// as `survey_page`.
    fn classify_linked_page(
        &self,
        body: &str,
        link: &Link,
        site_url: &str,
        keywords: &[String],
    ) -> Option<JobCandidate> {
        let doc = Html::parse_document(body);
        let text = dom::page_text(&doc);
        let classification = self.classifier.classify(&text, keywords, Some(&link.url));
        if !classification.is_job {
            return None;
        }

        let raw_title = dom::page_title(&doc).unwrap_or_else(|| link.anchor_text.clone());
        Some(JobCandidate {
            title: dom::clean_title(&raw_title),
            url: link.url.clone(),
            source_url: site_url.to_string(),
            matched_keywords: classification.matched_keywords,
        })
    }
}
