//! Cross-site result aggregation.

use std::collections::HashSet;

use crate::models::JobCandidate;

/// Drop candidates whose URL was already seen, keeping the first
/// occurrence and the overall order.
pub fn dedupe_by_url(candidates: Vec<JobCandidate>) -> Vec<JobCandidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.url.clone()))
        .collect()
}
