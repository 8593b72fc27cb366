//! Flat-file site and keyword lists.
//!
//! One entry per line; blank lines and lines starting with `#` are
//! ignored. Missing files are recovered by writing a commented template
//! so a first run leaves the operator something to edit.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::AppError;

/// Keywords seeded into a freshly created keyword file.
pub const DEFAULT_KEYWORDS: &[&str] = &["python", "software engineer", "developer", "data scientist"];

const SITES_TEMPLATE: &str = "# Add sites to crawl, one per line\n\
# Example:\n\
# https://example-jobs.com/careers\n";

/// Load the site list. A missing file is created from the template and
/// yields an empty list.
pub fn load_sites(path: &Path) -> Result<Vec<String>, AppError> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "site list not found, writing template");
        fs::write(path, SITES_TEMPLATE)?;
        return Ok(Vec::new());
    }
    Ok(parse_lines(&fs::read_to_string(path)?)
        .map(str::to_string)
        .collect())
}

/// Load the keyword list, case-folded to lowercase. A missing file is
/// created with the documented defaults, which are also returned.
pub fn load_keywords(path: &Path) -> Result<Vec<String>, AppError> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "keyword list not found, writing defaults");
        let mut template = String::from("# Add job keywords to search for, one per line\n");
        for kw in DEFAULT_KEYWORDS {
            template.push_str(kw);
            template.push('\n');
        }
        fs::write(path, template)?;
        return Ok(DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect());
    }
    Ok(parse_lines(&fs::read_to_string(path)?)
        .map(str::to_lowercase)
        .collect())
}

/// Append a site if it is not already listed. Returns false when the
/// site was already present.
pub fn add_site(path: &Path, url: &str) -> Result<bool, AppError> {
    if load_sites(path)?.iter().any(|s| s == url) {
        return Ok(false);
    }
    let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{url}")?;
    tracing::info!(%url, "added site");
    Ok(true)
}

/// Remove a site, rewriting the file without it. Returns false when the
/// site was not listed.
pub fn remove_site(path: &Path, url: &str) -> Result<bool, AppError> {
    let sites = load_sites(path)?;
    if !sites.iter().any(|s| s == url) {
        return Ok(false);
    }
    let mut content = String::from("# Add sites to crawl, one per line\n");
    for site in sites.iter().filter(|s| *s != url) {
        content.push_str(site);
        content.push('\n');
    }
    fs::write(path, content)?;
    tracing::info!(%url, "removed site");
    Ok(true)
}

fn parse_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
}
