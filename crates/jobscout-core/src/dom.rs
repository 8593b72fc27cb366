//! Small helpers over `scraper` for pulling text, titles, and hrefs out
//! of parsed pages.

use std::sync::OnceLock;

use scraper::{ElementRef, Html, Selector};

/// Visible text of the whole document, fragments trimmed and joined
/// with single spaces.
pub fn page_text(doc: &Html) -> String {
    element_text(&doc.root_element())
}

/// Visible text of a single element subtree.
pub fn element_text(el: &ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Page title: the first `h1`/`h2` in document order, else `<title>`.
pub fn page_title(doc: &Html) -> Option<String> {
    static HEADING: OnceLock<Selector> = OnceLock::new();
    static TITLE: OnceLock<Selector> = OnceLock::new();
    let heading = HEADING.get_or_init(|| Selector::parse("h1, h2").expect("valid selector"));
    let title = TITLE.get_or_init(|| Selector::parse("title").expect("valid selector"));

    doc.select(heading)
        .next()
        .or_else(|| doc.select(title).next())
        .map(|el| element_text(&el))
        .filter(|t| !t.is_empty())
}

/// Title for a job-ish element: the first heading or anchor inside it.
pub fn element_title(el: &ElementRef) -> Option<String> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector =
        SELECTOR.get_or_init(|| Selector::parse("h1, h2, h3, h4, a").expect("valid selector"));

    el.select(selector)
        .next()
        .map(|found| element_text(&found))
        .filter(|t| !t.is_empty())
}

/// Raw href of the first anchor inside an element.
pub fn first_href(el: &ElementRef) -> Option<String> {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    let selector = SELECTOR.get_or_init(|| Selector::parse("a[href]").expect("valid selector"));

    el.select(selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}

/// Collapse whitespace runs and truncate to 100 chars with an ellipsis.
pub fn clean_title(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > 100 {
        let head: String = collapsed.chars().take(100).collect();
        format!("{head}...")
    } else {
        collapsed
    }
}

/// First `n` chars of a text block, on char boundaries.
pub fn truncate(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_text_joins_fragments_with_spaces() {
        let doc = Html::parse_document("<html><body><p>Senior</p><p>Engineer</p></body></html>");
        assert_eq!(page_text(&doc), "Senior Engineer");
    }

    #[test]
    fn page_title_prefers_headings_over_title_tag() {
        let doc = Html::parse_document(
            "<html><head><title>Acme Careers</title></head>\
             <body><h2>Backend Engineer</h2></body></html>",
        );
        assert_eq!(page_title(&doc).as_deref(), Some("Backend Engineer"));
    }

    #[test]
    fn page_title_falls_back_to_title_tag() {
        let doc = Html::parse_document(
            "<html><head><title>Acme Careers</title></head><body><p>hi</p></body></html>",
        );
        assert_eq!(page_title(&doc).as_deref(), Some("Acme Careers"));
    }

    #[test]
    fn element_title_uses_first_heading_or_anchor() {
        let doc = Html::parse_document(
            "<html><body><div class=\"job-post\">\
             <a href=\"/jobs/1\">Data Engineer</a><h3>Later heading</h3>\
             </div></body></html>",
        );
        let selector = Selector::parse(".job-post").unwrap();
        let el = doc.select(&selector).next().unwrap();
        assert_eq!(element_title(&el).as_deref(), Some("Data Engineer"));
        assert_eq!(first_href(&el).as_deref(), Some("/jobs/1"));
    }

    #[test]
    fn clean_title_collapses_and_truncates() {
        assert_eq!(clean_title("  Senior \n\t Engineer  "), "Senior Engineer");

        let long = "x".repeat(150);
        let cleaned = clean_title(&long);
        assert_eq!(cleaned.chars().count(), 103);
        assert!(cleaned.ends_with("..."));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
    }
}
