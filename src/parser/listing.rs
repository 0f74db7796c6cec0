//! Listing page extraction
//!
//! Scans every anchor whose `href` points into a content area and pulls raw
//! card fields out of it. Output is unnormalized and in document order.

use scraper::{ElementRef, Html, Selector};

use crate::models::{ContentKind, RawCandidate};
use crate::parser::sanitize::{element_text, non_empty};
use crate::parser::selectors::{CardSelectors, ANCHOR};

/// Heuristics that decide which anchors of a listing page are content cards
pub struct ExtractionRules {
    /// Substring an href must contain, e.g. `/think/`
    pub link_prefix: &'static str,

    /// Field selectors applied inside the anchor
    pub selectors: CardSelectors,

    /// Title length must be strictly greater than this (in characters)
    pub min_title_len: usize,

    /// Title length must be strictly less than this (in characters)
    pub max_title_len: usize,

    /// Hrefs containing any of these are navigation, not content
    pub excluded_paths: &'static [&'static str],

    /// Drop hrefs carrying a `#` fragment
    pub reject_fragments: bool,

    /// Minimum path key length (exclusive); `None` disables the check
    pub min_key_len: Option<usize>,

    /// Maximum path key length (exclusive)
    pub max_key_len: Option<usize>,

    /// Allow `/` inside the path key
    pub allow_nested_key: bool,
}

impl ExtractionRules {
    /// Rules for a content type
    pub fn for_kind(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Insights => Self::insights(),
            ContentKind::CaseStudies => Self::case_studies(),
            ContentKind::Services => Self::services(),
        }
    }

    pub fn insights() -> Self {
        Self {
            link_prefix: "/think/",
            selectors: CardSelectors::insights(),
            min_title_len: 10,
            max_title_len: 200,
            excluded_paths: &["/think/podcasts"],
            reject_fragments: true,
            min_key_len: None,
            max_key_len: None,
            allow_nested_key: true,
        }
    }

    pub fn case_studies() -> Self {
        Self {
            link_prefix: "/case-studies/",
            selectors: CardSelectors::cards(),
            min_title_len: 5,
            max_title_len: 200,
            excluded_paths: &["#search"],
            reject_fragments: false,
            min_key_len: Some(2),
            max_key_len: None,
            allow_nested_key: true,
        }
    }

    pub fn services() -> Self {
        Self {
            link_prefix: "/consulting/",
            selectors: CardSelectors::cards(),
            min_title_len: 3,
            max_title_len: 100,
            excluded_paths: &[],
            reject_fragments: false,
            min_key_len: Some(2),
            max_key_len: Some(40),
            allow_nested_key: false,
        }
    }

    /// Check a candidate against the title, href and key filters
    pub fn accepts(&self, candidate: &RawCandidate) -> bool {
        let title_len = candidate.title.chars().count();
        if title_len <= self.min_title_len || title_len >= self.max_title_len {
            return false;
        }

        if !candidate.href.contains(self.link_prefix) {
            return false;
        }

        if self
            .excluded_paths
            .iter()
            .any(|path| candidate.href.contains(path))
        {
            return false;
        }

        if self.reject_fragments && candidate.href.contains('#') {
            return false;
        }

        let key_len = candidate.path_key.chars().count();
        if let Some(min) = self.min_key_len {
            if candidate.path_key.is_empty() || key_len <= min {
                return false;
            }
        }
        if let Some(max) = self.max_key_len {
            if key_len >= max {
                return false;
            }
        }
        if !self.allow_nested_key && candidate.path_key.contains('/') {
            return false;
        }

        true
    }
}

/// Path segment following the last occurrence of `prefix`, without query,
/// fragment or trailing slash
pub fn path_key(href: &str, prefix: &str) -> String {
    let tail = match href.rfind(prefix) {
        Some(pos) => &href[pos + prefix.len()..],
        None => return String::new(),
    };

    let end = tail.find(['?', '#']).unwrap_or(tail.len());
    tail[..end].trim_end_matches('/').to_string()
}

/// Extract every accepted candidate from a listing page, in document order
pub fn extract_candidates(html: &str, rules: &ExtractionRules) -> Vec<RawCandidate> {
    let document = Html::parse_document(html);

    document
        .select(&ANCHOR)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            if !href.contains(rules.link_prefix) {
                return None;
            }
            Some(read_card(anchor, href, rules))
        })
        .filter(|candidate| rules.accepts(candidate))
        .collect()
}

fn read_card(anchor: ElementRef<'_>, href: &str, rules: &ExtractionRules) -> RawCandidate {
    let selectors = &rules.selectors;

    let title = first_text(anchor, selectors.title).unwrap_or_else(|| element_text(anchor));

    RawCandidate {
        title,
        href: href.to_string(),
        path_key: path_key(href, rules.link_prefix),
        summary: first_text(anchor, selectors.summary),
        category: selectors
            .category
            .and_then(|selector| first_text(anchor, selector)),
        author: selectors
            .author
            .and_then(|selector| first_text(anchor, selector)),
        image: anchor
            .select(selectors.image)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(str::trim)
            .filter(|src| !src.is_empty())
            .map(str::to_string),
    }
}

/// Text of the first match, `None` when absent or blank
fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(element_text)
        .and_then(non_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_key() {
        assert_eq!(
            path_key("/case-studies/acme-bank?lnk=hm", "/case-studies/"),
            "acme-bank"
        );
        assert_eq!(
            path_key("https://www.ibm.com/consulting/strategy/", "/consulting/"),
            "strategy"
        );
        assert_eq!(path_key("/consulting/a/b", "/consulting/"), "a/b");
        assert_eq!(path_key("/other", "/consulting/"), "");
    }

    #[test]
    fn test_extract_insight_card() {
        let html = r#"
            <html><body>
              <a href="/think/insights/future-of-ai">
                <span class="eyebrow">Artificial Intelligence</span>
                <h3>The Future of AI in Enterprise Consulting</h3>
                <p>A deep dive into how AI is transforming consulting.</p>
                <span class="author-name">Jane Doe</span>
                <img src="/content/dam/ai.jpg">
              </a>
            </body></html>
        "#;

        let candidates = extract_candidates(html, &ExtractionRules::insights());

        assert_eq!(candidates.len(), 1);
        let c = &candidates[0];
        assert_eq!(c.title, "The Future of AI in Enterprise Consulting");
        assert_eq!(
            c.summary.as_deref(),
            Some("A deep dive into how AI is transforming consulting.")
        );
        assert_eq!(c.category.as_deref(), Some("Artificial Intelligence"));
        assert_eq!(c.author.as_deref(), Some("Jane Doe"));
        assert_eq!(c.image.as_deref(), Some("/content/dam/ai.jpg"));
    }

    #[test]
    fn test_anchor_text_used_when_no_heading() {
        let html = r#"<a href="/think/topics/quantum-computing">Quantum computing explained</a>"#;
        let candidates = extract_candidates(html, &ExtractionRules::insights());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "Quantum computing explained");
    }

    #[test]
    fn test_insight_filters() {
        let html = r#"
            <a href="/think/podcasts/episode-1"><h3>A podcast episode title</h3></a>
            <a href="/think/insights#top"><h3>Fragment link title here</h3></a>
            <a href="/think/short"><h3>Too short</h3></a>
            <a href="/products/x"><h3>Not in the content area</h3></a>
            <a href="/think/insights/kept"><h3>This one should be kept</h3></a>
        "#;

        let candidates = extract_candidates(html, &ExtractionRules::insights());

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "This one should be kept");
    }

    #[test]
    fn test_case_study_filters() {
        let html = r##"
            <a href="/case-studies/#search"><h3>Search all studies</h3></a>
            <a href="/case-studies/ab"><h3>Two letter key</h3></a>
            <a href="/case-studies/acme-bank?lnk=1"><h2>Acme Bank</h2><p>Modernized core banking.</p></a>
        "##;

        let candidates = extract_candidates(html, &ExtractionRules::case_studies());

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].path_key, "acme-bank");
        assert_eq!(candidates[0].title, "Acme Bank");
        assert_eq!(
            candidates[0].summary.as_deref(),
            Some("Modernized core banking.")
        );
        assert_eq!(candidates[0].category, None);
    }

    #[test]
    fn test_service_filters() {
        let html = r#"
            <a href="/consulting/strategy"><h3>Strategy</h3></a>
            <a href="/consulting/a/b"><h3>Nested path</h3></a>
            <a href="/consulting/this-key-is-definitely-far-too-long-to-be-a-service"><h3>Long key</h3></a>
            <a href="/consulting/ai"><h3>Too short key</h3></a>
        "#;

        let candidates = extract_candidates(html, &ExtractionRules::services());

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].path_key, "strategy");
    }

    #[test]
    fn test_empty_page() {
        let html = "<html><body><h1>Empty page</h1></body></html>";
        assert!(extract_candidates(html, &ExtractionRules::insights()).is_empty());
    }
}
