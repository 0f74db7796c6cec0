//! CSS selectors used by the listing and article extractors
//!
//! Each field is a selector group, so the first match in document order wins
//! regardless of which alternative matched.

use lazy_static::lazy_static;
use scraper::Selector;

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

lazy_static! {
    // Listing pages
    pub(crate) static ref ANCHOR: Selector = parse_selector!("a[href]");

    static ref INSIGHT_TITLE: Selector = parse_selector!("h3, h4, [class*='title']");

    static ref CARD_TITLE: Selector = parse_selector!("h2, h3, h4, [class*='title']");

    static ref INSIGHT_SUMMARY: Selector =
        parse_selector!("p, [class*='description'], [class*='summary']");

    static ref CARD_DESCRIPTION: Selector = parse_selector!("p, [class*='description']");

    static ref CATEGORY: Selector =
        parse_selector!("[class*='category'], [class*='eyebrow'], [class*='tag']");

    static ref AUTHOR: Selector = parse_selector!("[class*='author']");

    static ref IMAGE: Selector = parse_selector!("img[src]");

    // Article pages
    pub(crate) static ref ARTICLE_TITLE: Selector = parse_selector!("h1");

    pub(crate) static ref ARTICLE_BODY: Selector =
        parse_selector!("article, [class*='article'], [class*='content']");

    pub(crate) static ref PARAGRAPH: Selector = parse_selector!("p");

    pub(crate) static ref ARTICLE_AUTHOR: Selector =
        parse_selector!("[class*='author'], [rel='author']");

    pub(crate) static ref ARTICLE_DATE: Selector = parse_selector!("time, [class*='date']");
}

/// Per-field selectors applied inside one listing anchor
pub struct CardSelectors {
    pub title: &'static Selector,
    pub summary: &'static Selector,
    pub category: Option<&'static Selector>,
    pub author: Option<&'static Selector>,
    pub image: &'static Selector,
}

impl CardSelectors {
    /// Think article cards: title, summary, eyebrow category and author
    pub fn insights() -> Self {
        Self {
            title: &INSIGHT_TITLE,
            summary: &INSIGHT_SUMMARY,
            category: Some(&CATEGORY),
            author: Some(&AUTHOR),
            image: &IMAGE,
        }
    }

    /// Case study and service cards: title and description only
    pub fn cards() -> Self {
        Self {
            title: &CARD_TITLE,
            summary: &CARD_DESCRIPTION,
            category: None,
            author: None,
            image: &IMAGE,
        }
    }
}
