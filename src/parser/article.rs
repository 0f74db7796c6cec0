//! Single article page extraction

use scraper::{Html, Selector};
use serde::Serialize;

use crate::parser::sanitize::{element_text, non_empty};
use crate::parser::selectors::{
    ARTICLE_AUTHOR, ARTICLE_BODY, ARTICLE_DATE, ARTICLE_TITLE, PARAGRAPH,
};

/// Paragraphs of this many characters or fewer are treated as chrome
const MIN_PARAGRAPH_LEN: usize = 20;

/// Full content of one article page; every field is best effort
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArticleDetail {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
}

/// Parse an article page
///
/// The body is the paragraphs of the first article-like container, joined by
/// blank lines.
pub fn parse_article(html: &str) -> ArticleDetail {
    let document = Html::parse_document(html);

    let first = |selector: &Selector| {
        document
            .select(selector)
            .next()
            .map(element_text)
            .and_then(non_empty)
    };

    let content = document.select(&ARTICLE_BODY).next().and_then(|body| {
        let paragraphs: Vec<String> = body
            .select(&PARAGRAPH)
            .map(element_text)
            .filter(|p| p.chars().count() > MIN_PARAGRAPH_LEN)
            .collect();
        non_empty(paragraphs.join("\n\n"))
    });

    ArticleDetail {
        title: first(&ARTICLE_TITLE),
        content,
        author: first(&ARTICLE_AUTHOR),
        date: first(&ARTICLE_DATE),
    }
}
