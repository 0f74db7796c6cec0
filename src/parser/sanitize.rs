//! Text cleanup for values pulled out of listing cards

use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapse whitespace runs, drop invisible characters and trim
///
/// # Examples
///
/// ```
/// use showcase::parser::sanitize::sanitize_text;
///
/// assert_eq!(sanitize_text("  Hello\u{200B}\n\n  World "), "Hello World");
/// ```
pub fn sanitize_text(text: &str) -> String {
    let visible = remove_zero_width(text);
    WHITESPACE_REGEX
        .replace_all(visible.trim(), " ")
        .trim()
        .to_string()
}

/// Remove zero-width spaces, direction marks and the BOM
pub fn remove_zero_width(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(*c,
                '\u{200B}'..='\u{200F}' |
                '\u{2060}' |
                '\u{FEFF}'
            )
        })
        .collect()
}

/// Concatenated, sanitized text of an element
pub fn element_text(element: ElementRef<'_>) -> String {
    sanitize_text(&element.text().collect::<String>())
}

/// Sanitized text, `None` when empty after cleanup
pub fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
