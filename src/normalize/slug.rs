//! Slug derivation

/// Maximum slug length in characters
pub const MAX_SLUG_LEN: usize = 80;

/// Derive a URL-safe slug from free text
///
/// Lowercases, turns every run of characters outside `[a-z0-9]` into a single
/// hyphen, trims hyphens from both ends and caps the result at
/// [`MAX_SLUG_LEN`].
///
/// # Examples
///
/// ```
/// use showcase::normalize::slugify;
///
/// assert_eq!(slugify("  Hello, World!  "), "hello-world");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    // ASCII only from here on, so byte truncation is char-safe
    slug.truncate(MAX_SLUG_LEN);
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_basic_slug() {
        assert_eq!(
            slugify("The Future of AI in Enterprise Consulting is Now"),
            "the-future-of-ai-in-enterprise-consulting-is-now"
        );
    }

    #[test]
    fn test_collapses_and_trims() {
        assert_eq!(slugify("--AI & Cloud -- 2024!!"), "ai-cloud-2024");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("Café au lait"), "caf-au-lait");
    }

    #[test]
    fn test_truncates_without_trailing_hyphen() {
        let title = format!("{} tail", "a".repeat(79));
        let slug = slugify(&title);
        assert_eq!(slug.len(), 79);
        assert!(!slug.ends_with('-'));

        let long = "word ".repeat(40);
        assert!(slugify(&long).len() <= MAX_SLUG_LEN);
    }

    proptest! {
        #[test]
        fn prop_slug_shape(text in "\\PC{0,200}") {
            let slug = slugify(&text);
            prop_assert!(slug.len() <= MAX_SLUG_LEN);
            prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }
    }
}
