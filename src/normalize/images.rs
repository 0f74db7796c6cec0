//! Image URL resolution and topic-based fallback images

/// Generic image used when nothing else applies
pub const DEFAULT_IMAGE: &str =
    "https://images.unsplash.com/photo-1519389950473-47ba0277781c?auto=format&fit=crop&w=800&q=80";

/// A fallback image and the keywords that select it
struct Topic {
    keywords: &'static [&'static str],
    image: &'static str,
}

// Order matters: service-specific topics first, general technology topics
// after, consulting last.
const TOPICS: &[Topic] = &[
    Topic {
        keywords: &["financ", "fintech"],
        image: "https://images.unsplash.com/photo-1554224155-6726b3ff858f?auto=format&fit=crop&w=800&q=80",
    },
    Topic {
        keywords: &["supply", "chain", "logistic"],
        image: "https://images.unsplash.com/photo-1586528116311-ad8dd3c8310d?auto=format&fit=crop&w=800&q=80",
    },
    Topic {
        keywords: &["talent", "people", "hr", "workforce"],
        image: "https://images.unsplash.com/photo-1521737604893-d14cc237f11d?auto=format&fit=crop&w=800&q=80",
    },
    Topic {
        keywords: &["experience", "design", "customer", "ix"],
        image: "https://images.unsplash.com/photo-1531403009284-440f080d1e12?auto=format&fit=crop&w=800&q=80",
    },
    Topic {
        keywords: &["operat", "business", "process"],
        image: "https://images.unsplash.com/photo-1664575602276-acd073f104c1?auto=format&fit=crop&w=800&q=80",
    },
    Topic {
        keywords: &["strategy", "advis"],
        image: "https://images.unsplash.com/photo-1454165804606-c3d57bc86b40?auto=format&fit=crop&w=800&q=80",
    },
    Topic {
        keywords: &["market", "brand", "commerce"],
        image: "https://images.unsplash.com/photo-1533750516457-a7f992034fec?auto=format&fit=crop&w=800&q=80",
    },
    Topic {
        keywords: &["modern", "app", "application", "legacy", "build"],
        image: "https://images.unsplash.com/photo-1460925895917-afdab827c52f?auto=format&fit=crop&w=800&q=80",
    },
    Topic {
        keywords: &["ai", "generative", "intelligen"],
        image: "https://images.unsplash.com/photo-1677442136019-21780ecad995?auto=format&fit=crop&w=800&q=80",
    },
    Topic {
        keywords: &["cloud", "hybrid", "openshift"],
        image: "https://images.unsplash.com/photo-1451187580459-43490279c0fa?auto=format&fit=crop&w=800&q=80",
    },
    Topic {
        keywords: &["secur", "cyber", "hack", "trust"],
        image: "https://images.unsplash.com/photo-1550751827-4bd374c3f58b?auto=format&fit=crop&w=800&q=80",
    },
    Topic {
        keywords: &["data", "analytic", "lakehouse"],
        image: "https://images.unsplash.com/photo-1518186285589-2f7649de83e0?auto=format&fit=crop&w=800&q=80",
    },
    Topic {
        keywords: &["automat", "robot", "efficien"],
        image: "https://images.unsplash.com/photo-1518432031352-d6fc5c10da5a?auto=format&fit=crop&w=800&q=80",
    },
    Topic {
        keywords: &["quantum", "compute"],
        image: "https://images.unsplash.com/photo-1635070041078-e363dbe005cb?auto=format&fit=crop&w=800&q=80",
    },
    Topic {
        keywords: &["sustain", "green", "climate", "esg"],
        image: "https://images.unsplash.com/photo-1473448912268-2022ce9509d8?auto=format&fit=crop&w=800&q=80",
    },
    Topic {
        keywords: &["consult", "strat", "transform"],
        image: "https://images.unsplash.com/photo-1552664730-d307ca884978?auto=format&fit=crop&w=800&q=80",
    },
];

/// Keywords up to this length must match a whole word, longer ones a word prefix
const SHORT_KEYWORD_LEN: usize = 3;

/// Resolve a scraped `src` against the site origin
///
/// Absolute URLs pass through, protocol-relative ones get `https:`, anything
/// else is treated as a path on `origin`.
pub fn resolve_image_url(src: &str, origin: &str) -> String {
    let src = src.trim();
    if src.starts_with("http://") || src.starts_with("https://") {
        src.to_string()
    } else if let Some(rest) = src.strip_prefix("//") {
        format!("https://{rest}")
    } else if src.starts_with('/') {
        format!("{}{src}", origin.trim_end_matches('/'))
    } else {
        format!("{}/{src}", origin.trim_end_matches('/'))
    }
}

/// Fallback image for the first topic whose keyword appears in `text`
pub fn topic_image(text: &str) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    TOPICS
        .iter()
        .find(|topic| {
            topic.keywords.iter().any(|keyword| {
                words.iter().any(|word| {
                    if keyword.len() <= SHORT_KEYWORD_LEN {
                        word == keyword
                    } else {
                        word.starts_with(keyword)
                    }
                })
            })
        })
        .map(|topic| topic.image)
}

/// Pick the image for a record
///
/// A scraped image wins; otherwise the topic lookup over `title` and
/// `category`; otherwise [`DEFAULT_IMAGE`].
pub fn choose_image(scraped: Option<&str>, title: &str, category: &str, origin: &str) -> String {
    if let Some(src) = scraped.filter(|s| !s.trim().is_empty()) {
        return resolve_image_url(src, origin);
    }

    topic_image(&format!("{title} {category}"))
        .unwrap_or(DEFAULT_IMAGE)
        .to_string()
}
