//! Normalization of raw listing candidates into canonical records
//!
//! Every content type follows the same steps: build records with defaults,
//! drop records whose key repeats (first occurrence wins), mark the leading
//! records as featured, then cap the list.

pub mod images;
pub mod slug;

pub use images::{choose_image, resolve_image_url, topic_image, DEFAULT_IMAGE};
pub use slug::slugify;

use chrono::{NaiveDate, Utc};
use std::collections::HashSet;

use crate::models::{CaseStudy, Insight, RawCandidate, ResultMetric, Service};

/// Category applied when a card carries none
pub const DEFAULT_CATEGORY: &str = "Technology";

/// Attribution used for scraped articles without a byline
pub const DEFAULT_AUTHOR: &str = "IBM Think";

/// Industry applied to scraped case studies
pub const DEFAULT_INDUSTRY: &str = "Technology";

pub const INSIGHTS_CAP: usize = 20;
pub const CASE_STUDIES_CAP: usize = 15;
pub const INSIGHTS_FEATURED: usize = 3;
pub const CASE_STUDIES_FEATURED: usize = 2;

const DEFAULT_TECHNOLOGIES: &[&str] = &["IBM Consulting", "Cloud", "AI"];

/// Builds canonical records from raw candidates
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// Site origin for absolutizing links and images
    origin: String,

    /// Date stamped on scraped insights
    today: NaiveDate,
}

impl Normalizer {
    /// Create a normalizer stamping today's UTC date
    pub fn new(origin: impl Into<String>) -> Self {
        Self::with_date(origin, Utc::now().date_naive())
    }

    /// Create a normalizer with a fixed date
    pub fn with_date(origin: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            origin: origin.into(),
            today,
        }
    }

    /// Absolute URL for a scraped href
    pub fn absolute_url(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            return href.to_string();
        }

        url::Url::parse(&self.origin)
            .and_then(|base| base.join(href))
            .map(|u| u.to_string())
            .unwrap_or_else(|_| format!("{}{href}", self.origin.trim_end_matches('/')))
    }

    /// Insights: slug from title, defaults, dedup, first 3 featured, cap 20
    pub fn insights(&self, candidates: Vec<RawCandidate>) -> Vec<Insight> {
        let date = self.today.format("%Y-%m-%d").to_string();

        let records = candidates
            .into_iter()
            .filter_map(|raw| {
                let slug = slugify(&raw.title);
                if slug.is_empty() {
                    return None;
                }

                let category = raw
                    .category
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
                let summary = raw.summary.clone().unwrap_or_else(|| {
                    format!(
                        "Explore the latest insights on {}.",
                        raw.category.as_deref().unwrap_or("technology")
                    )
                });
                let read_time = estimate_read_time(&raw.title, &summary);
                let image = choose_image(raw.image.as_deref(), &raw.title, &category, &self.origin);

                Some(Insight {
                    slug,
                    url: self.absolute_url(&raw.href),
                    author: raw.author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
                    title: raw.title,
                    summary,
                    category,
                    date: date.clone(),
                    read_time,
                    featured: false,
                    image,
                })
            })
            .collect();

        let mut unique = dedup_by_key(records, |insight| insight.slug.as_str());
        mark_featured(&mut unique, INSIGHTS_FEATURED, |i, f| i.featured = f);
        unique.truncate(INSIGHTS_CAP);
        unique
    }

    /// Case studies: slug from the URL path, defaults, dedup, first 2
    /// featured, cap 15
    pub fn case_studies(&self, candidates: Vec<RawCandidate>) -> Vec<CaseStudy> {
        let records = candidates
            .into_iter()
            .filter(|raw| !raw.path_key.is_empty())
            .map(|raw| CaseStudy {
                challenge: raw.summary.clone().unwrap_or_else(|| {
                    format!("See how IBM Consulting helped transform {}.", raw.title)
                }),
                results: vec![
                    ResultMetric::new("Digital Transformation", "Achieved"),
                    ResultMetric::new("Time to Value", "Accelerated"),
                ],
                technologies: DEFAULT_TECHNOLOGIES.iter().map(|t| t.to_string()).collect(),
                url: self.absolute_url(&raw.href),
                image: choose_image(raw.image.as_deref(), &raw.title, "Case Study", &self.origin),
                industry: DEFAULT_INDUSTRY.to_string(),
                featured: false,
                slug: raw.path_key,
                client: raw.title,
            })
            .collect();

        let mut unique = dedup_by_key(records, |study| study.slug.as_str());
        mark_featured(&mut unique, CASE_STUDIES_FEATURED, |s, f| s.featured = f);
        unique.truncate(CASE_STUDIES_CAP);
        unique
    }

    /// Services: id from the URL path, defaults, dedup, no cap
    pub fn services(&self, candidates: Vec<RawCandidate>) -> Vec<Service> {
        let records = candidates
            .into_iter()
            .filter(|raw| !raw.path_key.is_empty())
            .map(|raw| Service {
                description: raw
                    .summary
                    .clone()
                    .unwrap_or_else(|| format!("IBM Consulting {} services.", raw.title)),
                icon: raw.path_key.clone(),
                url: Some(self.absolute_url(&raw.href)),
                image: choose_image(
                    raw.image.as_deref(),
                    &raw.title,
                    "Consulting Service",
                    &self.origin,
                ),
                partners: Vec::new(),
                id: raw.path_key,
                title: raw.title,
            })
            .collect();

        dedup_by_key(records, |service| service.id.as_str())
    }
}

/// Keep the first record for each key, preserving order
pub fn dedup_by_key<T, F>(items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key(item).to_string()))
        .collect()
}

/// Set the featured flag on the first `count` records and clear it elsewhere
fn mark_featured<T>(items: &mut [T], count: usize, set: impl Fn(&mut T, bool)) {
    for (index, item) in items.iter_mut().enumerate() {
        set(item, index < count);
    }
}

/// Estimated reading time, `"{n} min read"` with n in 4..=11
///
/// Listing cards only carry a title and a teaser, so the estimate grows one
/// minute per ten words of visible text on top of a four minute floor.
pub fn estimate_read_time(title: &str, summary: &str) -> String {
    let words = title.split_whitespace().count() + summary.split_whitespace().count();
    let minutes = (4 + words / 10).min(11);
    format!("{minutes} min read")
}
