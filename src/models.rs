// Core data structures for the showcase content cache

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Content types served by the API, each cached under its own key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentKind {
    Insights,
    CaseStudies,
    Services,
}

impl ContentKind {
    /// All content kinds in warming order
    pub const ALL: [ContentKind; 3] = [Self::Insights, Self::CaseStudies, Self::Services];

    /// Cache key / JSON field name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insights => "insights",
            Self::CaseStudies => "caseStudies",
            Self::Services => "services",
        }
    }

    /// Human-readable label for log lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::Insights => "insights",
            Self::CaseStudies => "case studies",
            Self::Services => "services",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a read-path response came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Served from the warmed cache
    Live,
    /// Served from bundled fallback data
    Static,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Static => "static",
        }
    }
}

/// Thought-leadership article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub author: String,
    /// Publication date, `YYYY-MM-DD`
    pub date: String,
    pub read_time: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image: String,
}

/// One headline result of a case study
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMetric {
    pub metric: String,
    pub value: String,
}

impl ResultMetric {
    pub fn new(metric: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            value: value.into(),
        }
    }
}

/// Client success story
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
    pub slug: String,
    pub client: String,
    pub industry: String,
    pub challenge: String,
    #[serde(default)]
    pub results: Vec<ResultMetric>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub featured: bool,
}

/// Consulting service offering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub partners: Vec<String>,
}

/// Unnormalized fields pulled from one anchor of a listing page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCandidate {
    /// Heading text, or the anchor text when no heading exists
    pub title: String,
    /// Raw `href` attribute
    pub href: String,
    /// Path segment after the content prefix, query string removed
    pub path_key: String,
    /// First paragraph-like text
    pub summary: Option<String>,
    /// Category/eyebrow/tag text
    pub category: Option<String>,
    /// Author text
    pub author: Option<String>,
    /// `src` of the first image
    pub image: Option<String>,
}

/// A cached content list, shared by reference with every reader
#[derive(Debug, Clone)]
pub enum ContentSet {
    Insights(Arc<Vec<Insight>>),
    CaseStudies(Arc<Vec<CaseStudy>>),
    Services(Arc<Vec<Service>>),
}

impl ContentSet {
    /// Kind of content held
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Insights(_) => ContentKind::Insights,
            Self::CaseStudies(_) => ContentKind::CaseStudies,
            Self::Services(_) => ContentKind::Services,
        }
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        match self {
            Self::Insights(items) => items.len(),
            Self::CaseStudies(items) => items.len(),
            Self::Services(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read-path result: the data plus which source produced it
#[derive(Debug, Clone, Serialize)]
pub struct Sourced<T> {
    pub data: T,
    pub source: Source,
}

impl<T> Sourced<T> {
    pub fn live(data: T) -> Self {
        Self {
            data,
            source: Source::Live,
        }
    }

    pub fn fallback(data: T) -> Self {
        Self {
            data,
            source: Source::Static,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_kind_keys() {
        assert_eq!(ContentKind::Insights.as_str(), "insights");
        assert_eq!(ContentKind::CaseStudies.as_str(), "caseStudies");
        assert_eq!(ContentKind::Services.to_string(), "services");
    }

    #[test]
    fn test_source_serialization() {
        assert_eq!(serde_json::to_string(&Source::Live).unwrap(), "\"live\"");
        assert_eq!(serde_json::to_string(&Source::Static).unwrap(), "\"static\"");
    }

    #[test]
    fn test_insight_uses_camel_case() {
        let insight = Insight {
            slug: "a".into(),
            title: "A".into(),
            summary: "s".into(),
            category: "AI".into(),
            author: "x".into(),
            date: "2024-01-01".into(),
            read_time: "5 min read".into(),
            featured: true,
            url: String::new(),
            image: String::new(),
        };
        let json = serde_json::to_value(&insight).unwrap();
        assert_eq!(json["readTime"], "5 min read");
        assert!(json.get("read_time").is_none());
    }

    #[test]
    fn test_content_set_len() {
        let set = ContentSet::Services(Arc::new(Vec::new()));
        assert!(set.is_empty());
        assert_eq!(set.kind(), ContentKind::Services);
    }
}
