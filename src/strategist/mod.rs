//! Keyword-matching content assistant
//!
//! Scores every record the read path currently serves against a free-text
//! query and answers with a persona-specific template built around the best
//! match. Nothing here writes to the cache.

use serde::Serialize;
use std::sync::Arc;

use crate::content::ContentCache;
use crate::models::{CaseStudy, Insight, Service};

/// Query words must be longer than this to count
const MIN_WORD_LEN: usize = 3;

/// Number of sources returned with an answer
const MAX_SOURCES: usize = 3;

const NO_MATCH_ANSWER: &str = "I'm analyzing our global knowledge base, but I couldn't find \
     cached insights matching your query right now. I can connect you with an IBM expert who \
     specializes in this area.";

/// Audience an answer is tailored to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Persona {
    Cfo,
    Cto,
    Cmo,
    #[default]
    General,
}

impl Persona {
    /// Parse a persona name; anything unrecognized is `General`
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "cfo" => Self::Cfo,
            "cto" => Self::Cto,
            "cmo" => Self::Cmo,
            _ => Self::General,
        }
    }

    fn pitch(&self) -> &'static str {
        match self {
            Self::Cfo => {
                "implementing this approach can significantly optimize operational costs and \
                 mitigate financial risk. It's a key driver for ROI in the current market."
            }
            Self::Cto => {
                "this technology stack is critical for scalable architecture. It integrates \
                 with hybrid cloud environments and uses generative AI to accelerate development."
            }
            Self::Cmo => {
                "this strategy is proven to enhance customer engagement and drive brand loyalty. \
                 It focuses on personalized experiences that convert."
            }
            Self::General => {
                "IBM Consulting recommends this approach to drive business transformation and \
                 innovation."
            }
        }
    }
}

/// A record cited by an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRef {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategistAnswer {
    pub answer: String,
    pub sources: Vec<SourceRef>,
}

/// One searchable record, flattened across content types
#[derive(Debug)]
struct Document<'a> {
    kind: &'static str,
    title: &'a str,
    text: String,
    url: &'a str,
}

impl<'a> Document<'a> {
    fn insight(insight: &'a Insight) -> Self {
        Self {
            kind: "insight",
            title: &insight.title,
            text: format!("{} {}", insight.title, insight.summary),
            url: &insight.url,
        }
    }

    fn case_study(study: &'a CaseStudy) -> Self {
        Self {
            kind: "case study",
            title: &study.client,
            text: format!("{} {}", study.client, study.challenge),
            url: &study.url,
        }
    }

    fn service(service: &'a Service) -> Self {
        Self {
            kind: "service",
            title: &service.title,
            text: format!("{} {}", service.title, service.description),
            url: service.url.as_deref().unwrap_or_default(),
        }
    }
}

/// Number of query words (longer than three characters) found in `text`
///
/// Matching is case-insensitive substring search; a word repeated in the
/// query counts each time.
pub fn relevance(text: &str, query: &str) -> usize {
    let haystack = text.to_lowercase();
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > MIN_WORD_LEN)
        .filter(|word| haystack.contains(word))
        .count()
}

/// Answer `query` from the given records
pub fn answer(
    query: &str,
    persona: Persona,
    insights: &[Insight],
    case_studies: &[CaseStudy],
    services: &[Service],
) -> StrategistAnswer {
    let documents = insights
        .iter()
        .map(Document::insight)
        .chain(case_studies.iter().map(Document::case_study))
        .chain(services.iter().map(Document::service));

    let mut scored: Vec<(usize, Document<'_>)> = documents
        .map(|doc| (relevance(&doc.text, query), doc))
        .filter(|(score, _)| *score > 0)
        .collect();

    // Stable, so ties keep insight, case study, service order
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(MAX_SOURCES);

    let answer = match scored.first() {
        Some((_, top)) => format!(
            "Based on our latest {}, \"{}\", {}",
            top.kind,
            top.title,
            persona.pitch()
        ),
        None => NO_MATCH_ANSWER.to_string(),
    };

    let sources = scored
        .into_iter()
        .map(|(_, doc)| SourceRef {
            title: doc.title.to_string(),
            url: if doc.url.is_empty() {
                "#".to_string()
            } else {
                doc.url.to_string()
            },
        })
        .collect();

    StrategistAnswer { answer, sources }
}

/// Answers queries from whatever the read path currently serves
#[derive(Clone)]
pub struct Strategist {
    cache: Arc<ContentCache>,
}

impl Strategist {
    pub fn new(cache: Arc<ContentCache>) -> Self {
        Self { cache }
    }

    pub async fn ask(&self, query: &str, persona: Persona) -> StrategistAnswer {
        let insights = self.cache.insights().await;
        let case_studies = self.cache.case_studies().await;
        let services = self.cache.services().await;

        let result = answer(
            query,
            persona,
            &insights.data,
            &case_studies.data,
            &services.data,
        );

        tracing::debug!(
            persona = ?persona,
            sources = result.sources.len(),
            "Strategist query answered"
        );

        result
    }
}
