//! Static fallback content
//!
//! Insights and case studies come from JSON compiled into the binary, or from
//! an override directory when one is configured. Override files are re-read on
//! every call so they can be edited without a restart. A missing or malformed
//! override falls back to the bundled copy; this module never fails.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::{CaseStudy, Insight, Service};

const BUNDLED_INSIGHTS: &str = include_str!("../../data/insights.json");
const BUNDLED_CASE_STUDIES: &str = include_str!("../../data/case-studies.json");

const INSIGHTS_FILE: &str = "insights.json";
const CASE_STUDIES_FILE: &str = "case-studies.json";

/// Source of fallback records
#[derive(Debug, Clone, Default)]
pub struct StaticContent {
    /// Directory checked for override files before the bundled data
    override_dir: Option<PathBuf>,
}

impl StaticContent {
    /// Bundled data only
    pub fn bundled() -> Self {
        Self::default()
    }

    /// Prefer files in `dir` over the bundled data
    pub fn with_override_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            override_dir: Some(dir.into()),
        }
    }

    pub fn override_dir(&self) -> Option<&Path> {
        self.override_dir.as_deref()
    }

    pub async fn insights(&self) -> Vec<Insight> {
        self.load(INSIGHTS_FILE, BUNDLED_INSIGHTS).await
    }

    pub async fn case_studies(&self) -> Vec<CaseStudy> {
        self.load(CASE_STUDIES_FILE, BUNDLED_CASE_STUDIES).await
    }

    /// Built-in service catalog, never empty
    pub fn services(&self) -> Vec<Service> {
        service_catalog()
    }

    async fn load<T: DeserializeOwned>(&self, file: &str, bundled: &str) -> Vec<T> {
        if let Some(dir) = &self.override_dir {
            let path = dir.join(file);
            match read_override(&path).await {
                Ok(records) => return records,
                Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        category = e.category().as_str(),
                        "Unusable static data file, using bundled data"
                    );
                }
            }
        }

        serde_json::from_str(bundled).unwrap_or_else(|e| {
            tracing::error!(file = file, error = %e, "Bundled static data is invalid");
            Vec::new()
        })
    }
}

async fn read_override<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

fn service(
    id: &str,
    title: &str,
    description: &str,
    icon: &str,
    image: &str,
    partners: &[&str],
) -> Service {
    Service {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        url: None,
        image: format!("https://images.unsplash.com/{image}?auto=format&fit=crop&w=800&q=80"),
        partners: partners.iter().map(|p| p.to_string()).collect(),
    }
}

fn service_catalog() -> Vec<Service> {
    vec![
        service(
            "strategy",
            "Strategy Consulting",
            "Transform your business model with data-driven strategy and AI-powered decision frameworks.",
            "strategy",
            "photo-1454165804606-c3d57bc86b40",
            &["IBM watsonx", "Microsoft OpenAI", "Adobe"],
        ),
        service(
            "experience",
            "Experience Design (iX)",
            "Create human-centric digital experiences that drive customer loyalty and business growth.",
            "design",
            "photo-1531403009284-440f080d1e12",
            &[],
        ),
        service(
            "technology",
            "Technology Transformation",
            "Build robust, scalable platforms with hybrid cloud technology and modern engineering.",
            "code",
            "photo-1519389950473-47ba0277781c",
            &["Microsoft Azure", "AWS", "Red Hat", "Google Cloud"],
        ),
        service(
            "operations",
            "Business Operations",
            "Optimize workflows and supply chains with intelligent automation and process mining.",
            "operations",
            "photo-1664575602276-acd073f104c1",
            &[],
        ),
        service(
            "data",
            "Data & Analytics",
            "Unlock the value of your data with modern data platforms, governance, and real-time analytics.",
            "data",
            "photo-1518186285589-2f7649de83e0",
            &[],
        ),
        service(
            "finance",
            "Finance Transformation",
            "Modernize finance operations with AI-driven insights and automated reporting.",
            "finance",
            "photo-1554224155-6726b3ff858f",
            &[],
        ),
        service(
            "talent",
            "Talent & Transformation",
            "Empower your workforce with HR transformation and digital skills development.",
            "people",
            "photo-1521737604893-d14cc237f11d",
            &[],
        ),
        service(
            "security",
            "Cybersecurity Services",
            "Protect your enterprise with zero-trust architecture and quantum-safe security strategies.",
            "security",
            "photo-1550751827-4bd374c3f58b",
            &[],
        ),
        service(
            "sustainability",
            "Sustainability",
            "Accelerate your ESG goals with IBM Envizi and end-to-end sustainability transformation.",
            "sustainability",
            "photo-1473448912268-2022ce9509d8",
            &[],
        ),
    ]
}
