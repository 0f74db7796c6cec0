//! REST API handlers
//!
//! Every content route reads through [`ContentCache`](crate::content::ContentCache),
//! so a cold or failed cache still answers from static data.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::server::AppState;
use crate::content::CacheStatus;
use crate::models::{CaseStudy, Insight, Service, Source};
use crate::strategist::{Persona, StrategistAnswer};

/// Name reported by the root endpoint
pub const SERVICE_NAME: &str = "showcase-api";

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Seconds since the server started
    pub uptime: u64,
    pub cache: CacheStatus,
}

/// Filtered list of records
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub source: Source,
}

impl<T> ListResponse<T> {
    fn new(data: Vec<T>, source: Source) -> Self {
        Self {
            total: data.len(),
            data,
            source,
        }
    }
}

/// Single record
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct ServicesResponse {
    pub data: Vec<Service>,
    pub source: Source,
}

#[derive(Debug, Default, Deserialize)]
pub struct InsightFilter {
    pub category: Option<String>,
    pub featured: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CaseStudyFilter {
    pub industry: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct StrategistRequest {
    pub query: Option<String>,
    pub persona: Option<String>,
}

// ============================================================================
// API Routes
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/api/health", get(health_check))
        // Content endpoints
        .route("/api/insights", get(list_insights))
        .route("/api/insights/{slug}", get(get_insight))
        .route("/api/case-studies", get(list_case_studies))
        .route("/api/case-studies/{slug}", get(get_case_study))
        .route("/api/services", get(list_services))
        // Interaction endpoints
        .route("/api/contact", post(submit_contact))
        .route("/api/strategist", post(ask_strategist))
        .fallback(not_found)
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

async fn service_info() -> impl IntoResponse {
    Json(ServiceInfo {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now().to_rfc3339(),
    })
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        uptime: state.start_time.elapsed().as_secs(),
        cache: state.cache.status().await,
    })
}

/// `Some(lowercased)` for a non-empty query parameter
fn filter_value(param: Option<&str>) -> Option<String> {
    param
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

async fn list_insights(
    State(state): State<AppState>,
    Query(filter): Query<InsightFilter>,
) -> Json<ListResponse<Insight>> {
    let result = state.cache.insights().await;
    let category = filter_value(filter.category.as_deref());
    let featured_only = filter.featured.as_deref() == Some("true");

    let data = result
        .data
        .iter()
        .filter(|insight| {
            category
                .as_deref()
                .map_or(true, |c| insight.category.to_lowercase() == c)
        })
        .filter(|insight| !featured_only || insight.featured)
        .cloned()
        .collect();

    Json(ListResponse::new(data, result.source))
}

async fn get_insight(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<DataResponse<Insight>>, ApiError> {
    let result = state.cache.insights().await;

    result
        .data
        .iter()
        .find(|insight| insight.slug == slug)
        .cloned()
        .map(|data| Json(DataResponse { data }))
        .ok_or_else(|| ApiError::NotFound("Insight not found".to_string()))
}

async fn list_case_studies(
    State(state): State<AppState>,
    Query(filter): Query<CaseStudyFilter>,
) -> Json<ListResponse<CaseStudy>> {
    let result = state.cache.case_studies().await;
    let industry = filter_value(filter.industry.as_deref());

    let data = result
        .data
        .iter()
        .filter(|study| {
            industry
                .as_deref()
                .map_or(true, |i| study.industry.to_lowercase().contains(i))
        })
        .cloned()
        .collect();

    Json(ListResponse::new(data, result.source))
}

async fn get_case_study(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<DataResponse<CaseStudy>>, ApiError> {
    let result = state.cache.case_studies().await;

    result
        .data
        .iter()
        .find(|study| study.slug == slug)
        .cloned()
        .map(|data| Json(DataResponse { data }))
        .ok_or_else(|| ApiError::NotFound("Case study not found".to_string()))
}

async fn list_services(State(state): State<AppState>) -> Json<ServicesResponse> {
    let result = state.cache.services().await;

    Json(ServicesResponse {
        data: result.data.to_vec(),
        source: result.source,
    })
}

/// Trimmed value of a required field, `None` when missing or blank
fn required(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|v| !v.is_empty())
}

async fn submit_contact(
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ContactResponse>, ApiError> {
    const REQUIRED: &str = "Name, email, and message are required.";

    let Json(request) = payload.map_err(|_| ApiError::BadRequest(REQUIRED.to_string()))?;

    let (Some(name), Some(email), Some(_message)) = (
        required(request.name.as_deref()),
        required(request.email.as_deref()),
        required(request.message.as_deref()),
    ) else {
        return Err(ApiError::BadRequest(REQUIRED.to_string()));
    };

    tracing::info!(
        name = %name,
        email = %email,
        company = %required(request.company.as_deref()).unwrap_or("N/A"),
        "Contact inquiry received"
    );

    Ok(Json(ContactResponse {
        success: true,
        message: "Thank you for your inquiry. We will be in touch shortly.",
    }))
}

async fn ask_strategist(
    State(state): State<AppState>,
    payload: Result<Json<StrategistRequest>, JsonRejection>,
) -> Result<Json<StrategistAnswer>, ApiError> {
    const REQUIRED: &str = "Query is required.";

    let Json(request) = payload.map_err(|_| ApiError::BadRequest(REQUIRED.to_string()))?;
    let query = required(request.query.as_deref())
        .ok_or_else(|| ApiError::BadRequest(REQUIRED.to_string()))?;
    let persona = request
        .persona
        .as_deref()
        .map(Persona::parse)
        .unwrap_or_default();

    Ok(Json(state.strategist.ask(query, persona).await))
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}
