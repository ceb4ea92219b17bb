use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{validate_profile, Ranker};
use crate::models::{
    ErrorResponse, HealthResponse, InternshipsResponse, PostingRecord, RecommendRequest,
    RecommendResponse,
};
use crate::services::{CacheKey, CandidateCache, CandidateSource, CandidateSourceError};
use std::sync::Arc;
use std::time::Duration;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<CandidateSource>,
    pub cache: Option<Arc<CandidateCache>>,
    pub ranker: Ranker,
    pub source_timeout: Duration,
    pub default_limit: u16,
    pub max_limit: u16,
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/internships", web::get().to(list_internships))
        .route("/recommendations", web::post().to(recommend));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Load active postings, from cache when possible
///
/// The source call is bounded by the configured timeout. The ranker itself
/// never waits on I/O.
async fn load_candidates(state: &AppState) -> Result<Arc<Vec<PostingRecord>>, CandidateSourceError> {
    let key = CacheKey::active_postings(&state.source.describe());

    if let Some(cache) = &state.cache {
        if let Some(postings) = cache.get(&key).await {
            return Ok(postings);
        }
    }

    let postings = Arc::new(state.source.fetch_with_timeout(state.source_timeout).await?);
    tracing::debug!("Loaded {} active postings from {}", postings.len(), state.source.describe());

    if let Some(cache) = &state.cache {
        cache.set(&key, postings.clone()).await;
    }

    Ok(postings)
}

fn source_error_response(e: &CandidateSourceError) -> HttpResponse {
    tracing::error!("Failed to load candidate postings: {}", e);

    let body = ErrorResponse {
        error: "Failed to fetch internships".to_string(),
        message: e.to_string(),
        status_code: 500,
    };

    match e {
        CandidateSourceError::Timeout(_) => HttpResponse::GatewayTimeout().json(ErrorResponse {
            status_code: 504,
            ..body
        }),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

/// List active internships
///
/// GET /api/v1/internships
async fn list_internships(state: web::Data<AppState>) -> impl Responder {
    match load_candidates(&state).await {
        Ok(postings) => HttpResponse::Ok().json(InternshipsResponse {
            count: postings.len(),
            internships: postings.to_vec(),
        }),
        Err(e) => source_error_response(&e),
    }
}

/// Recommendations endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "userProfile": {
///     "education": "graduate",
///     "skills": ["Python", "Data Analysis"],
///     "sectors": ["Technology"],
///     "location": "Remote"
///   },
///   "limit": 3
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendation request: {}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let profile = &req.user_profile;
    if let Err(e) = validate_profile(profile) {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid profile".to_string(),
            message: e.to_string(),
            status_code: 400,
        });
    }

    // Cap limit to prevent oversized responses
    let limit = req.limit.unwrap_or(state.default_limit).min(state.max_limit) as usize;

    tracing::info!(
        "Recommending internships: education={}, skills={}, sectors={}, location={}, limit={}",
        profile.education,
        profile.skills.len(),
        profile.sectors.len(),
        profile.location,
        limit
    );

    let candidates = match load_candidates(&state).await {
        Ok(postings) => postings,
        Err(e) => return source_error_response(&e),
    };

    let result = match state.ranker.rank(profile, candidates.to_vec(), limit) {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Ranking aborted: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Ranking failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let response = RecommendResponse {
        recommendations: result.matches,
        total_candidates: result.active_candidates,
        success: true,
    };

    tracing::info!(
        "Returning {} recommendations (from {} candidates)",
        response.recommendations.len(),
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}
