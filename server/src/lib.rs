pub mod error;
pub mod extract;

use axum::extract::{Multipart, Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use error::ApiError;
use extract::TextExtractor;
use jobmatch_core::normalize::normalize;
use jobmatch_core::{analyze, rank, IndexState, MatchError, DEFAULT_TOP_K};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<IndexState>,
    pub extractor: Arc<dyn TextExtractor>,
    pub top_k: usize,
}

impl AppState {
    pub fn new(index: IndexState, extractor: Arc<dyn TextExtractor>) -> Self {
        Self {
            index: Arc::new(index),
            extractor,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }
}

#[derive(Serialize)]
pub struct RankedJob {
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub job_posting_url: String,
    pub match_score: f32,
}

#[derive(Serialize)]
pub struct MatchResponse {
    pub matches: Vec<RankedJob>,
    pub matched_keywords: Vec<String>,
    pub suggested_keywords: Vec<String>,
}

#[derive(Serialize)]
pub struct JobDetail {
    pub id: u32,
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub job_posting_url: String,
}

pub fn build_app(state: AppState) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(health_handler))
        .route("/match", post(match_handler))
        .route("/jobs/:id", get(job_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "corpus_ready": state.index.is_ready(),
    }))
}

pub async fn match_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchResponse>, ApiError> {
    // fail fast before touching the payload
    state.index.get()?;

    let mut payload: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| MatchError::InvalidInput(e.to_string()))?
    {
        if field.name() == Some("resume") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| MatchError::InvalidInput(e.to_string()))?;
            payload = Some(bytes.to_vec());
            break;
        }
    }
    let payload =
        payload.ok_or_else(|| MatchError::InvalidInput("missing \"resume\" file field".into()))?;
    if payload.is_empty() {
        return Err(MatchError::InvalidInput("empty \"resume\" file field".into()).into());
    }

    let index = Arc::clone(&state.index);
    let extractor = Arc::clone(&state.extractor);
    let top_k = state.top_k;
    let response = tokio::task::spawn_blocking(move || {
        match_document(&index, extractor.as_ref(), &payload, top_k)
    })
    .await
    .map_err(|e| MatchError::VectorizationFailure(e.to_string()))??;

    Ok(Json(response))
}

/// The synchronous matching pipeline; runs on the blocking pool.
fn match_document(
    index: &IndexState,
    extractor: &dyn TextExtractor,
    payload: &[u8],
    top_k: usize,
) -> Result<MatchResponse, MatchError> {
    let index = index.get()?;
    let raw_text = extractor.extract(payload)?;
    tracing::debug!(chars = raw_text.len(), "extracted resume text");

    let resume_text = normalize(&raw_text);
    let resume_vector = index.project(&resume_text);
    let ranked = rank(&resume_vector, index, top_k);
    let keywords = analyze(&resume_text, ranked.iter().map(|r| r.posting));

    let matches = ranked
        .iter()
        .map(|r| RankedJob {
            title: r.posting.title.clone(),
            company_name: r.posting.company_name.clone(),
            location: r.posting.location.clone(),
            job_posting_url: r.posting.job_posting_url.clone(),
            match_score: r.score,
        })
        .collect();

    Ok(MatchResponse {
        matches,
        matched_keywords: keywords.matched,
        suggested_keywords: keywords.suggested,
    })
}

async fn job_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<JobDetail>, ApiError> {
    let index = state.index.get()?;
    let posting = index
        .posting(id)
        .ok_or_else(|| ApiError::NotFound(format!("no job posting with id {id}")))?;
    Ok(Json(JobDetail {
        id: posting.id,
        title: posting.title.clone(),
        company_name: posting.company_name.clone(),
        location: posting.location.clone(),
        job_posting_url: posting.job_posting_url.clone(),
    }))
}
