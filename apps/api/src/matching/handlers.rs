//! Axum route handlers for the matching API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{ExperienceLevel, PostingKind, RoleFilter};
use crate::errors::AppError;
use crate::extract::extract_resume_text;
use crate::matching::matcher::{self, MatchResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume_text: String,
    pub kind: PostingKind,
    /// Required when `kind` is `job`; ignored for internships.
    pub experience: Option<ExperienceLevel>,
    /// Optional truncation applied after ranking.
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub matches: Vec<MatchResult>,
    /// Ranked total before `top_n` truncation.
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume_text: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub score: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/extract
///
/// Accepts a multipart upload with a `resume` PDF field and returns the
/// extracted plain text. The text is session-scoped; nothing is persisted.
pub async fn handle_extract_resume(
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("resume") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("failed to read resume upload: {e}")))?;

            let resume_text = extract_resume_text(&bytes)
                .map_err(|e| AppError::Unprocessable(e.to_string()))?;

            return Ok(Json(ExtractResponse { resume_text }));
        }
    }

    Err(AppError::Validation(
        "multipart field 'resume' is required".to_string(),
    ))
}

/// POST /api/v1/match
///
/// Filters the catalog by the caller's selection, ranks the survivors
/// against the résumé text, and returns the scored list. Empty résumé text
/// or an empty filtered set yields an empty `matches` array, not an error.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let filter = match request.kind {
        PostingKind::Internship => RoleFilter::Internship,
        PostingKind::Job => {
            let experience = request.experience.ok_or_else(|| {
                AppError::Validation("experience is required when kind is \"job\"".to_string())
            })?;
            RoleFilter::Job { experience }
        }
    };

    let postings = state.catalog.filter(&filter);
    let mut matches = matcher::rank_matches(&request.resume_text, &postings, &state.vectorizer);
    let total = matches.len();

    if let Some(top_n) = request.top_n {
        matches.truncate(top_n);
    }

    Ok(Json(MatchResponse { matches, total }))
}

/// POST /api/v1/score
///
/// Scores the résumé against one pasted job description.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }
    if request.description.trim().is_empty() {
        return Err(AppError::Validation("description cannot be empty".to_string()));
    }

    let score = matcher::score(&request.resume_text, &request.description, &state.vectorizer);

    Ok(Json(ScoreResponse { score }))
}
