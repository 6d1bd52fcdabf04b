//! Axum route handlers for drafts, progress and results.
//!
//! Drafts are offline-first: every write lands in the local store; a caller
//! with an identity is mirrored to the remote store, and a remote failure is
//! logged without blocking (the local copy already succeeded).

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::errors::AppError;
use crate::models::career::{Assessment, CareerResult, Story};
use crate::progress::{check_progress, ProgressReport};
use crate::state::AppState;
use crate::store::reconcile::reconcile_results;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveStoryRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveAssessmentRequest {
    pub time: String,
    pub budget: String,
    pub timeline: String,
    pub user_id: Option<String>,
}

/// PUT /api/v1/story
pub async fn handle_save_story(
    State(state): State<AppState>,
    Json(request): Json<SaveStoryRequest>,
) -> Result<Json<Story>, AppError> {
    let story = Story::new(request.content);
    state.local.save_story(&story)?;

    if let (Some(remote), Some(user)) = (&state.remote, request.user_id.as_deref()) {
        if let Err(e) = remote.save_story(Some(user), &story).await {
            warn!("Remote story save failed, local copy retained: {e}");
        }
    }

    Ok(Json(story))
}

/// GET /api/v1/story
pub async fn handle_get_story(
    State(state): State<AppState>,
    Query(params): Query<UserQuery>,
) -> Result<Json<Story>, AppError> {
    if let Some(story) = state.local.load_story() {
        return Ok(Json(story));
    }

    if let (Some(remote), Some(user)) = (&state.remote, params.user_id.as_deref()) {
        if let Some(story) = remote.fetch_story(Some(user)).await? {
            return Ok(Json(story));
        }
    }

    Err(AppError::NotFound("No saved story yet.".to_string()))
}

/// PUT /api/v1/assessment
pub async fn handle_save_assessment(
    State(state): State<AppState>,
    Json(request): Json<SaveAssessmentRequest>,
) -> Result<Json<Assessment>, AppError> {
    let assessment = Assessment::new(request.time, request.budget, request.timeline);
    state.local.save_assessment(&assessment)?;

    if let (Some(remote), Some(user)) = (&state.remote, request.user_id.as_deref()) {
        if let Err(e) = remote.save_assessment(Some(user), &assessment).await {
            warn!("Remote assessment save failed, local copy retained: {e}");
        }
    }

    Ok(Json(assessment))
}

/// GET /api/v1/assessment
pub async fn handle_get_assessment(
    State(state): State<AppState>,
    Query(params): Query<UserQuery>,
) -> Result<Json<Assessment>, AppError> {
    if let Some(assessment) = state.local.load_assessment() {
        return Ok(Json(assessment));
    }

    if let (Some(remote), Some(user)) = (&state.remote, params.user_id.as_deref()) {
        if let Some(assessment) = remote.fetch_assessment(Some(user)).await? {
            return Ok(Json(assessment));
        }
    }

    Err(AppError::NotFound("No saved assessment yet.".to_string()))
}

/// GET /api/v1/progress
pub async fn handle_get_progress(State(state): State<AppState>) -> Json<ProgressReport> {
    let story = state.local.load_story();
    let assessment = state.local.load_assessment();
    Json(check_progress(story.as_ref(), assessment.as_ref()))
}

/// GET /api/v1/results
///
/// The remote list (newest first, signed-in callers only) reconciled with the
/// local latest-result cache. Only displayable results are returned.
pub async fn handle_list_results(
    State(state): State<AppState>,
    Query(params): Query<UserQuery>,
) -> Result<Json<Vec<CareerResult>>, AppError> {
    let local_latest = state.local.load_latest_result();

    let remote_results = match (&state.remote, params.user_id.as_deref()) {
        (Some(remote), Some(user)) => remote.list_results(Some(user)).await?,
        _ => Vec::new(),
    };

    let results: Vec<CareerResult> = reconcile_results(local_latest, remote_results)
        .into_iter()
        .filter(CareerResult::is_displayable)
        .collect();

    Ok(Json(results))
}

/// GET /api/v1/results/latest
pub async fn handle_latest_result(
    State(state): State<AppState>,
) -> Result<Json<CareerResult>, AppError> {
    state
        .local
        .load_latest_result()
        .filter(CareerResult::is_displayable)
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound("No results yet. Complete your career analysis first.".to_string())
        })
}
