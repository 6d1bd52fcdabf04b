//! Axum route handler for the analysis relay.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::analyze::validation::validate_submission;
use crate::analyze::AssessmentAnswers;
use crate::errors::AppError;
use crate::models::career::Recommendation;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub story: String,
    #[serde(default)]
    pub assessment: AssessmentAnswers,
}

/// POST /api/analyze
///
/// Validates the submission, then makes exactly one provider call and returns
/// the structured recommendation. Validation failures respond 400 before any
/// external call; provider failures respond 5xx with the provider's message.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<Recommendation>, AppError> {
    validate_submission(&request.story, &request.assessment)?;

    let recommendation = state
        .analyzer
        .analyze(&request.story, &request.assessment)
        .await?;

    Ok(Json(recommendation))
}
