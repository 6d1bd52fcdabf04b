//! Axum route handler driving the processing flow.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::career::CareerResult;
use crate::processing::{ProcessingFlow, ProcessingState};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessRequest {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub state: ProcessingState,
    pub result: CareerResult,
}

/// POST /api/v1/process
///
/// Runs one analysis end to end: validate local drafts, call the provider,
/// persist the result. Errors map straight through `AppError`; the client
/// retries by posting again.
pub async fn handle_process(
    State(state): State<AppState>,
    Json(request): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>, AppError> {
    let mut flow = ProcessingFlow::new(
        state.local.clone(),
        state.remote.clone(),
        state.analyzer.clone(),
    );

    let result = flow.run(request.user_id.as_deref()).await?;

    Ok(Json(ProcessResponse {
        state: flow.state().clone(),
        result,
    }))
}
