pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::analyze;
use crate::drafts;
use crate::processing;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis relay
        .route("/api/analyze", post(analyze::handlers::handle_analyze))
        // Drafts
        .route(
            "/api/v1/story",
            put(drafts::handlers::handle_save_story).get(drafts::handlers::handle_get_story),
        )
        .route(
            "/api/v1/assessment",
            put(drafts::handlers::handle_save_assessment)
                .get(drafts::handlers::handle_get_assessment),
        )
        .route("/api/v1/progress", get(drafts::handlers::handle_get_progress))
        // Processing flow
        .route("/api/v1/process", post(processing::handlers::handle_process))
        // Results
        .route("/api/v1/results", get(drafts::handlers::handle_list_results))
        .route(
            "/api/v1/results/latest",
            get(drafts::handlers::handle_latest_result),
        )
        .with_state(state)
}
