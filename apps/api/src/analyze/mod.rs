// Career analysis relay.
// Validates the submission, builds the fixed two-message prompt and makes
// exactly one provider call. All LLM traffic goes through llm_client.

pub mod handlers;
pub mod prompts;
pub mod validation;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::career::Recommendation;

/// The three bucketed answers as submitted by the client. Fields default to
/// empty so partial submissions reach validation instead of a serde reject.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentAnswers {
    pub time: String,
    pub budget: String,
    pub timeline: String,
}

/// Seam between the relay/processing flow and the AI provider, so both can be
/// exercised against a mock without network access.
#[async_trait]
pub trait CareerAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        story: &str,
        answers: &AssessmentAnswers,
    ) -> Result<Recommendation, LlmError>;
}

#[async_trait]
impl CareerAnalyzer for LlmClient {
    async fn analyze(
        &self,
        story: &str,
        answers: &AssessmentAnswers,
    ) -> Result<Recommendation, LlmError> {
        let prompt = prompts::build_analysis_prompt(story, answers);
        self.call_json::<Recommendation>(prompts::ANALYSIS_SYSTEM, &prompt)
            .await
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Api { message, .. } => AppError::Provider(message),
            LlmError::Http(e) => {
                tracing::error!("Provider request failed: {e}");
                AppError::Provider("Failed to reach the AI provider. Please try again.".into())
            }
            LlmError::Parse(e) => {
                tracing::error!("Provider returned malformed JSON: {e}");
                AppError::Provider(
                    "The AI provider returned an unreadable response. Please try again.".into(),
                )
            }
            LlmError::EmptyContent => {
                AppError::Provider("The AI provider returned an empty response.".into())
            }
        }
    }
}
