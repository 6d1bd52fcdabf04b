//! Processing flow — the explicit state machine behind a career analysis run.
//!
//! States: idle → validating → calling-ai → saving → done, with error
//! reachable from validating and calling-ai. Side effects are isolated per
//! transition; retry is manual (re-run the flow), never automatic.

pub mod handlers;

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::analyze::{AssessmentAnswers, CareerAnalyzer};
use crate::errors::AppError;
use crate::models::career::{Assessment, CareerResult, Recommendation, Story, MIN_STORY_LEN};
use crate::progress::check_progress;
use crate::store::local::LocalStore;
use crate::store::remote::RemoteStore;

/// The stage a failed run was in when it errored. Validation failures carry a
/// remediation message; provider failures carry the provider's message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailedStage {
    Validating,
    CallingAi,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ProcessingState {
    Idle,
    Validating,
    CallingAi,
    Saving,
    Done,
    Error { stage: FailedStage, message: String },
}

/// Drives one analysis run end to end against injected stores and analyzer.
pub struct ProcessingFlow {
    local: Arc<LocalStore>,
    remote: Option<Arc<dyn RemoteStore>>,
    analyzer: Arc<dyn CareerAnalyzer>,
    state: ProcessingState,
}

pub const DRAFTS_MISSING: &str = "Please complete both your story and assessment first.";
pub const ASSESSMENT_INCOMPLETE: &str = "Please complete all assessment sections.";

fn story_too_short(missing: usize) -> String {
    format!(
        "Your story needs at least {MIN_STORY_LEN} characters. Add {missing} more and try again."
    )
}

impl ProcessingFlow {
    pub fn new(
        local: Arc<LocalStore>,
        remote: Option<Arc<dyn RemoteStore>>,
        analyzer: Arc<dyn CareerAnalyzer>,
    ) -> Self {
        Self {
            local,
            remote,
            analyzer,
            state: ProcessingState::Idle,
        }
    }

    pub fn state(&self) -> &ProcessingState {
        &self.state
    }

    /// Runs the flow. Calling again after an error re-enters validating (the
    /// manual retry path). Once the provider call is in flight there is no
    /// cancellation.
    pub async fn run(&mut self, user_id: Option<&str>) -> Result<CareerResult, AppError> {
        self.state = ProcessingState::Validating;
        let (story, assessment) = match self.validate() {
            Ok(drafts) => drafts,
            Err(message) => {
                self.state = ProcessingState::Error {
                    stage: FailedStage::Validating,
                    message: message.clone(),
                };
                return Err(AppError::Validation(message));
            }
        };

        self.state = ProcessingState::CallingAi;
        let answers = AssessmentAnswers {
            time: assessment.time.clone(),
            budget: assessment.budget.clone(),
            timeline: assessment.timeline.clone(),
        };
        let recommendation = match self.analyzer.analyze(&story.content, &answers).await {
            Ok(recommendation) => recommendation,
            Err(e) => {
                let error: AppError = e.into();
                self.state = ProcessingState::Error {
                    stage: FailedStage::CallingAi,
                    message: error.to_string(),
                };
                return Err(error);
            }
        };
        info!("Analysis call succeeded: {}", recommendation.title);

        self.state = ProcessingState::Saving;
        let result = self.save(user_id, story, assessment, recommendation).await?;

        self.state = ProcessingState::Done;
        Ok(result)
    }

    /// Validating: reads both local drafts and applies the completion gates.
    fn validate(&self) -> Result<(Story, Assessment), String> {
        let story = self.local.load_story();
        let assessment = self.local.load_assessment();

        let report = check_progress(story.as_ref(), assessment.as_ref());

        let (Some(story), Some(assessment)) = (story, assessment) else {
            return Err(DRAFTS_MISSING.to_string());
        };

        if !report.story_complete {
            return Err(story_too_short(report.missing_story_characters));
        }
        if !report.assessment_complete {
            return Err(ASSESSMENT_INCOMPLETE.to_string());
        }

        Ok((story, assessment))
    }

    /// Saving: local write always; the remote write is attempted only for a
    /// signed-in caller and never blocks the run — the local copy has already
    /// succeeded.
    async fn save(
        &self,
        user_id: Option<&str>,
        story: Story,
        assessment: Assessment,
        recommendation: Recommendation,
    ) -> Result<CareerResult, AppError> {
        let result = CareerResult::new(user_id, story, assessment, recommendation);

        self.local.save_latest_result(&result)?;

        if let (Some(remote), Some(user)) = (&self.remote, user_id) {
            if let Err(e) = remote.append_result(Some(user), &result).await {
                warn!("Remote result save failed, local copy retained: {e}");
            }
        }

        Ok(result)
    }
}
