use crate::analyze::AssessmentAnswers;
use crate::errors::AppError;

/// Shown when the story is missing or blank.
pub const STORY_REQUIRED: &str = "Please complete your career story first.";
/// Shown when any assessment answer is missing or blank.
pub const ASSESSMENT_REQUIRED: &str = "Please complete all assessment sections.";

/// Validates a submission before any provider call is made. Rejections here
/// never reach the AI provider.
pub fn validate_submission(story: &str, answers: &AssessmentAnswers) -> Result<(), AppError> {
    if story.trim().is_empty() {
        return Err(AppError::Validation(STORY_REQUIRED.to_string()));
    }

    if answers.time.trim().is_empty()
        || answers.budget.trim().is_empty()
        || answers.timeline.trim().is_empty()
    {
        return Err(AppError::Validation(ASSESSMENT_REQUIRED.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers() -> AssessmentAnswers {
        AssessmentAnswers {
            time: "5-10".into(),
            budget: "100-500".into(),
            timeline: "6".into(),
        }
    }

    fn assert_validation_message(result: Result<(), AppError>, expected: &str) {
        match result {
            Err(AppError::Validation(msg)) => assert_eq!(msg, expected),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_submission_passes() {
        assert!(validate_submission("I have been a data analyst for six years", &answers()).is_ok());
    }

    #[test]
    fn test_empty_story_rejected() {
        assert_validation_message(validate_submission("", &answers()), STORY_REQUIRED);
    }

    #[test]
    fn test_whitespace_story_rejected() {
        assert_validation_message(validate_submission("   \n\t", &answers()), STORY_REQUIRED);
    }

    #[test]
    fn test_missing_time_rejected() {
        let mut a = answers();
        a.time = String::new();
        assert_validation_message(validate_submission("a story", &a), ASSESSMENT_REQUIRED);
    }

    #[test]
    fn test_missing_budget_rejected() {
        let mut a = answers();
        a.budget = "  ".into();
        assert_validation_message(validate_submission("a story", &a), ASSESSMENT_REQUIRED);
    }

    #[test]
    fn test_missing_timeline_rejected() {
        let mut a = answers();
        a.timeline = String::new();
        assert_validation_message(validate_submission("a story", &a), ASSESSMENT_REQUIRED);
    }

    #[test]
    fn test_story_checked_before_assessment() {
        let mut a = answers();
        a.time = String::new();
        assert_validation_message(validate_submission("", &a), STORY_REQUIRED);
    }
}
