//! Completion gate over the local drafts. Drives the dashboard progress view
//! and the validating step of the processing flow.

use serde::Serialize;

use crate::models::career::{Assessment, Story, MIN_STORY_LEN};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub story_complete: bool,
    pub assessment_complete: bool,
    pub story_length: usize,
    pub missing_story_characters: usize,
    pub can_proceed: bool,
}

pub fn check_progress(story: Option<&Story>, assessment: Option<&Assessment>) -> ProgressReport {
    let story_length = story.map(Story::trimmed_len).unwrap_or(0);
    let story_complete = story_length >= MIN_STORY_LEN;
    let assessment_complete = assessment.map(Assessment::is_complete).unwrap_or(false);

    ProgressReport {
        story_complete,
        assessment_complete,
        story_length,
        missing_story_characters: MIN_STORY_LEN.saturating_sub(story_length),
        can_proceed: story_complete && assessment_complete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessment() -> Assessment {
        Assessment::new("5-10".into(), "100-500".into(), "6".into())
    }

    #[test]
    fn test_no_drafts_cannot_proceed() {
        let report = check_progress(None, None);
        assert!(!report.can_proceed);
        assert_eq!(report.story_length, 0);
        assert_eq!(report.missing_story_characters, MIN_STORY_LEN);
    }

    #[test]
    fn test_short_story_reports_missing_characters() {
        let story = Story::new("a".repeat(30));
        let report = check_progress(Some(&story), Some(&assessment()));
        assert!(!report.story_complete);
        assert!(report.assessment_complete);
        assert_eq!(report.missing_story_characters, MIN_STORY_LEN - 30);
        assert!(!report.can_proceed);
    }

    #[test]
    fn test_complete_drafts_can_proceed() {
        let story = Story::new("a".repeat(MIN_STORY_LEN));
        let report = check_progress(Some(&story), Some(&assessment()));
        assert!(report.can_proceed);
        assert_eq!(report.missing_story_characters, 0);
    }

    #[test]
    fn test_incomplete_assessment_blocks() {
        let story = Story::new("a".repeat(60));
        let partial = Assessment::new("5-10".into(), "".into(), "6".into());
        let report = check_progress(Some(&story), Some(&partial));
        assert!(report.story_complete);
        assert!(!report.assessment_complete);
        assert!(!report.can_proceed);
    }
}
