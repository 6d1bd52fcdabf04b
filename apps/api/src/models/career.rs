//! Core career-guidance records shared across the relay, stores and flow.
//!
//! Wire shapes are camelCase to stay compatible with the client contract
//! (`userStory`, `latestResult`, `marketStats`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum trimmed story length before a run may proceed.
pub const MIN_STORY_LEN: usize = 50;

/// Sentinel identity for runs made without a signed-in user.
pub const ANONYMOUS_USER: &str = "anonymous";

/// The user's free-text career narrative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub content: String,
    pub updated_at: DateTime<Utc>,
    pub completed: bool,
}

impl Story {
    /// Builds a story draft, deriving the completion flag from length.
    pub fn new(content: String) -> Self {
        let completed = content.trim().chars().count() >= MIN_STORY_LEN;
        Self {
            content,
            updated_at: Utc::now(),
            completed,
        }
    }

    pub fn trimmed_len(&self) -> usize {
        self.content.trim().chars().count()
    }
}

/// The three bucketed constraint answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub time: String,
    pub budget: String,
    pub timeline: String,
    pub updated_at: DateTime<Utc>,
    pub completed: bool,
}

impl Assessment {
    /// Builds an assessment draft, deriving the completion flag from the answers.
    pub fn new(time: String, budget: String, timeline: String) -> Self {
        let completed =
            !time.trim().is_empty() && !budget.trim().is_empty() && !timeline.trim().is_empty();
        Self {
            time,
            budget,
            timeline,
            updated_at: Utc::now(),
            completed,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.time.trim().is_empty()
            && !self.budget.trim().is_empty()
            && !self.timeline.trim().is_empty()
    }
}

/// A skill the user should develop, with a target proficiency percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: u8,
}

/// Market statistics for the recommended direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketStats {
    pub demand: String,
    pub salary: String,
    pub growth: String,
}

/// A learning resource within the user's time/budget constraints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningResource {
    pub title: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
}

/// Structured guidance produced by the AI provider. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub timeline: String,
    pub skills: Vec<Skill>,
    pub market_stats: MarketStats,
    #[serde(default)]
    pub resources: Vec<LearningResource>,
    #[serde(default)]
    pub milestones: Vec<String>,
}

/// One completed run: story + assessment + recommendation, stored locally and
/// (when signed in) remotely under the same id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerResult {
    pub id: Uuid,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub story: Story,
    pub assessment: Assessment,
    pub recommendation: Recommendation,
}

impl CareerResult {
    pub fn new(
        user_id: Option<&str>,
        story: Story,
        assessment: Assessment,
        recommendation: Recommendation,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.unwrap_or(ANONYMOUS_USER).to_string(),
            timestamp: Utc::now(),
            story,
            assessment,
            recommendation,
        }
    }

    /// A result is only shown downstream if the story meets the length gate
    /// and all three assessment answers are populated.
    pub fn is_displayable(&self) -> bool {
        self.story.trimmed_len() >= MIN_STORY_LEN && self.assessment.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessment() -> Assessment {
        Assessment::new("5-10".into(), "100-500".into(), "6".into())
    }

    fn recommendation() -> Recommendation {
        Recommendation {
            title: "AI Product Engineer".into(),
            description: "Blend your product background with applied ML.".into(),
            timeline: "6 months".into(),
            skills: vec![Skill {
                name: "Python".into(),
                level: 70,
            }],
            market_stats: MarketStats {
                demand: "High".into(),
                salary: "$120k-$160k".into(),
                growth: "24%".into(),
            },
            resources: vec![],
            milestones: vec![],
        }
    }

    #[test]
    fn test_story_completion_at_threshold() {
        let short = Story::new("a".repeat(MIN_STORY_LEN - 1));
        assert!(!short.completed);

        let exact = Story::new("a".repeat(MIN_STORY_LEN));
        assert!(exact.completed);
    }

    #[test]
    fn test_story_whitespace_not_counted() {
        let padded = Story::new(format!("  {}  ", "a".repeat(MIN_STORY_LEN - 1)));
        assert!(!padded.completed);
    }

    #[test]
    fn test_assessment_completion_requires_all_answers() {
        assert!(assessment().completed);
        let partial = Assessment::new("5-10".into(), "".into(), "6".into());
        assert!(!partial.completed);
        let blank = Assessment::new("5-10".into(), "   ".into(), "6".into());
        assert!(!blank.completed);
    }

    #[test]
    fn test_result_anonymous_sentinel() {
        let result = CareerResult::new(
            None,
            Story::new("x".repeat(60)),
            assessment(),
            recommendation(),
        );
        assert_eq!(result.user_id, ANONYMOUS_USER);
    }

    #[test]
    fn test_result_displayable_requires_both_gates() {
        let good = CareerResult::new(
            Some("user-1"),
            Story::new("x".repeat(60)),
            assessment(),
            recommendation(),
        );
        assert!(good.is_displayable());

        let short_story = CareerResult::new(
            Some("user-1"),
            Story::new("too short".into()),
            assessment(),
            recommendation(),
        );
        assert!(!short_story.is_displayable());

        let incomplete = CareerResult::new(
            Some("user-1"),
            Story::new("x".repeat(60)),
            Assessment::new("".into(), "100-500".into(), "6".into()),
            recommendation(),
        );
        assert!(!incomplete.is_displayable());
    }

    #[test]
    fn test_recommendation_deserializes_provider_shape() {
        let json = r#"{
            "title": "Machine Learning Engineer",
            "description": "Transition from data analysis into production ML.",
            "timeline": "6-9 months",
            "skills": [
                {"name": "Python", "level": 80},
                {"name": "MLOps", "level": 55}
            ],
            "marketStats": {
                "demand": "Very High",
                "salary": "$130,000 - $180,000",
                "growth": "35%"
            },
            "resources": [
                {"title": "fast.ai", "type": "course", "link": "https://fast.ai", "cost": "free"}
            ],
            "milestones": ["Ship a portfolio project"]
        }"#;

        let rec: Recommendation = serde_json::from_str(json).unwrap();
        assert_eq!(rec.title, "Machine Learning Engineer");
        assert_eq!(rec.skills.len(), 2);
        assert_eq!(rec.market_stats.growth, "35%");
        assert_eq!(rec.resources[0].resource_type, "course");
        assert_eq!(rec.resources[0].duration, None);
        assert_eq!(rec.milestones.len(), 1);
    }

    #[test]
    fn test_recommendation_tolerates_missing_optional_lists() {
        let json = r#"{
            "title": "Cloud Architect",
            "description": "Lean into your infrastructure experience.",
            "timeline": "12 months",
            "skills": [{"name": "AWS", "level": 75}],
            "marketStats": {"demand": "High", "salary": "$140k+", "growth": "20%"}
        }"#;

        let rec: Recommendation = serde_json::from_str(json).unwrap();
        assert!(rec.resources.is_empty());
        assert!(rec.milestones.is_empty());
    }

    #[test]
    fn test_result_round_trips_with_camel_case_keys() {
        let result = CareerResult::new(
            Some("user-1"),
            Story::new("x".repeat(60)),
            assessment(),
            recommendation(),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json["story"].get("updatedAt").is_some());
        assert!(json["recommendation"].get("marketStats").is_some());

        let back: CareerResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.id, result.id);
        assert_eq!(back.story.completed, result.story.completed);
    }
}
