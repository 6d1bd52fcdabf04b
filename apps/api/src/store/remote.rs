//! Remote persistence helper — the per-user Postgres store used when the
//! caller is signed in. Story and assessment are singleton rows per user;
//! results are an append-only collection listed newest-first.
//!
//! Every operation requires an identity: calls without one fail closed with
//! `AppError::Unauthorized`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::career::{Assessment, CareerResult, Recommendation, Story, ANONYMOUS_USER};

/// Contract of the per-user remote store. Production wires the Postgres
/// implementation; tests inject a mock so the processing flow's dual-write
/// and failure paths can be exercised without a database.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Upserts the user's singleton story.
    async fn save_story(&self, user_id: Option<&str>, story: &Story) -> Result<(), AppError>;

    async fn fetch_story(&self, user_id: Option<&str>) -> Result<Option<Story>, AppError>;

    /// Upserts the user's singleton assessment.
    async fn save_assessment(
        &self,
        user_id: Option<&str>,
        assessment: &Assessment,
    ) -> Result<(), AppError>;

    async fn fetch_assessment(&self, user_id: Option<&str>)
        -> Result<Option<Assessment>, AppError>;

    /// Appends a completed run to the user's results collection.
    async fn append_result(
        &self,
        user_id: Option<&str>,
        result: &CareerResult,
    ) -> Result<(), AppError>;

    /// Lists the user's results, newest first.
    async fn list_results(&self, user_id: Option<&str>) -> Result<Vec<CareerResult>, AppError>;
}

#[derive(Clone)]
pub struct PgRemoteStore {
    pool: PgPool,
}

#[derive(FromRow)]
struct StoryRow {
    content: String,
    updated_at: DateTime<Utc>,
    completed: bool,
}

#[derive(FromRow)]
struct AssessmentRow {
    time_bucket: String,
    budget_bucket: String,
    timeline_bucket: String,
    updated_at: DateTime<Utc>,
    completed: bool,
}

#[derive(FromRow)]
struct ResultRow {
    id: Uuid,
    user_id: String,
    created_at: DateTime<Utc>,
    story: Json<Story>,
    assessment: Json<Assessment>,
    recommendation: Json<Recommendation>,
}

impl From<ResultRow> for CareerResult {
    fn from(row: ResultRow) -> Self {
        CareerResult {
            id: row.id,
            user_id: row.user_id,
            timestamp: row.created_at,
            story: row.story.0,
            assessment: row.assessment.0,
            recommendation: row.recommendation.0,
        }
    }
}

/// Resolves the caller identity or fails closed. The anonymous sentinel never
/// reaches the remote store.
fn require_user(user_id: Option<&str>) -> Result<&str, AppError> {
    user_id
        .map(str::trim)
        .filter(|u| !u.is_empty() && *u != ANONYMOUS_USER)
        .ok_or(AppError::Unauthorized)
}

impl PgRemoteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the backing tables if they do not exist. Run once at startup.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_stories (
                user_id    TEXT PRIMARY KEY,
                content    TEXT NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL,
                completed  BOOLEAN NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_assessments (
                user_id         TEXT PRIMARY KEY,
                time_bucket     TEXT NOT NULL,
                budget_bucket   TEXT NOT NULL,
                timeline_bucket TEXT NOT NULL,
                updated_at      TIMESTAMPTZ NOT NULL,
                completed       BOOLEAN NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS career_results (
                id             UUID PRIMARY KEY,
                user_id        TEXT NOT NULL,
                created_at     TIMESTAMPTZ NOT NULL,
                story          JSONB NOT NULL,
                assessment     JSONB NOT NULL,
                recommendation JSONB NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS career_results_user_idx \
             ON career_results (user_id, created_at DESC)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl RemoteStore for PgRemoteStore {
    async fn save_story(&self, user_id: Option<&str>, story: &Story) -> Result<(), AppError> {
        let user = require_user(user_id)?;

        sqlx::query(
            r#"
            INSERT INTO user_stories (user_id, content, updated_at, completed)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE
            SET content = EXCLUDED.content,
                updated_at = EXCLUDED.updated_at,
                completed = EXCLUDED.completed
            "#,
        )
        .bind(user)
        .bind(&story.content)
        .bind(story.updated_at)
        .bind(story.completed)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn fetch_story(&self, user_id: Option<&str>) -> Result<Option<Story>, AppError> {
        let user = require_user(user_id)?;

        let row: Option<StoryRow> = sqlx::query_as(
            "SELECT content, updated_at, completed FROM user_stories WHERE user_id = $1",
        )
        .bind(user)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Story {
            content: r.content,
            updated_at: r.updated_at,
            completed: r.completed,
        }))
    }

    async fn save_assessment(
        &self,
        user_id: Option<&str>,
        assessment: &Assessment,
    ) -> Result<(), AppError> {
        let user = require_user(user_id)?;

        sqlx::query(
            r#"
            INSERT INTO user_assessments
                (user_id, time_bucket, budget_bucket, timeline_bucket, updated_at, completed)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO UPDATE
            SET time_bucket = EXCLUDED.time_bucket,
                budget_bucket = EXCLUDED.budget_bucket,
                timeline_bucket = EXCLUDED.timeline_bucket,
                updated_at = EXCLUDED.updated_at,
                completed = EXCLUDED.completed
            "#,
        )
        .bind(user)
        .bind(&assessment.time)
        .bind(&assessment.budget)
        .bind(&assessment.timeline)
        .bind(assessment.updated_at)
        .bind(assessment.completed)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn fetch_assessment(
        &self,
        user_id: Option<&str>,
    ) -> Result<Option<Assessment>, AppError> {
        let user = require_user(user_id)?;

        let row: Option<AssessmentRow> = sqlx::query_as(
            "SELECT time_bucket, budget_bucket, timeline_bucket, updated_at, completed \
             FROM user_assessments WHERE user_id = $1",
        )
        .bind(user)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| Assessment {
            time: r.time_bucket,
            budget: r.budget_bucket,
            timeline: r.timeline_bucket,
            updated_at: r.updated_at,
            completed: r.completed,
        }))
    }

    async fn append_result(
        &self,
        user_id: Option<&str>,
        result: &CareerResult,
    ) -> Result<(), AppError> {
        let user = require_user(user_id)?;

        sqlx::query(
            r#"
            INSERT INTO career_results
                (id, user_id, created_at, story, assessment, recommendation)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(result.id)
        .bind(user)
        .bind(result.timestamp)
        .bind(Json(&result.story))
        .bind(Json(&result.assessment))
        .bind(Json(&result.recommendation))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_results(&self, user_id: Option<&str>) -> Result<Vec<CareerResult>, AppError> {
        let user = require_user(user_id)?;

        let rows: Vec<ResultRow> = sqlx::query_as(
            "SELECT id, user_id, created_at, story, assessment, recommendation \
             FROM career_results WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CareerResult::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_user_rejects_none() {
        assert!(matches!(require_user(None), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_require_user_rejects_blank() {
        assert!(matches!(require_user(Some("  ")), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_require_user_rejects_anonymous_sentinel() {
        assert!(matches!(
            require_user(Some(ANONYMOUS_USER)),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_require_user_accepts_identity() {
        assert_eq!(require_user(Some("user-1")).unwrap(), "user-1");
    }
}
