//! Append-only access to the portal datastore.
//!
//! Each accepted request performs exactly one single-row insert; there are
//! no retries and no transactional coordination between submissions and
//! scores. Handlers depend on the trait so the integration tests can run
//! against an in-memory store.

use async_trait::async_trait;
use shared::{NewScore, NewSubmission, ScoreRecord, SubmissionRecord};
use sqlx::PgPool;
use thiserror::Error;

/// Datastore failure. The message is surfaced verbatim in 500 responses,
/// matching the portal's error contract.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError(err.to_string())
    }
}

#[async_trait]
pub trait PortalStore: Send + Sync {
    async fn insert_submission(
        &self,
        submission: NewSubmission,
    ) -> Result<SubmissionRecord, StoreError>;

    async fn insert_score(&self, score: NewScore) -> Result<ScoreRecord, StoreError>;

    /// Liveness probe for the health endpoint.
    async fn ping(&self) -> bool;
}

/// Postgres-backed store used by the running service.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PortalStore for PgStore {
    async fn insert_submission(
        &self,
        submission: NewSubmission,
    ) -> Result<SubmissionRecord, StoreError> {
        let record: SubmissionRecord = sqlx::query_as(
            "INSERT INTO submissions
                 (team_name, team_leader_name, project_url, github_url, gist, ip_address, user_agent)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(&submission.team_name)
        .bind(&submission.team_leader_name)
        .bind(&submission.project_url)
        .bind(&submission.github_url)
        .bind(&submission.gist)
        .bind(&submission.ip_address)
        .bind(&submission.user_agent)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn insert_score(&self, score: NewScore) -> Result<ScoreRecord, StoreError> {
        let record: ScoreRecord = sqlx::query_as(
            "INSERT INTO scores
                 (team_id, team_name, team_leader_name,
                  relevance, clarity, feasibility, innovation, impact,
                  total_marks, ip_address, user_agent)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *",
        )
        .bind(&score.team_id)
        .bind(&score.team_name)
        .bind(&score.team_leader_name)
        .bind(score.relevance)
        .bind(score.clarity)
        .bind(score.feasibility)
        .bind(score.innovation)
        .bind(score.impact)
        .bind(score.total_marks)
        .bind(&score.ip_address)
        .bind(&score.user_agent)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn ping(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }
}
