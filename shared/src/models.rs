use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ═══════════════════════════════════════════════════════════════════════════
// PERSISTED RECORDS
// ═══════════════════════════════════════════════════════════════════════════

/// One team's accepted finals artifact submission.
///
/// Written exactly once per accepted POST; the portal never updates or
/// deletes these rows.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SubmissionRecord {
    pub id: Uuid,
    pub team_name: String,
    pub team_leader_name: String,
    pub project_url: String,
    pub github_url: String,
    pub gist: String,
    pub ip_address: String,
    pub user_agent: String,
    pub submitted_at: DateTime<Utc>,
}

/// One judge's score sheet for one team.
///
/// `total_marks` is the caller-supplied total, stored only after it has been
/// verified against the sum of the five category scores.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScoreRecord {
    pub id: Uuid,
    pub team_id: String,
    pub team_name: String,
    pub team_leader_name: String,
    pub relevance: f64,
    pub clarity: f64,
    pub feasibility: f64,
    pub innovation: f64,
    pub impact: f64,
    pub total_marks: f64,
    pub ip_address: String,
    pub user_agent: String,
    pub judged_at: DateTime<Utc>,
}

// ═══════════════════════════════════════════════════════════════════════════
// INSERT PAYLOADS
// ═══════════════════════════════════════════════════════════════════════════

/// Validated submission values plus captured request metadata, ready for a
/// single-row insert. Timestamps are assigned by the datastore.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub team_name: String,
    pub team_leader_name: String,
    pub project_url: String,
    pub github_url: String,
    pub gist: String,
    pub ip_address: String,
    pub user_agent: String,
}

/// Verified score values plus captured request metadata.
#[derive(Debug, Clone)]
pub struct NewScore {
    pub team_id: String,
    pub team_name: String,
    pub team_leader_name: String,
    pub relevance: f64,
    pub clarity: f64,
    pub feasibility: f64,
    pub innovation: f64,
    pub impact: f64,
    pub total_marks: f64,
    pub ip_address: String,
    pub user_agent: String,
}

// ═══════════════════════════════════════════════════════════════════════════
// REQUEST BODIES
// ═══════════════════════════════════════════════════════════════════════════

/// Inbound body for both submission endpoints.
///
/// Every field is optional so that an absent key flows into the aggregate
/// missing-fields check instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitProjectRequest {
    pub team_name: Option<String>,
    pub team_leader_name: Option<String>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub gist: Option<String>,
}

/// Inbound body for the scoring endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitScoreRequest {
    pub team_id: Option<String>,
    pub team_name: Option<String>,
    pub team_leader_name: Option<String>,
    pub scores: Option<CategoryScores>,
    pub total_marks: Option<f64>,
}

/// The five judge ratings for one team, as supplied by the client.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryScores {
    pub relevance: Option<f64>,
    pub clarity: Option<f64>,
    pub feasibility: Option<f64>,
    pub innovation: Option<f64>,
    pub impact: Option<f64>,
}
