use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use shared::{NewScore, NewSubmission, SubmitProjectRequest, SubmitScoreRequest};

use crate::{
    error::{ApiError, ApiResult},
    gateway::StoreError,
    metadata, metrics, scoring,
    state::AppState,
    url_policy::{LenientGithubUrls, StrictUrls, UrlPolicy},
    validation::{require_score_fields, require_submission_fields, validate_gist_length},
    window::{self, WindowStatus},
};

const SUBMISSIONS_CLOSED: &str =
    "Submissions are currently closed. Projects are only accepted during the finals window.";
const ALL_FIELDS_REQUIRED: &str = "All fields are required";
const MISSING_REQUIRED_FIELDS: &str = "Missing required fields";
const INVALID_URLS: &str = "Provide valid URLs";
const INTERNAL_ERROR: &str = "Internal server error";

/// An unreadable body is not a validation failure in this contract; it
/// surfaces like any other unhandled error.
fn unreadable_body(err: JsonRejection) -> ApiError {
    tracing::error!(error = %err.body_text(), "failed to read request body");
    ApiError::internal(err.body_text())
}

fn insert_failed(err: StoreError) -> ApiError {
    tracing::error!(error = %err, "datastore insert failed");
    ApiError::internal(err.to_string())
}

/// POST /api/submissions: the finals pipeline.
///
/// Gate -> required fields -> strict URLs -> gist bounds -> metadata ->
/// insert. Stages run in that order and the first failure wins; the gate
/// is consulted before the body is even looked at.
pub async fn create_submission(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SubmitProjectRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    if window::status(Utc::now(), &state.config.window) == WindowStatus::Closed {
        metrics::SUBMISSIONS_REJECTED
            .with_label_values(&["strict", "window_closed"])
            .inc();
        return Err(ApiError::forbidden(SUBMISSIONS_CLOSED));
    }

    let Json(req) = payload.map_err(unreadable_body)?;

    let fields = require_submission_fields(req).map_err(|_| {
        metrics::SUBMISSIONS_REJECTED
            .with_label_values(&["strict", "missing_fields"])
            .inc();
        ApiError::bad_request(ALL_FIELDS_REQUIRED)
    })?;

    let policy = StrictUrls;
    let (project_url, github_url) = match (
        policy.apply(&fields.project_url),
        policy.apply(&fields.github_url),
    ) {
        (Ok(project_url), Ok(github_url)) => (project_url, github_url),
        _ => {
            metrics::SUBMISSIONS_REJECTED
                .with_label_values(&["strict", "invalid_url"])
                .inc();
            return Err(ApiError::bad_request(INVALID_URLS));
        }
    };

    validate_gist_length(&fields.gist).map_err(|message| {
        metrics::SUBMISSIONS_REJECTED
            .with_label_values(&["strict", "gist_length"])
            .inc();
        ApiError::bad_request(message)
    })?;

    let meta = metadata::collect(&headers);

    let record = state
        .store
        .insert_submission(NewSubmission {
            team_name: fields.team_name,
            team_leader_name: fields.team_leader_name,
            project_url,
            github_url,
            gist: fields.gist,
            ip_address: meta.ip_address,
            user_agent: meta.user_agent,
        })
        .await
        .map_err(insert_failed)?;

    metrics::SUBMISSIONS_ACCEPTED
        .with_label_values(&["strict"])
        .inc();
    tracing::info!(submission_id = %record.id, team = %record.team_name, "submission accepted");

    Ok(Json(json!({ "ok": true })))
}

/// POST /api/submissions/open: the walk-up pipeline.
///
/// No time gate and no gist bounds; the repository URL is coerced toward
/// github.com instead of validated, and the project URL passes through
/// untouched.
pub async fn create_submission_lenient(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SubmitProjectRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(req) = payload.map_err(|err| {
        tracing::error!(error = %err.body_text(), "failed to read request body");
        ApiError::internal(INTERNAL_ERROR)
    })?;

    let fields = require_submission_fields(req).map_err(|_| {
        metrics::SUBMISSIONS_REJECTED
            .with_label_values(&["lenient", "missing_fields"])
            .inc();
        ApiError::bad_request(ALL_FIELDS_REQUIRED)
    })?;

    let github_url = LenientGithubUrls
        .apply(&fields.github_url)
        .map_err(|_| ApiError::internal(INTERNAL_ERROR))?;

    let meta = metadata::collect(&headers);

    let record = state
        .store
        .insert_submission(NewSubmission {
            team_name: fields.team_name,
            team_leader_name: fields.team_leader_name,
            project_url: fields.project_url,
            github_url,
            gist: fields.gist,
            ip_address: meta.ip_address,
            user_agent: meta.user_agent,
        })
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "datastore insert failed");
            ApiError::internal(format!("Database error: {}", err))
        })?;

    metrics::SUBMISSIONS_ACCEPTED
        .with_label_values(&["lenient"])
        .inc();
    tracing::info!(submission_id = %record.id, team = %record.team_name, "submission accepted");

    Ok(Json(json!({
        "message": "Project submitted successfully!",
        "submissionId": record.id,
    })))
}

/// POST /api/scores: one judge's score sheet for one team.
///
/// Required fields -> category bounds -> total verification -> metadata ->
/// insert. The caller's total is verified against the exact sum, never
/// recomputed and substituted.
pub async fn create_score(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SubmitScoreRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(req) = payload.map_err(unreadable_body)?;

    let fields = require_score_fields(req).map_err(|_| {
        metrics::SCORES_REJECTED
            .with_label_values(&["missing_fields"])
            .inc();
        ApiError::bad_request(MISSING_REQUIRED_FIELDS)
    })?;

    let categories = fields.categories();
    scoring::validate_category_scores(&categories).map_err(score_rejected)?;
    scoring::verify_total(&categories, fields.total_marks).map_err(score_rejected)?;

    let meta = metadata::collect(&headers);

    let record = state
        .store
        .insert_score(NewScore {
            team_id: fields.team_id,
            team_name: fields.team_name,
            team_leader_name: fields.team_leader_name,
            relevance: fields.relevance,
            clarity: fields.clarity,
            feasibility: fields.feasibility,
            innovation: fields.innovation,
            impact: fields.impact,
            total_marks: fields.total_marks,
            ip_address: meta.ip_address,
            user_agent: meta.user_agent,
        })
        .await
        .map_err(insert_failed)?;

    metrics::SCORES_ACCEPTED.inc();
    tracing::info!(
        score_id = %record.id,
        team_id = %record.team_id,
        total = record.total_marks,
        "score sheet accepted"
    );

    Ok(Json(json!({ "ok": true })))
}

fn score_rejected(err: scoring::ScoreError) -> ApiError {
    metrics::SCORES_REJECTED
        .with_label_values(&[err.reason()])
        .inc();
    ApiError::bad_request(err.to_string())
}

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let uptime = state.started_at.elapsed().as_secs();
    let now = chrono::Utc::now().to_rfc3339();

    if state.store.ping().await {
        tracing::info!(uptime_secs = uptime, "health check passed");
        (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "version": "0.1.0",
                "timestamp": now,
                "uptime_secs": uptime
            })),
        )
    } else {
        tracing::warn!(uptime_secs = uptime, "health check degraded: datastore unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "version": "0.1.0",
                "timestamp": now,
                "uptime_secs": uptime
            })),
        )
    }
}

pub async fn route_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Route not found"})))
}
