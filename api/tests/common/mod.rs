//! Shared fixtures for the endpoint tests: an in-memory store standing in
//! for Postgres, and helpers to build the router and POST JSON at it.

use std::sync::{Arc, Mutex};

use api::config::{DatabaseConfig, PortalConfig, WindowConfig};
use api::gateway::{PortalStore, StoreError};
use api::routes;
use api::state::AppState;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use prometheus::Registry;
use shared::{NewScore, NewSubmission, ScoreRecord, SubmissionRecord};
use tower::ServiceExt;
use uuid::Uuid;

/// In-memory stand-in for the Postgres store. `fail_inserts` simulates a
/// datastore outage with a fixed error message.
#[derive(Default)]
pub struct MemoryStore {
    pub submissions: Mutex<Vec<SubmissionRecord>>,
    pub scores: Mutex<Vec<ScoreRecord>>,
    pub fail_inserts: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            fail_inserts: true,
            ..Self::default()
        }
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    pub fn score_count(&self) -> usize {
        self.scores.lock().unwrap().len()
    }
}

pub const OUTAGE_MESSAGE: &str = "connection refused";

#[async_trait]
impl PortalStore for MemoryStore {
    async fn insert_submission(
        &self,
        submission: NewSubmission,
    ) -> Result<SubmissionRecord, StoreError> {
        if self.fail_inserts {
            return Err(StoreError(OUTAGE_MESSAGE.to_string()));
        }
        let record = SubmissionRecord {
            id: Uuid::new_v4(),
            team_name: submission.team_name,
            team_leader_name: submission.team_leader_name,
            project_url: submission.project_url,
            github_url: submission.github_url,
            gist: submission.gist,
            ip_address: submission.ip_address,
            user_agent: submission.user_agent,
            submitted_at: Utc::now(),
        };
        self.submissions.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn insert_score(&self, score: NewScore) -> Result<ScoreRecord, StoreError> {
        if self.fail_inserts {
            return Err(StoreError(OUTAGE_MESSAGE.to_string()));
        }
        let record = ScoreRecord {
            id: Uuid::new_v4(),
            team_id: score.team_id,
            team_name: score.team_name,
            team_leader_name: score.team_leader_name,
            relevance: score.relevance,
            clarity: score.clarity,
            feasibility: score.feasibility,
            innovation: score.innovation,
            impact: score.impact,
            total_marks: score.total_marks,
            ip_address: score.ip_address,
            user_agent: score.user_agent,
            judged_at: Utc::now(),
        };
        self.scores.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn ping(&self) -> bool {
        !self.fail_inserts
    }
}

/// Window spanning essentially the whole year, so submission tests run
/// inside it regardless of the date. (The only uncovered hour is the last
/// one of December 31.)
pub fn open_window() -> WindowConfig {
    WindowConfig::new(1, 1, 0, 12, 31, 23).unwrap()
}

/// A four-hour window in whichever half of the year we are not in, so the
/// gate is deterministically closed at test time.
pub fn closed_window() -> WindowConfig {
    use chrono::Datelike;
    if Utc::now().month() <= 6 {
        WindowConfig::new(10, 1, 0, 10, 1, 4).unwrap()
    } else {
        WindowConfig::new(2, 1, 0, 2, 1, 4).unwrap()
    }
}

pub fn test_app(store: Arc<MemoryStore>, window: WindowConfig) -> Router {
    let config = PortalConfig {
        database: DatabaseConfig {
            connection_string: "postgres://unused".to_string(),
            max_connections: 1,
        },
        bind_port: 0,
        window,
    };
    routes::app(AppState::new(store, config, Registry::new()))
}

pub async fn post_json(
    app: Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    post_json_with_headers(app, path, &[], body).await
}

pub async fn post_json_with_headers(
    app: Router,
    path: &str,
    extra_headers: &[(&str, &str)],
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let mut request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    for (name, value) in extra_headers {
        request = request.header(*name, *value);
    }
    let request = request.body(Body::from(body.to_string())).unwrap();

    send(app, request).await
}

pub async fn get(app: Router, path: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

pub async fn post_raw(app: Router, path: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}
