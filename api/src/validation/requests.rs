//! Required-field resolution for the inbound request bodies.
//!
//! The portal reports one aggregate missing-fields failure per request, so
//! these helpers resolve a whole body into its trimmed fields or fail on
//! the first absent one.

use shared::{SubmitProjectRequest, SubmitScoreRequest};

use super::validators::{required, required_number, MissingFields};

/// Trimmed, present fields of a submission body.
#[derive(Debug, Clone)]
pub struct SubmissionFields {
    pub team_name: String,
    pub team_leader_name: String,
    pub project_url: String,
    pub github_url: String,
    pub gist: String,
}

pub fn require_submission_fields(
    req: SubmitProjectRequest,
) -> Result<SubmissionFields, MissingFields> {
    Ok(SubmissionFields {
        team_name: required(req.team_name)?,
        team_leader_name: required(req.team_leader_name)?,
        project_url: required(req.project_url)?,
        github_url: required(req.github_url)?,
        gist: required(req.gist)?,
    })
}

/// Present fields of a score body.
///
/// Category values are kept exactly as supplied; nothing is rounded or
/// recomputed here.
#[derive(Debug, Clone)]
pub struct ScoreFields {
    pub team_id: String,
    pub team_name: String,
    pub team_leader_name: String,
    pub relevance: f64,
    pub clarity: f64,
    pub feasibility: f64,
    pub innovation: f64,
    pub impact: f64,
    pub total_marks: f64,
}

impl ScoreFields {
    /// The five category ratings in their canonical order.
    pub fn categories(&self) -> [f64; 5] {
        [
            self.relevance,
            self.clarity,
            self.feasibility,
            self.innovation,
            self.impact,
        ]
    }
}

pub fn require_score_fields(req: SubmitScoreRequest) -> Result<ScoreFields, MissingFields> {
    let scores = req.scores.ok_or(MissingFields)?;
    Ok(ScoreFields {
        team_id: required(req.team_id)?,
        team_name: required(req.team_name)?,
        team_leader_name: required(req.team_leader_name)?,
        relevance: required_number(scores.relevance)?,
        clarity: required_number(scores.clarity)?,
        feasibility: required_number(scores.feasibility)?,
        innovation: required_number(scores.innovation)?,
        impact: required_number(scores.impact)?,
        total_marks: required_number(req.total_marks)?,
    })
}
