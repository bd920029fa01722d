//! Input validation for the portal API.
//!
//! Pure helpers only: every function here is a function of its arguments
//! with no side effects. Handlers call them in pipeline order and
//! short-circuit on the first failure, so a request never reaches the
//! datastore with an invalid field.

pub mod requests;
pub mod sanitizers;
pub mod validators;

// Re-export commonly used items
pub use requests::{require_score_fields, require_submission_fields, ScoreFields, SubmissionFields};
pub use sanitizers::trim;
pub use validators::{required, validate_gist_length, MissingFields, GIST_MAX_CHARS, GIST_MIN_CHARS};
