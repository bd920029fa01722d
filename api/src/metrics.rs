use once_cell::sync::Lazy;
use prometheus::{opts, Encoder, IntCounter, IntCounterVec, Registry, TextEncoder};

macro_rules! counter {
    ($name:expr, $help:expr) => {
        Lazy::new(|| IntCounter::new($name, $help).unwrap())
    };
}
macro_rules! counter_vec {
    ($name:expr, $help:expr, $labels:expr) => {
        Lazy::new(|| IntCounterVec::new(opts!($name, $help), $labels).unwrap())
    };
}

// ── HTTP ────────────────────────────────────────────────────────────────────
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> =
    counter_vec!("http_requests_total", "Total HTTP requests", &["method", "path", "status"]);

// ── Submissions ─────────────────────────────────────────────────────────────
pub static SUBMISSIONS_ACCEPTED: Lazy<IntCounterVec> = counter_vec!(
    "submissions_accepted_total",
    "Accepted project submissions",
    &["pipeline"]
);
pub static SUBMISSIONS_REJECTED: Lazy<IntCounterVec> = counter_vec!(
    "submissions_rejected_total",
    "Rejected project submissions",
    &["pipeline", "reason"]
);

// ── Scores ──────────────────────────────────────────────────────────────────
pub static SCORES_ACCEPTED: Lazy<IntCounter> =
    counter!("scores_accepted_total", "Accepted judge score sheets");
pub static SCORES_REJECTED: Lazy<IntCounterVec> = counter_vec!(
    "scores_rejected_total",
    "Rejected judge score sheets",
    &["reason"]
);

pub fn register_all(registry: &Registry) -> prometheus::Result<()> {
    registry.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    registry.register(Box::new(SUBMISSIONS_ACCEPTED.clone()))?;
    registry.register(Box::new(SUBMISSIONS_REJECTED.clone()))?;
    registry.register(Box::new(SCORES_ACCEPTED.clone()))?;
    registry.register(Box::new(SCORES_REJECTED.clone()))?;
    Ok(())
}

pub fn gather_metrics(registry: &Registry) -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    if encoder.encode(&registry.gather(), &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
