//! Best-effort request audit metadata.
//!
//! Client IP and user agent are captured for every persisted record. They
//! are never validated and never fail a request; an absent header resolves
//! to the `unknown` sentinel.

use axum::http::{header, HeaderMap};

use crate::validation::trim;

/// Sentinel stored when a header is absent or unreadable.
pub const UNKNOWN: &str = "unknown";

/// Forwarding headers consulted for the client IP, most specific first.
const FORWARDING_HEADERS: [&str; 2] = ["x-forwarded-for", "x-real-ip"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMeta {
    pub ip_address: String,
    pub user_agent: String,
}

/// Extract client IP and user agent from the request headers.
pub fn collect(headers: &HeaderMap) -> RequestMeta {
    let ip_address = FORWARDING_HEADERS
        .iter()
        .find_map(|name| header_value(headers, name))
        .unwrap_or_else(|| UNKNOWN.to_string());

    let user_agent = header_value(headers, header::USER_AGENT.as_str())
        .unwrap_or_else(|| UNKNOWN.to_string());

    RequestMeta {
        ip_address,
        user_agent,
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(trim)
        .filter(|value| !value.is_empty())
}
