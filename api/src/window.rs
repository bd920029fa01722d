//! Submission window gate.
//!
//! The portal only admits project submissions during one fixed interval per
//! calendar year. The interval is recomputed from the clock on every call,
//! so the gate tracks the current year without any cached state.

use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::config::WindowConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowStatus {
    Open,
    Closed,
}

/// Window bounds `[start, end)` for the year `now` falls in.
///
/// Returns `None` when the configured month/day does not form a valid date
/// in that year (a February 29 window off leap years); the gate treats that
/// as closed.
pub fn compute_window(
    now: DateTime<Utc>,
    config: &WindowConfig,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let year = now.year();
    let start = Utc
        .with_ymd_and_hms(year, config.open_month, config.open_day, config.open_hour, 0, 0)
        .single()?;
    let end = Utc
        .with_ymd_and_hms(
            year,
            config.close_month,
            config.close_day,
            config.close_hour,
            0,
            0,
        )
        .single()?;
    Some((start, end))
}

/// Gate decision for a request arriving at `now`.
///
/// Open iff `start <= now < end` for the current year's window. A request
/// after `end` stays rejected for the remainder of that year; no next-year
/// window is computed.
pub fn status(now: DateTime<Utc>, config: &WindowConfig) -> WindowStatus {
    match compute_window(now, config) {
        Some((start, end)) if start <= now && now < end => WindowStatus::Open,
        _ => WindowStatus::Closed,
    }
}
