use chrono::{DateTime, Duration, Utc};

/// Data older than this is flagged as stale on screen.
pub const STALE_AFTER_MINUTES: i64 = 30;
pub const OFFLINE_AFTER_FAILURES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreshnessState {
    Fresh,
    Stale,
    Offline,
}

#[must_use]
pub fn evaluate_freshness(
    last_success: Option<DateTime<Utc>>,
    consecutive_failures: u32,
    now: DateTime<Utc>,
) -> FreshnessState {
    let Some(last_success) = last_success else {
        return if consecutive_failures >= 1 {
            FreshnessState::Offline
        } else {
            FreshnessState::Stale
        };
    };

    if consecutive_failures >= OFFLINE_AFTER_FAILURES {
        FreshnessState::Offline
    } else if now - last_success > Duration::minutes(STALE_AFTER_MINUTES)
        || consecutive_failures >= 1
    {
        FreshnessState::Stale
    } else {
        FreshnessState::Fresh
    }
}
