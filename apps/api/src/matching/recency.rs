use chrono::{DateTime, Utc};

/// The shared freshness window, in days. Jobs older than this earn no
/// recency bonus, and the listings feed rejects them at ingestion — the two
/// must stay numerically consistent.
pub const FRESHNESS_WINDOW_DAYS: i64 = 5;

/// Linear recency decay: 1.0 for a job posted right now, 0.0 at 5 days and
/// beyond, 0.0 when the posting date is unknown. Age is measured in whole
/// days (floor), so anything posted within the last 24 hours scores 1.0.
pub fn recency_bonus(posted_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(posted) = posted_at else {
        return 0.0;
    };

    let days_old = (now - posted).num_days().max(0);
    if days_old >= FRESHNESS_WINDOW_DAYS {
        return 0.0;
    }

    1.0 - days_old as f64 / FRESHNESS_WINDOW_DAYS as f64
}
