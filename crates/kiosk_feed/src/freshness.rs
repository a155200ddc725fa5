use chrono::{DateTime, Duration, Utc};
use kiosk_core::CacheEntry;

/// Cache older than this gets a silent background refresh.
pub const STALE_AFTER_MINUTES: i64 = 5;
/// On a new calendar day, cache older than this blocks on an explicit pull.
pub const DAILY_GATE_HOURS: i64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreshnessAction {
    /// Cache is fresh enough to show as-is.
    ServeCacheOnly,
    /// Show the cache, refetch silently behind it.
    ServeCacheAndRefresh,
    /// Nothing worth showing until the user pulls today's stories.
    RequireUserPull,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub action: FreshnessAction,
    pub reason: &'static str,
}

impl Classification {
    fn new(action: FreshnessAction, reason: &'static str) -> Self {
        Self { action, reason }
    }
}

/// Decide what to do with the cache at mount time. Pure: no clock or store
/// access, everything comes in through the arguments.
///
/// The new-day gate is calendar-day granularity, not a rolling 24 hours: a
/// visit at 23:50 and another at 00:10 are different days.
pub fn classify(entry: Option<&CacheEntry>, now: DateTime<Utc>) -> Classification {
    let Some(entry) = entry else {
        return Classification::new(FreshnessAction::RequireUserPull, "no cached articles");
    };

    let age = entry.age(now);
    let new_calendar_day = entry.last_daily_pull_date != Some(now.date_naive());

    if new_calendar_day && age > Duration::hours(DAILY_GATE_HOURS) {
        return Classification::new(FreshnessAction::RequireUserPull, "first pull of the day");
    }
    if age > Duration::minutes(STALE_AFTER_MINUTES) {
        return Classification::new(
            FreshnessAction::ServeCacheAndRefresh,
            "cache stale, refreshing behind it",
        );
    }
    Classification::new(FreshnessAction::ServeCacheOnly, "cache fresh")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
    }

    fn entry(age: Duration, pulled_today: bool) -> CacheEntry {
        let now = now();
        CacheEntry {
            articles: vec![],
            fetched_at: now - age,
            last_daily_pull_date: if pulled_today {
                Some(now.date_naive())
            } else {
                Some(now.date_naive().pred_opt().unwrap())
            },
        }
    }

    #[test]
    fn test_empty_cache_requires_pull() {
        let c = classify(None, now());
        assert_eq!(c.action, FreshnessAction::RequireUserPull);
    }

    #[test]
    fn test_fresh_cache_served_as_is() {
        let entry = entry(Duration::minutes(4), true);
        let c = classify(Some(&entry), now());
        assert_eq!(c.action, FreshnessAction::ServeCacheOnly);
    }

    #[test]
    fn test_stale_cache_refreshes_in_background() {
        let entry = entry(Duration::minutes(10), true);
        let c = classify(Some(&entry), now());
        assert_eq!(c.action, FreshnessAction::ServeCacheAndRefresh);
    }

    #[test]
    fn test_new_day_old_cache_requires_pull() {
        let entry = entry(Duration::hours(7), false);
        let c = classify(Some(&entry), now());
        assert_eq!(c.action, FreshnessAction::RequireUserPull);
    }

    #[test]
    fn test_new_day_recent_cache_falls_through() {
        // New calendar day but the cache is only an hour old: the daily gate
        // does not apply, the age rules do.
        let entry = entry(Duration::hours(1), false);
        let c = classify(Some(&entry), now());
        assert_eq!(c.action, FreshnessAction::ServeCacheAndRefresh);
    }

    #[test]
    fn test_never_pulled_counts_as_new_day() {
        let mut entry = entry(Duration::hours(7), false);
        entry.last_daily_pull_date = None;
        let c = classify(Some(&entry), now());
        assert_eq!(c.action, FreshnessAction::RequireUserPull);
    }

    #[test]
    fn test_same_day_old_cache_only_refreshes() {
        // Pulled today, then left open for hours: stale but no gate.
        let entry = entry(Duration::hours(7), true);
        let c = classify(Some(&entry), now());
        assert_eq!(c.action, FreshnessAction::ServeCacheAndRefresh);
    }
}
