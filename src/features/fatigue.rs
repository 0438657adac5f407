//! Fatigue and schedule-congestion features: rest days since the previous
//! completed match and match counts over trailing windows.

use chrono::{DateTime, Duration, Utc};

use crate::db::models::MatchRecord;

/// Trailing window for the congestion count.
pub const CONGESTION_WINDOW_DAYS: i64 = 14;
/// Trailing window for the continental-competition count.
pub const CONTINENTAL_WINDOW_DAYS: i64 = 7;

/// Whole days between the side's previous completed match and the as-of
/// time. Absent for a side's first tracked match, never zero-filled.
pub fn days_rest(previous: Option<&MatchRecord>, as_of: DateTime<Utc>) -> Option<i64> {
    previous.map(|m| (as_of - m.kickoff_at).num_days())
}

/// Start of a trailing window of `days` ending at `as_of`.
pub fn window_start(as_of: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    as_of - Duration::days(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record_at(kickoff: DateTime<Utc>) -> MatchRecord {
        MatchRecord {
            id: 1,
            league_id: 1,
            season: 2024,
            kickoff_at: kickoff,
            home_team_id: 100,
            away_team_id: 200,
            home_goals: Some(1),
            away_goals: Some(0),
            status: "FT".into(),
        }
    }

    #[test]
    fn days_rest_floors_partial_days() {
        let as_of = Utc.with_ymd_and_hms(2025, 3, 10, 15, 0, 0).unwrap();
        let last = record_at(Utc.with_ymd_and_hms(2025, 3, 4, 20, 0, 0).unwrap());
        // 5 days 19 hours → 5
        assert_eq!(days_rest(Some(&last), as_of), Some(5));
    }

    #[test]
    fn first_tracked_match_has_no_rest_days() {
        let as_of = Utc.with_ymd_and_hms(2025, 3, 10, 15, 0, 0).unwrap();
        assert_eq!(days_rest(None, as_of), None);
    }

    #[test]
    fn window_start_subtracts_days() {
        let as_of = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();
        let start = window_start(as_of, CONGESTION_WINDOW_DAYS);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap());
    }
}
