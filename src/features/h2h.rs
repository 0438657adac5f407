//! Head-to-head record between the two specific sides of an upcoming
//! fixture.
//!
//! Meetings are taken from the trailing two years strictly before the as-of
//! time, capped at the ten most recent, and reoriented so that "home" always
//! means the side that is at home in the *upcoming* fixture, regardless of
//! who hosted the historical meeting.

use chrono::{DateTime, Duration, Utc};

use crate::db::models::MatchRecord;

/// Lookback window in days (two years).
pub const H2H_WINDOW_DAYS: i64 = 2 * 365;
/// Maximum number of meetings considered.
pub const H2H_MAX_MEETINGS: i64 = 10;

/// Earliest kickoff still inside the head-to-head window.
pub fn window_start(as_of: DateTime<Utc>) -> DateTime<Utc> {
    as_of - Duration::days(H2H_WINDOW_DAYS)
}

/// Head-to-head summary, oriented to the upcoming fixture's roles. The
/// per-outcome fields are absent (not zero) when there are no meetings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeadToHead {
    pub total: i64,
    pub home_wins: Option<i64>,
    pub away_wins: Option<i64>,
    pub draws: Option<i64>,
    pub home_goals_avg: Option<f64>,
    pub away_goals_avg: Option<f64>,
    /// Home wins / total, 0.0–1.0.
    pub home_win_pct: Option<f64>,
}

/// Summarise prior meetings. `upcoming_home_id` is the side at home in the
/// fixture being built; goals and outcomes from meetings it played away are
/// flipped accordingly.
pub fn summarize(meetings: &[MatchRecord], upcoming_home_id: i64) -> HeadToHead {
    if meetings.is_empty() {
        return HeadToHead::default();
    }
    let mut home_wins = 0i64;
    let mut away_wins = 0i64;
    let mut draws = 0i64;
    let mut home_goals = 0i64;
    let mut away_goals = 0i64;
    for m in meetings {
        let gf = m.goals_for(upcoming_home_id);
        let ga = m.goals_against(upcoming_home_id);
        home_goals += gf;
        away_goals += ga;
        if gf > ga {
            home_wins += 1;
        } else if gf < ga {
            away_wins += 1;
        } else {
            draws += 1;
        }
    }
    let total = meetings.len() as i64;
    let n = total as f64;
    HeadToHead {
        total,
        home_wins: Some(home_wins),
        away_wins: Some(away_wins),
        draws: Some(draws),
        home_goals_avg: Some(home_goals as f64 / n),
        away_goals_avg: Some(away_goals as f64 / n),
        home_win_pct: Some(home_wins as f64 / n),
    }
}
