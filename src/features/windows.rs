//! Windowed aggregates over a side's recent completed matches: form
//! (points per match), scoring, venue-split record, and match-statistic
//! averages.
//!
//! All functions are pure over slices the caller has already bounded by the
//! as-of cutoff; none of them zero-fill. An empty window yields `None`.

use crate::db::models::{MatchRecord, TeamStatLine};

/// Mean of the present values; `None` when nothing is present. Missing
/// entries are excluded from the average, never treated as zero.
pub fn avg(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values.into_iter().flatten() {
        if v.is_finite() {
            sum += v;
            count += 1;
        }
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Home-minus-away differential; absent when either side is absent.
pub fn diff(home: Option<f64>, away: Option<f64>) -> Option<f64> {
    match (home, away) {
        (Some(h), Some(a)) => Some(h - a),
        _ => None,
    }
}

/// Points per match (win 3, draw 1, loss 0) over the given results.
pub fn points_per_match(results: &[MatchRecord], team_id: i64) -> Option<f64> {
    if results.is_empty() {
        return None;
    }
    let points: i64 = results.iter().map(|m| m.points_for(team_id)).sum();
    Some(points as f64 / results.len() as f64)
}

/// Mean goals scored and conceded over the given results.
pub fn goal_averages(results: &[MatchRecord], team_id: i64) -> (Option<f64>, Option<f64>) {
    if results.is_empty() {
        return (None, None);
    }
    let n = results.len() as f64;
    let gf: i64 = results.iter().map(|m| m.goals_for(team_id)).sum();
    let ga: i64 = results.iter().map(|m| m.goals_against(team_id)).sum();
    (Some(gf as f64 / n), Some(ga as f64 / n))
}

/// A side's record restricted to one venue (home-only or away-only
/// matches), with the xg average taken over whichever of those matches have
/// a stat line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VenueRecord {
    pub goals_for_avg: Option<f64>,
    pub goals_against_avg: Option<f64>,
    pub xg_avg: Option<f64>,
    /// Wins / matches, 0.0–1.0.
    pub win_pct: Option<f64>,
}

/// Summarise venue-restricted results. `stat_lines` pairs each result with
/// the side's stat line for that match, when observed.
pub fn venue_record(
    results: &[(MatchRecord, Option<TeamStatLine>)],
    team_id: i64,
) -> VenueRecord {
    if results.is_empty() {
        return VenueRecord::default();
    }
    let n = results.len() as f64;
    let mut gf = 0i64;
    let mut ga = 0i64;
    let mut wins = 0i64;
    let mut xg = Vec::new();
    for (m, stat) in results {
        gf += m.goals_for(team_id);
        ga += m.goals_against(team_id);
        if m.goals_for(team_id) > m.goals_against(team_id) {
            wins += 1;
        }
        if let Some(stat) = stat {
            xg.push(stat.xg);
        }
    }
    VenueRecord {
        goals_for_avg: Some(gf as f64 / n),
        goals_against_avg: Some(ga as f64 / n),
        xg_avg: avg(xg),
        win_pct: Some(wins as f64 / n),
    }
}

/// Per-statistic means over the matches in the window that actually have a
/// stat line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatAverages {
    pub shots: Option<f64>,
    pub shots_on_target: Option<f64>,
    pub possession_pct: Option<f64>,
    pub passes: Option<f64>,
    pub pass_accuracy_pct: Option<f64>,
    pub fouls: Option<f64>,
    pub corners: Option<f64>,
    pub yellow_cards: Option<f64>,
    pub red_cards: Option<f64>,
    pub xg: Option<f64>,
}

pub fn stat_averages(lines: &[TeamStatLine]) -> StatAverages {
    StatAverages {
        shots: avg(lines.iter().map(|l| l.shots)),
        shots_on_target: avg(lines.iter().map(|l| l.shots_on_target)),
        possession_pct: avg(lines.iter().map(|l| l.possession_pct)),
        passes: avg(lines.iter().map(|l| l.passes)),
        pass_accuracy_pct: avg(lines.iter().map(|l| l.pass_accuracy_pct)),
        fouls: avg(lines.iter().map(|l| l.fouls)),
        corners: avg(lines.iter().map(|l| l.corners)),
        yellow_cards: avg(lines.iter().map(|l| l.yellow_cards)),
        red_cards: avg(lines.iter().map(|l| l.red_cards)),
        xg: avg(lines.iter().map(|l| l.xg)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};

    fn record(id: i64, home: i64, away: i64, hg: i64, ag: i64) -> MatchRecord {
        MatchRecord {
            id,
            league_id: 1,
            season: 2024,
            kickoff_at: Utc.with_ymd_and_hms(2025, 1, 1, 15, 0, 0).unwrap(),
            home_team_id: home,
            away_team_id: away,
            home_goals: Some(hg),
            away_goals: Some(ag),
            status: "FT".into(),
        }
    }

    fn stat_line(xg: Option<f64>, shots: Option<f64>) -> TeamStatLine {
        TeamStatLine {
            fixture_id: 1,
            team_id: 100,
            shots,
            shots_on_target: None,
            possession_pct: None,
            passes: None,
            pass_accuracy_pct: None,
            fouls: None,
            corners: None,
            yellow_cards: None,
            red_cards: None,
            xg,
        }
    }

    #[test]
    fn points_per_match_basic() {
        // Win at home, draw away, loss away: (3 + 1 + 0) / 3
        let results = vec![
            record(1, 100, 200, 2, 0),
            record(2, 200, 100, 1, 1),
            record(3, 300, 100, 2, 1),
        ];
        let ppm = points_per_match(&results, 100).unwrap();
        assert_relative_eq!(ppm, 4.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn empty_window_yields_none() {
        assert_eq!(points_per_match(&[], 100), None);
        assert_eq!(goal_averages(&[], 100), (None, None));
        assert_eq!(venue_record(&[], 100), VenueRecord::default());
        assert_eq!(avg(std::iter::empty()), None);
    }

    #[test]
    fn goal_averages_orient_by_side() {
        let results = vec![record(1, 100, 200, 3, 1), record(2, 200, 100, 2, 2)];
        let (gf, ga) = goal_averages(&results, 100);
        assert_relative_eq!(gf.unwrap(), 2.5, epsilon = 1e-9); // (3 + 2) / 2
        assert_relative_eq!(ga.unwrap(), 1.5, epsilon = 1e-9); // (1 + 2) / 2
    }

    #[test]
    fn venue_record_counts_wins_and_skips_missing_xg() {
        let results = vec![
            (record(1, 100, 200, 2, 0), Some(stat_line(Some(1.8), None))),
            (record(2, 100, 300, 1, 1), None),
            (record(3, 100, 400, 0, 2), Some(stat_line(Some(0.6), None))),
        ];
        let rec = venue_record(&results, 100);
        assert_relative_eq!(rec.win_pct.unwrap(), 1.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(rec.goals_for_avg.unwrap(), 1.0, epsilon = 1e-9);
        // xg averaged over the two matches that have a stat line only
        assert_relative_eq!(rec.xg_avg.unwrap(), 1.2, epsilon = 1e-9);
    }

    #[test]
    fn stat_averages_exclude_missing_fields() {
        let lines = vec![
            stat_line(Some(1.0), Some(10.0)),
            stat_line(None, Some(14.0)),
        ];
        let s = stat_averages(&lines);
        assert_relative_eq!(s.shots.unwrap(), 12.0, epsilon = 1e-9);
        // xg present in one line only: mean of that one value, not halved
        assert_relative_eq!(s.xg.unwrap(), 1.0, epsilon = 1e-9);
        assert_eq!(s.possession_pct, None);
    }

    #[test]
    fn diff_requires_both_sides() {
        assert_eq!(diff(Some(1.5), Some(1.0)), Some(0.5));
        assert_eq!(diff(Some(1.5), None), None);
        assert_eq!(diff(None, Some(1.0)), None);
    }
}
