//! Deterministic fallback estimator: a fixed outcome prior nudged by
//! whichever feature families the snapshot actually carries.
//!
//! Absent features contribute nothing. A snapshot with no usable signal at
//! all returns the prior untouched.

use crate::db::models::FeatureSet;

/// Prior and adjustment weights, all on the probability (0..1) scale. All
/// tunable from the CLI; the defaults are the calibrated production values.
#[derive(Debug, Clone)]
pub struct HeuristicParams {
    pub prior_home: f64,
    pub prior_draw: f64,
    pub prior_away: f64,
    /// Points-per-match form differential weight.
    pub form_weight: f64,
    /// Venue win-rate deviation weight (both sides).
    pub venue_weight: f64,
    /// Expected-goals differential weights, asymmetric by side.
    pub xg_home_weight: f64,
    pub xg_away_weight: f64,
    /// Standings rank differential weight.
    pub rank_weight: f64,
    /// Head-to-head win-rate deviation weight.
    pub h2h_weight: f64,
    /// Minimum meetings before head-to-head counts at all.
    pub h2h_min_meetings: i64,
    /// Baselines the venue and head-to-head win rates are measured against.
    pub home_venue_baseline: f64,
    pub away_venue_baseline: f64,
    pub h2h_baseline: f64,
    /// Post-adjustment clamps.
    pub side_floor: f64,
    pub side_ceiling: f64,
    pub draw_floor: f64,
    pub draw_ceiling: f64,
}

impl Default for HeuristicParams {
    fn default() -> Self {
        HeuristicParams {
            prior_home: 0.35,
            prior_draw: 0.28,
            prior_away: 0.37,
            form_weight: 0.15,
            venue_weight: 0.2,
            xg_home_weight: 0.1,
            xg_away_weight: 0.08,
            rank_weight: 0.02,
            h2h_weight: 0.1,
            h2h_min_meetings: 3,
            home_venue_baseline: 0.45,
            away_venue_baseline: 0.35,
            h2h_baseline: 0.40,
            side_floor: 0.15,
            side_ceiling: 0.75,
            draw_floor: 0.15,
            draw_ceiling: 0.40,
        }
    }
}

/// Percent-scale probability triple produced by the fallback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicEstimate {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

#[derive(Debug, Clone, Default)]
pub struct HeuristicModel {
    params: HeuristicParams,
}

impl HeuristicModel {
    pub fn new(params: HeuristicParams) -> Self {
        HeuristicModel { params }
    }

    /// Estimate outcome probabilities from whatever the snapshot carries.
    ///
    /// All arithmetic happens on the 0..1 scale. Each outcome is clamped
    /// after adjustment, the triple is renormalized, and away is taken as
    /// the remainder so the published percentages sum to exactly 100.
    pub fn estimate(&self, features: &FeatureSet) -> HeuristicEstimate {
        let p = &self.params;
        let mut home = p.prior_home;
        let mut away = p.prior_away;
        let draw = p.prior_draw;

        if let Some(form_diff) = features.form_last5_diff {
            home += form_diff * p.form_weight;
            away -= form_diff * p.form_weight;
        }
        if let Some(rate) = features.home_wins_at_home_pct {
            home += (rate - p.home_venue_baseline) * p.venue_weight;
        }
        if let Some(rate) = features.away_wins_at_away_pct {
            away += (rate - p.away_venue_baseline) * p.venue_weight;
        }
        if let Some(xg_diff) = features.xg_diff {
            home += xg_diff * p.xg_home_weight;
            away -= xg_diff * p.xg_away_weight;
        }
        if features.home_rank.is_some() || features.away_rank.is_some() {
            // A missing side defaults to mid-table.
            let home_rank = features.home_rank.unwrap_or(10) as f64;
            let away_rank = features.away_rank.unwrap_or(10) as f64;
            let rank_diff = away_rank - home_rank;
            home += rank_diff * p.rank_weight;
            away -= rank_diff * p.rank_weight;
        }
        if features.h2h_total >= p.h2h_min_meetings {
            if let Some(rate) = features.h2h_home_win_pct {
                home += (rate - p.h2h_baseline) * p.h2h_weight;
            }
        }

        let home = home.clamp(p.side_floor, p.side_ceiling);
        let away = away.clamp(p.side_floor, p.side_ceiling);
        let draw = draw.clamp(p.draw_floor, p.draw_ceiling);

        // Renormalize to percent, with away as the remainder so the
        // published triple sums exactly.
        let total = home + draw + away;
        let home = home / total * 100.0;
        let draw = draw / total * 100.0;
        let away = 100.0 - home - draw;

        HeuristicEstimate { home, draw, away }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn model() -> HeuristicModel {
        HeuristicModel::default()
    }

    #[test]
    fn empty_snapshot_returns_the_prior() {
        let est = model().estimate(&FeatureSet::default());
        assert_relative_eq!(est.home, 35.0, epsilon = 1e-9);
        assert_relative_eq!(est.draw, 28.0, epsilon = 1e-9);
        assert_relative_eq!(est.away, 37.0, epsilon = 1e-9);
    }

    #[test]
    fn estimates_always_sum_to_exactly_one_hundred() {
        let cases = [
            FeatureSet::default(),
            FeatureSet {
                form_last5_diff: Some(2.5),
                home_wins_at_home_pct: Some(0.9),
                xg_diff: Some(1.4),
                ..Default::default()
            },
            FeatureSet {
                form_last5_diff: Some(-3.0),
                away_wins_at_away_pct: Some(0.8),
                home_rank: Some(18),
                away_rank: Some(1),
                ..Default::default()
            },
        ];
        for features in &cases {
            let est = model().estimate(features);
            assert_relative_eq!(est.home + est.draw + est.away, 100.0, epsilon = 1e-9);
            assert!(est.home > 0.0 && est.draw > 0.0 && est.away > 0.0);
        }
    }

    #[test]
    fn strong_home_signal_is_clamped_before_renormalizing() {
        // Everything pointing home: the ceiling caps home at 0.75 and the
        // floor holds away at 0.15 before renormalizing.
        let features = FeatureSet {
            form_last5_diff: Some(3.0),
            home_wins_at_home_pct: Some(1.0),
            xg_diff: Some(3.0),
            home_rank: Some(1),
            away_rank: Some(20),
            h2h_total: 5,
            h2h_home_win_pct: Some(1.0),
            ..Default::default()
        };
        let est = model().estimate(&features);
        let total = 0.75 + 0.28 + 0.15;
        assert_relative_eq!(est.home, 0.75 / total * 100.0, epsilon = 1e-9);
        assert_relative_eq!(est.draw, 0.28 / total * 100.0, epsilon = 1e-9);
    }

    #[test]
    fn venue_rate_moves_the_right_side() {
        let features = FeatureSet {
            home_wins_at_home_pct: Some(0.65),
            ..Default::default()
        };
        let est = model().estimate(&features);
        // home 0.35 + (0.65-0.45)*0.2 = 0.39; draw and away untouched.
        let total = 0.39 + 0.28 + 0.37;
        assert_relative_eq!(est.home, 0.39 / total * 100.0, epsilon = 1e-9);
    }

    #[test]
    fn form_differential_shifts_both_sides() {
        let features = FeatureSet {
            form_last5_diff: Some(1.0),
            ..Default::default()
        };
        let est = model().estimate(&features);
        // home 0.50, away 0.22, draw 0.28: already sums to 1.0.
        assert_relative_eq!(est.home, 50.0, epsilon = 1e-9);
        assert_relative_eq!(est.away, 22.0, epsilon = 1e-9);
    }

    #[test]
    fn h2h_needs_minimum_meetings() {
        let mut features = FeatureSet {
            h2h_total: 2,
            h2h_home_win_pct: Some(1.0),
            ..Default::default()
        };
        let below = model().estimate(&features);
        assert_relative_eq!(below.home, 35.0, epsilon = 1e-9);

        features.h2h_total = 3;
        let at = model().estimate(&features);
        assert!(at.home > below.home);
    }

    #[test]
    fn missing_rank_defaults_to_mid_table() {
        let features = FeatureSet {
            home_rank: Some(2),
            ..Default::default()
        };
        let est = model().estimate(&features);
        // rank_diff 10-2=8: home 0.35+0.16=0.51, away 0.37-0.16=0.21.
        assert_relative_eq!(est.home, 51.0, epsilon = 1e-9);
        assert_relative_eq!(est.away, 21.0, epsilon = 1e-9);
    }
}
