//! Decision engine: turns a probability triple plus market prices into an
//! explainable recommendation.
//!
//! Pure and synchronous. Total over any well-formed probability/odds pair:
//! malformed prices degrade per outcome, never into an error.

use serde::Serialize;

use crate::db::models::{FeatureSet, OddsQuote, ProbabilityEstimate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Home,
    Draw,
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationLevel {
    Strong,
    Medium,
    None,
}

/// Direction of the latest price move for one outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OddsTrend {
    Up,
    Down,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawWarningLevel {
    /// Strong draw signal: the pick should not be trusted.
    Severe,
    /// The sides look evenly matched.
    Mild,
    None,
}

/// Draw-risk assessment combining the probability shape with auxiliary
/// feature signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawWarning {
    pub level: DrawWarningLevel,
    /// 0..1 closeness score from the feature signals.
    pub likelihood: f64,
}

/// Per-outcome expected values. `None` means the outcome had no usable
/// price, real or synthetic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpectedValue {
    pub home: Option<f64>,
    pub draw: Option<f64>,
    pub away: Option<f64>,
    /// Outcome with the highest available EV, and that EV.
    pub best: Option<Outcome>,
    pub best_value: Option<f64>,
}

impl ExpectedValue {
    pub fn for_outcome(&self, outcome: Outcome) -> Option<f64> {
        match outcome {
            Outcome::Home => self.home,
            Outcome::Draw => self.draw,
            Outcome::Away => self.away,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OddsTrends {
    pub home: Option<OddsTrend>,
    pub draw: Option<OddsTrend>,
    pub away: Option<OddsTrend>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionResult {
    pub fixture_id: i64,
    pub home_prob: f64,
    pub draw_prob: f64,
    pub away_prob: f64,
    pub expected_value: ExpectedValue,
    pub recommendation_level: RecommendationLevel,
    pub best_pick: Outcome,
    pub is_recommended: bool,
    /// Best-pick probability, percent.
    pub confidence: f64,
    pub draw_warning: DrawWarning,
    pub value_bet: bool,
    /// Set when the EVs were computed from synthesized prices.
    pub is_estimated: bool,
    /// Present only when a market quote was supplied.
    pub odds_trend: Option<OddsTrends>,
}

/// Thresholds and weights of the decision policy. Hand-tuned values kept
/// overridable from the CLI.
#[derive(Debug, Clone)]
pub struct DecisionParams {
    /// Best-pick probability thresholds, percent.
    pub strong_threshold: f64,
    pub medium_threshold: f64,
    /// Minimum EV for the value-bet flag (real odds only).
    pub value_bet_threshold: f64,
    /// Margin applied when synthesizing prices from probabilities.
    pub synthetic_overround: f64,
    /// Probability spread (max minus min, percent) under which the match
    /// counts as clustered.
    pub cluster_spread: f64,
    /// Draw probability (percent) that alone triggers a warning.
    pub draw_prob_threshold: f64,
    /// Likelihood cutoffs for the feature-based closeness score.
    pub draw_severe_likelihood: f64,
    pub draw_mild_likelihood: f64,
}

impl Default for DecisionParams {
    fn default() -> Self {
        DecisionParams {
            strong_threshold: 60.0,
            medium_threshold: 55.0,
            value_bet_threshold: 0.02,
            synthetic_overround: 0.95,
            cluster_spread: 12.0,
            draw_prob_threshold: 33.0,
            draw_severe_likelihood: 0.7,
            draw_mild_likelihood: 0.6,
        }
    }
}

/// Derive the full recommendation for one fixture.
///
/// `odds` and `features` are both optional: without a quote the EVs come
/// from synthesized prices and the EV gate is skipped; without features the
/// draw likelihood falls back to a neutral 0.5.
pub fn decide(
    estimate: &ProbabilityEstimate,
    odds: Option<&OddsQuote>,
    features: Option<&FeatureSet>,
    params: &DecisionParams,
) -> DecisionResult {
    let best_pick = best_pick(estimate);
    let confidence = prob_of(estimate, best_pick);

    let is_estimated = odds.is_none();
    let expected_value = expected_values(estimate, odds, params);

    // The tier gate only consults the market when the best pick has a real,
    // usable price behind it.
    let best_pick_ev = expected_value.for_outcome(best_pick);
    let ev_gate_passes = match (is_estimated, best_pick_ev) {
        (true, _) | (false, None) => true,
        (false, Some(ev)) => ev > 0.0,
    };

    let recommendation_level = if confidence >= params.strong_threshold && ev_gate_passes {
        RecommendationLevel::Strong
    } else if confidence >= params.medium_threshold && ev_gate_passes {
        RecommendationLevel::Medium
    } else {
        RecommendationLevel::None
    };

    let value_bet = !is_estimated
        && matches!(best_pick_ev, Some(ev) if ev > params.value_bet_threshold);

    let draw_warning = draw_warning(estimate, features, params);

    DecisionResult {
        fixture_id: estimate.fixture_id,
        home_prob: estimate.home,
        draw_prob: estimate.draw,
        away_prob: estimate.away,
        expected_value,
        recommendation_level,
        best_pick,
        is_recommended: recommendation_level != RecommendationLevel::None,
        confidence,
        draw_warning,
        value_bet,
        is_estimated,
        odds_trend: odds.map(trends),
    }
}

/// Highest probability wins; ties break home, then away, then draw.
fn best_pick(estimate: &ProbabilityEstimate) -> Outcome {
    if estimate.home >= estimate.draw && estimate.home >= estimate.away {
        Outcome::Home
    } else if estimate.away >= estimate.draw {
        Outcome::Away
    } else {
        Outcome::Draw
    }
}

fn prob_of(estimate: &ProbabilityEstimate, outcome: Outcome) -> f64 {
    match outcome {
        Outcome::Home => estimate.home,
        Outcome::Draw => estimate.draw,
        Outcome::Away => estimate.away,
    }
}

fn expected_values(
    estimate: &ProbabilityEstimate,
    odds: Option<&OddsQuote>,
    params: &DecisionParams,
) -> ExpectedValue {
    let ev = |prob: f64, real: Option<f64>| -> Option<f64> {
        let price = match odds {
            Some(_) => real.filter(|p| p.is_finite() && *p > 0.0)?,
            // Probability zero cannot be inverted into a price.
            None => {
                if prob <= 0.0 {
                    return None;
                }
                (100.0 / prob) * params.synthetic_overround
            }
        };
        Some(prob / 100.0 * price - 1.0)
    };

    let home = ev(estimate.home, odds.map(|o| o.home));
    let draw = ev(estimate.draw, odds.map(|o| o.draw));
    let away = ev(estimate.away, odds.map(|o| o.away));

    let mut best: Option<(Outcome, f64)> = None;
    for (outcome, value) in [
        (Outcome::Home, home),
        (Outcome::Away, away),
        (Outcome::Draw, draw),
    ] {
        if let Some(v) = value {
            if best.map_or(true, |(_, bv)| v > bv) {
                best = Some((outcome, v));
            }
        }
    }

    ExpectedValue {
        home,
        draw,
        away,
        best: best.map(|(o, _)| o),
        best_value: best.map(|(_, v)| v),
    }
}

fn trends(quote: &OddsQuote) -> OddsTrends {
    let trend = |current: f64, prev: Option<f64>| {
        prev.map(|p| {
            if current > p {
                OddsTrend::Up
            } else if current < p {
                OddsTrend::Down
            } else {
                OddsTrend::Unchanged
            }
        })
    };
    OddsTrends {
        home: trend(quote.home, quote.prev_home),
        draw: trend(quote.draw, quote.prev_draw),
        away: trend(quote.away, quote.prev_away),
    }
}

/// Closeness score in 0..1: high when form, attacking output and scoring
/// rates are near-even and past meetings drew often. Absent signals take
/// neutral league-typical defaults.
fn draw_likelihood(features: Option<&FeatureSet>) -> f64 {
    let Some(f) = features else {
        return 0.5;
    };

    let form_gap = (f.home_form_last5.unwrap_or(1.0) - f.away_form_last5.unwrap_or(1.0)).abs();
    let xg_gap = (f.home_xg_avg.unwrap_or(1.2) - f.away_xg_avg.unwrap_or(1.0)).abs();
    let goals_gap =
        (f.home_goals_for_avg.unwrap_or(1.2) - f.away_goals_for_avg.unwrap_or(1.0)).abs();
    let h2h_draw_pct = if f.h2h_total > 0 {
        f.h2h_draws.unwrap_or(0) as f64 / f.h2h_total as f64 * 100.0
    } else {
        20.0
    };

    let likelihood = (1.0 - form_gap.min(2.0) / 2.0) * 0.3
        + (1.0 - xg_gap.min(1.0)) * 0.3
        + (1.0 - goals_gap.min(1.5) / 1.5) * 0.2
        + (h2h_draw_pct.min(50.0) / 50.0) * 0.2;
    likelihood.clamp(0.0, 1.0)
}

fn draw_warning(
    estimate: &ProbabilityEstimate,
    features: Option<&FeatureSet>,
    params: &DecisionParams,
) -> DrawWarning {
    let likelihood = draw_likelihood(features);

    let max = estimate.home.max(estimate.draw).max(estimate.away);
    let min = estimate.home.min(estimate.draw).min(estimate.away);
    let clustered = max - min <= params.cluster_spread;
    let draw_heavy = estimate.draw >= params.draw_prob_threshold;

    let level = if likelihood >= params.draw_severe_likelihood {
        DrawWarningLevel::Severe
    } else if likelihood >= params.draw_mild_likelihood || clustered || draw_heavy {
        DrawWarningLevel::Mild
    } else {
        DrawWarningLevel::None
    };

    DrawWarning { level, likelihood }
}
