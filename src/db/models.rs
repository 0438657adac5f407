use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled or completed match between two sides.
///
/// Immutable once `status` is final ("FT"); owned by the ingestion
/// collaborators and treated as read-only input here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: i64,
    pub league_id: i64,
    pub season: i64,
    pub kickoff_at: DateTime<Utc>,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_goals: Option<i64>,
    pub away_goals: Option<i64>,
    /// "FT" = full time (final). Anything else is not counted as history.
    pub status: String,
}

impl MatchRecord {
    pub fn is_final(&self) -> bool {
        self.status == "FT"
    }

    /// Goals scored by the given team in this match (0 when goals missing).
    pub fn goals_for(&self, team_id: i64) -> i64 {
        if self.home_team_id == team_id {
            self.home_goals.unwrap_or(0)
        } else {
            self.away_goals.unwrap_or(0)
        }
    }

    /// Goals conceded by the given team in this match.
    pub fn goals_against(&self, team_id: i64) -> i64 {
        if self.home_team_id == team_id {
            self.away_goals.unwrap_or(0)
        } else {
            self.home_goals.unwrap_or(0)
        }
    }

    /// League points earned by the given team (win 3, draw 1, loss 0).
    pub fn points_for(&self, team_id: i64) -> i64 {
        let gf = self.goals_for(team_id);
        let ga = self.goals_against(team_id);
        if gf > ga {
            3
        } else if gf == ga {
            1
        } else {
            0
        }
    }
}

/// Observed per-team statistics for one match. A match may have zero, one
/// or two of these rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStatLine {
    pub fixture_id: i64,
    pub team_id: i64,
    pub shots: Option<f64>,
    pub shots_on_target: Option<f64>,
    pub possession_pct: Option<f64>,
    pub passes: Option<f64>,
    pub pass_accuracy_pct: Option<f64>,
    pub fouls: Option<f64>,
    pub corners: Option<f64>,
    pub yellow_cards: Option<f64>,
    pub red_cards: Option<f64>,
    /// Expected-goals proxy.
    pub xg: Option<f64>,
}

/// League table position for a team at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub team_id: i64,
    pub league_id: i64,
    pub season: i64,
    pub rank: i64,
}

/// Ambient conditions recorded for a fixture, when available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub fixture_id: i64,
    pub temp_c: Option<f64>,
    pub precipitation_mm: Option<f64>,
    pub wind_kph: Option<f64>,
}

/// Current market prices for a fixture, plus the previous quote per outcome
/// for directional trend display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsQuote {
    pub fixture_id: i64,
    pub bookmaker: String,
    /// Decimal prices.
    pub home: f64,
    pub draw: f64,
    pub away: f64,
    pub prev_home: Option<f64>,
    pub prev_draw: Option<f64>,
    pub prev_away: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

/// Engineered numeric predictors for one fixture.
///
/// Every field is optional: absence means "insufficient history", never
/// zero. The only place an absent field becomes 0 is the serialization
/// boundary in `model::client` when building the estimation-service payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureSet {
    // ── Form (points per match over the last N completed matches) ──────────
    pub home_form_last3: Option<f64>,
    pub home_form_last5: Option<f64>,
    pub away_form_last3: Option<f64>,
    pub away_form_last5: Option<f64>,

    // ── Scoring over the window, any venue ─────────────────────────────────
    pub home_goals_for_avg: Option<f64>,
    pub home_goals_against_avg: Option<f64>,
    pub away_goals_for_avg: Option<f64>,
    pub away_goals_against_avg: Option<f64>,

    // ── Venue-split record (home side at home, away side away) ─────────────
    pub home_goals_for_at_home_avg: Option<f64>,
    pub home_goals_against_at_home_avg: Option<f64>,
    pub home_xg_at_home_avg: Option<f64>,
    /// Win rate 0.0–1.0 over the home side's recent home matches.
    pub home_wins_at_home_pct: Option<f64>,
    pub away_goals_for_at_away_avg: Option<f64>,
    pub away_goals_against_at_away_avg: Option<f64>,
    pub away_xg_at_away_avg: Option<f64>,
    pub away_wins_at_away_pct: Option<f64>,

    // ── Match-statistic averages (only matches with a stat line count) ─────
    pub home_shots_avg: Option<f64>,
    pub home_shots_on_target_avg: Option<f64>,
    pub home_possession_pct_avg: Option<f64>,
    pub home_passes_avg: Option<f64>,
    pub home_pass_accuracy_pct_avg: Option<f64>,
    pub home_fouls_avg: Option<f64>,
    pub home_corners_avg: Option<f64>,
    pub home_yellow_cards_avg: Option<f64>,
    pub home_red_cards_avg: Option<f64>,
    pub home_xg_avg: Option<f64>,
    pub away_shots_avg: Option<f64>,
    pub away_shots_on_target_avg: Option<f64>,
    pub away_possession_pct_avg: Option<f64>,
    pub away_passes_avg: Option<f64>,
    pub away_pass_accuracy_pct_avg: Option<f64>,
    pub away_fouls_avg: Option<f64>,
    pub away_corners_avg: Option<f64>,
    pub away_yellow_cards_avg: Option<f64>,
    pub away_red_cards_avg: Option<f64>,
    pub away_xg_avg: Option<f64>,

    // ── Fatigue / congestion ───────────────────────────────────────────────
    /// Days since the side's previous completed match; absent for a side's
    /// first tracked match.
    pub home_days_rest: Option<i64>,
    pub away_days_rest: Option<i64>,
    pub home_matches_14d: i64,
    pub away_matches_14d: i64,
    pub home_continental_7d: i64,
    pub away_continental_7d: i64,

    // ── Injuries (reported unavailable players as of build time) ───────────
    pub home_injury_count: i64,
    pub away_injury_count: i64,

    // ── Standings ──────────────────────────────────────────────────────────
    pub home_rank: Option<i64>,
    pub away_rank: Option<i64>,

    // ── Head-to-head (trailing 2 years, up to 10 meetings, reoriented) ─────
    pub h2h_total: i64,
    pub h2h_home_wins: Option<i64>,
    pub h2h_away_wins: Option<i64>,
    pub h2h_draws: Option<i64>,
    pub h2h_home_goals_avg: Option<f64>,
    pub h2h_away_goals_avg: Option<f64>,
    pub h2h_home_win_pct: Option<f64>,

    // ── Ambient conditions ─────────────────────────────────────────────────
    pub temp_c: Option<f64>,
    pub precipitation_mm: Option<f64>,
    pub wind_kph: Option<f64>,

    // ── Differentials (home minus away unless noted) ───────────────────────
    pub form_last3_diff: Option<f64>,
    pub form_last5_diff: Option<f64>,
    pub goals_for_diff: Option<f64>,
    pub goals_against_diff: Option<f64>,
    pub shots_diff: Option<f64>,
    pub shots_on_target_diff: Option<f64>,
    pub possession_pct_diff: Option<f64>,
    pub passes_diff: Option<f64>,
    pub pass_accuracy_pct_diff: Option<f64>,
    pub fouls_diff: Option<f64>,
    pub corners_diff: Option<f64>,
    pub yellow_cards_diff: Option<f64>,
    pub red_cards_diff: Option<f64>,
    pub xg_diff: Option<f64>,
    /// Home attack at home vs away defence away.
    pub attack_diff: Option<f64>,
    /// Home defence at home vs away attack away.
    pub defense_diff: Option<f64>,
    pub rest_diff: Option<i64>,
    /// Away minus home: positive when the away side has the heavier schedule.
    pub congestion_diff: i64,
    /// Away minus home, continental matches in the trailing 7 days.
    pub continental_diff: i64,
    /// Home minus away reported injuries.
    pub injury_diff: i64,
    /// Away rank minus home rank: positive when the home side sits higher.
    pub rank_diff: Option<i64>,
}

impl FeatureSet {
    /// Whether any signal usable by the fallback heuristic is present.
    /// A snapshot with none of these set falls straight through to the
    /// fixed prior and is marked low-confidence.
    pub fn has_signal(&self) -> bool {
        self.home_form_last5.is_some()
            || self.away_form_last5.is_some()
            || self.home_wins_at_home_pct.is_some()
            || self.away_wins_at_away_pct.is_some()
            || self.xg_diff.is_some()
            || self.home_rank.is_some()
            || self.away_rank.is_some()
            || self.h2h_total > 0
    }
}

/// Versioned bundle of engineered predictors for exactly one fixture, keyed
/// by (fixture_id, schema_version). Created and overwritten only by the
/// feature builder; recomputation over unchanged inputs is idempotent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSnapshot {
    pub fixture_id: i64,
    pub schema_version: i64,
    pub window_size: i64,
    pub built_at: DateTime<Utc>,
    #[serde(flatten)]
    pub features: FeatureSet,
}

/// Where a probability estimate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateSource {
    /// External probability-estimation service.
    Model,
    /// Deterministic prior-plus-adjustments fallback.
    Heuristic,
}

/// Outcome probability triple for one fixture, in percent. Sums to 100
/// within ±1 after rounding. Transient: may be cached but is never itself
/// authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityEstimate {
    pub fixture_id: i64,
    pub home: f64,
    pub draw: f64,
    pub away: f64,
    pub source: EstimateSource,
    /// Set when the underlying snapshot carried no usable signal.
    pub low_confidence: bool,
}
