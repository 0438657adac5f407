use clap::Parser;

use crate::decision::DecisionParams;
use crate::model::heuristic::HeuristicParams;

/// Match-outcome prediction core
#[derive(Parser, Debug, Clone)]
#[command(name = "matchradar", version, about)]
pub struct Config {
    /// SQLite database path
    #[arg(long, env = "DATABASE_PATH", default_value = "matchradar.db")]
    pub database_path: String,

    /// Probability-estimation service base URL (omit to run heuristic-only)
    #[arg(long, env = "MODEL_API_URL")]
    pub model_api_url: Option<String>,

    /// Estimation request timeout in seconds
    #[arg(long, env = "MODEL_TIMEOUT_SECS", default_value = "10")]
    pub model_timeout_secs: u64,

    /// Number of completed matches per statistics window
    #[arg(long, env = "WINDOW_SIZE", default_value = "5")]
    pub window_size: i64,

    /// Feature snapshot schema version
    #[arg(long, env = "SCHEMA_VERSION", default_value = "2")]
    pub schema_version: i64,

    /// First day of the sweep range, inclusive (YYYY-MM-DD, default today)
    #[arg(long, env = "SWEEP_FROM")]
    pub sweep_from: Option<String>,

    /// Sweep range length in days
    #[arg(long, env = "SWEEP_DAYS", default_value = "7")]
    pub sweep_days: i64,

    /// Maximum fixtures processed per invocation
    #[arg(long, env = "SWEEP_LIMIT", default_value = "200")]
    pub sweep_limit: i64,

    /// Rebuild snapshots even when the stored schema version is current
    #[arg(long, env = "FORCE_REBUILD", default_value = "false")]
    pub force_rebuild: bool,

    /// Fallback prior probability of a home win (0.0-1.0)
    #[arg(long, env = "PRIOR_HOME", default_value = "0.35")]
    pub prior_home: f64,

    /// Fallback prior probability of a draw (0.0-1.0)
    #[arg(long, env = "PRIOR_DRAW", default_value = "0.28")]
    pub prior_draw: f64,

    /// Fallback prior probability of an away win (0.0-1.0)
    #[arg(long, env = "PRIOR_AWAY", default_value = "0.37")]
    pub prior_away: f64,

    /// Form differential adjustment weight
    #[arg(long, env = "FORM_WEIGHT", default_value = "0.15")]
    pub form_weight: f64,

    /// Venue win-rate adjustment weight
    #[arg(long, env = "VENUE_WEIGHT", default_value = "0.2")]
    pub venue_weight: f64,

    /// Expected-goals differential weight on the home side
    #[arg(long, env = "XG_HOME_WEIGHT", default_value = "0.1")]
    pub xg_home_weight: f64,

    /// Expected-goals differential weight on the away side
    #[arg(long, env = "XG_AWAY_WEIGHT", default_value = "0.08")]
    pub xg_away_weight: f64,

    /// Standings rank differential weight
    #[arg(long, env = "RANK_WEIGHT", default_value = "0.02")]
    pub rank_weight: f64,

    /// Head-to-head win-rate adjustment weight
    #[arg(long, env = "H2H_WEIGHT", default_value = "0.1")]
    pub h2h_weight: f64,

    /// Minimum prior meetings before head-to-head adjusts the estimate
    #[arg(long, env = "H2H_MIN_MEETINGS", default_value = "3")]
    pub h2h_min_meetings: i64,

    /// Best-pick probability threshold for a STRONG recommendation
    #[arg(long, env = "STRONG_THRESHOLD", default_value = "60.0")]
    pub strong_threshold: f64,

    /// Best-pick probability threshold for a MEDIUM recommendation
    #[arg(long, env = "MEDIUM_THRESHOLD", default_value = "55.0")]
    pub medium_threshold: f64,

    /// Minimum expected value for the value-bet flag
    #[arg(long, env = "VALUE_BET_THRESHOLD", default_value = "0.02")]
    pub value_bet_threshold: f64,

    /// Probability spread under which a match counts as clustered
    #[arg(long, env = "CLUSTER_SPREAD", default_value = "12.0")]
    pub cluster_spread: f64,

    /// Draw probability that alone raises a draw warning
    #[arg(long, env = "DRAW_PROB_THRESHOLD", default_value = "33.0")]
    pub draw_prob_threshold: f64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.window_size < 1 {
            anyhow::bail!("window_size must be at least 1");
        }
        if self.schema_version < 1 {
            anyhow::bail!("schema_version must be at least 1");
        }
        if self.sweep_days < 1 || self.sweep_limit < 1 {
            anyhow::bail!("sweep_days and sweep_limit must be at least 1");
        }
        for (name, value) in [
            ("prior_home", self.prior_home),
            ("prior_draw", self.prior_draw),
            ("prior_away", self.prior_away),
        ] {
            if !(0.0..=1.0).contains(&value) {
                anyhow::bail!("{name} must be between 0.0 and 1.0");
            }
        }
        let prior_sum = self.prior_home + self.prior_draw + self.prior_away;
        if (prior_sum - 1.0).abs() > 0.01 {
            anyhow::bail!("prior probabilities must sum to 1.0 (got {prior_sum:.3})");
        }
        if self.medium_threshold > self.strong_threshold {
            anyhow::bail!("medium_threshold must not exceed strong_threshold");
        }
        if self.value_bet_threshold < 0.0 {
            anyhow::bail!("value_bet_threshold must not be negative");
        }
        Ok(())
    }

    pub fn heuristic_params(&self) -> HeuristicParams {
        HeuristicParams {
            prior_home: self.prior_home,
            prior_draw: self.prior_draw,
            prior_away: self.prior_away,
            form_weight: self.form_weight,
            venue_weight: self.venue_weight,
            xg_home_weight: self.xg_home_weight,
            xg_away_weight: self.xg_away_weight,
            rank_weight: self.rank_weight,
            h2h_weight: self.h2h_weight,
            h2h_min_meetings: self.h2h_min_meetings,
            ..HeuristicParams::default()
        }
    }

    pub fn decision_params(&self) -> DecisionParams {
        DecisionParams {
            strong_threshold: self.strong_threshold,
            medium_threshold: self.medium_threshold,
            value_bet_threshold: self.value_bet_threshold,
            cluster_spread: self.cluster_spread,
            draw_prob_threshold: self.draw_prob_threshold,
            ..DecisionParams::default()
        }
    }
}
