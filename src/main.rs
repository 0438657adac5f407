use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::Parser;
use tracing::{info, warn};

mod config;
mod db;
mod decision;
mod features;
mod model;

use config::Config;
use db::Database;
use decision::{decide, DecisionParams};
use features::FeatureBuilder;
use model::client::ModelServiceClient;
use model::heuristic::HeuristicModel;
use model::{Estimator, ProbabilitySource};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let db = Database::open(&config.database_path)?;
    info!("Database opened: {}", config.database_path);

    let (from, to) = sweep_range(&config)?;
    info!(%from, %to, limit = config.sweep_limit, "rebuilding feature snapshots");

    let builder = FeatureBuilder::new(db.clone(), config.window_size, config.schema_version);
    let summary = builder.build_range(from, to, config.sweep_limit, config.force_rebuild)?;
    info!(
        "Sweep complete: {} built, {} skipped, {} errors of {} fixtures",
        summary.built, summary.skipped, summary.errors, summary.total
    );

    let primary: Option<Box<dyn ProbabilitySource>> = match &config.model_api_url {
        Some(url) => {
            info!("Estimation service: {}", url);
            Some(Box::new(ModelServiceClient::new(
                url,
                config.model_timeout_secs,
            )?))
        }
        None => {
            info!("No estimation service configured, heuristic only");
            None
        }
    };
    let estimator = Estimator::new(primary, HeuristicModel::new(config.heuristic_params()));

    let fixtures = db.list_fixtures_between(from, to, config.sweep_limit)?;
    let mut snapshots = Vec::with_capacity(fixtures.len());
    for fixture in &fixtures {
        match db.get_snapshot(fixture.id, config.schema_version)? {
            Some(snapshot) => snapshots.push(snapshot),
            None => warn!(fixture_id = fixture.id, "no snapshot, fixture skipped"),
        }
    }

    let estimates = estimator.estimate(&snapshots).await;
    let decision_params = config.decision_params();
    report(&db, &snapshots, &estimates, &decision_params)?;

    Ok(())
}

fn sweep_range(config: &Config) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let from = match &config.sweep_from {
        Some(raw) => {
            let date: NaiveDate = raw
                .parse()
                .with_context(|| format!("Invalid sweep_from date: {raw}"))?;
            date.and_hms_opt(0, 0, 0)
                .context("Invalid start of day")?
                .and_utc()
        }
        None => Utc::now(),
    };
    Ok((from, from + Duration::days(config.sweep_days)))
}

fn report(
    db: &Database,
    snapshots: &[db::models::FeatureSnapshot],
    estimates: &[db::models::ProbabilityEstimate],
    params: &DecisionParams,
) -> Result<()> {
    for (snapshot, estimate) in snapshots.iter().zip(estimates) {
        let odds = db.odds_for(snapshot.fixture_id)?;
        let result = decide(estimate, odds.as_ref(), Some(&snapshot.features), params);
        info!(
            fixture_id = result.fixture_id,
            source = ?estimate.source,
            best_pick = ?result.best_pick,
            level = ?result.recommendation_level,
            confidence = format!("{:.1}", result.confidence),
            best_ev = ?result.expected_value.best_value.map(|v| format!("{v:+.3}")),
            value_bet = result.value_bet,
            draw_warning = ?result.draw_warning.level,
            estimated_odds = result.is_estimated,
            "decision"
        );
    }
    Ok(())
}
