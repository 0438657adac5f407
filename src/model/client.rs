//! HTTP client for the external probability-estimation service.
//!
//! The service scores a whole batch of fixtures in one round trip. This is
//! the single place where absent features become zeros: the service expects
//! a dense numeric vector, while everywhere else in the crate absence stays
//! `None`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::{debug, warn};

use super::{ProbabilityRow, ProbabilitySource};
use crate::db::models::FeatureSnapshot;

pub struct ModelServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ModelServiceClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ModelServiceClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn batch_url(&self) -> String {
        format!("{}/predict/batch", self.base_url)
    }
}

#[async_trait]
impl ProbabilitySource for ModelServiceClient {
    async fn estimate_batch(&self, snapshots: &[FeatureSnapshot]) -> Result<Vec<ProbabilityRow>> {
        let rows: Vec<Value> = snapshots.iter().map(request_row).collect::<Result<_>>()?;
        let response = self
            .client
            .post(self.batch_url())
            .json(&json!({ "fixtures": rows }))
            .send()
            .await
            .context("Estimation service request failed")?
            .error_for_status()
            .context("Estimation service returned an error status")?;
        let body: BatchResponse = response
            .json()
            .await
            .context("Failed to parse estimation service response")?;
        debug!(
            requested = snapshots.len(),
            returned = body.predictions.len(),
            "estimation batch"
        );

        let mut accepted = Vec::with_capacity(body.predictions.len());
        for row in body.predictions {
            if let Some(valid) = validate_row(&row) {
                accepted.push(valid);
            } else {
                warn!(fixture_id = row.fixture_id, "rejected malformed prediction row");
            }
        }
        Ok(accepted)
    }
}

/// Dense request row: the snapshot's features with every absent value
/// replaced by zero, plus the fixture id.
fn request_row(snapshot: &FeatureSnapshot) -> Result<Value> {
    let value =
        serde_json::to_value(&snapshot.features).context("Failed to serialize feature row")?;
    let Value::Object(fields) = value else {
        anyhow::bail!("feature row did not serialize to an object");
    };
    let mut dense = Map::with_capacity(fields.len() + 1);
    dense.insert("fixtureId".into(), json!(snapshot.fixture_id));
    for (key, value) in fields {
        dense.insert(key, if value.is_null() { json!(0.0) } else { value });
    }
    Ok(Value::Object(dense))
}

#[derive(Debug, Deserialize)]
struct BatchResponse {
    predictions: Vec<WireRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRow {
    fixture_id: i64,
    home_prob: f64,
    draw_prob: f64,
    away_prob: f64,
}

/// A row is usable only if every probability is finite, in [0, 100], and
/// the triple sums to 100 within a tolerance of 1.
fn validate_row(row: &WireRow) -> Option<ProbabilityRow> {
    let probs = [row.home_prob, row.draw_prob, row.away_prob];
    if probs.iter().any(|p| !p.is_finite() || *p < 0.0 || *p > 100.0) {
        return None;
    }
    let sum: f64 = probs.iter().sum();
    if (sum - 100.0).abs() > 1.0 {
        return None;
    }
    Some(ProbabilityRow {
        fixture_id: row.fixture_id,
        home: row.home_prob,
        draw: row.draw_prob,
        away: row.away_prob,
    })
}
