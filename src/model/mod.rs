//! Probability estimation: an external service as the primary source with
//! a deterministic heuristic standing behind it.
//!
//! The estimator never fails a batch. Service outages, partial responses
//! and malformed rows all degrade per fixture to the heuristic, so every
//! snapshot that goes in comes out with a usable probability triple.

pub mod client;
pub mod heuristic;

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::db::models::{EstimateSource, FeatureSnapshot, ProbabilityEstimate};
use heuristic::HeuristicModel;

/// One validated probability triple from a source, percent scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityRow {
    pub fixture_id: i64,
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

/// A batch-capable source of outcome probabilities.
#[async_trait]
pub trait ProbabilitySource: Send + Sync {
    /// Score a batch of snapshots. May return fewer rows than requested;
    /// missing fixtures are handled by the caller's fallback.
    async fn estimate_batch(&self, snapshots: &[FeatureSnapshot]) -> Result<Vec<ProbabilityRow>>;
}

pub struct Estimator {
    primary: Option<Box<dyn ProbabilitySource>>,
    fallback: HeuristicModel,
}

impl Estimator {
    pub fn new(primary: Option<Box<dyn ProbabilitySource>>, fallback: HeuristicModel) -> Self {
        Estimator { primary, fallback }
    }

    /// Produce one estimate per snapshot, in input order.
    ///
    /// Snapshots with no usable signal skip the service entirely: they get
    /// the unmodified prior and are flagged low-confidence. Everything else
    /// goes to the primary source in one batch, with the heuristic covering
    /// any fixture the service failed to score.
    pub async fn estimate(&self, snapshots: &[FeatureSnapshot]) -> Vec<ProbabilityEstimate> {
        let scorable: Vec<&FeatureSnapshot> = snapshots
            .iter()
            .filter(|s| s.features.has_signal())
            .collect();
        let primary_rows = self.primary_rows(&scorable).await;

        snapshots
            .iter()
            .map(|snapshot| {
                if !snapshot.features.has_signal() {
                    return self.fallback_estimate(snapshot, true);
                }
                match primary_rows.get(&snapshot.fixture_id) {
                    Some(row) => ProbabilityEstimate {
                        fixture_id: snapshot.fixture_id,
                        home: row.home,
                        draw: row.draw,
                        away: row.away,
                        source: EstimateSource::Model,
                        low_confidence: false,
                    },
                    None => self.fallback_estimate(snapshot, false),
                }
            })
            .collect()
    }

    async fn primary_rows(&self, scorable: &[&FeatureSnapshot]) -> HashMap<i64, ProbabilityRow> {
        let Some(primary) = &self.primary else {
            return HashMap::new();
        };
        if scorable.is_empty() {
            return HashMap::new();
        }
        let owned: Vec<FeatureSnapshot> = scorable.iter().map(|s| (*s).clone()).collect();
        match primary.estimate_batch(&owned).await {
            Ok(rows) => {
                debug!(scored = rows.len(), requested = owned.len(), "primary estimates");
                rows.into_iter().map(|r| (r.fixture_id, r)).collect()
            }
            Err(e) => {
                warn!("estimation service unavailable, using heuristic: {e:#}");
                HashMap::new()
            }
        }
    }

    fn fallback_estimate(
        &self,
        snapshot: &FeatureSnapshot,
        low_confidence: bool,
    ) -> ProbabilityEstimate {
        let est = self.fallback.estimate(&snapshot.features);
        ProbabilityEstimate {
            fixture_id: snapshot.fixture_id,
            home: est.home,
            draw: est.draw,
            away: est.away,
            source: EstimateSource::Heuristic,
            low_confidence,
        }
    }
}
