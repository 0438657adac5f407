//! Feature aggregation: turns time-bounded slices of match history into a
//! versioned [`FeatureSnapshot`] per fixture.
//!
//! Every query the builder issues is bounded strictly before the as-of
//! time, so no input timestamped at or after the cutoff can influence the
//! snapshot. Sparse history never fails a build: fields the history cannot
//! support are simply absent.

pub mod fatigue;
pub mod h2h;
pub mod windows;

use anyhow::Result;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::db::models::{FeatureSet, FeatureSnapshot, MatchRecord, TeamStatLine};
use crate::db::Database;
use fatigue::{CONGESTION_WINDOW_DAYS, CONTINENTAL_WINDOW_DAYS};
use windows::{diff, StatAverages, VenueRecord};

/// Form is always computed at these two horizons, independent of the
/// goal/stat window size.
const FORM_SHORT: usize = 3;
const FORM_LONG: usize = 5;

/// The one fatal condition: there is nothing to compute against.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown fixture id {0}")]
pub struct UnknownFixture(pub i64);

/// Outcome of a bulk rebuild sweep. Per-fixture failures are counted, not
/// propagated: snapshots already written stay written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub total: usize,
    pub built: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Builds and persists feature snapshots. Deterministic and idempotent for
/// stable underlying data; safe to run concurrently for different fixtures
/// (and benign for the same one: last writer wins).
pub struct FeatureBuilder {
    db: Database,
    window_size: i64,
    schema_version: i64,
}

impl FeatureBuilder {
    pub fn new(db: Database, window_size: i64, schema_version: i64) -> Self {
        FeatureBuilder {
            db,
            window_size,
            schema_version,
        }
    }

    /// Build the snapshot for one fixture as of the given cutoff (defaults
    /// to the fixture's kickoff), upsert it, and return it.
    ///
    /// Sparse history is not an error: a side with no prior matches yields
    /// an entirely empty statistics block. The only failure that is not
    /// degraded is an unknown fixture id.
    pub fn build(
        &self,
        fixture_id: i64,
        as_of: Option<DateTime<Utc>>,
    ) -> Result<FeatureSnapshot> {
        let fixture = self
            .db
            .get_fixture(fixture_id)?
            .ok_or(UnknownFixture(fixture_id))?;
        let as_of = as_of.unwrap_or(fixture.kickoff_at);

        let home = self.side_features(&fixture, fixture.home_team_id, true, as_of)?;
        let away = self.side_features(&fixture, fixture.away_team_id, false, as_of)?;

        let meetings = self.db.h2h_meetings(
            fixture.home_team_id,
            fixture.away_team_id,
            h2h::window_start(as_of),
            as_of,
            h2h::H2H_MAX_MEETINGS,
        )?;
        let h2h = h2h::summarize(&meetings, fixture.home_team_id);

        let weather = self.db.weather_for(fixture.id)?;

        let features = assemble(&home, &away, &h2h, weather.as_ref());
        let snapshot = FeatureSnapshot {
            fixture_id: fixture.id,
            schema_version: self.schema_version,
            window_size: self.window_size,
            built_at: Utc::now(),
            features,
        };
        self.db.upsert_snapshot(&snapshot)?;
        debug!(fixture_id, schema_version = self.schema_version, "snapshot built");
        Ok(snapshot)
    }

    /// Rebuild snapshots for every fixture with kickoff in [from, to],
    /// bounded by `limit` so a single invocation has bounded latency and
    /// can be resumed later.
    ///
    /// Fixtures that already carry a snapshot at (or above) the current
    /// schema version are skipped unless `force` is set. A failure on one
    /// fixture is logged and counted; the sweep continues and snapshots
    /// written so far are preserved.
    pub fn build_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        limit: i64,
        force: bool,
    ) -> Result<BuildSummary> {
        let fixtures = self.db.list_fixtures_between(from, to, limit)?;
        let mut summary = BuildSummary {
            total: fixtures.len(),
            ..Default::default()
        };
        for fixture in &fixtures {
            if !force {
                if let Some(version) = self.db.latest_snapshot_version(fixture.id)? {
                    if version >= self.schema_version {
                        summary.skipped += 1;
                        continue;
                    }
                }
            }
            match self.build(fixture.id, None) {
                Ok(_) => summary.built += 1,
                Err(e) => {
                    summary.errors += 1;
                    warn!(fixture_id = fixture.id, "snapshot build failed: {e:#}");
                }
            }
        }
        info!(
            total = summary.total,
            built = summary.built,
            skipped = summary.skipped,
            errors = summary.errors,
            "feature sweep finished"
        );
        Ok(summary)
    }

    fn side_features(
        &self,
        fixture: &MatchRecord,
        team_id: i64,
        at_home: bool,
        as_of: DateTime<Utc>,
    ) -> Result<SideFeatures> {
        let fetch = self.window_size.max(FORM_LONG as i64);
        let results = self.db.recent_results(team_id, as_of, fetch)?;

        let form_last3 = windows::points_per_match(head(&results, FORM_SHORT), team_id);
        let form_last5 = windows::points_per_match(head(&results, FORM_LONG), team_id);
        let window = head(&results, self.window_size as usize);
        let (goals_for_avg, goals_against_avg) = windows::goal_averages(window, team_id);

        let stat_lines = self
            .db
            .recent_stat_lines(team_id, as_of, self.window_size)?;
        let stats = windows::stat_averages(&stat_lines);

        let venue_matches = self
            .db
            .venue_results(team_id, as_of, self.window_size, at_home)?;
        let venue_pairs: Vec<(MatchRecord, Option<TeamStatLine>)> = venue_matches
            .into_iter()
            .map(|m| {
                let stat = self.db.stat_line(m.id, team_id)?;
                Ok((m, stat))
            })
            .collect::<Result<_>>()?;
        let venue = windows::venue_record(&venue_pairs, team_id);

        let last = self.db.last_match_before(team_id, as_of)?;
        let days_rest = fatigue::days_rest(last.as_ref(), as_of);
        let matches_14d = self.db.count_matches_between(
            team_id,
            fatigue::window_start(as_of, CONGESTION_WINDOW_DAYS),
            as_of,
        )?;
        let continental_7d = self.db.count_continental_between(
            team_id,
            fatigue::window_start(as_of, CONTINENTAL_WINDOW_DAYS),
            as_of,
        )?;

        let injury_count = self.db.injury_count(fixture.id, team_id)?;
        let rank = self
            .db
            .rank_for(team_id, fixture.league_id, fixture.season)?;

        Ok(SideFeatures {
            form_last3,
            form_last5,
            goals_for_avg,
            goals_against_avg,
            stats,
            venue,
            days_rest,
            matches_14d,
            continental_7d,
            injury_count,
            rank,
        })
    }
}

fn head(results: &[MatchRecord], n: usize) -> &[MatchRecord] {
    &results[..results.len().min(n)]
}

/// One side's computed families, before pairing into the snapshot.
struct SideFeatures {
    form_last3: Option<f64>,
    form_last5: Option<f64>,
    goals_for_avg: Option<f64>,
    goals_against_avg: Option<f64>,
    stats: StatAverages,
    venue: VenueRecord,
    days_rest: Option<i64>,
    matches_14d: i64,
    continental_7d: i64,
    injury_count: i64,
    rank: Option<i64>,
}

fn assemble(
    home: &SideFeatures,
    away: &SideFeatures,
    h2h: &h2h::HeadToHead,
    weather: Option<&crate::db::models::WeatherReport>,
) -> FeatureSet {
    FeatureSet {
        home_form_last3: home.form_last3,
        home_form_last5: home.form_last5,
        away_form_last3: away.form_last3,
        away_form_last5: away.form_last5,

        home_goals_for_avg: home.goals_for_avg,
        home_goals_against_avg: home.goals_against_avg,
        away_goals_for_avg: away.goals_for_avg,
        away_goals_against_avg: away.goals_against_avg,

        home_goals_for_at_home_avg: home.venue.goals_for_avg,
        home_goals_against_at_home_avg: home.venue.goals_against_avg,
        home_xg_at_home_avg: home.venue.xg_avg,
        home_wins_at_home_pct: home.venue.win_pct,
        away_goals_for_at_away_avg: away.venue.goals_for_avg,
        away_goals_against_at_away_avg: away.venue.goals_against_avg,
        away_xg_at_away_avg: away.venue.xg_avg,
        away_wins_at_away_pct: away.venue.win_pct,

        home_shots_avg: home.stats.shots,
        home_shots_on_target_avg: home.stats.shots_on_target,
        home_possession_pct_avg: home.stats.possession_pct,
        home_passes_avg: home.stats.passes,
        home_pass_accuracy_pct_avg: home.stats.pass_accuracy_pct,
        home_fouls_avg: home.stats.fouls,
        home_corners_avg: home.stats.corners,
        home_yellow_cards_avg: home.stats.yellow_cards,
        home_red_cards_avg: home.stats.red_cards,
        home_xg_avg: home.stats.xg,
        away_shots_avg: away.stats.shots,
        away_shots_on_target_avg: away.stats.shots_on_target,
        away_possession_pct_avg: away.stats.possession_pct,
        away_passes_avg: away.stats.passes,
        away_pass_accuracy_pct_avg: away.stats.pass_accuracy_pct,
        away_fouls_avg: away.stats.fouls,
        away_corners_avg: away.stats.corners,
        away_yellow_cards_avg: away.stats.yellow_cards,
        away_red_cards_avg: away.stats.red_cards,
        away_xg_avg: away.stats.xg,

        home_days_rest: home.days_rest,
        away_days_rest: away.days_rest,
        home_matches_14d: home.matches_14d,
        away_matches_14d: away.matches_14d,
        home_continental_7d: home.continental_7d,
        away_continental_7d: away.continental_7d,

        home_injury_count: home.injury_count,
        away_injury_count: away.injury_count,

        home_rank: home.rank,
        away_rank: away.rank,

        h2h_total: h2h.total,
        h2h_home_wins: h2h.home_wins,
        h2h_away_wins: h2h.away_wins,
        h2h_draws: h2h.draws,
        h2h_home_goals_avg: h2h.home_goals_avg,
        h2h_away_goals_avg: h2h.away_goals_avg,
        h2h_home_win_pct: h2h.home_win_pct,

        temp_c: weather.and_then(|w| w.temp_c),
        precipitation_mm: weather.and_then(|w| w.precipitation_mm),
        wind_kph: weather.and_then(|w| w.wind_kph),

        form_last3_diff: diff(home.form_last3, away.form_last3),
        form_last5_diff: diff(home.form_last5, away.form_last5),
        goals_for_diff: diff(home.goals_for_avg, away.goals_for_avg),
        goals_against_diff: diff(home.goals_against_avg, away.goals_against_avg),
        shots_diff: diff(home.stats.shots, away.stats.shots),
        shots_on_target_diff: diff(home.stats.shots_on_target, away.stats.shots_on_target),
        possession_pct_diff: diff(home.stats.possession_pct, away.stats.possession_pct),
        passes_diff: diff(home.stats.passes, away.stats.passes),
        pass_accuracy_pct_diff: diff(home.stats.pass_accuracy_pct, away.stats.pass_accuracy_pct),
        fouls_diff: diff(home.stats.fouls, away.stats.fouls),
        corners_diff: diff(home.stats.corners, away.stats.corners),
        yellow_cards_diff: diff(home.stats.yellow_cards, away.stats.yellow_cards),
        red_cards_diff: diff(home.stats.red_cards, away.stats.red_cards),
        xg_diff: diff(home.stats.xg, away.stats.xg),
        attack_diff: diff(home.venue.goals_for_avg, away.venue.goals_against_avg),
        defense_diff: diff(home.venue.goals_against_avg, away.venue.goals_for_avg),
        rest_diff: match (home.days_rest, away.days_rest) {
            (Some(h), Some(a)) => Some(h - a),
            _ => None,
        },
        congestion_diff: away.matches_14d - home.matches_14d,
        continental_diff: away.continental_7d - home.continental_7d,
        injury_diff: home.injury_count - away.injury_count,
        rank_diff: match (home.rank, away.rank) {
            (Some(h), Some(a)) => Some(a - h),
            _ => None,
        },
    }
}
