use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

pub mod models;
use models::*;

/// Thread-safe SQLite handle (single connection with mutex).
///
/// The historical tables (fixtures, leagues, team_stats, standings,
/// injuries, weather, odds) are owned by the ingestion collaborators and are
/// only ever read here; the sole table this crate writes is
/// `feature_snapshots`, via an idempotent upsert keyed on
/// (fixture_id, schema_version).
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the SQLite database at the given path.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        let db = Database {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Run schema migrations (idempotent).
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    // ── Fixtures ─────────────────────────────────────────────────────────────

    /// Look up a single fixture by id.
    pub fn get_fixture(&self, id: i64) -> Result<Option<MatchRecord>> {
        let conn = self.conn.lock().unwrap();
        let fixture = conn
            .query_row(
                &format!("{FIXTURE_SELECT} WHERE id=?1"),
                params![id],
                map_fixture,
            )
            .optional()?;
        Ok(fixture)
    }

    /// List fixtures with kickoff in [from, to], oldest first, capped.
    pub fn list_fixtures_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<MatchRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "{FIXTURE_SELECT} WHERE kickoff_at >= ?1 AND kickoff_at <= ?2
             ORDER BY kickoff_at ASC LIMIT ?3"
        ))?;
        let rows = stmt
            .query_map(params![from, to, limit], map_fixture)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// The team's most recent completed matches strictly before `before`,
    /// newest first, any venue.
    pub fn recent_results(
        &self,
        team_id: i64,
        before: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<MatchRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "{FIXTURE_SELECT}
             WHERE kickoff_at < ?1 AND status='FT'
               AND (home_team_id=?2 OR away_team_id=?2)
             ORDER BY kickoff_at DESC LIMIT ?3"
        ))?;
        let rows = stmt
            .query_map(params![before, team_id, limit], map_fixture)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Completed matches where the team played at the given venue, newest
    /// first.
    pub fn venue_results(
        &self,
        team_id: i64,
        before: DateTime<Utc>,
        limit: i64,
        at_home: bool,
    ) -> Result<Vec<MatchRecord>> {
        let column = if at_home {
            "home_team_id"
        } else {
            "away_team_id"
        };
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "{FIXTURE_SELECT}
             WHERE kickoff_at < ?1 AND status='FT' AND {column}=?2
             ORDER BY kickoff_at DESC LIMIT ?3"
        ))?;
        let rows = stmt
            .query_map(params![before, team_id, limit], map_fixture)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// The team's most recent completed match strictly before `before`.
    pub fn last_match_before(
        &self,
        team_id: i64,
        before: DateTime<Utc>,
    ) -> Result<Option<MatchRecord>> {
        Ok(self.recent_results(team_id, before, 1)?.into_iter().next())
    }

    /// Count the team's completed matches with kickoff in [from, before).
    pub fn count_matches_between(
        &self,
        team_id: i64,
        from: DateTime<Utc>,
        before: DateTime<Utc>,
    ) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count = conn.query_row(
            "SELECT COUNT(*) FROM fixtures
             WHERE kickoff_at >= ?1 AND kickoff_at < ?2 AND status='FT'
               AND (home_team_id=?3 OR away_team_id=?3)",
            params![from, before, team_id],
            |r| r.get(0),
        )?;
        Ok(count)
    }

    /// Count the team's completed continental-competition matches with
    /// kickoff in [from, before).
    pub fn count_continental_between(
        &self,
        team_id: i64,
        from: DateTime<Utc>,
        before: DateTime<Utc>,
    ) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count = conn.query_row(
            "SELECT COUNT(*) FROM fixtures f
             JOIN leagues l ON l.id = f.league_id
             WHERE f.kickoff_at >= ?1 AND f.kickoff_at < ?2 AND f.status='FT'
               AND l.is_continental = 1
               AND (f.home_team_id=?3 OR f.away_team_id=?3)",
            params![from, before, team_id],
            |r| r.get(0),
        )?;
        Ok(count)
    }

    /// Completed meetings between the two specific sides (either
    /// orientation) with kickoff in [from, before), newest first, capped.
    pub fn h2h_meetings(
        &self,
        team_a: i64,
        team_b: i64,
        from: DateTime<Utc>,
        before: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<MatchRecord>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "{FIXTURE_SELECT}
             WHERE kickoff_at >= ?1 AND kickoff_at < ?2 AND status='FT'
               AND ((home_team_id=?3 AND away_team_id=?4)
                 OR (home_team_id=?4 AND away_team_id=?3))
             ORDER BY kickoff_at DESC LIMIT ?5"
        ))?;
        let rows = stmt
            .query_map(params![from, before, team_a, team_b, limit], map_fixture)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    // ── Team statistics ──────────────────────────────────────────────────────

    /// Stat lines for the team's most recent completed matches strictly
    /// before `before`, newest first. Matches without a stat line are simply
    /// not returned (they are excluded from averages, not zero-filled).
    pub fn recent_stat_lines(
        &self,
        team_id: i64,
        before: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<TeamStatLine>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "{STAT_SELECT}
             JOIN fixtures f ON f.id = ts.fixture_id
             WHERE ts.team_id=?1 AND f.kickoff_at < ?2 AND f.status='FT'
             ORDER BY f.kickoff_at DESC LIMIT ?3"
        ))?;
        let rows = stmt
            .query_map(params![team_id, before, limit], map_stat_line)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Single stat line for a (fixture, team), if observed.
    pub fn stat_line(&self, fixture_id: i64, team_id: i64) -> Result<Option<TeamStatLine>> {
        let conn = self.conn.lock().unwrap();
        let row = conn
            .query_row(
                &format!("{STAT_SELECT} WHERE ts.fixture_id=?1 AND ts.team_id=?2"),
                params![fixture_id, team_id],
                map_stat_line,
            )
            .optional()?;
        Ok(row)
    }

    // ── Standings / injuries / weather / odds ────────────────────────────────

    /// Current rank for a team in a league season, if tracked.
    pub fn rank_for(&self, team_id: i64, league_id: i64, season: i64) -> Result<Option<i64>> {
        let conn = self.conn.lock().unwrap();
        let rank = conn
            .query_row(
                "SELECT rank FROM standings WHERE team_id=?1 AND league_id=?2 AND season=?3",
                params![team_id, league_id, season],
                |r| r.get(0),
            )
            .optional()?;
        Ok(rank)
    }

    /// Count of reported unavailable players for a (fixture, side).
    pub fn injury_count(&self, fixture_id: i64, team_id: i64) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count = conn.query_row(
            "SELECT COUNT(*) FROM injuries WHERE fixture_id=?1 AND team_id=?2",
            params![fixture_id, team_id],
            |r| r.get(0),
        )?;
        Ok(count)
    }

    /// Weather record for a fixture, if one exists.
    pub fn weather_for(&self, fixture_id: i64) -> Result<Option<WeatherReport>> {
        let conn = self.conn.lock().unwrap();
        let row = conn
            .query_row(
                "SELECT fixture_id, temp_c, precipitation_mm, wind_kph
                 FROM weather WHERE fixture_id=?1",
                params![fixture_id],
                |r| {
                    Ok(WeatherReport {
                        fixture_id: r.get(0)?,
                        temp_c: r.get(1)?,
                        precipitation_mm: r.get(2)?,
                        wind_kph: r.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// Latest market quote for a fixture, if one exists.
    pub fn odds_for(&self, fixture_id: i64) -> Result<Option<OddsQuote>> {
        let conn = self.conn.lock().unwrap();
        let row = conn
            .query_row(
                "SELECT fixture_id, bookmaker, home, draw, away,
                        prev_home, prev_draw, prev_away, updated_at
                 FROM odds WHERE fixture_id=?1",
                params![fixture_id],
                |r| {
                    Ok(OddsQuote {
                        fixture_id: r.get(0)?,
                        bookmaker: r.get(1)?,
                        home: r.get(2)?,
                        draw: r.get(3)?,
                        away: r.get(4)?,
                        prev_home: r.get(5)?,
                        prev_draw: r.get(6)?,
                        prev_away: r.get(7)?,
                        updated_at: r.get(8)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    // ── Feature snapshots ────────────────────────────────────────────────────

    /// Upsert a snapshot keyed by (fixture_id, schema_version). Last writer
    /// wins; rebuilding with unchanged inputs rewrites an identical row.
    pub fn upsert_snapshot(&self, snapshot: &FeatureSnapshot) -> Result<()> {
        let payload =
            serde_json::to_string(snapshot).context("Failed to serialize feature snapshot")?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO feature_snapshots
                (fixture_id, schema_version, window_size, built_at, payload)
             VALUES (?1,?2,?3,?4,?5)
             ON CONFLICT(fixture_id, schema_version) DO UPDATE SET
                window_size=excluded.window_size,
                built_at=excluded.built_at,
                payload=excluded.payload",
            params![
                snapshot.fixture_id,
                snapshot.schema_version,
                snapshot.window_size,
                snapshot.built_at,
                payload,
            ],
        )?;
        Ok(())
    }

    /// Load a snapshot for a (fixture, schema version), if built.
    pub fn get_snapshot(
        &self,
        fixture_id: i64,
        schema_version: i64,
    ) -> Result<Option<FeatureSnapshot>> {
        let payload: Option<String> = {
            let conn = self.conn.lock().unwrap();
            conn.query_row(
                "SELECT payload FROM feature_snapshots
                 WHERE fixture_id=?1 AND schema_version=?2",
                params![fixture_id, schema_version],
                |r| r.get(0),
            )
            .optional()?
        };
        match payload {
            Some(p) => {
                let snapshot = serde_json::from_str(&p)
                    .context("Failed to deserialize feature snapshot payload")?;
                Ok(Some(snapshot))
            }
            None => Ok(None),
        }
    }

    /// Highest schema version already built for a fixture, if any.
    pub fn latest_snapshot_version(&self, fixture_id: i64) -> Result<Option<i64>> {
        let conn = self.conn.lock().unwrap();
        let version = conn
            .query_row(
                "SELECT MAX(schema_version) FROM feature_snapshots WHERE fixture_id=?1",
                params![fixture_id],
                |r| r.get::<_, Option<i64>>(0),
            )
            .optional()?
            .flatten();
        Ok(version)
    }
}

// ── SQL helpers ────────────────────────────────────────────────────────────────

const FIXTURE_SELECT: &str = "SELECT id, league_id, season, kickoff_at,
        home_team_id, away_team_id, home_goals, away_goals, status
     FROM fixtures";

const STAT_SELECT: &str = "SELECT ts.fixture_id, ts.team_id, ts.shots, ts.shots_on_target,
        ts.possession_pct, ts.passes, ts.pass_accuracy_pct, ts.fouls,
        ts.corners, ts.yellow_cards, ts.red_cards, ts.xg
     FROM team_stats ts";

fn map_fixture(row: &rusqlite::Row) -> rusqlite::Result<MatchRecord> {
    Ok(MatchRecord {
        id: row.get(0)?,
        league_id: row.get(1)?,
        season: row.get(2)?,
        kickoff_at: row.get(3)?,
        home_team_id: row.get(4)?,
        away_team_id: row.get(5)?,
        home_goals: row.get(6)?,
        away_goals: row.get(7)?,
        status: row.get(8)?,
    })
}

fn map_stat_line(row: &rusqlite::Row) -> rusqlite::Result<TeamStatLine> {
    Ok(TeamStatLine {
        fixture_id: row.get(0)?,
        team_id: row.get(1)?,
        shots: row.get(2)?,
        shots_on_target: row.get(3)?,
        possession_pct: row.get(4)?,
        passes: row.get(5)?,
        pass_accuracy_pct: row.get(6)?,
        fouls: row.get(7)?,
        corners: row.get(8)?,
        yellow_cards: row.get(9)?,
        red_cards: row.get(10)?,
        xg: row.get(11)?,
    })
}

/// SQLite schema (idempotent CREATE IF NOT EXISTS). The ingestion-owned
/// tables are created here too so the crate is runnable against a fresh
/// file, but this crate never inserts into them outside of tests.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS leagues (
    id             INTEGER PRIMARY KEY,
    name           TEXT    NOT NULL,
    is_continental INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS fixtures (
    id           INTEGER PRIMARY KEY,
    league_id    INTEGER NOT NULL,
    season       INTEGER NOT NULL,
    kickoff_at   TEXT    NOT NULL,
    home_team_id INTEGER NOT NULL,
    away_team_id INTEGER NOT NULL,
    home_goals   INTEGER,
    away_goals   INTEGER,
    status       TEXT    NOT NULL DEFAULT 'NS',
    FOREIGN KEY (league_id) REFERENCES leagues(id)
);

CREATE TABLE IF NOT EXISTS team_stats (
    fixture_id        INTEGER NOT NULL,
    team_id           INTEGER NOT NULL,
    shots             REAL,
    shots_on_target   REAL,
    possession_pct    REAL,
    passes            REAL,
    pass_accuracy_pct REAL,
    fouls             REAL,
    corners           REAL,
    yellow_cards      REAL,
    red_cards         REAL,
    xg                REAL,
    PRIMARY KEY (fixture_id, team_id),
    FOREIGN KEY (fixture_id) REFERENCES fixtures(id)
);

CREATE TABLE IF NOT EXISTS standings (
    team_id   INTEGER NOT NULL,
    league_id INTEGER NOT NULL,
    season    INTEGER NOT NULL,
    rank      INTEGER NOT NULL,
    PRIMARY KEY (team_id, league_id, season)
);

CREATE TABLE IF NOT EXISTS injuries (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    fixture_id INTEGER NOT NULL,
    team_id    INTEGER NOT NULL,
    player     TEXT    NOT NULL,
    FOREIGN KEY (fixture_id) REFERENCES fixtures(id)
);

CREATE TABLE IF NOT EXISTS weather (
    fixture_id       INTEGER PRIMARY KEY,
    temp_c           REAL,
    precipitation_mm REAL,
    wind_kph         REAL,
    FOREIGN KEY (fixture_id) REFERENCES fixtures(id)
);

CREATE TABLE IF NOT EXISTS odds (
    fixture_id INTEGER PRIMARY KEY,
    bookmaker  TEXT    NOT NULL,
    home       REAL    NOT NULL,
    draw       REAL    NOT NULL,
    away       REAL    NOT NULL,
    prev_home  REAL,
    prev_draw  REAL,
    prev_away  REAL,
    updated_at TEXT    NOT NULL,
    FOREIGN KEY (fixture_id) REFERENCES fixtures(id)
);

CREATE TABLE IF NOT EXISTS feature_snapshots (
    fixture_id     INTEGER NOT NULL,
    schema_version INTEGER NOT NULL,
    window_size    INTEGER NOT NULL,
    built_at       TEXT    NOT NULL,
    payload        TEXT    NOT NULL,
    PRIMARY KEY (fixture_id, schema_version),
    FOREIGN KEY (fixture_id) REFERENCES fixtures(id)
);

CREATE INDEX IF NOT EXISTS idx_fixtures_kickoff ON fixtures(kickoff_at);
CREATE INDEX IF NOT EXISTS idx_fixtures_home ON fixtures(home_team_id, kickoff_at);
CREATE INDEX IF NOT EXISTS idx_fixtures_away ON fixtures(away_team_id, kickoff_at);
CREATE INDEX IF NOT EXISTS idx_team_stats_team ON team_stats(team_id);
"#;

// ── Test seeding helpers ───────────────────────────────────────────────────────

/// Seed helpers for the ingestion-owned tables. Test-only: production code
/// treats those tables as read-only.
#[cfg(test)]
pub mod testutil {
    use super::*;

    pub fn open_memory() -> Database {
        Database::open(":memory:").expect("in-memory database")
    }

    pub fn seed_league(db: &Database, id: i64, name: &str, continental: bool) {
        let conn = db.conn.lock().unwrap();
        conn.execute(
            "INSERT OR IGNORE INTO leagues (id, name, is_continental) VALUES (?1,?2,?3)",
            params![id, name, continental as i64],
        )
        .unwrap();
    }

    #[allow(clippy::too_many_arguments)]
    pub fn seed_fixture(
        db: &Database,
        id: i64,
        league_id: i64,
        kickoff_at: DateTime<Utc>,
        home_team_id: i64,
        away_team_id: i64,
        home_goals: Option<i64>,
        away_goals: Option<i64>,
        status: &str,
    ) {
        seed_league(db, league_id, "league", false);
        let conn = db.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO fixtures (id, league_id, season, kickoff_at,
                home_team_id, away_team_id, home_goals, away_goals, status)
             VALUES (?1,?2,2024,?3,?4,?5,?6,?7,?8)",
            params![
                id,
                league_id,
                kickoff_at,
                home_team_id,
                away_team_id,
                home_goals,
                away_goals,
                status
            ],
        )
        .unwrap();
    }

    pub fn seed_stat_line(db: &Database, line: &TeamStatLine) {
        let conn = db.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO team_stats (fixture_id, team_id, shots, shots_on_target,
                possession_pct, passes, pass_accuracy_pct, fouls, corners,
                yellow_cards, red_cards, xg)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12)",
            params![
                line.fixture_id,
                line.team_id,
                line.shots,
                line.shots_on_target,
                line.possession_pct,
                line.passes,
                line.pass_accuracy_pct,
                line.fouls,
                line.corners,
                line.yellow_cards,
                line.red_cards,
                line.xg
            ],
        )
        .unwrap();
    }

    pub fn seed_standing(db: &Database, team_id: i64, league_id: i64, season: i64, rank: i64) {
        let conn = db.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO standings (team_id, league_id, season, rank)
             VALUES (?1,?2,?3,?4)",
            params![team_id, league_id, season, rank],
        )
        .unwrap();
    }

    pub fn seed_injury(db: &Database, fixture_id: i64, team_id: i64, player: &str) {
        let conn = db.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO injuries (fixture_id, team_id, player) VALUES (?1,?2,?3)",
            params![fixture_id, team_id, player],
        )
        .unwrap();
    }

    pub fn seed_weather(db: &Database, report: &WeatherReport) {
        let conn = db.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO weather (fixture_id, temp_c, precipitation_mm, wind_kph)
             VALUES (?1,?2,?3,?4)",
            params![
                report.fixture_id,
                report.temp_c,
                report.precipitation_mm,
                report.wind_kph
            ],
        )
        .unwrap();
    }

    pub fn seed_odds(db: &Database, quote: &OddsQuote) {
        let conn = db.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO odds (fixture_id, bookmaker, home, draw, away,
                prev_home, prev_draw, prev_away, updated_at)
             VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9)",
            params![
                quote.fixture_id,
                quote.bookmaker,
                quote.home,
                quote.draw,
                quote.away,
                quote.prev_home,
                quote.prev_draw,
                quote.prev_away,
                quote.updated_at
            ],
        )
        .unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 15, 0, 0).unwrap()
    }

    #[test]
    fn snapshot_upsert_is_idempotent_and_overwrites() {
        let db = testutil::open_memory();
        testutil::seed_fixture(&db, 1, 10, ts(2025, 3, 1), 100, 200, None, None, "NS");

        let mut snapshot = FeatureSnapshot {
            fixture_id: 1,
            schema_version: 2,
            window_size: 5,
            built_at: ts(2025, 2, 28),
            features: FeatureSet {
                home_form_last5: Some(1.8),
                ..Default::default()
            },
        };
        db.upsert_snapshot(&snapshot).unwrap();
        db.upsert_snapshot(&snapshot).unwrap();
        let stored = db.get_snapshot(1, 2).unwrap().unwrap();
        assert_eq!(stored, snapshot);

        // Last writer wins on the same key.
        snapshot.features.home_form_last5 = Some(2.2);
        db.upsert_snapshot(&snapshot).unwrap();
        let stored = db.get_snapshot(1, 2).unwrap().unwrap();
        assert_eq!(stored.features.home_form_last5, Some(2.2));
        assert_eq!(db.latest_snapshot_version(1).unwrap(), Some(2));
    }

    #[test]
    fn recent_results_respect_cutoff_and_order() {
        let db = testutil::open_memory();
        testutil::seed_fixture(&db, 1, 10, ts(2025, 1, 1), 100, 200, Some(2), Some(0), "FT");
        testutil::seed_fixture(&db, 2, 10, ts(2025, 1, 8), 200, 100, Some(1), Some(1), "FT");
        // At the cutoff itself: must be excluded.
        testutil::seed_fixture(&db, 3, 10, ts(2025, 1, 15), 100, 300, Some(3), Some(0), "FT");
        // Not final: must be excluded.
        testutil::seed_fixture(&db, 4, 10, ts(2025, 1, 10), 100, 300, None, None, "NS");

        let rows = db.recent_results(100, ts(2025, 1, 15), 10).unwrap();
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn missing_lookups_return_none() {
        let db = testutil::open_memory();
        assert!(db.get_fixture(99).unwrap().is_none());
        assert!(db.get_snapshot(99, 2).unwrap().is_none());
        assert!(db.latest_snapshot_version(99).unwrap().is_none());
        assert!(db.odds_for(99).unwrap().is_none());
        assert!(db.weather_for(99).unwrap().is_none());
        assert!(db.rank_for(1, 1, 2024).unwrap().is_none());
    }
}
