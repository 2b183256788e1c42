use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use log::{info, warn};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::cache::ResultCache;
use crate::config::{AppConfig, LeagueSettings};
use crate::database::{self, DbConn, DbPool};
use crate::domain::{
    Award, Card, CardId, Contestant, Course, CourseId, Event, EventId, LayoutId, LeagueId, Player,
    Score,
};

/// A self-contained league dump: players and courses shared by any number
/// of leagues. Every entity carries its own id.
#[derive(Debug, Clone, Deserialize)]
pub struct LeagueFixture {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub leagues: Vec<LeagueFixtureEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueFixtureEntry {
    pub id: LeagueId,
    pub name: String,
    /// Falls back to the configured default league settings
    #[serde(default)]
    pub settings: Option<LeagueSettings>,
    #[serde(default)]
    pub contestants: Vec<Contestant>,
    #[serde(default)]
    pub events: Vec<EventFixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventFixture {
    pub id: EventId,
    #[serde(default)]
    pub name: Option<String>,
    pub date: NaiveDateTime,
    pub rounds: u32,
    #[serde(default)]
    pub cards: Vec<CardFixture>,
    #[serde(default)]
    pub awards: Vec<Award>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardFixture {
    pub id: CardId,
    pub course_id: CourseId,
    pub layout_id: LayoutId,
    /// Defaults to the event date
    #[serde(default)]
    pub date: Option<NaiveDateTime>,
    #[serde(default)]
    pub scores: Vec<Score>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub players: usize,
    pub courses: usize,
    pub leagues: usize,
    pub events: usize,
    pub cards: usize,
    pub scores: usize,
}

pub struct ImportService {
    pool: DbPool,
    config: AppConfig,
    cache: Option<ResultCache>,
}

impl ImportService {
    pub fn new(pool: DbPool, config: AppConfig, cache: Option<ResultCache>) -> Self {
        Self { pool, config, cache }
    }

    pub fn run<P: AsRef<Path>>(&self, path: P) -> Result<ImportSummary> {
        let path = path.as_ref();
        info!("=== Importing {} ===", path.display());

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;
        let fixture: LeagueFixture = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse fixture {}", path.display()))?;

        self.import(&fixture)
    }

    /// Validate and store `fixture` atomically, then drop cached views of
    /// every league it touched.
    pub fn import(&self, fixture: &LeagueFixture) -> Result<ImportSummary> {
        self.validate(fixture)?;

        let mut conn = database::get_connection(&self.pool)?;
        if !database::setup::has_schema(&mut conn)? {
            database::setup::reset_schema(&mut conn)?;
        }

        conn.execute_batch("BEGIN").context("Failed to open import transaction")?;
        let summary = match self.insert_all(&mut conn, fixture) {
            Ok(summary) => summary,
            Err(e) => {
                if let Err(rollback) = conn.execute_batch("ROLLBACK") {
                    warn!("Rollback after failed import also failed: {}", rollback);
                }
                return Err(e);
            }
        };
        conn.execute_batch("COMMIT").context("Failed to commit import")?;

        if let Some(cache) = &self.cache {
            for league in &fixture.leagues {
                cache.invalidate_league(league.id)?;
            }
        }

        info!(
            "Imported {} players, {} courses, {} leagues ({} events, {} cards, {} scores)",
            summary.players,
            summary.courses,
            summary.leagues,
            summary.events,
            summary.cards,
            summary.scores
        );
        Ok(summary)
    }

    fn settings_for(&self, league: &LeagueFixtureEntry) -> LeagueSettings {
        league
            .settings
            .clone()
            .unwrap_or_else(|| self.config.default_league.clone())
    }

    fn validate(&self, fixture: &LeagueFixture) -> Result<()> {
        for league in &fixture.leagues {
            self.settings_for(league)
                .validate()
                .with_context(|| format!("League {} has an invalid configuration", league.id))?;

            let contestants: HashSet<i64> = league.contestants.iter().map(|c| c.id).collect();
            for event in &league.events {
                if event.rounds == 0 {
                    bail!("Event {} must require at least one round", event.id);
                }
                for card in &event.cards {
                    if let Some(score) = card
                        .scores
                        .iter()
                        .find(|s| !contestants.contains(&s.contestant_id))
                    {
                        bail!(
                            "Card {} scores contestant {} who is not in league {}",
                            card.id,
                            score.contestant_id,
                            league.id
                        );
                    }
                }
            }
        }
        Ok(())
    }

    fn insert_all(&self, conn: &mut DbConn, fixture: &LeagueFixture) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();

        for player in &fixture.players {
            database::players::insert_player(conn, player)?;
            summary.players += 1;
        }
        for course in &fixture.courses {
            database::layouts::insert_course(conn, course)?;
            summary.courses += 1;
        }

        for league in &fixture.leagues {
            database::leagues::insert_league(conn, league.id, &league.name, &self.settings_for(league))?;
            for contestant in &league.contestants {
                database::contestants::insert_contestant(conn, league.id, contestant)?;
            }

            for fixture_event in &league.events {
                let event = Event {
                    id: fixture_event.id,
                    league_id: league.id,
                    name: fixture_event.name.clone(),
                    date: fixture_event.date,
                    rounds: fixture_event.rounds,
                };
                database::events::insert_event(conn, &event)?;
                summary.events += 1;

                for fixture_card in &fixture_event.cards {
                    let card = Card {
                        id: fixture_card.id,
                        event_id: event.id,
                        course_id: fixture_card.course_id,
                        layout_id: fixture_card.layout_id,
                        date: fixture_card.date.unwrap_or(event.date),
                    };
                    database::cards::insert_card(conn, &card)?;
                    summary.cards += 1;

                    for score in &fixture_card.scores {
                        database::scores::insert_score(conn, card.id, score)?;
                        summary.scores += 1;
                    }
                }

                for award in &fixture_event.awards {
                    database::awards::insert_award(conn, event.id, award)?;
                }
            }
            summary.leagues += 1;
        }

        Ok(summary)
    }
}
