use anyhow::{Context, Result};

use super::connection::{DbPool, get_connection};
use super::{awards, cards, contestants, events, layouts, leagues, players, scores};
use crate::domain::{
    Award, Card, CardId, Contestant, ContestantId, Event, EventId, LayoutId, League, LeagueId,
    LeagueSummary, Player, PlayerId, Score,
};
use crate::errors::{LookupError, fetch_context};

/// Read access to league data, plus the single write the engine performs:
/// seeding a contestant's `initial_handicap`.
///
/// Callers must keep the data stable for the duration of one computation.
pub trait LeagueRepository {
    fn list_leagues(&self) -> Result<Vec<LeagueSummary>>;

    /// League with validated settings, contestants, and events ordered by
    /// date then id.
    fn league(&self, league_id: LeagueId) -> Result<League>;

    fn event(&self, event_id: EventId) -> Result<Event>;
    fn event_cards(&self, event_id: EventId) -> Result<Vec<Card>>;
    fn event_awards(&self, event_id: EventId) -> Result<Vec<Award>>;

    fn card(&self, card_id: CardId) -> Result<Card>;
    fn card_scores(&self, card_id: CardId) -> Result<Vec<Score>>;
    fn layout_par(&self, layout_id: LayoutId) -> Result<i32>;

    fn player(&self, player_id: PlayerId) -> Result<Player>;
    fn contestant(&self, contestant_id: ContestantId) -> Result<Contestant>;

    /// Store `handicap` only if the contestant has none yet. Returns whether
    /// a write happened.
    fn set_initial_handicap(&self, contestant_id: ContestantId, handicap: f64) -> Result<bool>;
}

/// SQLite-backed repository
#[derive(Clone)]
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn require<T>(found: Option<T>, missing: LookupError) -> Result<T> {
    found.ok_or_else(|| missing.into())
}

impl LeagueRepository for SqliteRepository {
    fn list_leagues(&self) -> Result<Vec<LeagueSummary>> {
        let mut conn = get_connection(&self.pool)?;
        leagues::list_summaries(&mut conn)
    }

    fn league(&self, league_id: LeagueId) -> Result<League> {
        let mut conn = get_connection(&self.pool)?;
        let record = leagues::find_by_id(&mut conn, league_id)
            .with_context(|| fetch_context("league", league_id))?;
        let (name, settings) = require(record, LookupError::League(league_id))?;

        Ok(League {
            id: league_id,
            name,
            settings,
            contestants: contestants::list_by_league(&mut conn, league_id)?,
            events: events::list_by_league(&mut conn, league_id)?,
        })
    }

    fn event(&self, event_id: EventId) -> Result<Event> {
        let mut conn = get_connection(&self.pool)?;
        require(events::find_by_id(&mut conn, event_id)?, LookupError::Event(event_id))
    }

    fn event_cards(&self, event_id: EventId) -> Result<Vec<Card>> {
        let mut conn = get_connection(&self.pool)?;
        cards::list_by_event(&mut conn, event_id)
            .with_context(|| fetch_context("cards of event", event_id))
    }

    fn event_awards(&self, event_id: EventId) -> Result<Vec<Award>> {
        let mut conn = get_connection(&self.pool)?;
        awards::list_by_event(&mut conn, event_id)
            .with_context(|| fetch_context("awards of event", event_id))
    }

    fn card(&self, card_id: CardId) -> Result<Card> {
        let mut conn = get_connection(&self.pool)?;
        require(cards::find_by_id(&mut conn, card_id)?, LookupError::Card(card_id))
    }

    fn card_scores(&self, card_id: CardId) -> Result<Vec<Score>> {
        let mut conn = get_connection(&self.pool)?;
        scores::list_by_card(&mut conn, card_id)
            .with_context(|| fetch_context("scores of card", card_id))
    }

    fn layout_par(&self, layout_id: LayoutId) -> Result<i32> {
        let mut conn = get_connection(&self.pool)?;
        require(layouts::par(&mut conn, layout_id)?, LookupError::Layout(layout_id))
    }

    fn player(&self, player_id: PlayerId) -> Result<Player> {
        let mut conn = get_connection(&self.pool)?;
        require(players::find_by_id(&mut conn, player_id)?, LookupError::Player(player_id))
    }

    fn contestant(&self, contestant_id: ContestantId) -> Result<Contestant> {
        let mut conn = get_connection(&self.pool)?;
        require(
            contestants::find_by_id(&mut conn, contestant_id)?,
            LookupError::Contestant(contestant_id),
        )
    }

    fn set_initial_handicap(&self, contestant_id: ContestantId, handicap: f64) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        if contestants::find_by_id(&mut conn, contestant_id)?.is_none() {
            return Err(LookupError::Contestant(contestant_id).into());
        }
        contestants::set_initial_handicap_if_unset(&mut conn, contestant_id, handicap)
    }
}
