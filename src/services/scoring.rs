use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::cache::ResultCache;
use crate::database::LeagueRepository;
use crate::domain::{CardId, ContestantId, EventId, LeagueId, LeagueSnapshot, LeagueSummary};
use crate::errors::LookupError;
use crate::scoring::{CardResult, EventResult, LeagueComputation, Standings, compute_league};

/// A resolved card with what a scorecard view shows around it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardView {
    pub result: CardResult,
    pub date: String,
    pub event_name: String,
    /// Participants by their shortest unambiguous name, in score order
    pub players: Vec<String>,
}

/// Front door to the engine: snapshot, compute, cache, commit.
pub struct ScoringService<R: LeagueRepository> {
    repo: R,
    cache: Option<ResultCache>,
}

impl<R: LeagueRepository> ScoringService<R> {
    pub fn new(repo: R, cache: Option<ResultCache>) -> Self {
        Self { repo, cache }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn list_leagues(&self) -> Result<Vec<LeagueSummary>> {
        self.repo.list_leagues()
    }

    /// Every view of the league, from cache when available
    pub fn league_computation(&self, league_id: LeagueId) -> Result<LeagueComputation> {
        if let Some(cache) = &self.cache {
            match cache.load_league::<LeagueComputation>(league_id) {
                Ok(Some(cached)) => {
                    info!("Cache hit for league {}", league_id);
                    return Ok(cached);
                }
                Ok(None) => info!("Cache miss for league {}", league_id),
                Err(e) => warn!("Ignoring unreadable cache for league {}: {:#}", league_id, e),
            }
        }

        let computation = self.compute(league_id)?;
        if let Some(cache) = &self.cache {
            cache.save_league(league_id, &computation)?;
        }
        Ok(computation)
    }

    pub fn standings(&self, league_id: LeagueId) -> Result<Standings> {
        Ok(self.league_computation(league_id)?.standings)
    }

    pub fn event_results(&self, league_id: LeagueId) -> Result<Vec<EventResult>> {
        Ok(self.league_computation(league_id)?.events)
    }

    pub fn event_result(&self, event_id: EventId) -> Result<EventResult> {
        let event = self.repo.event(event_id)?;
        let computation = self.league_computation(event.league_id)?;

        computation
            .event(event_id)
            .cloned()
            .ok_or_else(|| LookupError::Event(event_id).into())
    }

    pub fn card_view(&self, card_id: CardId) -> Result<CardView> {
        let card = self.repo.card(card_id)?;
        let event = self.repo.event(card.event_id)?;
        let snapshot = LeagueSnapshot::load(&self.repo, event.league_id)?;

        let card_snapshot = snapshot
            .event_index(event.id)
            .and_then(|index| snapshot.events[index].cards.iter().find(|c| c.card.id == card_id))
            .ok_or(LookupError::Card(card_id))?;

        let result = CardResult::resolve(card_snapshot);
        let players = snapshot.player_names(result.entries.iter().map(|e| e.contestant_id));

        Ok(CardView {
            result,
            date: card.render_date(),
            event_name: event.display_name(),
            players,
        })
    }

    /// Up to `limit` most recent cards the contestant played, DNFs included,
    /// as of the event's date.
    pub fn latest_cards(
        &self,
        event_id: EventId,
        contestant_id: ContestantId,
        limit: usize,
    ) -> Result<Vec<CardResult>> {
        let event = self.repo.event(event_id)?;
        let snapshot = LeagueSnapshot::load(&self.repo, event.league_id)?;

        let index = snapshot
            .event_index(event_id)
            .ok_or(LookupError::Event(event_id))?;
        if !snapshot.league.contestants.iter().any(|c| c.id == contestant_id) {
            return Err(LookupError::Contestant(contestant_id).into());
        }

        Ok(snapshot
            .latest_cards(index, contestant_id, limit)
            .into_iter()
            .map(CardResult::resolve)
            .collect())
    }

    /// Persist pending initial handicaps. Each is written only if the
    /// contestant still has none, so repeated commits are harmless.
    /// Returns the number of contestants updated.
    pub fn commit(&self, league_id: LeagueId) -> Result<usize> {
        let computation = self.compute(league_id)?;

        let mut written = 0;
        for backfill in &computation.backfills {
            let stored = self
                .repo
                .set_initial_handicap(backfill.contestant_id, backfill.handicap)
                .with_context(|| {
                    format!("Failed to store initial handicap of contestant {}", backfill.contestant_id)
                })?;
            if stored {
                written += 1;
            }
        }

        self.invalidate(league_id)?;
        info!(
            "League {}: committed {} of {} pending back-fills",
            league_id,
            written,
            computation.backfills.len()
        );
        Ok(written)
    }

    /// Drop cached views, commit back-fills and rebuild the cache
    pub fn refresh(&self, league_id: LeagueId) -> Result<LeagueComputation> {
        self.invalidate(league_id)?;
        self.commit(league_id)?;
        self.league_computation(league_id)
    }

    pub fn invalidate(&self, league_id: LeagueId) -> Result<()> {
        match &self.cache {
            Some(cache) => cache.invalidate_league(league_id),
            None => Ok(()),
        }
    }

    fn compute(&self, league_id: LeagueId) -> Result<LeagueComputation> {
        let snapshot = LeagueSnapshot::load(&self.repo, league_id)?;
        compute_league(&snapshot)
    }
}
