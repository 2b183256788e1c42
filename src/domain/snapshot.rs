use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result, bail};
use log::{debug, info};

use super::models::{Award, Card, ContestantId, Event, League, LeagueId, Player, PlayerId, Score};
use crate::database::LeagueRepository;
use crate::errors::{LookupError, fetch_context};

/// A card together with its layout par and scores
#[derive(Debug, Clone)]
pub struct CardSnapshot {
    pub card: Card,
    pub par: i32,
    pub scores: Vec<Score>,
}

#[derive(Debug, Clone)]
pub struct EventSnapshot {
    pub event: Event,
    /// Ordered by date, then card id
    pub cards: Vec<CardSnapshot>,
    pub awards: Vec<Award>,
}

/// Everything one league computation reads, fetched up front so the
/// engine works on a single consistent view.
#[derive(Debug, Clone)]
pub struct LeagueSnapshot {
    pub league: League,
    pub players: HashMap<PlayerId, Player>,
    /// Chronological: date, then event id
    pub events: Vec<EventSnapshot>,
}

impl LeagueSnapshot {
    pub fn load<R: LeagueRepository + ?Sized>(repo: &R, league_id: LeagueId) -> Result<Self> {
        let league = repo
            .league(league_id)
            .with_context(|| fetch_context("league", league_id))?;

        let players = load_players(repo, &league)?;
        let mut events = Vec::with_capacity(league.events.len());
        for event in &league.events {
            events.push(load_event(repo, event)?);
        }

        let snapshot = Self::new(league, players, events)?;
        info!(
            "Loaded league {} ({} contestants, {} events)",
            snapshot.league.id,
            snapshot.league.contestants.len(),
            snapshot.events.len()
        );
        Ok(snapshot)
    }

    /// Assemble a snapshot, enforcing ordering and referential invariants.
    pub fn new(
        league: League,
        players: HashMap<PlayerId, Player>,
        mut events: Vec<EventSnapshot>,
    ) -> Result<Self> {
        events.sort_by(|a, b| (a.event.date, a.event.id).cmp(&(b.event.date, b.event.id)));
        for event in &mut events {
            event
                .cards
                .sort_by(|a, b| (a.card.date, a.card.id).cmp(&(b.card.date, b.card.id)));
        }

        let snapshot = Self { league, players, events };
        snapshot.check_references()?;
        Ok(snapshot)
    }

    fn check_references(&self) -> Result<()> {
        for contestant in &self.league.contestants {
            if !self.players.contains_key(&contestant.player_id) {
                return Err(LookupError::Player(contestant.player_id).into());
            }
        }

        let known: HashSet<ContestantId> =
            self.league.contestants.iter().map(|c| c.id).collect();

        for event in &self.events {
            for card in &event.cards {
                let mut seen = HashSet::new();
                for score in &card.scores {
                    if !known.contains(&score.contestant_id) {
                        return Err(LookupError::Contestant(score.contestant_id))
                            .with_context(|| fetch_context("scores of card", card.card.id));
                    }
                    if !seen.insert(score.contestant_id) {
                        bail!(
                            "Card {} holds more than one score for contestant {}",
                            card.card.id,
                            score.contestant_id
                        );
                    }
                }
            }
        }
        Ok(())
    }

    pub fn event_index(&self, event_id: i64) -> Option<usize> {
        self.events.iter().position(|e| e.event.id == event_id)
    }

    /// Positions of every event dated on or before the event at `index`,
    /// same-day events included.
    pub fn events_through(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let cutoff = self.events[index].event.date;
        self.events
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.event.date <= cutoff)
            .map(|(position, _)| position)
    }

    /// Cards from every event dated on or before the event at `index`
    pub fn cards_through(&self, index: usize) -> impl Iterator<Item = &CardSnapshot> {
        self.events_through(index)
            .flat_map(move |position| self.events[position].cards.iter())
    }

    /// Up to `n` most recent cards, as of the event at `index`, on which
    /// the contestant holds a score (DNF included).
    pub fn latest_cards(
        &self,
        index: usize,
        contestant_id: ContestantId,
        n: usize,
    ) -> Vec<&CardSnapshot> {
        let mut cards: Vec<&CardSnapshot> = self
            .cards_through(index)
            .filter(|c| c.scores.iter().any(|s| s.contestant_id == contestant_id))
            .collect();
        cards.sort_by(|a, b| (b.card.date, b.card.id).cmp(&(a.card.date, a.card.id)));
        cards.truncate(n);
        cards
    }

    /// Shortest unambiguous names of the given contestants, in order
    pub fn player_names(&self, contestants: impl IntoIterator<Item = ContestantId>) -> Vec<String> {
        let roster: Vec<Player> = self.players.values().cloned().collect();
        contestants
            .into_iter()
            .filter_map(|id| self.player_of(id))
            .map(|p| p.shortest_name(&roster))
            .collect()
    }

    pub fn player_of(&self, contestant_id: ContestantId) -> Option<&Player> {
        self.league
            .contestants
            .iter()
            .find(|c| c.id == contestant_id)
            .and_then(|c| self.players.get(&c.player_id))
    }
}

fn load_players<R: LeagueRepository + ?Sized>(
    repo: &R,
    league: &League,
) -> Result<HashMap<PlayerId, Player>> {
    let mut players = HashMap::new();
    for contestant in &league.contestants {
        if players.contains_key(&contestant.player_id) {
            continue;
        }
        let player = repo
            .player(contestant.player_id)
            .with_context(|| fetch_context("player", contestant.player_id))?;
        players.insert(player.id, player);
    }
    Ok(players)
}

fn load_event<R: LeagueRepository + ?Sized>(repo: &R, event: &Event) -> Result<EventSnapshot> {
    let mut cards = Vec::new();
    for card in repo.event_cards(event.id)? {
        let par = repo
            .layout_par(card.layout_id)
            .with_context(|| fetch_context("layout of card", card.id))?;
        let scores = repo.card_scores(card.id)?;
        cards.push(CardSnapshot { card, par, scores });
    }

    let awards = repo.event_awards(event.id)?;
    debug!("Event {}: {} cards, {} awards", event.id, cards.len(), awards.len());

    Ok(EventSnapshot {
        event: event.clone(),
        cards,
        awards,
    })
}
