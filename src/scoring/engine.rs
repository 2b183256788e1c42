use std::collections::HashMap;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::card::CardResult;
use super::event::{EventContext, EventResult, compute_event};
use super::handicap::HandicapBackfill;
use super::standings::{Standings, compute_standings};
use crate::domain::{Contestant, ContestantId, LeagueId, LeagueSnapshot};

/// Every derived view of one league, rebuilt from a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueComputation {
    pub league_id: LeagueId,
    /// Chronological
    pub events: Vec<EventResult>,
    pub standings: Standings,
    /// Initial handicaps to persist; nothing is written until committed
    pub backfills: Vec<HandicapBackfill>,
}

impl LeagueComputation {
    pub fn event(&self, event_id: i64) -> Option<&EventResult> {
        self.events.iter().find(|e| e.event_id == event_id)
    }
}

/// Resolve every card of the snapshot, in event order.
pub fn resolve_cards(snapshot: &LeagueSnapshot) -> Vec<Vec<CardResult>> {
    snapshot
        .events
        .iter()
        .map(|event| event.cards.iter().map(CardResult::resolve).collect())
        .collect()
}

/// Compute all events oldest first, then the standings.
///
/// Each event reads the results of the ones before it, so this is strictly
/// sequential within a league. The snapshot is never modified: back-fills
/// are applied to a working copy of the contestants and returned.
pub fn compute_league(snapshot: &LeagueSnapshot) -> Result<LeagueComputation> {
    let settings = &snapshot.league.settings;
    let cards = resolve_cards(snapshot);

    let mut contestants: HashMap<ContestantId, Contestant> = snapshot
        .league
        .contestants
        .iter()
        .map(|c| (c.id, c.clone()))
        .collect();
    let mut events: Vec<EventResult> = Vec::with_capacity(snapshot.events.len());
    let mut backfills = Vec::new();

    for (index, event) in snapshot.events.iter().enumerate() {
        let history: Vec<&CardResult> = snapshot
            .events_through(index)
            .flat_map(|position| cards[position].iter())
            .collect();

        let ctx = EventContext {
            settings,
            contestants: &contestants,
            history,
            prior: &events,
        };
        let outcome = compute_event(&event.event, &cards[index], &event.awards, &ctx)
            .with_context(|| format!("Failed to compute event {}", event.event.id))?;

        for backfill in &outcome.backfills {
            if let Some(contestant) = contestants.get_mut(&backfill.contestant_id) {
                contestant.initial_handicap = Some(backfill.handicap);
            }
        }
        debug!(
            "Computed event {} ({} contestants, {} back-fills)",
            event.event.id,
            outcome.result.entries.len(),
            outcome.backfills.len()
        );

        backfills.extend(outcome.backfills);
        events.push(outcome.result);
    }

    let standings = compute_standings(snapshot.league.id, settings, &events, &snapshot.players);
    info!(
        "League {}: {} events computed, {} players standing, {} pending back-fills",
        snapshot.league.id,
        events.len(),
        standings.rows.len(),
        backfills.len()
    );

    Ok(LeagueComputation {
        league_id: snapshot.league.id,
        events,
        standings,
        backfills,
    })
}
