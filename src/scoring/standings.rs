use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::event::EventResult;
use super::ranking::dense_ranks;
use crate::config::LeagueSettings;
use crate::domain::{LeagueId, Player, PlayerId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub player_id: PlayerId,
    pub name: String,
    pub points: u32,
    /// Most recent handicap the player earned
    pub handicap: Option<f64>,
    pub initial_handicap: Option<f64>,
    pub rank: usize,
    pub events_attended: u32,
    pub rounds_played: u32,
    /// False until the player has an initial handicap or enough rounds
    pub valid_hc: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    pub league_id: LeagueId,
    /// Rank order
    pub rows: Vec<StandingsRow>,
}

impl Standings {
    pub fn get(&self, player_id: PlayerId) -> Option<&StandingsRow> {
        self.rows.iter().find(|r| r.player_id == player_id)
    }
}

#[derive(Default)]
struct Accumulator {
    points: u32,
    handicap: Option<f64>,
    initial_handicap: Option<f64>,
    events_attended: u32,
    rounds_played: u32,
}

/// Fold chronological event results into league standings.
pub fn compute_standings(
    league_id: LeagueId,
    settings: &LeagueSettings,
    events: &[EventResult],
    players: &HashMap<PlayerId, Player>,
) -> Standings {
    let mut totals: BTreeMap<PlayerId, Accumulator> = BTreeMap::new();

    for event in events {
        for entry in &event.entries {
            let acc = totals.entry(entry.player_id).or_default();
            acc.points += entry.points_earned.unwrap_or(0);
            acc.events_attended += 1;
            acc.rounds_played += entry.round_count;
            if entry.handicap.is_some() {
                acc.handicap = entry.handicap;
            }
            if entry.initial_handicap.is_some() {
                acc.initial_handicap = entry.initial_handicap;
            }
        }
    }

    let roster: Vec<Player> = players.values().cloned().collect();
    let mut rows: Vec<StandingsRow> = totals
        .into_iter()
        .map(|(player_id, acc)| StandingsRow {
            player_id,
            name: players
                .get(&player_id)
                .map(|p| p.shortest_name(&roster))
                .unwrap_or_else(|| format!("Player {}", player_id)),
            points: acc.points,
            handicap: acc.handicap,
            initial_handicap: acc.initial_handicap,
            rank: 0,
            events_attended: acc.events_attended,
            rounds_played: acc.rounds_played,
            valid_hc: acc.initial_handicap.is_some()
                || acc.rounds_played >= settings.handicap_min_rounds,
        })
        .collect();

    rows.sort_by_key(|row| (Reverse(row.points), row.player_id));
    let points: Vec<u32> = rows.iter().map(|r| r.points).collect();
    for (row, rank) in rows.iter_mut().zip(dense_ranks(&points)) {
        row.rank = rank;
    }

    Standings { league_id, rows }
}
