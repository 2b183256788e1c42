//! Builders for in-memory leagues used across the scoring tests.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};

use super::models::{Award, Card, Contestant, Event, League, Player, Score};
use super::snapshot::{CardSnapshot, EventSnapshot, LeagueSnapshot};
use crate::config::LeagueSettings;

pub fn day(n: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2016, 1, 1)
        .and_then(|d| d.checked_add_days(chrono::Days::new(n as u64)))
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .unwrap()
}

pub fn card(id: i64, event_id: i64, date: NaiveDateTime, par: i32, scores: &[(i64, Option<i32>)]) -> CardSnapshot {
    CardSnapshot {
        card: Card {
            id,
            event_id,
            course_id: 1,
            layout_id: 1,
            date,
        },
        par,
        scores: scores
            .iter()
            .map(|&(contestant_id, strokes)| Score { contestant_id, strokes })
            .collect(),
    }
}

pub fn event(id: i64, date: NaiveDateTime, rounds: u32, cards: Vec<CardSnapshot>) -> EventSnapshot {
    EventSnapshot {
        event: Event {
            id,
            league_id: 1,
            name: Some(format!("Day {}", id)),
            date,
            rounds,
        },
        cards,
        awards: Vec::new(),
    }
}

pub fn award(name: &str, contestant_id: i64) -> Award {
    Award {
        name: Some(name.to_string()),
        contestant_id,
    }
}

/// Contestant `n` belongs to player `n`
pub fn league(
    settings: LeagueSettings,
    contestants: &[(i64, Option<f64>)],
    events: Vec<EventSnapshot>,
) -> LeagueSnapshot {
    let players: HashMap<i64, Player> = contestants
        .iter()
        .map(|&(id, _)| {
            (
                id,
                Player {
                    id,
                    first_name: format!("Player{}", id),
                    last_name: "Test".to_string(),
                    email_address: None,
                    phone_number: None,
                    pdga_number: None,
                },
            )
        })
        .collect();

    let league = League {
        id: 1,
        name: "Test League".to_string(),
        settings,
        contestants: contestants
            .iter()
            .map(|&(id, initial_handicap)| Contestant {
                id,
                player_id: id,
                initial_handicap,
            })
            .collect(),
        events: events.iter().map(|e| e.event.clone()).collect(),
    };

    LeagueSnapshot::new(league, players, events).unwrap()
}

pub fn settings(multiplier: f64, min_rounds: u32, min_avg: u32, max_avg: u32, points: &[u32]) -> LeagueSettings {
    LeagueSettings {
        handicap_multiplier: multiplier,
        handicap_min_rounds: min_rounds,
        handicap_min_rounds_avg: min_avg,
        handicap_max_rounds_avg: max_avg,
        league_points: points.to_vec(),
    }
}
