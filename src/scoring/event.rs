use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;
use log::debug;
use serde::{Deserialize, Serialize};

use super::card::CardResult;
use super::handicap::{HandicapBackfill, HandicapCalculator, previous_handicap, qualifying_history};
use super::primitives::round_to_stroke;
use super::ranking::dense_ranks;
use crate::config::LeagueSettings;
use crate::domain::{Award, Contestant, ContestantId, Event, EventId, PlayerId};
use crate::errors::LookupError;

/// One contestant's line in an event result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEntry {
    pub contestant_id: ContestantId,
    pub player_id: PlayerId,
    /// Strokes over the first `rounds` rounds, DNFs contributing nothing
    pub scratch_score: i32,
    pub handicap_score: Option<i32>,
    pub previous_handicap: Option<f64>,
    /// Handicap as of this event, for the next one
    pub handicap: Option<f64>,
    /// Initial handicap in effect after this event, including a back-fill
    pub initial_handicap: Option<f64>,
    /// Cards attempted, DNFs and extra rounds included
    pub round_count: u32,
    pub completed_rounds: u32,
    pub completed_event: bool,
    pub rank: usize,
    pub points_earned: Option<u32>,
    pub awards: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventResult {
    pub event_id: EventId,
    pub name: Option<String>,
    pub date: NaiveDateTime,
    pub rounds: u32,
    /// Rank order
    pub entries: Vec<EventEntry>,
}

impl EventResult {
    pub fn get(&self, contestant_id: ContestantId) -> Option<&EventEntry> {
        self.entries.iter().find(|e| e.contestant_id == contestant_id)
    }
}

/// League state an event is computed against
pub struct EventContext<'a> {
    pub settings: &'a LeagueSettings,
    /// Contestants with their initial handicap as of this event
    pub contestants: &'a HashMap<ContestantId, Contestant>,
    /// Resolved cards of every event dated on or before this one
    pub history: Vec<&'a CardResult>,
    /// Results of the preceding events, chronological
    pub prior: &'a [EventResult],
}

pub struct EventOutcome {
    pub result: EventResult,
    pub backfills: Vec<HandicapBackfill>,
}

#[derive(Debug, Default, Clone, Copy)]
struct RoundTally {
    round_count: u32,
    completed_rounds: u32,
    scratch_score: i32,
}

/// Ranking groups in output order. Equal keys share a rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum RankKey {
    Completed { handicap_score: i32 },
    Partial { round_count: Reverse<u32>, handicap_score: i32 },
    NoHandicap { scratch_score: i32 },
}

impl RankKey {
    fn of(entry: &EventEntry) -> Self {
        match entry.handicap_score {
            Some(handicap_score) if entry.completed_event => RankKey::Completed { handicap_score },
            Some(handicap_score) => RankKey::Partial {
                round_count: Reverse(entry.round_count),
                handicap_score,
            },
            None => RankKey::NoHandicap {
                scratch_score: entry.scratch_score,
            },
        }
    }
}

/// Score, rank and award points for one event.
///
/// `cards` are the event's resolved cards in play order.
pub fn compute_event(
    event: &Event,
    cards: &[CardResult],
    awards: &[Award],
    ctx: &EventContext<'_>,
) -> Result<EventOutcome, LookupError> {
    let tallies = tally_rounds(event, cards);
    let calculator = HandicapCalculator::new(ctx.settings);
    let award_names = group_awards(awards);

    let mut entries = Vec::with_capacity(tallies.len());
    let mut backfills = Vec::new();

    for (&contestant_id, tally) in &tallies {
        let contestant = ctx
            .contestants
            .get(&contestant_id)
            .ok_or(LookupError::Contestant(contestant_id))?;

        let previous = previous_handicap(ctx.prior, contestant_id, contestant.initial_handicap);
        let handicap_score = previous
            .map(|h| tally.scratch_score - round_to_stroke(h) * tally.round_count as i32);

        let history = qualifying_history(ctx.history.iter().copied(), contestant_id);
        let handicap = calculator.calculate(&history);

        let completed_before = completed_rounds_before(ctx.prior, contestant_id);
        let backfill = calculator.backfill_due(
            contestant.initial_handicap,
            completed_before,
            completed_before + tally.completed_rounds,
            handicap,
        );
        if let Some(handicap) = backfill {
            debug!(
                "Event {}: contestant {} reached {} rounds, initial handicap {}",
                event.id, contestant_id, ctx.settings.handicap_min_rounds, handicap
            );
            backfills.push(HandicapBackfill {
                contestant_id,
                event_id: event.id,
                handicap,
            });
        }

        entries.push(EventEntry {
            contestant_id,
            player_id: contestant.player_id,
            scratch_score: tally.scratch_score,
            handicap_score,
            previous_handicap: previous,
            handicap,
            initial_handicap: contestant.initial_handicap.or(backfill),
            round_count: tally.round_count,
            completed_rounds: tally.completed_rounds,
            completed_event: tally.round_count >= event.rounds,
            rank: 0,
            points_earned: None,
            awards: award_names.get(&contestant_id).cloned().unwrap_or_default(),
        });
    }

    rank_entries(&mut entries);
    assign_points(&mut entries, event.rounds, ctx.settings);

    debug!("Event {}: ranked {} contestants", event.id, entries.len());
    Ok(EventOutcome {
        result: EventResult {
            event_id: event.id,
            name: event.name.clone(),
            date: event.date,
            rounds: event.rounds,
            entries,
        },
        backfills,
    })
}

/// Per contestant: every card counts toward `round_count`, only the first
/// `rounds` cards feed the scratch total.
fn tally_rounds(event: &Event, cards: &[CardResult]) -> BTreeMap<ContestantId, RoundTally> {
    let mut tallies: BTreeMap<ContestantId, RoundTally> = BTreeMap::new();

    for card in cards {
        for entry in &card.entries {
            let tally = tallies.entry(entry.contestant_id).or_default();
            tally.round_count += 1;

            if let Some(strokes) = entry.outcome.scratch_score() {
                tally.completed_rounds += 1;
                if tally.round_count <= event.rounds {
                    tally.scratch_score += strokes;
                }
            }
        }
    }

    tallies
}

fn completed_rounds_before(prior: &[EventResult], contestant_id: ContestantId) -> u32 {
    prior
        .iter()
        .filter_map(|result| result.get(contestant_id))
        .map(|entry| entry.completed_rounds)
        .sum()
}

fn group_awards(awards: &[Award]) -> HashMap<ContestantId, Vec<String>> {
    let mut grouped: HashMap<ContestantId, Vec<String>> = HashMap::new();
    for award in awards {
        if let Some(name) = &award.name {
            grouped.entry(award.contestant_id).or_default().push(name.clone());
        }
    }
    grouped
}

fn rank_entries(entries: &mut [EventEntry]) {
    entries.sort_by_key(|entry| (RankKey::of(entry), entry.contestant_id));

    let keys: Vec<RankKey> = entries.iter().map(RankKey::of).collect();
    for (entry, rank) in entries.iter_mut().zip(dense_ranks(&keys)) {
        entry.rank = rank;
    }
}

fn assign_points(entries: &mut [EventEntry], rounds: u32, settings: &LeagueSettings) {
    for entry in entries.iter_mut() {
        entry.points_earned = match entry.handicap_score {
            None => None,
            Some(_) if entry.round_count < rounds => Some(settings.minimum_points()),
            Some(_) => Some(settings.points_for_rank(entry.rank)),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::{award, card, day, settings};

    fn contestants(initial: &[(ContestantId, Option<f64>)]) -> HashMap<ContestantId, Contestant> {
        initial
            .iter()
            .map(|&(id, initial_handicap)| {
                (
                    id,
                    Contestant {
                        id,
                        player_id: id + 100,
                        initial_handicap,
                    },
                )
            })
            .collect()
    }

    fn event(rounds: u32) -> Event {
        Event {
            id: 10,
            league_id: 1,
            name: None,
            date: day(5),
            rounds,
        }
    }

    fn run(
        rounds: u32,
        cards: &[CardResult],
        book: &HashMap<ContestantId, Contestant>,
        league: &LeagueSettings,
    ) -> EventOutcome {
        let ctx = EventContext {
            settings: league,
            contestants: book,
            history: cards.iter().collect(),
            prior: &[],
        };
        compute_event(&event(rounds), cards, &[], &ctx).unwrap()
    }

    #[test]
    fn test_incomplete_contestant_gets_minimum_points() {
        let league = settings(0.8, 2, 2, 5, &[10, 8, 6, 1]);
        let book = contestants(&[(1, Some(5.0))]);
        let cards = vec![CardResult::resolve(&card(1, 10, day(5), 54, &[(1, Some(58))]))];

        let outcome = run(2, &cards, &book, &league);
        let entry = &outcome.result.entries[0];

        assert_eq!(entry.handicap_score, Some(53));
        assert_eq!(entry.round_count, 1);
        assert!(!entry.completed_event);
        assert_eq!(entry.points_earned, Some(1));
        assert_eq!(entry.previous_handicap, Some(5.0));
    }

    #[test]
    fn test_groups_and_dense_ranks() {
        let league = settings(1.0, 2, 2, 5, &[10, 8, 6, 4, 2]);
        let book = contestants(&[
            (1, Some(2.0)),
            (2, Some(0.0)),
            (3, Some(-2.0)),
            (4, Some(1.0)),
            (5, None),
            (6, None),
        ]);
        let cards = vec![
            CardResult::resolve(&card(1, 10, day(5), 54, &[(1, Some(56)), (2, Some(54)), (3, Some(52)), (4, Some(55)), (5, Some(50)), (6, Some(60))])),
            CardResult::resolve(&card(2, 10, day(5), 54, &[(1, Some(56)), (2, Some(54)), (3, Some(58))])),
        ];

        let outcome = run(2, &cards, &book, &league);
        let summary: Vec<(ContestantId, usize, Option<i32>, Option<u32>)> = outcome
            .result
            .entries
            .iter()
            .map(|e| (e.contestant_id, e.rank, e.handicap_score, e.points_earned))
            .collect();

        assert_eq!(
            summary,
            vec![
                // completed: 112 - 2*2, 108 - 0, 110 + 2*2
                (1, 1, Some(108), Some(10)),
                (2, 1, Some(108), Some(10)),
                (3, 3, Some(114), Some(6)),
                // partial
                (4, 4, Some(54), Some(2)),
                // no handicap, by scratch
                (5, 5, None, None),
                (6, 6, None, None),
            ]
        );
    }

    #[test]
    fn test_partial_group_orders_by_round_count_first() {
        let league = settings(1.0, 2, 2, 5, &[10, 1]);
        let book = contestants(&[(1, Some(0.0)), (2, Some(0.0))]);
        let cards = vec![
            CardResult::resolve(&card(1, 10, day(5), 54, &[(1, Some(50)), (2, Some(60))])),
            CardResult::resolve(&card(2, 10, day(5), 54, &[(2, Some(60))])),
        ];

        let outcome = run(3, &cards, &book, &league);
        let order: Vec<ContestantId> = outcome.result.entries.iter().map(|e| e.contestant_id).collect();

        assert_eq!(order, vec![2, 1]);
        assert_eq!(outcome.result.entries[0].rank, 1);
        assert_eq!(outcome.result.entries[1].rank, 2);
    }

    #[test]
    fn test_extra_rounds_count_but_do_not_score() {
        let league = settings(1.0, 2, 2, 5, &[10, 1]);
        let book = contestants(&[(1, Some(1.0))]);
        let cards = vec![
            CardResult::resolve(&card(1, 10, day(5), 54, &[(1, Some(55))])),
            CardResult::resolve(&card(2, 10, day(5), 54, &[(1, Some(57))])),
            CardResult::resolve(&card(3, 10, day(5), 54, &[(1, Some(70))])),
        ];

        let entry = run(2, &cards, &book, &league).result.entries.remove(0);

        assert_eq!(entry.round_count, 3);
        assert_eq!(entry.completed_rounds, 3);
        assert_eq!(entry.scratch_score, 112);
        // all three attempts are handicapped: 112 - 1 * 3
        assert_eq!(entry.handicap_score, Some(109));
        assert!(entry.completed_event);
    }

    #[test]
    fn test_dnf_counts_as_attempt_only() {
        let league = settings(1.0, 2, 2, 5, &[10, 1]);
        let book = contestants(&[(1, Some(2.0))]);
        let cards = vec![
            CardResult::resolve(&card(1, 10, day(5), 54, &[(1, None)])),
            CardResult::resolve(&card(2, 10, day(5), 54, &[(1, Some(56))])),
        ];

        let entry = run(2, &cards, &book, &league).result.entries.remove(0);

        assert_eq!(entry.round_count, 2);
        assert_eq!(entry.completed_rounds, 1);
        assert_eq!(entry.scratch_score, 56);
        // the DNF is handicapped like any attempt: 56 - 2 * 2
        assert_eq!(entry.handicap_score, Some(52));
        assert!(entry.completed_event);
        assert_eq!(entry.handicap, Some(2.0));
    }

    #[test]
    fn test_first_timer_is_unranked_and_backfilled() {
        let league = settings(0.8, 2, 2, 5, &[10, 1]);
        let book = contestants(&[(1, None)]);
        let cards = vec![
            CardResult::resolve(&card(1, 10, day(5), 54, &[(1, Some(52))])),
            CardResult::resolve(&card(2, 10, day(5), 54, &[(1, Some(56))])),
        ];

        let outcome = run(2, &cards, &book, &league);
        let entry = &outcome.result.entries[0];

        assert_eq!(entry.handicap_score, None);
        assert_eq!(entry.points_earned, None);
        assert_eq!(entry.handicap, Some(0.0));
        assert_eq!(entry.initial_handicap, Some(0.0));
        assert_eq!(
            outcome.backfills,
            vec![HandicapBackfill {
                contestant_id: 1,
                event_id: 10,
                handicap: 0.0
            }]
        );
    }

    #[test]
    fn test_awards_attach_to_participants() {
        let league = settings(1.0, 2, 2, 5, &[10, 1]);
        let book = contestants(&[(1, Some(0.0)), (2, Some(0.0))]);
        let cards = vec![CardResult::resolve(&card(1, 10, day(5), 54, &[(1, Some(50)), (2, Some(52))]))];
        let awards = vec![award("Closest to pin", 2), award("Longest putt", 2), award("Ace", 9)];
        let ctx = EventContext {
            settings: &league,
            contestants: &book,
            history: cards.iter().collect(),
            prior: &[],
        };

        let outcome = compute_event(&event(1), &cards, &awards, &ctx).unwrap();

        assert!(outcome.result.get(1).unwrap().awards.is_empty());
        assert_eq!(outcome.result.get(2).unwrap().awards, vec!["Closest to pin", "Longest putt"]);
        assert!(outcome.result.get(9).is_none());
    }

    #[test]
    fn test_unknown_contestant_is_an_error() {
        let league = settings(1.0, 2, 2, 5, &[10, 1]);
        let book = contestants(&[(1, Some(0.0))]);
        let cards = vec![CardResult::resolve(&card(1, 10, day(5), 54, &[(1, Some(50)), (4, Some(52))]))];
        let ctx = EventContext {
            settings: &league,
            contestants: &book,
            history: cards.iter().collect(),
            prior: &[],
        };

        let error = compute_event(&event(1), &cards, &[], &ctx).err();
        assert_eq!(error, Some(LookupError::Contestant(4)));
    }
}
