use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::card::CardResult;
use super::event::EventResult;
use super::primitives::{ScratchDelta, round_to_hundredths};
use crate::config::LeagueSettings;
use crate::domain::{CardId, ContestantId, EventId};

/// A completed round counted toward a handicap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualifyingRound {
    pub card_id: CardId,
    pub date: NaiveDateTime,
    pub scratch_delta: ScratchDelta,
}

/// Pending write of a contestant's first established handicap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandicapBackfill {
    pub contestant_id: ContestantId,
    pub event_id: EventId,
    pub handicap: f64,
}

/// Completed rounds of `contestant_id` among `cards`, most recent first.
/// DNFs and cards without a score for the contestant are skipped.
pub fn qualifying_history<'a>(
    cards: impl IntoIterator<Item = &'a CardResult>,
    contestant_id: ContestantId,
) -> Vec<QualifyingRound> {
    let mut rounds: Vec<QualifyingRound> = cards
        .into_iter()
        .filter_map(|card| {
            card.scratch_delta(contestant_id).map(|scratch_delta| QualifyingRound {
                card_id: card.card_id,
                date: card.date,
                scratch_delta,
            })
        })
        .collect();

    rounds.sort_by(|a, b| (b.date, b.card_id).cmp(&(a.date, a.card_id)));
    rounds
}

/// Rolling best-N-of-M handicap for one league's configuration
pub struct HandicapCalculator<'a> {
    settings: &'a LeagueSettings,
}

impl<'a> HandicapCalculator<'a> {
    pub fn new(settings: &'a LeagueSettings) -> Self {
        Self { settings }
    }

    /// Rounds that feed the average: the `handicap_min_rounds_avg` lowest
    /// deltas among the `handicap_max_rounds_avg` most recent rounds.
    /// `history` must be most recent first.
    pub fn select_best<'h>(&self, history: &'h [QualifyingRound]) -> Vec<&'h QualifyingRound> {
        let window = history.len().min(self.settings.handicap_max_rounds_avg as usize);
        let mut recent: Vec<&QualifyingRound> = history[..window].iter().collect();

        // stable: equal deltas keep the more recent round first
        recent.sort_by_key(|round| round.scratch_delta);
        recent.truncate(self.settings.handicap_min_rounds_avg as usize);
        recent
    }

    /// None when there is no qualifying history.
    pub fn calculate(&self, history: &[QualifyingRound]) -> Option<f64> {
        let best = self.select_best(history);
        if best.is_empty() {
            return None;
        }

        let total: i32 = best.iter().map(|round| round.scratch_delta.value()).sum();
        let mean = total as f64 / best.len() as f64;
        Some(round_to_hundredths(mean * self.settings.handicap_multiplier))
    }

    /// The new handicap becomes the contestant's initial handicap in the
    /// event where their completed rounds first reach `handicap_min_rounds`,
    /// provided none is set yet.
    ///
    /// An event with several rounds can carry the count past the threshold
    /// without ever landing on it (1 before, 3 after with a minimum of 2),
    /// so this fires on crossing the threshold rather than on an exact
    /// match: `completed_before < min <= completed_after`.
    pub fn backfill_due(
        &self,
        initial_handicap: Option<f64>,
        completed_before: u32,
        completed_after: u32,
        handicap: Option<f64>,
    ) -> Option<f64> {
        let threshold = self.settings.handicap_min_rounds;
        let crossed = completed_before < threshold && completed_after >= threshold;

        match (initial_handicap, handicap) {
            (None, Some(handicap)) if crossed => Some(handicap),
            _ => None,
        }
    }
}

/// Handicap the contestant carried into the current event: the newest
/// handicap among `prior` results, else `initial_handicap`.
///
/// `prior` must be chronological.
pub fn previous_handicap(
    prior: &[EventResult],
    contestant_id: ContestantId,
    initial_handicap: Option<f64>,
) -> Option<f64> {
    for result in prior.iter().rev() {
        if let Some(handicap) = result.get(contestant_id).and_then(|entry| entry.handicap) {
            return Some(handicap);
        }
    }
    initial_handicap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::{card, day, settings};

    fn history_of(totals: &[Option<i32>], par: i32) -> Vec<QualifyingRound> {
        let cards: Vec<CardResult> = totals
            .iter()
            .enumerate()
            .map(|(i, &strokes)| {
                CardResult::resolve(&card(i as i64 + 1, 1, day(i as u32), par, &[(7, strokes)]))
            })
            .collect();
        qualifying_history(&cards, 7)
    }

    #[test]
    fn test_documented_example() {
        let league = settings(0.8, 2, 2, 5, &[10, 1]);
        let history = history_of(&[Some(50), Some(52), Some(55), Some(49), Some(60)], 54);

        let best: Vec<i32> = HandicapCalculator::new(&league)
            .select_best(&history)
            .iter()
            .map(|r| r.scratch_delta.value())
            .collect();

        assert_eq!(best, vec![-5, -4]);
        assert_eq!(HandicapCalculator::new(&league).calculate(&history), Some(-3.6));
    }

    #[test]
    fn test_window_limits_to_most_recent() {
        // max window 5, history of 8: the three oldest rounds are the best but out of range
        let league = settings(1.0, 2, 2, 5, &[1]);
        let totals = [40, 41, 42, 60, 58, 59, 57, 61].map(Some);
        let history = history_of(&totals, 54);
        assert_eq!(history.len(), 8);

        let calculator = HandicapCalculator::new(&league);
        let best: Vec<CardId> = calculator.select_best(&history).iter().map(|r| r.card_id).collect();

        assert_eq!(best, vec![7, 5]);
        assert_eq!(calculator.calculate(&history), Some(3.5));
    }

    #[test]
    fn test_fewer_rounds_than_average() {
        let league = settings(0.8, 2, 5, 8, &[1]);
        let history = history_of(&[Some(57), Some(55)], 54);

        // mean of +3 and +1 is 2.0
        assert_eq!(HandicapCalculator::new(&league).calculate(&history), Some(1.6));
    }

    #[test]
    fn test_dnf_rounds_never_qualify() {
        let league = settings(1.0, 2, 2, 5, &[1]);
        let history = history_of(&[None, Some(56), None], 54);

        assert_eq!(history.len(), 1);
        assert_eq!(HandicapCalculator::new(&league).calculate(&history), Some(2.0));
        assert_eq!(HandicapCalculator::new(&league).calculate(&history_of(&[None], 54)), None);
    }

    #[test]
    fn test_backfill_fires_once_at_threshold() {
        let league = settings(0.8, 2, 2, 5, &[1]);
        let calculator = HandicapCalculator::new(&league);

        assert_eq!(calculator.backfill_due(None, 0, 1, Some(2.0)), None);
        assert_eq!(calculator.backfill_due(None, 1, 2, Some(2.0)), Some(2.0));
        assert_eq!(calculator.backfill_due(None, 0, 3, Some(1.5)), Some(1.5));
        assert_eq!(calculator.backfill_due(None, 2, 3, Some(2.0)), None);
        assert_eq!(calculator.backfill_due(Some(4.0), 1, 2, Some(2.0)), None);
        assert_eq!(calculator.backfill_due(None, 1, 2, None), None);
    }
}
