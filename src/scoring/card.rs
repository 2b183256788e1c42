use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::primitives::{RoundOutcome, ScratchDelta};
use crate::domain::{CardId, CardSnapshot, ContestantId, EventId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardEntry {
    pub contestant_id: ContestantId,
    #[serde(flatten)]
    pub outcome: RoundOutcome,
}

/// Ranked outcome of one card: finishers by ascending scratch score, then
/// DNFs. Equal scores and DNFs are ordered by contestant id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardResult {
    pub card_id: CardId,
    pub event_id: EventId,
    pub date: NaiveDateTime,
    pub par: i32,
    pub entries: Vec<CardEntry>,
}

impl CardResult {
    pub fn resolve(snapshot: &CardSnapshot) -> Self {
        let mut entries: Vec<CardEntry> = snapshot
            .scores
            .iter()
            .map(|score| CardEntry {
                contestant_id: score.contestant_id,
                outcome: RoundOutcome::from_strokes(score.strokes, snapshot.par),
            })
            .collect();

        entries.sort_by_key(sort_key);

        Self {
            card_id: snapshot.card.id,
            event_id: snapshot.card.event_id,
            date: snapshot.card.date,
            par: snapshot.par,
            entries,
        }
    }

    pub fn entry(&self, contestant_id: ContestantId) -> Option<&CardEntry> {
        self.entries.iter().find(|e| e.contestant_id == contestant_id)
    }

    /// None when the contestant has no score here, false for a DNF.
    pub fn completed(&self, contestant_id: ContestantId) -> Option<bool> {
        self.entry(contestant_id).map(|e| e.outcome.is_finished())
    }

    pub fn scratch_delta(&self, contestant_id: ContestantId) -> Option<ScratchDelta> {
        self.entry(contestant_id).and_then(|e| e.outcome.scratch_delta())
    }
}

fn sort_key(entry: &CardEntry) -> (bool, i32, ContestantId) {
    match entry.outcome {
        RoundOutcome::Finished { scratch_score, .. } => (false, scratch_score, entry.contestant_id),
        RoundOutcome::Dnf => (true, 0, entry.contestant_id),
    }
}
