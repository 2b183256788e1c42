use std::fmt;

use serde::{Deserialize, Serialize};

/// Strokes over (positive) or under (negative) layout par.
///
/// Renders with an explicit sign for even and over-par rounds: `-3`, `+0`,
/// `+2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScratchDelta(pub i32);

impl ScratchDelta {
    pub fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ScratchDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            write!(f, "{}", self.0)
        } else {
            write!(f, "+{}", self.0)
        }
    }
}

impl From<ScratchDelta> for String {
    fn from(delta: ScratchDelta) -> Self {
        delta.to_string()
    }
}

impl TryFrom<String> for ScratchDelta {
    type Error = std::num::ParseIntError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.trim_start_matches('+').parse().map(ScratchDelta)
    }
}

pub fn scratch_delta(strokes: i32, par: i32) -> ScratchDelta {
    ScratchDelta(strokes - par)
}

/// How one contestant's round on a card ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum RoundOutcome {
    #[serde(rename = "finished")]
    Finished {
        scratch_score: i32,
        scratch_delta: ScratchDelta,
    },
    /// Attempted without a valid stroke count
    #[serde(rename = "DNF")]
    Dnf,
}

impl RoundOutcome {
    pub fn from_strokes(strokes: Option<i32>, par: i32) -> Self {
        match strokes {
            Some(strokes) => RoundOutcome::Finished {
                scratch_score: strokes,
                scratch_delta: scratch_delta(strokes, par),
            },
            None => RoundOutcome::Dnf,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, RoundOutcome::Finished { .. })
    }

    pub fn scratch_score(&self) -> Option<i32> {
        match self {
            RoundOutcome::Finished { scratch_score, .. } => Some(*scratch_score),
            RoundOutcome::Dnf => None,
        }
    }

    pub fn scratch_delta(&self) -> Option<ScratchDelta> {
        match self {
            RoundOutcome::Finished { scratch_delta, .. } => Some(*scratch_delta),
            RoundOutcome::Dnf => None,
        }
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundOutcome::Finished {
                scratch_score,
                scratch_delta,
            } => write!(f, "{} ({})", scratch_score, scratch_delta),
            RoundOutcome::Dnf => write!(f, "DNF"),
        }
    }
}

/// Half away from zero, to two decimal places
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Half away from zero, to a whole stroke
pub fn round_to_stroke(value: f64) -> i32 {
    value.round() as i32
}
