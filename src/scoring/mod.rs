//! Handicap and ranking engine.
//!
//! Data flows bottom-up: [`primitives`] score a single round, [`card`]
//! ranks one card, [`handicap`] derives rolling handicaps from resolved
//! cards, [`event`] ranks an event and awards points, [`standings`] folds
//! event results into the league table. [`engine`] drives the whole league
//! in chronological order.

pub mod card;
pub mod engine;
pub mod event;
pub mod handicap;
pub mod primitives;
pub mod ranking;
pub mod standings;

pub use card::{CardEntry, CardResult};
pub use engine::{LeagueComputation, compute_league, resolve_cards};
pub use event::{EventEntry, EventResult};
pub use handicap::{HandicapBackfill, HandicapCalculator};
pub use primitives::{RoundOutcome, ScratchDelta, scratch_delta};
pub use standings::{Standings, StandingsRow};
