pub mod models;
pub mod snapshot;

#[cfg(test)]
pub mod testing;

pub use models::*;
pub use snapshot::{CardSnapshot, EventSnapshot, LeagueSnapshot};
