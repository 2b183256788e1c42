use serde::Serialize;

use crate::domain::{LeagueId, LeagueSummary};
use crate::scoring::{CardResult, EventResult};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueListItem {
    pub league_id: LeagueId,
    pub name: String,
    pub contestants: usize,
    pub events: usize,
}

impl From<LeagueSummary> for LeagueListItem {
    fn from(summary: LeagueSummary) -> Self {
        Self {
            league_id: summary.id,
            name: summary.name,
            contestants: summary.contestants,
            events: summary.events,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueListResponse {
    pub items: Vec<LeagueListItem>,
    pub total: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListResponse {
    pub league_id: LeagueId,
    pub items: Vec<EventResult>,
    pub total: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub league_id: LeagueId,
    pub events: usize,
    pub standings: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardListResponse {
    pub items: Vec<CardResult>,
    pub total: usize,
}
