use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{AppState, error_response};
use crate::api::models::{EventListResponse, LeagueListItem, LeagueListResponse};
use crate::domain::LeagueId;

pub async fn get_leagues(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let leagues = match state.service.list_leagues() {
        Ok(leagues) => leagues,
        Err(e) => return error_response(e),
    };

    let items: Vec<LeagueListItem> = leagues.into_iter().map(LeagueListItem::from).collect();
    Json(LeagueListResponse {
        total: items.len(),
        items,
    })
    .into_response()
}

pub async fn get_standings(
    State(state): State<Arc<AppState>>,
    Path(league_id): Path<LeagueId>,
) -> impl IntoResponse {
    match state.service.standings(league_id) {
        Ok(standings) => Json(standings).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_league_events(
    State(state): State<Arc<AppState>>,
    Path(league_id): Path<LeagueId>,
) -> impl IntoResponse {
    match state.service.event_results(league_id) {
        Ok(events) => Json(EventListResponse {
            league_id,
            total: events.len(),
            items: events,
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}
