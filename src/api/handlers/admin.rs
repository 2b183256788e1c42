use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{AppState, error_response};
use crate::api::models::RefreshResponse;
use crate::domain::LeagueId;

pub async fn refresh_league(
    State(state): State<Arc<AppState>>,
    Path(league_id): Path<LeagueId>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(token) = &state.admin_token {
        let auth_header = headers.get("Authorization").and_then(|h| h.to_str().ok());
        if auth_header != Some(format!("Bearer {}", token).as_str()) {
            return StatusCode::UNAUTHORIZED.into_response();
        }
    }

    log::info!("Refresh of league {} triggered", league_id);
    match state.service.refresh(league_id) {
        Ok(computation) => Json(RefreshResponse {
            league_id,
            events: computation.events.len(),
            standings: computation.standings.rows.len(),
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}
