use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{AppState, CardParams, error_response};
use crate::api::models::CardListResponse;
use crate::domain::{CardId, ContestantId, EventId};

pub async fn get_card(
    State(state): State<Arc<AppState>>,
    Path(card_id): Path<CardId>,
) -> impl IntoResponse {
    match state.service.card_view(card_id) {
        Ok(view) => Json(view).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_latest_cards(
    State(state): State<Arc<AppState>>,
    Path((event_id, contestant_id)): Path<(EventId, ContestantId)>,
    Query(params): Query<CardParams>,
) -> impl IntoResponse {
    let limit = params.limit.unwrap_or(5).clamp(1, 50);

    match state.service.latest_cards(event_id, contestant_id, limit) {
        Ok(cards) => Json(CardListResponse {
            total: cards.len(),
            items: cards,
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}
