use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{AppState, error_response};
use crate::domain::EventId;

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<EventId>,
) -> impl IntoResponse {
    match state.service.event_result(event_id) {
        Ok(result) => Json(result).into_response(),
        Err(e) => error_response(e),
    }
}
