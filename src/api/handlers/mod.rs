use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::database::SqliteRepository;
use crate::errors::is_not_found;
use crate::services::scoring::ScoringService;

pub mod admin;
pub mod cards;
pub mod events;
pub mod leagues;

pub struct AppState {
    pub service: ScoringService<SqliteRepository>,
    pub admin_token: Option<String>,
}

#[derive(Deserialize)]
pub struct CardParams {
    pub limit: Option<usize>,
}

/// 404 for anything missing from the store, 500 for the rest
fn error_response(error: anyhow::Error) -> Response {
    if is_not_found(&error) {
        return (StatusCode::NOT_FOUND, format!("{:#}", error)).into_response();
    }
    log::error!("Request failed: {:?}", error);
    (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {:#}", error)).into_response()
}
