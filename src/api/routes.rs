use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    AppState,
    admin::refresh_league,
    cards::{get_card, get_latest_cards},
    events::get_event,
    leagues::{get_league_events, get_leagues, get_standings},
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/leagues", get(get_leagues))
        .route("/api/leagues/:id/standings", get(get_standings))
        .route("/api/leagues/:id/events", get(get_league_events))
        .route("/api/leagues/:id/refresh", post(refresh_league))
        .route("/api/events/:id", get(get_event))
        .route("/api/events/:id/contestants/:contestant_id/cards", get(get_latest_cards))
        .route("/api/cards/:id", get(get_card))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::database::SqliteRepository;
    use crate::services::import::tests::seeded_pool;
    use crate::services::scoring::ScoringService;

    fn app(admin_token: Option<&str>) -> Router {
        let state = Arc::new(AppState {
            service: ScoringService::new(SqliteRepository::new(seeded_pool()), None),
            admin_token: admin_token.map(str::to_string),
        });
        create_router(state)
    }

    async fn send(app: Router, method: &str, uri: &str, auth: Option<&str>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            request = request.header("Authorization", auth);
        }
        let response = app
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_list_leagues() {
        let (status, body) = send(app(None), "GET", "/api/leagues", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["items"][0]["name"], "Tuesday Doubles");
        assert_eq!(body["items"][0]["contestants"], 3);
    }

    #[tokio::test]
    async fn test_standings_and_events() {
        let (status, body) = send(app(None), "GET", "/api/leagues/1/standings", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rows"][0]["name"], "Piotr");
        assert_eq!(body["rows"][0]["points"], 18);

        let (status, body) = send(app(None), "GET", "/api/leagues/1/events", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["items"][0]["entries"][0]["contestant_id"], 13);
    }

    #[tokio::test]
    async fn test_event_and_card() {
        let (status, body) = send(app(None), "GET", "/api/events/22", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Week 2");

        let (status, body) = send(app(None), "GET", "/api/cards/32", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["entries"][0]["scratch_delta"], "-1");
        assert_eq!(body["result"]["entries"][2]["status"], "DNF");
    }

    #[tokio::test]
    async fn test_latest_cards_of_contestant() {
        let uri = "/api/events/22/contestants/11/cards?limit=2";
        let (status, body) = send(app(None), "GET", uri, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["items"][0]["card_id"], 33);
        assert_eq!(body["items"][1]["card_id"], 32);

        let (status, _) = send(app(None), "GET", "/api/events/22/contestants/99/cards", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_entities_are_not_found() {
        for uri in ["/api/leagues/9/standings", "/api/events/9", "/api/cards/9"] {
            let (status, _) = send(app(None), "GET", uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_refresh_requires_token_when_configured() {
        let (status, _) = send(app(Some("s3cret")), "POST", "/api/leagues/1/refresh", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(
            app(Some("s3cret")),
            "POST",
            "/api/leagues/1/refresh",
            Some("Bearer s3cret"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["leagueId"], 1);
        assert_eq!(body["events"], 2);
    }
}
