use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::{delete, get, post, put},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use rosewood::course::repository::InMemoryCourseRepository;
use rosewood::course::{self};
use rosewood::game::{self, repository::InMemoryGameRepository};
use rosewood::golf::{self, repository::InMemoryGolfRepository};
use rosewood::player::{self, repository::InMemoryPlayerRepository};
use rosewood::rivalry::{self, RivalryConfig};
use rosewood::shared::AppState;
use rosewood::team::{self, repository::InMemoryTeamRepository};
use rosewood::StaticCourseLookup;

/// Full application router over fresh in-memory repositories, matching the
/// production route table.
pub fn test_app() -> Router {
    let state = AppState::new(
        Arc::new(InMemoryPlayerRepository::new()),
        Arc::new(InMemoryGameRepository::new()),
        Arc::new(InMemoryTeamRepository::new()),
        Arc::new(InMemoryGolfRepository::new()),
        Arc::new(InMemoryCourseRepository::new()),
        Arc::new(StaticCourseLookup::empty()),
        RivalryConfig::default(),
    );

    Router::new()
        .route("/players", post(player::create_player))
        .route("/players", get(player::list_players))
        .route("/players/leaderboard", get(player::leaderboard))
        .route("/players/:id", get(player::get_player))
        .route("/players/:id/stats", get(player::get_player_stats))
        .route("/games", post(game::create_game))
        .route("/games", get(game::list_games))
        .route("/games/:id", get(game::get_game))
        .route("/games/:id", put(game::update_game))
        .route("/games/:id", delete(game::delete_game))
        .route("/teams", get(team::list_teams))
        .route("/teams/rebuild", post(team::rebuild_teams))
        .route("/teams/:id", get(team::get_team_stats))
        .route("/rivalry", get(rivalry::get_rivalry_stats))
        .route("/golf/rounds", post(golf::create_golf_round))
        .route("/golf/rounds", get(golf::list_golf_rounds))
        .route("/golf/rounds/:id", get(golf::get_golf_round))
        .route("/golf/rounds/:id", put(golf::update_golf_round))
        .route("/golf/rounds/:id", delete(golf::delete_golf_round))
        .route("/golf/stats", get(golf::golf_leaderboard))
        .route("/golf/stats/:player_id", get(golf::get_player_golf_stats))
        .route("/golf/courses/search", get(course::search_courses))
        .route("/golf/courses/:api_id", get(course::get_course))
        .with_state(state)
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn send_empty(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}
