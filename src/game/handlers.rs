use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::service::GameService;
use super::types::{
    GameCreateRequest, GameListQuery, GameResponse, GameSummary, GameUpdateRequest,
};
use crate::shared::{AppError, AppState, MessageResponse};

fn service(state: &AppState) -> GameService {
    GameService::new(
        Arc::clone(&state.game_repository),
        Arc::clone(&state.player_repository),
        Arc::clone(&state.team_repository),
    )
}

/// HTTP handler for recording a Die game
///
/// POST /games
#[instrument(name = "create_game", skip(state, request))]
pub async fn create_game(
    State(state): State<AppState>,
    Json(request): Json<GameCreateRequest>,
) -> Result<Json<GameResponse>, AppError> {
    info!(
        team1_score = request.team1_score,
        team2_score = request.team2_score,
        "Recording new game"
    );
    let game = service(&state).create_game(request).await?;
    Ok(Json(game))
}

/// HTTP handler for listing recent games
///
/// GET /games?limit=
#[instrument(name = "list_games", skip(state))]
pub async fn list_games(
    State(state): State<AppState>,
    Query(query): Query<GameListQuery>,
) -> Result<Json<Vec<GameSummary>>, AppError> {
    let games = service(&state).list_games(query.limit).await?;
    Ok(Json(games))
}

/// HTTP handler for fetching one game with resolved rosters
///
/// GET /games/:id
#[instrument(name = "get_game", skip(state))]
pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
) -> Result<Json<GameResponse>, AppError> {
    let game = service(&state).get_game(game_id).await?;
    Ok(Json(game))
}

/// HTTP handler for editing a game; re-derives the winner and recomputes
/// every affected player and team
///
/// PUT /games/:id
#[instrument(name = "update_game", skip(state, request))]
pub async fn update_game(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
    Json(request): Json<GameUpdateRequest>,
) -> Result<Json<GameResponse>, AppError> {
    info!(game_id, "Updating game");
    let game = service(&state).update_game(game_id, request).await?;
    Ok(Json(game))
}

/// HTTP handler for deleting a game
///
/// DELETE /games/:id
#[instrument(name = "delete_game", skip(state))]
pub async fn delete_game(
    State(state): State<AppState>,
    Path(game_id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    info!(game_id, "Deleting game");
    service(&state).delete_game(game_id).await?;
    Ok(Json(MessageResponse {
        message: "Game deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/games", axum::routing::post(create_game))
            .route("/games/:id", axum::routing::delete(delete_game))
            .with_state(state)
    }

    async fn seed_players(state: &AppState, count: usize) -> Vec<i64> {
        let mut ids = Vec::new();
        for i in 0..count {
            ids.push(
                state
                    .player_repository
                    .create_player(&format!("Player {}", i + 1))
                    .await
                    .unwrap()
                    .id,
            );
        }
        ids
    }

    #[tokio::test]
    async fn create_game_handler_round_trips() {
        let state = AppStateBuilder::new().build();
        let ids = seed_players(&state, 6).await;
        let app = app(state);

        let body = serde_json::json!({
            "team1_score": 21,
            "team2_score": 15,
            "team1_players": &ids[..3],
            "team2_players": &ids[3..6],
            "location": "The Orchard"
        });
        let request = Request::builder()
            .method("POST")
            .uri("/games")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let game: GameResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(game.winner_team, 1);
        assert_eq!(game.team1_players.len(), 3);
        assert_eq!(game.team1_players[0].games_played, 1);
    }

    #[tokio::test]
    async fn tied_game_is_bad_request() {
        let state = AppStateBuilder::new().build();
        let ids = seed_players(&state, 6).await;
        let app = app(state);

        let body = serde_json::json!({
            "team1_score": 21,
            "team2_score": 21,
            "team1_players": &ids[..3],
            "team2_players": &ids[3..6]
        });
        let request = Request::builder()
            .method("POST")
            .uri("/games")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_unknown_game_is_not_found() {
        let state = AppStateBuilder::new().build();
        let app = app(state);

        let request = Request::builder()
            .method("DELETE")
            .uri("/games/7")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
