use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::service::PlayerService;
use super::types::{
    LeaderboardEntry, PlayerCreateRequest, PlayerResponse, PlayerStatsResponse, StatsQuery,
};
use crate::shared::{AppError, AppState};
use crate::stats::Season;

fn service(state: &AppState) -> PlayerService {
    PlayerService::new(
        Arc::clone(&state.player_repository),
        Arc::clone(&state.game_repository),
    )
}

/// HTTP handler for registering a new player
///
/// POST /players
#[instrument(name = "create_player", skip(state))]
pub async fn create_player(
    State(state): State<AppState>,
    Json(request): Json<PlayerCreateRequest>,
) -> Result<Json<PlayerResponse>, AppError> {
    info!(name = %request.name, "Creating new player");
    let player = service(&state).create_player(request).await?;
    Ok(Json(player))
}

/// HTTP handler for listing all players with cached aggregates
///
/// GET /players
#[instrument(name = "list_players", skip(state))]
pub async fn list_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlayerResponse>>, AppError> {
    let players = service(&state).list_players().await?;
    Ok(Json(players))
}

/// HTTP handler for the Die leaderboard
///
/// GET /players/leaderboard?season=
#[instrument(name = "leaderboard", skip(state))]
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let season = Season::parse(query.season.as_deref())?;
    let entries = service(&state).leaderboard(season).await?;
    Ok(Json(entries))
}

/// HTTP handler for fetching one player
///
/// GET /players/:id
#[instrument(name = "get_player", skip(state))]
pub async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<i64>,
) -> Result<Json<PlayerResponse>, AppError> {
    let player = service(&state).get_player(player_id).await?;
    Ok(Json(player))
}

/// HTTP handler for detailed, optionally season-scoped player statistics
///
/// GET /players/:id/stats?season=&limit=
#[instrument(name = "get_player_stats", skip(state))]
pub async fn get_player_stats(
    State(state): State<AppState>,
    Path(player_id): Path<i64>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<PlayerStatsResponse>, AppError> {
    let season = Season::parse(query.season.as_deref())?;
    let stats = service(&state)
        .player_stats(player_id, season, query.limit)
        .await?;
    Ok(Json(stats))
}
