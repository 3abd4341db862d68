use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{info, instrument};

use super::service::GolfService;
use super::types::{
    GolfLeaderboardEntry, GolfPlayerStatsResponse, GolfRoundCreateRequest, GolfRoundResponse,
    GolfRoundSummary, GolfRoundUpdateRequest, GolfStatsQuery, RoundListQuery,
};
use crate::shared::{AppError, AppState, MessageResponse};
use crate::stats::Season;

/// HTTP handler for recording a golf round from its 18 hole results
///
/// POST /golf/rounds
#[instrument(name = "create_golf_round", skip(state, request))]
pub async fn create_golf_round(
    State(state): State<AppState>,
    Json(request): Json<GolfRoundCreateRequest>,
) -> Result<Json<GolfRoundResponse>, AppError> {
    info!(course = %request.course, "Recording golf round");
    let round = GolfService::from_state(&state).create_round(request).await?;
    Ok(Json(round))
}

/// HTTP handler for listing golf rounds, newest first
///
/// GET /golf/rounds?limit=
#[instrument(name = "list_golf_rounds", skip(state))]
pub async fn list_golf_rounds(
    State(state): State<AppState>,
    Query(query): Query<RoundListQuery>,
) -> Result<Json<Vec<GolfRoundSummary>>, AppError> {
    let rounds = GolfService::from_state(&state).list_rounds(query.limit).await?;
    Ok(Json(rounds))
}

/// HTTP handler for one round's full detail
///
/// GET /golf/rounds/:id
#[instrument(name = "get_golf_round", skip(state))]
pub async fn get_golf_round(
    State(state): State<AppState>,
    Path(round_id): Path<i64>,
) -> Result<Json<GolfRoundResponse>, AppError> {
    let round = GolfService::from_state(&state).get_round(round_id).await?;
    Ok(Json(round))
}

/// HTTP handler for editing a round's course, rosters, or hole results
///
/// PUT /golf/rounds/:id
#[instrument(name = "update_golf_round", skip(state, request))]
pub async fn update_golf_round(
    State(state): State<AppState>,
    Path(round_id): Path<i64>,
    Json(request): Json<GolfRoundUpdateRequest>,
) -> Result<Json<GolfRoundResponse>, AppError> {
    let round = GolfService::from_state(&state)
        .update_round(round_id, request)
        .await?;
    Ok(Json(round))
}

/// HTTP handler for removing a round and rolling back its stats
///
/// DELETE /golf/rounds/:id
#[instrument(name = "delete_golf_round", skip(state))]
pub async fn delete_golf_round(
    State(state): State<AppState>,
    Path(round_id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    GolfService::from_state(&state).delete_round(round_id).await?;
    Ok(Json(MessageResponse {
        message: "Golf round deleted successfully".to_string(),
    }))
}

/// HTTP handler for the golf leaderboard
///
/// GET /golf/stats?season=
#[instrument(name = "golf_leaderboard", skip(state))]
pub async fn golf_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<GolfStatsQuery>,
) -> Result<Json<Vec<GolfLeaderboardEntry>>, AppError> {
    let season = Season::parse(query.season.as_deref())?;
    let entries = GolfService::from_state(&state).leaderboard(season).await?;
    Ok(Json(entries))
}

/// HTTP handler for one player's golf detail, including the par breakdown
///
/// GET /golf/stats/:player_id
#[instrument(name = "get_player_golf_stats", skip(state))]
pub async fn get_player_golf_stats(
    State(state): State<AppState>,
    Path(player_id): Path<i64>,
) -> Result<Json<GolfPlayerStatsResponse>, AppError> {
    let stats = GolfService::from_state(&state).player_stats(player_id).await?;
    Ok(Json(stats))
}
