use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::{info, instrument};

use super::service::TeamService;
use super::types::{RebuildResponse, TeamStatsResponse, TeamsListResponse};
use crate::shared::{AppError, AppState};
use crate::stats::Season;

#[derive(Debug, Deserialize)]
pub struct TeamsQuery {
    pub season: Option<String>,
}

/// HTTP handler for the discovered-teams listing
///
/// GET /teams?season=
#[instrument(name = "list_teams", skip(state))]
pub async fn list_teams(
    State(state): State<AppState>,
    Query(query): Query<TeamsQuery>,
) -> Result<Json<TeamsListResponse>, AppError> {
    let season = Season::parse(query.season.as_deref())?;
    let listing = TeamService::from_state(&state).list_teams(season).await?;
    Ok(Json(listing))
}

/// HTTP handler for regenerating the teams table from game history
///
/// POST /teams/rebuild
#[instrument(name = "rebuild_teams", skip(state))]
pub async fn rebuild_teams(
    State(state): State<AppState>,
) -> Result<Json<RebuildResponse>, AppError> {
    let teams_discovered = TeamService::from_state(&state).rebuild().await?;
    info!(teams_discovered, "Team rebuild requested over HTTP");
    Ok(Json(RebuildResponse { teams_discovered }))
}

/// HTTP handler for one team's detail view
///
/// GET /teams/:id
#[instrument(name = "get_team_stats", skip(state))]
pub async fn get_team_stats(
    State(state): State<AppState>,
    Path(team_id): Path<i64>,
) -> Result<Json<TeamStatsResponse>, AppError> {
    let stats = TeamService::from_state(&state).get_team_stats(team_id).await?;
    Ok(Json(stats))
}
