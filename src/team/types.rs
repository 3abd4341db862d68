use serde::Serialize;
use chrono::{DateTime, Utc};

use super::models::TeamModel;
use crate::game::types::GameSummary;
use crate::player::types::PlayerResponse;
use crate::stats::DieAggregate;

#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub id: i64,
    pub team_name: String,
    pub player_ids: [i64; 3],
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub stats: DieAggregate,
    pub point_differential: i64,
}

impl From<TeamModel> for TeamResponse {
    fn from(team: TeamModel) -> Self {
        Self {
            id: team.id,
            team_name: team.team_name,
            player_ids: team.player_ids,
            created_at: team.created_at,
            point_differential: team.stats.point_differential(),
            stats: team.stats,
        }
    }
}

/// Listing payload; echoes the qualification threshold so clients can
/// explain why a trio is missing.
#[derive(Debug, Serialize)]
pub struct TeamsListResponse {
    pub teams: Vec<TeamResponse>,
    pub total_games: usize,
    pub min_games_required: usize,
    pub threshold_percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct TeamStatsResponse {
    pub id: i64,
    pub team_name: String,
    #[serde(flatten)]
    pub stats: DieAggregate,
    pub point_differential: i64,
    pub players: Vec<PlayerResponse>,
    pub recent_games: Vec<GameSummary>,
}

#[derive(Debug, Serialize)]
pub struct RebuildResponse {
    pub teams_discovered: usize,
}
