use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::PlayerModel;
use crate::game::types::GameSummary;
use crate::stats::{DieAggregate, GolfAggregate};

/// Request payload for creating a new player
#[derive(Debug, Deserialize)]
pub struct PlayerCreateRequest {
    pub name: String,
}

/// Player with cached all-time aggregates, flattened to the wire shape
#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerResponse {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub games_played: i64,
    pub games_won: i64,
    pub total_points_scored: i64,
    pub total_points_against: i64,
    pub win_percentage: f64,
    pub avg_win_margin: f64,
    pub avg_loss_margin: f64,
    pub golf_rounds_played: i64,
    pub golf_rounds_won: i64,
    pub golf_rounds_lost: i64,
    pub golf_rounds_drawn: i64,
    pub golf_holes_won: i64,
    pub golf_holes_lost: i64,
    pub golf_win_percentage: f64,
}

impl From<PlayerModel> for PlayerResponse {
    fn from(player: PlayerModel) -> Self {
        let die = player.die_stats;
        let golf = player.golf_stats;
        Self {
            id: player.id,
            name: player.name,
            created_at: player.created_at,
            games_played: die.games_played,
            games_won: die.games_won,
            total_points_scored: die.total_points_scored,
            total_points_against: die.total_points_against,
            win_percentage: die.win_percentage,
            avg_win_margin: die.avg_win_margin,
            avg_loss_margin: die.avg_loss_margin,
            golf_rounds_played: golf.rounds_played,
            golf_rounds_won: golf.rounds_won,
            golf_rounds_lost: golf.rounds_lost,
            golf_rounds_drawn: golf.rounds_drawn,
            golf_holes_won: golf.holes_won,
            golf_holes_lost: golf.holes_lost,
            golf_win_percentage: golf.win_percentage,
        }
    }
}

/// Detailed Die statistics for one player, optionally season-scoped
#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerStatsResponse {
    pub id: i64,
    pub name: String,
    pub season: String,
    #[serde(flatten)]
    pub stats: DieAggregate,
    pub recent_games: Vec<GameSummary>,
}

/// One leaderboard row; golf stats ride along for the combined view
#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub stats: DieAggregate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub golf_stats: Option<GolfAggregate>,
}

/// Query parameters shared by season-scoped statistics endpoints
#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    pub season: Option<String>,
    pub limit: Option<usize>,
}
