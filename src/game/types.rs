use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::player::types::PlayerResponse;

/// Request payload for recording a new Die game
#[derive(Debug, Deserialize)]
pub struct GameCreateRequest {
    pub team1_score: i32,
    pub team2_score: i32,
    pub team1_players: Vec<i64>,
    pub team2_players: Vec<i64>,
    pub location: Option<String>,
    /// Defaults to the current time when omitted
    pub played_at: Option<DateTime<Utc>>,
}

/// Request payload for editing a game. Roster updates swap the full
/// participation set; partial rosters are rejected.
#[derive(Debug, Default, Deserialize)]
pub struct GameUpdateRequest {
    pub team1_score: Option<i32>,
    pub team2_score: Option<i32>,
    pub team1_players: Option<Vec<i64>>,
    pub team2_players: Option<Vec<i64>>,
    pub location: Option<String>,
}

/// Full game detail with both rosters resolved to players
#[derive(Debug, Serialize, Deserialize)]
pub struct GameResponse {
    pub id: i64,
    pub team1_score: i32,
    pub team2_score: i32,
    pub winner_team: i32,
    pub location: Option<String>,
    pub played_at: DateTime<Utc>,
    pub team1_players: Vec<PlayerResponse>,
    pub team2_players: Vec<PlayerResponse>,
}

/// Lightweight game summary for lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSummary {
    pub id: i64,
    pub team1_score: i32,
    pub team2_score: i32,
    pub winner_team: i32,
    pub location: Option<String>,
    pub played_at: DateTime<Utc>,
    pub team1_player_names: Vec<String>,
    pub team2_player_names: Vec<String>,
}

/// Query parameters for game listings
#[derive(Debug, Default, Deserialize)]
pub struct GameListQuery {
    pub limit: Option<usize>,
}
