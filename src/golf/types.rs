use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::player::types::PlayerResponse;
use crate::stats::{GolfAggregate, ParBreakdown};

#[derive(Debug, Clone, Deserialize)]
pub struct HoleResultRequest {
    pub hole_number: i32,
    /// 1, 2, or null for a halved hole
    pub winner_team: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct GolfRoundCreateRequest {
    pub course: String,
    pub course_api_id: Option<i64>,
    pub tee_name: Option<String>,
    pub played_at: Option<DateTime<Utc>>,
    pub team1_players: Vec<i64>,
    pub team2_players: Vec<i64>,
    pub holes: Vec<HoleResultRequest>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GolfRoundUpdateRequest {
    pub course: Option<String>,
    pub team1_players: Option<Vec<i64>>,
    pub team2_players: Option<Vec<i64>>,
    pub holes: Option<Vec<HoleResultRequest>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HoleResultResponse {
    pub hole_number: i32,
    pub winner_team: Option<i32>,
    pub par: Option<i32>,
    pub yardage: Option<i32>,
}

/// Full round detail with rosters and per-hole results
#[derive(Debug, Serialize)]
pub struct GolfRoundResponse {
    pub id: i64,
    pub course: String,
    pub course_api_id: Option<i64>,
    pub tee_name: Option<String>,
    pub played_at: DateTime<Utc>,
    pub team1_holes_won: i32,
    pub team2_holes_won: i32,
    pub halved_holes: i32,
    pub winner_team: Option<i32>,
    pub team1_players: Vec<PlayerResponse>,
    pub team2_players: Vec<PlayerResponse>,
    pub hole_results: Vec<HoleResultResponse>,
}

/// Compact round line for listings and recent-round blocks
#[derive(Debug, Clone, Serialize)]
pub struct GolfRoundSummary {
    pub id: i64,
    pub course: String,
    pub played_at: DateTime<Utc>,
    pub team1_holes_won: i32,
    pub team2_holes_won: i32,
    pub halved_holes: i32,
    pub winner_team: Option<i32>,
    pub team1_player_names: Vec<String>,
    pub team2_player_names: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GolfLeaderboardEntry {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub stats: GolfAggregate,
    pub recent_rounds: Vec<GolfRoundSummary>,
}

#[derive(Debug, Serialize)]
pub struct GolfPlayerStatsResponse {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub stats: GolfAggregate,
    pub par_breakdown: ParBreakdown,
    pub recent_rounds: Vec<GolfRoundSummary>,
}

#[derive(Debug, Deserialize)]
pub struct RoundListQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct GolfStatsQuery {
    pub season: Option<String>,
}
