use chrono::{DateTime, Utc};
use serde::Serialize;

/// One qualifying game, reported from the rosters' point of view rather
/// than by side number.
#[derive(Debug, Clone, Serialize)]
pub struct RivalryGame {
    pub id: i64,
    pub played_at: DateTime<Utc>,
    pub location: Option<String>,
    pub roster_a_score: i32,
    pub roster_b_score: i32,
    pub roster_a_players: Vec<String>,
    pub roster_b_players: Vec<String>,
    /// Name of the winning roster
    pub winner: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterRecord {
    pub name: String,
    pub wins: i64,
    pub win_percentage: f64,
    pub total_points: i64,
}

#[derive(Debug, Serialize)]
pub struct RivalryStatsResponse {
    pub total_games: i64,
    pub roster_a: RosterRecord,
    pub roster_b: RosterRecord,
    /// Roster A points minus roster B points over all qualifying games
    pub point_differential: i64,
    /// The 5 most recent qualifying games, newest first
    pub recent_games: Vec<RivalryGame>,
}
