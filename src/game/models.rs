use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Database model for the games table. `winner_team` is derived from the
/// scores at write time; tied scores are rejected before a row exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameModel {
    pub id: i64,
    pub team1_score: i32,
    pub team2_score: i32,
    pub winner_team: i32,
    pub location: Option<String>,
    pub played_at: DateTime<Utc>,
}

impl GameModel {
    pub fn score_for_side(&self, side: i32) -> (i32, i32) {
        if side == 1 {
            (self.team1_score, self.team2_score)
        } else {
            (self.team2_score, self.team1_score)
        }
    }
}

/// Junction row tying a player to one side of a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipationModel {
    pub id: i64,
    pub game_id: i64,
    pub player_id: i64,
    pub team_number: i32,
}
