use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A 2v2 match-play golf round. The hole counts and winner are always
/// derived from the 18 hole results, never supplied by clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GolfRoundModel {
    pub id: i64,
    /// Free-text course name as entered
    pub course: String,
    /// External id of the cached course this round was linked to, if any
    pub course_api_id: Option<i64>,
    /// Tee set played, resolved against the cached course
    pub tee_name: Option<String>,
    pub played_at: DateTime<Utc>,
    pub team1_holes_won: i32,
    pub team2_holes_won: i32,
    pub halved_holes: i32,
    /// None means the round was halved overall
    pub winner_team: Option<i32>,
}

impl GolfRoundModel {
    /// Holes won and lost from the given side's perspective.
    pub fn holes_for_side(&self, side: i32) -> (i32, i32) {
        if side == 1 {
            (self.team1_holes_won, self.team2_holes_won)
        } else {
            (self.team2_holes_won, self.team1_holes_won)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GolfParticipationModel {
    pub id: i64,
    pub round_id: i64,
    pub player_id: i64,
    pub team_number: i32,
}

/// One hole of a round. Par and yardage are snapshots copied from the
/// cached course tee when the round was recorded; they are never
/// recomputed if the cache changes later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoleResultModel {
    pub id: i64,
    pub round_id: i64,
    pub hole_number: i32,
    pub winner_team: Option<i32>,
    pub par: Option<i32>,
    pub yardage: Option<i32>,
}
