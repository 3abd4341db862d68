use std::collections::HashSet;

use super::config::RivalryConfig;

/// Which configured roster occupied which side of a qualifying game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RivalryMatch {
    /// Side number (1 or 2) played by roster A
    pub roster_a_side: i32,
}

impl RivalryMatch {
    pub fn roster_b_side(&self) -> i32 {
        if self.roster_a_side == 1 {
            2
        } else {
            1
        }
    }
}

/// Decides whether a game counts toward the rivalry.
///
/// Qualification is strict: one side must equal roster A exactly and the
/// other must equal roster B exactly, as name sets. A 2-of-3 overlap or a
/// substitute player disqualifies the game.
pub fn classify(
    config: &RivalryConfig,
    team1_names: &[String],
    team2_names: &[String],
) -> Option<RivalryMatch> {
    let roster_a: HashSet<&str> = config.roster_a.players.iter().map(String::as_str).collect();
    let roster_b: HashSet<&str> = config.roster_b.players.iter().map(String::as_str).collect();
    let team1: HashSet<&str> = team1_names.iter().map(String::as_str).collect();
    let team2: HashSet<&str> = team2_names.iter().map(String::as_str).collect();

    if team1.len() != team1_names.len() || team2.len() != team2_names.len() {
        return None;
    }

    if team1 == roster_a && team2 == roster_b {
        Some(RivalryMatch { roster_a_side: 1 })
    } else if team1 == roster_b && team2 == roster_a {
        Some(RivalryMatch { roster_a_side: 2 })
    } else {
        None
    }
}
