use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stats::{DieAggregate, GolfAggregate};

/// Database model for the players table.
///
/// The two aggregate blocks are denormalized caches: they must always equal
/// a full recompute over the player's participation history, and every write
/// to a game or golf round is followed by a recompute of the affected rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerModel {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub die_stats: DieAggregate,
    pub golf_stats: GolfAggregate,
}

impl PlayerModel {
    pub fn new(id: i64, name: String) -> Self {
        Self {
            id,
            name,
            created_at: Utc::now(),
            die_stats: DieAggregate::default(),
            golf_stats: GolfAggregate::default(),
        }
    }

    /// Token after the last whitespace of the display name, used for team
    /// name derivation. Falls back to the full name for single-token names.
    pub fn last_name(&self) -> &str {
        self.name.trim().split_whitespace().last().unwrap_or(&self.name)
    }
}
