use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stats::DieAggregate;

/// A discovered 3-player team. Rows are a materialized view over game
/// history: only the discovery engine writes them, and a full rebuild can
/// regenerate every row with no information loss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamModel {
    pub id: i64,
    /// Canonical key: sorted player ids
    pub player_ids: [i64; 3],
    pub team_name: String,
    pub created_at: DateTime<Utc>,
    pub stats: DieAggregate,
}
