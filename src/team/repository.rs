use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use tracing::{debug, instrument};

use super::models::TeamModel;
use crate::shared::AppError;
use crate::stats::DieAggregate;

/// Trait for team repository operations. Only the discovery engine calls the
/// mutating methods; nothing else writes team rows.
#[async_trait]
pub trait TeamRepository {
    /// Inserts or refreshes the row for a canonical triple, preserving id
    /// and creation time across refreshes.
    async fn upsert_team(
        &self,
        player_ids: [i64; 3],
        team_name: &str,
        stats: &DieAggregate,
    ) -> Result<TeamModel, AppError>;
    /// Removes the row for a triple if present; Ok(false) when absent.
    async fn delete_by_players(&self, player_ids: [i64; 3]) -> Result<bool, AppError>;
    async fn delete_all(&self) -> Result<(), AppError>;
    async fn get_team(&self, team_id: i64) -> Result<Option<TeamModel>, AppError>;
    async fn list_teams(&self) -> Result<Vec<TeamModel>, AppError>;
}

/// In-memory implementation of TeamRepository for development and testing
pub struct InMemoryTeamRepository {
    teams: Mutex<HashMap<[i64; 3], TeamModel>>,
    next_id: AtomicI64,
}

impl Default for InMemoryTeamRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self {
            teams: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    #[instrument(skip(self, stats))]
    async fn upsert_team(
        &self,
        player_ids: [i64; 3],
        team_name: &str,
        stats: &DieAggregate,
    ) -> Result<TeamModel, AppError> {
        let mut teams = self.teams.lock().unwrap();
        let team = teams
            .entry(player_ids)
            .and_modify(|existing| {
                existing.team_name = team_name.to_string();
                existing.stats = *stats;
            })
            .or_insert_with(|| TeamModel {
                id: self.next_id.fetch_add(1, Ordering::SeqCst),
                player_ids,
                team_name: team_name.to_string(),
                created_at: Utc::now(),
                stats: *stats,
            });

        debug!(team_id = team.id, team_name = %team.team_name, "Team upserted in memory");
        Ok(team.clone())
    }

    #[instrument(skip(self))]
    async fn delete_by_players(&self, player_ids: [i64; 3]) -> Result<bool, AppError> {
        let removed = self.teams.lock().unwrap().remove(&player_ids).is_some();
        if removed {
            debug!(?player_ids, "Team removed from memory");
        }
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> Result<(), AppError> {
        self.teams.lock().unwrap().clear();
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_team(&self, team_id: i64) -> Result<Option<TeamModel>, AppError> {
        let teams = self.teams.lock().unwrap();
        Ok(teams.values().find(|t| t.id == team_id).cloned())
    }

    #[instrument(skip(self))]
    async fn list_teams(&self) -> Result<Vec<TeamModel>, AppError> {
        let teams = self.teams.lock().unwrap();
        let mut list: Vec<TeamModel> = teams.values().cloned().collect();
        list.sort_by_key(|t| t.id);
        Ok(list)
    }
}
