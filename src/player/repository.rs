use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::PlayerModel;
use crate::shared::AppError;
use crate::stats::{DieAggregate, GolfAggregate};

/// Trait for player repository operations
#[async_trait]
pub trait PlayerRepository {
    async fn create_player(&self, name: &str) -> Result<PlayerModel, AppError>;
    async fn get_player(&self, player_id: i64) -> Result<Option<PlayerModel>, AppError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<PlayerModel>, AppError>;
    async fn get_players(&self, player_ids: &[i64]) -> Result<Vec<PlayerModel>, AppError>;
    async fn list_players(&self) -> Result<Vec<PlayerModel>, AppError>;
    async fn update_die_stats(
        &self,
        player_id: i64,
        aggregate: &DieAggregate,
    ) -> Result<(), AppError>;
    async fn update_golf_stats(
        &self,
        player_id: i64,
        aggregate: &GolfAggregate,
    ) -> Result<(), AppError>;
}

/// In-memory implementation of PlayerRepository for development and testing
pub struct InMemoryPlayerRepository {
    players: Mutex<HashMap<i64, PlayerModel>>,
    next_id: AtomicI64,
}

impl Default for InMemoryPlayerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPlayerRepository {
    pub fn new() -> Self {
        Self {
            players: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    #[instrument(skip(self))]
    async fn create_player(&self, name: &str) -> Result<PlayerModel, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let player = PlayerModel::new(id, name.to_string());

        let mut players = self.players.lock().unwrap();
        players.insert(id, player.clone());

        debug!(player_id = id, name = %name, "Player created in memory");
        Ok(player)
    }

    #[instrument(skip(self))]
    async fn get_player(&self, player_id: i64) -> Result<Option<PlayerModel>, AppError> {
        let players = self.players.lock().unwrap();
        Ok(players.get(&player_id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> Result<Option<PlayerModel>, AppError> {
        let players = self.players.lock().unwrap();
        Ok(players.values().find(|p| p.name == name).cloned())
    }

    #[instrument(skip(self))]
    async fn get_players(&self, player_ids: &[i64]) -> Result<Vec<PlayerModel>, AppError> {
        let players = self.players.lock().unwrap();
        Ok(player_ids
            .iter()
            .filter_map(|id| players.get(id).cloned())
            .collect())
    }

    #[instrument(skip(self))]
    async fn list_players(&self) -> Result<Vec<PlayerModel>, AppError> {
        let players = self.players.lock().unwrap();
        let mut list: Vec<PlayerModel> = players.values().cloned().collect();
        list.sort_by_key(|p| p.id);
        Ok(list)
    }

    #[instrument(skip(self, aggregate))]
    async fn update_die_stats(
        &self,
        player_id: i64,
        aggregate: &DieAggregate,
    ) -> Result<(), AppError> {
        let mut players = self.players.lock().unwrap();
        let player = players.get_mut(&player_id).ok_or_else(|| {
            warn!(player_id, "Player not found for die stats update");
            AppError::NotFound("Player not found".to_string())
        })?;
        player.die_stats = *aggregate;
        Ok(())
    }

    #[instrument(skip(self, aggregate))]
    async fn update_golf_stats(
        &self,
        player_id: i64,
        aggregate: &GolfAggregate,
    ) -> Result<(), AppError> {
        let mut players = self.players.lock().unwrap();
        let player = players.get_mut(&player_id).ok_or_else(|| {
            warn!(player_id, "Player not found for golf stats update");
            AppError::NotFound("Player not found".to_string())
        })?;
        player.golf_stats = *aggregate;
        Ok(())
    }
}

/// PostgreSQL implementation of the player repository
pub struct PostgresPlayerRepository {
    pool: PgPool,
}

impl PostgresPlayerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_player(row: &sqlx::postgres::PgRow) -> PlayerModel {
        PlayerModel {
            id: row.get("id"),
            name: row.get("name"),
            created_at: row.get("created_at"),
            die_stats: DieAggregate {
                games_played: row.get("games_played"),
                games_won: row.get("games_won"),
                total_points_scored: row.get("total_points_scored"),
                total_points_against: row.get("total_points_against"),
                win_percentage: row.get("win_percentage"),
                avg_win_margin: row.get("avg_win_margin"),
                avg_loss_margin: row.get("avg_loss_margin"),
            },
            golf_stats: GolfAggregate {
                rounds_played: row.get("golf_rounds_played"),
                rounds_won: row.get("golf_rounds_won"),
                rounds_lost: row.get("golf_rounds_lost"),
                rounds_drawn: row.get("golf_rounds_drawn"),
                holes_won: row.get("golf_holes_won"),
                holes_lost: row.get("golf_holes_lost"),
                win_percentage: row.get("golf_win_percentage"),
            },
        }
    }
}

const PLAYER_COLUMNS: &str = "id, name, created_at, games_played, games_won, \
    total_points_scored, total_points_against, win_percentage, avg_win_margin, \
    avg_loss_margin, golf_rounds_played, golf_rounds_won, golf_rounds_lost, \
    golf_rounds_drawn, golf_holes_won, golf_holes_lost, golf_win_percentage";

#[async_trait]
impl PlayerRepository for PostgresPlayerRepository {
    #[instrument(skip(self))]
    async fn create_player(&self, name: &str) -> Result<PlayerModel, AppError> {
        let row = sqlx::query(&format!(
            "INSERT INTO players (name) VALUES ($1) RETURNING {}",
            PLAYER_COLUMNS
        ))
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create player in database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(Self::row_to_player(&row))
    }

    #[instrument(skip(self))]
    async fn get_player(&self, player_id: i64) -> Result<Option<PlayerModel>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM players WHERE id = $1",
            PLAYER_COLUMNS
        ))
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.as_ref().map(Self::row_to_player))
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> Result<Option<PlayerModel>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM players WHERE name = $1",
            PLAYER_COLUMNS
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.as_ref().map(Self::row_to_player))
    }

    #[instrument(skip(self))]
    async fn get_players(&self, player_ids: &[i64]) -> Result<Vec<PlayerModel>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM players WHERE id = ANY($1)",
            PLAYER_COLUMNS
        ))
        .bind(player_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.iter().map(Self::row_to_player).collect())
    }

    #[instrument(skip(self))]
    async fn list_players(&self) -> Result<Vec<PlayerModel>, AppError> {
        let rows = sqlx::query(&format!("SELECT {} FROM players ORDER BY id", PLAYER_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.iter().map(Self::row_to_player).collect())
    }

    #[instrument(skip(self, aggregate))]
    async fn update_die_stats(
        &self,
        player_id: i64,
        aggregate: &DieAggregate,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE players SET games_played = $2, games_won = $3, total_points_scored = $4, \
             total_points_against = $5, win_percentage = $6, avg_win_margin = $7, \
             avg_loss_margin = $8 WHERE id = $1",
        )
        .bind(player_id)
        .bind(aggregate.games_played)
        .bind(aggregate.games_won)
        .bind(aggregate.total_points_scored)
        .bind(aggregate.total_points_against)
        .bind(aggregate.win_percentage)
        .bind(aggregate.avg_win_margin)
        .bind(aggregate.avg_loss_margin)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Player not found".to_string()));
        }
        Ok(())
    }

    #[instrument(skip(self, aggregate))]
    async fn update_golf_stats(
        &self,
        player_id: i64,
        aggregate: &GolfAggregate,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE players SET golf_rounds_played = $2, golf_rounds_won = $3, \
             golf_rounds_lost = $4, golf_rounds_drawn = $5, golf_holes_won = $6, \
             golf_holes_lost = $7, golf_win_percentage = $8 WHERE id = $1",
        )
        .bind(player_id)
        .bind(aggregate.rounds_played)
        .bind(aggregate.rounds_won)
        .bind(aggregate.rounds_lost)
        .bind(aggregate.rounds_drawn)
        .bind(aggregate.holes_won)
        .bind(aggregate.holes_lost)
        .bind(aggregate.win_percentage)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Player not found".to_string()));
        }
        Ok(())
    }
}
