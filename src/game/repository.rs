use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::{GameModel, ParticipationModel};
use crate::shared::AppError;

/// Fields for a game row about to be inserted
#[derive(Debug, Clone)]
pub struct NewGame {
    pub team1_score: i32,
    pub team2_score: i32,
    pub winner_team: i32,
    pub location: Option<String>,
    pub played_at: DateTime<Utc>,
}

/// Trait for game repository operations. Participations are always written
/// as a full set alongside their parent, never patched row by row.
#[async_trait]
pub trait GameRepository {
    async fn create_game(
        &self,
        game: NewGame,
        participations: &[(i64, i32)],
    ) -> Result<GameModel, AppError>;
    async fn get_game(&self, game_id: i64) -> Result<Option<GameModel>, AppError>;
    /// All games, most recent first
    async fn list_games(&self, limit: usize) -> Result<Vec<GameModel>, AppError>;
    async fn games_by_ids(&self, game_ids: &[i64]) -> Result<Vec<GameModel>, AppError>;
    async fn update_game(&self, game: &GameModel) -> Result<(), AppError>;
    async fn replace_participations(
        &self,
        game_id: i64,
        participations: &[(i64, i32)],
    ) -> Result<(), AppError>;
    /// Deletes the game and its participation rows
    async fn delete_game(&self, game_id: i64) -> Result<(), AppError>;
    async fn participations_for_game(
        &self,
        game_id: i64,
    ) -> Result<Vec<ParticipationModel>, AppError>;
    async fn participations_for_player(
        &self,
        player_id: i64,
    ) -> Result<Vec<ParticipationModel>, AppError>;
    async fn count_games(&self) -> Result<i64, AppError>;
}

/// In-memory implementation of GameRepository for development and testing
pub struct InMemoryGameRepository {
    games: Mutex<HashMap<i64, GameModel>>,
    participations: Mutex<HashMap<i64, Vec<ParticipationModel>>>,
    next_game_id: AtomicI64,
    next_participation_id: AtomicI64,
}

impl Default for InMemoryGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self {
            games: Mutex::new(HashMap::new()),
            participations: Mutex::new(HashMap::new()),
            next_game_id: AtomicI64::new(1),
            next_participation_id: AtomicI64::new(1),
        }
    }

    fn build_participations(
        &self,
        game_id: i64,
        participations: &[(i64, i32)],
    ) -> Vec<ParticipationModel> {
        participations
            .iter()
            .map(|(player_id, team_number)| ParticipationModel {
                id: self.next_participation_id.fetch_add(1, Ordering::SeqCst),
                game_id,
                player_id: *player_id,
                team_number: *team_number,
            })
            .collect()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    #[instrument(skip(self, game, participations))]
    async fn create_game(
        &self,
        game: NewGame,
        participations: &[(i64, i32)],
    ) -> Result<GameModel, AppError> {
        let id = self.next_game_id.fetch_add(1, Ordering::SeqCst);
        let model = GameModel {
            id,
            team1_score: game.team1_score,
            team2_score: game.team2_score,
            winner_team: game.winner_team,
            location: game.location,
            played_at: game.played_at,
        };

        let rows = self.build_participations(id, participations);
        self.games.lock().unwrap().insert(id, model.clone());
        self.participations.lock().unwrap().insert(id, rows);

        debug!(game_id = id, "Game created in memory");
        Ok(model)
    }

    #[instrument(skip(self))]
    async fn get_game(&self, game_id: i64) -> Result<Option<GameModel>, AppError> {
        Ok(self.games.lock().unwrap().get(&game_id).cloned())
    }

    #[instrument(skip(self))]
    async fn list_games(&self, limit: usize) -> Result<Vec<GameModel>, AppError> {
        let games = self.games.lock().unwrap();
        let mut list: Vec<GameModel> = games.values().cloned().collect();
        list.sort_by(|a, b| b.played_at.cmp(&a.played_at).then(b.id.cmp(&a.id)));
        list.truncate(limit);
        Ok(list)
    }

    #[instrument(skip(self))]
    async fn games_by_ids(&self, game_ids: &[i64]) -> Result<Vec<GameModel>, AppError> {
        let games = self.games.lock().unwrap();
        Ok(game_ids
            .iter()
            .filter_map(|id| games.get(id).cloned())
            .collect())
    }

    #[instrument(skip(self, game))]
    async fn update_game(&self, game: &GameModel) -> Result<(), AppError> {
        let mut games = self.games.lock().unwrap();
        if !games.contains_key(&game.id) {
            warn!(game_id = game.id, "Game not found for update");
            return Err(AppError::NotFound("Game not found".to_string()));
        }
        games.insert(game.id, game.clone());
        Ok(())
    }

    #[instrument(skip(self, participations))]
    async fn replace_participations(
        &self,
        game_id: i64,
        participations: &[(i64, i32)],
    ) -> Result<(), AppError> {
        if !self.games.lock().unwrap().contains_key(&game_id) {
            return Err(AppError::NotFound("Game not found".to_string()));
        }
        let rows = self.build_participations(game_id, participations);
        self.participations.lock().unwrap().insert(game_id, rows);
        debug!(game_id, "Participations replaced in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_game(&self, game_id: i64) -> Result<(), AppError> {
        let removed = self.games.lock().unwrap().remove(&game_id);
        if removed.is_none() {
            warn!(game_id, "Game not found for deletion");
            return Err(AppError::NotFound("Game not found".to_string()));
        }
        self.participations.lock().unwrap().remove(&game_id);
        debug!(game_id, "Game deleted from memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn participations_for_game(
        &self,
        game_id: i64,
    ) -> Result<Vec<ParticipationModel>, AppError> {
        let participations = self.participations.lock().unwrap();
        Ok(participations.get(&game_id).cloned().unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn participations_for_player(
        &self,
        player_id: i64,
    ) -> Result<Vec<ParticipationModel>, AppError> {
        let participations = self.participations.lock().unwrap();
        Ok(participations
            .values()
            .flatten()
            .filter(|p| p.player_id == player_id)
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    async fn count_games(&self) -> Result<i64, AppError> {
        Ok(self.games.lock().unwrap().len() as i64)
    }
}
