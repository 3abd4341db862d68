use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument};

use super::models::GameModel;
use super::repository::{GameRepository, NewGame};
use super::types::{GameCreateRequest, GameResponse, GameSummary, GameUpdateRequest};
use crate::player::repository::PlayerRepository;
use crate::player::service::PlayerService;
use crate::player::types::PlayerResponse;
use crate::shared::AppError;
use crate::team::discovery::TeamDiscovery;
use crate::team::repository::TeamRepository;

const DEFAULT_LIST_LIMIT: usize = 50;
const PLAYERS_PER_SIDE: usize = 3;

/// Service for Die game writes and the recompute fan-out they trigger.
///
/// Every mutation follows the same sequence: validate before touching
/// anything, commit the game + participation rows, then recompute the cached
/// aggregates of every affected player and the (at most two) team triples the
/// game's sides form.
pub struct GameService {
    games: Arc<dyn GameRepository + Send + Sync>,
    players: Arc<dyn PlayerRepository + Send + Sync>,
    player_service: PlayerService,
    discovery: TeamDiscovery,
}

impl GameService {
    pub fn new(
        games: Arc<dyn GameRepository + Send + Sync>,
        players: Arc<dyn PlayerRepository + Send + Sync>,
        teams: Arc<dyn TeamRepository + Send + Sync>,
    ) -> Self {
        Self {
            player_service: PlayerService::new(Arc::clone(&players), Arc::clone(&games)),
            discovery: TeamDiscovery::new(
                Arc::clone(&games),
                Arc::clone(&players),
                teams,
            ),
            games,
            players,
        }
    }

    #[instrument(skip(self, request))]
    pub async fn create_game(&self, request: GameCreateRequest) -> Result<GameResponse, AppError> {
        self.validate_rosters(&request.team1_players, &request.team2_players)
            .await?;
        let winner_team = derive_winner(request.team1_score, request.team2_score)?;

        let roster = side_pairs(&request.team1_players, &request.team2_players);
        let game = self
            .games
            .create_game(
                NewGame {
                    team1_score: request.team1_score,
                    team2_score: request.team2_score,
                    winner_team,
                    location: request.location,
                    played_at: request.played_at.unwrap_or_else(Utc::now),
                },
                &roster,
            )
            .await?;

        info!(game_id = game.id, winner_team, "Game recorded");

        self.recompute_players(request.team1_players.iter().chain(&request.team2_players))
            .await?;
        self.discovery.update_for_game(game.id).await?;

        self.get_game(game.id).await
    }

    #[instrument(skip(self))]
    pub async fn get_game(&self, game_id: i64) -> Result<GameResponse, AppError> {
        let game = self.require_game(game_id).await?;
        let (team1, team2) = self.rosters_for_game(game_id).await?;

        Ok(GameResponse {
            id: game.id,
            team1_score: game.team1_score,
            team2_score: game.team2_score,
            winner_team: game.winner_team,
            location: game.location,
            played_at: game.played_at,
            team1_players: team1,
            team2_players: team2,
        })
    }

    #[instrument(skip(self))]
    pub async fn list_games(&self, limit: Option<usize>) -> Result<Vec<GameSummary>, AppError> {
        let games = self
            .games
            .list_games(limit.unwrap_or(DEFAULT_LIST_LIMIT))
            .await?;
        summarize_games(&games, self.games.as_ref(), self.players.as_ref()).await
    }

    #[instrument(skip(self, request))]
    pub async fn update_game(
        &self,
        game_id: i64,
        request: GameUpdateRequest,
    ) -> Result<GameResponse, AppError> {
        let mut game = self.require_game(game_id).await?;

        let old_participations = self.games.participations_for_game(game_id).await?;
        let mut affected: HashSet<i64> =
            old_participations.iter().map(|p| p.player_id).collect();
        let mut touched_triples = side_triples(&old_participations);

        // Roster edits replace the full participation set; a lone side is
        // rejected so the 3v3 invariant can be checked in one place.
        match (&request.team1_players, &request.team2_players) {
            (Some(team1), Some(team2)) => {
                self.validate_rosters(team1, team2).await?;
                self.games
                    .replace_participations(game_id, &side_pairs(team1, team2))
                    .await?;
                affected.extend(team1.iter().chain(team2));
            }
            (None, None) => {}
            _ => {
                return Err(AppError::Validation(
                    "Both team rosters must be provided together".to_string(),
                ))
            }
        }

        if let Some(score) = request.team1_score {
            game.team1_score = score;
        }
        if let Some(score) = request.team2_score {
            game.team2_score = score;
        }
        if request.location.is_some() {
            game.location = request.location;
        }
        game.winner_team = derive_winner(game.team1_score, game.team2_score)?;
        self.games.update_game(&game).await?;

        info!(game_id, "Game updated, recomputing affected aggregates");

        let new_participations = self.games.participations_for_game(game_id).await?;
        touched_triples.extend(side_triples(&new_participations));

        self.recompute_players(affected.iter()).await?;
        self.discovery
            .refresh_triples(&touched_triples.into_iter().collect::<Vec<_>>())
            .await?;

        self.get_game(game_id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_game(&self, game_id: i64) -> Result<(), AppError> {
        self.require_game(game_id).await?;

        let participations = self.games.participations_for_game(game_id).await?;
        let affected: HashSet<i64> = participations.iter().map(|p| p.player_id).collect();
        let triples = side_triples(&participations);

        self.games.delete_game(game_id).await?;
        info!(game_id, "Game deleted, recomputing affected aggregates");

        self.recompute_players(affected.iter()).await?;
        self.discovery
            .refresh_triples(&triples.into_iter().collect::<Vec<_>>())
            .await?;

        Ok(())
    }

    async fn recompute_players(
        &self,
        player_ids: impl Iterator<Item = &i64>,
    ) -> Result<(), AppError> {
        for player_id in player_ids {
            self.player_service.recalculate_die_stats(*player_id).await?;
        }
        Ok(())
    }

    async fn rosters_for_game(
        &self,
        game_id: i64,
    ) -> Result<(Vec<PlayerResponse>, Vec<PlayerResponse>), AppError> {
        let participations = self.games.participations_for_game(game_id).await?;
        let mut team1 = Vec::new();
        let mut team2 = Vec::new();

        for participation in participations {
            if let Some(player) = self.players.get_player(participation.player_id).await? {
                if participation.team_number == 1 {
                    team1.push(player.into());
                } else {
                    team2.push(player.into());
                }
            }
        }
        Ok((team1, team2))
    }

    async fn validate_rosters(&self, team1: &[i64], team2: &[i64]) -> Result<(), AppError> {
        if team1.len() != PLAYERS_PER_SIDE || team2.len() != PLAYERS_PER_SIDE {
            return Err(AppError::Validation(
                "Each team must have exactly 3 players".to_string(),
            ));
        }

        let all: Vec<i64> = team1.iter().chain(team2).copied().collect();
        let distinct: HashSet<i64> = all.iter().copied().collect();
        if distinct.len() != all.len() {
            return Err(AppError::Validation(
                "Players cannot appear twice or on both teams".to_string(),
            ));
        }

        let found = self.players.get_players(&all).await?;
        if found.len() != all.len() {
            return Err(AppError::Validation(
                "One or more players not found".to_string(),
            ));
        }
        Ok(())
    }

    async fn require_game(&self, game_id: i64) -> Result<GameModel, AppError> {
        self.games
            .get_game(game_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Game not found".to_string()))
    }
}

/// Strictly-greater comparison on both sides; equal scores are a validation
/// error rather than a silent side-2 win.
fn derive_winner(team1_score: i32, team2_score: i32) -> Result<i32, AppError> {
    if team1_score < 0 || team2_score < 0 {
        return Err(AppError::Validation("Scores cannot be negative".to_string()));
    }
    match team1_score.cmp(&team2_score) {
        std::cmp::Ordering::Greater => Ok(1),
        std::cmp::Ordering::Less => Ok(2),
        std::cmp::Ordering::Equal => Err(AppError::Validation(
            "Tied scores are not allowed".to_string(),
        )),
    }
}

fn side_pairs(team1: &[i64], team2: &[i64]) -> Vec<(i64, i32)> {
    team1
        .iter()
        .map(|id| (*id, 1))
        .chain(team2.iter().map(|id| (*id, 2)))
        .collect()
}

fn side_triples(
    participations: &[super::models::ParticipationModel],
) -> HashSet<[i64; 3]> {
    let mut triples = HashSet::new();
    for side in [1, 2] {
        let members: Vec<i64> = participations
            .iter()
            .filter(|p| p.team_number == side)
            .map(|p| p.player_id)
            .collect();
        if let Some(triple) = TeamDiscovery::canonical_key(&members) {
            triples.insert(triple);
        }
    }
    triples
}

/// Resolves lightweight summaries for a slice of games, preserving order.
pub async fn summarize_games(
    games: &[GameModel],
    game_repo: &(dyn GameRepository + Send + Sync),
    player_repo: &(dyn PlayerRepository + Send + Sync),
) -> Result<Vec<GameSummary>, AppError> {
    let mut summaries = Vec::with_capacity(games.len());

    for game in games {
        let participations = game_repo.participations_for_game(game.id).await?;
        let mut team1_player_names = Vec::new();
        let mut team2_player_names = Vec::new();

        for participation in participations {
            if let Some(player) = player_repo.get_player(participation.player_id).await? {
                if participation.team_number == 1 {
                    team1_player_names.push(player.name);
                } else {
                    team2_player_names.push(player.name);
                }
            }
        }

        summaries.push(GameSummary {
            id: game.id,
            team1_score: game.team1_score,
            team2_score: game.team2_score,
            winner_team: game.winner_team,
            location: game.location.clone(),
            played_at: game.played_at,
            team1_player_names,
            team2_player_names,
        });
    }

    Ok(summaries)
}
