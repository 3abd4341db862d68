use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::models::PlayerModel;
use super::types::{LeaderboardEntry, PlayerCreateRequest, PlayerResponse, PlayerStatsResponse};
use crate::game::repository::GameRepository;
use crate::game::service::summarize_games;
use crate::player::repository::PlayerRepository;
use crate::shared::AppError;
use crate::stats::{compute_die_aggregate, season, DieAggregate, DieOutcome, Season};

const MAX_NAME_LENGTH: usize = 100;
const DEFAULT_RECENT_GAMES: usize = 10;

/// Service for player CRUD and Die statistics recomputation
pub struct PlayerService {
    players: Arc<dyn PlayerRepository + Send + Sync>,
    games: Arc<dyn GameRepository + Send + Sync>,
}

impl PlayerService {
    pub fn new(
        players: Arc<dyn PlayerRepository + Send + Sync>,
        games: Arc<dyn GameRepository + Send + Sync>,
    ) -> Self {
        Self { players, games }
    }

    #[instrument(skip(self, request))]
    pub async fn create_player(
        &self,
        request: PlayerCreateRequest,
    ) -> Result<PlayerResponse, AppError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Player name cannot be empty".to_string()));
        }
        if name.len() > MAX_NAME_LENGTH {
            return Err(AppError::Validation("Player name is too long".to_string()));
        }
        if self.players.find_by_name(name).await?.is_some() {
            return Err(AppError::Validation(
                "Player with this name already exists".to_string(),
            ));
        }

        let player = self.players.create_player(name).await?;
        info!(player_id = player.id, name = %player.name, "Player created");
        Ok(player.into())
    }

    #[instrument(skip(self))]
    pub async fn list_players(&self) -> Result<Vec<PlayerResponse>, AppError> {
        let players = self.players.list_players().await?;
        Ok(players.into_iter().map(PlayerResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_player(&self, player_id: i64) -> Result<PlayerResponse, AppError> {
        let player = self.require_player(player_id).await?;
        Ok(player.into())
    }

    /// Full recompute of a player's Die aggregates from source rows,
    /// persisted onto the player row. Idempotent.
    #[instrument(skip(self))]
    pub async fn recalculate_die_stats(&self, player_id: i64) -> Result<DieAggregate, AppError> {
        let history = self.die_history(player_id).await?;
        let outcomes: Vec<DieOutcome> = history.iter().map(|(outcome, _)| *outcome).collect();
        let aggregate = compute_die_aggregate(&outcomes);

        self.players.update_die_stats(player_id, &aggregate).await?;
        debug!(
            player_id,
            games_played = aggregate.games_played,
            "Die stats recalculated"
        );
        Ok(aggregate)
    }

    /// Detailed statistics for one player. `Season::All` reads the cached
    /// aggregate; a year scope recomputes on the fly without touching it.
    #[instrument(skip(self))]
    pub async fn player_stats(
        &self,
        player_id: i64,
        season: Season,
        limit: Option<usize>,
    ) -> Result<PlayerStatsResponse, AppError> {
        let player = self.require_player(player_id).await?;

        let stats = if season.is_all() {
            player.die_stats
        } else {
            let history = self.die_history(player_id).await?;
            let filtered = season::filter_by_season(history, season, |(_, played_at)| *played_at);
            let outcomes: Vec<DieOutcome> =
                filtered.iter().map(|(outcome, _)| *outcome).collect();
            compute_die_aggregate(&outcomes)
        };

        let limit = limit.unwrap_or(DEFAULT_RECENT_GAMES);
        let mut games = Vec::new();
        for participation in self.games.participations_for_player(player_id).await? {
            if let Some(game) = self.games.get_game(participation.game_id).await? {
                if season.contains(game.played_at) {
                    games.push(game);
                }
            }
        }
        games.sort_by(|a, b| b.played_at.cmp(&a.played_at));
        games.truncate(limit);

        let recent_games = summarize_games(&games, self.games.as_ref(), self.players.as_ref()).await?;

        Ok(PlayerStatsResponse {
            id: player.id,
            name: player.name,
            season: season_label(season),
            stats,
            recent_games,
        })
    }

    /// Die leaderboard: players ranked by win percentage, then games played.
    /// Season-scoped listings omit players with no games in that season.
    #[instrument(skip(self))]
    pub async fn leaderboard(&self, season: Season) -> Result<Vec<LeaderboardEntry>, AppError> {
        let players = self.players.list_players().await?;
        let mut entries = Vec::new();

        for player in players {
            let stats = if season.is_all() {
                player.die_stats
            } else {
                let history = self.die_history(player.id).await?;
                let filtered =
                    season::filter_by_season(history, season, |(_, played_at)| *played_at);
                let outcomes: Vec<DieOutcome> =
                    filtered.iter().map(|(outcome, _)| *outcome).collect();
                compute_die_aggregate(&outcomes)
            };

            if stats.games_played == 0 {
                continue;
            }

            entries.push(LeaderboardEntry {
                id: player.id,
                name: player.name,
                stats,
                golf_stats: season.is_all().then_some(player.golf_stats),
            });
        }

        entries.sort_by(|a, b| {
            b.stats
                .win_percentage
                .partial_cmp(&a.stats.win_percentage)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.stats.games_played.cmp(&a.stats.games_played))
        });

        Ok(entries)
    }

    /// The player's full Die history as recalculator inputs, paired with
    /// each game's timestamp for season filtering.
    async fn die_history(
        &self,
        player_id: i64,
    ) -> Result<Vec<(DieOutcome, chrono::DateTime<chrono::Utc>)>, AppError> {
        let participations = self.games.participations_for_player(player_id).await?;
        let mut history = Vec::with_capacity(participations.len());

        for participation in participations {
            let Some(game) = self.games.get_game(participation.game_id).await? else {
                continue;
            };
            let (own_score, opponent_score) = if participation.team_number == 1 {
                (game.team1_score, game.team2_score)
            } else {
                (game.team2_score, game.team1_score)
            };
            history.push((
                DieOutcome {
                    side: participation.team_number,
                    own_score,
                    opponent_score,
                    winner_side: game.winner_team,
                },
                game.played_at,
            ));
        }

        Ok(history)
    }

    async fn require_player(&self, player_id: i64) -> Result<PlayerModel, AppError> {
        self.players
            .get_player(player_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Player not found".to_string()))
    }
}

fn season_label(season: Season) -> String {
    match season {
        Season::All => "all".to_string(),
        Season::Year(year) => year.to_string(),
    }
}
