use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::discovery::{TeamDiscovery, MIN_TEAM_GAMES};
use super::models::TeamModel;
use super::repository::TeamRepository;
use super::types::{TeamResponse, TeamStatsResponse, TeamsListResponse};
use crate::game::repository::GameRepository;
use crate::game::service::summarize_games;
use crate::player::repository::PlayerRepository;
use crate::shared::{AppError, AppState};
use crate::stats::{compute_die_aggregate, DieAggregate, DieOutcome, Season};

const RECENT_TEAM_GAMES: usize = 5;
/// Share of total games a trio must have played together to show up in the
/// all-time listing, on top of the hard floor of MIN_TEAM_GAMES.
const THRESHOLD_PERCENTAGE: f64 = 10.0;

pub struct TeamService {
    games: Arc<dyn GameRepository + Send + Sync>,
    players: Arc<dyn PlayerRepository + Send + Sync>,
    teams: Arc<dyn TeamRepository + Send + Sync>,
    discovery: TeamDiscovery,
}

impl TeamService {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            games: state.game_repository.clone(),
            players: state.player_repository.clone(),
            teams: state.team_repository.clone(),
            discovery: TeamDiscovery::new(
                state.game_repository.clone(),
                state.player_repository.clone(),
                state.team_repository.clone(),
            ),
        }
    }

    /// All-time listings apply the relative threshold; season listings show
    /// every discovered team that played at least once that year.
    #[instrument(skip(self))]
    pub async fn list_teams(&self, season: Season) -> Result<TeamsListResponse, AppError> {
        let total_games = self.games.count_games().await? as usize;
        let min_games_required = listing_threshold(total_games);

        let mut teams: Vec<TeamResponse> = Vec::new();
        for team in self.teams.list_teams().await? {
            match season {
                Season::All => {
                    if (team.stats.games_played as usize) >= min_games_required {
                        teams.push(team.into());
                    }
                }
                Season::Year(_) => {
                    let stats = self.season_stats(&team, season).await?;
                    if stats.games_played > 0 {
                        let mut response = TeamResponse::from(team);
                        response.point_differential = stats.point_differential();
                        response.stats = stats;
                        teams.push(response);
                    }
                }
            }
        }

        // Point differential only breaks ties on the all-time board
        teams.sort_by(|a, b| {
            let ranking = b
                .stats
                .win_percentage
                .partial_cmp(&a.stats.win_percentage)
                .unwrap_or(Ordering::Equal)
                .then(b.stats.games_played.cmp(&a.stats.games_played));
            if season.is_all() {
                ranking.then(b.point_differential.cmp(&a.point_differential))
            } else {
                ranking
            }
        });

        debug!(
            teams = teams.len(),
            total_games, min_games_required, "Team listing assembled"
        );
        Ok(TeamsListResponse {
            teams,
            total_games,
            min_games_required,
            threshold_percentage: THRESHOLD_PERCENTAGE,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_team_stats(&self, team_id: i64) -> Result<TeamStatsResponse, AppError> {
        let team = self
            .teams
            .get_team(team_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", team_id)))?;

        let players = self.players.get_players(&team.player_ids).await?;

        let mut shared_games = self.shared_games(&team).await?;
        shared_games.sort_by(|a, b| b.played_at.cmp(&a.played_at).then(b.id.cmp(&a.id)));
        shared_games.truncate(RECENT_TEAM_GAMES);
        let recent_games =
            summarize_games(&shared_games, self.games.as_ref(), self.players.as_ref()).await?;

        Ok(TeamStatsResponse {
            id: team.id,
            team_name: team.team_name,
            point_differential: team.stats.point_differential(),
            stats: team.stats,
            players: players.into_iter().map(Into::into).collect(),
            recent_games,
        })
    }

    /// Full regeneration of the teams table from game history.
    #[instrument(skip(self))]
    pub async fn rebuild(&self) -> Result<usize, AppError> {
        let rebuilt = self.discovery.rebuild_all().await?;
        info!(teams = rebuilt.len(), "Team rebuild finished");
        Ok(rebuilt.len())
    }

    /// Recomputes a team's aggregate from only the games inside `season`.
    async fn season_stats(
        &self,
        team: &TeamModel,
        season: Season,
    ) -> Result<DieAggregate, AppError> {
        let games = self.shared_games(team).await?;
        let mut outcomes = Vec::new();
        for game in games {
            if !season.contains(game.played_at) {
                continue;
            }
            if let Some(side) = self.side_for_team(game.id, team).await? {
                let (own_score, opponent_score) = game.score_for_side(side);
                outcomes.push(DieOutcome {
                    side,
                    own_score,
                    opponent_score,
                    winner_side: game.winner_team,
                });
            }
        }
        Ok(compute_die_aggregate(&outcomes))
    }

    /// Games where all three members played on the same side.
    async fn shared_games(
        &self,
        team: &TeamModel,
    ) -> Result<Vec<crate::game::models::GameModel>, AppError> {
        let mut game_ids = Vec::new();
        for game in self.games.list_games(usize::MAX).await? {
            if self.side_for_team(game.id, team).await?.is_some() {
                game_ids.push(game.id);
            }
        }
        self.games.games_by_ids(&game_ids).await
    }

    async fn side_for_team(
        &self,
        game_id: i64,
        team: &TeamModel,
    ) -> Result<Option<i32>, AppError> {
        let participations = self.games.participations_for_game(game_id).await?;
        let on_team: Vec<_> = participations
            .iter()
            .filter(|p| team.player_ids.contains(&p.player_id))
            .collect();
        if on_team.len() == 3 && on_team.iter().all(|p| p.team_number == on_team[0].team_number)
        {
            Ok(Some(on_team[0].team_number))
        } else {
            Ok(None)
        }
    }
}

fn listing_threshold(total_games: usize) -> usize {
    let relative = (total_games as f64 * THRESHOLD_PERCENTAGE / 100.0).ceil() as usize;
    relative.max(MIN_TEAM_GAMES)
}
