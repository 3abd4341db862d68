use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::models::TeamModel;
use super::repository::TeamRepository;
use crate::game::repository::GameRepository;
use crate::player::repository::PlayerRepository;
use crate::shared::AppError;
use crate::stats::{compute_die_aggregate, DieOutcome};

/// A triple qualifies as a team once it has this many shared same-side games
pub const MIN_TEAM_GAMES: usize = 3;

/// Infers persistent 3-player teams from game history. Teams are never
/// chosen up front; a trio that keeps showing up on the same side of the
/// scoreboard becomes a team row, and stops being one when its shared game
/// count falls back under the bar.
pub struct TeamDiscovery {
    games: Arc<dyn GameRepository + Send + Sync>,
    players: Arc<dyn PlayerRepository + Send + Sync>,
    teams: Arc<dyn TeamRepository + Send + Sync>,
}

impl TeamDiscovery {
    pub fn new(
        games: Arc<dyn GameRepository + Send + Sync>,
        players: Arc<dyn PlayerRepository + Send + Sync>,
        teams: Arc<dyn TeamRepository + Send + Sync>,
    ) -> Self {
        Self {
            games,
            players,
            teams,
        }
    }

    /// Canonical team key: the sorted triple of player ids, provided the
    /// side actually had exactly 3 distinct members.
    pub fn canonical_key(side_members: &[i64]) -> Option<[i64; 3]> {
        if side_members.len() != 3 {
            return None;
        }
        let mut triple = [side_members[0], side_members[1], side_members[2]];
        triple.sort_unstable();
        if triple[0] == triple[1] || triple[1] == triple[2] {
            return None;
        }
        Some(triple)
    }

    /// Scans every game and maps each canonical triple to the games it
    /// played together on the same side.
    #[instrument(skip(self))]
    pub async fn scan_team_games(&self) -> Result<HashMap<[i64; 3], Vec<i64>>, AppError> {
        let games = self.games.list_games(usize::MAX).await?;
        let mut team_games: HashMap<[i64; 3], Vec<i64>> = HashMap::new();

        for game in games {
            let participations = self.games.participations_for_game(game.id).await?;
            for side in [1, 2] {
                let members: Vec<i64> = participations
                    .iter()
                    .filter(|p| p.team_number == side)
                    .map(|p| p.player_id)
                    .collect();
                if let Some(triple) = Self::canonical_key(&members) {
                    team_games.entry(triple).or_default().push(game.id);
                }
            }
        }

        Ok(team_games)
    }

    /// Recomputes one triple from its game ids. Returns the refreshed row,
    /// or None (deleting any existing row) when the triple no longer has
    /// enough shared games to qualify.
    #[instrument(skip(self, game_ids))]
    pub async fn recalculate_team(
        &self,
        player_ids: [i64; 3],
        game_ids: &[i64],
    ) -> Result<Option<TeamModel>, AppError> {
        if game_ids.len() < MIN_TEAM_GAMES {
            let removed = self.teams.delete_by_players(player_ids).await?;
            if removed {
                debug!(?player_ids, games = game_ids.len(), "Team fell below threshold, row deleted");
            }
            return Ok(None);
        }

        let mut outcomes = Vec::with_capacity(game_ids.len());
        for game in self.games.games_by_ids(game_ids).await? {
            let participations = self.games.participations_for_game(game.id).await?;
            let on_team: Vec<_> = participations
                .iter()
                .filter(|p| player_ids.contains(&p.player_id))
                .collect();
            if on_team.len() != 3 {
                continue;
            }
            // All three sat on the same side; take it from the first
            let side = on_team[0].team_number;
            let (own_score, opponent_score) = game.score_for_side(side);
            outcomes.push(DieOutcome {
                side,
                own_score,
                opponent_score,
                winner_side: game.winner_team,
            });
        }

        let stats = compute_die_aggregate(&outcomes);
        let team_name = self.derive_team_name(player_ids).await?;
        let team = self.teams.upsert_team(player_ids, &team_name, &stats).await?;

        debug!(
            team_id = team.id,
            team_name = %team.team_name,
            games_played = stats.games_played,
            "Team recalculated"
        );
        Ok(Some(team))
    }

    /// Drops every team row and regenerates from scratch. Safe because team
    /// identity is nothing more than the player triple.
    #[instrument(skip(self))]
    pub async fn rebuild_all(&self) -> Result<Vec<TeamModel>, AppError> {
        self.teams.delete_all().await?;

        let team_games = self.scan_team_games().await?;
        let mut rebuilt = Vec::new();
        for (triple, game_ids) in team_games {
            if let Some(team) = self.recalculate_team(triple, &game_ids).await? {
                rebuilt.push(team);
            }
        }

        info!(teams = rebuilt.len(), "Teams rebuilt from game history");
        Ok(rebuilt)
    }

    /// Incremental path for a single game write: refresh only the (at most
    /// two) triples formed by its sides.
    #[instrument(skip(self))]
    pub async fn update_for_game(&self, game_id: i64) -> Result<(), AppError> {
        let participations = self.games.participations_for_game(game_id).await?;
        let mut triples = Vec::new();
        for side in [1, 2] {
            let members: Vec<i64> = participations
                .iter()
                .filter(|p| p.team_number == side)
                .map(|p| p.player_id)
                .collect();
            if let Some(triple) = Self::canonical_key(&members) {
                triples.push(triple);
            }
        }
        self.refresh_triples(&triples).await
    }

    /// Refreshes a known set of triples without touching unrelated teams.
    #[instrument(skip(self, triples))]
    pub async fn refresh_triples(&self, triples: &[[i64; 3]]) -> Result<(), AppError> {
        if triples.is_empty() {
            return Ok(());
        }
        let team_games = self.scan_team_games().await?;
        for triple in triples {
            let game_ids = team_games.get(triple).cloned().unwrap_or_default();
            self.recalculate_team(*triple, &game_ids).await?;
        }
        Ok(())
    }

    /// Sorted last names joined with `/`, regenerated from current player
    /// names on every refresh.
    async fn derive_team_name(&self, player_ids: [i64; 3]) -> Result<String, AppError> {
        let mut players = self.players.get_players(&player_ids).await?;
        players.sort_by(|a, b| a.name.cmp(&b.name));

        let last_names: Vec<&str> = players.iter().map(|p| p.last_name()).collect();
        Ok(last_names.join("/"))
    }
}
