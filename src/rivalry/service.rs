use std::sync::Arc;
use tracing::{debug, instrument};

use super::classifier::classify;
use super::config::RivalryConfig;
use super::types::{RivalryGame, RivalryStatsResponse, RosterRecord};
use crate::game::repository::GameRepository;
use crate::player::repository::PlayerRepository;
use crate::shared::{AppError, AppState};

const RECENT_RIVALRY_GAMES: usize = 5;

pub struct RivalryService {
    games: Arc<dyn GameRepository + Send + Sync>,
    players: Arc<dyn PlayerRepository + Send + Sync>,
    config: Arc<RivalryConfig>,
}

impl RivalryService {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            games: state.game_repository.clone(),
            players: state.player_repository.clone(),
            config: state.rivalry_config.clone(),
        }
    }

    /// Walks the full game history, newest first, keeping only games where
    /// the configured rosters faced each other exactly.
    #[instrument(skip(self))]
    pub async fn rivalry_stats(&self) -> Result<RivalryStatsResponse, AppError> {
        let mut total_games = 0i64;
        let mut a_wins = 0i64;
        let mut b_wins = 0i64;
        let mut a_points = 0i64;
        let mut b_points = 0i64;
        let mut recent_games = Vec::new();

        for game in self.games.list_games(usize::MAX).await? {
            let (team1_names, team2_names) = self.side_names(game.id).await?;
            let Some(sides) = classify(&self.config, &team1_names, &team2_names) else {
                continue;
            };

            let (a_score, _) = game.score_for_side(sides.roster_a_side);
            let (b_score, _) = game.score_for_side(sides.roster_b_side());
            let winner = if game.winner_team == sides.roster_a_side {
                a_wins += 1;
                self.config.roster_a.name.clone()
            } else {
                b_wins += 1;
                self.config.roster_b.name.clone()
            };

            total_games += 1;
            a_points += a_score as i64;
            b_points += b_score as i64;

            if recent_games.len() < RECENT_RIVALRY_GAMES {
                let (a_players, b_players) = if sides.roster_a_side == 1 {
                    (team1_names, team2_names)
                } else {
                    (team2_names, team1_names)
                };
                recent_games.push(RivalryGame {
                    id: game.id,
                    played_at: game.played_at,
                    location: game.location.clone(),
                    roster_a_score: a_score,
                    roster_b_score: b_score,
                    roster_a_players: a_players,
                    roster_b_players: b_players,
                    winner,
                });
            }
        }

        debug!(total_games, a_wins, b_wins, "Rivalry history scanned");
        Ok(RivalryStatsResponse {
            total_games,
            roster_a: RosterRecord {
                name: self.config.roster_a.name.clone(),
                wins: a_wins,
                win_percentage: win_percentage(a_wins, total_games),
                total_points: a_points,
            },
            roster_b: RosterRecord {
                name: self.config.roster_b.name.clone(),
                wins: b_wins,
                win_percentage: win_percentage(b_wins, total_games),
                total_points: b_points,
            },
            point_differential: a_points - b_points,
            recent_games,
        })
    }

    async fn side_names(&self, game_id: i64) -> Result<(Vec<String>, Vec<String>), AppError> {
        let participations = self.games.participations_for_game(game_id).await?;
        let ids: Vec<i64> = participations.iter().map(|p| p.player_id).collect();
        let players = self.players.get_players(&ids).await?;

        let name_of = |player_id: i64| {
            players
                .iter()
                .find(|p| p.id == player_id)
                .map(|p| p.name.clone())
        };

        let mut team1 = Vec::new();
        let mut team2 = Vec::new();
        for participation in &participations {
            if let Some(name) = name_of(participation.player_id) {
                if participation.team_number == 1 {
                    team1.push(name);
                } else {
                    team2.push(name);
                }
            }
        }
        Ok((team1, team2))
    }
}

fn win_percentage(wins: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        wins as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::repository::NewGame;
    use crate::shared::test_utils::AppStateBuilder;
    use chrono::{Duration, Utc};

    async fn seed_players(state: &AppState, names: &[&str]) -> Vec<i64> {
        let mut ids = Vec::new();
        for name in names {
            ids.push(
                state
                    .player_repository
                    .create_player(name)
                    .await
                    .unwrap()
                    .id,
            );
        }
        ids
    }

    async fn record_game(
        state: &AppState,
        side1: &[i64],
        side2: &[i64],
        scores: (i32, i32),
        days_ago: i64,
    ) {
        let roster: Vec<(i64, i32)> = side1
            .iter()
            .map(|id| (*id, 1))
            .chain(side2.iter().map(|id| (*id, 2)))
            .collect();
        state
            .game_repository
            .create_game(
                NewGame {
                    team1_score: scores.0,
                    team2_score: scores.1,
                    winner_team: if scores.0 > scores.1 { 1 } else { 2 },
                    location: None,
                    played_at: Utc::now() - Duration::days(days_ago),
                },
                &roster,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn empty_history_reports_zeroes() {
        let state = AppStateBuilder::new().build();
        let stats = RivalryService::from_state(&state)
            .rivalry_stats()
            .await
            .unwrap();
        assert_eq!(stats.total_games, 0);
        assert_eq!(stats.roster_a.win_percentage, 0.0);
        assert_eq!(stats.roster_b.win_percentage, 0.0);
        assert!(stats.recent_games.is_empty());
    }

    #[tokio::test]
    async fn qualifying_games_accumulate_both_orientations() {
        let state = AppStateBuilder::new().build();
        let orchard =
            seed_players(&state, &["Sean Nary", "Tyler Pendleton", "Reid Silverman"]).await;
        let dreher =
            seed_players(&state, &["Jeremy Cortazzo", "Danny Wersching", "AJ Partridge"]).await;

        // Orchard as side 1, winning 21-15
        record_game(&state, &orchard, &dreher, (21, 15), 2).await;
        // Orchard as side 2, losing 21-18
        record_game(&state, &dreher, &orchard, (21, 18), 1).await;

        let stats = RivalryService::from_state(&state)
            .rivalry_stats()
            .await
            .unwrap();
        assert_eq!(stats.total_games, 2);
        assert_eq!(stats.roster_a.wins, 1);
        assert_eq!(stats.roster_b.wins, 1);
        assert_eq!(stats.roster_a.win_percentage, 50.0);
        assert_eq!(stats.roster_a.total_points, 39);
        assert_eq!(stats.roster_b.total_points, 36);
        assert_eq!(stats.point_differential, 3);

        // Newest first
        assert_eq!(stats.recent_games[0].winner, "Dreher");
        assert_eq!(stats.recent_games[1].winner, "The Orchard");

        // Rosters are reported by name even when Orchard sat on side 2
        for game in &stats.recent_games {
            assert_eq!(game.roster_a_players.len(), 3);
            assert!(game.roster_a_players.iter().any(|n| n == "Sean Nary"));
            assert!(game.roster_b_players.iter().any(|n| n == "Jeremy Cortazzo"));
        }
    }

    #[tokio::test]
    async fn substitute_player_disqualifies_the_game() {
        let state = AppStateBuilder::new().build();
        let orchard =
            seed_players(&state, &["Sean Nary", "Tyler Pendleton", "Reid Silverman"]).await;
        let mut dreher =
            seed_players(&state, &["Jeremy Cortazzo", "Danny Wersching", "Brendan Meagher"]).await;

        record_game(&state, &orchard, &dreher, (21, 10), 3).await;
        let stats = RivalryService::from_state(&state)
            .rivalry_stats()
            .await
            .unwrap();
        assert_eq!(stats.total_games, 0);

        // Swapping the substitute for the real third member qualifies it
        dreher[2] = seed_players(&state, &["AJ Partridge"]).await[0];
        record_game(&state, &orchard, &dreher, (21, 10), 0).await;
        let stats = RivalryService::from_state(&state)
            .rivalry_stats()
            .await
            .unwrap();
        assert_eq!(stats.total_games, 1);
    }
}
