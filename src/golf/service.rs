use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::models::GolfRoundModel;
use super::repository::{GolfRepository, NewGolfRound, NewHoleResult};
use super::types::{
    GolfLeaderboardEntry, GolfPlayerStatsResponse, GolfRoundCreateRequest, GolfRoundResponse,
    GolfRoundSummary, GolfRoundUpdateRequest, HoleResultRequest, HoleResultResponse,
};
use crate::course::repository::CourseRepository;
use crate::player::models::PlayerModel;
use crate::player::repository::PlayerRepository;
use crate::shared::{AppError, AppState};
use crate::stats::{
    compute_golf_aggregate, compute_par_breakdown, GolfOutcome, ParHoleOutcome,
    Season,
};

const PLAYERS_PER_SIDE: usize = 2;
const HOLES_PER_ROUND: usize = 18;
const DEFAULT_LIST_LIMIT: usize = 250;
const LEADERBOARD_RECENT_ROUNDS: usize = 5;
const DETAIL_RECENT_ROUNDS: usize = 10;

pub struct GolfService {
    golf: Arc<dyn GolfRepository + Send + Sync>,
    players: Arc<dyn PlayerRepository + Send + Sync>,
    courses: Arc<dyn CourseRepository + Send + Sync>,
}

impl GolfService {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            golf: state.golf_repository.clone(),
            players: state.player_repository.clone(),
            courses: state.course_repository.clone(),
        }
    }

    #[instrument(skip(self, request))]
    pub async fn create_round(
        &self,
        request: GolfRoundCreateRequest,
    ) -> Result<GolfRoundResponse, AppError> {
        let course = request.course.trim();
        if course.is_empty() {
            return Err(AppError::Validation("Course name cannot be empty".to_string()));
        }
        self.validate_sides(&request.team1_players, &request.team2_players)
            .await?;
        validate_holes(&request.holes)?;

        let (team1_holes_won, team2_holes_won, halved_holes, winner_team) =
            derive_results(&request.holes);
        let snapshots = self
            .par_snapshots(request.course_api_id, request.tee_name.as_deref())
            .await?;
        let holes = attach_snapshots(&request.holes, &snapshots);

        let roster: Vec<(i64, i32)> = request
            .team1_players
            .iter()
            .map(|id| (*id, 1))
            .chain(request.team2_players.iter().map(|id| (*id, 2)))
            .collect();
        let round = self
            .golf
            .create_round(
                NewGolfRound {
                    course: course.to_string(),
                    course_api_id: request.course_api_id,
                    tee_name: request.tee_name,
                    played_at: request.played_at.unwrap_or_else(chrono::Utc::now),
                    team1_holes_won,
                    team2_holes_won,
                    halved_holes,
                    winner_team,
                },
                &roster,
                &holes,
            )
            .await?;

        for (player_id, _) in &roster {
            self.recalculate_golf_stats(*player_id).await?;
        }

        info!(round_id = round.id, course = %round.course, "Golf round recorded");
        self.get_round(round.id).await
    }

    #[instrument(skip(self))]
    pub async fn get_round(&self, round_id: i64) -> Result<GolfRoundResponse, AppError> {
        let round = self.require_round(round_id).await?;
        let participations = self.golf.participations_for_round(round_id).await?;

        let side_ids = |side: i32| -> Vec<i64> {
            participations
                .iter()
                .filter(|p| p.team_number == side)
                .map(|p| p.player_id)
                .collect()
        };
        let team1_players = self.players.get_players(&side_ids(1)).await?;
        let team2_players = self.players.get_players(&side_ids(2)).await?;

        let hole_results = self
            .golf
            .holes_for_round(round_id)
            .await?
            .into_iter()
            .map(|h| HoleResultResponse {
                hole_number: h.hole_number,
                winner_team: h.winner_team,
                par: h.par,
                yardage: h.yardage,
            })
            .collect();

        Ok(GolfRoundResponse {
            id: round.id,
            course: round.course,
            course_api_id: round.course_api_id,
            tee_name: round.tee_name,
            played_at: round.played_at,
            team1_holes_won: round.team1_holes_won,
            team2_holes_won: round.team2_holes_won,
            halved_holes: round.halved_holes,
            winner_team: round.winner_team,
            team1_players: team1_players.into_iter().map(Into::into).collect(),
            team2_players: team2_players.into_iter().map(Into::into).collect(),
            hole_results,
        })
    }

    #[instrument(skip(self))]
    pub async fn list_rounds(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<GolfRoundSummary>, AppError> {
        let rounds = self
            .golf
            .list_rounds(limit.unwrap_or(DEFAULT_LIST_LIMIT))
            .await?;
        self.summarize_rounds(&rounds).await
    }

    #[instrument(skip(self, request))]
    pub async fn update_round(
        &self,
        round_id: i64,
        request: GolfRoundUpdateRequest,
    ) -> Result<GolfRoundResponse, AppError> {
        let mut round = self.require_round(round_id).await?;

        let mut affected: HashSet<i64> = self
            .golf
            .participations_for_round(round_id)
            .await?
            .iter()
            .map(|p| p.player_id)
            .collect();

        if let Some(course) = request.course {
            let course = course.trim();
            if course.is_empty() {
                return Err(AppError::Validation("Course name cannot be empty".to_string()));
            }
            round.course = course.to_string();
        }

        match (request.team1_players, request.team2_players) {
            (Some(team1), Some(team2)) => {
                self.validate_sides(&team1, &team2).await?;
                affected.extend(team1.iter().copied());
                affected.extend(team2.iter().copied());
                let roster: Vec<(i64, i32)> = team1
                    .iter()
                    .map(|id| (*id, 1))
                    .chain(team2.iter().map(|id| (*id, 2)))
                    .collect();
                self.golf.replace_participations(round_id, &roster).await?;
            }
            (None, None) => {}
            _ => {
                return Err(AppError::Validation(
                    "Roster updates must include both teams".to_string(),
                ))
            }
        }

        if let Some(hole_requests) = request.holes {
            validate_holes(&hole_requests)?;
            let (team1_holes_won, team2_holes_won, halved_holes, winner_team) =
                derive_results(&hole_requests);
            let snapshots = self
                .par_snapshots(round.course_api_id, round.tee_name.as_deref())
                .await?;
            self.golf
                .replace_holes(round_id, &attach_snapshots(&hole_requests, &snapshots))
                .await?;

            round.team1_holes_won = team1_holes_won;
            round.team2_holes_won = team2_holes_won;
            round.halved_holes = halved_holes;
            round.winner_team = winner_team;
        }

        self.golf.update_round(&round).await?;
        for player_id in affected {
            self.recalculate_golf_stats(player_id).await?;
        }

        debug!(round_id, "Golf round updated");
        self.get_round(round_id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_round(&self, round_id: i64) -> Result<(), AppError> {
        self.require_round(round_id).await?;
        let affected: Vec<i64> = self
            .golf
            .participations_for_round(round_id)
            .await?
            .iter()
            .map(|p| p.player_id)
            .collect();

        self.golf.delete_round(round_id).await?;
        for player_id in affected {
            self.recalculate_golf_stats(player_id).await?;
        }

        info!(round_id, "Golf round deleted");
        Ok(())
    }

    /// Players ranked by golf win percentage; players with no rounds in the
    /// requested season are left out entirely.
    #[instrument(skip(self))]
    pub async fn leaderboard(
        &self,
        season: Season,
    ) -> Result<Vec<GolfLeaderboardEntry>, AppError> {
        let mut entries = Vec::new();
        for player in self.players.list_players().await? {
            let rounds = self.rounds_for_player(player.id, season).await?;
            if rounds.is_empty() {
                continue;
            }

            let stats = if season.is_all() {
                player.golf_stats
            } else {
                compute_golf_aggregate(&self.golf_outcomes(player.id, season).await?)
            };

            let mut recent = rounds;
            recent.truncate(LEADERBOARD_RECENT_ROUNDS);
            entries.push(GolfLeaderboardEntry {
                id: player.id,
                name: player.name.clone(),
                stats,
                recent_rounds: self.summarize_rounds(&recent).await?,
            });
        }

        entries.sort_by(|a, b| {
            b.stats
                .win_percentage
                .partial_cmp(&a.stats.win_percentage)
                .unwrap_or(Ordering::Equal)
                .then(b.stats.rounds_played.cmp(&a.stats.rounds_played))
        });
        Ok(entries)
    }

    /// Detailed golf stats for one player, with the per-par breakdown built
    /// from the hole snapshots of every round they played.
    #[instrument(skip(self))]
    pub async fn player_stats(
        &self,
        player_id: i64,
    ) -> Result<GolfPlayerStatsResponse, AppError> {
        let player = self.require_player(player_id).await?;

        let mut par_holes = Vec::new();
        for participation in self.golf.participations_for_player(player_id).await? {
            for hole in self.golf.holes_for_round(participation.round_id).await? {
                par_holes.push(ParHoleOutcome {
                    side: participation.team_number,
                    par: hole.par,
                    winner_side: hole.winner_team,
                });
            }
        }

        let mut recent = self.rounds_for_player(player_id, Season::All).await?;
        recent.truncate(DETAIL_RECENT_ROUNDS);

        Ok(GolfPlayerStatsResponse {
            id: player.id,
            name: player.name,
            stats: player.golf_stats,
            par_breakdown: compute_par_breakdown(&par_holes),
            recent_rounds: self.summarize_rounds(&recent).await?,
        })
    }

    /// Full recompute of one player's cached golf aggregate.
    #[instrument(skip(self))]
    pub async fn recalculate_golf_stats(&self, player_id: i64) -> Result<(), AppError> {
        let outcomes = self.golf_outcomes(player_id, Season::All).await?;
        let aggregate = compute_golf_aggregate(&outcomes);
        self.players.update_golf_stats(player_id, &aggregate).await?;
        debug!(
            player_id,
            rounds_played = aggregate.rounds_played,
            "Golf stats recalculated"
        );
        Ok(())
    }

    async fn golf_outcomes(
        &self,
        player_id: i64,
        season: Season,
    ) -> Result<Vec<GolfOutcome>, AppError> {
        let participations = self.golf.participations_for_player(player_id).await?;
        let mut outcomes = Vec::with_capacity(participations.len());
        for participation in participations {
            let Some(round) = self.golf.get_round(participation.round_id).await? else {
                continue;
            };
            if !season.contains(round.played_at) {
                continue;
            }
            let (holes_won, holes_lost) = round.holes_for_side(participation.team_number);
            outcomes.push(GolfOutcome {
                side: participation.team_number,
                holes_won,
                holes_lost,
                winner_side: round.winner_team,
            });
        }
        Ok(outcomes)
    }

    /// Rounds this player took part in, season-filtered, newest first.
    async fn rounds_for_player(
        &self,
        player_id: i64,
        season: Season,
    ) -> Result<Vec<GolfRoundModel>, AppError> {
        let round_ids: Vec<i64> = self
            .golf
            .participations_for_player(player_id)
            .await?
            .iter()
            .map(|p| p.round_id)
            .collect();
        let mut rounds: Vec<GolfRoundModel> = self
            .golf
            .rounds_by_ids(&round_ids)
            .await?
            .into_iter()
            .filter(|r| season.contains(r.played_at))
            .collect();
        rounds.sort_by(|a, b| b.played_at.cmp(&a.played_at).then(b.id.cmp(&a.id)));
        Ok(rounds)
    }

    async fn summarize_rounds(
        &self,
        rounds: &[GolfRoundModel],
    ) -> Result<Vec<GolfRoundSummary>, AppError> {
        let mut summaries = Vec::with_capacity(rounds.len());
        for round in rounds {
            let participations = self.golf.participations_for_round(round.id).await?;
            let ids: Vec<i64> = participations.iter().map(|p| p.player_id).collect();
            let players = self.players.get_players(&ids).await?;
            let names: HashMap<i64, String> =
                players.into_iter().map(|p| (p.id, p.name)).collect();

            let side_names = |side: i32| -> Vec<String> {
                participations
                    .iter()
                    .filter(|p| p.team_number == side)
                    .filter_map(|p| names.get(&p.player_id).cloned())
                    .collect()
            };

            summaries.push(GolfRoundSummary {
                id: round.id,
                course: round.course.clone(),
                played_at: round.played_at,
                team1_holes_won: round.team1_holes_won,
                team2_holes_won: round.team2_holes_won,
                halved_holes: round.halved_holes,
                winner_team: round.winner_team,
                team1_player_names: side_names(1),
                team2_player_names: side_names(2),
            });
        }
        Ok(summaries)
    }

    async fn validate_sides(&self, team1: &[i64], team2: &[i64]) -> Result<(), AppError> {
        if team1.len() != PLAYERS_PER_SIDE || team2.len() != PLAYERS_PER_SIDE {
            return Err(AppError::Validation(format!(
                "Each team must have exactly {} players",
                PLAYERS_PER_SIDE
            )));
        }
        let all: Vec<i64> = team1.iter().chain(team2.iter()).copied().collect();
        let distinct: HashSet<i64> = all.iter().copied().collect();
        if distinct.len() != all.len() {
            return Err(AppError::Validation(
                "A player cannot appear twice in a round".to_string(),
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

    /// Maps hole number to the (par, yardage) snapshot for the linked
    /// cached course tee. Empty when the round has no course link or the
    /// course is not cached.
    async fn par_snapshots(
        &self,
        course_api_id: Option<i64>,
        tee_name: Option<&str>,
    ) -> Result<HashMap<i32, (Option<i32>, Option<i32>)>, AppError> {
        let Some(api_id) = course_api_id else {
            return Ok(HashMap::new());
        };
        let Some(course) = self.courses.find_by_api_id(api_id).await? else {
            return Ok(HashMap::new());
        };

        let tee = match tee_name {
            Some(name) => course
                .tees
                .iter()
                .find(|t| t.tee_name.eq_ignore_ascii_case(name)),
            None => course.tees.first(),
        };
        let Some(tee) = tee else {
            return Ok(HashMap::new());
        };

        Ok(tee
            .holes
            .iter()
            .map(|h| (h.hole_number, (h.par, h.yardage)))
            .collect())
    }

    async fn require_round(&self, round_id: i64) -> Result<GolfRoundModel, AppError> {
        self.golf
            .get_round(round_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Golf round {} not found", round_id)))
    }

    async fn require_player(&self, player_id: i64) -> Result<PlayerModel, AppError> {
        self.players
            .get_player(player_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Player {} not found", player_id)))
    }
}

/// Counts hole results per side and derives the round winner; an equal
/// count of won holes means a halved round (None).
fn derive_results(holes: &[HoleResultRequest]) -> (i32, i32, i32, Option<i32>) {
    let team1_won = holes.iter().filter(|h| h.winner_team == Some(1)).count() as i32;
    let team2_won = holes.iter().filter(|h| h.winner_team == Some(2)).count() as i32;
    let halved = holes.iter().filter(|h| h.winner_team.is_none()).count() as i32;

    let winner = match team1_won.cmp(&team2_won) {
        Ordering::Greater => Some(1),
        Ordering::Less => Some(2),
        Ordering::Equal => None,
    };
    (team1_won, team2_won, halved, winner)
}

fn validate_holes(holes: &[HoleResultRequest]) -> Result<(), AppError> {
    if holes.len() != HOLES_PER_ROUND {
        return Err(AppError::Validation(format!(
            "A round must record exactly {} holes",
            HOLES_PER_ROUND
        )));
    }
    let mut seen = HashSet::new();
    for hole in holes {
        if !(1..=HOLES_PER_ROUND as i32).contains(&hole.hole_number) {
            return Err(AppError::Validation(format!(
                "Hole number {} is out of range",
                hole.hole_number
            )));
        }
        if !seen.insert(hole.hole_number) {
            return Err(AppError::Validation(format!(
                "Duplicate result for hole {}",
                hole.hole_number
            )));
        }
        if let Some(winner) = hole.winner_team {
            if winner != 1 && winner != 2 {
                return Err(AppError::Validation(
                    "Hole winner must be team 1, team 2, or null".to_string(),
                ));
            }
        }
    }
    Ok(())
}

fn attach_snapshots(
    holes: &[HoleResultRequest],
    snapshots: &HashMap<i32, (Option<i32>, Option<i32>)>,
) -> Vec<NewHoleResult> {
    holes
        .iter()
        .map(|h| {
            let (par, yardage) = snapshots.get(&h.hole_number).copied().unwrap_or((None, None));
            NewHoleResult {
                hole_number: h.hole_number,
                winner_team: h.winner_team,
                par,
                yardage,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::AppStateBuilder;
    use crate::stats::GolfAggregate;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn holes_with_winners(team1: usize, team2: usize) -> Vec<HoleResultRequest> {
        (1..=18)
            .map(|n| HoleResultRequest {
                hole_number: n as i32,
                winner_team: if n <= team1 {
                    Some(1)
                } else if n <= team1 + team2 {
                    Some(2)
                } else {
                    None
                },
            })
            .collect()
    }

    async fn seed_players(state: &AppState, count: usize) -> Vec<i64> {
        let names = ["Ana Reyes", "Ben Ochoa", "Cal Irwin", "Dov Marsh", "Eli Stone"];
        let mut ids = Vec::new();
        for name in names.iter().take(count) {
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

    fn create_request(ids: &[i64], holes: Vec<HoleResultRequest>) -> GolfRoundCreateRequest {
        GolfRoundCreateRequest {
            course: "Rosewood Links".to_string(),
            course_api_id: None,
            tee_name: None,
            played_at: Some(Utc.with_ymd_and_hms(2025, 7, 4, 9, 0, 0).unwrap()),
            team1_players: ids[..2].to_vec(),
            team2_players: ids[2..4].to_vec(),
            holes,
        }
    }

    #[rstest]
    #[case(10, 6, Some(1))]
    #[case(6, 10, Some(2))]
    #[case(8, 8, None)]
    fn winner_follows_hole_majority(
        #[case] team1: usize,
        #[case] team2: usize,
        #[case] expected: Option<i32>,
    ) {
        let (t1, t2, halved, winner) = derive_results(&holes_with_winners(team1, team2));
        assert_eq!(t1, team1 as i32);
        assert_eq!(t2, team2 as i32);
        assert_eq!(halved, 18 - (team1 + team2) as i32);
        assert_eq!(winner, expected);
    }

    #[rstest]
    #[case(17)]
    #[case(19)]
    fn wrong_hole_count_is_rejected(#[case] count: usize) {
        let holes: Vec<HoleResultRequest> = (1..=count)
            .map(|n| HoleResultRequest {
                hole_number: n as i32,
                winner_team: None,
            })
            .collect();
        assert!(matches!(
            validate_holes(&holes),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn duplicate_hole_number_is_rejected() {
        let mut holes = holes_with_winners(9, 9);
        holes[17].hole_number = 1;
        assert!(matches!(
            validate_holes(&holes),
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn create_round_updates_all_four_players() {
        let state = AppStateBuilder::new().build();
        let ids = seed_players(&state, 4).await;
        let service = GolfService::from_state(&state);

        let round = service
            .create_round(create_request(&ids, holes_with_winners(10, 6)))
            .await
            .unwrap();
        assert_eq!(round.team1_holes_won, 10);
        assert_eq!(round.team2_holes_won, 6);
        assert_eq!(round.halved_holes, 2);
        assert_eq!(round.winner_team, Some(1));
        assert_eq!(round.hole_results.len(), 18);

        let winner = state.player_repository.get_player(ids[0]).await.unwrap().unwrap();
        assert_eq!(winner.golf_stats.rounds_played, 1);
        assert_eq!(winner.golf_stats.rounds_won, 1);
        assert_eq!(winner.golf_stats.holes_won, 10);
        assert_eq!(winner.golf_stats.holes_lost, 6);
        assert_eq!(winner.golf_stats.win_percentage, 100.0);

        let loser = state.player_repository.get_player(ids[2]).await.unwrap().unwrap();
        assert_eq!(loser.golf_stats.rounds_lost, 1);
        assert_eq!(loser.golf_stats.holes_won, 6);
        assert_eq!(loser.golf_stats.holes_lost, 10);
    }

    #[tokio::test]
    async fn halved_round_counts_as_drawn_for_everyone() {
        let state = AppStateBuilder::new().build();
        let ids = seed_players(&state, 4).await;
        let service = GolfService::from_state(&state);

        service
            .create_round(create_request(&ids, holes_with_winners(8, 8)))
            .await
            .unwrap();

        for id in &ids {
            let player = state.player_repository.get_player(*id).await.unwrap().unwrap();
            assert_eq!(player.golf_stats.rounds_drawn, 1);
            assert_eq!(player.golf_stats.rounds_won, 0);
            assert_eq!(player.golf_stats.rounds_lost, 0);
            assert_eq!(player.golf_stats.win_percentage, 0.0);
        }
    }

    #[tokio::test]
    async fn duplicate_player_between_teams_is_rejected() {
        let state = AppStateBuilder::new().build();
        let ids = seed_players(&state, 4).await;
        let service = GolfService::from_state(&state);

        let mut request = create_request(&ids, holes_with_winners(9, 9));
        request.team2_players[0] = request.team1_players[0];
        assert!(matches!(
            service.create_round(request).await.unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn replacing_holes_rederives_the_winner() {
        let state = AppStateBuilder::new().build();
        let ids = seed_players(&state, 4).await;
        let service = GolfService::from_state(&state);

        let round = service
            .create_round(create_request(&ids, holes_with_winners(10, 6)))
            .await
            .unwrap();

        let updated = service
            .update_round(
                round.id,
                GolfRoundUpdateRequest {
                    holes: Some(holes_with_winners(5, 11)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.winner_team, Some(2));

        let former_winner = state.player_repository.get_player(ids[0]).await.unwrap().unwrap();
        assert_eq!(former_winner.golf_stats.rounds_won, 0);
        assert_eq!(former_winner.golf_stats.rounds_lost, 1);
    }

    #[tokio::test]
    async fn partial_roster_update_is_rejected() {
        let state = AppStateBuilder::new().build();
        let ids = seed_players(&state, 5).await;
        let service = GolfService::from_state(&state);

        let round = service
            .create_round(create_request(&ids, holes_with_winners(9, 9)))
            .await
            .unwrap();
        let err = service
            .update_round(
                round.id,
                GolfRoundUpdateRequest {
                    team1_players: Some(vec![ids[0], ids[4]]),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_round_rolls_stats_back() {
        let state = AppStateBuilder::new().build();
        let ids = seed_players(&state, 4).await;
        let service = GolfService::from_state(&state);

        let round = service
            .create_round(create_request(&ids, holes_with_winners(10, 6)))
            .await
            .unwrap();
        service.delete_round(round.id).await.unwrap();

        for id in &ids {
            let player = state.player_repository.get_player(*id).await.unwrap().unwrap();
            assert_eq!(player.golf_stats, GolfAggregate::default());
        }
    }

    #[tokio::test]
    async fn leaderboard_omits_players_without_rounds() {
        let state = AppStateBuilder::new().build();
        let ids = seed_players(&state, 5).await;
        let service = GolfService::from_state(&state);

        service
            .create_round(create_request(&ids, holes_with_winners(10, 6)))
            .await
            .unwrap();

        let entries = service.leaderboard(Season::All).await.unwrap();
        assert_eq!(entries.len(), 4);
        assert!(entries.iter().all(|e| e.id != ids[4]));
        // Winners sorted ahead of losers
        assert_eq!(entries[0].stats.win_percentage, 100.0);
        assert_eq!(entries[3].stats.win_percentage, 0.0);
    }

    #[tokio::test]
    async fn season_leaderboard_filters_rounds_by_year() {
        let state = AppStateBuilder::new().build();
        let ids = seed_players(&state, 4).await;
        let service = GolfService::from_state(&state);

        let mut old_round = create_request(&ids, holes_with_winners(10, 6));
        old_round.played_at = Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap());
        service.create_round(old_round).await.unwrap();

        let entries = service.leaderboard(Season::Year(2023)).await.unwrap();
        assert!(entries.is_empty());

        let entries = service.leaderboard(Season::Year(2024)).await.unwrap();
        assert_eq!(entries.len(), 4);
    }

    #[tokio::test]
    async fn player_stats_buckets_holes_by_par_snapshot() {
        use crate::course::models::{CourseModel, TeeHole, TeeModel};

        let state = AppStateBuilder::new().build();
        let ids = seed_players(&state, 4).await;

        // Cache a course whose front nine is par 3 and back nine par 5
        let holes: Vec<TeeHole> = (1..=18)
            .map(|n| TeeHole {
                hole_number: n,
                par: Some(if n <= 9 { 3 } else { 5 }),
                yardage: Some(150),
                handicap: None,
            })
            .collect();
        state
            .course_repository
            .insert_course(CourseModel {
                id: 0,
                api_id: 42,
                club_name: "Rosewood CC".to_string(),
                course_name: "Rosewood Links".to_string(),
                address: None,
                city: None,
                state: None,
                country: None,
                latitude: None,
                longitude: None,
                tees: vec![TeeModel {
                    tee_name: "Blue".to_string(),
                    gender: "male".to_string(),
                    course_rating: None,
                    slope_rating: None,
                    total_yards: None,
                    par_total: Some(72),
                    holes,
                }],
            })
            .await
            .unwrap();

        let service = GolfService::from_state(&state);
        let mut request = create_request(&ids, holes_with_winners(10, 6));
        request.course_api_id = Some(42);
        request.tee_name = Some("Blue".to_string());
        service.create_round(request).await.unwrap();

        let stats = service.player_stats(ids[0]).await.unwrap();
        let breakdown = stats.par_breakdown;
        // Holes 1-9 are par 3 and all won by team 1
        assert_eq!(breakdown.par_3.holes_won, 9);
        assert_eq!(breakdown.par_3.win_percentage, 100.0);
        // Holes 10-16 lost, 17-18 halved, all par 5
        assert_eq!(breakdown.par_5.holes_lost, 6);
        assert_eq!(breakdown.par_5.holes_won, 1);
        assert_eq!(breakdown.par_5.holes_halved, 2);
        assert_eq!(breakdown.par_4.holes_won + breakdown.par_4.holes_lost, 0);
    }
}
