use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use tracing::{debug, instrument};

use super::models::{GolfParticipationModel, GolfRoundModel, HoleResultModel};
use crate::shared::AppError;

/// Round fields as validated by the service, before an id is assigned
#[derive(Debug, Clone)]
pub struct NewGolfRound {
    pub course: String,
    pub course_api_id: Option<i64>,
    pub tee_name: Option<String>,
    pub played_at: DateTime<Utc>,
    pub team1_holes_won: i32,
    pub team2_holes_won: i32,
    pub halved_holes: i32,
    pub winner_team: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct NewHoleResult {
    pub hole_number: i32,
    pub winner_team: Option<i32>,
    pub par: Option<i32>,
    pub yardage: Option<i32>,
}

#[async_trait]
pub trait GolfRepository {
    /// Creates the round with its participation and hole rows in one shot
    async fn create_round(
        &self,
        round: NewGolfRound,
        participations: &[(i64, i32)],
        holes: &[NewHoleResult],
    ) -> Result<GolfRoundModel, AppError>;
    async fn get_round(&self, round_id: i64) -> Result<Option<GolfRoundModel>, AppError>;
    /// Most recent first
    async fn list_rounds(&self, limit: usize) -> Result<Vec<GolfRoundModel>, AppError>;
    async fn rounds_by_ids(&self, round_ids: &[i64]) -> Result<Vec<GolfRoundModel>, AppError>;
    async fn update_round(&self, round: &GolfRoundModel) -> Result<(), AppError>;
    async fn replace_participations(
        &self,
        round_id: i64,
        participations: &[(i64, i32)],
    ) -> Result<(), AppError>;
    async fn replace_holes(&self, round_id: i64, holes: &[NewHoleResult])
        -> Result<(), AppError>;
    /// Deletes the round with its participation and hole rows
    async fn delete_round(&self, round_id: i64) -> Result<(), AppError>;
    async fn participations_for_round(
        &self,
        round_id: i64,
    ) -> Result<Vec<GolfParticipationModel>, AppError>;
    async fn participations_for_player(
        &self,
        player_id: i64,
    ) -> Result<Vec<GolfParticipationModel>, AppError>;
    /// Ordered by hole number
    async fn holes_for_round(&self, round_id: i64) -> Result<Vec<HoleResultModel>, AppError>;
}

pub struct InMemoryGolfRepository {
    rounds: Mutex<HashMap<i64, GolfRoundModel>>,
    participations: Mutex<HashMap<i64, GolfParticipationModel>>,
    holes: Mutex<HashMap<i64, HoleResultModel>>,
    next_round_id: AtomicI64,
    next_participation_id: AtomicI64,
    next_hole_id: AtomicI64,
}

impl InMemoryGolfRepository {
    pub fn new() -> Self {
        Self {
            rounds: Mutex::new(HashMap::new()),
            participations: Mutex::new(HashMap::new()),
            holes: Mutex::new(HashMap::new()),
            next_round_id: AtomicI64::new(1),
            next_participation_id: AtomicI64::new(1),
            next_hole_id: AtomicI64::new(1),
        }
    }

    fn insert_participations(&self, round_id: i64, participations: &[(i64, i32)]) {
        let mut map = self.participations.lock().unwrap();
        for (player_id, team_number) in participations {
            let id = self.next_participation_id.fetch_add(1, Ordering::SeqCst);
            map.insert(
                id,
                GolfParticipationModel {
                    id,
                    round_id,
                    player_id: *player_id,
                    team_number: *team_number,
                },
            );
        }
    }

    fn insert_holes(&self, round_id: i64, holes: &[NewHoleResult]) {
        let mut map = self.holes.lock().unwrap();
        for hole in holes {
            let id = self.next_hole_id.fetch_add(1, Ordering::SeqCst);
            map.insert(
                id,
                HoleResultModel {
                    id,
                    round_id,
                    hole_number: hole.hole_number,
                    winner_team: hole.winner_team,
                    par: hole.par,
                    yardage: hole.yardage,
                },
            );
        }
    }
}

impl Default for InMemoryGolfRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GolfRepository for InMemoryGolfRepository {
    #[instrument(skip(self, round, participations, holes))]
    async fn create_round(
        &self,
        round: NewGolfRound,
        participations: &[(i64, i32)],
        holes: &[NewHoleResult],
    ) -> Result<GolfRoundModel, AppError> {
        let id = self.next_round_id.fetch_add(1, Ordering::SeqCst);
        let model = GolfRoundModel {
            id,
            course: round.course,
            course_api_id: round.course_api_id,
            tee_name: round.tee_name,
            played_at: round.played_at,
            team1_holes_won: round.team1_holes_won,
            team2_holes_won: round.team2_holes_won,
            halved_holes: round.halved_holes,
            winner_team: round.winner_team,
        };
        self.rounds.lock().unwrap().insert(id, model.clone());
        self.insert_participations(id, participations);
        self.insert_holes(id, holes);

        debug!(round_id = id, course = %model.course, "Golf round created");
        Ok(model)
    }

    #[instrument(skip(self))]
    async fn get_round(&self, round_id: i64) -> Result<Option<GolfRoundModel>, AppError> {
        Ok(self.rounds.lock().unwrap().get(&round_id).cloned())
    }

    #[instrument(skip(self))]
    async fn list_rounds(&self, limit: usize) -> Result<Vec<GolfRoundModel>, AppError> {
        let rounds = self.rounds.lock().unwrap();
        let mut list: Vec<GolfRoundModel> = rounds.values().cloned().collect();
        list.sort_by(|a, b| b.played_at.cmp(&a.played_at).then(b.id.cmp(&a.id)));
        list.truncate(limit);
        Ok(list)
    }

    #[instrument(skip(self))]
    async fn rounds_by_ids(&self, round_ids: &[i64]) -> Result<Vec<GolfRoundModel>, AppError> {
        let rounds = self.rounds.lock().unwrap();
        Ok(round_ids
            .iter()
            .filter_map(|id| rounds.get(id).cloned())
            .collect())
    }

    #[instrument(skip(self, round))]
    async fn update_round(&self, round: &GolfRoundModel) -> Result<(), AppError> {
        let mut rounds = self.rounds.lock().unwrap();
        if !rounds.contains_key(&round.id) {
            return Err(AppError::NotFound(format!(
                "Golf round {} not found",
                round.id
            )));
        }
        rounds.insert(round.id, round.clone());
        Ok(())
    }

    #[instrument(skip(self, participations))]
    async fn replace_participations(
        &self,
        round_id: i64,
        participations: &[(i64, i32)],
    ) -> Result<(), AppError> {
        self.participations
            .lock()
            .unwrap()
            .retain(|_, p| p.round_id != round_id);
        self.insert_participations(round_id, participations);
        Ok(())
    }

    #[instrument(skip(self, holes))]
    async fn replace_holes(
        &self,
        round_id: i64,
        holes: &[NewHoleResult],
    ) -> Result<(), AppError> {
        self.holes
            .lock()
            .unwrap()
            .retain(|_, h| h.round_id != round_id);
        self.insert_holes(round_id, holes);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_round(&self, round_id: i64) -> Result<(), AppError> {
        let removed = self.rounds.lock().unwrap().remove(&round_id);
        if removed.is_none() {
            return Err(AppError::NotFound(format!(
                "Golf round {} not found",
                round_id
            )));
        }
        self.participations
            .lock()
            .unwrap()
            .retain(|_, p| p.round_id != round_id);
        self.holes
            .lock()
            .unwrap()
            .retain(|_, h| h.round_id != round_id);
        debug!(round_id, "Golf round deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn participations_for_round(
        &self,
        round_id: i64,
    ) -> Result<Vec<GolfParticipationModel>, AppError> {
        let participations = self.participations.lock().unwrap();
        let mut list: Vec<GolfParticipationModel> = participations
            .values()
            .filter(|p| p.round_id == round_id)
            .cloned()
            .collect();
        list.sort_by_key(|p| p.id);
        Ok(list)
    }

    #[instrument(skip(self))]
    async fn participations_for_player(
        &self,
        player_id: i64,
    ) -> Result<Vec<GolfParticipationModel>, AppError> {
        let participations = self.participations.lock().unwrap();
        let mut list: Vec<GolfParticipationModel> = participations
            .values()
            .filter(|p| p.player_id == player_id)
            .cloned()
            .collect();
        list.sort_by_key(|p| p.id);
        Ok(list)
    }

    #[instrument(skip(self))]
    async fn holes_for_round(&self, round_id: i64) -> Result<Vec<HoleResultModel>, AppError> {
        let holes = self.holes.lock().unwrap();
        let mut list: Vec<HoleResultModel> = holes
            .values()
            .filter(|h| h.round_id == round_id)
            .cloned()
            .collect();
        list.sort_by_key(|h| h.hole_number);
        Ok(list)
    }
}
