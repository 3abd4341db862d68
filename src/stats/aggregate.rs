use serde::{Deserialize, Serialize};

/// One Die game as seen from a single participant's side
#[derive(Debug, Clone, Copy)]
pub struct DieOutcome {
    pub side: i32,
    pub own_score: i32,
    pub opponent_score: i32,
    pub winner_side: i32,
}

impl DieOutcome {
    pub fn won(&self) -> bool {
        self.winner_side == self.side
    }

    pub fn margin(&self) -> i32 {
        self.own_score - self.opponent_score
    }
}

/// Cached Die statistics for a player or team.
///
/// Always derived by `compute_die_aggregate` from the full participation
/// history; never mutated incrementally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DieAggregate {
    pub games_played: i64,
    pub games_won: i64,
    pub total_points_scored: i64,
    pub total_points_against: i64,
    pub win_percentage: f64,
    pub avg_win_margin: f64,
    pub avg_loss_margin: f64,
}

impl DieAggregate {
    pub fn point_differential(&self) -> i64 {
        self.total_points_scored - self.total_points_against
    }
}

/// Full recompute of Die aggregates from raw outcomes.
pub fn compute_die_aggregate(outcomes: &[DieOutcome]) -> DieAggregate {
    let games_played = outcomes.len() as i64;
    let mut games_won = 0i64;
    let mut total_points_scored = 0i64;
    let mut total_points_against = 0i64;
    let mut win_margins: Vec<i64> = Vec::new();
    let mut loss_margins: Vec<i64> = Vec::new();

    for outcome in outcomes {
        total_points_scored += outcome.own_score as i64;
        total_points_against += outcome.opponent_score as i64;

        if outcome.won() {
            games_won += 1;
            win_margins.push(outcome.margin() as i64);
        } else {
            loss_margins.push(-outcome.margin() as i64);
        }
    }

    DieAggregate {
        games_played,
        games_won,
        total_points_scored,
        total_points_against,
        win_percentage: percentage(games_won, games_played),
        avg_win_margin: mean(&win_margins),
        avg_loss_margin: mean(&loss_margins),
    }
}

/// One golf round as seen from a single participant's side.
/// `winner_side` of None means the round was halved overall.
#[derive(Debug, Clone, Copy)]
pub struct GolfOutcome {
    pub side: i32,
    pub holes_won: i32,
    pub holes_lost: i32,
    pub winner_side: Option<i32>,
}

/// Cached golf statistics for a player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GolfAggregate {
    pub rounds_played: i64,
    pub rounds_won: i64,
    pub rounds_lost: i64,
    pub rounds_drawn: i64,
    pub holes_won: i64,
    pub holes_lost: i64,
    pub win_percentage: f64,
}

/// Full recompute of golf aggregates from raw outcomes.
pub fn compute_golf_aggregate(outcomes: &[GolfOutcome]) -> GolfAggregate {
    let rounds_played = outcomes.len() as i64;
    let mut rounds_won = 0i64;
    let mut rounds_lost = 0i64;
    let mut rounds_drawn = 0i64;
    let mut holes_won = 0i64;
    let mut holes_lost = 0i64;

    for outcome in outcomes {
        holes_won += outcome.holes_won as i64;
        holes_lost += outcome.holes_lost as i64;

        match outcome.winner_side {
            None => rounds_drawn += 1,
            Some(winner) if winner == outcome.side => rounds_won += 1,
            Some(_) => rounds_lost += 1,
        }
    }

    GolfAggregate {
        rounds_played,
        rounds_won,
        rounds_lost,
        rounds_drawn,
        holes_won,
        holes_lost,
        win_percentage: percentage(rounds_won, rounds_played),
    }
}

/// One hole result as seen from a single participant, carrying the par
/// snapshot taken when the round was recorded.
#[derive(Debug, Clone, Copy)]
pub struct ParHoleOutcome {
    pub side: i32,
    pub par: Option<i32>,
    pub winner_side: Option<i32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParBucket {
    pub holes_won: i64,
    pub holes_lost: i64,
    pub holes_halved: i64,
    pub win_percentage: f64,
}

impl ParBucket {
    fn record(&mut self, side: i32, winner_side: Option<i32>) {
        match winner_side {
            None => self.holes_halved += 1,
            Some(winner) if winner == side => self.holes_won += 1,
            Some(_) => self.holes_lost += 1,
        }
    }

    fn finalize(&mut self) {
        let total = self.holes_won + self.holes_lost + self.holes_halved;
        self.win_percentage = percentage(self.holes_won, total);
    }
}

/// Per-par performance breakdown for golf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParBreakdown {
    pub par_3: ParBucket,
    pub par_4: ParBucket,
    pub par_5: ParBucket,
}

/// Buckets hole results by the par snapshot recorded with each hole.
/// Holes without a recorded par are skipped.
pub fn compute_par_breakdown(holes: &[ParHoleOutcome]) -> ParBreakdown {
    let mut breakdown = ParBreakdown::default();

    for hole in holes {
        let bucket = match hole.par {
            Some(3) => &mut breakdown.par_3,
            Some(4) => &mut breakdown.par_4,
            Some(5) => &mut breakdown.par_5,
            _ => continue,
        };
        bucket.record(hole.side, hole.winner_side);
    }

    breakdown.par_3.finalize();
    breakdown.par_4.finalize();
    breakdown.par_5.finalize();
    breakdown
}

// Zero denominators collapse to 0.0 rather than NaN, so entities with no
// history always render as 0%.
fn percentage(numerator: i64, denominator: i64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64 * 100.0
    }
}

fn mean(values: &[i64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<i64>() as f64 / values.len() as f64
    }
}
