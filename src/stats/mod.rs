// Pure statistics core. Everything in here is a fold over raw history rows;
// persistence of the results is the caller's job.

pub mod aggregate;
pub mod season;

pub use aggregate::{
    compute_die_aggregate, compute_golf_aggregate, compute_par_breakdown, DieAggregate, DieOutcome,
    GolfAggregate, GolfOutcome, ParBreakdown, ParBucket, ParHoleOutcome,
};
pub use season::Season;
