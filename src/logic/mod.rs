//! Tournament business logic: standings, round gate, pairing, results, round lifecycle.

mod lifecycle;
mod pairing;
mod results;
mod round_gate;
mod standings;

pub use lifecycle::{add_competitor, advance_round, create_tournament, round_matches};
pub use pairing::{
    bracket_count, generate_pairings, pair_brackets, plan_round, split_brackets, RoundPlan,
};
pub use results::{record_outcome, record_round_results, ResultsReport};
pub use round_gate::{all_results_entered, is_round_complete};
pub use standings::{compute_standings, standings_from};
