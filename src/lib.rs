//! Chess tournament organizer: library with models, pairing logic and storage.

pub mod config;
pub mod csv_io;
pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    add_competitor, advance_round, compute_standings, create_tournament, generate_pairings,
    is_round_complete, plan_round, record_outcome, record_round_results, round_matches,
    ResultsReport, RoundPlan,
};
pub use models::{
    Competitor, CompetitorId, GameMatch, MatchId, Outcome, Standing, Tournament,
    TournamentError, TournamentId, TournamentResult, TournamentState,
};
pub use store::{MemoryStore, Storage, Store, StoreError};
