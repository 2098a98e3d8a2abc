//! Data structures for the chess tournament: competitors, matches, tournament record.

mod competitor;
mod game;
mod tournament;

pub use competitor::{Competitor, CompetitorId, Standing};
pub use game::{GameMatch, MatchId, Outcome};
pub use tournament::{
    Tournament, TournamentError, TournamentId, TournamentResult, TournamentState,
};
