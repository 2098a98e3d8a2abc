//! Storage seam: the `Store` trait the tournament logic reads and writes through,
//! and `Storage`, a lock-guarded handle that gives callers atomic transactions.

mod memory;

pub use memory::MemoryStore;

use crate::models::{Competitor, GameMatch, MatchId, Outcome, Tournament, TournamentId};
use std::sync::RwLock;
use thiserror::Error;

/// Errors raised by a store backend.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum StoreError {
    #[error("Tournament not found")]
    TournamentNotFound(TournamentId),
    #[error("Match not found")]
    MatchNotFound(MatchId),
    /// Backend unreachable or in a broken state. The core never retries.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// CRUD access to tournaments, competitors and matches.
pub trait Store {
    fn tournament(&self, id: TournamentId) -> StoreResult<Tournament>;
    /// All tournaments, oldest first.
    fn tournaments(&self) -> StoreResult<Vec<Tournament>>;
    fn insert_tournament(&mut self, tournament: Tournament) -> StoreResult<()>;
    /// Removes the tournament with its competitors and matches.
    fn delete_tournament(&mut self, id: TournamentId) -> StoreResult<()>;
    fn set_current_round(&mut self, id: TournamentId, round: u32) -> StoreResult<()>;

    /// Competitors of a tournament in registration order.
    fn competitors(&self, tournament_id: TournamentId) -> StoreResult<Vec<Competitor>>;
    /// Registers a competitor; the store assigns the next id.
    fn insert_competitor(
        &mut self,
        tournament_id: TournamentId,
        name: &str,
        rating: u32,
    ) -> StoreResult<Competitor>;

    /// Matches of a tournament, optionally restricted to one round.
    fn matches(&self, tournament_id: TournamentId, round: Option<u32>) -> StoreResult<Vec<GameMatch>>;
    fn game_match(&self, id: MatchId) -> StoreResult<GameMatch>;
    fn insert_matches(&mut self, matches: &[GameMatch]) -> StoreResult<()>;
    fn set_outcome(&mut self, id: MatchId, outcome: Outcome) -> StoreResult<()>;
}

/// Shared handle to a store. Writers are serialized; a transaction runs on a
/// staged copy that is committed only when the closure returns `Ok`.
pub struct Storage<S> {
    inner: RwLock<S>,
}

impl<S: Store + Clone> Storage<S> {
    pub fn new(store: S) -> Self {
        Self {
            inner: RwLock::new(store),
        }
    }

    /// Run a read-only operation.
    pub fn read<T, E>(&self, f: impl FnOnce(&S) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let guard = self
            .inner
            .read()
            .map_err(|_| StoreError::Unavailable("lock error".to_string()))?;
        f(&guard)
    }

    /// Run `f` atomically: either all of its writes land or none do.
    pub fn transaction<T, E>(&self, f: impl FnOnce(&mut S) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| StoreError::Unavailable("lock error".to_string()))?;
        let mut staged = guard.clone();
        let out = f(&mut staged)?;
        *guard = staged;
        Ok(out)
    }
}
