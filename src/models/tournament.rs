//! Tournament, TournamentState and TournamentError.

use crate::models::game::MatchId;
use crate::store::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Debug, Error)]
pub enum TournamentError {
    /// Matches for this round already exist; the request is a no-op.
    #[error("Pairings for round {round} have already been generated")]
    AlreadyGenerated { round: u32 },
    /// Fewer than two competitors registered.
    #[error("Need at least 2 competitors to generate pairings")]
    NotEnoughCompetitors,
    #[error("Invalid result {0}: must be 0, 0.5 or 1")]
    InvalidOutcome(f64),
    /// A non-bye match of the current round has no result yet.
    #[error("Cannot generate next round pairings until all results for round {round} are entered")]
    RoundNotComplete { round: u32 },
    #[error("All rounds completed")]
    TournamentComplete,
    /// Rounds are numbered from 1.
    #[error("Invalid round number {0}")]
    InvalidRound(u32),
    #[error("Bye result for match {0} cannot be edited")]
    ByeNotEditable(MatchId),
    #[error("Match {0} does not belong to this round")]
    MatchNotInRound(MatchId),
    #[error("Name is required")]
    EmptyName,
    #[error("Number of rounds must be a positive integer")]
    InvalidRoundCount,
    #[error("Rating must be a non-negative integer (got {0})")]
    InvalidRating(i64),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TournamentError {
    /// Errors the caller may treat as a no-op rather than a failure.
    pub fn is_benign(&self) -> bool {
        matches!(self, TournamentError::AlreadyGenerated { .. })
    }
}

/// Result type for tournament operations.
pub type TournamentResult<T> = Result<T, TournamentError>;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Where a tournament is in its round lifecycle (derived from the round counter).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "round")]
pub enum TournamentState {
    /// Round counter is 0.
    NotStarted,
    /// Rounds 1..num_rounds-1 generated; more may follow.
    InProgress(u32),
    /// Final round generated. No further pairing.
    Completed,
}

/// A tournament's stored record. Competitors and matches live in the store.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// Total rounds, fixed at creation.
    pub num_rounds: u32,
    /// Last generated round; 0 before the first pairing.
    pub current_round: u32,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a tournament with no rounds played. Name must be non-empty, rounds positive.
    pub fn new(name: impl Into<String>, num_rounds: u32) -> Result<Self, TournamentError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        if num_rounds == 0 {
            return Err(TournamentError::InvalidRoundCount);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            num_rounds,
            current_round: 0,
            created_at: Utc::now(),
        })
    }

    pub fn state(&self) -> TournamentState {
        if self.current_round == 0 {
            TournamentState::NotStarted
        } else if self.current_round >= self.num_rounds {
            TournamentState::Completed
        } else {
            TournamentState::InProgress(self.current_round)
        }
    }

    /// Next round to pair, or None once every round has been generated.
    pub fn next_round(&self) -> Option<u32> {
        (self.current_round < self.num_rounds).then(|| self.current_round + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validates_name_and_rounds() {
        assert!(matches!(Tournament::new("  ", 3), Err(TournamentError::EmptyName)));
        assert!(matches!(
            Tournament::new("Open", 0),
            Err(TournamentError::InvalidRoundCount)
        ));
        let t = Tournament::new("  Spring Open ", 5).unwrap();
        assert_eq!(t.name, "Spring Open");
        assert_eq!(t.current_round, 0);
    }

    #[test]
    fn state_follows_round_counter() {
        let mut t = Tournament::new("Open", 2).unwrap();
        assert_eq!(t.state(), TournamentState::NotStarted);
        assert_eq!(t.next_round(), Some(1));
        t.current_round = 1;
        assert_eq!(t.state(), TournamentState::InProgress(1));
        t.current_round = 2;
        assert_eq!(t.state(), TournamentState::Completed);
        assert_eq!(t.next_round(), None);
    }
}
