//! Match (game) and Outcome for one-on-one pairings, including byes.

use crate::models::competitor::CompetitorId;
use crate::models::tournament::{TournamentError, TournamentId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Result of a match from competitor one's side. Serialized as its score (1, 0.5 or 0).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    /// Points for competitor one (1.0, 0.5 or 0.0).
    pub fn score(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Draw => 0.5,
            Outcome::Loss => 0.0,
        }
    }

    /// Points for competitor two.
    pub fn opponent_score(self) -> f64 {
        1.0 - self.score()
    }
}

impl From<Outcome> for f64 {
    fn from(outcome: Outcome) -> Self {
        outcome.score()
    }
}

impl TryFrom<f64> for Outcome {
    type Error = TournamentError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 1.0 {
            Ok(Outcome::Win)
        } else if value == 0.5 {
            Ok(Outcome::Draw)
        } else if value == 0.0 {
            Ok(Outcome::Loss)
        } else {
            Err(TournamentError::InvalidOutcome(value))
        }
    }
}

/// A single pairing in a round. `competitor_two == None` is a bye.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub round: u32,
    pub competitor_one: CompetitorId,
    pub competitor_two: Option<CompetitorId>,
    /// None while pending.
    pub outcome: Option<Outcome>,
}

impl GameMatch {
    /// Pending match between two competitors. The lower id always goes first.
    pub fn new(tournament_id: TournamentId, round: u32, a: CompetitorId, b: CompetitorId) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            round,
            competitor_one: a.min(b),
            competitor_two: Some(a.max(b)),
            outcome: None,
        }
    }

    /// Bye for `competitor`: no opponent, already decided as a win.
    pub fn bye(tournament_id: TournamentId, round: u32, competitor: CompetitorId) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            round,
            competitor_one: competitor,
            competitor_two: None,
            outcome: Some(Outcome::Win),
        }
    }

    pub fn is_bye(&self) -> bool {
        self.competitor_two.is_none()
    }

    pub fn is_decided(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn involves(&self, id: CompetitorId) -> bool {
        self.competitor_one == id || self.competitor_two == Some(id)
    }

    /// Points this match has earned `id` so far (0.0 while pending or if not involved).
    pub fn points_for(&self, id: CompetitorId) -> f64 {
        match self.outcome {
            None => 0.0,
            Some(o) if self.competitor_one == id => o.score(),
            Some(o) if self.competitor_two == Some(id) => o.opponent_score(),
            Some(_) => 0.0,
        }
    }
}
