//! Competitor and Standing data structures.

use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};

/// Identifier for a competitor, assigned sequentially by the store.
///
/// Ordered: the lower id is always `competitor_one` in a stored pairing and
/// ids are the last tie-break in standings.
pub type CompetitorId = u32;

/// A competitor registered to exactly one tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: CompetitorId,
    pub tournament_id: TournamentId,
    pub name: String,
    /// Pre-tournament rating; seeds round 1 and breaks score ties.
    pub rating: u32,
}

/// A competitor's position in the standings. Derived, never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub competitor_id: CompetitorId,
    pub name: String,
    pub rating: u32,
    pub score: f64,
}

impl Standing {
    /// Standing with zero points (no decided matches yet).
    pub fn unscored(c: &Competitor) -> Self {
        Self {
            competitor_id: c.id,
            name: c.name.clone(),
            rating: c.rating,
            score: 0.0,
        }
    }
}
