//! Round lifecycle: creating tournaments, registering competitors and
//! advancing the round counter.

use crate::logic::pairing::generate_pairings;
use crate::logic::round_gate::is_round_complete;
use crate::models::{
    Competitor, GameMatch, Tournament, TournamentError, TournamentId, TournamentResult,
};
use crate::store::Store;
use rand::Rng;

/// Create and store a tournament with `num_rounds` rounds, none played.
pub fn create_tournament<S: Store + ?Sized>(
    store: &mut S,
    name: &str,
    num_rounds: u32,
) -> TournamentResult<Tournament> {
    let tournament = Tournament::new(name, num_rounds)?;
    store.insert_tournament(tournament.clone())?;
    log::info!(
        "Created tournament {} ({}, {} rounds)",
        tournament.id,
        tournament.name,
        tournament.num_rounds
    );
    Ok(tournament)
}

/// Register a competitor. Name must be non-empty, rating non-negative.
///
/// Late entry after round 1 is allowed; the newcomer starts on zero points.
pub fn add_competitor<S: Store + ?Sized>(
    store: &mut S,
    tournament_id: TournamentId,
    name: &str,
    rating: i64,
) -> TournamentResult<Competitor> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TournamentError::EmptyName);
    }
    let rating = u32::try_from(rating).map_err(|_| TournamentError::InvalidRating(rating))?;
    Ok(store.insert_competitor(tournament_id, name, rating)?)
}

/// Pair the next round and move the round counter forward.
///
/// Refused with `TournamentComplete` once every round exists, and with
/// `RoundNotComplete` while the current round has pending results. The
/// counter only moves when pairing succeeds.
pub fn advance_round<S, R>(
    store: &mut S,
    tournament_id: TournamentId,
    rng: &mut R,
) -> TournamentResult<Vec<GameMatch>>
where
    S: Store + ?Sized,
    R: Rng + ?Sized,
{
    let tournament = store.tournament(tournament_id)?;
    let next = tournament
        .next_round()
        .ok_or(TournamentError::TournamentComplete)?;

    let current = tournament.current_round;
    if current > 0 && !is_round_complete(&*store, tournament_id, current)? {
        return Err(TournamentError::RoundNotComplete { round: current });
    }

    let matches = generate_pairings(store, tournament_id, next, rng)?;
    store.set_current_round(tournament_id, next)?;
    log::info!("Tournament {} advanced to round {}", tournament_id, next);
    Ok(matches)
}

/// Matches of one round.
pub fn round_matches<S: Store + ?Sized>(
    store: &S,
    tournament_id: TournamentId,
    round: u32,
) -> TournamentResult<Vec<GameMatch>> {
    Ok(store.matches(tournament_id, Some(round))?)
}
