//! Round gate: refuses to move past a round while any real match in it is pending.

use crate::models::{GameMatch, TournamentId, TournamentResult};
use crate::store::Store;

/// True iff every non-bye match of `round` has an outcome.
///
/// A round with no matches at all is reported complete; whether the round
/// was ever generated is the caller's concern.
pub fn is_round_complete<S: Store + ?Sized>(
    store: &S,
    tournament_id: TournamentId,
    round: u32,
) -> TournamentResult<bool> {
    let matches = store.matches(tournament_id, Some(round))?;
    Ok(all_results_entered(&matches))
}

pub fn all_results_entered(matches: &[GameMatch]) -> bool {
    matches.iter().filter(|m| !m.is_bye()).all(GameMatch::is_decided)
}
