//! Result entry: recording outcomes for single matches or a whole round.

use crate::models::{
    GameMatch, MatchId, Outcome, TournamentError, TournamentId, TournamentResult,
};
use crate::store::Store;
use std::collections::HashSet;

/// Set the outcome of a two-competitor match (overwrites an earlier result).
pub fn record_outcome<S: Store + ?Sized>(
    store: &mut S,
    match_id: MatchId,
    outcome: Outcome,
) -> TournamentResult<GameMatch> {
    let mut m = store.game_match(match_id)?;
    if m.is_bye() {
        return Err(TournamentError::ByeNotEditable(match_id));
    }
    store.set_outcome(match_id, outcome)?;
    m.outcome = Some(outcome);
    Ok(m)
}

/// What happened to a batch of results for one round.
#[derive(Debug, Default)]
pub struct ResultsReport {
    pub updated: usize,
    /// Entries that were refused; the stored result for those matches is unchanged.
    pub rejected: Vec<(MatchId, TournamentError)>,
}

/// Record raw result values for matches of `round`.
///
/// `None` entries are left pending; byes are skipped. Values outside
/// {0, 0.5, 1} and matches from another round are rejected individually
/// without affecting the rest of the batch.
pub fn record_round_results<S: Store + ?Sized>(
    store: &mut S,
    tournament_id: TournamentId,
    round: u32,
    entries: &[(MatchId, Option<f64>)],
) -> TournamentResult<ResultsReport> {
    let (byes, games): (Vec<GameMatch>, Vec<GameMatch>) = store
        .matches(tournament_id, Some(round))?
        .into_iter()
        .partition(GameMatch::is_bye);
    let byes: HashSet<MatchId> = byes.iter().map(|m| m.id).collect();
    let in_round: HashSet<MatchId> = games.iter().map(|m| m.id).collect();

    let mut report = ResultsReport::default();
    for &(match_id, value) in entries {
        let Some(value) = value else { continue };
        if byes.contains(&match_id) {
            continue;
        }
        if !in_round.contains(&match_id) {
            report
                .rejected
                .push((match_id, TournamentError::MatchNotInRound(match_id)));
            continue;
        }
        match Outcome::try_from(value) {
            Ok(outcome) => {
                record_outcome(store, match_id, outcome)?;
                report.updated += 1;
            }
            Err(e) => {
                log::warn!("Rejected result {} for match {}", value, match_id);
                report.rejected.push((match_id, e));
            }
        }
    }
    Ok(report)
}
