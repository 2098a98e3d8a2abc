//! Pairing generation: bye assignment, bracket split and cross-bracket shuffle.

use crate::logic::standings::compute_standings;
use crate::models::{
    CompetitorId, GameMatch, Standing, TournamentError, TournamentId, TournamentResult,
};
use crate::store::Store;
use rand::seq::SliceRandom;
use rand::Rng;

/// Pairings for one round before they are stored.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RoundPlan {
    pub round: u32,
    /// Lowest-standing competitor when the field is odd.
    pub bye: Option<CompetitorId>,
    /// (lower id, higher id).
    pub pairs: Vec<(CompetitorId, CompetitorId)>,
    /// Competitors left without a match by an uneven bracket layout.
    pub unpaired: Vec<CompetitorId>,
}

/// Number of brackets for `round` over a pool of `pool` competitors.
///
/// Two for round 1, `2^(round-1)` afterwards, never more than the pool.
pub fn bracket_count(round: u32, pool: usize) -> usize {
    let wanted = if round <= 1 {
        2
    } else {
        1usize.checked_shl(round - 1).unwrap_or(usize::MAX)
    };
    wanted.min(pool)
}

/// Split an ordered pool into `count` contiguous brackets. The first
/// `pool.len() % count` brackets take one extra member.
pub fn split_brackets<T: Clone>(pool: &[T], count: usize) -> Vec<Vec<T>> {
    if count == 0 {
        return Vec::new();
    }
    let size = pool.len() / count;
    let remainder = pool.len() % count;

    let mut brackets = Vec::with_capacity(count);
    let mut start = 0;
    for i in 0..count {
        let len = if i < remainder { size + 1 } else { size };
        brackets.push(pool[start..start + len].to_vec());
        start += len;
    }
    brackets
}

/// Pair bracket 0 with 1, 2 with 3, ...: shuffle the second bracket of each
/// couple and match position-wise. Returns the pairs and whoever was left over
/// (a trailing bracket, or the excess of the larger bracket).
pub fn pair_brackets<R: Rng + ?Sized>(
    brackets: Vec<Vec<CompetitorId>>,
    rng: &mut R,
) -> (Vec<(CompetitorId, CompetitorId)>, Vec<CompetitorId>) {
    let mut pairs = Vec::new();
    let mut unpaired = Vec::new();

    let mut iter = brackets.into_iter();
    while let Some(group_a) = iter.next() {
        let Some(mut group_b) = iter.next() else {
            unpaired.extend(group_a);
            break;
        };
        group_b.shuffle(rng);

        let n = group_a.len().min(group_b.len());
        unpaired.extend_from_slice(&group_a[n..]);
        unpaired.extend_from_slice(&group_b[n..]);
        pairs.extend(
            group_a
                .iter()
                .zip(group_b.iter())
                .map(|(&a, &b)| (a.min(b), a.max(b))),
        );
    }
    (pairs, unpaired)
}

/// Plan `round` from standings ordered best first.
///
/// Round 1 is re-seeded purely by rating. An odd field gives the last
/// competitor a bye before the remaining pool is bracketed.
pub fn plan_round<R: Rng + ?Sized>(
    mut standings: Vec<Standing>,
    round: u32,
    rng: &mut R,
) -> TournamentResult<RoundPlan> {
    if standings.len() < 2 {
        return Err(TournamentError::NotEnoughCompetitors);
    }
    if round == 1 {
        standings.sort_by(|a, b| b.rating.cmp(&a.rating));
    }

    let mut pool: Vec<CompetitorId> = standings.iter().map(|s| s.competitor_id).collect();
    let bye = if pool.len() % 2 == 1 { pool.pop() } else { None };

    let count = bracket_count(round, pool.len());
    let brackets = split_brackets(&pool, count);
    log::debug!(
        "Round {}: {} competitors in {} brackets (sizes {:?})",
        round,
        pool.len(),
        count,
        brackets.iter().map(Vec::len).collect::<Vec<_>>()
    );

    let (pairs, unpaired) = pair_brackets(brackets, rng);
    if !unpaired.is_empty() {
        log::warn!(
            "Round {}: {} competitor(s) left without a match: {:?}",
            round,
            unpaired.len(),
            unpaired
        );
    }

    Ok(RoundPlan {
        round,
        bye,
        pairs,
        unpaired,
    })
}

/// Generate and store the matches for `round`.
///
/// Fails with `AlreadyGenerated` if the round has any matches, and with
/// `NotEnoughCompetitors` for fewer than two competitors. Nothing is written
/// on failure.
pub fn generate_pairings<S, R>(
    store: &mut S,
    tournament_id: TournamentId,
    round: u32,
    rng: &mut R,
) -> TournamentResult<Vec<GameMatch>>
where
    S: Store + ?Sized,
    R: Rng + ?Sized,
{
    if round == 0 {
        return Err(TournamentError::InvalidRound(round));
    }
    if !store.matches(tournament_id, Some(round))?.is_empty() {
        return Err(TournamentError::AlreadyGenerated { round });
    }

    let standings = compute_standings(&*store, tournament_id)?;
    let plan = plan_round(standings, round, rng)?;

    let mut matches = Vec::with_capacity(plan.pairs.len() + 1);
    if let Some(id) = plan.bye {
        matches.push(GameMatch::bye(tournament_id, round, id));
    }
    matches.extend(
        plan.pairs
            .iter()
            .map(|&(a, b)| GameMatch::new(tournament_id, round, a, b)),
    );
    store.insert_matches(&matches)?;

    log::info!(
        "Generated {} match(es) for round {} of tournament {}",
        matches.len(),
        round,
        tournament_id
    );
    Ok(matches)
}
