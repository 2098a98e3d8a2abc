//! Standings: cumulative scores derived from recorded match outcomes.

use crate::models::{Competitor, CompetitorId, GameMatch, Standing, TournamentId, TournamentResult};
use crate::store::Store;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Standings for every competitor of the tournament, best first.
///
/// Ordered by score descending, then rating descending, then id ascending.
/// Only decided matches count; a bye is a full point for its sole competitor.
pub fn compute_standings<S: Store + ?Sized>(
    store: &S,
    tournament_id: TournamentId,
) -> TournamentResult<Vec<Standing>> {
    let competitors = store.competitors(tournament_id)?;
    let matches = store.matches(tournament_id, None)?;
    Ok(standings_from(&competitors, &matches))
}

/// Pure part of [`compute_standings`].
pub fn standings_from(competitors: &[Competitor], matches: &[GameMatch]) -> Vec<Standing> {
    let mut scores: HashMap<CompetitorId, f64> = HashMap::new();
    for m in matches.iter().filter(|m| m.is_decided()) {
        *scores.entry(m.competitor_one).or_default() += m.points_for(m.competitor_one);
        if let Some(two) = m.competitor_two {
            *scores.entry(two).or_default() += m.points_for(two);
        }
    }

    let mut standings: Vec<Standing> = competitors
        .iter()
        .map(|c| Standing {
            score: scores.get(&c.id).copied().unwrap_or(0.0),
            ..Standing::unscored(c)
        })
        .collect();
    standings.sort_by(by_score_then_rating);
    standings
}

fn by_score_then_rating(a: &Standing, b: &Standing) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.rating.cmp(&a.rating))
        .then_with(|| a.competitor_id.cmp(&b.competitor_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Outcome;
    use uuid::Uuid;

    fn competitor(tid: TournamentId, id: CompetitorId, rating: u32) -> Competitor {
        Competitor {
            id,
            tournament_id: tid,
            name: format!("C{id}"),
            rating,
        }
    }

    #[test]
    fn no_matches_sorts_by_rating() {
        let tid = Uuid::new_v4();
        let cs = vec![
            competitor(tid, 1, 1500),
            competitor(tid, 2, 1900),
            competitor(tid, 3, 1700),
        ];
        let s = standings_from(&cs, &[]);
        let ids: Vec<_> = s.iter().map(|s| s.competitor_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert!(s.iter().all(|s| s.score == 0.0));
    }

    #[test]
    fn pending_matches_do_not_count() {
        let tid = Uuid::new_v4();
        let cs = vec![competitor(tid, 1, 1500), competitor(tid, 2, 1600)];
        let pending = GameMatch::new(tid, 1, 1, 2);
        let s = standings_from(&cs, &[pending]);
        assert!(s.iter().all(|s| s.score == 0.0));
    }

    #[test]
    fn wins_draws_and_byes_accumulate() {
        let tid = Uuid::new_v4();
        let cs = vec![
            competitor(tid, 1, 1500),
            competitor(tid, 2, 1600),
            competitor(tid, 3, 1400),
        ];
        let mut r1 = GameMatch::new(tid, 1, 1, 2);
        r1.outcome = Some(Outcome::Win);
        let bye1 = GameMatch::bye(tid, 1, 3);
        let mut r2 = GameMatch::new(tid, 2, 2, 3);
        r2.outcome = Some(Outcome::Draw);
        let bye2 = GameMatch::bye(tid, 2, 1);

        let s = standings_from(&cs, &[r1, bye1, r2, bye2]);
        let by_id: HashMap<_, _> = s.iter().map(|s| (s.competitor_id, s.score)).collect();
        assert_eq!(by_id[&1], 2.0);
        assert_eq!(by_id[&2], 0.5);
        assert_eq!(by_id[&3], 1.5);
        assert_eq!(s[0].competitor_id, 1);
        assert_eq!(s[2].competitor_id, 2);
    }

    #[test]
    fn equal_score_and_rating_falls_back_to_id() {
        let tid = Uuid::new_v4();
        let cs = vec![competitor(tid, 5, 1500), competitor(tid, 3, 1500)];
        let s = standings_from(&cs, &[]);
        assert_eq!(s[0].competitor_id, 3);
    }
}
