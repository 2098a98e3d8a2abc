//! Integration tests for pairing generation: seeding, byes, brackets, idempotence.

use chess_tournament_web::{
    add_competitor, compute_standings, create_tournament, generate_pairings, plan_round,
    round_matches, CompetitorId, MemoryStore, Standing, Store, TournamentError, TournamentId,
};
use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn tournament_with_ratings(ratings: &[i64]) -> (MemoryStore, TournamentId) {
    let mut store = MemoryStore::default();
    let t = create_tournament(&mut store, "Club Open", 5).unwrap();
    for (i, &r) in ratings.iter().enumerate() {
        add_competitor(&mut store, t.id, &format!("P{i}"), r).unwrap();
    }
    (store, t.id)
}

fn rating_of(store: &MemoryStore, tid: TournamentId, id: CompetitorId) -> u32 {
    store
        .competitors(tid)
        .unwrap()
        .into_iter()
        .find(|c| c.id == id)
        .unwrap()
        .rating
}

#[test]
fn round_one_pairs_top_half_against_bottom_half() {
    // Registered out of rating order so seeding has to come from ratings.
    let (mut store, tid) =
        tournament_with_ratings(&[1800, 2200, 1500, 2000, 1700, 2100, 1600, 1900]);

    for seed in 0..20 {
        let (mut store, tid) = (store.clone(), tid);
        let mut rng = StdRng::seed_from_u64(seed);
        let matches = generate_pairings(&mut store, tid, 1, &mut rng).unwrap();
        assert_eq!(matches.len(), 4);
        for m in &matches {
            let a = rating_of(&store, tid, m.competitor_one);
            let b = rating_of(&store, tid, m.competitor_two.unwrap());
            assert!(
                (a >= 1900) != (b >= 1900),
                "{a} vs {b} are from the same bracket"
            );
            assert!(m.competitor_one < m.competitor_two.unwrap());
            assert!(m.outcome.is_none());
        }
    }

    let mut rng = StdRng::seed_from_u64(0);
    generate_pairings(&mut store, tid, 1, &mut rng).unwrap();
    assert_eq!(round_matches(&store, tid, 1).unwrap().len(), 4);
}

#[test]
fn second_generation_is_a_no_op() {
    let (mut store, tid) = tournament_with_ratings(&[2000, 1900, 1800, 1700, 1600]);
    let mut rng = StdRng::seed_from_u64(5);
    let first = generate_pairings(&mut store, tid, 1, &mut rng).unwrap();

    let again = generate_pairings(&mut store, tid, 1, &mut rng);
    match again {
        Err(e @ TournamentError::AlreadyGenerated { round: 1 }) => assert!(e.is_benign()),
        other => panic!("expected AlreadyGenerated, got {other:?}"),
    }
    assert_eq!(round_matches(&store, tid, 1).unwrap(), first);
}

#[test]
fn odd_field_gets_exactly_one_bye_for_lowest() {
    let (mut store, tid) = tournament_with_ratings(&[1500, 2100, 1700, 1900, 1300, 2000, 1800]);
    let mut rng = StdRng::seed_from_u64(9);
    let matches = generate_pairings(&mut store, tid, 1, &mut rng).unwrap();

    let byes: Vec<_> = matches.iter().filter(|m| m.is_bye()).collect();
    assert_eq!(byes.len(), 1);
    assert_eq!(rating_of(&store, tid, byes[0].competitor_one), 1300);
    assert_eq!(byes[0].outcome.map(|o| o.score()), Some(1.0));

    // The bye counts immediately.
    let standings = compute_standings(&store, tid).unwrap();
    assert_eq!(standings[0].competitor_id, byes[0].competitor_one);
    assert_eq!(standings[0].score, 1.0);
}

#[test]
fn fewer_than_two_competitors_writes_nothing() {
    let (mut store, tid) = tournament_with_ratings(&[1500]);
    let mut rng = StdRng::seed_from_u64(1);
    assert!(matches!(
        generate_pairings(&mut store, tid, 1, &mut rng),
        Err(TournamentError::NotEnoughCompetitors)
    ));
    assert!(store.matches(tid, None).unwrap().is_empty());

    let (mut empty, tid) = tournament_with_ratings(&[]);
    assert!(matches!(
        generate_pairings(&mut empty, tid, 1, &mut rng),
        Err(TournamentError::NotEnoughCompetitors)
    ));
}

#[test]
fn round_zero_is_rejected() {
    let (mut store, tid) = tournament_with_ratings(&[1500, 1600]);
    let mut rng = StdRng::seed_from_u64(1);
    assert!(matches!(
        generate_pairings(&mut store, tid, 0, &mut rng),
        Err(TournamentError::InvalidRound(0))
    ));
}

#[test]
fn same_seed_gives_same_pairings() {
    let ratings: Vec<i64> = (0..12).map(|i| 2400 - i * 70).collect();
    let (mut a, ta) = tournament_with_ratings(&ratings);
    let (mut b, tb) = tournament_with_ratings(&ratings);

    let pa = generate_pairings(&mut a, ta, 1, &mut StdRng::seed_from_u64(77)).unwrap();
    let pb = generate_pairings(&mut b, tb, 1, &mut StdRng::seed_from_u64(77)).unwrap();
    let key = |m: &chess_tournament_web::GameMatch| (m.competitor_one, m.competitor_two);
    assert_eq!(
        pa.iter().map(key).collect::<Vec<_>>(),
        pb.iter().map(key).collect::<Vec<_>>()
    );
}

#[test]
fn fixed_rng_gives_exact_pairings() {
    // A zero stream draws index 0 at every swap, which rotates bracket B left by one.
    let mut zeros = StepRng::new(0, 0);
    let (mut store, tid) =
        tournament_with_ratings(&[2200, 2100, 2000, 1900, 1800, 1700, 1600, 1500]);
    let matches = generate_pairings(&mut store, tid, 1, &mut zeros).unwrap();
    let pairs: Vec<_> = matches
        .iter()
        .map(|m| (m.competitor_one, m.competitor_two.unwrap()))
        .collect();
    assert_eq!(pairs, vec![(1, 6), (2, 7), (3, 8), (4, 5)]);

    let (mut store, tid) = tournament_with_ratings(&[1500, 1900, 1700, 2000, 1800]);
    let matches = generate_pairings(&mut store, tid, 1, &mut zeros).unwrap();
    let bye = matches.iter().find(|m| m.is_bye()).unwrap();
    assert_eq!(bye.competitor_one, 1);
    let pairs: Vec<_> = matches
        .iter()
        .filter_map(|m| m.competitor_two.map(|two| (m.competitor_one, two)))
        .collect();
    // Seeded by rating: [4, 2, 5, 3], brackets [4, 2] and [5, 3] -> [3, 5].
    assert_eq!(pairs, vec![(3, 4), (2, 5)]);
}

#[test]
fn no_competitor_appears_twice_in_a_round() {
    for n in 2..=17u32 {
        for round in 1..=6 {
            let standings: Vec<Standing> = (1..=n)
                .map(|id| Standing {
                    competitor_id: id,
                    name: format!("C{id}"),
                    rating: 1000 + id * 10,
                    score: f64::from((n - id) % 4) * 0.5,
                })
                .collect();
            let mut rng = StdRng::seed_from_u64(u64::from(n * 100 + round));
            let plan = plan_round(standings, round, &mut rng).unwrap();

            let mut seen = HashSet::new();
            for &(a, b) in &plan.pairs {
                assert!(a < b);
                assert!(seen.insert(a) && seen.insert(b), "n={n} round={round}");
            }
            if let Some(bye) = plan.bye {
                assert!(seen.insert(bye));
            }
            assert_eq!(plan.bye.is_some(), n % 2 == 1);
            // Even brackets always line up, so everyone is placed.
            assert!(plan.unpaired.is_empty());
            assert_eq!(seen.len() as u32, n);
        }
    }
}

#[test]
fn later_rounds_pair_within_score_groups() {
    // Round 3 over 8 competitors: 4 brackets of 2, so bracket 0 meets bracket 1.
    let standings: Vec<Standing> = (1..=8)
        .map(|id| Standing {
            competitor_id: id,
            name: format!("C{id}"),
            rating: 1500,
            score: f64::from(8 - id) * 0.5,
        })
        .collect();
    let plan = plan_round(standings, 3, &mut StdRng::seed_from_u64(3)).unwrap();
    for &(a, b) in &plan.pairs {
        let group = |id: u32| (id - 1) / 4;
        assert_eq!(group(a), group(b));
        assert_ne!((a - 1) / 2, (b - 1) / 2);
    }
}
