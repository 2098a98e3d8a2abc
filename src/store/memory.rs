//! In-memory store used by the web binary and the tests.

use super::{Store, StoreError, StoreResult};
use crate::models::{
    Competitor, CompetitorId, GameMatch, MatchId, Outcome, Tournament, TournamentId,
};
use std::collections::HashMap;

/// Everything kept in plain collections; cloned wholesale for transactions.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tournaments: HashMap<TournamentId, Tournament>,
    competitors: Vec<Competitor>,
    matches: Vec<GameMatch>,
    last_competitor_id: CompetitorId,
}

impl MemoryStore {
    fn require_tournament(&self, id: TournamentId) -> StoreResult<()> {
        if self.tournaments.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::TournamentNotFound(id))
        }
    }

    fn match_mut(&mut self, id: MatchId) -> StoreResult<&mut GameMatch> {
        self.matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::MatchNotFound(id))
    }
}

impl Store for MemoryStore {
    fn tournament(&self, id: TournamentId) -> StoreResult<Tournament> {
        self.tournaments
            .get(&id)
            .cloned()
            .ok_or(StoreError::TournamentNotFound(id))
    }

    fn tournaments(&self) -> StoreResult<Vec<Tournament>> {
        let mut all: Vec<Tournament> = self.tournaments.values().cloned().collect();
        all.sort_by_key(|t| t.created_at);
        Ok(all)
    }

    fn insert_tournament(&mut self, tournament: Tournament) -> StoreResult<()> {
        self.tournaments.insert(tournament.id, tournament);
        Ok(())
    }

    fn delete_tournament(&mut self, id: TournamentId) -> StoreResult<()> {
        self.tournaments
            .remove(&id)
            .ok_or(StoreError::TournamentNotFound(id))?;
        self.competitors.retain(|c| c.tournament_id != id);
        self.matches.retain(|m| m.tournament_id != id);
        Ok(())
    }

    fn set_current_round(&mut self, id: TournamentId, round: u32) -> StoreResult<()> {
        let t = self
            .tournaments
            .get_mut(&id)
            .ok_or(StoreError::TournamentNotFound(id))?;
        t.current_round = round;
        Ok(())
    }

    fn competitors(&self, tournament_id: TournamentId) -> StoreResult<Vec<Competitor>> {
        self.require_tournament(tournament_id)?;
        Ok(self
            .competitors
            .iter()
            .filter(|c| c.tournament_id == tournament_id)
            .cloned()
            .collect())
    }

    fn insert_competitor(
        &mut self,
        tournament_id: TournamentId,
        name: &str,
        rating: u32,
    ) -> StoreResult<Competitor> {
        self.require_tournament(tournament_id)?;
        self.last_competitor_id += 1;
        let competitor = Competitor {
            id: self.last_competitor_id,
            tournament_id,
            name: name.to_string(),
            rating,
        };
        self.competitors.push(competitor.clone());
        Ok(competitor)
    }

    fn matches(&self, tournament_id: TournamentId, round: Option<u32>) -> StoreResult<Vec<GameMatch>> {
        self.require_tournament(tournament_id)?;
        Ok(self
            .matches
            .iter()
            .filter(|m| m.tournament_id == tournament_id)
            .filter(|m| round.map_or(true, |r| m.round == r))
            .cloned()
            .collect())
    }

    fn game_match(&self, id: MatchId) -> StoreResult<GameMatch> {
        self.matches
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(StoreError::MatchNotFound(id))
    }

    fn insert_matches(&mut self, matches: &[GameMatch]) -> StoreResult<()> {
        for m in matches {
            self.require_tournament(m.tournament_id)?;
        }
        self.matches.extend_from_slice(matches);
        Ok(())
    }

    fn set_outcome(&mut self, id: MatchId, outcome: Outcome) -> StoreResult<()> {
        self.match_mut(id)?.outcome = Some(outcome);
        Ok(())
    }
}
