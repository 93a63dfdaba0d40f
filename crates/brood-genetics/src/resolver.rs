//! Offspring breed resolution
//!
//! Each candidate gets weight `max_chance - tier`, with
//! `max_chance = 1 + max tier in the set`, so lower-tier breeds are always
//! more likely than rarer ones. The draw walks candidates in registry order
//! and returns the first whose cumulative weight exceeds the dice value.

use crate::breed::{Breed, BreedId};
use crate::registry::BreedRegistry;
use crate::rng::BreedRng;

/// Weighted candidate offspring for one parent pair
#[derive(Debug, Clone)]
pub struct CandidateSet<'a> {
    entries: Vec<(Breed<'a>, u64)>,
    max_chance: u64,
    total_weight: u64,
}

impl<'a> CandidateSet<'a> {
    /// Weigh candidates, keeping their order.
    ///
    /// Weights are `u64` so that any `u32` tier fits: the largest single
    /// weight is `u32::MAX`.
    pub fn new(candidates: Vec<Breed<'a>>) -> Self {
        let max_tier = candidates.iter().map(|c| c.tier()).max().unwrap_or(0);
        let max_chance = 1 + u64::from(max_tier);
        let entries: Vec<_> = candidates
            .into_iter()
            .map(|candidate| (candidate, max_chance - u64::from(candidate.tier())))
            .collect();
        let total_weight = entries
            .iter()
            .fold(0u64, |total, &(_, weight)| total.saturating_add(weight));
        Self {
            entries,
            max_chance,
            total_weight,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Candidates with their weights, in draw order
    pub fn entries(&self) -> &[(Breed<'a>, u64)] {
        &self.entries
    }

    pub fn max_chance(&self) -> u64 {
        self.max_chance
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Select the candidate for a dice value in `[0, total_weight)`.
    /// Returns None only when the dice value is out of range.
    pub fn pick(&self, dice: u64) -> Option<Breed<'a>> {
        let mut cumulative = 0u64;
        for &(candidate, weight) in &self.entries {
            cumulative = cumulative.saturating_add(weight);
            if dice < cumulative {
                return Some(candidate);
            }
        }
        None
    }

    /// Draw a candidate. Returns None for an empty set.
    pub fn draw<R: BreedRng + ?Sized>(&self, rng: &mut R) -> Option<Breed<'a>> {
        if self.total_weight == 0 {
            return None;
        }
        self.pick(rng.roll(self.total_weight))
    }

    /// Display chance for a breed, summed over all its entries (integer percent)
    pub fn percent_of(&self, id: BreedId) -> u32 {
        if self.total_weight == 0 {
            return 0;
        }
        let weight: u128 = self
            .entries
            .iter()
            .filter(|(candidate, _)| candidate.id() == id)
            .map(|&(_, weight)| u128::from(weight))
            .sum();
        // weight <= total, so the quotient is at most 100
        (weight * 100 / u128::from(self.total_weight)) as u32
    }
}

/// Resolves offspring breeds against one registry
#[derive(Clone, Copy)]
pub struct ChildResolver<'a> {
    registry: &'a BreedRegistry,
}

impl<'a> ChildResolver<'a> {
    pub fn new(registry: &'a BreedRegistry) -> Self {
        Self { registry }
    }

    pub fn candidates(&self, parent1: Breed<'a>, parent2: Breed<'a>) -> CandidateSet<'a> {
        CandidateSet::new(self.registry.find_child_candidates(parent1, parent2))
    }

    /// Draw the offspring breed of two parents.
    ///
    /// None means the pair produces no offspring (every candidate disabled).
    pub fn resolve_child<R: BreedRng + ?Sized>(
        &self,
        parent1: Breed<'a>,
        parent2: Breed<'a>,
        rng: &mut R,
    ) -> Option<Breed<'a>> {
        let candidates = self.candidates(parent1, parent2);
        let child = candidates.draw(rng);
        if child.is_none() {
            log::debug!(
                "No offspring candidates for '{}' x '{}'",
                parent1.name(),
                parent2.name()
            );
        }
        child
    }

    /// Chance (percent) of breeding `child` from its own parents.
    /// None for breeds without both parents.
    pub fn child_chance_percent(&self, child: Breed<'a>) -> Option<u32> {
        let (parent1, parent2) = (child.parent1()?, child.parent2()?);
        Some(self.chance_percent(parent1, parent2, child))
    }

    /// Chance (percent) that crossing `parent1` and `parent2` yields `candidate`
    pub fn chance_percent(
        &self,
        parent1: Breed<'a>,
        parent2: Breed<'a>,
        candidate: Breed<'a>,
    ) -> u32 {
        self.candidates(parent1, parent2).percent_of(candidate.id())
    }
}
