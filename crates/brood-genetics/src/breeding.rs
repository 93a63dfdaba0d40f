//! Breeding events
//!
//! Combines offspring breed resolution with stat inheritance. The same two
//! specimens act as genetic and statistical parents.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::breed::BreedId;
use crate::registry::BreedRegistry;
use crate::resolver::ChildResolver;
use crate::rng::BreedRng;
use crate::stats::{CreatureStats, Inheritance};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BreedingError {
    /// A parent carries a breed id that is no longer registered
    #[error("parent breed {0} is not registered")]
    UnknownBreed(BreedId),
}

/// A breeding instance: its breed and its stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specimen {
    pub breed: BreedId,
    pub stats: CreatureStats,
}

impl Specimen {
    pub fn new(breed: BreedId, stats: CreatureStats) -> Self {
        Self { breed, stats }
    }
}

/// Result of a successful breeding event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offspring {
    pub breed: BreedId,
    pub stats: CreatureStats,
    pub inheritance: Inheritance,
}

impl Offspring {
    pub fn specimen(&self) -> Specimen {
        Specimen::new(self.breed, self.stats)
    }
}

/// Breed two specimens.
///
/// Returns `Ok(None)` when the pair produces no offspring, and an error if
/// either parent's breed cannot be found in the registry.
pub fn breed<R: BreedRng + ?Sized>(
    registry: &BreedRegistry,
    first: &Specimen,
    second: &Specimen,
    rng: &mut R,
) -> Result<Option<Offspring>, BreedingError> {
    let parent1 = registry
        .get_by_type(first.breed)
        .ok_or(BreedingError::UnknownBreed(first.breed))?;
    let parent2 = registry
        .get_by_type(second.breed)
        .ok_or(BreedingError::UnknownBreed(second.breed))?;

    let resolver = ChildResolver::new(registry);
    let Some(child) = resolver.resolve_child(parent1, parent2, rng) else {
        return Ok(None);
    };

    let inheritance = Inheritance::classify(first.breed, second.breed, child.id());
    let stats = inheritance.offspring_stats(&first.stats, &second.stats, rng);

    log::debug!(
        "Bred '{}' x '{}' -> '{}' ({:?})",
        parent1.name(),
        parent2.name(),
        child.name(),
        inheritance
    );

    Ok(Some(Offspring {
        breed: child.id(),
        stats,
        inheritance,
    }))
}
