//! Multi-generation breeding lines
//!
//! Breeds the same pair repeatedly. An offspring replaces the weaker parent
//! of its own breed when it is at least as strong, which is how a player
//! selectively breeds a line toward maximum stats.

use brood_genetics::{BreedRegistry, BreedRng, BreedingError, Offspring, Specimen, breed};

/// One step of a breeding line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation {
    pub number: u32,
    pub offspring: Option<Offspring>,
    /// Parents after this generation's replacement
    pub parents: (Specimen, Specimen),
}

fn stat_total(specimen: &Specimen) -> u32 {
    let stats = specimen.stats;
    u32::from(stats.growth()) + u32::from(stats.gain()) + u32::from(stats.strength())
}

/// Swap the offspring in for the weaker same-breed parent, if it is at least as strong
fn replace_weaker(parents: &mut (Specimen, Specimen), child: Specimen) {
    let (first, second) = parents;
    let slot = match (first.breed == child.breed, second.breed == child.breed) {
        (true, true) if stat_total(first) <= stat_total(second) => first,
        (true, true) => second,
        (true, false) => first,
        (false, true) => second,
        (false, false) => return,
    };
    if stat_total(&child) >= stat_total(slot) {
        *slot = child;
    }
}

pub fn run_line<R: BreedRng + ?Sized>(
    registry: &BreedRegistry,
    first: Specimen,
    second: Specimen,
    generations: u32,
    rng: &mut R,
) -> Result<Vec<Generation>, BreedingError> {
    let mut parents = (first, second);
    let mut history = Vec::with_capacity(generations as usize);

    for number in 1..=generations {
        let offspring = breed(registry, &parents.0, &parents.1, rng)?;
        if let Some(offspring) = offspring {
            replace_weaker(&mut parents, offspring.specimen());
        }
        history.push(Generation {
            number,
            offspring,
            parents,
        });
    }

    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brood_genetics::{BreedCatalog, BreedId, CreatureStats, install_catalogs};
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn builtin_registry() -> BreedRegistry {
        let mut registry = BreedRegistry::new();
        install_catalogs(&mut registry, &[BreedCatalog::builtin()]).unwrap();
        registry
    }

    fn specimen(registry: &BreedRegistry, name: &str, stats: CreatureStats) -> Specimen {
        Specimen::new(registry.get_by_name(name).unwrap().id(), stats)
    }

    #[test]
    fn test_true_line_climbs_to_max() {
        let registry = builtin_registry();
        let white = specimen(&registry, "white", CreatureStats::baseline());
        let mut rng = Xoshiro256StarStar::seed_from_u64(9);

        let history = run_line(&registry, white, white, 60, &mut rng).unwrap();
        assert_eq!(history.len(), 60);
        let (first, second) = history.last().unwrap().parents;
        assert_eq!(first.stats, CreatureStats::new(10, 10, 10));
        assert_eq!(second.stats, CreatureStats::new(10, 10, 10));
    }

    #[test]
    fn test_new_breeds_do_not_replace_parents() {
        let registry = builtin_registry();
        let red = specimen(&registry, "red", CreatureStats::new(5, 5, 5));
        let white = specimen(&registry, "white", CreatureStats::new(6, 6, 6));
        let mut rng = Xoshiro256StarStar::seed_from_u64(4);

        let history = run_line(&registry, red, white, 50, &mut rng).unwrap();
        let pink = registry.get_by_name("pink").unwrap().id();
        assert!(
            history
                .iter()
                .any(|g| g.offspring.is_some_and(|o| o.breed == pink))
        );
        // Copies of a parent have equal stats, so the parents never change
        for generation in &history {
            assert_eq!(generation.parents, (red, white));
        }
    }

    #[test]
    fn test_stale_breed_fails() {
        let registry = builtin_registry();
        let stale = Specimen::new(BreedId::new(999).unwrap(), CreatureStats::baseline());
        let mut rng = Xoshiro256StarStar::seed_from_u64(4);
        assert!(run_line(&registry, stale, stale, 3, &mut rng).is_err());
    }
}
