//! Integration tests for breeding against the builtin breed catalog
//!
//! These exercise the registry, resolver and stat inheritance together, the
//! way gameplay code drives them during a breeding event.

use brood_genetics::{
    BreedCatalog, BreedDescriptor, BreedId, BreedRegistry, ChildResolver, CreatureStats,
    Inheritance, Specimen, breed, install_catalogs,
};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

fn builtin_registry() -> BreedRegistry {
    let mut registry = BreedRegistry::new();
    let report = install_catalogs(&mut registry, &[BreedCatalog::builtin()])
        .expect("builtin catalog should install");
    assert!(report.is_complete());
    registry
}

fn id(raw: u32) -> BreedId {
    BreedId::new(raw).unwrap()
}

// ============================================================================
// Graph properties
// ============================================================================

#[test]
fn test_root_breeds_are_tier_one() {
    let registry = builtin_registry();
    for breed in registry.breeds().filter(|b| !b.is_breedable()) {
        assert_eq!(breed.tier(), 1, "{}", breed.name());
    }
}

#[test]
fn test_tier_is_one_more_than_deepest_parent() {
    let registry = builtin_registry();
    for breed in registry.breedable_breeds() {
        if breed.descriptor().tier_override.is_some() {
            continue;
        }
        let parent1 = breed.parent1().unwrap();
        let parent2 = breed.parent2().unwrap();
        assert_eq!(breed.tier(), parent1.tier().max(parent2.tier()) + 1, "{}", breed.name());
    }
}

#[test]
fn test_disabling_root_disables_descendants() {
    let mut registry = builtin_registry();
    let sand = registry.get_by_name("sand").unwrap().id();
    registry.set_enabled(sand, false).unwrap();

    let disabled: Vec<&str> = registry
        .get_disabled_breeds()
        .iter()
        .map(|b| b.name())
        .collect();
    for name in ["sand", "flint", "glass", "coal", "iron", "gold", "diamond", "ender"] {
        assert!(disabled.contains(&name), "{name} should be disabled");
    }
    assert!(registry.get_by_name("pink").unwrap().enabled());
    assert!(registry.get_by_name("snowball").unwrap().enabled());
}

// ============================================================================
// Offspring resolution
// ============================================================================

#[test]
fn test_chances_sum_to_one_hundred_for_every_recipe() {
    let registry = builtin_registry();
    let resolver = ChildResolver::new(&registry);

    for recipe in registry.breeding_recipes() {
        let candidates = resolver.candidates(recipe.parent1, recipe.parent2);
        let mut seen = Vec::new();
        let mut total = 0;
        for &(candidate, _) in candidates.entries() {
            if !seen.contains(&candidate.id()) {
                seen.push(candidate.id());
                total += resolver.chance_percent(recipe.parent1, recipe.parent2, candidate);
            }
        }
        assert!(
            (100 - seen.len() as u32..=100).contains(&total),
            "{} x {}: {total}",
            recipe.parent1.name(),
            recipe.parent2.name()
        );
    }
}

#[test]
fn test_resolved_child_is_never_disabled() {
    let mut registry = builtin_registry();
    let iron = registry.get_by_name("iron").unwrap().id();
    registry.set_enabled(iron, false).unwrap();
    let resolver = ChildResolver::new(&registry);
    let mut rng = Xoshiro256StarStar::seed_from_u64(314);

    let flint = registry.get_by_name("flint").unwrap();
    let white = registry.get_by_name("white").unwrap();
    for _ in 0..500 {
        let child = resolver.resolve_child(flint, white, &mut rng).unwrap();
        assert!(child.enabled());
        assert_ne!(child.id(), iron);
    }
}

#[test]
fn test_abc_scenario() {
    let mut registry = BreedRegistry::new();
    registry.register(BreedDescriptor::root(id(1), "A")).unwrap();
    registry.register(BreedDescriptor::root(id(2), "B")).unwrap();
    registry
        .register(BreedDescriptor::root(id(3), "C").with_parents(id(1), id(2)))
        .unwrap();
    let resolver = ChildResolver::new(&registry);
    let a = registry.get_by_type(id(1)).unwrap();
    let b = registry.get_by_type(id(2)).unwrap();
    let c = registry.get_by_type(id(3)).unwrap();

    let candidates = resolver.candidates(a, b);
    assert_eq!(candidates.len(), 3);
    assert_eq!(candidates.max_chance(), 3);
    assert_eq!(candidates.total_weight(), 5);
    assert_eq!(resolver.child_chance_percent(c), Some(20));
    assert_eq!(resolver.chance_percent(a, b, a), 40);
    assert_eq!(resolver.chance_percent(a, b, b), 40);
}

// ============================================================================
// Breeding events
// ============================================================================

#[test]
fn test_self_breeding_scenario() {
    let registry = builtin_registry();
    let white = registry.get_by_name("white").unwrap().id();
    let parent = Specimen::new(white, CreatureStats::new(3, 3, 5));
    let mut rng = Xoshiro256StarStar::seed_from_u64(21);

    let mut growths = [0u32; 2];
    for _ in 0..400 {
        let offspring = breed(&registry, &parent, &parent, &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(offspring.breed, white);
        assert_eq!(offspring.inheritance, Inheritance::Mutating);
        growths[usize::from(offspring.stats.growth()) - 4] += 1;
    }
    // 4 or 5 with equal probability
    assert!((150..250).contains(&growths[0]), "{growths:?}");
    assert!((150..250).contains(&growths[1]), "{growths:?}");
}

#[test]
fn test_selective_breeding_reaches_max_stats() {
    let registry = builtin_registry();
    let white = registry.get_by_name("white").unwrap().id();
    let mut line = Specimen::new(white, CreatureStats::baseline());
    let mut rng = Xoshiro256StarStar::seed_from_u64(1);

    for _ in 0..20 {
        line = breed(&registry, &line, &line, &mut rng)
            .unwrap()
            .unwrap()
            .specimen();
    }
    assert_eq!(line.stats, CreatureStats::new(10, 10, 10));
}

#[test]
fn test_registry_reload_invalidates_old_specimens() {
    let mut registry = builtin_registry();
    let emerald = registry.get_by_name("emerald").unwrap().id();
    let specimen = Specimen::new(emerald, CreatureStats::baseline());

    registry.reset();
    registry.register(BreedDescriptor::root(id(1), "white")).unwrap();
    let mut rng = Xoshiro256StarStar::seed_from_u64(2);

    assert!(breed(&registry, &specimen, &specimen, &mut rng).is_err());
}

#[test]
fn test_specimen_persists_as_plain_integers() {
    let stored: Specimen =
        ron::from_str("(breed: 15, stats: (growth: 4, gain: 5, strength: 6))").unwrap();
    assert_eq!(stored, Specimen::new(id(15), CreatureStats::new(4, 5, 6)));

    let serialized = ron::to_string(&stored).unwrap();
    let restored: Specimen = ron::from_str(&serialized).unwrap();
    assert_eq!(restored, stored);
}
