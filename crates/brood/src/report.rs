//! Text reports for the command line

use brood_genetics::{Breed, BreedRegistry, ChildResolver, CreatureStats};

use crate::simulation::Generation;

fn parents_label(breed: Breed<'_>) -> String {
    match (breed.parent1(), breed.parent2()) {
        (Some(p1), Some(p2)) => format!("{} x {}", p1.name(), p2.name()),
        _ => "-".to_string(),
    }
}

fn stats_label(stats: &CreatureStats) -> String {
    format!(
        "growth {} / gain {} / strength {}",
        stats.growth(),
        stats.gain(),
        stats.strength()
    )
}

/// Join report lines, each terminated by a newline
fn render(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

/// Table of breeds with id, tier, parents and state
pub fn breed_table(registry: &BreedRegistry, include_disabled: bool) -> String {
    let header = format!(
        "{:>4}  {:<12} {:>4}  {:<22} state",
        "id", "name", "tier", "parents"
    );
    let rows = registry
        .breeds()
        .filter(|breed| include_disabled || breed.enabled())
        .map(|breed| {
            let state = if breed.enabled() { "enabled" } else { "disabled" };
            format!(
                "{:>4}  {:<12} {:>4}  {:<22} {}",
                breed.id().raw(),
                breed.name(),
                breed.tier(),
                parents_label(breed),
                state
            )
        });
    render(std::iter::once(header).chain(rows).collect())
}

/// Possible offspring of a pair with their display chances
pub fn chance_table(registry: &BreedRegistry, first: Breed<'_>, second: Breed<'_>) -> String {
    let resolver = ChildResolver::new(registry);
    let candidates = resolver.candidates(first, second);

    if candidates.is_empty() {
        return render(vec![format!(
            "{} x {} produces no offspring",
            first.name(),
            second.name()
        )]);
    }

    let mut lines = vec![format!(
        "{} x {} (total weight {})",
        first.name(),
        second.name(),
        candidates.total_weight()
    )];
    let mut listed = Vec::new();
    for &(candidate, _) in candidates.entries() {
        if listed.contains(&candidate.id()) {
            continue;
        }
        listed.push(candidate.id());
        lines.push(format!(
            "  {:<12} tier {:>2}  {:>3}%",
            candidate.name(),
            candidate.tier(),
            candidates.percent_of(candidate.id())
        ));
    }
    render(lines)
}

/// Every crossing that produces a new breed
pub fn recipe_table(registry: &BreedRegistry) -> String {
    let resolver = ChildResolver::new(registry);
    let lines = registry
        .breeding_recipes()
        .into_iter()
        .map(|recipe| {
            let chance = resolver.child_chance_percent(recipe.child).unwrap_or(0);
            format!(
                "{} x {} -> {} ({}%)",
                recipe.parent1.name(),
                recipe.parent2.name(),
                recipe.child.name(),
                chance
            )
        })
        .collect();
    render(lines)
}

/// One line per generation of a breeding line
pub fn line_report(registry: &BreedRegistry, history: &[Generation]) -> String {
    let lines = history
        .iter()
        .map(|generation| {
            let Some(offspring) = generation.offspring else {
                return format!("gen {:>3}: no offspring", generation.number);
            };
            let name = registry
                .get_by_type(offspring.breed)
                .map_or("?", |breed| breed.name());
            format!(
                "gen {:>3}: {:<12} {} ({:?})",
                generation.number,
                name,
                stats_label(&offspring.stats),
                offspring.inheritance
            )
        })
        .collect();
    render(lines)
}
