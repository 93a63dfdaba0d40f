//! Breed descriptors and the borrowed breed view
//!
//! A [`BreedDescriptor`] is the owned, authored data for a breed. Derived
//! properties (tier, enabled) depend on the rest of the graph, so they live on
//! [`Breed`], a view that pairs a descriptor with the registry that owns it.

use serde::{Deserialize, Serialize};

use crate::registry::BreedRegistry;

/// Unique, positive identifier of a breed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct BreedId(u32);

impl BreedId {
    /// Create a breed id. Returns None for 0, which is never a valid id.
    pub fn new(raw: u32) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    /// Get the raw u32 value (as persisted by the entity layer)
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for BreedId {
    type Error = String;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| "breed id must be positive".to_string())
    }
}

impl From<BreedId> for u32 {
    fn from(id: BreedId) -> Self {
        id.0
    }
}

impl std::fmt::Display for BreedId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Breed({})", self.0)
    }
}

/// Authored definition of a breed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreedDescriptor {
    pub id: BreedId,
    pub name: String,

    /// First parent (None for root breeds)
    pub parent1: Option<BreedId>,
    /// Second parent (None for root breeds)
    pub parent2: Option<BreedId>,

    /// Fixed tier, bypassing the parent-derived computation
    pub tier_override: Option<u32>,

    /// Owner-controlled flag; the effective state also depends on ancestry
    pub explicit_enabled: bool,

    /// Natural spawning flag, carried for the spawn layer
    pub natural_spawn_override: bool,
}

impl BreedDescriptor {
    /// Create an enabled root breed with no parents
    pub fn root(id: BreedId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent1: None,
            parent2: None,
            tier_override: None,
            explicit_enabled: true,
            natural_spawn_override: false,
        }
    }

    pub fn with_parents(mut self, parent1: BreedId, parent2: BreedId) -> Self {
        self.parent1 = Some(parent1);
        self.parent2 = Some(parent2);
        self
    }

    pub fn with_tier(mut self, tier: u32) -> Self {
        self.tier_override = Some(tier);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.explicit_enabled = enabled;
        self
    }

    pub fn with_natural_spawn(mut self, natural_spawn: bool) -> Self {
        self.natural_spawn_override = natural_spawn;
        self
    }

    /// Iterate over the parent ids that are set
    pub fn parent_ids(&self) -> impl Iterator<Item = BreedId> + '_ {
        self.parent1.iter().chain(self.parent2.iter()).copied()
    }
}

/// A registered breed, viewed through the registry that owns it
#[derive(Clone, Copy)]
pub struct Breed<'a> {
    registry: &'a BreedRegistry,
    index: usize,
}

impl<'a> Breed<'a> {
    pub(crate) fn new(registry: &'a BreedRegistry, index: usize) -> Self {
        Self { registry, index }
    }

    pub fn descriptor(&self) -> &'a BreedDescriptor {
        self.registry.descriptor_at(self.index)
    }

    pub fn id(&self) -> BreedId {
        self.descriptor().id
    }

    pub fn name(&self) -> &'a str {
        &self.descriptor().name
    }

    pub fn parent1(&self) -> Option<Breed<'a>> {
        self.descriptor()
            .parent1
            .and_then(|id| self.registry.get_by_type(id))
    }

    pub fn parent2(&self) -> Option<Breed<'a>> {
        self.descriptor()
            .parent2
            .and_then(|id| self.registry.get_by_type(id))
    }

    /// Rarity depth: the override if set, 1 for roots, otherwise one more
    /// than the deepest parent
    pub fn tier(&self) -> u32 {
        self.registry.derived_at(self.index).tier
    }

    /// Effective enabled state: disabled if this breed or any ancestor is
    pub fn enabled(&self) -> bool {
        self.registry.derived_at(self.index).enabled
    }

    /// True if this breed's parents are exactly {a, b}, in either order
    pub fn is_child_of(&self, a: Breed<'_>, b: Breed<'_>) -> bool {
        let descriptor = self.descriptor();
        let (Some(p1), Some(p2)) = (descriptor.parent1, descriptor.parent2) else {
            return false;
        };
        (p1 == a.id() && p2 == b.id()) || (p1 == b.id() && p2 == a.id())
    }

    /// Whether this breed can be produced by crossing two parents
    pub fn is_breedable(&self) -> bool {
        self.parent1().is_some() && self.parent2().is_some()
    }

    pub fn natural_spawn(&self) -> bool {
        self.descriptor().natural_spawn_override
    }
}

impl PartialEq for Breed<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Breed<'_> {}

impl std::fmt::Debug for Breed<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Breed")
            .field("id", &self.id().raw())
            .field("name", &self.name())
            .finish()
    }
}
