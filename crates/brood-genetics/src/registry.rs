//! Breed registry
//!
//! Owns every [`BreedDescriptor`] in a flat arena, indexed by id (ordered) and
//! by lowercased name. Iteration is always in ascending id order so that
//! candidate lists, and therefore weighted draws, are reproducible.

use std::collections::BTreeMap;

use ahash::{HashMap, HashSet};
use thiserror::Error;

use crate::breed::{Breed, BreedDescriptor, BreedId};

/// Errors raised while populating the registry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate breed id {0}")]
    DuplicateId(BreedId),
    #[error("duplicate breed name '{0}'")]
    DuplicateName(String),
    #[error("breed '{name}' references unregistered parent {parent}")]
    UnknownParent { name: String, parent: BreedId },
    #[error("breed '{0}' cannot be its own parent")]
    SelfParent(String),
    #[error("breed '{0}' has tier override 0 (tiers start at 1)")]
    InvalidTier(String),
    #[error("unknown breed {0}")]
    UnknownBreed(BreedId),
}

/// A breed crossing: `parent1 x parent2 -> child`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreedingRecipe<'a> {
    pub parent1: Breed<'a>,
    pub parent2: Breed<'a>,
    pub child: Breed<'a>,
}

/// Parent names waiting for the resolution phase
#[derive(Debug, Clone)]
struct PendingParents {
    child: BreedId,
    parent1: String,
    parent2: String,
}

/// Why a by-name parent link was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// No breed is registered under this name
    UnknownName(String),
    /// The breed names itself as a parent
    SelfReference,
    /// The link would make the breed its own ancestor
    Cycle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedParents {
    pub breed: String,
    pub parent1: String,
    pub parent2: String,
    pub reason: UnresolvedReason,
}

/// Outcome of [`BreedRegistry::resolve_parents`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
    pub resolved: usize,
    pub unresolved: Vec<UnresolvedParents>,
}

impl ResolveReport {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Graph-derived properties of one breed, cached per arena slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Derived {
    pub(crate) tier: u32,
    pub(crate) enabled: bool,
}

/// Tier and enabled state of `descriptor` given its parents' values
fn derive(
    descriptor: &BreedDescriptor,
    parent: impl Fn(BreedId) -> Option<Derived>,
) -> Derived {
    let parents: Vec<Derived> = descriptor.parent_ids().filter_map(parent).collect();
    let tier = descriptor.tier_override.unwrap_or_else(|| {
        parents
            .iter()
            .map(|parent| parent.tier)
            .max()
            .map_or(1, |deepest| deepest.saturating_add(1))
    });
    Derived {
        tier,
        enabled: descriptor.explicit_enabled && parents.iter().all(|parent| parent.enabled),
    }
}

/// Registry of all breeds
#[derive(Debug, Default)]
pub struct BreedRegistry {
    descriptors: Vec<BreedDescriptor>,
    /// Parallel to `descriptors`; rebuilt whenever links or flags change
    derived: Vec<Derived>,
    by_id: BTreeMap<BreedId, usize>,
    by_name: HashMap<String, usize>,
    pending: Vec<PendingParents>,
}

impl BreedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a breed.
    ///
    /// Fails if the id or (case-insensitive) name is taken, if the tier
    /// override is 0, or if a parent id is not registered yet. Parents must
    /// be registered first, which keeps the graph acyclic.
    pub fn register(&mut self, descriptor: BreedDescriptor) -> Result<(), RegistryError> {
        if self.by_id.contains_key(&descriptor.id) {
            return Err(RegistryError::DuplicateId(descriptor.id));
        }
        let key = descriptor.name.to_lowercase();
        if self.by_name.contains_key(&key) {
            return Err(RegistryError::DuplicateName(descriptor.name));
        }
        if descriptor.tier_override == Some(0) {
            return Err(RegistryError::InvalidTier(descriptor.name));
        }
        for parent in [descriptor.parent1, descriptor.parent2].into_iter().flatten() {
            if parent == descriptor.id {
                return Err(RegistryError::SelfParent(descriptor.name));
            }
            if !self.by_id.contains_key(&parent) {
                return Err(RegistryError::UnknownParent {
                    name: descriptor.name,
                    parent,
                });
            }
        }

        log::debug!(
            "Registered breed '{}' ({})",
            descriptor.name,
            descriptor.id.raw()
        );

        // Parents are already registered, so their cached values are final
        let derived = derive(&descriptor, |parent| {
            self.by_id.get(&parent).map(|&index| self.derived[index])
        });
        let index = self.descriptors.len();
        self.by_id.insert(descriptor.id, index);
        self.by_name.insert(key, index);
        self.descriptors.push(descriptor);
        self.derived.push(derived);
        Ok(())
    }

    /// Recompute every cached tier and enabled state.
    ///
    /// Iterative post-order walk over the (acyclic) parent graph, so each
    /// breed is derived once after its parents and deep chains cannot
    /// overflow the stack.
    fn rebuild_derived(&mut self) {
        let mut derived: Vec<Option<Derived>> = vec![None; self.descriptors.len()];
        let mut stack = Vec::new();

        for start in 0..self.descriptors.len() {
            stack.push(start);
            while let Some(&index) = stack.last() {
                if derived[index].is_some() {
                    stack.pop();
                    continue;
                }
                let waiting: Vec<usize> = self.descriptors[index]
                    .parent_ids()
                    .filter_map(|parent| self.by_id.get(&parent).copied())
                    .filter(|&parent| derived[parent].is_none())
                    .collect();
                if waiting.is_empty() {
                    let value = derive(&self.descriptors[index], |parent| {
                        self.by_id.get(&parent).and_then(|&p| derived[p])
                    });
                    derived[index] = Some(value);
                    stack.pop();
                } else {
                    stack.extend(waiting);
                }
            }
        }

        self.derived = derived.into_iter().flatten().collect();
    }

    /// Register a breed whose parents are only known by name.
    ///
    /// The parent link is filled in by [`resolve_parents`](Self::resolve_parents),
    /// which must run after every source has registered its breeds.
    pub fn register_with_parent_names(
        &mut self,
        descriptor: BreedDescriptor,
        parent1: impl Into<String>,
        parent2: impl Into<String>,
    ) -> Result<(), RegistryError> {
        let child = descriptor.id;
        self.register(descriptor)?;
        self.pending.push(PendingParents {
            child,
            parent1: parent1.into(),
            parent2: parent2.into(),
        });
        Ok(())
    }

    /// Number of by-name parent links still waiting for resolution
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Resolve all by-name parent links registered so far.
    ///
    /// Links that name an unknown breed, the breed itself, or one of its
    /// descendants are skipped with a warning; the breed stays a root.
    pub fn resolve_parents(&mut self) -> ResolveReport {
        let mut report = ResolveReport::default();

        for pending in std::mem::take(&mut self.pending) {
            let Some(&index) = self.by_id.get(&pending.child) else {
                continue;
            };
            match self.check_parent_link(&pending) {
                Ok((parent1, parent2)) => {
                    let descriptor = &mut self.descriptors[index];
                    descriptor.parent1 = Some(parent1);
                    descriptor.parent2 = Some(parent2);
                    report.resolved += 1;
                }
                Err(reason) => {
                    let breed = self.descriptors[index].name.clone();
                    log::warn!(
                        "Skipping parents '{}' x '{}' of breed '{}': {:?}",
                        pending.parent1,
                        pending.parent2,
                        breed,
                        reason
                    );
                    report.unresolved.push(UnresolvedParents {
                        breed,
                        parent1: pending.parent1,
                        parent2: pending.parent2,
                        reason,
                    });
                }
            }
        }

        if report.resolved > 0 {
            self.rebuild_derived();
        }

        log::info!(
            "Resolved {} parent links ({} skipped)",
            report.resolved,
            report.unresolved.len()
        );
        report
    }

    fn check_parent_link(
        &self,
        pending: &PendingParents,
    ) -> Result<(BreedId, BreedId), UnresolvedReason> {
        let lookup = |name: &str| {
            self.get_by_name(name)
                .map(|breed| breed.id())
                .ok_or_else(|| UnresolvedReason::UnknownName(name.to_string()))
        };
        let parent1 = lookup(&pending.parent1)?;
        let parent2 = lookup(&pending.parent2)?;

        if parent1 == pending.child || parent2 == pending.child {
            return Err(UnresolvedReason::SelfReference);
        }
        if self.has_ancestor(parent1, pending.child) || self.has_ancestor(parent2, pending.child)
        {
            return Err(UnresolvedReason::Cycle);
        }
        Ok((parent1, parent2))
    }

    /// True if `ancestor` appears anywhere in the ancestry of `breed`
    fn has_ancestor(&self, breed: BreedId, ancestor: BreedId) -> bool {
        let mut stack = vec![breed];
        let mut visited = HashSet::default();
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            let Some(&index) = self.by_id.get(&current) else {
                continue;
            };
            for parent in self.descriptors[index].parent_ids() {
                if parent == ancestor {
                    return true;
                }
                stack.push(parent);
            }
        }
        false
    }

    /// Get breed by id
    pub fn get_by_type(&self, id: BreedId) -> Option<Breed<'_>> {
        self.by_id.get(&id).map(|&index| Breed::new(self, index))
    }

    /// Get breed by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Option<Breed<'_>> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&index| Breed::new(self, index))
    }

    /// All breeds in ascending id order
    pub fn breeds(&self) -> impl Iterator<Item = Breed<'_>> + '_ {
        self.by_id.values().map(|&index| Breed::new(self, index))
    }

    pub fn get_enabled_breeds(&self) -> Vec<Breed<'_>> {
        self.breeds().filter(|breed| breed.enabled()).collect()
    }

    pub fn get_disabled_breeds(&self) -> Vec<Breed<'_>> {
        self.breeds().filter(|breed| !breed.enabled()).collect()
    }

    /// Breeds that have both parents set
    pub fn breedable_breeds(&self) -> Vec<Breed<'_>> {
        self.breeds().filter(|breed| breed.is_breedable()).collect()
    }

    /// Every enabled crossing that produces a distinct child breed
    pub fn breeding_recipes(&self) -> Vec<BreedingRecipe<'_>> {
        self.breeds()
            .filter(|breed| breed.enabled())
            .filter_map(|child| {
                Some(BreedingRecipe {
                    parent1: child.parent1()?,
                    parent2: child.parent2()?,
                    child,
                })
            })
            .collect()
    }

    /// Possible offspring of two parents, in draw order.
    ///
    /// The parents come first (each if enabled, so a breed crossed with
    /// itself appears twice), followed by every enabled breed whose parents
    /// are exactly this pair, in ascending id order.
    pub fn find_child_candidates<'a>(
        &'a self,
        parent1: Breed<'a>,
        parent2: Breed<'a>,
    ) -> Vec<Breed<'a>> {
        let mut candidates = Vec::new();
        if parent1.enabled() {
            candidates.push(parent1);
        }
        if parent2.enabled() {
            candidates.push(parent2);
        }
        candidates.extend(
            self.breeds()
                .filter(|breed| breed.enabled() && breed.is_child_of(parent1, parent2)),
        );
        candidates
    }

    /// Set the owner's enabled flag for a breed
    pub fn set_enabled(&mut self, id: BreedId, enabled: bool) -> Result<(), RegistryError> {
        let &index = self
            .by_id
            .get(&id)
            .ok_or(RegistryError::UnknownBreed(id))?;
        if self.descriptors[index].explicit_enabled != enabled {
            self.descriptors[index].explicit_enabled = enabled;
            self.rebuild_derived();
        }
        Ok(())
    }

    /// Discard every breed (data reload)
    pub fn reset(&mut self) {
        log::info!("Cleared {} breeds", self.descriptors.len());
        self.descriptors.clear();
        self.derived.clear();
        self.by_id.clear();
        self.by_name.clear();
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub(crate) fn descriptor_at(&self, index: usize) -> &BreedDescriptor {
        &self.descriptors[index]
    }

    pub(crate) fn derived_at(&self, index: usize) -> Derived {
        self.derived[index]
    }
}
