//! Breed catalogs - breed definitions as data
//!
//! A catalog lists breeds with their parents given by name, so a catalog can
//! refer to breeds defined by another catalog. Catalogs serialize to RON:
//!
//! ```ron
//! (
//!     breeds: [
//!         (id: 1, name: "white", natural_spawn: true),
//!         (id: 4, name: "red", natural_spawn: true),
//!         (id: 10, name: "pink", parents: Some(("red", "white"))),
//!     ],
//! )
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::breed::{BreedDescriptor, BreedId};
use crate::registry::{BreedRegistry, RegistryError, ResolveReport};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse breed catalog: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to encode breed catalog: {0}")]
    Encode(#[from] ron::Error),
    #[error("breed '{0}' has id 0 (ids start at 1)")]
    InvalidId(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// One breed definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedEntry {
    pub id: u32,
    pub name: String,
    /// Parent breed names (None for root breeds)
    #[serde(default)]
    pub parents: Option<(String, String)>,
    /// Fixed tier override
    #[serde(default)]
    pub tier: Option<u32>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub natural_spawn: bool,
}

fn default_enabled() -> bool {
    true
}

impl BreedEntry {
    pub fn root(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            parents: None,
            tier: None,
            enabled: true,
            natural_spawn: false,
        }
    }

    pub fn bred_from(mut self, parent1: &str, parent2: &str) -> Self {
        self.parents = Some((parent1.to_string(), parent2.to_string()));
        self
    }

    fn spawns_naturally(mut self) -> Self {
        self.natural_spawn = true;
        self
    }

    fn descriptor(&self) -> Result<BreedDescriptor, CatalogError> {
        let id =
            BreedId::new(self.id).ok_or_else(|| CatalogError::InvalidId(self.name.clone()))?;
        let mut descriptor = BreedDescriptor::root(id, self.name.clone())
            .with_enabled(self.enabled)
            .with_natural_spawn(self.natural_spawn);
        descriptor.tier_override = self.tier;
        Ok(descriptor)
    }
}

/// A set of breed definitions from one source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedCatalog {
    #[serde(default)]
    pub breeds: Vec<BreedEntry>,
}

impl BreedCatalog {
    pub fn from_ron_str(source: &str) -> Result<Self, CatalogError> {
        Ok(ron::from_str(source)?)
    }

    pub fn to_ron_string(&self) -> Result<String, CatalogError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn len(&self) -> usize {
        self.breeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breeds.is_empty()
    }

    /// Register every breed (phase one). Parent links stay pending until
    /// [`BreedRegistry::resolve_parents`] runs.
    pub fn install(&self, registry: &mut BreedRegistry) -> Result<(), CatalogError> {
        for entry in &self.breeds {
            let descriptor = entry.descriptor()?;
            match &entry.parents {
                Some((parent1, parent2)) => registry.register_with_parent_names(
                    descriptor,
                    parent1.as_str(),
                    parent2.as_str(),
                )?,
                None => registry.register(descriptor)?,
            }
        }
        Ok(())
    }

    /// Stock breeds shipped with the game
    pub fn builtin() -> Self {
        let breeds = vec![
            // Dye roots
            BreedEntry::root(1, "white").spawns_naturally(),
            BreedEntry::root(2, "yellow"),
            BreedEntry::root(3, "brown").spawns_naturally(),
            BreedEntry::root(4, "red"),
            BreedEntry::root(5, "blue"),
            BreedEntry::root(6, "green"),
            BreedEntry::root(7, "black"),
            // Material roots
            BreedEntry::root(8, "sand").spawns_naturally(),
            BreedEntry::root(9, "log").spawns_naturally(),
            // Crossings
            BreedEntry::root(10, "pink").bred_from("red", "white"),
            BreedEntry::root(11, "flint").bred_from("log", "sand"),
            BreedEntry::root(12, "snowball").bred_from("blue", "log"),
            BreedEntry::root(13, "glass").bred_from("sand", "snowball"),
            BreedEntry::root(14, "coal").bred_from("flint", "log"),
            BreedEntry::root(15, "iron").bred_from("flint", "white"),
            BreedEntry::root(16, "redstone").bred_from("red", "sand"),
            BreedEntry::root(17, "gold").bred_from("iron", "yellow"),
            BreedEntry::root(18, "glowstone").bred_from("redstone", "yellow"),
            BreedEntry::root(19, "diamond").bred_from("glass", "gold"),
            BreedEntry::root(20, "emerald").bred_from("diamond", "green"),
            BreedEntry {
                tier: Some(8),
                ..BreedEntry::root(21, "ender").bred_from("diamond", "black")
            },
        ];
        Self { breeds }
    }
}

/// Install catalogs from every source, then resolve parent names once.
///
/// Resolution runs after all catalogs are registered so that a catalog may
/// name parents defined by a later one.
pub fn install_catalogs(
    registry: &mut BreedRegistry,
    catalogs: &[BreedCatalog],
) -> Result<ResolveReport, CatalogError> {
    for catalog in catalogs {
        catalog.install(registry)?;
    }
    Ok(registry.resolve_parents())
}
