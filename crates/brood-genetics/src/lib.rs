//! Breed genetics for Brood
//!
//! This crate implements:
//! - Breed descriptors forming a parent graph, with derived tier and enabled state
//! - A registry indexed by id and case-insensitive name, with two-phase parent resolution
//! - Weighted offspring resolution biased toward low-tier breeds
//! - Stat inheritance with strength-weighted mutation
//! - RON breed catalogs for data-driven breed definitions

pub mod breed;
pub mod breeding;
pub mod catalog;
pub mod registry;
pub mod resolver;
pub mod rng;
pub mod stats;

// Re-export main types for convenience
pub use breed::{Breed, BreedDescriptor, BreedId};
pub use breeding::{BreedingError, Offspring, Specimen, breed};
pub use catalog::{BreedCatalog, BreedEntry, CatalogError, install_catalogs};
pub use registry::{BreedRegistry, BreedingRecipe, RegistryError, ResolveReport};
pub use resolver::{CandidateSet, ChildResolver};
pub use rng::BreedRng;
pub use stats::{CreatureStats, Inheritance, MAX_STAT, MIN_STAT};
