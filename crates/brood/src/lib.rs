//! # Brood - breed catalog tooling
//!
//! Loads breed catalogs into a registry and reports on the breed graph:
//! tiers, crossing chances, and simulated breeding lines.

pub mod config;
pub mod loader;
pub mod report;
pub mod simulation;

pub use config::BroodConfig;
pub use loader::load_registry;
