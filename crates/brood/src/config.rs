//! Brood configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `brood.ron` file (if exists)
//! 3. Environment variables prefixed with `BROOD_`
//!
//! Example environment variable: `BROOD_SIMULATION__GENERATIONS=25`

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BroodConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Where breed definitions come from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Install the stock breeds before any extension catalog
    pub include_builtin: bool,
    /// Extra RON catalogs, installed in order
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Breed names to disable after loading
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            include_builtin: true,
            extensions: Vec::new(),
            disabled: Vec::new(),
        }
    }
}

/// Breeding simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Fixed RNG seed (None = seed from entropy)
    #[serde(default)]
    pub seed: Option<u64>,
    /// Generations to run for `brood breed`
    pub generations: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            generations: 10,
        }
    }
}

impl BroodConfig {
    /// Load configuration from `brood.ron` in the working directory
    pub fn load() -> Result<Self> {
        Self::load_from("brood")
    }

    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. The RON file at `path` (if exists)
    /// 3. Environment variables prefixed with `BROOD_` (highest priority)
    pub fn load_from(path: &str) -> Result<Self> {
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("catalog.include_builtin", true)?
            .set_default("catalog.extensions", Vec::<String>::new())?
            .set_default("catalog.disabled", Vec::<String>::new())?
            .set_default("simulation.generations", 10_i64)?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name(path)
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (BROOD_SIMULATION__SEED, etc.)
            .add_source(
                Environment::with_prefix("BROOD")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("catalog.extensions")
                    .with_list_parse_key("catalog.disabled"),
            );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BroodConfig::default();
        assert!(config.catalog.include_builtin);
        assert!(config.catalog.extensions.is_empty());
        assert_eq!(config.simulation.generations, 10);
        assert_eq!(config.simulation.seed, None);
    }

    #[test]
    fn test_load_config_with_defaults() {
        // Should load defaults when no config file exists
        let config = BroodConfig::load_from("does-not-exist").expect("Failed to load config");
        assert!(config.catalog.include_builtin);
        assert_eq!(config.simulation.generations, 10);
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brood.ron");
        std::fs::write(
            &path,
            r#"(
                catalog: (
                    include_builtin: false,
                    extensions: ["extra.ron"],
                ),
                simulation: (
                    seed: 7,
                    generations: 3,
                ),
            )"#,
        )
        .unwrap();

        let config =
            BroodConfig::load_from(path.to_str().unwrap()).expect("Failed to load config");
        assert!(!config.catalog.include_builtin);
        assert_eq!(config.catalog.extensions, vec!["extra.ron".to_string()]);
        assert!(config.catalog.disabled.is_empty());
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.simulation.generations, 3);
    }
}
