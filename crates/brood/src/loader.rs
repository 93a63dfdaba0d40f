//! Breed registry loading from configured catalogs

use std::path::Path;

use anyhow::{Context, Result};
use brood_genetics::{BreedCatalog, BreedRegistry, install_catalogs};

use crate::config::CatalogConfig;

/// Read a RON breed catalog from disk
pub fn read_catalog(path: &Path) -> Result<BreedCatalog> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read breed catalog {}", path.display()))?;
    BreedCatalog::from_ron_str(&source)
        .with_context(|| format!("Failed to parse breed catalog {}", path.display()))
}

/// Build the registry: builtin breeds (optional), then every extension
/// catalog, then one parent resolution pass, then configured disables.
pub fn load_registry(config: &CatalogConfig) -> Result<BreedRegistry> {
    let mut catalogs = Vec::new();
    if config.include_builtin {
        catalogs.push(BreedCatalog::builtin());
    }
    for path in &config.extensions {
        catalogs.push(read_catalog(Path::new(path))?);
    }

    let mut registry = BreedRegistry::new();
    let report =
        install_catalogs(&mut registry, &catalogs).context("Failed to install breed catalogs")?;

    for name in &config.disabled {
        let Some(id) = registry.get_by_name(name).map(|breed| breed.id()) else {
            log::warn!("Cannot disable unknown breed '{}'", name);
            continue;
        };
        registry.set_enabled(id, false)?;
    }

    log::info!(
        "Loaded {} breeds from {} catalogs ({} unresolved parent links)",
        registry.len(),
        catalogs.len(),
        report.unresolved.len()
    );

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_builtin_only() {
        let registry = load_registry(&CatalogConfig::default()).unwrap();
        assert_eq!(registry.len(), BreedCatalog::builtin().len());
        assert!(registry.get_disabled_breeds().is_empty());
    }

    #[test]
    fn test_load_with_extension_and_disables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nether.ron");
        std::fs::write(
            &path,
            r#"(
                breeds: [
                    (id: 100, name: "blaze", parents: Some(("gold", "log"))),
                    (id: 101, name: "ghast", parents: Some(("white", "blaze"))),
                ],
            )"#,
        )
        .unwrap();

        let config = CatalogConfig {
            include_builtin: true,
            extensions: vec![path.to_string_lossy().into_owned()],
            disabled: vec!["Gold".to_string(), "unknown".to_string()],
        };
        let registry = load_registry(&config).unwrap();

        let ghast = registry.get_by_name("ghast").unwrap();
        assert_eq!(ghast.tier(), 6);
        assert!(!ghast.enabled());
        assert!(!registry.get_by_name("blaze").unwrap().enabled());
        assert!(registry.get_by_name("iron").unwrap().enabled());
    }

    #[test]
    fn test_missing_extension_is_an_error() {
        let config = CatalogConfig {
            include_builtin: false,
            extensions: vec!["/nonexistent/breeds.ron".to_string()],
            disabled: Vec::new(),
        };
        let error = load_registry(&config).unwrap_err();
        assert!(error.to_string().contains("Failed to read breed catalog"));
    }

    #[test]
    fn test_duplicate_breed_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clash.ron");
        std::fs::write(&path, r#"(breeds: [(id: 1, name: "albino")])"#).unwrap();

        let config = CatalogConfig {
            include_builtin: true,
            extensions: vec![path.to_string_lossy().into_owned()],
            disabled: Vec::new(),
        };
        assert!(load_registry(&config).is_err());
    }
}
