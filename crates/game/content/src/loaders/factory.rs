//! Content factory for building registries from a data directory.

use std::path::{Path, PathBuf};

use chegg_core::{GameConfig, UnitRegistry};
use tracing::{info, warn};

use crate::loaders::{ConfigLoader, LoadResult, ModLoader, ModReport};

/// Loads rule knobs and mod units from one directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml        # optional GameConfig overrides
/// └── mods/
///     ├── mods.toml
///     └── units/
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// `config.toml`, or the defaults when the file does not exist.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    pub fn mods_dir(&self) -> PathBuf {
        self.data_dir.join("mods")
    }

    /// Builds a registry from the config and installs every valid mod unit.
    pub fn build_registry(&self) -> LoadResult<(UnitRegistry, ModReport)> {
        let mut registry = UnitRegistry::with_config(self.load_config()?);
        let mut report = ModLoader::load_dir(&self.mods_dir());
        let installed = report.install(&mut registry);

        for issue in &report.errors {
            warn!(target: "chegg::registry", "{issue}");
        }
        info!(
            target: "chegg::registry",
            installed,
            total = registry.all().len(),
            "unit registry ready"
        );
        Ok((registry, report))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn empty_directory_yields_built_ins_and_defaults() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let factory = ContentFactory::new(dir.path());

        let (registry, report) = factory.build_registry().expect("defaults");
        assert_eq!(registry.all().len(), 18);
        assert_eq!(registry.config(), &GameConfig::default());
        assert!(report.is_clean());
    }

    #[test]
    fn config_and_mods_are_combined() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        fs::write(dir.path().join("config.toml"), "pull_distance = 3").expect("config");
        let units = dir.path().join("mods").join("units");
        fs::create_dir_all(&units).expect("mods dir");
        fs::write(dir.path().join("mods/mods.toml"), r#"units = ["owl.toml"]"#).expect("index");
        fs::write(
            units.join("owl.toml"),
            r#"
            [[units]]
            id = "owl"
            name = "Owl"
            cost = 2
            description = "Sees far."
            movement = { pattern = "knight" }
            "#,
        )
        .expect("unit");

        let (registry, report) = ContentFactory::new(dir.path())
            .build_registry()
            .expect("loads");
        assert_eq!(registry.config().pull_distance, 3);
        assert!(registry.contains("owl"));
        assert_eq!(report.units.len(), 1);
    }
}
