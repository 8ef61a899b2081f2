//! Game configuration loader.

use std::path::Path;

use chegg_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for rule knobs from TOML files.
///
/// Keys left out of the file keep their [`GameConfig::default`] values.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)?;
        if config.mana_ceiling == 0 {
            anyhow::bail!("mana_ceiling must be at least 1");
        }
        if config.pull_distance < 1 {
            anyhow::bail!("pull_distance must be at least 1");
        }
        Ok(config)
    }
}
