//! Session configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

use chegg_content::{ConfigLoader, LoadResult, ModLoader, ModReport};
use chegg_core::{GameConfig, UnitRegistry};
use tracing::warn;

use crate::log::CommandLog;

/// Where a session gets its seed and content from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Deck shuffle seed for new matches.
    pub seed: u64,
    /// Directory holding `mods.toml` and `units/`.
    pub mods_dir: Option<PathBuf>,
    /// TOML file with rule overrides.
    pub config_path: Option<PathBuf>,
    /// JSON-lines command log; see [`Self::open_log`].
    pub command_log: Option<PathBuf>,
}

impl RuntimeConfig {
    pub const SEED_VAR: &'static str = "CHEGG_SEED";
    pub const MODS_DIR_VAR: &'static str = "CHEGG_MODS_DIR";
    pub const CONFIG_VAR: &'static str = "CHEGG_CONFIG";
    pub const COMMAND_LOG_VAR: &'static str = "CHEGG_COMMAND_LOG";

    /// Construct configuration from process environment variables.
    ///
    /// - `CHEGG_SEED` (unparseable values are ignored)
    /// - `CHEGG_MODS_DIR`
    /// - `CHEGG_CONFIG`
    /// - `CHEGG_COMMAND_LOG`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] over an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(seed) = read_env::<u64, _>(&lookup, Self::SEED_VAR) {
            config.seed = seed;
        }
        config.mods_dir = read_env(&lookup, Self::MODS_DIR_VAR);
        config.config_path = read_env(&lookup, Self::CONFIG_VAR);
        config.command_log = read_env(&lookup, Self::COMMAND_LOG_VAR);

        config
    }

    /// Unit registry with the configured rule overrides and mod units.
    ///
    /// Mod problems are logged and returned in the report; only an unreadable
    /// rules file is an error.
    pub fn build_registry(&self) -> LoadResult<(UnitRegistry, ModReport)> {
        let rules = match &self.config_path {
            Some(path) => ConfigLoader::load(path)?,
            None => GameConfig::default(),
        };
        let mut registry = UnitRegistry::with_config(rules);

        let mut report = match &self.mods_dir {
            Some(dir) => ModLoader::load_dir(dir),
            None => ModReport::default(),
        };
        report.install(&mut registry);
        for issue in &report.errors {
            warn!(target: "chegg::registry", "{issue}");
        }
        Ok((registry, report))
    }

    /// Creates the configured command log, `None` when no path is set.
    ///
    /// Fails when the file already exists.
    pub fn open_log(&self) -> crate::Result<Option<CommandLog>> {
        self.command_log
            .as_ref()
            .map(|path| CommandLog::create(path.clone()))
            .transpose()
    }
}

fn read_env<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key)?;
    if value.trim().is_empty() {
        return None;
    }
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_every_variable() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("CHEGG_SEED", "42"),
            ("CHEGG_MODS_DIR", "/srv/chegg/mods"),
            ("CHEGG_CONFIG", "rules.toml"),
            ("CHEGG_COMMAND_LOG", "match.jsonl"),
        ]));

        assert_eq!(config.seed, 42);
        assert_eq!(config.mods_dir, Some(PathBuf::from("/srv/chegg/mods")));
        assert_eq!(config.config_path, Some(PathBuf::from("rules.toml")));
        assert_eq!(config.command_log, Some(PathBuf::from("match.jsonl")));
    }

    #[test]
    fn registry_without_content_is_the_built_in_one() {
        let (registry, report) = RuntimeConfig::default().build_registry().expect("defaults");
        assert_eq!(registry.all().len(), 18);
        assert!(report.is_clean());
    }

    #[test]
    fn rules_file_is_applied() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("rules.toml");
        std::fs::write(&path, "initial_hand = 5").expect("write");

        let config = RuntimeConfig {
            config_path: Some(path),
            ..RuntimeConfig::default()
        };
        let (registry, _) = config.build_registry().expect("loads");
        assert_eq!(registry.config().initial_hand, 5);
    }

    #[test]
    fn command_log_is_opened_only_when_configured() {
        assert!(RuntimeConfig::default().open_log().expect("no log").is_none());

        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("match.jsonl");
        let config = RuntimeConfig {
            command_log: Some(path.clone()),
            ..RuntimeConfig::default()
        };

        let log = config.open_log().expect("fresh file").expect("configured");
        assert_eq!(log.path(), path.as_path());
        assert!(matches!(
            config.open_log(),
            Err(crate::RuntimeError::LogAlreadyExists(_))
        ));
    }

    #[test]
    fn bad_or_blank_values_fall_back() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("CHEGG_SEED", "not-a-number"),
            ("CHEGG_MODS_DIR", "  "),
        ]));
        assert_eq!(config, RuntimeConfig::default());
    }
}
