//! Mod directory loader.
//!
//! ```text
//! mods_dir/
//! ├── mods.toml          # units = ["ghast.ron", "extra.toml"]
//! └── units/
//!     ├── ghast.ron      # [ (id: "ghast", ...), ... ]
//!     └── extra.toml     # [[units]] id = "...", ...
//! ```
//!
//! Problems are collected per file and per definition; one bad file never
//! stops the rest of the directory from loading.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use chegg_core::{UnitDefinition, UnitRegistry};

use super::units::RawUnitDefinition;
use super::{LoadResult, read_file};

/// Contents of `mods.toml`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ModIndex {
    /// Unit files, relative to `units/`.
    pub units: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TomlUnitFile {
    units: Vec<RawUnitDefinition>,
}

/// One error or warning tied to the file it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModIssue {
    pub path: PathBuf,
    /// Definition label, absent for file-level problems.
    pub unit: Option<String>,
    pub message: String,
}

impl fmt::Display for ModIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())?;
        if let Some(unit) = &self.unit {
            write!(f, " [{unit}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// A definition that passed validation, with its source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedUnit {
    pub definition: UnitDefinition,
    pub path: PathBuf,
}

#[derive(Clone, Debug, Default)]
pub struct ModReport {
    pub units: Vec<LoadedUnit>,
    pub errors: Vec<ModIssue>,
    pub warnings: Vec<ModIssue>,
}

impl ModReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Registers every loaded unit, moving rejected ones into `errors`.
    ///
    /// Returns how many definitions the registry accepted.
    pub fn install(&mut self, registry: &mut UnitRegistry) -> usize {
        let mut installed = 0;
        for loaded in std::mem::take(&mut self.units) {
            match registry.register(loaded.definition.clone()) {
                Ok(()) => {
                    installed += 1;
                    self.units.push(loaded);
                }
                Err(err) => self.errors.push(ModIssue {
                    path: loaded.path,
                    unit: Some(err.id.to_string()),
                    message: err.to_string(),
                }),
            }
        }
        installed
    }

    fn issue(list: &mut Vec<ModIssue>, path: &Path, unit: Option<&str>, message: String) {
        list.push(ModIssue {
            path: path.to_path_buf(),
            unit: unit.map(str::to_owned),
            message,
        });
    }
}

pub struct ModLoader;

impl ModLoader {
    pub const INDEX_FILE: &'static str = "mods.toml";
    pub const UNITS_DIR: &'static str = "units";

    /// Reads `mods.toml`; `Ok(None)` when the directory has no index.
    pub fn load_index(mods_dir: &Path) -> LoadResult<Option<ModIndex>> {
        let path = mods_dir.join(Self::INDEX_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = read_file(&path)?;
        let index = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse mod index {}: {}", path.display(), e))?;
        Ok(Some(index))
    }

    /// Parses one unit file, RON or TOML by extension.
    pub fn load_file(path: &Path) -> LoadResult<Vec<RawUnitDefinition>> {
        let content = read_file(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("ron") => ron::Options::default()
                .with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
                .from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse unit RON {}: {}", path.display(), e)),
            Some("toml") => toml::from_str::<TomlUnitFile>(&content)
                .map(|file| file.units)
                .map_err(|e| {
                    anyhow::anyhow!("Failed to parse unit TOML {}: {}", path.display(), e)
                }),
            _ => Err(anyhow::anyhow!(
                "Unsupported unit file {}: expected .ron or .toml",
                path.display()
            )),
        }
    }

    /// Loads every unit file the index lists and validates each definition.
    pub fn load_dir(mods_dir: &Path) -> ModReport {
        let mut report = ModReport::default();
        let index_path = mods_dir.join(Self::INDEX_FILE);

        let index = match Self::load_index(mods_dir) {
            Ok(Some(index)) => index,
            Ok(None) => {
                ModReport::issue(
                    &mut report.warnings,
                    &index_path,
                    None,
                    "no mod index found, skipping custom units".to_owned(),
                );
                return report;
            }
            Err(err) => {
                ModReport::issue(&mut report.errors, &index_path, None, err.to_string());
                return report;
            }
        };

        for file in &index.units {
            let path = mods_dir.join(Self::UNITS_DIR).join(file);
            let raws = match Self::load_file(&path) {
                Ok(raws) => raws,
                Err(err) => {
                    warn!(target: "chegg::content", path = %path.display(), error = %err, "unit file skipped");
                    ModReport::issue(&mut report.errors, &path, None, err.to_string());
                    continue;
                }
            };

            for raw in raws {
                let label = raw.label().to_owned();
                let validation = raw.validate();
                for warning in validation.warnings {
                    ModReport::issue(&mut report.warnings, &path, Some(&label), warning);
                }
                match raw.into_definition() {
                    Ok(definition) => report.units.push(LoadedUnit {
                        definition,
                        path: path.clone(),
                    }),
                    Err(rejected) => {
                        warn!(
                            target: "chegg::content",
                            path = %path.display(),
                            unit = %label,
                            "unit definition rejected: {}",
                            rejected.errors.join(", ")
                        );
                        ModReport::issue(
                            &mut report.errors,
                            &path,
                            Some(&label),
                            rejected.errors.join(", "),
                        );
                    }
                }
            }
        }

        info!(
            target: "chegg::content",
            units = report.units.len(),
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "mods loaded from {}",
            mods_dir.display()
        );
        report
    }
}
