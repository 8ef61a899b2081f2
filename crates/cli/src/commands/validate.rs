//! Validate a mod directory without starting a match.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use chegg_content::ModLoader;
use chegg_core::UnitRegistry;

#[derive(Parser)]
pub struct Validate {
    /// Mod directory holding mods.toml and units/
    #[arg(value_name = "DIR", env = "CHEGG_MODS_DIR")]
    mods_dir: PathBuf,

    /// Treat warnings as errors
    #[arg(long)]
    strict: bool,
}

impl Validate {
    pub fn execute(self) -> Result<()> {
        let mut report = ModLoader::load_dir(&self.mods_dir);
        let installed = report.install(&mut UnitRegistry::new());

        for unit in &report.units {
            println!(
                "ok      {} ({}) from {}",
                unit.definition.id,
                unit.definition.name,
                unit.path.display()
            );
        }
        for warning in &report.warnings {
            println!("warning {warning}");
        }
        for error in &report.errors {
            println!("error   {error}");
        }
        println!(
            "{installed} unit(s) loaded, {} error(s), {} warning(s)",
            report.errors.len(),
            report.warnings.len()
        );

        if !report.is_clean() {
            bail!("{} mod error(s) in {}", report.errors.len(), self.mods_dir.display());
        }
        if self.strict && !report.warnings.is_empty() {
            bail!("{} mod warning(s) in strict mode", report.warnings.len());
        }
        Ok(())
    }
}
