mod deck;
mod replay;
mod roster;
mod validate;

pub use deck::Deck;
pub use replay::Replay;
pub use roster::Roster;
pub use validate::Validate;

use std::path::PathBuf;

use anyhow::Result;
use chegg_content::ModReport;
use chegg_core::UnitRegistry;
use chegg_runtime::RuntimeConfig;
use clap::Args;

/// Content sources shared by every command.
#[derive(Args, Debug, Clone)]
pub struct ContentArgs {
    /// Mod directory holding mods.toml and units/
    #[arg(long, value_name = "DIR", env = "CHEGG_MODS_DIR")]
    mods_dir: Option<PathBuf>,

    /// TOML file with rule overrides
    #[arg(long, value_name = "FILE", env = "CHEGG_CONFIG")]
    config: Option<PathBuf>,
}

impl ContentArgs {
    fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            mods_dir: self.mods_dir.clone(),
            config_path: self.config.clone(),
            ..RuntimeConfig::from_env()
        }
    }

    fn registry(&self) -> Result<(UnitRegistry, ModReport)> {
        self.runtime_config().build_registry()
    }
}
