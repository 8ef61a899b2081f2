//! Data-driven content for Chegg.
//!
//! - deck presets, validation, statistics and the deck store contract
//! - unit definitions loaded from mod directories (RON or TOML)
//! - rule knobs loaded from TOML into [`chegg_core::GameConfig`]
//!
//! Content feeds the unit registry and the match setup; it never appears in
//! match state itself.

pub mod deck;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use deck::{
    DEFAULT_DECK, DeckError, DeckIssue, DeckStats, DeckStore, MemoryDeckStore, default_deck,
    validate_deck,
};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, LoadResult, LoadedUnit, ModIndex, ModIssue, ModLoader, ModReport,
    RawUnitDefinition, RawValidation,
};
