//! Deterministic rules engine for Chegg, a turn-based tactical board game.
//!
//! `chegg-core` owns the canonical rules: board geometry, the mana economy,
//! unit definitions and their abilities, and the turn state machine. It is
//! synchronous and renders nothing. All state mutation flows through
//! [`engine::GameEngine`]; runtime crates depend on the types re-exported
//! here.
pub mod ability;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod mana;
pub mod rng;
pub mod state;
pub mod unit;

pub use ability::{
    AbilityContext, AbilityHandler, AbilityRegistrationError, AbilityRegistry, AbilityTag,
    AbilityTarget, PassiveAbility, TagKind,
};
pub use config::GameConfig;
pub use engine::{
    Command, CommandError, CommandKind, CommandResult, ErrorCategory, GameEngine, GameEnv,
    TargetIssue,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use geometry::{BoardView, Pattern};
pub use mana::ManaLedger;
pub use state::{
    Board, BoardDump, Direction, DumpCell, DumpParseError, InstanceId, MatchEvent, MatchState,
    Phase, PlayerState, Position, Side, Tile, TurnFlags, TurnState, UnitState, Zone,
};
pub use unit::{
    AttackSpec, DefinitionIssue, MovementSpec, RegistrationError, UnitDefinition, UnitFlags,
    UnitId, UnitRegistry,
};
