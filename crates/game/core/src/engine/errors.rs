//! Errors surfaced when the engine refuses a command.
//!
//! A refused command never mutates the match. Every variant carries an
//! [`ErrorContext`] with the command nonce so runtime logs can be correlated
//! with replays.

use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::{InstanceId, Phase, Position, Side};

/// Command families, used to say which command a phase refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CommandKind {
    StartMatch,
    Spawn,
    Move,
    Attack,
    Ability,
    EndTurn,
}

/// Coarse grouping used by callers that only care about the kind of refusal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Right command, wrong moment or wrong actor.
    IllegalAction,
    InsufficientResource,
    /// The addressed tile or unit is not in the legal set.
    GeometryMiss,
}

/// Why a target was refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TargetIssue {
    #[error("card `{0}` is not in hand")]
    CardNotInHand(String),

    #[error("unit definition `{0}` is not registered")]
    UnknownDefinition(String),

    #[error("tile is outside the spawn zone")]
    OutsideSpawnZone,

    #[error("tile is occupied")]
    Occupied,

    #[error("no such unit")]
    UnknownUnit,

    #[error("tile is not reachable")]
    Unreachable,

    #[error("no attackable enemy on that tile")]
    NotAttackable,

    #[error("ability `{0}` is not available to this unit")]
    AbilityUnavailable(String),

    #[error("target is not offered by the ability")]
    NotOffered,

    #[error("ability had no effect")]
    NoEffect,

    #[error("king is already on the board")]
    KingAlreadyPlaced,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandError {
    #[error("insufficient mana: need {required}, have {available}")]
    InsufficientMana {
        required: u32,
        available: u32,
        context: ErrorContext,
    },

    #[error("unit belongs to {owner} but it is {current}'s turn")]
    NotYourTurn {
        owner: Side,
        current: Side,
        context: ErrorContext,
    },

    #[error("{command} is not allowed during {phase}")]
    IllegalPhase {
        command: CommandKind,
        phase: Phase,
        context: ErrorContext,
    },

    #[error("invalid target: {issue}")]
    InvalidTarget {
        issue: TargetIssue,
        context: ErrorContext,
    },

    #[error("position {position} is off the board")]
    OutOfBounds {
        position: Position,
        context: ErrorContext,
    },

    #[error("unit {unit} cannot act again this turn")]
    UnitAlreadyActed {
        unit: InstanceId,
        context: ErrorContext,
    },
}

impl CommandError {
    pub fn insufficient_mana(required: u32, available: u32, context: ErrorContext) -> Self {
        Self::InsufficientMana {
            required,
            available,
            context,
        }
    }

    pub fn not_your_turn(owner: Side, current: Side, context: ErrorContext) -> Self {
        Self::NotYourTurn {
            owner,
            current,
            context,
        }
    }

    pub fn illegal_phase(command: CommandKind, phase: Phase, context: ErrorContext) -> Self {
        Self::IllegalPhase {
            command,
            phase,
            context,
        }
    }

    pub fn invalid_target(issue: TargetIssue, context: ErrorContext) -> Self {
        Self::InvalidTarget { issue, context }
    }

    pub fn out_of_bounds(position: Position, context: ErrorContext) -> Self {
        Self::OutOfBounds { position, context }
    }

    pub fn already_acted(unit: InstanceId, context: ErrorContext) -> Self {
        Self::UnitAlreadyActed { unit, context }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotYourTurn { .. } | Self::IllegalPhase { .. } | Self::UnitAlreadyActed { .. } => {
                ErrorCategory::IllegalAction
            }
            Self::InsufficientMana { .. } => ErrorCategory::InsufficientResource,
            Self::InvalidTarget { .. } | Self::OutOfBounds { .. } => ErrorCategory::GeometryMiss,
        }
    }
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::IllegalAction | ErrorCategory::InsufficientResource => {
                ErrorSeverity::Recoverable
            }
            ErrorCategory::GeometryMiss => ErrorSeverity::Validation,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::InsufficientMana { context, .. }
            | Self::NotYourTurn { context, .. }
            | Self::IllegalPhase { context, .. }
            | Self::InvalidTarget { context, .. }
            | Self::OutOfBounds { context, .. }
            | Self::UnitAlreadyActed { context, .. } => Some(context),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientMana { .. } => "COMMAND_INSUFFICIENT_MANA",
            Self::NotYourTurn { .. } => "COMMAND_NOT_YOUR_TURN",
            Self::IllegalPhase { .. } => "COMMAND_ILLEGAL_PHASE",
            Self::InvalidTarget { .. } => "COMMAND_INVALID_TARGET",
            Self::OutOfBounds { .. } => "COMMAND_OUT_OF_BOUNDS",
            Self::UnitAlreadyActed { .. } => "COMMAND_UNIT_ALREADY_ACTED",
        }
    }
}
