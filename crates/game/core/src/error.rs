//! Common error infrastructure for chegg-core.
//!
//! Domain-specific errors (`CommandError`, `RegistrationError`,
//! `AbilityRegistrationError`) live next to the operations that produce them
//! and share the classification defined here.
//!
//! # Design Principles
//!
//! - **Type Safety**: each surface has its own error enum
//! - **Rich Context**: command errors carry unit, position and nonce
//! - **Severity Classification**: errors are categorized for recovery strategies

use crate::state::{InstanceId, Position};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: legal in principle, wrong moment (turn, phase, mana)
/// - **Validation**: malformed input that should not be retried unchanged
/// - **Internal**: state inconsistency that indicates a bug
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: not your turn, not enough mana.
    Recoverable,

    /// Examples: target outside the legal set, rejected unit definition.
    Validation,

    /// Examples: occupancy desync. These indicate bugs.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Contextual information captured where a command was refused.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Unit the command addressed (if applicable).
    pub unit: Option<InstanceId>,

    /// Tile the command targeted (if applicable).
    pub position: Option<Position>,

    /// Command nonce at the time of error, for correlating logs and replays.
    pub nonce: u64,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(nonce: u64) -> Self {
        Self {
            unit: None,
            position: None,
            nonce,
        }
    }

    /// Attaches a unit to this context (builder pattern).
    #[must_use]
    pub const fn with_unit(mut self, unit: InstanceId) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Attaches a position to this context (builder pattern).
    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

/// Common trait for all chegg-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Static identifier for this error variant, for metrics and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
