use super::CommandKind;
use crate::ability::{AbilityTag, AbilityTarget};
use crate::state::{InstanceId, Position};
use crate::unit::UnitId;

/// Player intent addressed to the engine.
///
/// Commands are plain data so they can be queued, logged and replayed; the
/// engine re-validates each one against the live match when it executes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "command", rename_all = "snake_case"))]
pub enum Command {
    /// Place a card from the current player's hand on a spawn-zone tile.
    Spawn { card: UnitId, position: Position },
    Move { unit: InstanceId, to: Position },
    Attack { unit: InstanceId, target: Position },
    UseAbility {
        unit: InstanceId,
        ability: AbilityTag,
        target: AbilityTarget,
    },
    EndTurn,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Spawn { .. } => CommandKind::Spawn,
            Command::Move { .. } => CommandKind::Move,
            Command::Attack { .. } => CommandKind::Attack,
            Command::UseAbility { .. } => CommandKind::Ability,
            Command::EndTurn => CommandKind::EndTurn,
        }
    }

    /// Unit the command addresses, if any.
    pub fn unit(&self) -> Option<InstanceId> {
        match self {
            Command::Move { unit, .. }
            | Command::Attack { unit, .. }
            | Command::UseAbility { unit, .. } => Some(*unit),
            Command::Spawn { .. } | Command::EndTurn => None,
        }
    }
}
