use bitflags::bitflags;

use super::{InstanceId, Position, Side};
use crate::unit::{LifecycleHooks, UnitId};

bitflags! {
    /// Per-turn action bookkeeping, cleared when the owner's turn starts.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TurnFlags: u8 {
        const JUST_SPAWNED = 1 << 0;
        const MOVED        = 1 << 1;
        const DASHED       = 1 << 2;
        const ATTACKED     = 1 << 3;
        const USED_ABILITY = 1 << 4;
    }
}

/// Runtime state of a unit on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitState {
    pub id: InstanceId,
    pub owner: Side,
    pub definition: UnitId,
    pub position: Position,
    pub king: bool,
    pub flags: TurnFlags,
    pub hooks: LifecycleHooks,
}

impl UnitState {
    pub fn new(
        id: InstanceId,
        owner: Side,
        definition: UnitId,
        king: bool,
        hooks: LifecycleHooks,
    ) -> Self {
        Self {
            id,
            owner,
            definition,
            position: Position::default(),
            king,
            flags: TurnFlags::JUST_SPAWNED,
            hooks,
        }
    }

    pub fn just_spawned(&self) -> bool {
        self.flags.contains(TurnFlags::JUST_SPAWNED)
    }

    pub fn has_moved(&self) -> bool {
        self.flags.contains(TurnFlags::MOVED)
    }

    pub fn has_dashed(&self) -> bool {
        self.flags.contains(TurnFlags::DASHED)
    }

    pub fn has_attacked(&self) -> bool {
        self.flags.contains(TurnFlags::ATTACKED)
    }

    pub fn has_used_ability(&self) -> bool {
        self.flags.contains(TurnFlags::USED_ABILITY)
    }

    /// Attack or ability already spent this turn.
    pub fn has_acted(&self) -> bool {
        self.flags
            .intersects(TurnFlags::ATTACKED | TurnFlags::USED_ABILITY)
    }

    pub fn reset_turn_flags(&mut self) {
        self.flags = TurnFlags::empty();
    }
}
