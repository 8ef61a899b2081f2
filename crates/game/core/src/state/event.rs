use super::{InstanceId, Phase, Position, Side};
use crate::ability::AbilityTag;
use crate::unit::UnitId;

/// Observable outcome of a committed command.
///
/// State mutators append to the match journal; the engine drains it once a
/// command completes and hands the batch to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum MatchEvent {
    TurnStarted {
        side: Side,
        turn: u32,
        phase: Phase,
    },
    TurnEnded {
        side: Side,
        turn: u32,
    },
    UnitSpawned {
        id: InstanceId,
        definition: UnitId,
        owner: Side,
        position: Position,
    },
    UnitMoved {
        id: InstanceId,
        from: Position,
        to: Position,
        dash: bool,
    },
    /// Position change caused by an ability or a moves-to-attack follow-up.
    UnitRelocated {
        id: InstanceId,
        from: Position,
        to: Position,
    },
    UnitAttacked {
        attacker: InstanceId,
        target: Position,
    },
    AbilityUsed {
        id: InstanceId,
        tag: AbilityTag,
    },
    UnitDestroyed {
        id: InstanceId,
        definition: UnitId,
        owner: Side,
        position: Position,
    },
    CardsDrawn {
        side: Side,
        count: usize,
    },
    CardsTaken {
        side: Side,
        from: Side,
        count: usize,
    },
    CardsDiscarded {
        side: Side,
        cards: Vec<UnitId>,
    },
    ManaSpent {
        side: Side,
        amount: u32,
        remaining: u32,
    },
    BonusManaChanged {
        side: Side,
        bonus: u32,
    },
    GameOver {
        winner: Side,
    },
}
