//! Unit definitions, the registry that owns them, and per-instance queries.
//!
//! A [`UnitDefinition`] is an immutable template referenced by [`UnitId`].
//! Runtime instances ([`UnitState`](crate::state::UnitState)) only store the
//! id, so re-deriving behaviour never requires copying configuration onto a
//! live unit.

mod hooks;
mod query;
mod registry;
pub mod roster;

use std::borrow::Borrow;
use std::fmt;

use bitflags::bitflags;

pub use hooks::{LifecycleHook, LifecycleHooks, hooks_for};
pub use query::{ability_cost, attack_cost, attack_preview, move_cost, valid_attacks, valid_moves};
pub use registry::{DefinitionIssue, RegistrationError, UnitRegistry};

use crate::ability::AbilityTag;
use crate::geometry::Pattern;

/// Definition identifier, e.g. `"iron_golem"`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct UnitId(pub String);

impl UnitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UnitId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl Borrow<str> for UnitId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One movement pattern with its reach.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementSpec {
    pub pattern: Pattern,
    pub range: u32,
}

impl MovementSpec {
    pub const fn new(pattern: Pattern, range: u32) -> Self {
        Self { pattern, range }
    }
}

/// Attack pattern plus the special resolution flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AttackSpec {
    pub pattern: Pattern,
    pub range: u32,
    /// Every legal target dies in one resolution.
    pub aoe: bool,
    /// Resolves through the lateral sweep "T" containing the target.
    pub sweep: bool,
    /// Resolves as a self-destruct centred on the attacker.
    pub self_destruct: bool,
    /// Carried as data; has no extra effect on resolution.
    pub splash: bool,
}

impl AttackSpec {
    pub const fn new(pattern: Pattern, range: u32) -> Self {
        Self {
            pattern,
            range,
            aoe: false,
            sweep: false,
            self_destruct: false,
            splash: false,
        }
    }
}

impl Default for AttackSpec {
    fn default() -> Self {
        Self::new(Pattern::Surrounding, 1)
    }
}

bitflags! {
    /// Behavioural switches of a unit definition.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct UnitFlags: u8 {
        /// Losing this unit loses the match.
        const KING            = 1 << 0;
        const CANNOT_MOVE     = 1 << 1;
        const CANNOT_ATTACK   = 1 << 2;
        const CAN_JUMP        = 1 << 3;
        const DARK_TILES_ONLY = 1 << 4;
        /// Attacker occupies the victim's tile after the kill.
        const MOVES_TO_ATTACK = 1 << 5;
    }
}

/// Immutable unit template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitDefinition {
    pub id: UnitId,
    pub name: String,
    pub cost: u32,
    pub movement: Vec<MovementSpec>,
    pub attack: Option<AttackSpec>,
    pub attack_cost: Option<u32>,
    pub ability_cost: Option<u32>,
    pub abilities: Vec<AbilityTag>,
    pub flags: UnitFlags,
    pub description: String,
}

impl UnitDefinition {
    /// Bare definition with no movement, attack or abilities.
    pub fn new(id: impl Into<String>, name: impl Into<String>, cost: u32) -> Self {
        Self {
            id: UnitId::new(id),
            name: name.into(),
            cost,
            movement: Vec::new(),
            attack: None,
            attack_cost: None,
            ability_cost: None,
            abilities: Vec::new(),
            flags: UnitFlags::empty(),
            description: String::new(),
        }
    }

    pub fn with_movement(mut self, pattern: Pattern, range: u32) -> Self {
        self.movement.push(MovementSpec::new(pattern, range));
        self
    }

    pub fn with_attack(mut self, attack: AttackSpec) -> Self {
        self.attack = Some(attack);
        self
    }

    pub fn with_flags(mut self, flags: UnitFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_ability(mut self, tag: AbilityTag) -> Self {
        self.abilities.push(tag);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_king(&self) -> bool {
        self.flags.contains(UnitFlags::KING)
    }

    pub fn has_ability(&self, tag: &AbilityTag) -> bool {
        self.abilities.contains(tag)
    }

    /// First letter of the display name, used by the board dump.
    pub fn glyph(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}
