//! Pluggable unit abilities.
//!
//! Active abilities implement [`AbilityHandler`]: they enumerate targets and
//! apply one of them. Passive abilities implement [`PassiveAbility`] and fire
//! after a move. Handlers never touch turn flags or mana; the engine owns that
//! bookkeeping and calls `apply` only after validating cost and target.
//! `apply` returns `false` without mutating anything when the target went
//! stale or the effect would do nothing.

mod copy_attack;
mod jump_draw;
mod pull;
mod self_destruct;
mod sweep;
mod tag;
mod teleport;

use std::collections::BTreeMap;

pub use copy_attack::CopyAttack;
pub use jump_draw::JumpDraw;
pub use pull::Pull;
pub use self_destruct::{SelfDestruct, detonate};
pub use sweep::{Sweep, sweep_tiles};
pub use tag::{AbilityTag, TagKind};
pub use teleport::Teleport;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Direction, InstanceId, MatchState, Position, UnitState};
use crate::unit::{UnitDefinition, UnitRegistry};

/// Target chosen for an active ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AbilityTarget {
    /// Target-less abilities offer this single pseudo-target.
    Confirm,
    Tile(Position),
    Direction(Direction),
}

/// Read-only inputs shared by every handler invocation.
#[derive(Clone, Copy)]
pub struct AbilityContext<'a> {
    pub caster: InstanceId,
    pub units: &'a UnitRegistry,
    pub config: &'a GameConfig,
}

impl<'a> AbilityContext<'a> {
    pub fn new(caster: InstanceId, units: &'a UnitRegistry, config: &'a GameConfig) -> Self {
        Self {
            caster,
            units,
            config,
        }
    }

    pub fn caster<'s>(&self, state: &'s MatchState) -> Option<&'s UnitState> {
        state.unit(self.caster)
    }

    pub fn definition_of(&self, unit: &UnitState) -> Option<&'a UnitDefinition> {
        self.units.get(&unit.definition)
    }
}

pub trait AbilityHandler: Send + Sync {
    /// Price charged when the definition does not override it.
    fn cost(&self) -> u32 {
        1
    }

    fn targets(&self, ctx: &AbilityContext<'_>, state: &MatchState) -> Vec<AbilityTarget>;

    fn apply(&self, ctx: &AbilityContext<'_>, target: &AbilityTarget, state: &mut MatchState)
    -> bool;
}

pub trait PassiveAbility: Send + Sync {
    /// Whether a move from `from` to `to` (already applied) fires the ability.
    fn check_trigger(
        &self,
        ctx: &AbilityContext<'_>,
        from: Position,
        to: Position,
        state: &MatchState,
    ) -> bool;

    fn on_trigger(&self, ctx: &AbilityContext<'_>, state: &mut MatchState);
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AbilityRegistrationError {
    #[error("`{0}` is a lifecycle tag resolved through spawn/death hooks")]
    LifecycleTag(AbilityTag),

    #[error("`{0}` is a passive ability and needs a passive handler")]
    ExpectedPassive(AbilityTag),

    #[error("`{0}` is an active ability and needs an active handler")]
    ExpectedActive(AbilityTag),

    #[error("custom ability names must not be blank")]
    BlankName,
}

impl GameError for AbilityRegistrationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LifecycleTag(_) => "ABILITY_LIFECYCLE_TAG",
            Self::ExpectedPassive(_) => "ABILITY_EXPECTED_PASSIVE",
            Self::ExpectedActive(_) => "ABILITY_EXPECTED_ACTIVE",
            Self::BlankName => "ABILITY_BLANK_NAME",
        }
    }
}

/// Handlers keyed by tag.
pub struct AbilityRegistry {
    active: BTreeMap<AbilityTag, Box<dyn AbilityHandler>>,
    passive: BTreeMap<AbilityTag, Box<dyn PassiveAbility>>,
}

impl AbilityRegistry {
    /// Registry preloaded with the built-in handlers.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry
            .active
            .insert(AbilityTag::Teleport, Box::new(Teleport));
        registry.active.insert(AbilityTag::Pull, Box::new(Pull));
        registry.active.insert(AbilityTag::Sweep, Box::new(Sweep));
        registry
            .active
            .insert(AbilityTag::SelfDestruct, Box::new(SelfDestruct));
        registry
            .active
            .insert(AbilityTag::CopyAttack, Box::new(CopyAttack));
        registry
            .passive
            .insert(AbilityTag::JumpDraw, Box::new(JumpDraw));
        registry
    }

    pub fn empty() -> Self {
        Self {
            active: BTreeMap::new(),
            passive: BTreeMap::new(),
        }
    }

    /// Adds or replaces an active handler.
    pub fn register(
        &mut self,
        tag: AbilityTag,
        handler: Box<dyn AbilityHandler>,
    ) -> Result<(), AbilityRegistrationError> {
        check_tag(&tag)?;
        if tag.kind() == TagKind::Passive {
            return Err(AbilityRegistrationError::ExpectedPassive(tag));
        }
        self.active.insert(tag, handler);
        Ok(())
    }

    /// Adds or replaces a passive handler.
    pub fn register_passive(
        &mut self,
        tag: AbilityTag,
        handler: Box<dyn PassiveAbility>,
    ) -> Result<(), AbilityRegistrationError> {
        check_tag(&tag)?;
        if tag.kind() == TagKind::Active && !tag.is_custom() {
            return Err(AbilityRegistrationError::ExpectedActive(tag));
        }
        self.passive.insert(tag, handler);
        Ok(())
    }

    pub fn handler(&self, tag: &AbilityTag) -> Option<&dyn AbilityHandler> {
        self.active.get(tag).map(|handler| &**handler)
    }

    pub fn passive(&self, tag: &AbilityTag) -> Option<&dyn PassiveAbility> {
        self.passive.get(tag).map(|handler| &**handler)
    }

    pub fn tags(&self) -> impl Iterator<Item = &AbilityTag> {
        self.active.keys().chain(self.passive.keys())
    }

    /// True when the ability is known, affordable with `mana`, and has a target.
    pub fn can_use(
        &self,
        ctx: &AbilityContext<'_>,
        tag: &AbilityTag,
        state: &MatchState,
        mana: u32,
    ) -> bool {
        let Some(handler) = self.handler(tag) else {
            return false;
        };
        let cost = ctx
            .caster(state)
            .and_then(|caster| ctx.definition_of(caster))
            .map(|definition| crate::unit::ability_cost(definition, handler.cost()))
            .unwrap_or(handler.cost());
        mana >= cost && !handler.targets(ctx, state).is_empty()
    }
}

impl Default for AbilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AbilityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbilityRegistry")
            .field("active", &self.active.keys().collect::<Vec<_>>())
            .field("passive", &self.passive.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn check_tag(tag: &AbilityTag) -> Result<(), AbilityRegistrationError> {
    match tag {
        AbilityTag::Custom(name) if name.trim().is_empty() => Err(AbilityRegistrationError::BlankName),
        _ if tag.kind() == TagKind::Lifecycle => {
            Err(AbilityRegistrationError::LifecycleTag(tag.clone()))
        }
        _ => Ok(()),
    }
}
