//! Turn controller and command execution pipeline.
//!
//! [`GameEngine`] is the only writer of [`MatchState`] outside tests. Every
//! command runs the same two stages: a read-only `pre_validate` that either
//! refuses the command or produces a plan, then `apply`, which cannot fail.
//! A refused command therefore leaves the match untouched. After `apply` the
//! engine checks the state invariants, bumps the nonce and hands the
//! journaled [`MatchEvent`]s to the caller.

mod actions;
mod command;
mod errors;
mod turns;

pub use command::Command;
pub use errors::{CommandError, CommandKind, ErrorCategory, TargetIssue};

use crate::ability::{AbilityContext, AbilityRegistry, AbilityTag, AbilityTarget};
use crate::config::GameConfig;
use crate::error::ErrorContext;
use crate::state::{InstanceId, MatchEvent, MatchState, Position, Side, UnitState};
use crate::unit::{self, UnitDefinition, UnitRegistry};

/// Read-only rule tables the engine consults.
#[derive(Clone, Copy, Debug)]
pub struct GameEnv<'a> {
    pub units: &'a UnitRegistry,
    pub abilities: &'a AbilityRegistry,
}

impl<'a> GameEnv<'a> {
    pub fn new(units: &'a UnitRegistry, abilities: &'a AbilityRegistry) -> Self {
        Self { units, abilities }
    }

    pub fn config(&self) -> &'a GameConfig {
        self.units.config()
    }

    pub fn definition(&self, unit: &UnitState) -> Option<&'a UnitDefinition> {
        self.units.get(&unit.definition)
    }

    pub fn ability_context(&self, caster: InstanceId) -> AbilityContext<'a> {
        AbilityContext::new(caster, self.units, self.config())
    }
}

/// Outcome of an accepted command.
pub type CommandResult = Result<Vec<MatchEvent>, CommandError>;

pub struct GameEngine<'a> {
    state: &'a mut MatchState,
    env: GameEnv<'a>,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut MatchState, env: GameEnv<'a>) -> Self {
        Self { state, env }
    }

    pub fn state(&self) -> &MatchState {
        self.state
    }

    pub fn env(&self) -> GameEnv<'a> {
        self.env
    }

    /// Dispatches a queued command to the matching operation.
    pub fn execute(&mut self, command: &Command) -> CommandResult {
        match command {
            Command::Spawn { card, position } => self.spawn(card, *position),
            Command::Move { unit, to } => self.move_unit(*unit, *to),
            Command::Attack { unit, target } => self.attack(*unit, *target),
            Command::UseAbility {
                unit,
                ability,
                target,
            } => self.use_ability(*unit, ability, *target),
            Command::EndTurn => self.end_turn(),
        }
    }

    // ===== queries =====

    /// Tiles the unit's movement specs reach right now, ignoring turn flags.
    pub fn valid_moves(&self, id: InstanceId) -> Vec<Position> {
        self.with_unit(id, |state, definition, instance| {
            unit::valid_moves(state, definition, instance)
        })
    }

    /// Enemy tiles the unit's attack spec reaches right now, ignoring turn flags.
    pub fn valid_attacks(&self, id: InstanceId) -> Vec<Position> {
        self.with_unit(id, |state, definition, instance| {
            unit::valid_attacks(state, definition, instance)
        })
    }

    pub fn attack_preview(&self, id: InstanceId) -> Vec<Position> {
        self.with_unit(id, |_, definition, instance| {
            unit::attack_preview(definition, instance)
        })
    }

    /// Targets the ability would accept for this unit, empty when unknown.
    pub fn ability_targets(&self, id: InstanceId, tag: &AbilityTag) -> Vec<AbilityTarget> {
        let Some(handler) = self.env.abilities.handler(tag) else {
            return Vec::new();
        };
        let ctx = self.env.ability_context(id);
        handler.targets(&ctx, self.state)
    }

    /// Whether the unit owns the ability, can afford it and has a target.
    pub fn can_use_ability(&self, id: InstanceId, tag: &AbilityTag) -> bool {
        let Some(unit) = self.state.unit(id) else {
            return false;
        };
        if !self
            .env
            .definition(unit)
            .is_some_and(|definition| definition.has_ability(tag))
        {
            return false;
        }
        let mana = self.state.player(unit.owner).mana.mana;
        self.env
            .abilities
            .can_use(&self.env.ability_context(id), tag, self.state, mana)
    }

    /// Units `side` currently has on the board, in instance order.
    pub fn units_of(&self, side: Side) -> Vec<&UnitState> {
        self.state.units_of(side).collect()
    }

    fn with_unit<F>(&self, id: InstanceId, query: F) -> Vec<Position>
    where
        F: FnOnce(&MatchState, &UnitDefinition, &UnitState) -> Vec<Position>,
    {
        let Some(unit) = self.state.unit(id) else {
            return Vec::new();
        };
        match self.env.definition(unit) {
            Some(definition) => query(self.state, definition, unit),
            None => Vec::new(),
        }
    }

    // ===== pipeline helpers =====

    fn context(&self) -> ErrorContext {
        ErrorContext::new(self.state.turn.nonce)
    }

    /// Seals an applied command: invariants, nonce, event batch.
    fn finish(&mut self) -> Vec<MatchEvent> {
        self.state.assert_invariants();
        self.state.turn.nonce += 1;
        self.state.drain_events()
    }
}
