//! Unit commands: spawn, move, attack and ability use.
//!
//! Each command is split into a read-only `pre_validate_*` that returns a
//! plan and an infallible `apply_*` that executes it.

use super::{CommandError, CommandKind, CommandResult, GameEngine, TargetIssue};
use crate::ability::{self, AbilityHandler, AbilityTag, AbilityTarget};
use crate::error::ErrorContext;
use crate::geometry::Direction;
use crate::state::{
    InstanceId, MatchEvent, MatchState, Phase, Position, Side, TurnFlags, UnitState, Zone,
    in_bounds,
};
use crate::unit::{self, UnitDefinition, UnitFlags, UnitId};

struct SpawnPlan {
    side: Side,
    hand_index: usize,
    cost: u32,
    unit: UnitState,
    position: Position,
}

struct MovePlan<'d> {
    id: InstanceId,
    side: Side,
    definition: &'d UnitDefinition,
    to: Position,
    cost: u32,
    dash: bool,
}

enum Strike {
    Single { victim: InstanceId, advance: bool },
    Area(Vec<InstanceId>),
    SelfDestruct,
}

struct AttackPlan {
    id: InstanceId,
    side: Side,
    target: Position,
    cost: u32,
    strike: Strike,
}

struct AbilityPlan<'h> {
    id: InstanceId,
    side: Side,
    tag: AbilityTag,
    handler: &'h dyn AbilityHandler,
    cost: u32,
}

impl<'a> GameEngine<'a> {
    /// Places a card from the current player's hand on an empty spawn-zone tile.
    pub fn spawn(&mut self, card: &UnitId, position: Position) -> CommandResult {
        let plan = self.pre_validate_spawn(card, position)?;
        self.apply_spawn(plan);
        Ok(self.finish())
    }

    /// Moves a unit; a second move in the same turn is a dash.
    pub fn move_unit(&mut self, id: InstanceId, to: Position) -> CommandResult {
        let plan = self.pre_validate_move(id, to)?;
        self.apply_move(plan);
        Ok(self.finish())
    }

    pub fn attack(&mut self, id: InstanceId, target: Position) -> CommandResult {
        let plan = self.pre_validate_attack(id, target)?;
        self.apply_attack(plan);
        Ok(self.finish())
    }

    pub fn use_ability(
        &mut self,
        id: InstanceId,
        tag: &AbilityTag,
        target: AbilityTarget,
    ) -> CommandResult {
        let plan = self.pre_validate_ability(id, tag, target)?;
        let ctx = self.env.ability_context(plan.id);
        if !plan.handler.apply(&ctx, &target, self.state) {
            return Err(CommandError::invalid_target(
                TargetIssue::NoEffect,
                self.context().with_unit(id),
            ));
        }
        self.apply_ability(plan);
        Ok(self.finish())
    }

    // ===== spawn =====

    fn pre_validate_spawn(&self, card: &UnitId, position: Position) -> Result<SpawnPlan, CommandError> {
        let ctx = self.context().with_position(position);
        let side = self.state.current_side();
        if self.state.phase() == Phase::GameOver {
            return Err(CommandError::illegal_phase(CommandKind::Spawn, Phase::GameOver, ctx));
        }
        if !in_bounds(position) {
            return Err(CommandError::out_of_bounds(position, ctx));
        }

        let player = self.state.player(side);
        let Some(hand_index) = player.hand_position(card) else {
            return Err(CommandError::invalid_target(
                TargetIssue::CardNotInHand(card.to_string()),
                ctx,
            ));
        };
        let Some(unit) = self
            .env
            .units
            .instantiate(card, side, self.state.peek_instance_id())
        else {
            return Err(CommandError::invalid_target(
                TargetIssue::UnknownDefinition(card.to_string()),
                ctx,
            ));
        };
        if Zone::for_row(position.row) != Zone::Spawn(side) {
            return Err(CommandError::invalid_target(TargetIssue::OutsideSpawnZone, ctx));
        }
        if self.state.board.occupant(position).is_some() {
            return Err(CommandError::invalid_target(TargetIssue::Occupied, ctx));
        }
        if unit.king && player.king.is_some() {
            return Err(CommandError::invalid_target(TargetIssue::KingAlreadyPlaced, ctx));
        }

        let cost = self
            .env
            .units
            .get(card)
            .map_or(0, |definition| definition.cost);
        check_mana(self.state, side, cost, &ctx)?;

        Ok(SpawnPlan {
            side,
            hand_index,
            cost,
            unit,
            position,
        })
    }

    fn apply_spawn(&mut self, plan: SpawnPlan) {
        charge(self.state, plan.side, plan.cost);
        self.state.player_mut(plan.side).hand.remove(plan.hand_index);
        let id = self.state.allocate_instance_id();
        debug_assert_eq!(id, plan.unit.id);
        self.state.spawn_unit(plan.unit, plan.position);
    }

    // ===== move =====

    fn pre_validate_move(&self, id: InstanceId, to: Position) -> Result<MovePlan<'a>, CommandError> {
        let (unit, definition, ctx) = self.acting_unit(id, CommandKind::Move)?;
        let ctx = ctx.with_position(to);
        if !in_bounds(to) {
            return Err(CommandError::out_of_bounds(to, ctx));
        }
        if unit.just_spawned() || unit.has_attacked() || unit.has_dashed() {
            return Err(CommandError::already_acted(id, ctx));
        }
        if !unit::valid_moves(self.state, definition, unit).contains(&to) {
            return Err(CommandError::invalid_target(TargetIssue::Unreachable, ctx));
        }

        let cost = unit::move_cost(definition, unit, self.env.config());
        check_mana(self.state, unit.owner, cost, &ctx)?;

        Ok(MovePlan {
            id,
            side: unit.owner,
            definition,
            to,
            cost,
            dash: unit.has_moved(),
        })
    }

    fn apply_move(&mut self, plan: MovePlan<'a>) {
        charge(self.state, plan.side, plan.cost);
        let from = self.state.relocate_unit(plan.id, plan.to);
        if let Some(unit) = self.state.unit_mut(plan.id) {
            unit.flags.insert(if plan.dash {
                TurnFlags::MOVED | TurnFlags::DASHED
            } else {
                TurnFlags::MOVED
            });
        }
        self.state.record(MatchEvent::UnitMoved {
            id: plan.id,
            from,
            to: plan.to,
            dash: plan.dash,
        });

        let ctx = self.env.ability_context(plan.id);
        for tag in &plan.definition.abilities {
            let Some(passive) = self.env.abilities.passive(tag) else {
                continue;
            };
            if passive.check_trigger(&ctx, from, plan.to, self.state) {
                passive.on_trigger(&ctx, self.state);
            }
        }
    }

    // ===== attack =====

    fn pre_validate_attack(&self, id: InstanceId, target: Position) -> Result<AttackPlan, CommandError> {
        let (unit, definition, ctx) = self.acting_unit(id, CommandKind::Attack)?;
        let ctx = ctx.with_position(target);
        if !in_bounds(target) {
            return Err(CommandError::out_of_bounds(target, ctx));
        }
        if unit.just_spawned() || unit.has_acted() || unit.has_dashed() {
            return Err(CommandError::already_acted(id, ctx));
        }

        let targets = unit::valid_attacks(self.state, definition, unit);
        let (Some(spec), true) = (definition.attack, targets.contains(&target)) else {
            return Err(CommandError::invalid_target(TargetIssue::NotAttackable, ctx));
        };
        let cost = unit::attack_cost(definition, self.env.config());
        check_mana(self.state, unit.owner, cost, &ctx)?;

        let occupant = |position: Position| self.state.board.occupant(position);
        let strike = if spec.self_destruct {
            Strike::SelfDestruct
        } else if spec.aoe {
            Strike::Area(targets.iter().filter_map(|&p| occupant(p)).collect())
        } else if spec.sweep {
            Strike::Area(sweep_victims(self.state, unit, target))
        } else {
            let Some(victim) = occupant(target) else {
                return Err(CommandError::invalid_target(TargetIssue::NotAttackable, ctx));
            };
            Strike::Single {
                victim,
                advance: definition.flags.contains(UnitFlags::MOVES_TO_ATTACK),
            }
        };

        Ok(AttackPlan {
            id,
            side: unit.owner,
            target,
            cost,
            strike,
        })
    }

    fn apply_attack(&mut self, plan: AttackPlan) {
        charge(self.state, plan.side, plan.cost);
        if let Some(unit) = self.state.unit_mut(plan.id) {
            unit.flags.insert(TurnFlags::ATTACKED);
        }
        self.state.record(MatchEvent::UnitAttacked {
            attacker: plan.id,
            target: plan.target,
        });

        match plan.strike {
            Strike::SelfDestruct => {
                ability::detonate(self.state, plan.id);
            }
            Strike::Area(victims) => {
                for victim in victims {
                    self.state.destroy_unit(victim);
                }
            }
            Strike::Single { victim, advance } => {
                self.state.destroy_unit(victim);
                if advance && self.state.board.occupant(plan.target).is_none() {
                    let from = self.state.relocate_unit(plan.id, plan.target);
                    self.state.record(MatchEvent::UnitRelocated {
                        id: plan.id,
                        from,
                        to: plan.target,
                    });
                }
            }
        }
    }

    // ===== ability =====

    fn pre_validate_ability(
        &self,
        id: InstanceId,
        tag: &AbilityTag,
        target: AbilityTarget,
    ) -> Result<AbilityPlan<'a>, CommandError> {
        let (unit, definition, ctx) = self.acting_unit(id, CommandKind::Ability)?;
        if let AbilityTarget::Tile(position) = target {
            if !in_bounds(position) {
                return Err(CommandError::out_of_bounds(position, ctx.with_position(position)));
            }
        }
        if unit.just_spawned() || unit.has_acted() {
            return Err(CommandError::already_acted(id, ctx));
        }

        let unavailable = || {
            CommandError::invalid_target(TargetIssue::AbilityUnavailable(tag.to_string()), ctx.clone())
        };
        if !definition.has_ability(tag) {
            return Err(unavailable());
        }
        let Some(handler) = self.env.abilities.handler(tag) else {
            return Err(unavailable());
        };

        let cost = unit::ability_cost(definition, handler.cost());
        check_mana(self.state, unit.owner, cost, &ctx)?;

        let offered = handler.targets(&self.env.ability_context(id), self.state);
        if !offered.contains(&target) {
            return Err(CommandError::invalid_target(TargetIssue::NotOffered, ctx));
        }

        Ok(AbilityPlan {
            id,
            side: unit.owner,
            tag: tag.clone(),
            handler,
            cost,
        })
    }

    /// Bookkeeping after the handler succeeded.
    fn apply_ability(&mut self, plan: AbilityPlan<'_>) {
        charge(self.state, plan.side, plan.cost);
        if let Some(unit) = self.state.unit_mut(plan.id) {
            unit.flags.insert(TurnFlags::USED_ABILITY);
        }
        self.state.record(MatchEvent::AbilityUsed {
            id: plan.id,
            tag: plan.tag,
        });
    }

    // ===== shared checks =====

    /// Resolves a unit the current player wants to command during play.
    fn acting_unit(
        &self,
        id: InstanceId,
        command: CommandKind,
    ) -> Result<(&UnitState, &'a UnitDefinition, ErrorContext), CommandError> {
        let ctx = self.context().with_unit(id);
        let phase = self.state.phase();
        if phase != Phase::Playing {
            return Err(CommandError::illegal_phase(command, phase, ctx));
        }
        let Some(unit) = self.state.unit(id) else {
            return Err(CommandError::invalid_target(TargetIssue::UnknownUnit, ctx));
        };
        let current = self.state.current_side();
        if unit.owner != current {
            return Err(CommandError::not_your_turn(unit.owner, current, ctx));
        }
        let Some(definition) = self.env.definition(unit) else {
            return Err(CommandError::invalid_target(
                TargetIssue::UnknownDefinition(unit.definition.to_string()),
                ctx,
            ));
        };
        Ok((unit, definition, ctx))
    }
}

fn check_mana(state: &MatchState, side: Side, cost: u32, ctx: &ErrorContext) -> Result<(), CommandError> {
    let ledger = &state.player(side).mana;
    if ledger.can_afford(cost) {
        Ok(())
    } else {
        Err(CommandError::insufficient_mana(cost, ledger.mana, ctx.clone()))
    }
}

/// Deducts an already validated cost and journals it.
fn charge(state: &mut MatchState, side: Side, amount: u32) {
    if amount == 0 {
        return;
    }
    let ledger = &mut state.player_mut(side).mana;
    let paid = ledger.spend(amount);
    debug_assert!(paid, "cost was validated before apply");
    let remaining = ledger.mana;
    state.record(MatchEvent::ManaSpent {
        side,
        amount,
        remaining,
    });
}

/// Enemies inside the first lateral sweep "T" that covers `target`.
fn sweep_victims(state: &MatchState, attacker: &UnitState, target: Position) -> Vec<InstanceId> {
    [Direction::UP, Direction::DOWN, Direction::LEFT, Direction::RIGHT]
        .into_iter()
        .map(|direction| ability::sweep_tiles(attacker.position, direction))
        .find(|tiles| tiles.contains(&target))
        .map(|tiles| {
            tiles
                .iter()
                .filter_map(|&position| state.unit_at(position))
                .filter(|unit| unit.owner != attacker.owner)
                .map(|unit| unit.id)
                .collect()
        })
        .unwrap_or_default()
}
