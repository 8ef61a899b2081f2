use super::{AbilityContext, AbilityHandler, AbilityTarget};
use crate::geometry::{self, AttackOptions, Direction, Position};
use crate::state::MatchState;
use crate::unit::{AttackSpec, UnitFlags};

const NEIGHBOURS: [Direction; 4] = [Direction::UP, Direction::DOWN, Direction::LEFT, Direction::RIGHT];

/// Borrows the attack pattern of any laterally adjacent unit for one strike.
///
/// Only pattern and range are borrowed: the strike always hits the single
/// chosen tile, whatever area or sweep rule the neighbour resolves with.
///
/// Nothing is written back to the caster; the borrowed pattern is recomputed
/// from the current neighbours every time targets are requested.
pub struct CopyAttack;

impl CopyAttack {
    fn borrowed(ctx: &AbilityContext<'_>, state: &MatchState) -> Vec<AttackSpec> {
        let Some(caster) = ctx.caster(state) else {
            return Vec::new();
        };
        NEIGHBOURS
            .into_iter()
            .filter_map(|direction| state.unit_at(caster.position.step(direction, 1)))
            .filter_map(|neighbour| ctx.definition_of(neighbour))
            .filter(|definition| !definition.flags.contains(UnitFlags::CANNOT_ATTACK))
            .filter_map(|definition| definition.attack)
            .collect()
    }

    fn reachable(ctx: &AbilityContext<'_>, state: &MatchState) -> Vec<Position> {
        let Some(caster) = ctx.caster(state) else {
            return Vec::new();
        };
        let mut tiles: Vec<Position> = Vec::new();
        for spec in Self::borrowed(ctx, state) {
            let hits = geometry::valid_attacks(
                state,
                caster.position,
                spec.pattern,
                caster.owner,
                spec.range,
                AttackOptions::default(),
            );
            for position in hits.into_positions() {
                if !tiles.contains(&position) {
                    tiles.push(position);
                }
            }
        }
        tiles
    }
}

impl AbilityHandler for CopyAttack {
    fn cost(&self) -> u32 {
        0
    }

    fn targets(&self, ctx: &AbilityContext<'_>, state: &MatchState) -> Vec<AbilityTarget> {
        Self::reachable(ctx, state)
            .into_iter()
            .map(AbilityTarget::Tile)
            .collect()
    }

    fn apply(&self, ctx: &AbilityContext<'_>, target: &AbilityTarget, state: &mut MatchState) -> bool {
        let AbilityTarget::Tile(position) = *target else {
            return false;
        };
        if !Self::reachable(ctx, state).contains(&position) {
            return false;
        }
        let Some(victim) = state.board.occupant(position) else {
            return false;
        };
        state.destroy_unit(victim).is_some()
    }
}
