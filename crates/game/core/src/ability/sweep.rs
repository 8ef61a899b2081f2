use arrayvec::ArrayVec;

use super::{AbilityContext, AbilityHandler, AbilityTarget};
use crate::geometry::{Direction, Position, in_bounds};
use crate::state::{InstanceId, MatchState, Side};

const LATERAL: [Direction; 4] = [Direction::UP, Direction::DOWN, Direction::LEFT, Direction::RIGHT];

/// The "T" struck by a sweep: the tile ahead and its two perpendicular
/// neighbours, clipped to the board. Empty when the tile ahead is off-board.
pub fn sweep_tiles(origin: Position, direction: Direction) -> ArrayVec<Position, 3> {
    let mut tiles = ArrayVec::new();
    let center = origin.step(direction, 1);
    if !in_bounds(center) {
        return tiles;
    }
    tiles.push(center);
    for side in direction.perpendicular() {
        let flank = center.step(side, 1);
        if in_bounds(flank) {
            tiles.push(flank);
        }
    }
    tiles
}

fn enemies_in(state: &MatchState, owner: Side, tiles: &[Position]) -> Vec<InstanceId> {
    tiles
        .iter()
        .filter_map(|&position| state.unit_at(position))
        .filter(|unit| unit.owner != owner)
        .map(|unit| unit.id)
        .collect()
}

/// Destroys every enemy in one lateral "T". Own units are spared.
pub struct Sweep;

impl AbilityHandler for Sweep {
    fn targets(&self, ctx: &AbilityContext<'_>, state: &MatchState) -> Vec<AbilityTarget> {
        let Some(caster) = ctx.caster(state) else {
            return Vec::new();
        };
        LATERAL
            .into_iter()
            .filter(|&direction| {
                !enemies_in(state, caster.owner, &sweep_tiles(caster.position, direction)).is_empty()
            })
            .map(AbilityTarget::Direction)
            .collect()
    }

    fn apply(&self, ctx: &AbilityContext<'_>, target: &AbilityTarget, state: &mut MatchState) -> bool {
        let AbilityTarget::Direction(direction) = *target else {
            return false;
        };
        let Some(caster) = ctx.caster(state) else {
            return false;
        };
        if !LATERAL.contains(&direction) {
            return false;
        }
        let victims = enemies_in(state, caster.owner, &sweep_tiles(caster.position, direction));
        if victims.is_empty() {
            return false;
        }
        for victim in victims {
            state.destroy_unit(victim);
        }
        true
    }
}
