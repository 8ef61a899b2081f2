use super::{AbilityContext, AbilityHandler, AbilityTarget};
use crate::geometry::{self, Pattern, Position};
use crate::state::MatchState;

const SCAN_RANGE: u32 = 10;

/// Swap places with any non-king unit along a lateral line.
///
/// Intervening units do not block the scan; every occupant up to the board
/// edge is a candidate, friend or foe.
pub struct Teleport;

impl Teleport {
    fn candidates(ctx: &AbilityContext<'_>, state: &MatchState) -> Vec<Position> {
        let Some(caster) = ctx.caster(state) else {
            return Vec::new();
        };
        geometry::line_positions(state, caster.position, Pattern::Lateral, caster.owner, SCAN_RANGE)
            .into_iter()
            .map(|hit| hit.position)
            .filter(|&position| state.unit_at(position).is_some_and(|unit| !unit.king))
            .collect()
    }
}

impl AbilityHandler for Teleport {
    fn targets(&self, ctx: &AbilityContext<'_>, state: &MatchState) -> Vec<AbilityTarget> {
        Self::candidates(ctx, state)
            .into_iter()
            .map(AbilityTarget::Tile)
            .collect()
    }

    fn apply(&self, ctx: &AbilityContext<'_>, target: &AbilityTarget, state: &mut MatchState) -> bool {
        let AbilityTarget::Tile(position) = *target else {
            return false;
        };
        if !Self::candidates(ctx, state).contains(&position) {
            return false;
        }
        let Some(other) = state.board.occupant(position) else {
            return false;
        };
        state.swap_units(ctx.caster, other);
        true
    }
}
