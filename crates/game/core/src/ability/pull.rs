use super::{AbilityContext, AbilityHandler, AbilityTarget};
use crate::geometry::{self, LineHit, Pattern};
use crate::state::{MatchEvent, MatchState, Position};

const SCAN_RANGE: u32 = 10;

/// Drag any unit on a lateral line towards the caster.
pub struct Pull;

impl Pull {
    fn hits(ctx: &AbilityContext<'_>, state: &MatchState) -> Vec<LineHit> {
        let Some(caster) = ctx.caster(state) else {
            return Vec::new();
        };
        geometry::line_positions(state, caster.position, Pattern::Lateral, caster.owner, SCAN_RANGE)
    }
}

impl AbilityHandler for Pull {
    fn targets(&self, ctx: &AbilityContext<'_>, state: &MatchState) -> Vec<AbilityTarget> {
        Self::hits(ctx, state)
            .into_iter()
            .map(|hit| AbilityTarget::Tile(hit.position))
            .collect()
    }

    fn apply(&self, ctx: &AbilityContext<'_>, target: &AbilityTarget, state: &mut MatchState) -> bool {
        let AbilityTarget::Tile(position) = *target else {
            return false;
        };
        let Some(hit) = Self::hits(ctx, state)
            .into_iter()
            .find(|hit| hit.position == position)
        else {
            return false;
        };
        let Some(victim) = state.board.occupant(position) else {
            return false;
        };

        let destination: Position =
            geometry::pull_destination(state, position, hit.direction, ctx.config.pull_distance);
        if destination == position {
            return false;
        }

        let from = state.relocate_unit(victim, destination);
        state.record(MatchEvent::UnitRelocated {
            id: victim,
            from,
            to: destination,
        });
        true
    }
}
