use super::{AbilityContext, AbilityHandler, AbilityTarget};
use crate::geometry::{self, Pattern};
use crate::state::{InstanceId, MatchState};

/// Destroys every unit on the eight surrounding tiles, either owner, then the
/// caster itself. The caster dies even when the blast catches nothing.
///
/// Returns the number of units destroyed, caster included.
pub fn detonate(state: &mut MatchState, caster: InstanceId) -> usize {
    let Some(unit) = state.unit(caster) else {
        return 0;
    };
    let victims: Vec<InstanceId> =
        geometry::area_positions(unit.position, Pattern::Surrounding, unit.owner, 1)
            .into_iter()
            .filter_map(|position| state.board.occupant(position))
            .collect();

    let mut destroyed = 0;
    for victim in victims {
        if state.destroy_unit(victim).is_some() {
            destroyed += 1;
        }
    }
    if state.destroy_unit(caster).is_some() {
        destroyed += 1;
    }
    destroyed
}

pub struct SelfDestruct;

impl AbilityHandler for SelfDestruct {
    fn targets(&self, ctx: &AbilityContext<'_>, state: &MatchState) -> Vec<AbilityTarget> {
        if ctx.caster(state).is_some() {
            vec![AbilityTarget::Confirm]
        } else {
            Vec::new()
        }
    }

    fn apply(&self, ctx: &AbilityContext<'_>, target: &AbilityTarget, state: &mut MatchState) -> bool {
        if *target != AbilityTarget::Confirm {
            return false;
        }
        detonate(state, ctx.caster) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::testing::spawn;
    use crate::config::GameConfig;
    use crate::state::{Phase, Side};
    use crate::unit::UnitRegistry;

    #[test]
    fn empty_blast_still_removes_caster() {
        let registry = UnitRegistry::new();
        let config = GameConfig::default();
        let mut state = MatchState::new(0);
        let creeper = spawn(&mut state, &registry, "creeper", Side::Blue, 4, 4);
        let ctx = AbilityContext::new(creeper, &registry, &config);

        assert_eq!(SelfDestruct.targets(&ctx, &state), vec![AbilityTarget::Confirm]);
        assert!(SelfDestruct.apply(&ctx, &AbilityTarget::Confirm, &mut state));
        assert!(state.unit(creeper).is_none());
        assert!(state.board.occupant(crate::state::Position::new(4, 4)).is_none());
    }

    #[test]
    fn blast_hits_both_owners_but_not_beyond_one_tile() {
        let registry = UnitRegistry::new();
        let mut state = MatchState::new(0);
        let creeper = spawn(&mut state, &registry, "creeper", Side::Blue, 4, 4);
        let ally = spawn(&mut state, &registry, "zombie", Side::Blue, 3, 3);
        let enemy = spawn(&mut state, &registry, "zombie", Side::Red, 5, 5);
        let far = spawn(&mut state, &registry, "zombie", Side::Red, 6, 4);

        assert_eq!(detonate(&mut state, creeper), 3);
        assert!(state.unit(ally).is_none());
        assert!(state.unit(enemy).is_none());
        assert!(state.unit(far).is_some());
    }

    #[test]
    fn blast_that_kills_a_king_ends_the_match() {
        let registry = UnitRegistry::new();
        let mut state = MatchState::new(0);
        let creeper = spawn(&mut state, &registry, "creeper", Side::Blue, 4, 4);
        spawn(&mut state, &registry, "villager", Side::Red, 4, 5);

        detonate(&mut state, creeper);
        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(state.winner(), Some(Side::Blue));
    }
}
