use super::{AbilityContext, PassiveAbility};
use crate::geometry::{BoardView, Direction, Position};
use crate::state::MatchState;

/// Draws a card whenever the owner's move passes over an occupied tile.
pub struct JumpDraw;

impl PassiveAbility for JumpDraw {
    fn check_trigger(
        &self,
        _ctx: &AbilityContext<'_>,
        from: Position,
        to: Position,
        state: &MatchState,
    ) -> bool {
        let (d_row, d_col) = (to.row - from.row, to.col - from.col);
        let straight = d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs();
        if !straight {
            return false;
        }

        let direction = Direction::between(from, to);
        let steps = d_row.abs().max(d_col.abs());
        (1..steps).any(|distance| state.is_occupied(from.step(direction, distance)))
    }

    fn on_trigger(&self, ctx: &AbilityContext<'_>, state: &mut MatchState) {
        let Some(owner) = ctx.caster(state).map(|unit| unit.owner) else {
            return;
        };
        state.draw_cards(owner, ctx.config.jump_draw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::testing::spawn;
    use crate::config::GameConfig;
    use crate::state::Side;
    use crate::unit::{UnitId, UnitRegistry};

    #[test]
    fn hop_over_occupied_tile_triggers() {
        let registry = UnitRegistry::new();
        let config = GameConfig::default();
        let mut state = MatchState::new(0);
        let rabbit = spawn(&mut state, &registry, "rabbit", Side::Blue, 4, 0);
        spawn(&mut state, &registry, "zombie", Side::Red, 4, 1);
        let ctx = AbilityContext::new(rabbit, &registry, &config);

        assert!(JumpDraw.check_trigger(&ctx, Position::new(4, 2), Position::new(4, 0), &state));
    }

    #[test]
    fn every_intermediate_tile_is_checked() {
        let registry = UnitRegistry::new();
        let config = GameConfig::default();
        let mut state = MatchState::new(0);
        let slime = spawn(&mut state, &registry, "slime", Side::Blue, 0, 0);
        spawn(&mut state, &registry, "zombie", Side::Red, 2, 0);
        let ctx = AbilityContext::new(slime, &registry, &config);

        assert!(JumpDraw.check_trigger(&ctx, Position::new(3, 0), Position::new(0, 0), &state));
        assert!(!JumpDraw.check_trigger(&ctx, Position::new(1, 1), Position::new(0, 0), &state));
    }

    #[test]
    fn knight_shaped_moves_never_trigger() {
        let registry = UnitRegistry::new();
        let config = GameConfig::default();
        let mut state = MatchState::new(0);
        let rabbit = spawn(&mut state, &registry, "rabbit", Side::Blue, 5, 5);
        spawn(&mut state, &registry, "zombie", Side::Red, 4, 5);
        let ctx = AbilityContext::new(rabbit, &registry, &config);

        assert!(!JumpDraw.check_trigger(&ctx, Position::new(3, 4), Position::new(5, 5), &state));
    }

    #[test]
    fn trigger_draws_exactly_one_card_for_owner() {
        let registry = UnitRegistry::new();
        let config = GameConfig::default();
        let mut state = MatchState::new(0);
        state.player_mut(Side::Blue).deck = vec![UnitId::from("pig"), UnitId::from("cat")];
        state.player_mut(Side::Red).deck = vec![UnitId::from("pig")];
        let rabbit = spawn(&mut state, &registry, "rabbit", Side::Blue, 4, 0);
        let ctx = AbilityContext::new(rabbit, &registry, &config);

        JumpDraw.on_trigger(&ctx, &mut state);
        assert_eq!(state.player(Side::Blue).hand, vec![UnitId::from("cat")]);
        assert_eq!(state.player(Side::Red).hand.len(), 0);
    }
}
