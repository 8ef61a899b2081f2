use super::{CommandError, CommandKind, CommandResult, GameEngine, TargetIssue};
use crate::rng::{self, PcgRng};
use crate::state::{MatchEvent, Phase, Side, TurnState};
use crate::unit::UnitId;

/// Match lifecycle: Setup -> Playing -> GameOver.
impl<'a> GameEngine<'a> {
    /// Shuffles both decks, deals the opening hands and opens Blue's setup turn.
    ///
    /// Each hand receives `initial_hand` cards from its shuffled deck plus the
    /// king card at the front. Only legal on a fresh match.
    pub fn start_match(&mut self, blue_deck: Vec<UnitId>, red_deck: Vec<UnitId>) -> CommandResult {
        if self.state.turn.nonce != 0 || self.state.units().next().is_some() {
            return Err(CommandError::illegal_phase(
                CommandKind::StartMatch,
                self.state.phase(),
                self.context(),
            ));
        }
        for card in blue_deck.iter().chain(&red_deck) {
            if !self.env.units.contains(card) {
                return Err(CommandError::invalid_target(
                    TargetIssue::UnknownDefinition(card.to_string()),
                    self.context(),
                ));
            }
        }

        let king = self.env.units.king_id();
        let opening = self.env.config().initial_hand;
        for (side, mut deck) in [(Side::Blue, blue_deck), (Side::Red, red_deck)] {
            let seed = rng::compute_seed(self.state.seed, side.index() as u32);
            rng::shuffle(&mut deck, &mut PcgRng::new(seed));

            let player = self.state.player_mut(side);
            player.deck = deck;
            player.hand.clear();
            self.state.draw_cards(side, opening);
            self.state.player_mut(side).hand.insert(0, king.clone());
        }

        self.state.turn = TurnState {
            nonce: self.state.turn.nonce,
            ..TurnState::new()
        };
        self.begin_turn();
        Ok(self.finish())
    }

    /// Hands the turn to the opponent.
    ///
    /// A no-op once the match is over. During setup the current player must
    /// have placed its king first.
    pub fn end_turn(&mut self) -> CommandResult {
        if self.state.turn.is_over() {
            return Ok(Vec::new());
        }
        let side = self.state.current_side();
        if self.state.phase() == Phase::Setup && self.state.player(side).king.is_none() {
            return Err(CommandError::illegal_phase(
                CommandKind::EndTurn,
                Phase::Setup,
                self.context(),
            ));
        }

        self.state.record(MatchEvent::TurnEnded {
            side,
            turn: self.state.turn.number,
        });
        self.state.turn.current = side.opponent();
        self.state.turn.number += 1;
        self.begin_turn();
        Ok(self.finish())
    }

    /// Opens the turn described by `state.turn.number` for `state.turn.current`.
    fn begin_turn(&mut self) {
        let config = self.env.config();
        let side = self.state.current_side();
        let number = self.state.turn.number;

        let phase = if TurnState::is_setup_turn(number) {
            self.state.player_mut(side).mana.reset_for_setup();
            Phase::Setup
        } else {
            self.state.player_mut(side).mana.refresh(config.mana_ceiling);
            Phase::Playing
        };
        self.state.turn.phase = phase;
        self.state.reset_turn_flags(side);
        self.state.record(MatchEvent::TurnStarted {
            side,
            turn: number,
            phase,
        });

        if phase == Phase::Playing {
            self.state.draw_cards(side, config.turn_draw);
        }
    }
}
