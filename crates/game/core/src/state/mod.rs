//! Authoritative match state.
//!
//! This module owns the board, both players, the unit arena and the turn
//! bookkeeping. Runtime layers clone or query this state but mutate it
//! exclusively through the engine and ability handlers. Occupancy and king
//! invariants are enforced with assertions: a violation is a bug, never a
//! recoverable condition.
mod dump;
mod event;
pub mod types;

use std::collections::BTreeMap;

pub use dump::{BoardDump, DumpCell, DumpParseError};
pub use event::MatchEvent;
pub use types::{
    Board, Direction, InstanceId, Phase, PlayerState, Position, Side, Tile, TurnFlags, TurnState,
    UnitState, Zone, in_bounds, is_dark,
};

use crate::geometry::BoardView;
use crate::unit::LifecycleHook;

/// Canonical snapshot of a match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchState {
    /// Seed used for deck shuffling. Set once when the match is created.
    pub seed: u64,

    /// Sequential instance id allocator (monotonically increasing, never reused).
    next_instance_id: u32,

    pub turn: TurnState,
    pub board: Board,
    players: [PlayerState; 2],
    units: BTreeMap<InstanceId, UnitState>,

    /// Events produced by the command currently executing.
    #[cfg_attr(feature = "serde", serde(skip))]
    journal: Vec<MatchEvent>,
}

impl MatchState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            next_instance_id: 1,
            turn: TurnState::new(),
            board: Board::new(),
            players: [PlayerState::new(Side::Blue), PlayerState::new(Side::Red)],
            units: BTreeMap::new(),
            journal: Vec::new(),
        }
    }

    // ===== queries =====

    pub fn phase(&self) -> Phase {
        self.turn.phase
    }

    pub fn current_side(&self) -> Side {
        self.turn.current
    }

    pub fn winner(&self) -> Option<Side> {
        self.turn.winner
    }

    pub fn player(&self, side: Side) -> &PlayerState {
        &self.players[side.index()]
    }

    pub fn player_mut(&mut self, side: Side) -> &mut PlayerState {
        &mut self.players[side.index()]
    }

    pub fn unit(&self, id: InstanceId) -> Option<&UnitState> {
        self.units.get(&id)
    }

    pub fn unit_mut(&mut self, id: InstanceId) -> Option<&mut UnitState> {
        self.units.get_mut(&id)
    }

    pub fn unit_at(&self, position: Position) -> Option<&UnitState> {
        self.board
            .occupant(position)
            .and_then(|id| self.units.get(&id))
    }

    pub fn units(&self) -> impl Iterator<Item = &UnitState> {
        self.units.values()
    }

    /// Units owned by `side`, in instance id order.
    pub fn units_of(&self, side: Side) -> impl Iterator<Item = &UnitState> {
        self.units.values().filter(move |unit| unit.owner == side)
    }

    pub fn king_of(&self, side: Side) -> Option<&UnitState> {
        self.player(side).king.and_then(|id| self.units.get(&id))
    }

    // ===== arena =====

    /// Allocates the next unit instance id.
    ///
    /// # Panics
    ///
    /// Panics if the id space is exhausted.
    pub fn allocate_instance_id(&mut self) -> InstanceId {
        let id = InstanceId(self.next_instance_id);
        self.next_instance_id = self
            .next_instance_id
            .checked_add(1)
            .expect("InstanceId overflow");
        id
    }

    /// Id the next call to [`Self::allocate_instance_id`] will hand out.
    pub fn peek_instance_id(&self) -> InstanceId {
        InstanceId(self.next_instance_id)
    }

    /// Puts a freshly instantiated unit on an empty tile and runs its spawn hooks.
    pub fn spawn_unit(&mut self, mut unit: UnitState, position: Position) -> InstanceId {
        let id = unit.id;
        let owner = unit.owner;
        assert!(
            !self.units.contains_key(&id),
            "instance id {id} is already in use"
        );
        if unit.king {
            assert!(
                self.player(owner).king.is_none(),
                "{owner} already has a king on the board"
            );
            self.player_mut(owner).king = Some(id);
        }

        unit.position = position;
        self.board.place(position, id);
        let hooks = unit.hooks.on_spawn.clone();
        self.record(MatchEvent::UnitSpawned {
            id,
            definition: unit.definition.clone(),
            owner,
            position,
        });
        self.units.insert(id, unit);
        self.run_hooks(owner, &hooks);
        id
    }

    /// Moves a unit to an empty tile without any rule checks.
    pub fn relocate_unit(&mut self, id: InstanceId, to: Position) -> Position {
        let unit = self
            .units
            .get_mut(&id)
            .unwrap_or_else(|| panic!("relocating unknown unit {id}"));
        let from = unit.position;
        unit.position = to;
        self.board.relocate(from, to, id);
        from
    }

    /// Exchanges the board cells and position fields of two units.
    pub fn swap_units(&mut self, a: InstanceId, b: InstanceId) {
        let (Some(first), Some(second)) = (self.units.get(&a), self.units.get(&b)) else {
            panic!("swapping unknown units {a} and {b}");
        };
        let (pos_a, pos_b) = (first.position, second.position);

        self.board.swap(pos_a, pos_b);
        if let Some(unit) = self.units.get_mut(&a) {
            unit.position = pos_b;
        }
        if let Some(unit) = self.units.get_mut(&b) {
            unit.position = pos_a;
        }
        self.record(MatchEvent::UnitRelocated {
            id: a,
            from: pos_a,
            to: pos_b,
        });
        self.record(MatchEvent::UnitRelocated {
            id: b,
            from: pos_b,
            to: pos_a,
        });
    }

    /// Removes a unit, runs its death hooks and resolves king loss.
    ///
    /// Losing a king ends the match immediately with the other side as
    /// winner. A match that is already over keeps its first winner.
    pub fn destroy_unit(&mut self, id: InstanceId) -> Option<UnitState> {
        let unit = self.units.remove(&id)?;
        self.board.clear(unit.position, id);
        self.record(MatchEvent::UnitDestroyed {
            id,
            definition: unit.definition.clone(),
            owner: unit.owner,
            position: unit.position,
        });

        let hooks = unit.hooks.on_death.clone();
        self.run_hooks(unit.owner, &hooks);

        if unit.king {
            self.player_mut(unit.owner).king = None;
            self.declare_winner(unit.owner.opponent());
        }
        Some(unit)
    }

    pub fn declare_winner(&mut self, winner: Side) {
        if self.turn.is_over() {
            return;
        }
        self.turn.phase = Phase::GameOver;
        self.turn.winner = Some(winner);
        self.record(MatchEvent::GameOver { winner });
    }

    /// Clears the per-turn flags of every unit `side` owns.
    pub fn reset_turn_flags(&mut self, side: Side) {
        for unit in self.units.values_mut().filter(|unit| unit.owner == side) {
            unit.reset_turn_flags();
        }
    }

    // ===== cards =====

    pub fn draw_cards(&mut self, side: Side, count: usize) -> usize {
        let drawn = self.player_mut(side).draw(count);
        if drawn > 0 {
            self.record(MatchEvent::CardsDrawn { side, count: drawn });
        }
        drawn
    }

    /// Takes cards from the end of the opponent's deck into `side`'s hand.
    pub fn draw_from_opponent(&mut self, side: Side, count: usize) -> usize {
        let from = side.opponent();
        let mut taken = 0;
        while taken < count {
            let Some(card) = self.player_mut(from).deck.pop() else {
                break;
            };
            self.player_mut(side).hand.push(card);
            taken += 1;
        }
        if taken > 0 {
            self.record(MatchEvent::CardsTaken {
                side,
                from,
                count: taken,
            });
        }
        taken
    }

    pub fn discard_cards(&mut self, side: Side, count: usize) -> usize {
        let cards = self.player_mut(side).discard(count);
        let discarded = cards.len();
        if discarded > 0 {
            self.record(MatchEvent::CardsDiscarded { side, cards });
        }
        discarded
    }

    // ===== hooks =====

    fn run_hooks(&mut self, owner: Side, hooks: &[LifecycleHook]) {
        for hook in hooks {
            match *hook {
                LifecycleHook::DrawCards(count) => {
                    self.draw_cards(owner, count);
                }
                LifecycleHook::DrawFromOpponent(count) => {
                    self.draw_from_opponent(owner, count);
                }
                LifecycleHook::DiscardCards(count) => {
                    self.discard_cards(owner, count);
                }
                LifecycleHook::AddBonusMana(amount) => {
                    let ledger = &mut self.player_mut(owner).mana;
                    ledger.add_bonus(amount);
                    let bonus = ledger.bonus;
                    self.record(MatchEvent::BonusManaChanged { side: owner, bonus });
                }
                LifecycleHook::RemoveBonusMana(amount) => {
                    let ledger = &mut self.player_mut(owner).mana;
                    ledger.remove_bonus(amount);
                    let bonus = ledger.bonus;
                    self.record(MatchEvent::BonusManaChanged { side: owner, bonus });
                }
                LifecycleHook::Explode => {}
            }
        }
    }

    // ===== journal =====

    pub fn record(&mut self, event: MatchEvent) {
        self.journal.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.journal)
    }

    // ===== invariants =====

    /// Panics when occupancy or king bookkeeping is inconsistent.
    pub fn assert_invariants(&self) {
        let occupied = self.board.tiles().filter(|tile| tile.is_occupied()).count();
        assert_eq!(
            occupied,
            self.units.len(),
            "board holds {occupied} occupants but the arena has {} units",
            self.units.len()
        );

        for unit in self.units.values() {
            assert_eq!(
                self.board.occupant(unit.position),
                Some(unit.id),
                "unit {} is not on its recorded tile {}",
                unit.id,
                unit.position
            );
        }

        for side in Side::ALL {
            let kings = self.units_of(side).filter(|unit| unit.king).count();
            assert!(kings <= 1, "{side} has {kings} kings on the board");
            assert_eq!(
                self.player(side).king,
                self.units_of(side).find(|unit| unit.king).map(|unit| unit.id),
                "{side} king reference is stale"
            );
            if self.turn.phase == Phase::Playing {
                assert!(
                    self.player(side).king.is_some(),
                    "{side} lost its king without the match ending"
                );
            }
        }
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl BoardView for MatchState {
    fn occupant_owner(&self, position: Position) -> Option<Side> {
        self.unit_at(position).map(|unit| unit.owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::{LifecycleHooks, UnitId};

    fn unit(state: &mut MatchState, owner: Side, king: bool, hooks: LifecycleHooks) -> UnitState {
        let id = state.allocate_instance_id();
        UnitState::new(id, owner, UnitId::from("zombie"), king, hooks)
    }

    #[test]
    fn instance_ids_are_never_reused() {
        let mut state = MatchState::new(7);
        let first = unit(&mut state, Side::Blue, false, LifecycleHooks::default());
        let first_id = state.spawn_unit(first, Position::new(0, 0));
        state.destroy_unit(first_id);

        let second = state.allocate_instance_id();
        assert!(second > first_id);
    }

    #[test]
    fn king_death_ends_match_with_opponent_as_winner() {
        let mut state = MatchState::new(0);
        let king = unit(&mut state, Side::Red, true, LifecycleHooks::default());
        let king_id = state.spawn_unit(king, Position::new(9, 3));

        state.destroy_unit(king_id);

        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(state.winner(), Some(Side::Blue));
        assert!(state.player(Side::Red).king.is_none());
    }

    #[test]
    fn second_king_death_keeps_first_winner() {
        let mut state = MatchState::new(0);
        let blue = unit(&mut state, Side::Blue, true, LifecycleHooks::default());
        let blue = state.spawn_unit(blue, Position::new(4, 4));
        let red = unit(&mut state, Side::Red, true, LifecycleHooks::default());
        let red = state.spawn_unit(red, Position::new(4, 5));

        state.destroy_unit(red);
        state.destroy_unit(blue);
        assert_eq!(state.winner(), Some(Side::Blue));
    }

    #[test]
    fn death_hooks_run_in_order() {
        let mut state = MatchState::new(0);
        state.player_mut(Side::Blue).deck = vec![UnitId::from("pig"), UnitId::from("cat")];
        state.player_mut(Side::Blue).hand = vec![UnitId::from("zombie")];
        let hooks = LifecycleHooks {
            on_spawn: Vec::new(),
            on_death: vec![LifecycleHook::DrawCards(1), LifecycleHook::DiscardCards(2)],
        };
        let doomed = unit(&mut state, Side::Blue, false, hooks);
        let doomed = state.spawn_unit(doomed, Position::new(5, 5));

        state.destroy_unit(doomed);

        assert!(state.player(Side::Blue).hand.is_empty());
        assert_eq!(state.player(Side::Blue).deck, vec![UnitId::from("pig")]);
    }

    #[test]
    fn spawn_hook_takes_from_opponent_deck() {
        let mut state = MatchState::new(0);
        state.player_mut(Side::Red).deck =
            vec![UnitId::from("pig"), UnitId::from("cat"), UnitId::from("slime")];
        let hooks = LifecycleHooks {
            on_spawn: vec![LifecycleHook::DrawFromOpponent(2)],
            on_death: Vec::new(),
        };
        let sniffer = unit(&mut state, Side::Blue, false, hooks);
        state.spawn_unit(sniffer, Position::new(1, 1));

        assert_eq!(
            state.player(Side::Blue).hand,
            vec![UnitId::from("slime"), UnitId::from("cat")]
        );
        assert_eq!(state.player(Side::Red).deck.len(), 1);
    }

    #[test]
    #[should_panic(expected = "already has a king")]
    fn second_king_for_same_side_panics() {
        let mut state = MatchState::new(0);
        let first = unit(&mut state, Side::Blue, true, LifecycleHooks::default());
        state.spawn_unit(first, Position::new(0, 0));
        let second = unit(&mut state, Side::Blue, true, LifecycleHooks::default());
        state.spawn_unit(second, Position::new(0, 1));
    }

    #[test]
    #[should_panic(expected = "without the match ending")]
    fn vanished_king_during_play_is_detected() {
        let mut state = MatchState::new(0);
        state.turn.phase = Phase::Playing;
        state.assert_invariants();
    }
}
