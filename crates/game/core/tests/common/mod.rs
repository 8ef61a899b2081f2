#![allow(dead_code)]

use chegg_core::{
    AbilityRegistry, GameEngine, GameEnv, InstanceId, ManaLedger, MatchState, Phase, Position,
    Side, UnitId, UnitRegistry,
};

/// A match already in the playing phase with both kings on the board.
pub struct Fixture {
    pub units: UnitRegistry,
    pub abilities: AbilityRegistry,
    pub state: MatchState,
    pub blue_king: InstanceId,
    pub red_king: InstanceId,
}

impl Fixture {
    pub fn playing() -> Self {
        Self::with_kings((0, 3), (9, 4))
    }

    pub fn with_kings(blue: (i32, i32), red: (i32, i32)) -> Self {
        let mut fixture = Self {
            units: UnitRegistry::new(),
            abilities: AbilityRegistry::new(),
            state: MatchState::new(1),
            blue_king: InstanceId::default(),
            red_king: InstanceId::default(),
        };
        fixture.blue_king = fixture.place("villager", Side::Blue, blue.0, blue.1);
        fixture.red_king = fixture.place("villager", Side::Red, red.0, red.1);

        fixture.state.turn.number = 2;
        fixture.state.turn.current = Side::Blue;
        fixture.state.turn.phase = Phase::Playing;
        for side in Side::ALL {
            fixture.set_mana(side, 6);
        }
        fixture.state.drain_events();
        fixture
    }

    /// Puts a unit on the board, ready to act this turn.
    pub fn place(&mut self, id: &str, side: Side, row: i32, col: i32) -> InstanceId {
        let instance = self.state.allocate_instance_id();
        let unit = self
            .units
            .instantiate(&UnitId::from(id), side, instance)
            .expect("known unit");
        let id = self.state.spawn_unit(unit, Position::new(row, col));
        self.state.unit_mut(id).expect("spawned").reset_turn_flags();
        self.state.drain_events();
        id
    }

    pub fn set_mana(&mut self, side: Side, mana: u32) {
        let bonus = self.state.player(side).mana.bonus;
        self.state.player_mut(side).mana = ManaLedger {
            mana,
            max_mana: mana.min(6),
            bonus,
        };
    }

    pub fn set_deck(&mut self, side: Side, cards: &[&str]) {
        self.state.player_mut(side).deck = cards.iter().map(|c| UnitId::from(*c)).collect();
    }

    pub fn set_hand(&mut self, side: Side, cards: &[&str]) {
        self.state.player_mut(side).hand = cards.iter().map(|c| UnitId::from(*c)).collect();
    }

    pub fn engine(&mut self) -> GameEngine<'_> {
        GameEngine::new(&mut self.state, GameEnv::new(&self.units, &self.abilities))
    }

    pub fn position_of(&self, id: InstanceId) -> Option<Position> {
        self.state.unit(id).map(|unit| unit.position)
    }
}
