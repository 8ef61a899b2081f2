//! Property-based tests for board geometry and the board dump.

mod common;

use proptest::prelude::*;

use chegg_core::{BoardDump, GameConfig, ManaLedger, Position, Side};
use common::Fixture;

const ROSTER: [&str; 17] = [
    "zombie",
    "creeper",
    "pig",
    "rabbit",
    "pufferfish",
    "iron_golem",
    "frog",
    "skeleton",
    "blaze",
    "phantom",
    "enderman",
    "slime",
    "shulker_box",
    "parrot",
    "cat",
    "sniffer",
    "wither",
];

fn placement() -> impl Strategy<Value = (usize, bool, i32, i32)> {
    (
        0..ROSTER.len(),
        any::<bool>(),
        0..GameConfig::ROWS,
        0..GameConfig::COLS,
    )
}

/// Playing-phase fixture with the generated units placed on free tiles.
fn populated(placements: &[(usize, bool, i32, i32)]) -> Fixture {
    let mut fixture = Fixture::playing();
    for &(index, blue, row, col) in placements {
        if fixture.state.unit_at(Position::new(row, col)).is_some() {
            continue;
        }
        let side = if blue { Side::Blue } else { Side::Red };
        fixture.place(ROSTER[index], side, row, col);
    }
    fixture
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Movement never lands on an occupied or off-board tile.
    #[test]
    fn prop_moves_target_empty_tiles(placements in prop::collection::vec(placement(), 0..24)) {
        let mut fixture = populated(&placements);
        let ids: Vec<_> = fixture.state.units().map(|unit| unit.id).collect();
        let engine = fixture.engine();

        for id in ids {
            for to in engine.valid_moves(id) {
                prop_assert!((0..GameConfig::ROWS).contains(&to.row));
                prop_assert!((0..GameConfig::COLS).contains(&to.col));
                prop_assert!(engine.state().unit_at(to).is_none(), "{id} may move onto {to}");
            }
        }
    }

    /// Attack targets are always enemy-occupied.
    #[test]
    fn prop_attacks_target_enemies(placements in prop::collection::vec(placement(), 0..24)) {
        let mut fixture = populated(&placements);
        let ids: Vec<_> = fixture.state.units().map(|unit| (unit.id, unit.owner)).collect();
        let engine = fixture.engine();

        for (id, owner) in ids {
            for target in engine.valid_attacks(id) {
                let victim = engine.state().unit_at(target);
                prop_assert!(victim.is_some_and(|victim| victim.owner != owner));
            }
        }
    }

    /// Parsing a rendered dump recovers exactly the rendered layout.
    #[test]
    fn prop_dump_parse_recovers_layout(placements in prop::collection::vec(placement(), 0..40)) {
        let fixture = populated(&placements);
        let text = BoardDump::render(&fixture.state, &fixture.units);

        let parsed = BoardDump::parse(&text).expect("rendered dump parses");
        prop_assert_eq!(parsed, BoardDump::layout(&fixture.state, &fixture.units));
        prop_assert_eq!(text.lines().count(), 11);
    }

    /// Spending never drives the pool negative and a refused spend changes nothing.
    #[test]
    fn prop_mana_spend_is_bounded(
        max_mana in 0u32..=6,
        bonus in 0u32..4,
        spends in prop::collection::vec(0u32..5, 0..12),
    ) {
        let mut ledger = ManaLedger { mana: 0, max_mana, bonus };
        ledger.refresh(6);
        for amount in spends {
            let before = ledger;
            if ledger.spend(amount) {
                prop_assert_eq!(ledger.mana, before.mana - amount);
            } else {
                prop_assert_eq!(ledger, before);
            }
            prop_assert!(ledger.mana <= ledger.cap());
        }
    }
}
