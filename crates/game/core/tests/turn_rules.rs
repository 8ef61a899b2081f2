mod common;

use chegg_core::{
    AbilityTag, AbilityTarget, CommandError, CommandKind, ErrorCategory, ErrorSeverity, GameError,
    MatchEvent, Phase, Position, Side, TargetIssue, UnitId,
};
use common::Fixture;

#[test]
fn freshly_spawned_unit_cannot_act_until_its_owner_next_turn() {
    let mut fixture = Fixture::playing();
    fixture.set_hand(Side::Blue, &["zombie"]);

    let events = fixture
        .engine()
        .spawn(&UnitId::from("zombie"), Position::new(1, 2))
        .expect("spawn zone, affordable");
    let Some(MatchEvent::UnitSpawned { id, .. }) = events
        .iter()
        .find(|event| matches!(event, MatchEvent::UnitSpawned { .. }))
        .cloned()
    else {
        panic!("spawn event missing");
    };
    assert_eq!(fixture.state.player(Side::Blue).mana.mana, 5);
    assert!(fixture.state.player(Side::Blue).hand.is_empty());

    let refused = fixture.engine().move_unit(id, Position::new(2, 2));
    assert!(matches!(refused, Err(CommandError::UnitAlreadyActed { .. })));

    fixture.engine().end_turn().expect("blue done");
    fixture.engine().end_turn().expect("red done");
    fixture
        .engine()
        .move_unit(id, Position::new(2, 2))
        .expect("flag cleared at blue turn start");
}

#[test]
fn spawn_outside_zone_or_on_occupied_tile_is_refused() {
    let mut fixture = Fixture::playing();
    fixture.set_hand(Side::Blue, &["zombie"]);
    let card = UnitId::from("zombie");

    assert!(matches!(
        fixture.engine().spawn(&card, Position::new(4, 4)),
        Err(CommandError::InvalidTarget {
            issue: TargetIssue::OutsideSpawnZone,
            ..
        })
    ));
    assert!(matches!(
        fixture.engine().spawn(&card, Position::new(0, 3)),
        Err(CommandError::InvalidTarget {
            issue: TargetIssue::Occupied,
            ..
        })
    ));
    assert!(matches!(
        fixture.engine().spawn(&card, Position::new(10, 0)),
        Err(CommandError::OutOfBounds { .. })
    ));
    assert!(matches!(
        fixture.engine().spawn(&UnitId::from("wither"), Position::new(0, 0)),
        Err(CommandError::InvalidTarget {
            issue: TargetIssue::CardNotInHand(_),
            ..
        })
    ));
}

#[test]
fn spawn_costs_the_card_price() {
    let mut fixture = Fixture::playing();
    fixture.set_hand(Side::Blue, &["wither"]);
    fixture.set_mana(Side::Blue, 5);

    let refused = fixture
        .engine()
        .spawn(&UnitId::from("wither"), Position::new(0, 0));
    assert!(matches!(
        refused,
        Err(CommandError::InsufficientMana {
            required: 6,
            available: 5,
            ..
        })
    ));
    assert_eq!(fixture.state.player(Side::Blue).hand.len(), 1);
}

#[test]
fn second_move_is_a_paid_dash_and_a_third_is_refused() {
    let mut fixture = Fixture::playing();
    let blaze = fixture.place("blaze", Side::Blue, 4, 3);

    let events = fixture
        .engine()
        .move_unit(blaze, Position::new(5, 4))
        .expect("first move");
    assert!(events.contains(&MatchEvent::UnitMoved {
        id: blaze,
        from: Position::new(4, 3),
        to: Position::new(5, 4),
        dash: false,
    }));
    assert_eq!(fixture.state.player(Side::Blue).mana.mana, 6);

    fixture
        .engine()
        .move_unit(blaze, Position::new(6, 5))
        .expect("dash");
    assert_eq!(fixture.state.player(Side::Blue).mana.mana, 5);

    assert!(matches!(
        fixture.engine().move_unit(blaze, Position::new(5, 6)),
        Err(CommandError::UnitAlreadyActed { .. })
    ));
}

#[test]
fn dash_blocks_attack_and_attack_blocks_move() {
    let mut fixture = Fixture::playing();
    let zombie = fixture.place("zombie", Side::Blue, 3, 3);
    fixture.place("zombie", Side::Red, 5, 4);

    fixture.engine().move_unit(zombie, Position::new(4, 3)).expect("move");
    fixture.engine().move_unit(zombie, Position::new(5, 3)).expect("dash");
    assert!(matches!(
        fixture.engine().attack(zombie, Position::new(5, 4)),
        Err(CommandError::UnitAlreadyActed { .. })
    ));

    let mut fixture = Fixture::playing();
    let zombie = fixture.place("zombie", Side::Blue, 5, 3);
    fixture.place("zombie", Side::Red, 5, 4);
    fixture.engine().attack(zombie, Position::new(5, 4)).expect("attack");
    assert!(matches!(
        fixture.engine().move_unit(zombie, Position::new(6, 3)),
        Err(CommandError::UnitAlreadyActed { .. })
    ));
}

#[test]
fn attack_after_a_single_move_is_allowed() {
    let mut fixture = Fixture::playing();
    let zombie = fixture.place("zombie", Side::Blue, 4, 3);
    let enemy = fixture.place("zombie", Side::Red, 5, 4);

    fixture.engine().move_unit(zombie, Position::new(5, 3)).expect("move");
    fixture.engine().attack(zombie, Position::new(5, 4)).expect("attack");
    assert!(fixture.state.unit(enemy).is_none());
}

#[test]
fn attack_and_ability_are_mutually_exclusive() {
    let mut fixture = Fixture::playing();
    let enderman = fixture.place("enderman", Side::Blue, 3, 3);
    fixture.place("zombie", Side::Red, 4, 3);
    fixture.place("pig", Side::Blue, 3, 6);

    fixture
        .engine()
        .attack(enderman, Position::new(4, 3))
        .expect("adjacent enemy");
    assert!(matches!(
        fixture.engine().use_ability(
            enderman,
            &AbilityTag::Teleport,
            AbilityTarget::Tile(Position::new(3, 6)),
        ),
        Err(CommandError::UnitAlreadyActed { .. })
    ));
}

#[test]
fn king_pays_for_each_move() {
    let mut fixture = Fixture::playing();
    let king = fixture.blue_king;

    fixture.engine().move_unit(king, Position::new(1, 3)).expect("move");
    assert_eq!(fixture.state.player(Side::Blue).mana.mana, 5);
    fixture.engine().move_unit(king, Position::new(2, 3)).expect("dash");
    assert_eq!(fixture.state.player(Side::Blue).mana.mana, 4);
}

#[test]
fn opponent_units_cannot_be_commanded() {
    let mut fixture = Fixture::playing();
    let red = fixture.place("zombie", Side::Red, 6, 3);

    let err = fixture
        .engine()
        .move_unit(red, Position::new(5, 3))
        .expect_err("red unit on blue turn");
    assert!(matches!(
        err,
        CommandError::NotYourTurn {
            owner: Side::Red,
            current: Side::Blue,
            ..
        }
    ));
    assert_eq!(err.category(), ErrorCategory::IllegalAction);
    assert_eq!(err.severity(), ErrorSeverity::Recoverable);
    assert_eq!(err.error_code(), "COMMAND_NOT_YOUR_TURN");
}

#[test]
fn wither_attack_costs_two() {
    let mut fixture = Fixture::playing();
    let wither = fixture.place("wither", Side::Blue, 5, 3);
    fixture.place("zombie", Side::Red, 5, 5);
    fixture.set_mana(Side::Blue, 1);

    let err = fixture
        .engine()
        .attack(wither, Position::new(5, 5))
        .expect_err("one mana short");
    assert_eq!(err.category(), ErrorCategory::InsufficientResource);

    fixture.set_mana(Side::Blue, 2);
    fixture.engine().attack(wither, Position::new(5, 5)).expect("affordable");
    assert_eq!(fixture.state.player(Side::Blue).mana.mana, 0);
}

#[test]
fn refused_commands_leave_the_match_untouched() {
    let mut fixture = Fixture::playing();
    let zombie = fixture.place("zombie", Side::Blue, 4, 3);
    let before = fixture.state.clone();

    let err = fixture
        .engine()
        .move_unit(zombie, Position::new(7, 3))
        .expect_err("out of reach");
    assert_eq!(err.severity(), ErrorSeverity::Validation);
    assert_eq!(err.context().map(|ctx| ctx.nonce), Some(before.turn.nonce));
    assert!(fixture.engine().move_unit(zombie, Position::new(-1, 3)).is_err());
    assert_eq!(fixture.state, before);
}

#[test]
fn units_cannot_act_during_setup() {
    let mut fixture = Fixture::playing();
    let zombie = fixture.place("zombie", Side::Blue, 1, 1);
    fixture.state.turn.phase = Phase::Setup;

    assert!(matches!(
        fixture.engine().move_unit(zombie, Position::new(2, 1)),
        Err(CommandError::IllegalPhase {
            command: CommandKind::Move,
            phase: Phase::Setup,
            ..
        })
    ));
}

#[test]
fn cat_bonus_feeds_next_refresh_and_is_revoked_on_death() {
    let mut fixture = Fixture::playing();
    let cat = fixture.place("cat", Side::Blue, 1, 1);
    assert_eq!(fixture.state.player(Side::Blue).mana.bonus, 1);

    fixture.engine().end_turn().expect("blue done");
    fixture.engine().end_turn().expect("red done");
    assert_eq!(fixture.state.player(Side::Blue).mana.mana, 7);

    fixture.state.destroy_unit(cat);
    let ledger = fixture.state.player(Side::Blue).mana;
    assert_eq!(ledger.bonus, 0);
    assert_eq!(ledger.mana, 6);
}

#[test]
fn full_match_from_deal_to_king_kill() {
    use chegg_core::{AbilityRegistry, GameEngine, GameEnv, MatchState, UnitRegistry};

    let units = UnitRegistry::new();
    let abilities = AbilityRegistry::new();
    let mut state = MatchState::new(2024);
    let mut engine = GameEngine::new(&mut state, GameEnv::new(&units, &abilities));
    let deck: Vec<UnitId> = ["zombie"; 15].into_iter().map(UnitId::from).collect();

    engine.start_match(deck.clone(), deck).expect("start");
    engine
        .spawn(&UnitId::from("villager"), Position::new(1, 3))
        .expect("blue king");
    engine.end_turn().expect("blue setup");
    engine
        .spawn(&UnitId::from("villager"), Position::new(8, 3))
        .expect("red king");
    engine.end_turn().expect("red setup");

    let mut turns = 0;
    while engine.state().phase() == Phase::Playing && turns < 40 {
        let side = engine.state().current_side();
        let king = engine.state().king_of(side).map(|unit| unit.id).expect("king alive");
        let enemy_king = engine
            .state()
            .king_of(side.opponent())
            .map(|unit| unit.position)
            .expect("enemy king alive");

        if engine.valid_attacks(king).contains(&enemy_king) {
            engine.attack(king, enemy_king).expect("king strike");
            break;
        }
        if let Some(step) = engine
            .valid_moves(king)
            .into_iter()
            .min_by_key(|p| (p.row - enemy_king.row).abs() + (p.col - enemy_king.col).abs())
        {
            let _ = engine.move_unit(king, step);
        }
        engine.end_turn().expect("turn passes");
        turns += 1;
    }

    assert_eq!(state.phase(), Phase::GameOver);
    assert!(state.winner().is_some());
}
