use super::{UnitDefinition, UnitFlags};
use crate::config::GameConfig;
use crate::geometry::{self, AttackOptions, BoardView, MoveOptions, Position};
use crate::state::UnitState;

/// Union of the tiles reachable through every movement spec, first-seen order.
pub fn valid_moves<V: BoardView + ?Sized>(
    view: &V,
    definition: &UnitDefinition,
    unit: &UnitState,
) -> Vec<Position> {
    if definition.flags.contains(UnitFlags::CANNOT_MOVE) {
        return Vec::new();
    }

    let options = MoveOptions {
        can_jump: definition.flags.contains(UnitFlags::CAN_JUMP),
        only_dark_tiles: definition.flags.contains(UnitFlags::DARK_TILES_ONLY),
        ..MoveOptions::default()
    };

    let mut moves: Vec<Position> = Vec::new();
    for spec in &definition.movement {
        for position in geometry::valid_moves(
            view,
            unit.position,
            spec.pattern,
            unit.owner,
            spec.range,
            options,
        ) {
            if !moves.contains(&position) {
                moves.push(position);
            }
        }
    }
    moves
}

/// Enemy tiles the unit could attack right now.
pub fn valid_attacks<V: BoardView + ?Sized>(
    view: &V,
    definition: &UnitDefinition,
    unit: &UnitState,
) -> Vec<Position> {
    if definition.flags.contains(UnitFlags::CANNOT_ATTACK) {
        return Vec::new();
    }
    let Some(attack) = &definition.attack else {
        return Vec::new();
    };

    let options = AttackOptions {
        only_dark_tiles: definition.flags.contains(UnitFlags::DARK_TILES_ONLY),
        ..AttackOptions::default()
    };
    geometry::valid_attacks(
        view,
        unit.position,
        attack.pattern,
        unit.owner,
        attack.range,
        options,
    )
    .into_positions()
}

/// Every in-bounds tile the unit's attack pattern covers, for range previews.
pub fn attack_preview(definition: &UnitDefinition, unit: &UnitState) -> Vec<Position> {
    match &definition.attack {
        Some(attack) if !definition.flags.contains(UnitFlags::CANNOT_ATTACK) => {
            geometry::area_positions(unit.position, attack.pattern, unit.owner, attack.range)
        }
        _ => Vec::new(),
    }
}

/// Mana price of the unit's next move this turn.
///
/// The king pays on every move; other units move once for free and pay to
/// dash.
pub fn move_cost(definition: &UnitDefinition, unit: &UnitState, config: &GameConfig) -> u32 {
    if definition.is_king() {
        config.king_move_cost
    } else if unit.has_moved() {
        config.dash_cost
    } else {
        0
    }
}

pub fn attack_cost(definition: &UnitDefinition, config: &GameConfig) -> u32 {
    definition.attack_cost.unwrap_or(config.attack_cost)
}

/// Ability price: the definition's override, else the handler's own price.
pub fn ability_cost(definition: &UnitDefinition, handler_cost: u32) -> u32 {
    definition.ability_cost.unwrap_or(handler_cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{InstanceId, MatchState, Side};
    use crate::unit::{UnitId, UnitRegistry};

    fn spawn(state: &mut MatchState, registry: &UnitRegistry, id: &str, side: Side, row: i32, col: i32) -> InstanceId {
        let instance = state.allocate_instance_id();
        let unit = registry
            .instantiate(&UnitId::from(id), side, instance)
            .expect("built-in unit");
        state.spawn_unit(unit, Position::new(row, col))
    }

    fn moves_of(state: &MatchState, registry: &UnitRegistry, id: InstanceId) -> Vec<Position> {
        let unit = state.unit(id).expect("unit exists");
        let definition = registry.get(&unit.definition).expect("definition exists");
        valid_moves(state, definition, unit)
    }

    #[test]
    fn frog_moves_are_union_of_specs_without_duplicates() {
        let registry = UnitRegistry::new();
        let mut state = MatchState::new(0);
        let frog = spawn(&mut state, &registry, "frog", Side::Blue, 4, 4);

        let moves = moves_of(&state, &registry, frog);
        assert_eq!(moves.len(), 12);
    }

    #[test]
    fn zombie_moves_forward_per_owner() {
        let registry = UnitRegistry::new();
        let mut state = MatchState::new(0);
        let blue = spawn(&mut state, &registry, "zombie", Side::Blue, 4, 4);
        let red = spawn(&mut state, &registry, "zombie", Side::Red, 6, 4);

        assert!(moves_of(&state, &registry, blue).iter().all(|p| p.row == 5));
        assert!(moves_of(&state, &registry, red).iter().all(|p| p.row == 5));
    }

    #[test]
    fn stationary_units_have_no_moves() {
        let registry = UnitRegistry::new();
        let mut state = MatchState::new(0);
        let cat = spawn(&mut state, &registry, "cat", Side::Blue, 1, 1);
        assert!(moves_of(&state, &registry, cat).is_empty());
    }

    #[test]
    fn peaceful_units_have_no_attacks_even_next_to_enemies() {
        let registry = UnitRegistry::new();
        let mut state = MatchState::new(0);
        let pig = spawn(&mut state, &registry, "pig", Side::Blue, 4, 4);
        spawn(&mut state, &registry, "zombie", Side::Red, 4, 5);

        let unit = state.unit(pig).expect("pig");
        let definition = registry.get("pig").expect("pig definition");
        assert!(valid_attacks(&state, definition, unit).is_empty());
        assert!(attack_preview(definition, unit).is_empty());
    }

    #[test]
    fn king_pays_for_every_move_others_only_for_dash() {
        let registry = UnitRegistry::new();
        let config = GameConfig::default();
        let mut state = MatchState::new(0);
        let king = spawn(&mut state, &registry, "villager", Side::Blue, 0, 0);
        let zombie = spawn(&mut state, &registry, "zombie", Side::Blue, 1, 1);

        let king_def = registry.get("villager").expect("king");
        let zombie_def = registry.get("zombie").expect("zombie");
        let king_unit = state.unit(king).expect("king unit").clone();
        let mut zombie_unit = state.unit(zombie).expect("zombie unit").clone();

        assert_eq!(move_cost(king_def, &king_unit, &config), 1);
        assert_eq!(move_cost(zombie_def, &zombie_unit, &config), 0);
        zombie_unit.flags |= crate::state::TurnFlags::MOVED;
        assert_eq!(move_cost(zombie_def, &zombie_unit, &config), 1);
    }

    #[test]
    fn attack_cost_defaults_and_overrides() {
        let registry = UnitRegistry::new();
        let config = GameConfig::default();
        assert_eq!(attack_cost(registry.get("skeleton").expect("skeleton"), &config), 1);
        assert_eq!(attack_cost(registry.get("wither").expect("wither"), &config), 2);
        assert_eq!(ability_cost(registry.get("parrot").expect("parrot"), 0), 0);
        assert_eq!(ability_cost(registry.get("frog").expect("frog"), 0), 1);
    }
}
