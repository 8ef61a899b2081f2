//! Built-in unit roster.
use super::{AttackSpec, UnitDefinition, UnitFlags};
use crate::ability::AbilityTag;
use crate::geometry::Pattern;

/// Id of the built-in king-type unit.
pub const KING_ID: &str = "villager";

/// Every built-in definition, king first.
pub fn built_in() -> Vec<UnitDefinition> {
    vec![
        UnitDefinition::new(KING_ID, "Villager", 0)
            .with_movement(Pattern::Surrounding, 1)
            .with_attack(AttackSpec::new(Pattern::Surrounding, 1))
            .with_flags(UnitFlags::KING | UnitFlags::MOVES_TO_ATTACK)
            .with_description("Your king. If it dies, you lose. Costs 1 mana to move."),
        UnitDefinition::new("zombie", "Zombie", 1)
            .with_movement(Pattern::Forward, 1)
            .with_attack(AttackSpec::new(Pattern::Lateral, 1))
            .with_description("Basic unit. Moves forward, attacks laterally."),
        UnitDefinition::new("creeper", "Creeper", 1)
            .with_movement(Pattern::Surrounding, 1)
            .with_attack(AttackSpec {
                aoe: true,
                self_destruct: true,
                ..AttackSpec::new(Pattern::Surrounding, 1)
            })
            .with_description("Explodes, destroying all 8 surrounding tiles and itself."),
        UnitDefinition::new("pig", "Pig", 1)
            .with_movement(Pattern::Surrounding, 1)
            .with_flags(UnitFlags::CANNOT_ATTACK)
            .with_ability(AbilityTag::DrawOnSpawn)
            .with_ability(AbilityTag::DrawOnDeath)
            .with_description("Draw a card when spawned and when it dies."),
        UnitDefinition::new("rabbit", "Rabbit", 2)
            .with_movement(Pattern::Lateral, 2)
            .with_flags(UnitFlags::CAN_JUMP | UnitFlags::CANNOT_ATTACK)
            .with_ability(AbilityTag::JumpDraw)
            .with_description("Jumps 2 tiles. Draw a card if jumping over any unit."),
        UnitDefinition::new("pufferfish", "Puffer-Fish", 2)
            .with_movement(Pattern::Lateral, 1)
            .with_attack(AttackSpec {
                aoe: true,
                ..AttackSpec::new(Pattern::Diagonal, 1)
            })
            .with_description("Attacks all 4 diagonal tiles simultaneously."),
        UnitDefinition::new("iron_golem", "Iron Golem", 2)
            .with_movement(Pattern::Surrounding, 1)
            .with_attack(AttackSpec {
                sweep: true,
                ..AttackSpec::new(Pattern::Surrounding, 1)
            })
            .with_description("Sweeping attack hits 3 tiles in a lateral direction."),
        UnitDefinition {
            ability_cost: Some(1),
            ..UnitDefinition::new("frog", "Frog", 2)
                .with_movement(Pattern::Lateral, 2)
                .with_movement(Pattern::Diagonal, 1)
                .with_flags(UnitFlags::CANNOT_ATTACK)
                .with_ability(AbilityTag::Pull)
                .with_description("Pull any unit in a lateral line 2 tiles closer (1 mana).")
        },
        UnitDefinition::new("skeleton", "Skeleton", 3)
            .with_movement(Pattern::Lateral, 1)
            .with_attack(AttackSpec::new(Pattern::Diagonal, 3))
            .with_description("Ranged attacker. Shoots diagonally up to 3 tiles."),
        UnitDefinition::new("blaze", "Blaze", 3)
            .with_movement(Pattern::Diagonal, 1)
            .with_attack(AttackSpec::new(Pattern::Lateral, 2))
            .with_description("Moves diagonally, attacks laterally up to 2 tiles."),
        UnitDefinition::new("phantom", "Phantom", 3)
            .with_movement(Pattern::Surrounding, 2)
            .with_attack(AttackSpec::new(Pattern::Surrounding, 2))
            .with_flags(UnitFlags::DARK_TILES_ONLY)
            .with_description("Highly mobile but can only stand on dark tiles."),
        UnitDefinition {
            ability_cost: Some(1),
            ..UnitDefinition::new("enderman", "Enderman", 4)
                .with_movement(Pattern::Stationary, 0)
                .with_attack(AttackSpec::new(Pattern::Surrounding, 1))
                .with_flags(UnitFlags::CANNOT_MOVE)
                .with_ability(AbilityTag::Teleport)
                .with_description("Cannot move. Teleport: swap with any unit in a lateral line (1 mana).")
        },
        UnitDefinition::new("slime", "Slime", 4)
            .with_movement(Pattern::Surrounding, 2)
            .with_attack(AttackSpec::new(Pattern::Surrounding, 2))
            .with_flags(UnitFlags::CAN_JUMP | UnitFlags::MOVES_TO_ATTACK)
            .with_description("Jumps up to 2 tiles. Attacks by moving onto enemies."),
        UnitDefinition::new("shulker_box", "Shulker Box", 4)
            .with_movement(Pattern::Stationary, 0)
            .with_attack(AttackSpec::new(Pattern::Surrounding, 4))
            .with_flags(UnitFlags::CANNOT_MOVE | UnitFlags::MOVES_TO_ATTACK)
            .with_description("Cannot move freely. Ranged attack, moves to the target tile."),
        UnitDefinition::new("parrot", "Parrot", 5)
            .with_movement(Pattern::Surrounding, 2)
            .with_ability(AbilityTag::CopyAttack)
            .with_description("Copies the attack pattern of a laterally adjacent unit."),
        UnitDefinition::new("cat", "Cat", 5)
            .with_movement(Pattern::Stationary, 0)
            .with_flags(UnitFlags::CANNOT_MOVE | UnitFlags::CANNOT_ATTACK)
            .with_ability(AbilityTag::ManaBonus)
            .with_description("Cannot move or attack. Grants +1 mana per turn (stacks)."),
        UnitDefinition::new("sniffer", "Sniffer", 5)
            .with_movement(Pattern::Surrounding, 1)
            .with_flags(UnitFlags::CANNOT_ATTACK)
            .with_ability(AbilityTag::DrawFromOpponent)
            .with_ability(AbilityTag::DiscardOnDeath)
            .with_description("Draw 2 from the enemy deck on spawn. Discard 2 on death."),
        UnitDefinition {
            attack_cost: Some(2),
            ..UnitDefinition::new("wither", "Wither", 6)
                .with_movement(Pattern::Surrounding, 1)
                .with_attack(AttackSpec {
                    splash: true,
                    ..AttackSpec::new(Pattern::Lateral, 3)
                })
                .with_ability(AbilityTag::ExplodeOnSpawn)
                .with_description("Attack costs 2 mana and splashes.")
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_has_eighteen_units_with_a_single_king() {
        let roster = built_in();
        assert_eq!(roster.len(), 18);
        let kings: Vec<_> = roster.iter().filter(|d| d.is_king()).collect();
        assert_eq!(kings.len(), 1);
        assert_eq!(kings[0].id.as_str(), KING_ID);
    }

    #[test]
    fn only_wither_overrides_attack_cost() {
        let overrides: Vec<_> = built_in()
            .into_iter()
            .filter(|d| d.attack_cost.is_some())
            .map(|d| d.id)
            .collect();
        assert_eq!(overrides, vec![crate::unit::UnitId::from("wither")]);
    }
}
