//! Raw unit definitions as written in mod files.
//!
//! Every field is optional at parse time so that a malformed definition is
//! reported with all of its problems rather than the first serde error.

use std::str::FromStr;

use serde::Deserialize;

use chegg_core::{AbilityTag, AttackSpec, MovementSpec, Pattern, UnitDefinition, UnitFlags, UnitId};

/// A movement entry, or a list of them.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawMovement {
    One(RawReach),
    Many(Vec<RawReach>),
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawReach {
    pub pattern: String,
    pub range: Option<i64>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawAttack {
    pub pattern: String,
    pub range: Option<i64>,
    pub aoe: bool,
    pub sweep: bool,
    pub self_destruct: bool,
    pub splash: bool,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawUnitDefinition {
    pub id: Option<String>,
    pub name: Option<String>,
    pub cost: Option<i64>,
    pub description: Option<String>,
    pub movement: Option<RawMovement>,
    pub attack: Option<RawAttack>,
    pub attack_cost: Option<i64>,
    pub ability_cost: Option<i64>,
    pub abilities: Vec<String>,
    pub cannot_move: bool,
    pub cannot_attack: bool,
    pub can_jump: bool,
    pub dark_tiles_only: bool,
    pub moves_to_attack: bool,
}

/// Outcome of checking one raw definition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawValidation {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl RawValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl RawUnitDefinition {
    /// Display label for reports, falling back to `<unnamed>`.
    pub fn label(&self) -> &str {
        self.id
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("<unnamed>")
    }

    pub fn validate(&self) -> RawValidation {
        let mut report = RawValidation::default();
        let errors = &mut report.errors;

        if self.id.as_deref().is_none_or(|id| id.trim().is_empty()) {
            errors.push("missing required field: id".to_owned());
        }
        if self.name.as_deref().is_none_or(|name| name.trim().is_empty()) {
            errors.push("missing required field: name".to_owned());
        }
        match self.cost {
            None => errors.push("missing required field: cost".to_owned()),
            Some(cost) => check_amount("cost", cost, errors),
        }
        if let Some(cost) = self.attack_cost {
            check_amount("attack_cost", cost, errors);
        }
        if let Some(cost) = self.ability_cost {
            check_amount("ability_cost", cost, errors);
        }

        for reach in self.movement_entries() {
            if Pattern::from_str(&reach.pattern).is_err() {
                errors.push(format!("invalid movement pattern: {}", reach.pattern));
            }
            if let Some(range) = reach.range {
                check_amount("movement.range", range, errors);
            }
        }
        if let Some(attack) = &self.attack {
            if Pattern::from_str(&attack.pattern).is_err() {
                errors.push(format!("invalid attack pattern: {}", attack.pattern));
            }
            if let Some(range) = attack.range {
                check_amount("attack.range", range, errors);
            }
        }

        if self.description.as_deref().is_none_or(str::is_empty) {
            report.warnings.push("no description provided".to_owned());
        }
        if self.movement.is_none() && !self.cannot_move {
            report.warnings.push("no movement defined".to_owned());
        }
        report
    }

    /// Converts a definition that passed [`Self::validate`].
    ///
    /// Returns the validation report instead when it has errors. A missing
    /// range defaults to 1, or 0 for the `none` pattern.
    pub fn into_definition(self) -> Result<UnitDefinition, RawValidation> {
        let report = self.validate();
        if !report.is_valid() {
            return Err(report);
        }

        let movement = self
            .movement_entries()
            .iter()
            .filter_map(|reach| {
                let pattern = Pattern::from_str(&reach.pattern).ok()?;
                Some(MovementSpec::new(pattern, range_or_default(pattern, reach.range)))
            })
            .collect();
        let attack = self.attack.as_ref().and_then(|raw| {
            let pattern = Pattern::from_str(&raw.pattern).ok()?;
            Some(AttackSpec {
                aoe: raw.aoe,
                sweep: raw.sweep,
                self_destruct: raw.self_destruct,
                splash: raw.splash,
                ..AttackSpec::new(pattern, range_or_default(pattern, raw.range))
            })
        });

        let mut flags = UnitFlags::empty();
        flags.set(UnitFlags::CANNOT_MOVE, self.cannot_move);
        flags.set(UnitFlags::CANNOT_ATTACK, self.cannot_attack);
        flags.set(UnitFlags::CAN_JUMP, self.can_jump);
        flags.set(UnitFlags::DARK_TILES_ONLY, self.dark_tiles_only);
        flags.set(UnitFlags::MOVES_TO_ATTACK, self.moves_to_attack);

        Ok(UnitDefinition {
            id: UnitId::new(self.id.unwrap_or_default()),
            name: self.name.unwrap_or_default(),
            cost: amount(self.cost.unwrap_or_default()),
            movement,
            attack,
            attack_cost: self.attack_cost.map(amount),
            ability_cost: self.ability_cost.map(amount),
            abilities: self.abilities.into_iter().map(AbilityTag::from).collect(),
            flags,
            description: self.description.unwrap_or_default(),
        })
    }

    fn movement_entries(&self) -> &[RawReach] {
        match &self.movement {
            None => &[],
            Some(RawMovement::One(reach)) => std::slice::from_ref(reach),
            Some(RawMovement::Many(reaches)) => reaches,
        }
    }
}

fn check_amount(field: &str, value: i64, errors: &mut Vec<String>) {
    if value < 0 {
        errors.push(format!("{field} cannot be negative"));
    } else if u32::try_from(value).is_err() {
        errors.push(format!("{field} is too large"));
    }
}

/// Only called on validated values.
fn amount(value: i64) -> u32 {
    u32::try_from(value).unwrap_or_default()
}

fn range_or_default(pattern: Pattern, range: Option<i64>) -> u32 {
    match range {
        Some(range) => amount(range),
        None if pattern == Pattern::Stationary => 0,
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(source: &str) -> RawUnitDefinition {
        toml::from_str(source).expect("raw definition parses")
    }

    #[test]
    fn complete_definition_converts() {
        let definition = raw(r#"
            id = "ghast"
            name = "Ghast"
            cost = 4
            description = "Floats and fires."
            abilities = ["teleport", "fireball"]
            can_jump = true

            [movement]
            pattern = "diagonal"
            range = 2

            [attack]
            pattern = "lateral"
            range = 3
            splash = true
        "#)
        .into_definition()
        .expect("valid");

        assert_eq!(definition.id, UnitId::from("ghast"));
        assert_eq!(definition.movement, vec![MovementSpec::new(Pattern::Diagonal, 2)]);
        assert_eq!(definition.attack.map(|a| (a.range, a.splash)), Some((3, true)));
        assert!(definition.flags.contains(UnitFlags::CAN_JUMP));
        assert_eq!(
            definition.abilities,
            vec![AbilityTag::Teleport, AbilityTag::Custom("fireball".to_owned())]
        );
    }

    #[test]
    fn movement_list_and_default_ranges() {
        let definition = raw(r#"
            id = "hopper"
            name = "Hopper"
            cost = 2
            description = "d"
            movement = [{ pattern = "lateral" }, { pattern = "knight", range = 1 }]
        "#)
        .into_definition()
        .expect("valid");

        assert_eq!(
            definition.movement,
            vec![
                MovementSpec::new(Pattern::Lateral, 1),
                MovementSpec::new(Pattern::Knight, 1),
            ]
        );
    }

    #[test]
    fn every_error_is_collected() {
        let report = raw(r#"
            cost = -1
            [movement]
            pattern = "spiral"
            [attack]
            pattern = "zigzag"
        "#)
        .validate();

        assert_eq!(
            report.errors,
            vec![
                "missing required field: id",
                "missing required field: name",
                "cost cannot be negative",
                "invalid movement pattern: spiral",
                "invalid attack pattern: zigzag",
            ]
        );
        assert_eq!(report.warnings, vec!["no description provided"]);
    }

    #[test]
    fn immobile_unit_without_movement_gets_no_warning() {
        let report = raw(r#"
            id = "totem"
            name = "Totem"
            cost = 1
            cannot_move = true
        "#)
        .validate();
        assert!(report.is_valid());
        assert_eq!(report.warnings, vec!["no description provided"]);

        let report = raw(r#"
            id = "statue"
            name = "Statue"
            cost = 1
            description = "d"
        "#)
        .validate();
        assert_eq!(report.warnings, vec!["no movement defined"]);
    }
}
