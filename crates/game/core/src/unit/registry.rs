use std::borrow::Borrow;
use std::collections::BTreeMap;

use super::{UnitDefinition, UnitFlags, UnitId, hooks_for, roster};
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::geometry::Pattern;
use crate::state::{InstanceId, Side, UnitState};

/// One reason a definition was refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionIssue {
    #[error("id is empty")]
    MissingId,

    #[error("name is empty")]
    MissingName,

    #[error("movement pattern `{pattern}` needs a range of at least 1")]
    ZeroMovementRange { pattern: Pattern },

    #[error("attack range must be at least 1")]
    ZeroAttackRange,

    #[error("attack pattern `none` reaches no tile")]
    StationaryAttack,

    #[error("only `{king}` may carry the king flag")]
    ForeignKing { king: &'static str },

    #[error("`{king}` must keep the king flag")]
    KingFlagRemoved { king: &'static str },
}

/// A definition rejected in full, with every issue found.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error(
    "unit definition `{id}` rejected: {}",
    .issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
)]
pub struct RegistrationError {
    pub id: UnitId,
    pub issues: Vec<DefinitionIssue>,
}

impl GameError for RegistrationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "UNIT_DEFINITION_INVALID"
    }
}

/// Built-in definitions overlaid by registered overrides.
#[derive(Clone, Debug)]
pub struct UnitRegistry {
    built_in: BTreeMap<UnitId, UnitDefinition>,
    overrides: BTreeMap<UnitId, UnitDefinition>,
    config: GameConfig,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    /// Registry whose lifecycle hooks use the counts from `config`.
    pub fn with_config(config: GameConfig) -> Self {
        let built_in = roster::built_in()
            .into_iter()
            .map(|definition| (definition.id.clone(), definition))
            .collect();
        Self {
            built_in,
            overrides: BTreeMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn king_id(&self) -> UnitId {
        UnitId::from(roster::KING_ID)
    }

    /// Validates and stores `definition`, replacing any prior one with the same id.
    ///
    /// Nothing is stored when any issue is found.
    pub fn register(&mut self, definition: UnitDefinition) -> Result<(), RegistrationError> {
        let issues = validate(&definition);
        if !issues.is_empty() {
            return Err(RegistrationError {
                id: definition.id,
                issues,
            });
        }
        self.overrides.insert(definition.id.clone(), definition);
        Ok(())
    }

    pub fn get<Q>(&self, id: &Q) -> Option<&UnitDefinition>
    where
        UnitId: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.overrides.get(id).or_else(|| self.built_in.get(id))
    }

    pub fn contains<Q>(&self, id: &Q) -> bool
    where
        UnitId: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(id).is_some()
    }

    pub fn is_override<Q>(&self, id: &Q) -> bool
    where
        UnitId: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.overrides.contains_key(id)
    }

    /// Effective definitions sorted by id.
    pub fn all(&self) -> Vec<&UnitDefinition> {
        let mut definitions: Vec<&UnitDefinition> = self
            .built_in
            .values()
            .filter(|definition| !self.overrides.contains_key(&definition.id))
            .chain(self.overrides.values())
            .collect();
        definitions.sort_by(|a, b| a.id.cmp(&b.id));
        definitions
    }

    /// Definitions that may appear in a deck (everything but king-type units).
    pub fn deck_building(&self) -> Vec<&UnitDefinition> {
        self.all()
            .into_iter()
            .filter(|definition| !definition.is_king())
            .collect()
    }

    /// Builds a fresh runtime unit with its lifecycle hooks attached.
    pub fn instantiate(&self, id: &UnitId, owner: Side, instance: InstanceId) -> Option<UnitState> {
        let definition = self.get(id)?;
        let hooks = hooks_for(&definition.abilities, &self.config);
        Some(UnitState::new(
            instance,
            owner,
            definition.id.clone(),
            definition.is_king(),
            hooks,
        ))
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(definition: &UnitDefinition) -> Vec<DefinitionIssue> {
    let mut issues = Vec::new();

    if definition.id.as_str().trim().is_empty() {
        issues.push(DefinitionIssue::MissingId);
    }
    if definition.name.trim().is_empty() {
        issues.push(DefinitionIssue::MissingName);
    }

    for spec in &definition.movement {
        if spec.pattern != Pattern::Stationary && spec.range == 0 {
            issues.push(DefinitionIssue::ZeroMovementRange {
                pattern: spec.pattern,
            });
        }
    }

    if let Some(attack) = &definition.attack {
        if attack.pattern == Pattern::Stationary {
            issues.push(DefinitionIssue::StationaryAttack);
        } else if attack.range == 0 {
            issues.push(DefinitionIssue::ZeroAttackRange);
        }
    }

    let is_king_id = definition.id.as_str() == roster::KING_ID;
    let has_king_flag = definition.flags.contains(UnitFlags::KING);
    if has_king_flag && !is_king_id {
        issues.push(DefinitionIssue::ForeignKing {
            king: roster::KING_ID,
        });
    }
    if is_king_id && !has_king_flag {
        issues.push(DefinitionIssue::KingFlagRemoved {
            king: roster::KING_ID,
        });
    }

    issues
}
