use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Finite set of ability names a unit definition may carry.
///
/// Active and passive tags resolve to handlers in the
/// [`AbilityRegistry`](super::AbilityRegistry); lifecycle tags resolve to
/// spawn/death hooks through the fixed table in
/// [`hooks_for`](crate::unit::hooks_for). Anything else is kept verbatim as
/// `Custom` so that mods can ship handlers under their own names.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum AbilityTag {
    Teleport,
    Pull,
    Sweep,
    SelfDestruct,
    CopyAttack,
    JumpDraw,
    DrawOnSpawn,
    DrawOnDeath,
    ManaBonus,
    DrawFromOpponent,
    DiscardOnDeath,
    ExplodeOnSpawn,
    Custom(String),
}

/// Whether a tag is resolved through handlers or lifecycle hooks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagKind {
    Active,
    Passive,
    Lifecycle,
}

impl AbilityTag {
    pub const BUILT_IN: [AbilityTag; 12] = [
        AbilityTag::Teleport,
        AbilityTag::Pull,
        AbilityTag::Sweep,
        AbilityTag::SelfDestruct,
        AbilityTag::CopyAttack,
        AbilityTag::JumpDraw,
        AbilityTag::DrawOnSpawn,
        AbilityTag::DrawOnDeath,
        AbilityTag::ManaBonus,
        AbilityTag::DrawFromOpponent,
        AbilityTag::DiscardOnDeath,
        AbilityTag::ExplodeOnSpawn,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            AbilityTag::Teleport => "teleport",
            AbilityTag::Pull => "pull",
            AbilityTag::Sweep => "sweep",
            AbilityTag::SelfDestruct => "self_destruct",
            AbilityTag::CopyAttack => "copy_attack",
            AbilityTag::JumpDraw => "jump_draw",
            AbilityTag::DrawOnSpawn => "draw_on_spawn",
            AbilityTag::DrawOnDeath => "draw_on_death",
            AbilityTag::ManaBonus => "mana_bonus",
            AbilityTag::DrawFromOpponent => "draw_from_opponent",
            AbilityTag::DiscardOnDeath => "discard_on_death",
            AbilityTag::ExplodeOnSpawn => "explode_on_spawn",
            AbilityTag::Custom(name) => name,
        }
    }

    /// Custom tags are treated as active abilities.
    pub fn kind(&self) -> TagKind {
        match self {
            AbilityTag::JumpDraw => TagKind::Passive,
            AbilityTag::DrawOnSpawn
            | AbilityTag::DrawOnDeath
            | AbilityTag::ManaBonus
            | AbilityTag::DrawFromOpponent
            | AbilityTag::DiscardOnDeath
            | AbilityTag::ExplodeOnSpawn => TagKind::Lifecycle,
            _ => TagKind::Active,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, AbilityTag::Custom(_))
    }
}

impl FromStr for AbilityTag {
    type Err = Infallible;

    /// Accepts snake_case names plus the camelCase spellings used by older
    /// unit files (`selfDestruct`, `drawOnJumpOver`, `drawFromEnemy`, ...).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let tag = match value {
            "teleport" => AbilityTag::Teleport,
            "pull" => AbilityTag::Pull,
            "sweep" => AbilityTag::Sweep,
            "self_destruct" | "selfDestruct" => AbilityTag::SelfDestruct,
            "copy_attack" | "copyAttack" => AbilityTag::CopyAttack,
            "jump_draw" | "drawOnJumpOver" => AbilityTag::JumpDraw,
            "draw_on_spawn" | "drawOnSpawn" => AbilityTag::DrawOnSpawn,
            "draw_on_death" | "drawOnDeath" => AbilityTag::DrawOnDeath,
            "mana_bonus" | "manaBonus" => AbilityTag::ManaBonus,
            "draw_from_opponent" | "drawFromEnemy" => AbilityTag::DrawFromOpponent,
            "discard_on_death" | "discardOnDeath" => AbilityTag::DiscardOnDeath,
            "explode_on_spawn" | "spawnExplosion" => AbilityTag::ExplodeOnSpawn,
            other => AbilityTag::Custom(other.to_owned()),
        };
        Ok(tag)
    }
}

impl From<String> for AbilityTag {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(tag) => tag,
            Err(never) => match never {},
        }
    }
}

impl From<AbilityTag> for String {
    fn from(tag: AbilityTag) -> Self {
        tag.as_str().to_owned()
    }
}

impl fmt::Display for AbilityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_spellings_map_to_built_ins() {
        assert_eq!(AbilityTag::from("drawOnJumpOver".to_owned()), AbilityTag::JumpDraw);
        assert_eq!(AbilityTag::from("drawFromEnemy".to_owned()), AbilityTag::DrawFromOpponent);
        assert_eq!(AbilityTag::from("self_destruct".to_owned()), AbilityTag::SelfDestruct);
    }

    #[test]
    fn unknown_names_round_trip_as_custom() {
        let tag = AbilityTag::from("freeze".to_owned());
        assert_eq!(tag, AbilityTag::Custom("freeze".to_owned()));
        assert_eq!(tag.to_string(), "freeze");
        assert_eq!(tag.kind(), TagKind::Active);
    }

    #[test]
    fn built_in_names_are_canonical() {
        for tag in AbilityTag::BUILT_IN {
            assert_eq!(AbilityTag::from(tag.to_string()), tag);
        }
    }
}
