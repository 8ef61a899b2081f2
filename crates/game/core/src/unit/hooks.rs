use crate::ability::AbilityTag;
use crate::config::GameConfig;

/// Effect run for the unit's owner when it spawns or dies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LifecycleHook {
    DrawCards(usize),
    DrawFromOpponent(usize),
    DiscardCards(usize),
    AddBonusMana(u32),
    RemoveBonusMana(u32),
    /// Spawn explosion. Resolves to nothing until its blast rules are settled.
    Explode,
}

/// Ordered spawn and death hooks of one unit instance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LifecycleHooks {
    pub on_spawn: Vec<LifecycleHook>,
    pub on_death: Vec<LifecycleHook>,
}

impl LifecycleHooks {
    pub fn is_empty(&self) -> bool {
        self.on_spawn.is_empty() && self.on_death.is_empty()
    }
}

/// Resolves lifecycle tags into hooks, in tag order.
///
/// Hooks are appended, so two tags contributing death hooks both run.
pub fn hooks_for(tags: &[AbilityTag], config: &GameConfig) -> LifecycleHooks {
    let mut hooks = LifecycleHooks::default();

    for tag in tags {
        match tag {
            AbilityTag::DrawOnSpawn => hooks.on_spawn.push(LifecycleHook::DrawCards(config.hook_draw)),
            AbilityTag::DrawOnDeath => hooks.on_death.push(LifecycleHook::DrawCards(config.hook_draw)),
            AbilityTag::ManaBonus => {
                hooks.on_spawn.push(LifecycleHook::AddBonusMana(1));
                hooks.on_death.push(LifecycleHook::RemoveBonusMana(1));
            }
            AbilityTag::DrawFromOpponent => hooks
                .on_spawn
                .push(LifecycleHook::DrawFromOpponent(config.opponent_draw)),
            AbilityTag::DiscardOnDeath => hooks
                .on_death
                .push(LifecycleHook::DiscardCards(config.death_discard)),
            AbilityTag::ExplodeOnSpawn => hooks.on_spawn.push(LifecycleHook::Explode),
            _ => {}
        }
    }

    hooks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn death_hooks_chain_instead_of_replacing() {
        let tags = [AbilityTag::DrawOnDeath, AbilityTag::DiscardOnDeath];
        let hooks = hooks_for(&tags, &GameConfig::default());

        assert_eq!(
            hooks.on_death,
            vec![LifecycleHook::DrawCards(1), LifecycleHook::DiscardCards(2)]
        );
    }

    #[test]
    fn mana_bonus_pairs_spawn_and_death() {
        let hooks = hooks_for(&[AbilityTag::ManaBonus], &GameConfig::default());
        assert_eq!(hooks.on_spawn, vec![LifecycleHook::AddBonusMana(1)]);
        assert_eq!(hooks.on_death, vec![LifecycleHook::RemoveBonusMana(1)]);
    }

    #[test]
    fn active_tags_attach_nothing() {
        let hooks = hooks_for(&[AbilityTag::Teleport, AbilityTag::JumpDraw], &GameConfig::default());
        assert!(hooks.is_empty());
    }
}
