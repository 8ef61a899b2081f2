//! Print the unit roster.

use anyhow::Result;
use clap::Parser;

use chegg_core::UnitDefinition;

use super::ContentArgs;

#[derive(Parser)]
pub struct Roster {
    /// Only list units that may go into a deck
    #[arg(long)]
    deck_building: bool,

    #[command(flatten)]
    content: ContentArgs,
}

impl Roster {
    pub fn execute(self) -> Result<()> {
        let (registry, _) = self.content.registry()?;
        let units = if self.deck_building {
            registry.deck_building()
        } else {
            registry.all()
        };

        for definition in units {
            let source = if registry.is_override(&definition.id) {
                "mod"
            } else {
                "built-in"
            };
            println!("{}  [{source}]", describe(definition));
        }
        Ok(())
    }
}

fn describe(definition: &UnitDefinition) -> String {
    let movement = definition
        .movement
        .iter()
        .map(|spec| format!("{} {}", spec.pattern, spec.range))
        .collect::<Vec<_>>()
        .join(" + ");
    let attack = definition
        .attack
        .map(|spec| format!("{} {}", spec.pattern, spec.range))
        .unwrap_or_else(|| "-".to_owned());
    let abilities = definition
        .abilities
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{:<12} {:<12} cost {}  move {:<20} attack {:<14} {}",
        definition.id.as_str(),
        definition.name,
        definition.cost,
        if movement.is_empty() { "-" } else { movement.as_str() },
        attack,
        abilities
    )
}
