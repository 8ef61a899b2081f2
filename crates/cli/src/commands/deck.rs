//! Validate a deck list and show its statistics.

use anyhow::{Result, bail};
use clap::Parser;

use chegg_content::{DeckStats, default_deck, validate_deck};
use chegg_core::UnitId;

use super::ContentArgs;

#[derive(Parser)]
pub struct Deck {
    /// Unit ids in the deck; the default preset when empty
    #[arg(value_name = "UNIT")]
    cards: Vec<String>,

    #[command(flatten)]
    content: ContentArgs,
}

impl Deck {
    pub fn execute(self) -> Result<()> {
        let (registry, _) = self.content.registry()?;
        let cards: Vec<UnitId> = if self.cards.is_empty() {
            default_deck()
        } else {
            self.cards.into_iter().map(UnitId::new).collect()
        };

        let stats = DeckStats::compute(&registry, &cards);
        println!(
            "{} cards, total cost {}, average {:.1}",
            cards.len(),
            stats.total_cost,
            stats.average_cost
        );
        for (index, count) in stats.cost_curve.iter().enumerate() {
            let label = if index + 1 == stats.cost_curve.len() {
                format!("{}+", index + 1)
            } else {
                (index + 1).to_string()
            };
            println!("  cost {label:<2} {}", "#".repeat(*count));
        }
        for (id, count) in &stats.counts {
            println!("  {count}x {id}");
        }

        if let Err(err) = validate_deck(&registry, &cards) {
            for issue in &err.issues {
                println!("error {issue}");
            }
            bail!("deck is not playable");
        }
        println!("deck is playable");
        Ok(())
    }
}
