//! Deck presets, validation and statistics.
//!
//! The engine only ever sees a deck as an ordered list of [`UnitId`]s; this
//! module decides which lists are legal before a match is started with them.

mod stats;
mod store;

pub use stats::DeckStats;
pub use store::{DeckStore, MemoryDeckStore};

use chegg_core::{ErrorSeverity, GameError, UnitId, UnitRegistry};

/// The preset handed to new players: fifteen cards from cost 1 to 5.
pub const DEFAULT_DECK: [&str; 15] = [
    "zombie",
    "zombie",
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
    "slime",
    "enderman",
    "parrot",
];

pub fn default_deck() -> Vec<UnitId> {
    DEFAULT_DECK.into_iter().map(UnitId::from).collect()
}

/// One reason a deck list is not playable.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeckIssue {
    #[error("deck must contain exactly {expected} cards (has {found})")]
    WrongSize { expected: usize, found: usize },

    #[error("unknown unit '{0}'")]
    UnknownUnit(UnitId),

    #[error("'{0}' is the king and is dealt automatically")]
    KingInDeck(UnitId),
}

/// Every issue found in a deck list.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid deck: {}", .issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct DeckError {
    pub issues: Vec<DeckIssue>,
}

impl GameError for DeckError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "DECK_INVALID"
    }
}

/// Checks size, membership and the absence of king-type cards.
///
/// The required size comes from the registry's [`GameConfig`](chegg_core::GameConfig).
pub fn validate_deck(registry: &UnitRegistry, cards: &[UnitId]) -> Result<(), DeckError> {
    let mut issues = Vec::new();

    let expected = registry.config().deck_size;
    if cards.len() != expected {
        issues.push(DeckIssue::WrongSize {
            expected,
            found: cards.len(),
        });
    }

    for card in cards {
        let issue = match registry.get(card) {
            None => DeckIssue::UnknownUnit(card.clone()),
            Some(definition) if definition.is_king() => DeckIssue::KingInDeck(card.clone()),
            Some(_) => continue,
        };
        if !issues.contains(&issue) {
            issues.push(issue);
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(DeckError { issues })
    }
}
