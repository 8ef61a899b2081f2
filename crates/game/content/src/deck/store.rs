use std::collections::BTreeMap;

use chegg_core::UnitId;

/// Named deck lists kept between sessions.
///
/// Storage media live outside this crate; callers plug in whatever backs
/// them and keep the rest of the code on this contract.
pub trait DeckStore {
    /// Saves `cards` under `name`, replacing any previous list.
    fn save(&mut self, name: &str, cards: &[UnitId]);

    fn load(&self, name: &str) -> Option<Vec<UnitId>>;

    /// Stored names in ascending order.
    fn names(&self) -> Vec<String>;

    /// Returns whether a list was removed.
    fn delete(&mut self, name: &str) -> bool;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryDeckStore {
    decks: BTreeMap<String, Vec<UnitId>>,
}

impl MemoryDeckStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeckStore for MemoryDeckStore {
    fn save(&mut self, name: &str, cards: &[UnitId]) {
        self.decks.insert(name.to_owned(), cards.to_vec());
    }

    fn load(&self, name: &str) -> Option<Vec<UnitId>> {
        self.decks.get(name).cloned()
    }

    fn names(&self) -> Vec<String> {
        self.decks.keys().cloned().collect()
    }

    fn delete(&mut self, name: &str) -> bool {
        self.decks.remove(name).is_some()
    }
}
