use super::{InstanceId, Side};
use crate::mana::ManaLedger;
use crate::unit::UnitId;

/// Cards and resources of one side.
///
/// The deck is drawn from its end; the hand keeps insertion order so callers
/// can address cards by index.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub side: Side,
    pub mana: ManaLedger,
    pub hand: Vec<UnitId>,
    pub deck: Vec<UnitId>,
    pub king: Option<InstanceId>,
}

impl PlayerState {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            mana: ManaLedger::new(),
            hand: Vec::new(),
            deck: Vec::new(),
            king: None,
        }
    }

    /// Moves up to `count` cards from the deck to the hand, returning how many moved.
    pub fn draw(&mut self, count: usize) -> usize {
        let mut drawn = 0;
        while drawn < count {
            let Some(card) = self.deck.pop() else {
                break;
            };
            self.hand.push(card);
            drawn += 1;
        }
        drawn
    }

    /// Drops up to `count` cards from the end of the hand.
    pub fn discard(&mut self, count: usize) -> Vec<UnitId> {
        let keep = self.hand.len().saturating_sub(count);
        self.hand.split_off(keep)
    }

    pub fn hand_position(&self, card: &UnitId) -> Option<usize> {
        self.hand.iter().position(|c| c == card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(cards: &[&str]) -> Vec<UnitId> {
        cards.iter().map(|c| UnitId::from(*c)).collect()
    }

    #[test]
    fn draw_takes_from_deck_end_and_stops_when_empty() {
        let mut player = PlayerState::new(Side::Blue);
        player.deck = deck(&["zombie", "pig", "cat"]);

        assert_eq!(player.draw(2), 2);
        assert_eq!(player.hand, deck(&["cat", "pig"]));
        assert_eq!(player.draw(5), 1);
        assert!(player.deck.is_empty());
    }

    #[test]
    fn discard_drops_latest_cards() {
        let mut player = PlayerState::new(Side::Red);
        player.hand = deck(&["villager", "zombie", "pig"]);

        let dropped = player.discard(2);
        assert_eq!(dropped, deck(&["zombie", "pig"]));
        assert_eq!(player.hand, deck(&["villager"]));
        assert!(player.discard(3).len() == 1);
    }
}
