use std::collections::BTreeMap;

use chegg_core::{UnitId, UnitRegistry};

/// Highest bucket of the cost curve; anything pricier lands in it.
const CURVE_TOP: u32 = 6;

/// Summary shown next to a deck list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeckStats {
    pub total_cost: u32,
    pub average_cost: f32,
    /// Card counts per cost, index 0 holding cost 1 (and free cards).
    pub cost_curve: [usize; CURVE_TOP as usize],
    pub counts: BTreeMap<UnitId, usize>,
}

impl DeckStats {
    /// Unknown ids are counted but contribute no cost.
    pub fn compute(registry: &UnitRegistry, cards: &[UnitId]) -> Self {
        let mut stats = Self::default();
        for card in cards {
            *stats.counts.entry(card.clone()).or_default() += 1;
            let Some(definition) = registry.get(card) else {
                continue;
            };
            stats.total_cost += definition.cost;
            let bucket = definition.cost.clamp(1, CURVE_TOP) - 1;
            stats.cost_curve[bucket as usize] += 1;
        }
        if !cards.is_empty() {
            stats.average_cost = stats.total_cost as f32 / cards.len() as f32;
        }
        stats
    }
}
