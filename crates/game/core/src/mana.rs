//! Per-player mana economy.
//!
//! `max_mana` grows by one at the start of each of the owner's playing turns
//! until it reaches the configured ceiling. `bonus` is granted and revoked by
//! supporting units and survives turn refreshes. Spending never leaves the
//! pool negative.
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ManaLedger {
    pub mana: u32,
    pub max_mana: u32,
    pub bonus: u32,
}

impl ManaLedger {
    pub const fn new() -> Self {
        Self {
            mana: 0,
            max_mana: 0,
            bonus: 0,
        }
    }

    /// Upper bound the current pool may reach this turn.
    pub const fn cap(&self) -> u32 {
        self.max_mana + self.bonus
    }

    pub const fn can_afford(&self, amount: u32) -> bool {
        self.mana >= amount
    }

    /// Deducts `amount`; returns `false` and leaves the pool untouched on shortfall.
    pub fn spend(&mut self, amount: u32) -> bool {
        match self.mana.checked_sub(amount) {
            Some(remaining) => {
                self.mana = remaining;
                true
            }
            None => false,
        }
    }

    /// Start-of-turn refresh during the playing phase.
    pub fn refresh(&mut self, ceiling: u32) {
        if self.max_mana < ceiling {
            self.max_mana += 1;
        }
        self.mana = self.cap();
    }

    /// Setup turns grant no mana.
    pub fn reset_for_setup(&mut self) {
        self.mana = 0;
        self.max_mana = 0;
    }

    pub fn add_bonus(&mut self, amount: u32) {
        self.bonus += amount;
    }

    /// Revokes bonus mana, clamping the current pool to the reduced cap.
    pub fn remove_bonus(&mut self, amount: u32) {
        self.bonus = self.bonus.saturating_sub(amount);
        self.mana = self.mana.min(self.cap());
    }
}

impl fmt::Display for ManaLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.mana, self.max_mana)?;
        if self.bonus > 0 {
            write!(f, " (+{})", self.bonus)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spend_fails_without_mutation_on_shortfall() {
        let mut ledger = ManaLedger {
            mana: 1,
            max_mana: 3,
            bonus: 0,
        };
        assert!(!ledger.spend(2));
        assert_eq!(ledger.mana, 1);
        assert!(ledger.spend(1));
        assert_eq!(ledger.mana, 0);
    }

    #[test]
    fn refresh_grows_until_ceiling() {
        let mut ledger = ManaLedger::new();
        for expected in 1..=6 {
            ledger.refresh(6);
            assert_eq!(ledger.max_mana, expected);
            assert_eq!(ledger.mana, expected);
        }
        ledger.refresh(6);
        assert_eq!(ledger.max_mana, 6);
    }

    #[test]
    fn bonus_survives_refresh_and_is_removed_with_clamp() {
        let mut ledger = ManaLedger::new();
        ledger.add_bonus(1);
        ledger.refresh(6);
        assert_eq!(ledger.mana, 2);

        ledger.remove_bonus(1);
        assert_eq!(ledger.mana, 1);
        ledger.remove_bonus(5);
        assert_eq!(ledger.bonus, 0);
    }

    #[test]
    fn display_shows_bonus_only_when_present() {
        let mut ledger = ManaLedger {
            mana: 3,
            max_mana: 4,
            bonus: 0,
        };
        assert_eq!(ledger.to_string(), "3 / 4");
        ledger.bonus = 1;
        assert_eq!(ledger.to_string(), "3 / 4 (+1)");
    }
}
