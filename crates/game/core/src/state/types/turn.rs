use super::Side;
use crate::config::GameConfig;

/// Match phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// Opening half-turn of each player: no mana, king placement.
    Setup,
    Playing,
    /// Terminal; a king has fallen.
    GameOver,
}

/// Turn bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Strictly increasing half-turn counter. Turns 0 and 1 are setup.
    pub number: u32,
    pub current: Side,
    pub phase: Phase,
    /// Set only once the phase is `GameOver`.
    pub winner: Option<Side>,
    /// Commands accepted so far, used to correlate errors and logs.
    pub nonce: u64,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            number: 0,
            current: Side::Blue,
            phase: Phase::Setup,
            winner: None,
            nonce: 0,
        }
    }

    pub fn is_setup_turn(number: u32) -> bool {
        number < GameConfig::SETUP_TURNS
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}
