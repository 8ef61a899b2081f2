/// Game configuration constants and tunable parameters.
///
/// Board dimensions are fixed; everything else is a runtime-tunable rule knob
/// loaded from TOML by `chegg-content` or left at the defaults below.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Ceiling that `max_mana` grows towards, one step per owned turn.
    pub mana_ceiling: u32,
    /// Default attack price when a definition does not override it.
    pub attack_cost: u32,
    /// Price of the second move ("dash") within one turn.
    pub dash_cost: u32,
    /// Price the king-type unit pays for every move.
    pub king_move_cost: u32,
    /// Maximum slide distance of the pull ability.
    pub pull_distance: i32,
    /// Cards each player draws before the opening setup turn.
    pub initial_hand: usize,
    /// Exact size of a legal deck.
    pub deck_size: usize,
    /// Cards drawn at the start of every playing turn.
    pub turn_draw: usize,
    /// Cards drawn by draw-on-spawn and draw-on-death hooks.
    pub hook_draw: usize,
    /// Cards taken from the opponent's deck by draw-from-opponent.
    pub opponent_draw: usize,
    /// Cards discarded from the owner's hand by discard-on-death.
    pub death_discard: usize,
    /// Cards drawn when a jumper passes over an occupied tile.
    pub jump_draw: usize,
}

impl GameConfig {
    // ===== board geometry =====
    pub const ROWS: i32 = 10;
    pub const COLS: i32 = 8;
    /// Rows counted from each owner's edge that form its spawn zone.
    pub const SPAWN_DEPTH: i32 = 2;
    /// Number of half-turns played in the setup phase (one per player).
    pub const SETUP_TURNS: u32 = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MANA_CEILING: u32 = 6;
    pub const DEFAULT_ATTACK_COST: u32 = 1;
    pub const DEFAULT_DASH_COST: u32 = 1;
    pub const DEFAULT_KING_MOVE_COST: u32 = 1;
    pub const DEFAULT_PULL_DISTANCE: i32 = 2;
    pub const DEFAULT_INITIAL_HAND: usize = 3;
    pub const DEFAULT_DECK_SIZE: usize = 15;

    pub fn new() -> Self {
        Self {
            mana_ceiling: Self::DEFAULT_MANA_CEILING,
            attack_cost: Self::DEFAULT_ATTACK_COST,
            dash_cost: Self::DEFAULT_DASH_COST,
            king_move_cost: Self::DEFAULT_KING_MOVE_COST,
            pull_distance: Self::DEFAULT_PULL_DISTANCE,
            initial_hand: Self::DEFAULT_INITIAL_HAND,
            deck_size: Self::DEFAULT_DECK_SIZE,
            turn_draw: 1,
            hook_draw: 1,
            opponent_draw: 2,
            death_discard: 2,
            jump_draw: 1,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
