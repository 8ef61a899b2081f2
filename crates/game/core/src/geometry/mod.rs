//! Pure board-coordinate math.
//!
//! Every query walks a named direction table outward from an origin and reads
//! occupancy through [`BoardView`], so the same functions serve live match
//! state, previews, and tests with hand-built boards.

mod lines;
mod reach;

pub use lines::{LineHit, area_positions, line_positions, pull_destination};
pub use reach::{
    AttackOptions, AttackTargets, DirectionalTargets, MoveOptions, valid_attacks, valid_moves,
};

pub use crate::state::{Direction, Position, Side, in_bounds, is_dark};

/// Read-only occupancy lookup used by geometry queries.
pub trait BoardView {
    /// Owner of the unit standing on `position`, if any.
    fn occupant_owner(&self, position: Position) -> Option<Side>;

    fn is_occupied(&self, position: Position) -> bool {
        self.occupant_owner(position).is_some()
    }

    fn is_dark(&self, position: Position) -> bool {
        is_dark(position)
    }
}

/// Named direction table.
///
/// `Forward` is owner-relative and resolves to the three tiles ahead of the
/// owner's side. `Stationary` (spelled `none` in data files) has no directions.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Pattern {
    Lateral,
    Diagonal,
    Surrounding,
    Knight,
    Forward,
    #[strum(serialize = "none")]
    #[cfg_attr(feature = "serde", serde(rename = "none"))]
    Stationary,
}

const LATERAL: [Direction; 4] = [Direction::UP, Direction::DOWN, Direction::LEFT, Direction::RIGHT];

const DIAGONAL: [Direction; 4] = [
    Direction::new(-1, -1),
    Direction::new(-1, 1),
    Direction::new(1, -1),
    Direction::new(1, 1),
];

const SURROUNDING: [Direction; 8] = [
    Direction::UP,
    Direction::DOWN,
    Direction::LEFT,
    Direction::RIGHT,
    Direction::new(-1, -1),
    Direction::new(-1, 1),
    Direction::new(1, -1),
    Direction::new(1, 1),
];

const KNIGHT: [Direction; 8] = [
    Direction::new(-2, -1),
    Direction::new(-2, 1),
    Direction::new(2, -1),
    Direction::new(2, 1),
    Direction::new(-1, -2),
    Direction::new(-1, 2),
    Direction::new(1, -2),
    Direction::new(1, 2),
];

const FORWARD_BLUE: [Direction; 3] = [
    Direction::new(1, -1),
    Direction::new(1, 0),
    Direction::new(1, 1),
];

const FORWARD_RED: [Direction; 3] = [
    Direction::new(-1, -1),
    Direction::new(-1, 0),
    Direction::new(-1, 1),
];

impl Pattern {
    /// Direction table for this pattern as seen by `owner`.
    pub fn directions(self, owner: Side) -> &'static [Direction] {
        match self {
            Pattern::Lateral => &LATERAL,
            Pattern::Diagonal => &DIAGONAL,
            Pattern::Surrounding => &SURROUNDING,
            Pattern::Knight => &KNIGHT,
            Pattern::Forward => match owner {
                Side::Blue => &FORWARD_BLUE,
                Side::Red => &FORWARD_RED,
            },
            Pattern::Stationary => &[],
        }
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Manhattan distance between two tiles.
pub fn manhattan_distance(a: Position, b: Position) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

/// True when `b` is one of the eight tiles surrounding `a`.
pub fn is_adjacent(a: Position, b: Position) -> bool {
    let d_row = (a.row - b.row).abs();
    let d_col = (a.col - b.col).abs();
    d_row <= 1 && d_col <= 1 && d_row + d_col > 0
}

/// Walk length for a range stored as an unsigned definition value.
pub(crate) fn span(range: u32) -> i32 {
    i32::try_from(range).unwrap_or(i32::MAX)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::BTreeMap;

    use super::*;

    /// Hand-built occupancy map for geometry tests.
    #[derive(Default)]
    pub struct SparseBoard {
        pub occupants: BTreeMap<Position, Side>,
    }

    impl SparseBoard {
        pub fn with(mut self, row: i32, col: i32, side: Side) -> Self {
            self.occupants.insert(Position::new(row, col), side);
            self
        }
    }

    impl BoardView for SparseBoard {
        fn occupant_owner(&self, position: Position) -> Option<Side> {
            self.occupants.get(&position).copied()
        }
    }
}
