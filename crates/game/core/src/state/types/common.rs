use std::fmt;

/// Unique identifier of a unit instance on the board.
///
/// Allocated monotonically by [`MatchState`](crate::state::MatchState) and
/// never reused, even after the unit dies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceId(pub u32);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete board coordinate. Row 0 is Blue's back rank, row 9 is Red's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Position reached after walking `distance` steps along `direction`.
    pub const fn step(self, direction: Direction, distance: i32) -> Self {
        Self {
            row: self.row + direction.d_row * distance,
            col: self.col + direction.d_col * distance,
        }
    }
}

/// Board notation: row letter followed by the 1-based column, e.g. `E4`.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match u8::try_from(self.row) {
            Ok(row) if row < 26 => write!(f, "{}{}", char::from(b'A' + row), self.col + 1),
            _ => write!(f, "({}, {})", self.row, self.col),
        }
    }
}

/// Unit step vector used by direction tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Direction {
    pub d_row: i32,
    pub d_col: i32,
}

impl Direction {
    pub const UP: Self = Self::new(-1, 0);
    pub const DOWN: Self = Self::new(1, 0);
    pub const LEFT: Self = Self::new(0, -1);
    pub const RIGHT: Self = Self::new(0, 1);

    pub const fn new(d_row: i32, d_col: i32) -> Self {
        Self { d_row, d_col }
    }

    pub const fn reversed(self) -> Self {
        Self::new(-self.d_row, -self.d_col)
    }

    /// Unit direction from `from` towards `to`, component-wise signum.
    pub fn between(from: Position, to: Position) -> Self {
        Self::new((to.row - from.row).signum(), (to.col - from.col).signum())
    }

    /// The two directions perpendicular to a lateral direction.
    pub const fn perpendicular(self) -> [Self; 2] {
        if self.d_row == 0 {
            [Self::UP, Self::DOWN]
        } else {
            [Self::LEFT, Self::RIGHT]
        }
    }
}

/// Player identity. Blue opens the match and owns the low rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumString, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Blue,
    Red,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Blue, Side::Red];

    pub const fn opponent(self) -> Self {
        match self {
            Side::Blue => Side::Red,
            Side::Red => Side::Blue,
        }
    }

    /// Row step that counts as "forward" for this side.
    pub const fn forward(self) -> i32 {
        match self {
            Side::Blue => 1,
            Side::Red => -1,
        }
    }

    /// Array slot used by per-player tables.
    pub const fn index(self) -> usize {
        match self {
            Side::Blue => 0,
            Side::Red => 1,
        }
    }
}
