use crate::config::GameConfig;

use super::{InstanceId, Position, Side};

/// Zone tag carried by every tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Zone {
    /// Rows where the given side may place units from its hand.
    Spawn(Side),
    Neutral,
}

impl Zone {
    pub fn for_row(row: i32) -> Self {
        if row < GameConfig::SPAWN_DEPTH {
            Zone::Spawn(Side::Blue)
        } else if row >= GameConfig::ROWS - GameConfig::SPAWN_DEPTH {
            Zone::Spawn(Side::Red)
        } else {
            Zone::Neutral
        }
    }
}

/// Single board cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub position: Position,
    pub dark: bool,
    pub zone: Zone,
    occupant: Option<InstanceId>,
}

impl Tile {
    fn new(position: Position) -> Self {
        Self {
            position,
            dark: is_dark(position),
            zone: Zone::for_row(position.row),
            occupant: None,
        }
    }

    pub fn occupant(&self) -> Option<InstanceId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// Checkerboard colouring: a tile is dark when `row + col` is odd.
pub const fn is_dark(position: Position) -> bool {
    (position.row + position.col).rem_euclid(2) == 1
}

/// Fixed 10x8 grid with at most one occupant per tile.
///
/// Occupancy mutators enforce the one-unit-per-tile invariant with
/// assertions: callers validate first, so a failed assertion is a bug.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    tiles: Vec<Tile>,
}

impl Board {
    pub fn new() -> Self {
        let tiles = (0..GameConfig::ROWS)
            .flat_map(|row| (0..GameConfig::COLS).map(move |col| Tile::new(Position::new(row, col))))
            .collect();
        Self { tiles }
    }

    pub const fn rows(&self) -> i32 {
        GameConfig::ROWS
    }

    pub const fn cols(&self) -> i32 {
        GameConfig::COLS
    }

    pub fn contains(&self, position: Position) -> bool {
        in_bounds(position)
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        usize::try_from(position.row * GameConfig::COLS + position.col).ok()
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.index(position).and_then(|index| self.tiles.get(index))
    }

    fn tile_mut(&mut self, position: Position) -> &mut Tile {
        let index = self.index(position);
        match index.and_then(|index| self.tiles.get_mut(index)) {
            Some(tile) => tile,
            None => panic!("board access out of bounds at {position:?}"),
        }
    }

    pub fn occupant(&self, position: Position) -> Option<InstanceId> {
        self.tile(position).and_then(Tile::occupant)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Places `id` on an empty tile.
    pub fn place(&mut self, position: Position, id: InstanceId) {
        let tile = self.tile_mut(position);
        assert!(
            tile.occupant.is_none(),
            "tile {position} already holds {:?}, cannot place {id}",
            tile.occupant
        );
        tile.occupant = Some(id);
    }

    /// Clears the tile currently holding `id`.
    pub fn clear(&mut self, position: Position, id: InstanceId) {
        let tile = self.tile_mut(position);
        assert_eq!(
            tile.occupant,
            Some(id),
            "occupancy desync for {id} at {position}"
        );
        tile.occupant = None;
    }

    pub fn relocate(&mut self, from: Position, to: Position, id: InstanceId) {
        self.clear(from, id);
        self.place(to, id);
    }

    /// Exchanges the occupants of two occupied tiles.
    pub fn swap(&mut self, a: Position, b: Position) {
        let first = self.tile_mut(a).occupant.take();
        let second = self.tile_mut(b).occupant.take();
        assert!(
            first.is_some() && second.is_some(),
            "swap requires two occupants, found {first:?} at {a} and {second:?} at {b}"
        );
        self.tile_mut(a).occupant = second;
        self.tile_mut(b).occupant = first;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

pub const fn in_bounds(position: Position) -> bool {
    position.row >= 0
        && position.row < GameConfig::ROWS
        && position.col >= 0
        && position.col < GameConfig::COLS
}
