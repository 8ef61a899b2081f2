use super::{BoardView, Direction, Pattern, Position, Side, in_bounds, span};

/// Flags shaping a movement walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOptions {
    /// Pass over occupied tiles instead of stopping at them.
    pub can_jump: bool,
    /// Occupied tiles are never landing spots.
    pub must_be_empty: bool,
    /// Skip (without stopping on) light tiles.
    pub only_dark_tiles: bool,
    /// An occupant short of max range ends the walk in that direction.
    pub block_by_obstacle: bool,
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            can_jump: false,
            must_be_empty: true,
            only_dark_tiles: false,
            block_by_obstacle: true,
        }
    }
}

/// Flags shaping an attack walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackOptions {
    pub requires_line_of_sight: bool,
    /// Group targets per direction instead of flattening them.
    pub directional: bool,
    pub only_dark_tiles: bool,
}

impl Default for AttackOptions {
    fn default() -> Self {
        Self {
            requires_line_of_sight: true,
            directional: false,
            only_dark_tiles: false,
        }
    }
}

/// Targets reached along a single direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectionalTargets {
    pub direction: Direction,
    pub targets: Vec<Position>,
}

/// Result of [`valid_attacks`], flat or grouped per direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttackTargets {
    Flat(Vec<Position>),
    /// Only directions with at least one target are listed.
    Directional(Vec<DirectionalTargets>),
}

impl AttackTargets {
    pub fn is_empty(&self) -> bool {
        match self {
            AttackTargets::Flat(targets) => targets.is_empty(),
            AttackTargets::Directional(groups) => groups.is_empty(),
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        match self {
            AttackTargets::Flat(targets) => targets.contains(&position),
            AttackTargets::Directional(groups) => {
                groups.iter().any(|group| group.targets.contains(&position))
            }
        }
    }

    pub fn into_positions(self) -> Vec<Position> {
        match self {
            AttackTargets::Flat(targets) => targets,
            AttackTargets::Directional(groups) => {
                groups.into_iter().flat_map(|group| group.targets).collect()
            }
        }
    }
}

/// Tiles reachable from `origin` following `pattern` up to `range` steps.
///
/// Per direction the walk stops at the board edge. Without `can_jump`, an
/// occupant before max range ends the direction; with it, occupants are
/// passed over but never landed on while `must_be_empty` holds.
pub fn valid_moves<V: BoardView + ?Sized>(
    view: &V,
    origin: Position,
    pattern: Pattern,
    owner: Side,
    range: u32,
    options: MoveOptions,
) -> Vec<Position> {
    let range = span(range);
    let mut positions = Vec::new();

    for &direction in pattern.directions(owner) {
        for distance in 1..=range {
            let position = origin.step(direction, distance);
            if !in_bounds(position) {
                break;
            }
            if options.only_dark_tiles && !view.is_dark(position) {
                continue;
            }

            let occupied = view.is_occupied(position);
            if !options.can_jump && options.block_by_obstacle && occupied && distance < range {
                break;
            }
            if options.must_be_empty && occupied {
                if options.can_jump {
                    continue;
                }
                break;
            }

            positions.push(position);
            if !options.can_jump && occupied {
                break;
            }
        }
    }

    positions
}

/// Opponent-occupied tiles attackable from `origin`.
///
/// With line of sight, the first occupant short of max range closes the
/// direction, but is itself a target when it belongs to the opponent.
pub fn valid_attacks<V: BoardView + ?Sized>(
    view: &V,
    origin: Position,
    pattern: Pattern,
    owner: Side,
    range: u32,
    options: AttackOptions,
) -> AttackTargets {
    let range = span(range);
    let mut flat = Vec::new();
    let mut grouped = Vec::new();

    for &direction in pattern.directions(owner) {
        let mut targets = Vec::new();

        for distance in 1..=range {
            let position = origin.step(direction, distance);
            if !in_bounds(position) {
                break;
            }
            if options.only_dark_tiles && !view.is_dark(position) {
                continue;
            }

            let Some(occupant) = view.occupant_owner(position) else {
                continue;
            };
            if occupant != owner {
                targets.push(position);
            }
            if options.requires_line_of_sight && distance < range {
                break;
            }
        }

        if options.directional {
            if !targets.is_empty() {
                grouped.push(DirectionalTargets { direction, targets });
            }
        } else {
            flat.extend(targets);
        }
    }

    if options.directional {
        AttackTargets::Directional(grouped)
    } else {
        AttackTargets::Flat(flat)
    }
}
