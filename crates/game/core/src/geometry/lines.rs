use super::{BoardView, Direction, Pattern, Position, Side, in_bounds, span};

/// Occupied tile found by a line scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineHit {
    pub position: Position,
    pub direction: Direction,
    pub distance: i32,
}

/// In-bounds tiles covered by `pattern` up to `range`, ignoring occupancy.
pub fn area_positions(center: Position, pattern: Pattern, owner: Side, range: u32) -> Vec<Position> {
    let range = span(range);
    pattern
        .directions(owner)
        .iter()
        .flat_map(|&direction| (1..=range).map(move |distance| center.step(direction, distance)))
        .filter(|&position| in_bounds(position))
        .collect()
}

/// Every occupied tile along each direction up to `max_range`.
///
/// Occupants do not stop the scan; only the board edge does.
pub fn line_positions<V: BoardView + ?Sized>(
    view: &V,
    origin: Position,
    pattern: Pattern,
    owner: Side,
    max_range: u32,
) -> Vec<LineHit> {
    let max_range = span(max_range);
    let mut hits = Vec::new();

    for &direction in pattern.directions(owner) {
        for distance in 1..=max_range {
            let position = origin.step(direction, distance);
            if !in_bounds(position) {
                break;
            }
            if view.is_occupied(position) {
                hits.push(LineHit {
                    position,
                    direction,
                    distance,
                });
            }
        }
    }

    hits
}

/// Where a unit at `target` ends up when pulled back against `direction`.
///
/// `direction` points from the puller towards the target. The target slides
/// one tile at a time, stopping before the board edge or any occupant.
pub fn pull_destination<V: BoardView + ?Sized>(
    view: &V,
    target: Position,
    direction: Direction,
    max_distance: i32,
) -> Position {
    let back = direction.reversed();
    let mut destination = target;

    for _ in 0..max_distance {
        let next = destination.step(back, 1);
        if !in_bounds(next) || view.is_occupied(next) {
            break;
        }
        destination = next;
    }

    destination
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::testing::SparseBoard;

    #[test]
    fn area_ignores_occupancy_and_clips_edges() {
        let area = area_positions(Position::new(0, 0), Pattern::Surrounding, Side::Blue, 1);
        assert_eq!(area.len(), 3);

        let area = area_positions(Position::new(5, 3), Pattern::Lateral, Side::Red, 3);
        assert_eq!(area.len(), 12);
    }

    #[test]
    fn line_scan_reports_every_occupant_with_distance() {
        let board = SparseBoard::default()
            .with(3, 3, Side::Blue)
            .with(3, 5, Side::Red)
            .with(3, 7, Side::Blue);
        let hits = line_positions(&board, Position::new(3, 3), Pattern::Lateral, Side::Blue, 10);

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].position, Position::new(3, 5));
        assert_eq!(hits[0].distance, 2);
        assert_eq!(hits[1].direction, Direction::RIGHT);
        assert_eq!(hits[1].distance, 4);
    }

    #[test]
    fn pull_stops_next_to_puller() {
        let board = SparseBoard::default()
            .with(2, 2, Side::Blue)
            .with(2, 4, Side::Red);
        let destination = pull_destination(&board, Position::new(2, 4), Direction::RIGHT, 2);
        assert_eq!(destination, Position::new(2, 3));
    }

    #[test]
    fn pull_with_blocked_path_returns_origin() {
        let board = SparseBoard::default()
            .with(2, 2, Side::Blue)
            .with(2, 3, Side::Red);
        let destination = pull_destination(&board, Position::new(2, 3), Direction::RIGHT, 2);
        assert_eq!(destination, Position::new(2, 3));
    }

    #[test]
    fn pull_travels_full_distance_over_open_ground() {
        let board = SparseBoard::default()
            .with(0, 0, Side::Blue)
            .with(6, 0, Side::Red);
        let destination = pull_destination(&board, Position::new(6, 0), Direction::DOWN, 2);
        assert_eq!(destination, Position::new(4, 0));
    }
}
