mod board;
mod common;
mod player;
mod turn;
mod unit;

pub use board::{Board, Tile, Zone, in_bounds, is_dark};
pub use common::{Direction, InstanceId, Position, Side};
pub use player::PlayerState;
pub use turn::{Phase, TurnState};
pub use unit::{TurnFlags, UnitState};
