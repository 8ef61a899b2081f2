//! Stable textual board dump.
//!
//! ```text
//!    1 2 3 4 5 6 7 8
//! A  . . . V . . . .
//! ...
//! J  . . . v . . . .
//! ```
//!
//! Every line ends with `\n` and every cell is followed by one space. A cell
//! shows the first letter of the occupant's name, uppercase for Blue and
//! lowercase for Red, or `.` when empty.
use std::fmt::Write as _;

use super::{MatchState, Position, Side};
use crate::config::GameConfig;
use crate::unit::UnitRegistry;

const HEADER: &str = "   1 2 3 4 5 6 7 8";
const ROW_LABELS: [char; 10] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J'];
const EMPTY: char = '.';

/// One occupied cell recovered from a dump.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct DumpCell {
    pub position: Position,
    /// Glyph as it would be rendered for its owner.
    pub glyph: char,
    pub side: Side,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DumpParseError {
    #[error("expected header {HEADER:?}, found {found:?}")]
    Header { found: String },

    #[error("expected {expected} board rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {line}: expected label {expected:?}")]
    RowLabel { line: usize, expected: char },

    #[error("row {line}: malformed cell at column {col}")]
    Cell { line: usize, col: usize },
}

pub struct BoardDump;

impl BoardDump {
    /// Renders the occupant grid.
    pub fn render(state: &MatchState, registry: &UnitRegistry) -> String {
        let mut out = String::with_capacity(32 * 11);
        out.push_str(HEADER);
        out.push('\n');

        for (row, label) in (0..GameConfig::ROWS).zip(ROW_LABELS) {
            out.push(label);
            out.push_str("  ");
            for col in 0..GameConfig::COLS {
                let glyph = state
                    .unit_at(Position::new(row, col))
                    .map(|unit| {
                        let letter = registry
                            .get(&unit.definition)
                            .map(|definition| definition.glyph())
                            .unwrap_or('?');
                        cased(letter, unit.owner)
                    })
                    .unwrap_or(EMPTY);
                out.push(glyph);
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }

    /// Unit roll-call and hands, printed after the grid by debugging tools.
    pub fn render_details(state: &MatchState, registry: &UnitRegistry) -> String {
        let mut out = String::from("Units:\n");
        for unit in state.units() {
            let (name, cost) = registry
                .get(&unit.definition)
                .map(|definition| (definition.name.as_str(), definition.cost))
                .unwrap_or((unit.definition.as_str(), 0));
            let _ = writeln!(
                out,
                "[{}] {} ({}) - Cost: {}",
                unit.position, name, unit.owner, cost
            );
        }

        out.push_str("Hands:\n");
        for side in Side::ALL {
            let names: Vec<&str> = state
                .player(side)
                .hand
                .iter()
                .map(|card| {
                    registry
                        .get(card)
                        .map(|definition| definition.name.as_str())
                        .unwrap_or(card.as_str())
                })
                .collect();
            let hand = if names.is_empty() {
                "(empty)".to_owned()
            } else {
                names.join(", ")
            };
            let _ = writeln!(out, "{}: {}", side.to_string().to_uppercase(), hand);
        }

        out
    }

    /// Recovers the occupant layout from a rendered grid.
    pub fn parse(text: &str) -> Result<Vec<DumpCell>, DumpParseError> {
        let mut lines = text.lines();
        let header = lines.next().unwrap_or_default();
        if header != HEADER {
            return Err(DumpParseError::Header {
                found: header.to_owned(),
            });
        }

        let rows: Vec<&str> = lines.filter(|line| !line.is_empty()).collect();
        if rows.len() != ROW_LABELS.len() {
            return Err(DumpParseError::RowCount {
                expected: ROW_LABELS.len(),
                found: rows.len(),
            });
        }

        let mut cells = Vec::new();
        for ((row, line), label) in (0..GameConfig::ROWS).zip(rows).zip(ROW_LABELS) {
            let line_no = usize::try_from(row).unwrap_or_default() + 2;
            let mut chars = line.chars();
            if chars.next() != Some(label) || chars.next() != Some(' ') || chars.next() != Some(' ') {
                return Err(DumpParseError::RowLabel {
                    line: line_no,
                    expected: label,
                });
            }

            for col in 0..GameConfig::COLS {
                let col_no = usize::try_from(col).unwrap_or_default() + 1;
                let glyph = chars.next().ok_or(DumpParseError::Cell {
                    line: line_no,
                    col: col_no,
                })?;
                // the trailing space of the last cell may have been trimmed
                match chars.next() {
                    Some(' ') => {}
                    None if col == GameConfig::COLS - 1 => {}
                    _ => {
                        return Err(DumpParseError::Cell {
                            line: line_no,
                            col: col_no,
                        });
                    }
                }
                if glyph == ' ' {
                    return Err(DumpParseError::Cell {
                        line: line_no,
                        col: col_no,
                    });
                }
                if glyph == EMPTY {
                    continue;
                }

                let side = if glyph.is_lowercase() {
                    Side::Red
                } else {
                    Side::Blue
                };
                cells.push(DumpCell {
                    position: Position::new(row, col),
                    glyph,
                    side,
                });
            }
        }

        Ok(cells)
    }

    /// Occupant layout of a live state in the same shape `parse` returns.
    pub fn layout(state: &MatchState, registry: &UnitRegistry) -> Vec<DumpCell> {
        let mut cells: Vec<DumpCell> = state
            .units()
            .map(|unit| {
                let letter = registry
                    .get(&unit.definition)
                    .map(|definition| definition.glyph())
                    .unwrap_or('?');
                DumpCell {
                    position: unit.position,
                    glyph: cased(letter, unit.owner),
                    side: unit.owner,
                }
            })
            .collect();
        cells.sort_by_key(|cell| cell.position);
        cells
    }
}

fn cased(letter: char, owner: Side) -> char {
    match owner {
        Side::Blue => letter.to_uppercase().next().unwrap_or(letter),
        Side::Red => letter.to_lowercase().next().unwrap_or(letter),
    }
}
