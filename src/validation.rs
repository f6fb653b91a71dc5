//! Request validation shared by every HTTP handler: a compiled-once regex
//! for the Sudoku digit-string wire form, plus the grid-shape/constraint
//! checks already used by the solver façades.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::grid::{self, Grid};

/// Exactly 81 ASCII digits, the flattened Sudoku wire form. Compiled once
/// and reused across requests, mirroring the host's existing use of
/// `once_cell` for process-wide compiled regexes.
static SUDOKU_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{81}$").unwrap());

/// Parses `raw` if it is syntactically a Sudoku digit string (81 digits)
/// whose clues also satisfy the basic row/column/zone constraints, handing
/// the already-parsed grid back so callers don't have to parse it again.
/// Checked before the request ever reaches the encoder, so a malformed or
/// contradictory clue set never starts a solve.
pub fn parse_valid_sudoku_digits(raw: &str) -> Option<Grid> {
    if !SUDOKU_DIGITS.is_match(raw) {
        return None;
    }

    let grid = crate::sudoku::SudokuSolver::parse_digits(raw).ok()?;
    if grid::is_sudoku(&grid, None) {
        Some(grid)
    } else {
        None
    }
}

/// `true` iff `grid` has the given `order` and its non-zero clues satisfy
/// the Latin-square row/column constraints.
pub fn is_valid_latin_grid(grid: &Grid, order: usize) -> bool {
    grid::validate_shape(grid, order).is_ok() && grid::is_latin(grid, None)
}
