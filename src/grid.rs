//! Grid validation helpers shared by the encoders, the HTTP layer, and the
//! test suite's property checks.

use std::collections::HashSet;
use std::hash::Hash;

use crate::error::SolveError;

pub type Grid = Vec<Vec<usize>>;

/// `true` iff `iter` contains no duplicate items (zero values are expected
/// to have already been filtered out by the caller where relevant).
pub fn has_unique_items<T>(iter: T) -> bool
where
    T: IntoIterator,
    T::Item: Eq + Hash,
{
    let mut seen = HashSet::new();
    iter.into_iter().all(move |x| seen.insert(x))
}

/// Checks that `grid` is `order x order` and every cell is in `[0, order]`.
pub fn validate_shape(grid: &Grid, order: usize) -> Result<(), SolveError> {
    if grid.len() != order {
        return Err(SolveError::InvalidGrid(format!(
            "expected {} rows, got {}",
            order,
            grid.len()
        )));
    }

    for (r, row) in grid.iter().enumerate() {
        if row.len() != order {
            return Err(SolveError::InvalidGrid(format!(
                "row {} has {} cells, expected {}",
                r,
                row.len(),
                order
            )));
        }

        for (c, &value) in row.iter().enumerate() {
            if value > order {
                return Err(SolveError::InvalidGrid(format!(
                    "cell ({}, {}) = {} is outside [0, {}]",
                    r, c, value, order
                )));
            }
        }
    }

    Ok(())
}

/// Decodes a solved set of `(row, col, value)` triples into a dense grid of
/// the given order. The cell-family constraint column guarantees each
/// `(row, col)` pair is written exactly once.
pub fn decode(order: usize, cells: &[(usize, usize, usize)]) -> Grid {
    let mut grid = vec![vec![0; order]; order];
    for &(r, c, v) in cells {
        grid[r][c] = v;
    }
    grid
}

fn check_row(grid: &Grid, row_idx: usize) -> bool {
    has_unique_items(grid[row_idx].iter().filter(|&&x| x != 0))
}

fn check_col(grid: &Grid, col_idx: usize) -> bool {
    has_unique_items(grid.iter().map(|row| row[col_idx]).filter(|&x| x != 0))
}

fn check_zone(grid: &Grid, box_row: usize, box_col: usize, zone: usize) -> bool {
    let cells = grid
        .iter()
        .skip(box_row * zone)
        .take(zone)
        .flat_map(|row| row.iter().skip(box_col * zone).take(zone))
        .filter(|&&x| x != 0);

    has_unique_items(cells)
}

/// Checks the Latin-square constraints (unique non-zero value per row and
/// per column) over the whole grid, or just around `pos` if given.
pub fn is_latin(grid: &Grid, pos: Option<(usize, usize)>) -> bool {
    match pos {
        Some((r, c)) => check_row(grid, r) && check_col(grid, c),
        None => {
            (0..grid.len()).all(|r| check_row(grid, r)) && (0..grid.len()).all(|c| check_col(grid, c))
        }
    }
}

/// Checks the full Sudoku constraint set (row, column, and 3x3 zone
/// uniqueness) over the whole grid, or just around `pos` if given.
pub fn is_sudoku(grid: &Grid, pos: Option<(usize, usize)>) -> bool {
    let zone = (grid.len() as f64).sqrt().round() as usize;

    match pos {
        Some((r, c)) => {
            check_row(grid, r) && check_col(grid, c) && check_zone(grid, r / zone, c / zone, zone)
        }
        None => {
            is_latin(grid, None)
                && (0..zone).all(|br| (0..zone).all(|bc| check_zone(grid, br, bc, zone)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_row_count() {
        let grid = vec![vec![0, 0], vec![0, 0], vec![0, 0]];
        assert!(validate_shape(&grid, 2).is_err());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let grid = vec![vec![0, 3], vec![0, 0]];
        assert!(validate_shape(&grid, 2).is_err());
    }

    #[test]
    fn accepts_a_well_formed_partial_grid() {
        let grid = vec![vec![1, 0], vec![0, 0]];
        assert!(validate_shape(&grid, 2).is_ok());
    }

    #[test]
    fn detects_duplicate_in_a_row() {
        let grid = vec![vec![1, 1], vec![0, 0]];
        assert!(!is_latin(&grid, None));
    }

    #[test]
    fn detects_duplicate_in_a_zone() {
        let mut grid = vec![vec![0; 9]; 9];
        grid[0][0] = 5;
        grid[1][1] = 5;
        assert!(!is_sudoku(&grid, None));
    }
}
