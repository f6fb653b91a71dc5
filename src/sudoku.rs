//! Sudoku constraint model and solver façade.

use crate::dlx::Matrix;
use crate::error::SolveError;
use crate::grid::{self, Grid};
use crate::problem::{Candidate, Problem};

const ORDER: usize = 9;
const BOX: usize = 3;

/// Four constraint families: every cell holds some value, every row and
/// column contains each value once, and every 3x3 zone contains each value
/// once. Zone index is computed directly from `(r, c)` rather than parsed
/// out of a column name.
struct SudokuProblem;

impl SudokuProblem {
    fn cell_col(&self, r: usize, c: usize) -> usize {
        r * ORDER + c + 1
    }

    fn row_col(&self, r: usize, v: usize) -> usize {
        ORDER * ORDER + r * ORDER + (v - 1) + 1
    }

    fn col_col(&self, c: usize, v: usize) -> usize {
        2 * ORDER * ORDER + c * ORDER + (v - 1) + 1
    }

    fn zone_col(&self, r: usize, c: usize, v: usize) -> usize {
        let zone = BOX * (r / BOX) + (c / BOX);
        3 * ORDER * ORDER + zone * ORDER + (v - 1) + 1
    }
}

impl Problem for SudokuProblem {
    fn order(&self) -> usize {
        ORDER
    }

    fn num_columns(&self) -> usize {
        4 * ORDER * ORDER
    }

    fn candidates(&self) -> Vec<Candidate> {
        let mut out = Vec::with_capacity(ORDER * ORDER * ORDER);

        for r in 0..ORDER {
            for c in 0..ORDER {
                for v in 1..=ORDER {
                    out.push(Candidate::new(
                        r,
                        c,
                        v,
                        vec![
                            self.cell_col(r, c),
                            self.row_col(r, v),
                            self.col_col(c, v),
                            self.zone_col(r, c, v),
                        ],
                    ));
                }
            }
        }

        out
    }
}

/// Solves and enumerates standard 9x9 Sudoku boards.
pub struct SudokuSolver;

impl SudokuSolver {
    /// Returns the first completion of `grid` the search would yield, or
    /// `None` if the clues admit no solution. `grid` must be `9x9`.
    pub fn solve(grid: &Grid) -> Result<Option<Grid>, SolveError> {
        grid::validate_shape(grid, ORDER)?;

        let problem = SudokuProblem;
        let mut matrix = Matrix::build(&problem);
        let forced = matrix.seed(grid)?;

        Ok(matrix.solutions(forced).next().map(|cells| grid::decode(ORDER, &cells)))
    }

    /// Lazily enumerates every completion of the (possibly empty) `grid`.
    /// Bounded by the finite number of 9x9 Sudoku completions, but callers
    /// should still cap consumption for an empty or lightly-constrained
    /// board, since the full count is astronomically large.
    pub fn enumerate(grid: Option<&Grid>) -> Result<impl Iterator<Item = Grid>, SolveError> {
        let blank;
        let grid = match grid {
            Some(g) => {
                grid::validate_shape(g, ORDER)?;
                g
            }
            None => {
                blank = vec![vec![0; ORDER]; ORDER];
                &blank
            }
        };

        let problem = SudokuProblem;
        let mut matrix = Matrix::build(&problem);
        let forced = matrix.seed(grid)?;

        Ok(matrix.solutions(forced).map(|cells| grid::decode(ORDER, &cells)))
    }

    /// Parses the host's flattened 81-digit wire form (`0` = empty) into a
    /// dense `9x9` grid. Rejects anything that isn't exactly 81 ASCII digits.
    pub fn parse_digits(raw: &str) -> Result<Grid, SolveError> {
        let digits: Vec<usize> = raw
            .chars()
            .map(|ch| ch.to_digit(10).map(|d| d as usize))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| {
                SolveError::InvalidGrid(format!(
                    "expected {} ASCII digits, got non-digit input",
                    ORDER * ORDER
                ))
            })?;

        if digits.len() != ORDER * ORDER {
            return Err(SolveError::InvalidGrid(format!(
                "expected {} digits, got {}",
                ORDER * ORDER,
                digits.len()
            )));
        }

        Ok(digits.chunks(ORDER).map(|chunk| chunk.to_vec()).collect())
    }

    /// Renders a `9x9` grid back into the flattened digit-string wire form.
    pub fn to_digits(grid: &Grid) -> String {
        grid.iter()
            .flat_map(|row| row.iter())
            .map(|v| std::char::from_digit(*v as u32, 10).unwrap_or('0'))
            .collect()
    }
}
