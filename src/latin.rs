//! Latin-square constraint model and solver façade.

use crate::dlx::Matrix;
use crate::error::SolveError;
use crate::grid::{self, Grid};
use crate::problem::{Candidate, Problem};

/// Three constraint families: every cell holds some value, every row
/// contains each value once, every column contains each value once.
struct LatinProblem {
    order: usize,
}

impl LatinProblem {
    fn new(order: usize) -> Self {
        Self { order }
    }

    fn cell_col(&self, r: usize, c: usize) -> usize {
        r * self.order + c + 1
    }

    fn row_col(&self, r: usize, v: usize) -> usize {
        self.order * self.order + r * self.order + (v - 1) + 1
    }

    fn col_col(&self, c: usize, v: usize) -> usize {
        2 * self.order * self.order + c * self.order + (v - 1) + 1
    }
}

impl Problem for LatinProblem {
    fn order(&self) -> usize {
        self.order
    }

    fn num_columns(&self) -> usize {
        3 * self.order * self.order
    }

    fn candidates(&self) -> Vec<Candidate> {
        let n = self.order;
        let mut out = Vec::with_capacity(n * n * n);

        for r in 0..n {
            for c in 0..n {
                for v in 1..=n {
                    out.push(Candidate::new(
                        r,
                        c,
                        v,
                        vec![self.cell_col(r, c), self.row_col(r, v), self.col_col(c, v)],
                    ));
                }
            }
        }

        out
    }
}

/// Solves and enumerates Latin squares of arbitrary order. Stateless: `order`
/// only matters for `enumerate` when no partial grid is given, since `solve`
/// always infers it from the input grid's side length.
pub struct LatinSolver;

impl LatinSolver {
    /// Returns the first completion of `grid` the search would yield, or
    /// `None` if the clues admit no solution. The order is `grid.len()`.
    pub fn solve(grid: &Grid) -> Result<Option<Grid>, SolveError> {
        let order = grid.len();
        grid::validate_shape(grid, order)?;

        let problem = LatinProblem::new(order);
        let mut matrix = Matrix::build(&problem);
        let forced = matrix.seed(grid)?;

        Ok(matrix.solutions(forced).next().map(|cells| grid::decode(order, &cells)))
    }

    /// Lazily enumerates every completion of `order`, optionally constrained
    /// by a partial `grid`. May be infinite for an unconstrained order, so the
    /// caller is responsible for bounding consumption.
    pub fn enumerate(
        order: usize,
        grid: Option<&Grid>,
    ) -> Result<impl Iterator<Item = Grid>, SolveError> {
        let blank;
        let grid = match grid {
            Some(g) => {
                grid::validate_shape(g, order)?;
                g
            }
            None => {
                blank = vec![vec![0; order]; order];
                &blank
            }
        };

        let problem = LatinProblem::new(order);
        let mut matrix = Matrix::build(&problem);
        let forced = matrix.seed(grid)?;

        Ok(matrix.solutions(forced).map(move |cells| grid::decode(order, &cells)))
    }
}
