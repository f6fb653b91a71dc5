use std::error::Error;
use std::fmt;

/// The three error kinds the solver surface can produce.
///
/// `NoSolution` is deliberately not a variant here: it is not an error, it is
/// the normal `None`/empty result of an exhausted search (see `solve` and
/// `enumerate` in [`crate::latin`] and [`crate::sudoku`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// Dimensions mismatch or a cell value outside `[0, n]`.
    InvalidGrid(String),
    /// A candidate lookup or link invariant failed. Must never happen on
    /// valid input; surfaced instead of silently producing a wrong answer.
    Internal(String),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::InvalidGrid(msg) => write!(f, "invalid grid: {}", msg),
            SolveError::Internal(msg) => write!(f, "internal solver error: {}", msg),
        }
    }
}

impl Error for SolveError {}
