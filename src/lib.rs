pub mod controller;
pub mod dlx;
pub mod error;
pub mod grid;
pub mod latin;
pub mod middleware;
pub mod problem;
pub mod sudoku;
pub mod validation;

// Necessary to export the modules to be integration tested in 'tests'
