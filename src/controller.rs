//! HTTP handlers exposing the solver façades over JSON.
//!
//! Each handler validates its input (shape, charset, basic clue
//! constraints) before it ever reaches the encoder, and turns any solver
//! error into a structured [`ErrorResponse`] instead of a panic.

use std::time::Instant;

use actix_web::{post, web, HttpResponse, Responder};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::error::SolveError;
use crate::grid::Grid;
use crate::latin::LatinSolver;
use crate::sudoku::SudokuSolver;
use crate::validation;

#[derive(Debug, Serialize, Deserialize)]
pub struct SudokuEntry {
    pub grid: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LatinEntry {
    pub grid: Grid,
}

#[derive(Debug, Serialize)]
pub struct Response<T> {
    pub data: Vec<T>,
    pub total_cpu_ms: u128,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    fn body(status: &str, message: impl Into<String>) -> Self {
        Self {
            code: status.to_owned(),
            message: message.into(),
        }
    }
}

const SUDOKU_CONSTRAINT_MESSAGE: &str =
    "The entries must be syntactically valid and fulfill the basic Sudoku constraints";

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::body("400", message))
}

fn no_solution(message: impl Into<String>) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(ErrorResponse::body("422", message))
}

fn internal_error(err: SolveError) -> HttpResponse {
    error!("solver invariant violated: {}", err);
    HttpResponse::InternalServerError().json(ErrorResponse::body("500", "internal solver error"))
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Debug, Deserialize)]
pub struct LatinEnumerateQuery {
    pub order: Option<usize>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

/// `POST /sudoku/solve`, body `{"grid": "<81-char digit string>"}`.
#[post("/sudoku/solve")]
pub async fn solve_sudoku(entries: web::Json<Vec<SudokuEntry>>) -> impl Responder {
    let total = Instant::now();
    let mut data = Vec::with_capacity(entries.len());

    for entry in entries.iter() {
        debug!("Beginning to solve a new Sudoku");

        let grid = match validation::parse_valid_sudoku_digits(&entry.grid) {
            Some(grid) => grid,
            None => return bad_request(SUDOKU_CONSTRAINT_MESSAGE),
        };

        match SudokuSolver::solve(&grid) {
            Ok(Some(solved)) => data.push(SudokuEntry {
                grid: SudokuSolver::to_digits(&solved),
            }),
            Ok(None) => return no_solution("no completion exists for the given clues"),
            Err(err) => return internal_error(err),
        }
    }

    let total_cpu_ms = total.elapsed().as_millis();
    info!("Solved {} Sudoku entries in {} ms", entries.len(), total_cpu_ms);

    HttpResponse::Ok().json(Response { data, total_cpu_ms })
}

/// `POST /sudoku/enumerate?limit=N`, body optionally carries a partial
/// clue grid; an absent body enumerates the empty board.
#[post("/sudoku/enumerate")]
pub async fn enumerate_sudoku(
    query: web::Query<LimitQuery>,
    body: Option<web::Json<SudokuEntry>>,
) -> impl Responder {
    let total = Instant::now();

    let grid = match &body {
        Some(entry) => match validation::parse_valid_sudoku_digits(&entry.grid) {
            Some(grid) => Some(grid),
            None => return bad_request(SUDOKU_CONSTRAINT_MESSAGE),
        },
        None => None,
    };

    let solutions = match SudokuSolver::enumerate(grid.as_ref()) {
        Ok(iter) => iter,
        Err(err) => return bad_request(err.to_string()),
    };

    let data: Vec<SudokuEntry> = solutions
        .take(query.limit)
        .map(|grid| SudokuEntry {
            grid: SudokuSolver::to_digits(&grid),
        })
        .collect();

    let total_cpu_ms = total.elapsed().as_millis();
    info!("Enumerated {} Sudoku completions in {} ms", data.len(), total_cpu_ms);

    HttpResponse::Ok().json(Response { data, total_cpu_ms })
}

/// `POST /latin/solve`, body `{"grid": [[...]]}`, dense, `0` = empty.
#[post("/latin/solve")]
pub async fn solve_latin(entry: web::Json<LatinEntry>) -> impl Responder {
    let total = Instant::now();
    let order = entry.grid.len();

    if !validation::is_valid_latin_grid(&entry.grid, order) {
        return bad_request("the grid must be square and its clues free of row/column duplicates");
    }

    match LatinSolver::solve(&entry.grid) {
        Ok(Some(solved)) => {
            let total_cpu_ms = total.elapsed().as_millis();
            info!("Solved an order-{} Latin square in {} ms", order, total_cpu_ms);
            HttpResponse::Ok().json(Response {
                data: vec![LatinEntry { grid: solved }],
                total_cpu_ms,
            })
        }
        Ok(None) => no_solution("no completion exists for the given clues"),
        Err(err) => internal_error(err),
    }
}

/// `POST /latin/enumerate?order=N&limit=M`, body optionally carries a
/// partial clue grid of order `N`. `order` may be omitted when a grid is
/// given, since it is then inferred from the grid's side length.
#[post("/latin/enumerate")]
pub async fn enumerate_latin(
    query: web::Query<LatinEnumerateQuery>,
    body: Option<web::Json<LatinEntry>>,
) -> impl Responder {
    let total = Instant::now();

    let grid = body.map(|b| b.into_inner().grid);
    let order = match (query.order, &grid) {
        (Some(order), _) => order,
        (None, Some(grid)) => grid.len(),
        (None, None) => return bad_request("either 'order' or a grid must be supplied"),
    };

    if let Some(grid) = &grid {
        if !validation::is_valid_latin_grid(grid, order) {
            return bad_request("the grid must be square and its clues free of row/column duplicates");
        }
    }

    let solutions = match LatinSolver::enumerate(order, grid.as_ref()) {
        Ok(iter) => iter,
        Err(err) => return bad_request(err.to_string()),
    };

    let data: Vec<LatinEntry> = solutions
        .take(query.limit)
        .map(|grid| LatinEntry { grid })
        .collect();

    let total_cpu_ms = total.elapsed().as_millis();
    info!(
        "Enumerated {} order-{} Latin squares in {} ms",
        data.len(),
        order,
        total_cpu_ms
    );

    HttpResponse::Ok().json(Response { data, total_cpu_ms })
}
