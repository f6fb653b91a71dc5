use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use xcover_be::latin::LatinSolver;
use xcover_be::sudoku::SudokuSolver;

const EASY_SUDOKU: &str =
    "002030008000600025001007000000004070050802000090000040700900010000071000000300000";
const HARD_SUDOKU: &str =
    "800000000003600000070090200050007000000045700000100030001000068008500010090000400";

fn latin_inputs() -> Vec<(&'static str, Vec<Vec<usize>>)> {
    vec![
        ("order-4-empty", vec![vec![0; 4]; 4]),
        (
            "order-8-partial",
            vec![
                vec![3, 0, 5, 0, 7, 0, 1, 0],
                vec![7, 0, 0, 6, 0, 1, 0, 3],
                vec![0, 1, 0, 7, 0, 0, 3, 0],
                vec![8, 0, 6, 0, 0, 0, 0, 2],
                vec![0, 0, 0, 0, 0, 8, 4, 0],
                vec![0, 3, 0, 0, 6, 0, 0, 4],
                vec![1, 0, 8, 0, 0, 4, 0, 0],
                vec![0, 8, 0, 0, 1, 0, 5, 6],
            ],
        ),
    ]
}

/// Compares solving a batch of fixed Sudoku puzzles against solving a batch
/// of Latin squares, grouped by `BenchmarkId` per input the way the host
/// compared solver configurations.
fn bench_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("Solvers");

    for (label, raw) in [("easy", EASY_SUDOKU), ("hard", HARD_SUDOKU)] {
        let parsed = SudokuSolver::parse_digits(raw).unwrap();
        group.bench_with_input(BenchmarkId::new("sudoku", label), &parsed, |b, grid| {
            b.iter(|| SudokuSolver::solve(black_box(grid)).unwrap())
        });
    }

    for (label, grid) in latin_inputs() {
        group.bench_with_input(BenchmarkId::new("latin", label), &grid, |b, grid| {
            b.iter(|| LatinSolver::solve(black_box(grid)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_solvers);
criterion_main!(benches);
