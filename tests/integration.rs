use actix_web::{http::StatusCode, test, App};
use xcover_be::controller::{self, ErrorResponse, LatinEntry, Response, SudokuEntry};

const SOLVABLE: &str =
    "002030008000600025001007000000004070050802000090000040700900010000071000000300000";
const MALFORMED_CONTENTS: &str =
    "00080905160020000C30000000001000003008A90000000000040040003060B000051000000000000";
const MALFORMED_LENGTH: &str =
    "0008051600200000300000000010000030080900000000000400400030600000051000000000";
const DUPLICATE_CLUE: &str =
    "550000000000000000000000000000000000000000000000000000000000000000000000000000000";

/// A solvable Sudoku posted to `/sudoku/solve` comes back with HTTP 200 and
/// a completed grid embedded in the response body.
#[actix_web::test]
async fn solves_a_solvable_sudoku() {
    let app = test::init_service(App::new().service(controller::solve_sudoku)).await;

    let payload = vec![SudokuEntry {
        grid: SOLVABLE.to_owned(),
    }];
    let req = test::TestRequest::post()
        .uri("/sudoku/solve")
        .set_json(payload)
        .to_request();

    let res: Response<SudokuEntry> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(res.data.len(), 1);
    assert!(!res.data[0].grid.contains('0'));
}

/// Syntactically malformed payloads (wrong length or non-digit contents)
/// are rejected with a structured 400, never an internal error.
#[actix_web::test]
async fn rejects_malformed_digit_strings() {
    let app = test::init_service(App::new().service(controller::solve_sudoku)).await;

    for raw in [MALFORMED_CONTENTS, MALFORMED_LENGTH] {
        let payload = vec![SudokuEntry { grid: raw.to_owned() }];
        let req = test::TestRequest::post()
            .uri("/sudoku/solve")
            .set_json(payload)
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(res).await;
        assert_eq!(body.code, "400");
    }
}

/// A structurally valid but constraint-violating grid (duplicate clue in a
/// row) is also a 400, not a 500 or a silently-wrong solve.
#[actix_web::test]
async fn rejects_grids_with_duplicate_clues() {
    let app = test::init_service(App::new().service(controller::solve_sudoku)).await;

    let payload = vec![SudokuEntry {
        grid: DUPLICATE_CLUE.to_owned(),
    }];
    let req = test::TestRequest::post()
        .uri("/sudoku/solve")
        .set_json(payload)
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = test::read_body_json(res).await;
    assert_eq!(body.code, "400");
}

/// A solvable Latin square posted to `/latin/solve` comes back completed.
#[actix_web::test]
async fn solves_a_solvable_latin_square() {
    let app = test::init_service(App::new().service(controller::solve_latin)).await;

    let payload = LatinEntry {
        grid: vec![vec![1, 0], vec![0, 0]],
    };
    let req = test::TestRequest::post()
        .uri("/latin/solve")
        .set_json(payload)
        .to_request();

    let res: Response<LatinEntry> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(res.data.len(), 1);
    assert_eq!(res.data[0].grid, vec![vec![1, 2], vec![2, 1]]);
}

/// A Latin grid whose shape isn't square is rejected before it reaches the
/// encoder.
#[actix_web::test]
async fn rejects_a_non_square_latin_grid() {
    let app = test::init_service(App::new().service(controller::solve_latin)).await;

    let payload = LatinEntry {
        grid: vec![vec![1, 0], vec![0, 0], vec![0, 0]],
    };
    let req = test::TestRequest::post()
        .uri("/latin/solve")
        .set_json(payload)
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
