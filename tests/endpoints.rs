use actix_web::{test, App};
use xcover_be::controller::{self, LatinEntry, Response, SudokuEntry};
use xcover_be::grid;

/// `/sudoku/enumerate` with no body enumerates completions of the empty
/// board, honoring the `limit` query parameter.
#[actix_web::test]
async fn enumerates_sudoku_completions_up_to_the_limit() {
    let app = test::init_service(App::new().service(controller::enumerate_sudoku)).await;

    let req = test::TestRequest::post()
        .uri("/sudoku/enumerate?limit=5")
        .to_request();
    let res: Response<SudokuEntry> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(res.data.len(), 5);
    for entry in &res.data {
        let decoded = xcover_be::sudoku::SudokuSolver::parse_digits(&entry.grid).unwrap();
        assert!(grid::is_sudoku(&decoded, None));
    }
}

/// `/latin/enumerate` requires either an explicit `order` or a grid to
/// infer it from; given neither, it's a 400.
#[actix_web::test]
async fn enumerate_latin_requires_order_or_grid() {
    let app = test::init_service(App::new().service(controller::enumerate_latin)).await;

    let req = test::TestRequest::post().uri("/latin/enumerate").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
}

/// `/latin/enumerate?order=4&limit=10` returns 10 distinct, valid order-4
/// Latin squares.
#[actix_web::test]
async fn enumerates_order_four_latin_squares() {
    let app = test::init_service(App::new().service(controller::enumerate_latin)).await;

    let req = test::TestRequest::post()
        .uri("/latin/enumerate?order=4&limit=10")
        .to_request();
    let res: Response<LatinEntry> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(res.data.len(), 10);

    let mut seen = std::collections::HashSet::new();
    for entry in &res.data {
        assert!(grid::is_latin(&entry.grid, None));
        assert!(seen.insert(entry.grid.clone()), "enumeration yielded a duplicate");
    }
}

/// `/latin/enumerate` infers the order from a supplied partial grid when
/// `order` is omitted.
#[actix_web::test]
async fn enumerate_latin_infers_order_from_the_grid() {
    let app = test::init_service(App::new().service(controller::enumerate_latin)).await;

    let payload = LatinEntry {
        grid: vec![vec![1, 0], vec![0, 0]],
    };
    let req = test::TestRequest::post()
        .uri("/latin/enumerate?limit=2")
        .set_json(payload)
        .to_request();
    let res: Response<LatinEntry> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(res.data.len(), 2);
    for entry in &res.data {
        assert_eq!(entry.grid[0][0], 1);
    }
}
