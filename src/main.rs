use std::{env, io::Result};

use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{middleware::Logger, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::info;

use xcover_be::controller;
use xcover_be::middleware::{BURST_SIZE, REFILL_PER_SECOND};

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info")); // RUST_LOG

    let mode = env::var("MODE").unwrap_or("testing".to_owned());
    let host = if mode == "prod" {
        "0.0.0.0"
    } else {
        "127.0.0.1"
    };
    let port = env::var("PORT")
        .unwrap_or("8080".to_owned())
        .parse::<u16>()
        .expect("Failed to parse the host port number");

    let governor_conf = GovernorConfigBuilder::default()
        .per_second(REFILL_PER_SECOND)
        .burst_size(BURST_SIZE)
        .finish()
        .expect("rate limit configuration must be well-formed");

    info!("Starting a listener on {}:{}", host, port);

    // Only panics if no socket addresses were successfully bound or if no Tokio runtime is set up
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Governor::new(&governor_conf))
            .service(controller::solve_sudoku)
            .service(controller::enumerate_sudoku)
            .service(controller::solve_latin)
            .service(controller::enumerate_latin)
    })
    .bind((host, port))?
    .run()
    .await
}
