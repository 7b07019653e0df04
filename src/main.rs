//! Snake arena server entry point.
//!
//! Starts the GameManager actor (rooms, scheduler, broadcast) and serves the
//! player WebSocket endpoint.

use actix::Actor;
use actix_web::{web, App, HttpServer};
use log::info;

use config::server::{BIND_HOST, BIND_PORT};
use server::game_session::GameManager;

pub mod config;
mod server;
mod game;


#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Logger from RUST_LOG, defaulting to info.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // One manager owns every room and drives the shared tick.
    let game_manager = GameManager::new().start();

    let state = web::Data::new(server::state::AppState::new(game_manager));

    info!("[Server] Listening on {}:{}", BIND_HOST, BIND_PORT);
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*"))
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind((BIND_HOST, BIND_PORT))?
    .run()
    .await
}
