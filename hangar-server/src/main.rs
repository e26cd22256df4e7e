#![deny(missing_docs)]
//! Hangar server executable.
//!
//! Hosts the HTTP endpoints for the ship registry.

mod config;
mod db;
mod models;
mod openapi;
mod routes;
mod schema;
mod store;

#[cfg(not(test))]
use actix_cors::Cors;
#[cfg(not(test))]
use actix_web::{App, HttpServer, http::header, web};
#[cfg(not(test))]
use dotenvy::dotenv;
#[cfg(not(test))]
use std::sync::Arc;

#[cfg(not(test))]
use crate::config::{ServerConfig, StoreBackend};
#[cfg(not(test))]
use crate::db::init_pool;
#[cfg(not(test))]
use crate::routes::{AppState, SharedStore, configure};
#[cfg(not(test))]
use crate::store::PgShipStore;

#[cfg(not(test))]
fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;
    let store: SharedStore = match &config.store {
        StoreBackend::Postgres { database_url } => {
            let pool = init_pool(database_url).map_err(std::io::Error::other)?;
            log::info!("using PostgreSQL ship store");
            Arc::new(PgShipStore::new(pool))
        }
        StoreBackend::Memory => {
            log::warn!("using in-memory ship store; data will not survive a restart");
            Arc::new(hangar_core::InMemoryShipStore::new())
        }
    };
    log::info!("rating epoch is year {}", config.rating.current_year);
    let state = web::Data::new(AppState::new(store, config.rating));

    let allowed_origins = config.allowed_origins.clone();
    let listen_addr = config.host.clone();
    let listen_port = config.port;
    log::info!("listening on {listen_addr}:{listen_port}");

    actix_web::rt::System::new().block_on(async move {
        HttpServer::new(move || {
            let mut cors = Cors::default()
                .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
                .allowed_headers(vec![header::CONTENT_TYPE])
                .max_age(3600);
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            App::new()
                .wrap(actix_web::middleware::Logger::default())
                .wrap(cors)
                .app_data(state.clone())
                .configure(configure)
        })
        .bind((listen_addr, listen_port))?
        .run()
        .await
    })
}

#[cfg(test)]
fn main() {}
