use crate::auth::AuthEvent;
use crate::config::AppConfig;
use crate::db::init_db;
use crate::router::handle;
use crate::sources::ApifyClient;
use crate::state::AppState;
use astra::Server;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod aggregate;
mod auth;
mod config;
mod db;
mod domain;
mod errors;
mod forms;
mod responses;
mod router;
mod sources;
mod state;
mod storage;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,listings_site=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    if config.apify_token.is_none() {
        warn!("APIFY_TOKEN is not set; external listings will be unavailable");
    }

    let addr: SocketAddr = match config.bind_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(bind_addr = %config.bind_addr, "invalid bind address: {e}");
            std::process::exit(1);
        }
    };

    let external = match ApifyClient::new(&config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("failed to build listings client: {e}");
            std::process::exit(1);
        }
    };

    let max_workers = config.max_workers;
    let state = AppState::new(config, external);

    if let Err(e) = init_db(&state.db) {
        error!("database initialization failed: {e}");
        std::process::exit(1);
    }

    // Auth state changes are only logged for now.
    let _auth_log = state.auth_events.subscribe(|event| match event {
        AuthEvent::SignedIn { user_id } => info!(user_id, "auth: signed in"),
        AuthEvent::SignedUp { user_id, role } => info!(user_id, %role, "auth: signed up"),
        AuthEvent::SignedOut { user_id } => info!(user_id, "auth: signed out"),
    });

    info!("starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(max_workers);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    });

    if let Err(e) = result {
        error!("server ended with error: {e}");
    }

    info!("server shut down cleanly");
}
