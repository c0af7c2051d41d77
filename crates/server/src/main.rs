mod api;
mod dto;
mod source;
mod state;

use crate::state::AppState;
use axum::routing::{get, post};
use pinpoints::prelude::Store;
use rand::{SeedableRng, rngs::StdRng};
use std::{sync::Arc, time::Instant};
use tracing::{error, info};

const PORT: u32 = 3000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let args: Vec<_> = std::env::args().collect();
    if args.len() < 3 {
        error!("Usage: pinpoints-server <resources> <users> [seed]");
        std::process::exit(1);
    }
    let seed: u64 = match args.get(3).map(|value| value.parse()) {
        Some(Ok(seed)) => seed,
        Some(Err(err)) => {
            error!("Invalid seed: {err}");
            std::process::exit(1);
        }
        None => rand::random(),
    };
    info!("Random seed {seed}");

    info!("Loading data...");
    let now = Instant::now();
    let data = match source::load(&args[1], &args[2]).await {
        Ok(data) => data,
        Err(err) => {
            error!("Failed to load seed data: {err}");
            std::process::exit(1);
        }
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let store = match Store::new().initialize(data.resources, data.users, &mut rng) {
        Ok(store) => store,
        Err(err) => {
            error!("Failed to initialize pinpoints: {err}");
            std::process::exit(1);
        }
    };
    info!(
        "Loaded {} pinpoints in {:?}",
        store.pinpoints().len(),
        now.elapsed()
    );
    let state = Arc::new(AppState::new(store, rng));

    let app = axum::Router::new()
        .route("/pinpoints", get(api::pinpoints))
        .route("/pinpoints/{id}", get(api::pinpoint))
        .route("/book/{ext_id}", post(api::book))
        .route("/unbook/{ext_id}", post(api::unbook))
        .route("/toggle/{ext_id}", post(api::toggle))
        .with_state(state);
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", PORT)).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {PORT}: {err}");
            std::process::exit(1);
        }
    };
    info!("Listening to port {PORT}");
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
    }
}
