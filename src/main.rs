use dotenv::dotenv;
use log::{info, warn};
use warp::Filter;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use pnl_dashboard::routes;
use pnl_dashboard::services::feeds::{load_dashboard_data, FeedSettings};

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    let port_str = env::var("PORT").unwrap_or_else(|_| {
        warn!("$PORT not set, defaulting to 3030");
        "3030".to_string()
    });

    let port: u16 = port_str.parse().expect("PORT must be a number");
    info!("Using PORT: {}", port);

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    info!("Will bind to: {}", addr);

    // Single load cycle; every request recomputes from this snapshot.
    let settings = FeedSettings::from_env();
    let client = reqwest::Client::new();
    let load = Arc::new(load_dashboard_data(&client, &settings).await);
    info!(
        "Loaded {} records from {:?} source for store {:?}",
        load.records.len(),
        load.source,
        load.config.store_name
    );

    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET"]);

    let api = routes::routes(load).with(cors);
    info!("Routes configured successfully with CORS.");

    info!("Starting server on {}", addr);
    warp::serve(api)
        .run(addr)
        .await;
}
