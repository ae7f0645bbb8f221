// src/bin/check_feeds.rs
use pnl_dashboard::services::feeds::{load_config_feed, load_data_feed, FeedSettings};
use pnl_dashboard::services::dashboard::{build_dashboard, filter_options};
use pnl_dashboard::services::feeds::load_dashboard_data;
use pnl_dashboard::BoxError;
use log::{info, error, warn};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenv().ok();
    env_logger::init();

    info!("Checking sheet feeds...");
    let settings = FeedSettings::from_env();
    let client = reqwest::Client::new();

    // Hit each feed directly first so failures show up instead of being masked by fallbacks
    match &settings.data_csv_url {
        Some(url) => match load_data_feed(&client, url).await {
            Ok(records) => {
                info!("✓ Data feed parsed {} day records", records.len());
                if let (Some(first), Some(last)) = (records.first(), records.last()) {
                    info!("  First: day {} {} {} revenue {}", first.day, first.month, first.year, first.revenue);
                    info!("  Last:  day {} {} {} revenue {}", last.day, last.month, last.year, last.revenue);
                }
            }
            Err(e) => error!("✗ Data feed failed: {:#}", e),
        },
        None => warn!("DATA_CSV_URL not set"),
    }

    match &settings.config_csv_url {
        Some(url) => match load_config_feed(&client, url).await {
            Ok(config) => info!("✓ Config feed: {:?}", config),
            Err(e) => error!("✗ Config feed failed: {:#}", e),
        },
        None => warn!("CONFIG_CSV_URL not set"),
    }

    let load = load_dashboard_data(&client, &settings).await;
    let options = filter_options(&load);
    info!("Source: {:?}, months {:?}, years {:?}", load.source, options.months, options.years);

    let dashboard = build_dashboard(&load, &load.default_selection, load.config.fee_pct);
    info!(
        "{} {}: {} days, {} weeks",
        dashboard.selection.month,
        dashboard.selection.year,
        dashboard.days.len(),
        dashboard.weeks.len()
    );
    println!("{}", serde_json::to_string_pretty(&dashboard.totals)?);

    Ok(())
}
