use std::net::SocketAddr;

use pnl_dashboard::models::{DataSource, StoreConfig};
use pnl_dashboard::services::demo::demo_records;
use pnl_dashboard::services::feeds::{load_dashboard_data, load_data_feed, FeedSettings};
use reqwest::Client;
use warp::http::StatusCode;
use warp::Filter;

const DATA_CSV: &str = "\
Clarendale Daily P&L,,,,,,
Week,Month,Year,Day,Revenue,Profit,COG %,Adspend,Refunds,Tips
Week 1,February,2026,1,\"$1,000\",100,,300,0,
Week 1,February,2026,2,\"$2,000\",200,25%,600,10,
Week 1,February,2026,Total,\"$3,000\",300,,900,10,
";

const CONFIG_CSV: &str = "\
Setting,Value
Fee %,10
Store Name,\"Clarendale, Ltd\"
Currency,€
";

/// Serve the fixtures on an ephemeral port: `/data`, `/config`, `/broken`, `/empty`.
fn spawn_sheet_server() -> SocketAddr {
    let data = warp::path("data").map(|| DATA_CSV);
    let config = warp::path("config").map(|| CONFIG_CSV);
    let broken = warp::path("broken")
        .map(|| warp::reply::with_status("boom", StatusCode::INTERNAL_SERVER_ERROR));
    let empty = warp::path("empty").map(|| "nothing,to,see\n1,2,3\n");

    let routes = data.or(config).or(broken).or(empty);
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}

fn url(addr: SocketAddr, path: &str) -> Option<String> {
    Some(format!("http://{}/{}", addr, path))
}

#[tokio::test]
async fn live_feeds_load() {
    let addr = spawn_sheet_server();
    let settings = FeedSettings::new(url(addr, "data"), url(addr, "config"));

    let load = load_dashboard_data(&Client::new(), &settings).await;

    assert_eq!(load.source, DataSource::Live);
    assert_eq!(load.records.len(), 2);
    assert_eq!(load.records[1].revenue, 2000.0);
    assert_eq!(load.records[1].cog_pct, Some(25.0));
    assert_eq!(load.config.fee_pct, 10.0);
    assert_eq!(load.config.store_name, "Clarendale, Ltd");
    assert_eq!(load.config.currency, "€");
}

#[tokio::test]
async fn http_error_falls_back_to_demo() {
    let addr = spawn_sheet_server();
    let settings = FeedSettings::new(url(addr, "broken"), url(addr, "broken"));

    let load = load_dashboard_data(&Client::new(), &settings).await;

    assert_eq!(load.source, DataSource::Demo);
    assert_eq!(load.records, demo_records());
    assert_eq!(load.config, StoreConfig::default());
}

#[tokio::test]
async fn sheet_without_rows_is_an_error() {
    let addr = spawn_sheet_server();
    let client = Client::new();

    let result = load_data_feed(&client, &format!("http://{}/empty", addr)).await;
    assert!(result.is_err());

    let settings = FeedSettings::new(url(addr, "empty"), url(addr, "config"));
    let load = load_dashboard_data(&client, &settings).await;
    assert_eq!(load.source, DataSource::Demo);
    assert_eq!(load.config.fee_pct, 10.0);
}

#[tokio::test]
async fn unreachable_host_falls_back_to_demo() {
    // Nothing listens on port 9 locally
    let settings = FeedSettings::new(
        Some("http://127.0.0.1:9/data".to_string()),
        None,
    );
    let load = load_dashboard_data(&Client::new(), &settings).await;
    assert_eq!(load.source, DataSource::Demo);
}
