// src/services/feeds.rs
use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Utc};
use log::{error, info, warn};
use reqwest::Client;
use std::env;

use crate::models::{DataSource, DayRecord, LoadResult, Selection, StoreConfig};
use crate::services::dashboard::MONTH_NAMES;
use crate::services::demo::{demo_records, demo_selection};
use crate::services::records::parse_data_csv;
use crate::services::store_config::parse_config_csv;

/// Placeholder prefix left in unconfigured sheet URLs.
const PLACEHOLDER_PREFIX: &str = "YOUR_";

#[derive(Debug, Clone, Default)]
pub struct FeedSettings {
    pub data_csv_url: Option<String>,
    pub config_csv_url: Option<String>,
}

fn configured(url: Option<String>) -> Option<String> {
    url.map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty() && !u.starts_with(PLACEHOLDER_PREFIX))
}

impl FeedSettings {
    pub fn new(data_csv_url: Option<String>, config_csv_url: Option<String>) -> Self {
        FeedSettings {
            data_csv_url: configured(data_csv_url),
            config_csv_url: configured(config_csv_url),
        }
    }

    /// Read `DATA_CSV_URL` and `CONFIG_CSV_URL` from the environment.
    pub fn from_env() -> Self {
        Self::new(env::var("DATA_CSV_URL").ok(), env::var("CONFIG_CSV_URL").ok())
    }
}

pub async fn fetch_csv(client: &Client, url: &str) -> Result<String> {
    info!("Fetching CSV from URL: {}", url);
    let text = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("request to {} failed", url))?
        .error_for_status()
        .with_context(|| format!("{} returned an error status", url))?
        .text()
        .await
        .with_context(|| format!("reading body from {} failed", url))?;
    Ok(text)
}

/// Fetch and parse the daily data sheet. A sheet with no usable rows is an error.
pub async fn load_data_feed(client: &Client, url: &str) -> Result<Vec<DayRecord>> {
    let text = fetch_csv(client, url).await?;
    let records = parse_data_csv(&text);
    if records.is_empty() {
        return Err(anyhow!("data feed at {} produced no day records", url));
    }
    Ok(records)
}

pub async fn load_config_feed(client: &Client, url: &str) -> Result<StoreConfig> {
    let text = fetch_csv(client, url).await?;
    Ok(parse_config_csv(&text, StoreConfig::default()))
}

/// Selection shown on a fresh live load: the current calendar month.
pub fn current_selection() -> Selection {
    let now = Utc::now();
    Selection {
        month: MONTH_NAMES[now.month0() as usize].to_string(),
        year: now.year().to_string(),
    }
}

/// One load cycle: both feeds fetched concurrently, each with its fallback.
///
/// Never fails. A missing or broken data feed yields demo data, a missing or
/// broken config feed yields the default store settings.
pub async fn load_dashboard_data(client: &Client, settings: &FeedSettings) -> LoadResult {
    let data = async {
        match &settings.data_csv_url {
            Some(url) => load_data_feed(client, url).await.map(Some),
            None => Ok(None),
        }
    };
    let config = async {
        match &settings.config_csv_url {
            Some(url) => load_config_feed(client, url).await.map(Some),
            None => Ok(None),
        }
    };
    let (data, config) = tokio::join!(data, config);

    let config = match config {
        Ok(Some(config)) => {
            info!("Loaded store config: {:?}", config);
            config
        }
        Ok(None) => {
            info!("CONFIG_CSV_URL not configured, using default store settings");
            StoreConfig::default()
        }
        Err(e) => {
            warn!("Config feed failed, using default store settings: {:#}", e);
            StoreConfig::default()
        }
    };

    let loaded_year = Utc::now().year();
    match data {
        Ok(Some(records)) => {
            info!("Loaded {} live day records", records.len());
            LoadResult {
                records,
                source: DataSource::Live,
                config,
                default_selection: current_selection(),
                loaded_year,
            }
        }
        other => {
            match other {
                Err(e) => error!("Data feed failed, falling back to demo data: {:#}", e),
                _ => warn!("DATA_CSV_URL not configured, using demo data"),
            }
            LoadResult {
                records: demo_records(),
                source: DataSource::Demo,
                config,
                default_selection: demo_selection(),
                loaded_year,
            }
        }
    }
}
