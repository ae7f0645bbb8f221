// src/services/store_config.rs
use log::debug;

use crate::models::StoreConfig;
use crate::services::parse::{clean_num, parse_row};

/// Apply the key/value rows of the config sheet on top of `base`.
///
/// Keys match by case-insensitive substring. Unknown keys, blank values and
/// unparseable fees leave the existing value in place.
pub fn parse_config_csv(text: &str, base: StoreConfig) -> StoreConfig {
    let mut config = base;

    for row in text.lines().map(parse_row) {
        let key = row.first().map(|k| k.to_lowercase()).unwrap_or_default();
        let value = row.get(1).map(|v| v.trim()).unwrap_or("");

        if key.contains("fee") {
            if let Some(fee) = clean_num(Some(value)) {
                debug!("Config fee: {}", fee);
                config.fee_pct = fee;
            }
        }
        if key.contains("store") && !value.is_empty() {
            config.store_name = value.to_string();
        }
        if key.contains("curr") && !value.is_empty() {
            config.currency = value.to_string();
        }
    }

    config
}
