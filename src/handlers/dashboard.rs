// src/handlers/dashboard.rs
use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::models::{LoadResult, Selection};
use crate::services::dashboard::{build_dashboard, filter_options};

pub const MAX_FEE_PCT: f64 = 30.0;
pub const FEE_STEP: f64 = 0.5;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub month: Option<String>,
    pub year: Option<String>,
    pub fee: Option<f64>,
}

/// A fee picked by the user must sit on the 0-30 % slider in 0.5 steps.
pub fn validate_fee(fee: f64) -> Result<f64, ApiError> {
    let on_step = (fee / FEE_STEP).fract() == 0.0;
    if fee.is_finite() && (0.0..=MAX_FEE_PCT).contains(&fee) && on_step {
        Ok(fee)
    } else {
        Err(ApiError::bad_request(format!(
            "fee must be between 0 and {} in steps of {}, got {}",
            MAX_FEE_PCT, FEE_STEP, fee
        )))
    }
}

pub async fn get_dashboard(query: DashboardQuery, load: Arc<LoadResult>) -> Result<Json, Rejection> {
    info!("Handling request to get dashboard: {:?}", query);

    let fee_pct = match query.fee {
        Some(fee) => validate_fee(fee).map_err(|e| {
            warn!("Rejecting dashboard request: {}", e);
            warp::reject::custom(e)
        })?,
        None => load.config.fee_pct,
    };

    let selection = Selection {
        month: query
            .month
            .unwrap_or_else(|| load.default_selection.month.clone()),
        year: query
            .year
            .unwrap_or_else(|| load.default_selection.year.clone()),
    };
    debug!("Resolved selection {:?} at fee {}", selection, fee_pct);

    let dashboard = build_dashboard(&load, &selection, fee_pct);
    Ok(warp::reply::json(&dashboard))
}

pub async fn get_filters(load: Arc<LoadResult>) -> Result<Json, Rejection> {
    info!("Handling request to get filter options");
    Ok(warp::reply::json(&filter_options(&load)))
}

pub async fn get_records(load: Arc<LoadResult>) -> Result<Json, Rejection> {
    info!("Handling request to get raw records ({})", load.records.len());
    Ok(warp::reply::json(&json!({
        "source": load.source,
        "records": load.records,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_fee_accepts_slider_values() {
        assert_eq!(validate_fee(0.0).unwrap(), 0.0);
        assert_eq!(validate_fee(8.5).unwrap(), 8.5);
        assert_eq!(validate_fee(30.0).unwrap(), 30.0);
    }

    #[test]
    fn test_validate_fee_rejects_off_slider() {
        assert!(validate_fee(-0.5).is_err());
        assert!(validate_fee(30.5).is_err());
        assert!(validate_fee(8.25).is_err());
        assert!(validate_fee(f64::NAN).is_err());
    }
}
