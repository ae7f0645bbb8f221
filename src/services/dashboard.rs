// src/services/dashboard.rs
use log::info;

use crate::models::{Dashboard, FilterOptions, LoadResult, Selection, TrendLines};
use crate::services::aggregate::{month_changes, previous_totals, totals, weekly_summaries};
use crate::services::calculations::{distinct_labels, month_view, previous_month_view};
use crate::services::trend::linear_trend;

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Month and year choices for the selectors.
///
/// Falls back to the calendar months and a three-year window around the load
/// year when the sheet has no labels.
pub fn filter_options(load: &LoadResult) -> FilterOptions {
    let mut months = distinct_labels(load.records.iter().map(|r| r.month.as_str()));
    if months.is_empty() {
        months = MONTH_NAMES.iter().map(|m| m.to_string()).collect();
    }

    let mut years = distinct_labels(load.records.iter().map(|r| r.year.as_str()));
    if years.is_empty() {
        years = (load.loaded_year - 1..=load.loaded_year + 1)
            .map(|y| y.to_string())
            .collect();
    }

    FilterOptions {
        months,
        years,
        default_selection: load.default_selection.clone(),
    }
}

/// Build everything the presentation layer renders for one selection.
///
/// Pure in `(load, selection, fee_pct)`: the same inputs give the same payload.
pub fn build_dashboard(load: &LoadResult, selection: &Selection, fee_pct: f64) -> Dashboard {
    let days = month_view(&load.records, selection, fee_pct);
    let weeks = weekly_summaries(&days);
    let totals = totals(&days);

    let prev_days = previous_month_view(&load.records, selection, fee_pct);
    let previous_totals = previous_totals(&prev_days);
    let month_over_month = previous_totals
        .as_ref()
        .map(|prev| month_changes(&totals, prev));

    let revenue: Vec<Option<f64>> = days.iter().map(|d| Some(d.revenue)).collect();
    let profit: Vec<Option<f64>> = days.iter().map(|d| Some(d.profit)).collect();
    let trends = TrendLines {
        revenue: linear_trend(&revenue),
        profit: linear_trend(&profit),
    };

    info!(
        "Dashboard for {} {} at {}% fee: {} days, {} weeks, revenue {}",
        selection.month,
        selection.year,
        fee_pct,
        days.len(),
        weeks.len(),
        totals.revenue
    );

    Dashboard {
        store_name: load.config.store_name.clone(),
        currency: load.config.currency.clone(),
        fee_pct,
        source: load.source,
        selection: selection.clone(),
        days,
        weeks,
        totals,
        previous_totals,
        month_over_month,
        trends,
    }
}
