// src/models.rs
use serde::{Deserialize, Serialize};

/// One row of the daily P&L sheet, as ingested.
///
/// Numeric fields other than `revenue` are `None` when the cell was blank or
/// unparseable; zero is a real value and is never used as a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    pub day: f64,
    pub revenue: f64,
    pub profit: Option<f64>,
    pub profit_pct: Option<f64>,
    pub roas: Option<f64>,
    pub cog: Option<f64>,
    pub cog_pct: Option<f64>,
    pub adspend: Option<f64>,
    pub refunds: Option<f64>,
    pub disputes: Option<f64>,
    pub tips: Option<f64>,
    pub week: String,
    pub month: String,
    pub year: String,
}

/// A day of the selected month after fee, tip and COG recalculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthDay {
    pub day: f64,
    pub week: String,
    pub month: String,
    pub year: String,
    pub revenue: f64,
    pub cog: f64,
    pub fees: f64,
    pub profit: f64,
    pub profit_pct: f64,
    pub roas: Option<f64>,
    pub adspend: Option<f64>,
    pub refunds: Option<f64>,
    pub disputes: Option<f64>,
    pub daily_tips: f64,
}

/// Percentage change between two periods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Change {
    pub pct: f64,
    pub favorable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekChanges {
    pub revenue: Option<Change>,
    pub profit: Option<Change>,
    pub profit_pct: Option<Change>,
    pub roas: Option<Change>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummary {
    pub name: String,
    pub days: Vec<MonthDay>,
    pub revenue: f64,
    pub profit: f64,
    pub profit_pct: f64,
    pub roas: Option<f64>,
    pub cog: f64,
    pub adspend: f64,
    pub refunds: f64,
    pub disputes: f64,
    pub fees: f64,
    /// Change against the preceding week; `None` for the first week.
    pub wow: Option<WeekChanges>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub revenue: f64,
    pub profit: f64,
    pub profit_pct: f64,
    pub roas: Option<f64>,
    pub cog: f64,
    pub cog_pct: f64,
    pub adspend: f64,
    pub adspend_pct: f64,
    pub refunds: f64,
    pub refunds_pct: f64,
    pub fees: f64,
    pub disputes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthChanges {
    pub revenue: Option<Change>,
    pub profit: Option<Change>,
    pub adspend: Option<Change>,
    pub roas: Option<Change>,
    pub cog: Option<Change>,
    pub refunds: Option<Change>,
    pub fees: Option<Change>,
    pub disputes: Option<Change>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendLines {
    pub revenue: Vec<Option<f64>>,
    pub profit: Vec<Option<f64>>,
}

/// Store-level settings read from the config sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    pub fee_pct: f64,
    pub store_name: String,
    pub currency: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            fee_pct: 8.5,
            store_name: String::new(),
            currency: "$".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Demo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub month: String,
    pub year: String,
}

/// Everything produced by one load cycle. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadResult {
    pub records: Vec<DayRecord>,
    pub source: DataSource,
    pub config: StoreConfig,
    pub default_selection: Selection,
    /// Calendar year at load time, anchors the fallback year list.
    pub loaded_year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub months: Vec<String>,
    pub years: Vec<String>,
    pub default_selection: Selection,
}

/// The payload handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub store_name: String,
    pub currency: String,
    pub fee_pct: f64,
    pub source: DataSource,
    pub selection: Selection,
    pub days: Vec<MonthDay>,
    pub weeks: Vec<WeekSummary>,
    pub totals: Totals,
    pub previous_totals: Option<Totals>,
    pub month_over_month: Option<MonthChanges>,
    pub trends: TrendLines,
}
