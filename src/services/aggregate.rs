// src/services/aggregate.rs
use crate::models::{Change, MonthChanges, MonthDay, Totals, WeekChanges, WeekSummary};
use crate::services::calculations::percent_of;

pub const DEFAULT_WEEK: &str = "Week 1";

/// Sum of a field, missing values skipped.
fn sum_of<F>(days: &[MonthDay], field: F) -> f64
where
    F: Fn(&MonthDay) -> Option<f64>,
{
    days.iter().filter_map(field).fold(0.0, |acc, v| acc + v)
}

/// Mean over the days that have a value; `None` if none do.
fn avg_of<F>(days: &[MonthDay], field: F) -> Option<f64>
where
    F: Fn(&MonthDay) -> Option<f64>,
{
    let values: Vec<f64> = days.iter().filter_map(field).collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().fold(0.0, |acc, v| acc + v) / values.len() as f64)
    }
}

/// Percentage change from `previous` to `current`.
///
/// Unavailable when either side is missing or `previous` is zero. With
/// `invert`, a decrease counts as favorable.
pub fn change_pct(current: Option<f64>, previous: Option<f64>, invert: bool) -> Option<Change> {
    let (current, previous) = (current?, previous?);
    if previous == 0.0 {
        return None;
    }
    let pct = (current - previous) / previous.abs() * 100.0;
    let favorable = if invert { pct <= 0.0 } else { pct >= 0.0 };
    Some(Change { pct, favorable })
}

fn summarize_week(name: String, days: Vec<MonthDay>) -> WeekSummary {
    let revenue = sum_of(&days, |d| Some(d.revenue));
    let profit = sum_of(&days, |d| Some(d.profit));
    WeekSummary {
        name,
        revenue,
        profit,
        profit_pct: percent_of(profit, revenue),
        roas: avg_of(&days, |d| d.roas),
        cog: sum_of(&days, |d| Some(d.cog)),
        adspend: sum_of(&days, |d| d.adspend),
        refunds: sum_of(&days, |d| d.refunds),
        disputes: sum_of(&days, |d| d.disputes),
        fees: sum_of(&days, |d| Some(d.fees)),
        days,
        wow: None,
    }
}

fn week_changes(current: &WeekSummary, previous: &WeekSummary) -> WeekChanges {
    WeekChanges {
        revenue: change_pct(Some(current.revenue), Some(previous.revenue), false),
        profit: change_pct(Some(current.profit), Some(previous.profit), false),
        profit_pct: change_pct(Some(current.profit_pct), Some(previous.profit_pct), false),
        roas: change_pct(current.roas, previous.roas, false),
    }
}

/// Group days by week label in first-seen order and summarize each week.
pub fn weekly_summaries(days: &[MonthDay]) -> Vec<WeekSummary> {
    let mut groups: Vec<(String, Vec<MonthDay>)> = Vec::new();
    for day in days {
        let name = if day.week.is_empty() { DEFAULT_WEEK } else { day.week.as_str() };
        match groups.iter_mut().find(|(n, _)| n == name) {
            Some((_, members)) => members.push(day.clone()),
            None => groups.push((name.to_string(), vec![day.clone()])),
        }
    }

    let mut weeks: Vec<WeekSummary> = groups
        .into_iter()
        .map(|(name, members)| summarize_week(name, members))
        .collect();

    for i in 1..weeks.len() {
        let changes = week_changes(&weeks[i], &weeks[i - 1]);
        weeks[i].wow = Some(changes);
    }
    weeks
}

pub fn totals(days: &[MonthDay]) -> Totals {
    let revenue = sum_of(days, |d| Some(d.revenue));
    let profit = sum_of(days, |d| Some(d.profit));
    let cog = sum_of(days, |d| Some(d.cog));
    let adspend = sum_of(days, |d| d.adspend);
    let refunds = sum_of(days, |d| d.refunds);

    Totals {
        revenue,
        profit,
        profit_pct: percent_of(profit, revenue),
        roas: avg_of(days, |d| d.roas),
        cog,
        cog_pct: percent_of(cog, revenue),
        adspend,
        adspend_pct: percent_of(adspend, revenue),
        refunds,
        refunds_pct: percent_of(refunds, revenue),
        fees: sum_of(days, |d| Some(d.fees)),
        disputes: sum_of(days, |d| d.disputes),
    }
}

/// Totals for the previous month, or `None` when it has no days.
pub fn previous_totals(prev_days: &[MonthDay]) -> Option<Totals> {
    if prev_days.is_empty() {
        None
    } else {
        Some(totals(prev_days))
    }
}

/// KPI changes against the previous month. Costs are favorable when they fall.
pub fn month_changes(current: &Totals, previous: &Totals) -> MonthChanges {
    MonthChanges {
        revenue: change_pct(Some(current.revenue), Some(previous.revenue), false),
        profit: change_pct(Some(current.profit), Some(previous.profit), false),
        adspend: change_pct(Some(current.adspend), Some(previous.adspend), false),
        roas: change_pct(current.roas, previous.roas, false),
        cog: change_pct(Some(current.cog), Some(previous.cog), true),
        refunds: change_pct(Some(current.refunds), Some(previous.refunds), true),
        fees: change_pct(Some(current.fees), Some(previous.fees), true),
        disputes: change_pct(Some(current.disputes), Some(previous.disputes), true),
    }
}
