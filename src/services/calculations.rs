// src/services/calculations.rs
use log::debug;

use crate::models::{DayRecord, MonthDay, Selection};

/// Distinct labels in first-seen order, blanks skipped.
pub fn distinct_labels<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for label in labels {
        if !label.is_empty() && !seen.iter().any(|s| s == label) {
            seen.push(label.to_string());
        }
    }
    seen
}

/// Records for one month/year.
///
/// A dimension is only filtered on when the dataset carries labels for it,
/// so unlabelled sheets are not filtered down to nothing.
pub fn filter_period<'a>(records: &'a [DayRecord], month: &str, year: &str) -> Vec<&'a DayRecord> {
    let has_months = records.iter().any(|r| !r.month.is_empty());
    let has_years = records.iter().any(|r| !r.year.is_empty());

    records
        .iter()
        .filter(|r| month.is_empty() || !has_months || r.month == month)
        .filter(|r| year.is_empty() || !has_years || r.year == year)
        .collect()
}

/// Month-wide COG share as a fraction, from the last positive COG% cell.
///
/// Values above 1 are read as percentages, so 24.5 and 0.245 agree.
pub fn month_cog_fraction(days: &[&DayRecord]) -> Option<f64> {
    days.iter()
        .filter_map(|d| d.cog_pct)
        .filter(|pct| *pct > 0.0)
        .last()
        .map(|pct| if pct > 1.0 { pct / 100.0 } else { pct })
}

/// Month tip pool spread evenly over its days.
pub fn daily_tip(days: &[&DayRecord]) -> f64 {
    if days.is_empty() {
        return 0.0;
    }
    let total = days
        .iter()
        .filter_map(|d| d.tips)
        .filter(|t| *t > 0.0)
        .fold(0.0, |acc, t| acc + t);
    round_amount(total / days.len() as f64)
}

/// Round half away from zero, never yielding `-0.0`.
pub fn round_amount(value: f64) -> f64 {
    value.round() + 0.0
}

pub fn fee_amount(revenue: f64, fee_pct: f64) -> f64 {
    round_amount(revenue * fee_pct / 100.0)
}

pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        round_amount(part / whole * 100.0)
    }
}

/// Recalculate the selected month at `fee_pct`.
///
/// Tips are folded into revenue, COG follows the month-wide COG% when one is
/// present, and profit is rebuilt from the adjusted figures.
pub fn month_view(records: &[DayRecord], selection: &Selection, fee_pct: f64) -> Vec<MonthDay> {
    let days = filter_period(records, &selection.month, &selection.year);
    let cog_fraction = month_cog_fraction(&days);
    let tip = daily_tip(&days);
    debug!(
        "Recalculating {} {}: {} days, cog fraction {:?}, daily tip {}",
        selection.month,
        selection.year,
        days.len(),
        cog_fraction,
        tip
    );

    days.into_iter()
        .map(|d| {
            let revenue = d.revenue + tip;
            let cog = match cog_fraction {
                Some(fraction) => round_amount(revenue * fraction),
                None => d.cog.unwrap_or(0.0),
            };
            let fees = fee_amount(revenue, fee_pct);
            let profit = revenue
                - cog
                - d.adspend.unwrap_or(0.0)
                - fees
                - d.refunds.unwrap_or(0.0);

            MonthDay {
                day: d.day,
                week: d.week.clone(),
                month: d.month.clone(),
                year: d.year.clone(),
                revenue,
                cog,
                fees,
                profit,
                profit_pct: percent_of(profit, revenue),
                roas: d.roas,
                adspend: d.adspend,
                refunds: d.refunds,
                disputes: d.disputes,
                daily_tips: tip,
            }
        })
        .collect()
}

/// The month label preceding `month` in first-seen order.
pub fn previous_month(records: &[DayRecord], month: &str) -> Option<String> {
    let months = distinct_labels(records.iter().map(|r| r.month.as_str()));
    let idx = months.iter().position(|m| m == month)?;
    idx.checked_sub(1).map(|prev| months[prev].clone())
}

/// The previous month as the sheet recorded it, with only fees recomputed.
///
/// Empty when there is no earlier month in the data.
pub fn previous_month_view(records: &[DayRecord], selection: &Selection, fee_pct: f64) -> Vec<MonthDay> {
    let Some(prev) = previous_month(records, &selection.month) else {
        return Vec::new();
    };

    filter_period(records, &prev, &selection.year)
        .into_iter()
        .map(|d| MonthDay {
            day: d.day,
            week: d.week.clone(),
            month: d.month.clone(),
            year: d.year.clone(),
            revenue: d.revenue,
            cog: d.cog.unwrap_or(0.0),
            fees: fee_amount(d.revenue, fee_pct),
            profit: d.profit.unwrap_or(0.0),
            profit_pct: d.profit_pct.unwrap_or(0.0),
            roas: d.roas,
            adspend: d.adspend,
            refunds: d.refunds,
            disputes: d.disputes,
            daily_tips: 0.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: f64, revenue: f64) -> DayRecord {
        DayRecord {
            day,
            revenue,
            profit: None,
            profit_pct: None,
            roas: None,
            cog: None,
            cog_pct: None,
            adspend: None,
            refunds: None,
            disputes: None,
            tips: None,
            week: String::new(),
            month: String::new(),
            year: String::new(),
        }
    }

    fn labelled(day: f64, revenue: f64, month: &str, year: &str) -> DayRecord {
        DayRecord {
            month: month.to_string(),
            year: year.to_string(),
            ..record(day, revenue)
        }
    }

    fn select(month: &str, year: &str) -> Selection {
        Selection {
            month: month.to_string(),
            year: year.to_string(),
        }
    }

    #[test]
    fn test_filter_by_month_and_year() {
        let records = vec![
            labelled(1.0, 100.0, "January", "2026"),
            labelled(2.0, 200.0, "February", "2026"),
            labelled(3.0, 300.0, "January", "2025"),
        ];
        let view = month_view(&records, &select("January", "2026"), 0.0);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].revenue, 100.0);
    }

    #[test]
    fn test_unlabelled_data_not_filtered_out() {
        let records = vec![record(1.0, 100.0), record(2.0, 200.0)];
        let view = month_view(&records, &select("March", "2026"), 0.0);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_profit_formula() {
        let mut r = record(1.0, 1000.0);
        r.cog = Some(250.0);
        r.adspend = Some(300.0);
        r.refunds = Some(20.0);
        let view = month_view(&[r], &select("", ""), 10.0);
        let d = &view[0];
        assert_eq!(d.fees, 100.0);
        assert_eq!(d.profit, 1000.0 - 250.0 - 300.0 - 100.0 - 20.0);
        assert_eq!(d.profit_pct, 33.0);
    }

    #[test]
    fn test_missing_costs_count_as_zero_in_profit() {
        let view = month_view(&[record(1.0, 500.0)], &select("", ""), 0.0);
        assert_eq!(view[0].cog, 0.0);
        assert_eq!(view[0].profit, 500.0);
        assert_eq!(view[0].adspend, None);
    }

    #[test]
    fn test_cog_percentage_overrides_cog() {
        let mut a = record(1.0, 1000.0);
        a.cog = Some(999.0);
        let mut b = record(2.0, 2000.0);
        b.cog_pct = Some(24.5);
        let view = month_view(&[a, b], &select("", ""), 0.0);
        assert_eq!(view[0].cog, 245.0);
        assert_eq!(view[1].cog, 490.0);
    }

    #[test]
    fn test_cog_fraction_and_last_wins() {
        let mut a = record(1.0, 1000.0);
        a.cog_pct = Some(30.0);
        let mut b = record(2.0, 1000.0);
        b.cog_pct = Some(0.2);
        let mut c = record(3.0, 1000.0);
        c.cog_pct = Some(0.0);
        let view = month_view(&[a, b, c], &select("", ""), 0.0);
        assert!(view.iter().all(|d| d.cog == 200.0));
    }

    #[test]
    fn test_tips_spread_evenly() {
        let mut a = record(1.0, 100.0);
        a.tips = Some(50.0);
        let mut b = record(2.0, 100.0);
        b.tips = Some(-20.0);
        let c = record(3.0, 100.0);
        let view = month_view(&[a, b, c], &select("", ""), 0.0);
        // 50 / 3 = 16.67
        assert!(view.iter().all(|d| d.daily_tips == 17.0 && d.revenue == 117.0));
    }

    #[test]
    fn test_zero_revenue_has_zero_percent() {
        let view = month_view(&[record(1.0, 0.0)], &select("", ""), 10.0);
        assert_eq!(view[0].profit_pct, 0.0);
        assert_eq!(view[0].fees, 0.0);
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        assert_eq!(fee_amount(105.0, 10.0), 11.0);
        assert_eq!(percent_of(-1.0, 8.0), -13.0);
        assert_eq!(percent_of(1.0, 8.0), 13.0);
    }

    #[test]
    fn test_no_negative_zero_in_month_view() {
        let mut loss = record(1.0, 1000.0);
        loss.adspend = Some(1004.0);
        let view = month_view(&[loss, record(2.0, 1000.0)], &select("", ""), 0.0);
        assert_eq!(view[0].profit_pct, 0.0);
        assert!(view[0].profit_pct.is_sign_positive());
        assert!(view.iter().all(|d| d.daily_tips.is_sign_positive()));

        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("-0.0"), "{}", json);
    }

    #[test]
    fn test_round_amount_drops_sign_of_zero() {
        assert!(round_amount(-0.4).is_sign_positive());
        assert!(percent_of(-4.0, 1000.0).is_sign_positive());
        assert!(fee_amount(-1.0, 10.0).is_sign_positive());
        assert_eq!(round_amount(-2.5), -3.0);
    }

    #[test]
    fn test_empty_selection_yields_empty_view() {
        let records = vec![labelled(1.0, 100.0, "January", "2026")];
        assert!(month_view(&records, &select("June", "2026"), 8.5).is_empty());
    }

    #[test]
    fn test_previous_month_in_first_seen_order() {
        let records = vec![
            labelled(1.0, 100.0, "March", "2026"),
            labelled(1.0, 100.0, "January", "2026"),
            labelled(1.0, 100.0, "February", "2026"),
        ];
        assert_eq!(previous_month(&records, "February"), Some("January".to_string()));
        assert_eq!(previous_month(&records, "January"), Some("March".to_string()));
        assert_eq!(previous_month(&records, "March"), None);
        assert_eq!(previous_month(&records, "June"), None);
    }

    #[test]
    fn test_previous_month_view_keeps_sheet_figures() {
        let mut jan = labelled(1.0, 1000.0, "January", "2026");
        jan.profit = Some(123.0);
        jan.cog_pct = Some(50.0);
        jan.tips = Some(300.0);
        let feb = labelled(1.0, 2000.0, "February", "2026");
        let prev = previous_month_view(&[jan, feb], &select("February", "2026"), 10.0);
        assert_eq!(prev.len(), 1);
        assert_eq!(prev[0].revenue, 1000.0);
        assert_eq!(prev[0].profit, 123.0);
        assert_eq!(prev[0].cog, 0.0);
        assert_eq!(prev[0].fees, 100.0);
    }
}
