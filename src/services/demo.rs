// src/services/demo.rs
use crate::models::{DayRecord, Selection};
use crate::services::calculations::percent_of;

pub const DEMO_MONTH: &str = "January";
pub const DEMO_YEAR: &str = "2026";

/// Park-Miller minimal standard generator, so the demo is identical every load.
struct MinStd {
    seed: u64,
}

impl MinStd {
    const MODULUS: u64 = 2_147_483_647;

    fn new(seed: u64) -> Self {
        MinStd { seed }
    }

    fn next(&mut self) -> f64 {
        self.seed = (self.seed * 16_807) % Self::MODULUS;
        (self.seed - 1) as f64 / (Self::MODULUS - 1) as f64
    }
}

pub fn demo_selection() -> Selection {
    Selection {
        month: DEMO_MONTH.to_string(),
        year: DEMO_YEAR.to_string(),
    }
}

/// 31 days of plausible store data over five weeks.
pub fn demo_records() -> Vec<DayRecord> {
    let mut rng = MinStd::new(42);
    let mut days = Vec::with_capacity(31);
    let mut day_num = 1.0;

    for week in 1..=5 {
        let days_in_week = if week == 5 { 3 } else { 7 };
        for _ in 0..days_in_week {
            let revenue = (4000.0 + rng.next() * 9000.0).round();
            let adspend = (1500.0 + rng.next() * 3000.0).round();
            let roas = (revenue / adspend * 10.0).round() / 10.0;
            let cog = (revenue * 0.245).round();
            let fees = (revenue * 0.085).round();
            let refunds = (rng.next() * 200.0).round();
            let profit = revenue - adspend - cog - fees - refunds;
            let profit_pct = percent_of(profit, revenue);

            days.push(DayRecord {
                day: day_num,
                revenue,
                profit: Some(profit),
                profit_pct: Some(profit_pct),
                roas: Some(roas),
                cog: Some(cog),
                cog_pct: Some(24.5),
                adspend: Some(adspend),
                refunds: Some(refunds),
                disputes: Some((rng.next() * 3.0).floor()),
                tips: Some(0.0),
                week: format!("Week {}", week),
                month: DEMO_MONTH.to_string(),
                year: DEMO_YEAR.to_string(),
            });
            day_num += 1.0;
        }
    }

    days
}
