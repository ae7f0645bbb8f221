// src/services/records.rs
use log::{debug, info};

use crate::models::DayRecord;
use crate::services::parse::{clean_num, parse_row};
use crate::services::schema::{detect_schema, Field, Schema};

/// Rows with fewer populated cells than this are blank or decorative.
const MIN_POPULATED_FIELDS: usize = 3;

/// Parse the daily data sheet into records, in sheet order.
///
/// Returns an empty vec when no header row can be found.
pub fn parse_data_csv(text: &str) -> Vec<DayRecord> {
    let rows: Vec<Vec<String>> = text.lines().map(parse_row).collect();
    match detect_schema(&rows) {
        Some(schema) => {
            let records = build_records(&rows, &schema);
            info!(
                "Parsed {} day records from {} rows (header at row {})",
                records.len(),
                rows.len(),
                schema.header_row
            );
            records
        }
        None => {
            info!("No header row found in {} rows", rows.len());
            Vec::new()
        }
    }
}

pub fn build_records(rows: &[Vec<String>], schema: &Schema) -> Vec<DayRecord> {
    let cols = &schema.columns;
    let mut records: Vec<DayRecord> = Vec::new();

    for (idx, row) in rows.iter().enumerate().skip(schema.header_row + 1) {
        if row.iter().filter(|c| !c.is_empty()).count() < MIN_POPULATED_FIELDS {
            continue;
        }

        let day_label = cols.cell(row, Field::Day).unwrap_or("");
        if day_label.to_lowercase().contains("total") {
            debug!("Skipping subtotal row {}: {:?}", idx, day_label);
            continue;
        }

        let Some(revenue) = clean_num(cols.cell(row, Field::Revenue)) else {
            debug!("Skipping row {}: revenue not numeric", idx);
            continue;
        };

        let num = |field| clean_num(cols.cell(row, field));
        let text = |field| cols.cell(row, field).unwrap_or("").trim().to_string();

        let day = clean_num(Some(day_label))
            .filter(|d| *d > 0.0)
            .unwrap_or((records.len() + 1) as f64);

        records.push(DayRecord {
            day,
            revenue,
            profit: num(Field::Profit),
            profit_pct: num(Field::ProfitPct),
            roas: num(Field::Roas),
            cog: num(Field::Cog),
            cog_pct: num(Field::CogPct),
            adspend: num(Field::Adspend),
            refunds: num(Field::Refunds),
            disputes: num(Field::Disputes),
            tips: num(Field::Tips),
            week: text(Field::Week),
            month: text(Field::Month),
            year: text(Field::Year),
        });
    }

    records
}
