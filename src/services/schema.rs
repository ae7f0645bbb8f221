// src/services/schema.rs
use log::debug;
use std::collections::HashMap;

/// Semantic columns the record builder knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Day,
    Revenue,
    Profit,
    ProfitPct,
    Roas,
    Cog,
    CogPct,
    Adspend,
    Refunds,
    Disputes,
    Week,
    Month,
    Year,
    Tips,
}

type Rule = (fn(&str) -> bool, Field);

/// Header rules, applied in order to every lower-cased header cell.
///
/// A cell may match several rules. When two cells match the same field the
/// later column wins.
const RULES: &[Rule] = &[
    (|h: &str| h.contains("day") || h.contains("date") || h == "#", Field::Day),
    (|h: &str| h.contains("revenue") && !h.contains("total"), Field::Revenue),
    (|h: &str| h.contains("profit") && !h.contains('%'), Field::Profit),
    (|h: &str| h.contains("profit") && h.contains('%'), Field::ProfitPct),
    (|h: &str| h.contains("roas"), Field::Roas),
    (|h: &str| h.contains("cog") && !h.contains('%'), Field::Cog),
    (|h: &str| h.contains("cog") && h.contains('%'), Field::CogPct),
    (|h: &str| h.contains("adspend") || h.contains("ad spend"), Field::Adspend),
    (|h: &str| h.contains("refund"), Field::Refunds),
    (|h: &str| h.contains("dispute"), Field::Disputes),
    (|h: &str| h.contains("week"), Field::Week),
    (|h: &str| h.contains("month"), Field::Month),
    (|h: &str| h.contains("year"), Field::Year),
    (|h: &str| h.contains("tip"), Field::Tips),
];

/// Where each semantic field lives in the data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMap {
    columns: HashMap<Field, usize>,
}

impl ColumnMap {
    pub fn index(&self, field: Field) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The raw cell for `field` in `row`, if the column is mapped and present.
    pub fn cell<'a>(&self, row: &'a [String], field: Field) -> Option<&'a str> {
        self.index(field)
            .and_then(|i| row.get(i))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub header_row: usize,
    pub columns: ColumnMap,
}

/// A header row mentions both revenue and a day/date column.
fn is_header(row: &[String]) -> bool {
    let lower: Vec<String> = row.iter().map(|c| c.to_lowercase()).collect();
    lower.iter().any(|c| c.contains("revenue"))
        && lower.iter().any(|c| c.contains("day") || c.contains("date"))
}

pub fn map_columns(header: &[String]) -> ColumnMap {
    let mut columns = HashMap::new();
    for (i, cell) in header.iter().enumerate() {
        let h = cell.trim().to_lowercase();
        for (matches, field) in RULES {
            if matches(h.as_str()) {
                columns.insert(*field, i);
            }
        }
    }
    ColumnMap { columns }
}

/// Find the first header row from the top and map its columns.
pub fn detect_schema(rows: &[Vec<String>]) -> Option<Schema> {
    let header_row = rows.iter().position(|r| is_header(r))?;
    let columns = map_columns(&rows[header_row]);
    debug!("Header found at row {}: {:?}", header_row, columns);
    Some(Schema { header_row, columns })
}
