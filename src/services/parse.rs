// src/services/parse.rs
use regex::Regex;
use std::sync::LazyLock;

static STRIP_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[€$,%\s]").unwrap());
static PAREN_NEGATIVE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\((.+)\)").unwrap());
static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?").unwrap());

/// Split one CSV line into trimmed fields.
///
/// A `"` toggles quoted mode and is dropped from the output. There is no
/// escaped-quote support, and unbalanced quotes just run to the end of line.
pub fn parse_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Turn a spreadsheet cell like `€1,234`, `12%` or `(45)` into a number.
///
/// Returns `None` for blank cells and cells with no leading number.
pub fn clean_num(cell: Option<&str>) -> Option<f64> {
    let cell = cell.filter(|c| !c.is_empty())?;
    let stripped = STRIP_CHARS.replace_all(cell, "");
    let signed = PAREN_NEGATIVE.replacen(&stripped, 1, "-$1");
    LEADING_NUMBER
        .find(&signed)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}
