use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use grid_model::GridError;

/// A CSV file read into memory as strings, keyed by header.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Index of a header, after trimming. Header matching is exact: the
    /// register exports use stable column names.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Fail with a schema error if any of the named columns is absent.
    /// A missing required column is a data problem, not a transient fault.
    pub fn require_columns(
        &self,
        source_name: &str,
        names: &[&str],
    ) -> std::result::Result<(), GridError> {
        for name in names {
            if self.column(name).is_none() {
                return Err(GridError::MissingColumn {
                    source_name: source_name.to_string(),
                    column: (*name).to_string(),
                });
            }
        }
        Ok(())
    }

    /// Cell value by row index and header name; empty string when absent.
    pub fn value<'a>(&'a self, row: usize, column: Option<usize>) -> &'a str {
        column
            .and_then(|idx| self.rows.get(row).and_then(|r| r.get(idx)))
            .map(String::as_str)
            .unwrap_or("")
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a CSV file into a [`CsvTable`]. The first row is the header; fully
/// empty rows are dropped and cells are trimmed of whitespace and BOM.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    let Some(header_row) = raw_rows.first() else {
        return Ok(CsvTable::default());
    };
    let headers: Vec<String> = header_row.iter().map(|value| normalize_header(value)).collect();
    let mut rows = Vec::with_capacity(raw_rows.len().saturating_sub(1));
    for record in raw_rows.iter().skip(1) {
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            row.push(record.get(idx).cloned().unwrap_or_default());
        }
        rows.push(row);
    }
    Ok(CsvTable { headers, rows })
}

/// Parse a numeric cell, tolerating thousands separators. Empty and
/// non-numeric values become `None`.
pub fn parse_f64(value: &str) -> Option<f64> {
    let cleaned = value.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Parse a year cell. Spreadsheet exports often render years as floats
/// ("2027.0"), so integer parsing falls back to float truncation.
pub fn parse_year(value: &str) -> Option<i32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }
    trimmed.parse::<f64>().ok().map(|year| year as i32)
}
