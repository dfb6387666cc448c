//! Excel workbook reading via calamine.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx, open_workbook};
use tracing::debug;

/// A worksheet read into memory as strings.
#[derive(Debug, Clone, Default)]
pub struct SheetTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn value<'a>(&'a self, row: usize, column: Option<usize>) -> &'a str {
        column
            .and_then(|idx| self.rows.get(row).and_then(|r| r.get(idx)))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Read every sheet of a workbook, taking row `header_row` as the header.
/// Rows above the header (title rows) are discarded; fully empty rows below
/// it are dropped.
pub fn read_workbook_tables(
    path: &Path,
    header_row: usize,
) -> Result<BTreeMap<String, SheetTable>> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).with_context(|| format!("open workbook: {}", path.display()))?;
    let sheet_names = workbook.sheet_names().to_owned();
    let mut tables = BTreeMap::new();
    for name in sheet_names {
        let range = workbook
            .worksheet_range(&name)
            .with_context(|| format!("read sheet '{name}' in {}", path.display()))?;
        let all_rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();
        let Some(header_cells) = all_rows.get(header_row) else {
            debug!(sheet = %name, "sheet shorter than header row, skipped");
            continue;
        };
        let headers: Vec<String> = header_cells.iter().map(|cell| cell.trim().to_string()).collect();
        let mut rows = Vec::new();
        for raw in all_rows.iter().skip(header_row + 1) {
            if raw.iter().all(|value| value.trim().is_empty()) {
                continue;
            }
            let mut row = Vec::with_capacity(headers.len());
            for idx in 0..headers.len() {
                row.push(raw.get(idx).map(|value| value.trim().to_string()).unwrap_or_default());
            }
            rows.push(row);
        }
        debug!(sheet = %name, columns = headers.len(), rows = rows.len(), "sheet read");
        tables.insert(
            name.clone(),
            SheetTable {
                name,
                headers,
                rows,
            },
        );
    }
    Ok(tables)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(value) => value.clone(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => {
            if value.fract() == 0.0 {
                format!("{}", *value as i64)
            } else {
                value.to_string()
            }
        }
        Data::Bool(value) => value.to_string(),
        Data::DateTime(value) => value.as_f64().to_string(),
        Data::DateTimeIso(value) | Data::DurationIso(value) => value.clone(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}
