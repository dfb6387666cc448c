//! ETYS Appendix B workbook layout and row parsing.
//!
//! The appendix splits network data across per-owner sheets: B-1 index
//! sheets, B-2 circuits, B-3 transformers, B-4 reactive compensation and
//! B-5-1 intra-HVDC links. Data headers sit on the second row of each sheet.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use tracing::warn;

use grid_model::{AssetClass, ChangeStatus, HvdcRow, NetworkRow, TransmissionOwner};

use crate::csv_table::parse_year;
use crate::workbook::{SheetTable, read_workbook_tables};

pub const INDEX_SHEETS: [&str; 4] = ["B-1-1a", "B-1-1b", "B-1-1c", "B-1-1d"];

pub const CIRCUIT_SHEETS: [&str; 8] = [
    "B-2-1a", "B-2-1b", "B-2-1c", "B-2-1d", "B-2-2a", "B-2-2b", "B-2-2c", "B-2-2d",
];

pub const TRANSFORMER_SHEETS: [&str; 8] = [
    "B-3-1a", "B-3-1b", "B-3-1c", "B-3-1d", "B-3-2a", "B-3-2b", "B-3-2c", "B-3-2d",
];

pub const REACTIVE_SHEETS: [&str; 8] = [
    "B-4-1a", "B-4-1b", "B-4-1c", "B-4-1d", "B-4-2a", "B-4-2b", "B-4-2c", "B-4-2d",
];

pub const INTRA_HVDC_SHEET: &str = "B-5-1";

/// Header row index within each ETYS sheet (the first row is a title).
pub const ETYS_HEADER_ROW: usize = 1;

/// Standardise a column name. The appendix is inconsistent about spacing and
/// MVAr capitalisation across owner sheets.
pub fn canonical_header(raw: &str) -> String {
    match raw.trim() {
        "Node1" => "Node 1".to_string(),
        "Node2" => "Node 2".to_string(),
        "OHL Length(km)" => "OHL Length (km)".to_string(),
        "Cable Length(km)" => "Cable Length (km)".to_string(),
        "Rating (MVA)" => "Winter Rating (MVA)".to_string(),
        "R (% on 100 MVA)" => "R (% on 100MVA)".to_string(),
        "X (% on 100 MVA)" => "X (% on 100MVA)".to_string(),
        "B (% on 100 MVA)" => "B (% on 100MVA)".to_string(),
        "Mvar Generation" | "MVar Generation" => "MVAr Generation".to_string(),
        "Mvar Absorption" | "MVar Absorption" => "MVAr Absorption".to_string(),
        other => other.to_string(),
    }
}

/// Owner a sheet belongs to, derived from the sheet name suffix.
pub fn sheet_owner(sheet_name: &str) -> Option<TransmissionOwner> {
    TransmissionOwner::from_sheet_suffix(sheet_name.chars().last()?)
}

/// Read the full ETYS workbook with canonicalised headers.
pub fn load_etys(path: &Path) -> Result<BTreeMap<String, SheetTable>> {
    let mut tables = read_workbook_tables(path, ETYS_HEADER_ROW)?;
    for table in tables.values_mut() {
        for header in &mut table.headers {
            *header = canonical_header(header);
        }
    }
    Ok(tables)
}

/// Parse one network data sheet into typed rows.
///
/// Branch sheets (circuits, transformers) key on `Node 1`/`Node 2`; reactive
/// compensation sheets key on a single `Node`. Transformer rows get a fixed
/// asset kind since their sheets carry no type column. A dated row whose
/// status is not one of Addition/Removed/Change describes no change the
/// sequencing rules know how to apply and is dropped; undated rows are
/// existing assets whatever their status cell says.
pub fn parse_network_sheet(table: &SheetTable, asset_class: AssetClass) -> Vec<NetworkRow> {
    let (node1_col, node2_col) = match asset_class {
        AssetClass::Reactive => (table.column("Node"), None),
        _ => (table.column("Node 1"), table.column("Node 2")),
    };
    let status_col = table.column("Status");
    let year_col = table.column("Year");
    let kind_col = match asset_class {
        AssetClass::Circuit => table.column("Circuit Type"),
        AssetClass::Transformer => None,
        AssetClass::Reactive => table.column("Compensation Type"),
    };
    let consumed: Vec<Option<usize>> = vec![node1_col, node2_col, status_col, year_col, kind_col];

    let mut rows = Vec::new();
    for idx in 0..table.rows.len() {
        let node1 = table.value(idx, node1_col).trim().to_string();
        if node1.is_empty() {
            continue;
        }
        let node2 = match node2_col {
            Some(_) => {
                let value = table.value(idx, node2_col).trim();
                if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            None => None,
        };
        let status_raw = table.value(idx, status_col).trim();
        let status = ChangeStatus::parse(status_raw);
        let year = parse_year(table.value(idx, year_col));
        if status.is_none() && !status_raw.is_empty() && year.is_some() {
            warn!(
                sheet = %table.name,
                node = %node1,
                status = %status_raw,
                "unrecognised status on a dated row, row dropped"
            );
            continue;
        }
        let asset_kind = match asset_class {
            AssetClass::Transformer => Some("Transformer".to_string()),
            _ => {
                let value = table.value(idx, kind_col).trim();
                if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
        };
        let extra: Vec<(String, String)> = table
            .headers
            .iter()
            .enumerate()
            .filter(|(col, _)| !consumed.contains(&Some(*col)))
            .map(|(col, header)| (header.clone(), table.value(idx, Some(col)).to_string()))
            .collect();
        rows.push(NetworkRow {
            asset_class,
            sheet: table.name.clone(),
            node1,
            node2,
            status,
            year,
            asset_kind,
            extra,
        });
    }
    rows
}

/// Parse the intra-HVDC sheet. The `Year` and `Status` columns are derived
/// from "Planned from year": dated rows become additions, the rest are
/// existing links.
pub fn parse_intra_hvdc(table: &SheetTable) -> Vec<HvdcRow> {
    let planned_col = table.column("Planned from year");
    if planned_col.is_none() {
        warn!(sheet = %table.name, "'Planned from year' column not found");
    }
    let mut rows = Vec::new();
    for idx in 0..table.rows.len() {
        if table.rows[idx].iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let planned_from = table.value(idx, planned_col).trim().to_string();
        let year = parse_year(&planned_from);
        let status = if year.is_some() { "Addition" } else { "Existing" };
        let extra: Vec<(String, String)> = table
            .headers
            .iter()
            .enumerate()
            .filter(|(col, _)| planned_col != Some(*col))
            .map(|(col, header)| (header.clone(), table.value(idx, Some(col)).to_string()))
            .collect();
        rows.push(HvdcRow {
            planned_from,
            year,
            status: status.to_string(),
            extra,
        });
    }
    rows
}

/// Site code to site name pairs from one index sheet.
pub fn site_name_pairs(table: &SheetTable) -> Vec<(String, String)> {
    let code_col = table.column("Site Code");
    let name_col = table.column("Site Name");
    if code_col.is_none() || name_col.is_none() {
        return Vec::new();
    }
    let mut pairs = Vec::new();
    for idx in 0..table.rows.len() {
        let code = table.value(idx, code_col).trim().to_string();
        let name = table.value(idx, name_col).trim().to_string();
        if code.is_empty() || name.is_empty() {
            continue;
        }
        pairs.push((code, name));
    }
    pairs
}
