//! Concatenation and change sequencing of the ETYS network data sheets.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use grid_ingest::{
    CIRCUIT_SHEETS, REACTIVE_SHEETS, SheetTable, TRANSFORMER_SHEETS, parse_network_sheet,
    sheet_owner,
};
use grid_model::{AssetClass, ChangeStatus, NetworkRow, TransmissionOwner};

/// The three concatenated network tables, one per asset class.
#[derive(Debug, Default)]
pub struct NetworkTables {
    pub circuits: Vec<NetworkRow>,
    pub transformers: Vec<NetworkRow>,
    pub reactive: Vec<NetworkRow>,
}

impl NetworkTables {
    pub fn row_count(&self) -> usize {
        self.circuits.len() + self.transformers.len() + self.reactive.len()
    }
}

fn gather_group(
    sheets: &BTreeMap<String, SheetTable>,
    group: &[&str],
    asset_class: AssetClass,
    owners: &BTreeSet<TransmissionOwner>,
) -> Vec<NetworkRow> {
    let mut rows = Vec::new();
    for name in group {
        let Some(owner) = sheet_owner(name) else {
            continue;
        };
        if !owners.contains(&owner) {
            continue;
        }
        let Some(table) = sheets.get(*name) else {
            continue;
        };
        let parsed = parse_network_sheet(table, asset_class);
        debug!(sheet = %name, owner = %owner, rows = parsed.len(), "network sheet gathered");
        rows.extend(parsed);
    }
    rows
}

/// Concatenate the sheet groups for the selected owners into typed tables,
/// keeping sheet provenance on every row.
pub fn collect_network_rows(
    sheets: &BTreeMap<String, SheetTable>,
    owners: &BTreeSet<TransmissionOwner>,
) -> NetworkTables {
    let tables = NetworkTables {
        circuits: gather_group(sheets, &CIRCUIT_SHEETS, AssetClass::Circuit, owners),
        transformers: gather_group(sheets, &TRANSFORMER_SHEETS, AssetClass::Transformer, owners),
        reactive: gather_group(sheets, &REACTIVE_SHEETS, AssetClass::Reactive, owners),
    };
    info!(
        circuits = tables.circuits.len(),
        transformers = tables.transformers.len(),
        reactive = tables.reactive.len(),
        "network sheets concatenated"
    );
    tables
}

/// Apply the planned-change sequence up to the analysis year.
///
/// Rows with no status or year describe the existing network and are kept.
/// Dated rows beyond the analysis year are dropped. `Addition` appends,
/// `Removed` deletes earlier rows with the same node key, and `Change`
/// replaces them.
pub fn apply_change_sequence(rows: Vec<NetworkRow>, year_of_analysis: i32) -> Vec<NetworkRow> {
    let input_count = rows.len();
    let mut kept: Vec<NetworkRow> = Vec::with_capacity(rows.len());
    for row in rows {
        let (Some(status), Some(year)) = (row.status, row.year) else {
            kept.push(row);
            continue;
        };
        if year > year_of_analysis {
            continue;
        }
        match status {
            ChangeStatus::Addition => kept.push(row),
            ChangeStatus::Removed => {
                kept.retain(|existing| existing.node_key() != row.node_key());
            }
            ChangeStatus::Change => {
                kept.retain(|existing| existing.node_key() != row.node_key());
                kept.push(row);
            }
        }
    }
    debug!(
        input_rows = input_count,
        output_rows = kept.len(),
        year_of_analysis,
        "change sequence applied"
    );
    kept
}

/// Split rows by their asset kind for per-type output sheets. Rows without
/// a kind value are left out of the split, matching the source tool.
pub fn split_by_kind(tables: &NetworkTables) -> BTreeMap<String, Vec<NetworkRow>> {
    let mut split: BTreeMap<String, Vec<NetworkRow>> = BTreeMap::new();
    for row in tables
        .circuits
        .iter()
        .chain(&tables.transformers)
        .chain(&tables.reactive)
    {
        let Some(kind) = row.asset_kind.as_ref() else {
            continue;
        };
        split.entry(kind.clone()).or_default().push(row.clone());
    }
    split
}
