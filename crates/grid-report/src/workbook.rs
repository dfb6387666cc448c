//! The collated output workbook.
//!
//! One sheet of compiled nodes, one sheet per network asset type, the two
//! processed registers, the filtered demand data and the intra-HVDC links.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};
use tracing::info;

use grid_model::{DemandRow, HvdcRow, IcRow, NetworkRow, NodeRecord, TecRow};

/// Excel limits sheet names to 31 characters and forbids path separators,
/// which asset type values like "Series Reactor / Capacitor" run into.
pub fn safe_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    cleaned.chars().take(31).collect()
}

/// Everything that goes into the output workbook, borrowed from the
/// pipeline stages.
#[derive(Debug)]
pub struct WorkbookOutput<'a> {
    pub nodes: &'a [NodeRecord],
    /// Network rows grouped by asset kind, one sheet each.
    pub asset_sheets: &'a BTreeMap<String, Vec<NetworkRow>>,
    pub tec: &'a [TecRow],
    pub ic: &'a [IcRow],
    pub demand: &'a [DemandRow],
    pub hvdc: &'a [HvdcRow],
}

/// Union of the extra-column headers across rows, in first-seen order.
fn union_headers<'a>(extras: impl Iterator<Item = &'a Vec<(String, String)>>) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for extra in extras {
        for (header, _) in extra {
            if !headers.iter().any(|existing| existing == header) {
                headers.push(header.clone());
            }
        }
    }
    headers
}

fn extra_value<'a>(extra: &'a [(String, String)], header: &str) -> &'a str {
    extra
        .iter()
        .find(|(name, _)| name == header)
        .map(|(_, value)| value.as_str())
        .unwrap_or("")
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    Ok(())
}

fn write_opt_number(sheet: &mut Worksheet, row: u32, col: u16, value: Option<f64>) -> Result<()> {
    if let Some(value) = value {
        sheet.write_number(row, col, value)?;
    }
    Ok(())
}

fn write_opt_string(sheet: &mut Worksheet, row: u32, col: u16, value: Option<&str>) -> Result<()> {
    if let Some(value) = value {
        sheet.write_string(row, col, value)?;
    }
    Ok(())
}

fn write_nodes_sheet(sheet: &mut Worksheet, nodes: &[NodeRecord]) -> Result<()> {
    write_headers(
        sheet,
        &[
            "Node",
            "Voltage (Derived)",
            "Sheet Names",
            "Relevant TO",
            "Site Name",
            "latitude",
            "longitude",
        ],
    )?;
    for (idx, node) in nodes.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, &node.node)?;
        write_opt_string(sheet, row, 1, node.voltage)?;
        sheet.write_string(row, 2, node.sheet_names.join(", "))?;
        let owners: Vec<&str> = node.relevant_owners.iter().map(|o| o.as_str()).collect();
        sheet.write_string(row, 3, owners.join(", "))?;
        write_opt_string(sheet, row, 4, node.site_name.as_deref())?;
        write_opt_number(sheet, row, 5, node.latitude)?;
        write_opt_number(sheet, row, 6, node.longitude)?;
    }
    Ok(())
}

fn write_network_sheet(sheet: &mut Worksheet, rows: &[NetworkRow]) -> Result<()> {
    let extra_headers = union_headers(rows.iter().map(|row| &row.extra));
    let mut headers = vec!["Node 1", "Node 2", "Status", "Year"];
    headers.extend(extra_headers.iter().map(String::as_str));
    headers.push("Sheet_Name");
    write_headers(sheet, &headers)?;
    let sheet_col = headers.len() as u16 - 1;
    for (idx, network_row) in rows.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, &network_row.node1)?;
        write_opt_string(sheet, row, 1, network_row.node2.as_deref())?;
        write_opt_string(sheet, row, 2, network_row.status.map(|s| s.as_str()))?;
        if let Some(year) = network_row.year {
            sheet.write_number(row, 3, f64::from(year))?;
        }
        for (offset, header) in extra_headers.iter().enumerate() {
            let value = extra_value(&network_row.extra, header);
            if !value.is_empty() {
                sheet.write_string(row, offset as u16 + 4, value)?;
            }
        }
        sheet.write_string(row, sheet_col, &network_row.sheet)?;
    }
    Ok(())
}

fn write_tec_sheet(sheet: &mut Worksheet, rows: &[TecRow]) -> Result<()> {
    let extra_headers = union_headers(rows.iter().map(|row| &row.extra));
    let mut headers = vec![
        "Project Number",
        "Project Name",
        "HOST TO",
        "Project Status",
        "Stage",
        "MW Connected",
        "MW Increase / Decrease",
        "Cumulative Total Capacity (MW)",
        "MW Effective From",
    ];
    headers.extend(extra_headers.iter().map(String::as_str));
    headers.extend(["Node_Name", "MW_Capacity", "ETYS_Node"]);
    write_headers(sheet, &headers)?;
    let derived_col = headers.len() as u16 - 3;
    for (idx, tec) in rows.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, &tec.project_number)?;
        sheet.write_string(row, 1, &tec.project_name)?;
        write_opt_string(sheet, row, 2, tec.host_to.as_deref())?;
        write_opt_string(sheet, row, 3, tec.project_status.as_deref())?;
        write_opt_string(sheet, row, 4, tec.stage.as_deref())?;
        write_opt_number(sheet, row, 5, tec.mw_connected)?;
        write_opt_number(sheet, row, 6, tec.mw_change)?;
        write_opt_number(sheet, row, 7, tec.cumulative_capacity)?;
        if let Some(date) = tec.mw_effective_from {
            sheet.write_string(row, 8, date.format("%d/%m/%Y").to_string())?;
        }
        for (offset, header) in extra_headers.iter().enumerate() {
            let value = extra_value(&tec.extra, header);
            if !value.is_empty() {
                sheet.write_string(row, offset as u16 + 9, value)?;
            }
        }
        write_opt_string(sheet, row, derived_col, tec.mapped_node.as_deref())?;
        write_opt_number(sheet, row, derived_col + 1, tec.mw_capacity)?;
        write_opt_string(sheet, row, derived_col + 2, tec.etys_node.as_deref())?;
    }
    Ok(())
}

fn write_ic_sheet(sheet: &mut Worksheet, rows: &[IcRow]) -> Result<()> {
    let extra_headers = union_headers(rows.iter().map(|row| &row.extra));
    let mut headers = vec![
        "Project Number",
        "Project Name",
        "HOST TO",
        "Asset Type",
        "Stage",
        "MW Import - Total",
        "MW Export - Total",
        "MW Import - Increase / Decrease",
        "MW Export - Increase / Decrease",
        "MW Effective From",
    ];
    headers.extend(extra_headers.iter().map(String::as_str));
    headers.extend(["Node_Name", "MW_Import_Capacity", "MW_Export_Capacity", "ETYS_Node"]);
    write_headers(sheet, &headers)?;
    let derived_col = headers.len() as u16 - 4;
    for (idx, ic) in rows.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, &ic.project_number)?;
        sheet.write_string(row, 1, &ic.project_name)?;
        write_opt_string(sheet, row, 2, ic.host_to.as_deref())?;
        write_opt_string(sheet, row, 3, ic.asset_type.as_deref())?;
        write_opt_string(sheet, row, 4, ic.stage.as_deref())?;
        write_opt_number(sheet, row, 5, ic.mw_import_total)?;
        write_opt_number(sheet, row, 6, ic.mw_export_total)?;
        write_opt_number(sheet, row, 7, ic.mw_import_change)?;
        write_opt_number(sheet, row, 8, ic.mw_export_change)?;
        if let Some(date) = ic.mw_effective_from {
            sheet.write_string(row, 9, date.format("%d/%m/%Y").to_string())?;
        }
        for (offset, header) in extra_headers.iter().enumerate() {
            let value = extra_value(&ic.extra, header);
            if !value.is_empty() {
                sheet.write_string(row, offset as u16 + 10, value)?;
            }
        }
        write_opt_string(sheet, row, derived_col, ic.mapped_node.as_deref())?;
        write_opt_number(sheet, row, derived_col + 1, ic.mw_import_capacity)?;
        write_opt_number(sheet, row, derived_col + 2, ic.mw_export_capacity)?;
        write_opt_string(sheet, row, derived_col + 3, ic.etys_node.as_deref())?;
    }
    Ok(())
}

fn write_demand_sheet(sheet: &mut Worksheet, rows: &[DemandRow]) -> Result<()> {
    let extra_headers = union_headers(rows.iter().map(|row| &row.extra));
    let mut headers = vec!["GSP", "year", "scenario", "type"];
    headers.extend(extra_headers.iter().map(String::as_str));
    headers.push("ETYS_Node");
    write_headers(sheet, &headers)?;
    let node_col = headers.len() as u16 - 1;
    for (idx, demand) in rows.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, &demand.gsp)?;
        if let Some(year) = demand.year {
            sheet.write_number(row, 1, f64::from(year))?;
        }
        sheet.write_string(row, 2, &demand.scenario)?;
        sheet.write_string(row, 3, &demand.demand_type)?;
        for (offset, header) in extra_headers.iter().enumerate() {
            let value = extra_value(&demand.extra, header);
            if !value.is_empty() {
                sheet.write_string(row, offset as u16 + 4, value)?;
            }
        }
        write_opt_string(sheet, row, node_col, demand.etys_node.as_deref())?;
    }
    Ok(())
}

fn write_hvdc_sheet(sheet: &mut Worksheet, rows: &[HvdcRow]) -> Result<()> {
    let extra_headers = union_headers(rows.iter().map(|row| &row.extra));
    let mut headers = vec!["Planned from year", "Year", "Status"];
    headers.extend(extra_headers.iter().map(String::as_str));
    write_headers(sheet, &headers)?;
    for (idx, hvdc) in rows.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet.write_string(row, 0, &hvdc.planned_from)?;
        if let Some(year) = hvdc.year {
            sheet.write_number(row, 1, f64::from(year))?;
        }
        sheet.write_string(row, 2, &hvdc.status)?;
        for (offset, header) in extra_headers.iter().enumerate() {
            let value = extra_value(&hvdc.extra, header);
            if !value.is_empty() {
                sheet.write_string(row, offset as u16 + 3, value)?;
            }
        }
    }
    Ok(())
}

/// Write the collated workbook to `path`.
pub fn write_workbook(path: &Path, output: &WorkbookOutput<'_>) -> Result<()> {
    let mut workbook = Workbook::new();

    let nodes_sheet = workbook.add_worksheet();
    nodes_sheet.set_name("Nodes")?;
    write_nodes_sheet(nodes_sheet, output.nodes)?;

    for (kind, rows) in output.asset_sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(safe_sheet_name(kind))?;
        write_network_sheet(sheet, rows)?;
    }

    let tec_sheet = workbook.add_worksheet();
    tec_sheet.set_name("TEC Register")?;
    write_tec_sheet(tec_sheet, output.tec)?;

    let ic_sheet = workbook.add_worksheet();
    ic_sheet.set_name("IC Register")?;
    write_ic_sheet(ic_sheet, output.ic)?;

    let demand_sheet = workbook.add_worksheet();
    demand_sheet.set_name("Demand Data")?;
    write_demand_sheet(demand_sheet, output.demand)?;

    let hvdc_sheet = workbook.add_worksheet();
    hvdc_sheet.set_name("Intra_HVDC")?;
    write_hvdc_sheet(hvdc_sheet, output.hvdc)?;

    workbook
        .save(path)
        .with_context(|| format!("save workbook: {}", path.display()))?;
    info!(
        path = %path.display(),
        nodes = output.nodes.len(),
        asset_sheets = output.asset_sheets.len(),
        "output workbook written"
    );
    Ok(())
}
