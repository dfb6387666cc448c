//! Typed parsing of the register, mapping, coordinate and demand CSVs.

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, warn};

use grid_model::{CoordinateRecord, DemandRow, IcRow, MappingEntry, TecRow};

use crate::csv_table::{CsvTable, parse_f64, parse_year};

/// Date formats seen in register exports.
const DATE_FORMATS: [&str; 4] = ["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%d %B %Y"];

/// Parse an "MW Effective From" cell. Unparseable dates become `None`; the
/// capacity rules treat them as within the analysis horizon.
pub fn parse_effective_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    // Some exports carry a time component.
    let date_part = trimmed.split_whitespace().next().unwrap_or(trimmed);
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(date_part, format) {
            return Some(date);
        }
    }
    None
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse the TEC register.
pub fn parse_tec_register(table: &CsvTable, source_name: &str) -> Result<Vec<TecRow>> {
    table.require_columns(source_name, &["Project Number", "Project Name", "MW Effective From"])?;
    let project_number = table.column("Project Number");
    let project_name = table.column("Project Name");
    let host_to = table.column("HOST TO");
    let project_status = table.column("Project Status");
    let stage = table.column("Stage");
    let mw_connected = table.column("MW Connected");
    let mw_change = table.column("MW Increase / Decrease");
    let cumulative = table.column("Cumulative Total Capacity (MW)");
    let effective_from = table.column("MW Effective From");
    let consumed = [
        project_number,
        project_name,
        host_to,
        project_status,
        stage,
        mw_connected,
        mw_change,
        cumulative,
        effective_from,
    ];

    let mut rows = Vec::with_capacity(table.rows.len());
    for idx in 0..table.rows.len() {
        let number = table.value(idx, project_number).trim().to_string();
        if number.is_empty() {
            continue;
        }
        let extra: Vec<(String, String)> = table
            .headers
            .iter()
            .enumerate()
            .filter(|(col, _)| !consumed.contains(&Some(*col)))
            .map(|(col, header)| (header.clone(), table.value(idx, Some(col)).to_string()))
            .collect();
        rows.push(TecRow {
            project_number: number,
            project_name: table.value(idx, project_name).trim().to_string(),
            host_to: optional(table.value(idx, host_to)),
            project_status: optional(table.value(idx, project_status)),
            stage: optional(table.value(idx, stage)),
            mw_connected: parse_f64(table.value(idx, mw_connected)),
            mw_change: parse_f64(table.value(idx, mw_change)),
            cumulative_capacity: parse_f64(table.value(idx, cumulative)),
            mw_effective_from: parse_effective_date(table.value(idx, effective_from)),
            extra,
            ..TecRow::default()
        });
    }
    debug!(source = source_name, rows = rows.len(), "tec register parsed");
    Ok(rows)
}

/// Parse the interconnector register.
pub fn parse_ic_register(table: &CsvTable, source_name: &str) -> Result<Vec<IcRow>> {
    table.require_columns(source_name, &["Project Number", "Project Name", "MW Effective From"])?;
    let project_number = table.column("Project Number");
    let project_name = table.column("Project Name");
    let host_to = table.column("HOST TO");
    let stage = table.column("Stage");
    let asset_type = table.column("Asset Type");
    let import_total = table.column("MW Import - Total");
    let export_total = table.column("MW Export - Total");
    let import_change = table.column("MW Import - Increase / Decrease");
    let export_change = table.column("MW Export - Increase / Decrease");
    let effective_from = table.column("MW Effective From");
    let consumed = [
        project_number,
        project_name,
        host_to,
        stage,
        asset_type,
        import_total,
        export_total,
        import_change,
        export_change,
        effective_from,
    ];

    let mut rows = Vec::with_capacity(table.rows.len());
    for idx in 0..table.rows.len() {
        let number = table.value(idx, project_number).trim().to_string();
        if number.is_empty() {
            continue;
        }
        let extra: Vec<(String, String)> = table
            .headers
            .iter()
            .enumerate()
            .filter(|(col, _)| !consumed.contains(&Some(*col)))
            .map(|(col, header)| (header.clone(), table.value(idx, Some(col)).to_string()))
            .collect();
        rows.push(IcRow {
            project_number: number,
            project_name: table.value(idx, project_name).trim().to_string(),
            host_to: optional(table.value(idx, host_to)),
            stage: optional(table.value(idx, stage)),
            asset_type: optional(table.value(idx, asset_type)),
            mw_import_total: parse_f64(table.value(idx, import_total)),
            mw_export_total: parse_f64(table.value(idx, export_total)),
            mw_import_change: parse_f64(table.value(idx, import_change)),
            mw_export_change: parse_f64(table.value(idx, export_change)),
            mw_effective_from: parse_effective_date(table.value(idx, effective_from)),
            extra,
            ..IcRow::default()
        });
    }
    debug!(source = source_name, rows = rows.len(), "ic register parsed");
    Ok(rows)
}

/// Parse a project-to-node mapping file. Entry order is preserved so that
/// later entries win on duplicate project numbers.
pub fn parse_mapping(table: &CsvTable, source_name: &str) -> Result<Vec<MappingEntry>> {
    table.require_columns(source_name, &["Project Number", "Node_Name"])?;
    let project_number = table.column("Project Number");
    let node_name = table.column("Node_Name");
    let mut entries = Vec::with_capacity(table.rows.len());
    for idx in 0..table.rows.len() {
        let number = table.value(idx, project_number).trim().to_string();
        let node = table.value(idx, node_name).trim().to_string();
        if number.is_empty() || node.is_empty() {
            continue;
        }
        entries.push(MappingEntry {
            project_number: number,
            node_name: node,
        });
    }
    debug!(source = source_name, entries = entries.len(), "mapping parsed");
    Ok(entries)
}

/// Parse the substation coordinates file. The first occurrence of a site
/// code wins on duplicates.
pub fn parse_coordinates(table: &CsvTable, source_name: &str) -> Result<Vec<CoordinateRecord>> {
    table.require_columns(source_name, &["Site Code", "latitude", "longitude"])?;
    let site_code = table.column("Site Code");
    let latitude = table.column("latitude");
    let longitude = table.column("longitude");
    let mut records = Vec::with_capacity(table.rows.len());
    for idx in 0..table.rows.len() {
        let code = table.value(idx, site_code).trim().to_string();
        if code.is_empty() {
            continue;
        }
        let (Some(lat), Some(lon)) = (
            parse_f64(table.value(idx, latitude)),
            parse_f64(table.value(idx, longitude)),
        ) else {
            warn!(source = source_name, site_code = %code, "unparseable coordinates, record skipped");
            continue;
        };
        records.push(CoordinateRecord {
            site_code: code,
            latitude: lat,
            longitude: lon,
        });
    }
    debug!(source = source_name, records = records.len(), "coordinates parsed");
    Ok(records)
}

/// Parse the FES demand export. Underscores in GSP names are stripped so
/// they can be matched against ETYS node names.
pub fn parse_demand(table: &CsvTable, source_name: &str) -> Result<Vec<DemandRow>> {
    table.require_columns(source_name, &["GSP", "year", "scenario", "type"])?;
    let gsp = table.column("GSP");
    let year = table.column("year");
    let scenario = table.column("scenario");
    let demand_type = table.column("type");
    let consumed = [gsp, year, scenario, demand_type];

    let mut rows = Vec::with_capacity(table.rows.len());
    for idx in 0..table.rows.len() {
        let gsp_value = table.value(idx, gsp).trim().replace('_', "");
        if gsp_value.is_empty() {
            continue;
        }
        let extra: Vec<(String, String)> = table
            .headers
            .iter()
            .enumerate()
            .filter(|(col, _)| !consumed.contains(&Some(*col)))
            .map(|(col, header)| (header.clone(), table.value(idx, Some(col)).to_string()))
            .collect();
        rows.push(DemandRow {
            gsp: gsp_value,
            year: parse_year(table.value(idx, year)),
            scenario: table.value(idx, scenario).trim().to_string(),
            demand_type: table.value(idx, demand_type).trim().to_string(),
            extra,
            etys_node: None,
        });
    }
    debug!(source = source_name, rows = rows.len(), "demand data parsed");
    Ok(rows)
}
