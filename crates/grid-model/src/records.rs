//! Record types produced by the collation pipeline.
//!
//! All records are created in a single load pass, transformed in memory, and
//! discarded once the output workbook is written.

use chrono::NaiveDate;

use crate::enums::{AssetClass, ChangeStatus, TransmissionOwner};

/// A row from the TEC register, joined with its mapping entry and enriched
/// with the derived capacity and resolved ETYS node.
#[derive(Debug, Clone, Default)]
pub struct TecRow {
    pub project_number: String,
    pub project_name: String,
    pub host_to: Option<String>,
    pub project_status: Option<String>,
    pub stage: Option<String>,
    pub mw_connected: Option<f64>,
    /// "MW Increase / Decrease" column.
    pub mw_change: Option<f64>,
    /// "Cumulative Total Capacity (MW)" column.
    pub cumulative_capacity: Option<f64>,
    pub mw_effective_from: Option<NaiveDate>,
    /// Remaining register columns in file order, passed through to the
    /// output.
    pub extra: Vec<(String, String)>,
    /// Node name joined from the mapping file.
    pub mapped_node: Option<String>,
    /// Derived capacity for the analysis year.
    pub mw_capacity: Option<f64>,
    /// Node resolved against the compiled network node list.
    pub etys_node: Option<String>,
}

/// A row from the interconnector register, with derived import/export
/// capacities.
#[derive(Debug, Clone, Default)]
pub struct IcRow {
    pub project_number: String,
    pub project_name: String,
    pub host_to: Option<String>,
    pub stage: Option<String>,
    pub asset_type: Option<String>,
    pub mw_import_total: Option<f64>,
    pub mw_export_total: Option<f64>,
    /// "MW Import - Increase / Decrease" column.
    pub mw_import_change: Option<f64>,
    /// "MW Export - Increase / Decrease" column.
    pub mw_export_change: Option<f64>,
    pub mw_effective_from: Option<NaiveDate>,
    /// Remaining register columns in file order, passed through to the
    /// output.
    pub extra: Vec<(String, String)>,
    pub mapped_node: Option<String>,
    pub mw_import_capacity: Option<f64>,
    pub mw_export_capacity: Option<f64>,
    pub etys_node: Option<String>,
}

/// A project-number-to-node-name pair from a register mapping file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub project_number: String,
    pub node_name: String,
}

/// Geographic coordinates for a substation site code.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateRecord {
    pub site_code: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A circuit, transformer, or reactive compensation row from an ETYS network
/// data sheet. Reactive compensation rows have a single node.
#[derive(Debug, Clone)]
pub struct NetworkRow {
    pub asset_class: AssetClass,
    /// Source sheet name, kept for provenance.
    pub sheet: String,
    pub node1: String,
    pub node2: Option<String>,
    pub status: Option<ChangeStatus>,
    pub year: Option<i32>,
    /// Circuit Type / Transformer Type / Compensation Type value.
    pub asset_kind: Option<String>,
    /// Remaining columns in sheet order, passed through to the output.
    pub extra: Vec<(String, String)>,
}

impl NetworkRow {
    /// Identity used by Removed/Change sequencing: the node pair for
    /// branches, the single node for shunts.
    pub fn node_key(&self) -> (&str, Option<&str>) {
        (self.node1.as_str(), self.node2.as_deref())
    }
}

/// A compiled network node with everything joined onto it.
#[derive(Debug, Clone)]
pub struct NodeRecord {
    pub node: String,
    pub voltage: Option<&'static str>,
    /// Sheets the node appears in, sorted.
    pub sheet_names: Vec<String>,
    /// Owners whose sheets reference the node, sorted.
    pub relevant_owners: Vec<TransmissionOwner>,
    pub site_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A filtered FES active power demand row.
#[derive(Debug, Clone, Default)]
pub struct DemandRow {
    pub gsp: String,
    pub year: Option<i32>,
    pub scenario: String,
    pub demand_type: String,
    /// Remaining columns (demand values) in file order.
    pub extra: Vec<(String, String)>,
    pub etys_node: Option<String>,
}

/// An intra-HVDC link row from ETYS sheet B-5-1.
#[derive(Debug, Clone, Default)]
pub struct HvdcRow {
    /// Raw "Planned from year" value.
    pub planned_from: String,
    /// Numeric year parsed from `planned_from`, when present.
    pub year: Option<i32>,
    /// Derived status: "Addition" for dated rows, "Existing" otherwise.
    pub status: String,
    pub extra: Vec<(String, String)>,
}
