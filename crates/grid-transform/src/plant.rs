//! Register processing: mapping join, owner filter, capacity derivation and
//! node assignment.

use std::collections::BTreeSet;

use chrono::Datelike;
use tracing::{debug, warn};

use grid_map::{NodeIndex, ProjectNodeMap};
use grid_model::{
    Finding, FindingCode, IcRow, TecRow, TransmissionOwner, is_transmission_voltage,
};

/// Common surface of the TEC and IC register rows used by the shared
/// mapping-join and node-assignment steps.
pub trait RegisterRecord {
    fn project_number(&self) -> &str;
    fn project_name(&self) -> &str;
    fn host_to(&self) -> Option<&str>;
    fn mapped_node(&self) -> Option<&str>;
    fn set_mapped_node(&mut self, node: Option<String>);
    /// Largest derived capacity on the row, used for voltage preference.
    fn max_capacity(&self) -> f64;
    fn set_etys_node(&mut self, node: Option<String>);
}

impl RegisterRecord for TecRow {
    fn project_number(&self) -> &str {
        &self.project_number
    }
    fn project_name(&self) -> &str {
        &self.project_name
    }
    fn host_to(&self) -> Option<&str> {
        self.host_to.as_deref()
    }
    fn mapped_node(&self) -> Option<&str> {
        self.mapped_node.as_deref()
    }
    fn set_mapped_node(&mut self, node: Option<String>) {
        self.mapped_node = node;
    }
    fn max_capacity(&self) -> f64 {
        self.mw_capacity.unwrap_or(0.0)
    }
    fn set_etys_node(&mut self, node: Option<String>) {
        self.etys_node = node;
    }
}

impl RegisterRecord for IcRow {
    fn project_number(&self) -> &str {
        &self.project_number
    }
    fn project_name(&self) -> &str {
        &self.project_name
    }
    fn host_to(&self) -> Option<&str> {
        self.host_to.as_deref()
    }
    fn mapped_node(&self) -> Option<&str> {
        self.mapped_node.as_deref()
    }
    fn set_mapped_node(&mut self, node: Option<String>) {
        self.mapped_node = node;
    }
    fn max_capacity(&self) -> f64 {
        self.mw_import_capacity
            .unwrap_or(0.0)
            .max(self.mw_export_capacity.unwrap_or(0.0))
    }
    fn set_etys_node(&mut self, node: Option<String>) {
        self.etys_node = node;
    }
}

/// Join the mapping file onto register rows by project number. Rows without
/// a mapping entry are kept with a blank node and reported.
pub fn join_mapping<R: RegisterRecord>(
    rows: &mut [R],
    map: &ProjectNodeMap,
    register_name: &str,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    for row in rows.iter_mut() {
        match map.resolve(row.project_number()) {
            Some(node) => row.set_mapped_node(Some(node.to_string())),
            None => {
                findings.push(Finding::warning(
                    FindingCode::UnresolvedMapping,
                    register_name,
                    format!(
                        "no mapping entry for project '{}' ({})",
                        row.project_number(),
                        row.project_name()
                    ),
                ));
            }
        }
    }
    findings
}

/// Keep rows hosted by one of the selected owners. When the register carries
/// no HOST TO data at all, no filtering is applied.
pub fn filter_by_owner<R: RegisterRecord>(
    rows: Vec<R>,
    owners: &BTreeSet<TransmissionOwner>,
    register_name: &str,
) -> Vec<R> {
    if rows.iter().all(|row| row.host_to().is_none()) {
        warn!(register = register_name, "no HOST TO values, owner filter skipped");
        return rows;
    }
    let input_count = rows.len();
    let kept: Vec<R> = rows
        .into_iter()
        .filter(|row| {
            row.host_to()
                .and_then(TransmissionOwner::parse)
                .is_some_and(|owner| owners.contains(&owner))
        })
        .collect();
    debug!(
        register = register_name,
        input_rows = input_count,
        output_rows = kept.len(),
        "owner filter applied"
    );
    kept
}

fn beyond_analysis_year(date: Option<chrono::NaiveDate>, year_of_analysis: i32) -> bool {
    date.is_some_and(|date| date.year() > year_of_analysis)
}

/// Derive the `MW_Capacity` column for TEC rows.
///
/// Built projects effective after the analysis year contribute what is
/// already connected; otherwise the cumulative total applies. Unbuilt
/// projects effective after the analysis year contribute nothing; within the
/// horizon, staged projects contribute their increase/decrease and unstaged
/// ones the cumulative total.
pub fn derive_tec_capacities(rows: &mut [TecRow], year_of_analysis: i32) {
    for row in rows.iter_mut() {
        let beyond = beyond_analysis_year(row.mw_effective_from, year_of_analysis);
        row.mw_capacity = if row.project_status.as_deref() == Some("Built") {
            if beyond {
                row.mw_connected
            } else {
                row.cumulative_capacity
            }
        } else if beyond {
            Some(0.0)
        } else if row.stage.is_none() {
            row.cumulative_capacity
        } else {
            row.mw_change
        };
    }
}

/// Derive `MW_Import_Capacity` / `MW_Export_Capacity` for IC rows. Stage
/// blank or 1 takes the totals, later stages the increase/decrease figures.
pub fn derive_ic_capacities(rows: &mut [IcRow], year_of_analysis: i32) {
    for row in rows.iter_mut() {
        if beyond_analysis_year(row.mw_effective_from, year_of_analysis) {
            row.mw_import_capacity = Some(0.0);
            row.mw_export_capacity = Some(0.0);
            continue;
        }
        let first_stage = match row.stage.as_deref() {
            None => true,
            Some(stage) => stage.trim() == "1",
        };
        if first_stage {
            row.mw_import_capacity = row.mw_import_total;
            row.mw_export_capacity = row.mw_export_total;
        } else {
            row.mw_import_capacity = row.mw_import_change;
            row.mw_export_capacity = row.mw_export_change;
        }
    }
}

/// Resolve each row's mapped node against the compiled node list.
///
/// Unresolved names are findings; resolved high-capacity projects landing on
/// a non-transmission busbar are flagged as well, since a project above the
/// threshold is expected at 275 or 400 kV.
pub fn assign_nodes<R: RegisterRecord>(
    rows: &mut [R],
    index: &NodeIndex,
    threshold_mw: f64,
    register_name: &str,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    for row in rows.iter_mut() {
        let Some(name) = row.mapped_node().map(str::to_string) else {
            continue;
        };
        let capacity = row.max_capacity();
        match index.resolve(&name, capacity, threshold_mw) {
            Some(matched) => {
                let node = matched.node().to_string();
                if capacity > threshold_mw && !is_transmission_voltage(&node) {
                    findings.push(Finding::warning(
                        FindingCode::HighCapacityVoltage,
                        register_name,
                        format!(
                            "project '{}' ({capacity} MW) assigned to non-transmission node '{node}'",
                            row.project_name()
                        ),
                    ));
                }
                row.set_etys_node(Some(node));
            }
            None => {
                findings.push(Finding::warning(
                    FindingCode::UnresolvedNode,
                    register_name,
                    format!(
                        "no node match for project '{}', node name '{name}'",
                        row.project_name()
                    ),
                ));
            }
        }
    }
    findings
}

/// TEC output ordering: by project name, then project number for stability.
pub fn sort_tec(rows: &mut [TecRow]) {
    rows.sort_by(|a, b| {
        a.project_name
            .cmp(&b.project_name)
            .then_with(|| a.project_number.cmp(&b.project_number))
    });
}

/// IC output ordering: by asset type, then project name.
pub fn sort_ic(rows: &mut [IcRow]) {
    rows.sort_by(|a, b| {
        a.asset_type
            .cmp(&b.asset_type)
            .then_with(|| a.project_name.cmp(&b.project_name))
    });
}
