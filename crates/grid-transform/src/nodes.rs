//! Node list compilation and the coordinate / site name join.

use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use grid_map::SiteNameMap;
use grid_model::{CoordinateRecord, Finding, FindingCode, NodeRecord, derive_voltage, site_code};

use crate::network::NetworkTables;

fn record_node<'a>(
    node_sheets: &mut BTreeMap<String, BTreeSet<&'a str>>,
    node: &str,
    sheet: &'a str,
) {
    let trimmed = node.trim();
    if trimmed.is_empty() {
        return;
    }
    node_sheets
        .entry(trimmed.to_string())
        .or_default()
        .insert(sheet);
}

/// Compile the unique, sorted node list from the filtered network tables,
/// with derived voltage and sheet/owner provenance.
pub fn compile_nodes(tables: &NetworkTables) -> Vec<NodeRecord> {
    let mut node_sheets: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
    for row in tables
        .circuits
        .iter()
        .chain(&tables.transformers)
        .chain(&tables.reactive)
    {
        record_node(&mut node_sheets, &row.node1, &row.sheet);
        if let Some(node2) = &row.node2 {
            record_node(&mut node_sheets, node2, &row.sheet);
        }
    }
    let nodes: Vec<NodeRecord> = node_sheets
        .into_iter()
        .map(|(node, sheets)| {
            let owners: BTreeSet<_> = sheets
                .iter()
                .filter_map(|sheet| grid_ingest::sheet_owner(sheet))
                .collect();
            NodeRecord {
                voltage: derive_voltage(&node),
                sheet_names: sheets.iter().map(|sheet| (*sheet).to_string()).collect(),
                relevant_owners: owners.into_iter().collect(),
                site_name: None,
                latitude: None,
                longitude: None,
                node,
            }
        })
        .collect();
    info!(node_count = nodes.len(), "node list compiled");
    nodes
}

/// Join site names and coordinates onto the compiled nodes, keyed on the
/// four-character site code. Unresolved references are findings, never
/// silent drops: the node is kept with blank fields.
pub fn attach_site_details(
    nodes: &mut [NodeRecord],
    sites: &SiteNameMap,
    coordinates: &[CoordinateRecord],
) -> Vec<Finding> {
    let mut coordinate_map: BTreeMap<&str, &CoordinateRecord> = BTreeMap::new();
    for record in coordinates {
        // First occurrence wins on duplicate site codes.
        coordinate_map.entry(record.site_code.as_str()).or_insert(record);
    }

    let mut missing_coordinates: BTreeSet<String> = BTreeSet::new();
    let mut missing_sites: BTreeSet<String> = BTreeSet::new();
    for node in nodes.iter_mut() {
        let code = site_code(&node.node);
        match coordinate_map.get(code) {
            Some(record) => {
                node.latitude = Some(record.latitude);
                node.longitude = Some(record.longitude);
            }
            None => {
                missing_coordinates.insert(code.to_string());
            }
        }
        match sites.get(code) {
            Some(name) => node.site_name = Some(name.to_string()),
            None => {
                missing_sites.insert(code.to_string());
            }
        }
    }

    let mut findings = Vec::new();
    for code in missing_coordinates {
        findings.push(Finding::warning(
            FindingCode::UnresolvedCoordinates,
            "nodes",
            format!("no coordinate record for site code '{code}'"),
        ));
    }
    for code in missing_sites {
        findings.push(Finding::warning(
            FindingCode::UnresolvedSiteName,
            "nodes",
            format!("no site name for site code '{code}'"),
        ));
    }
    findings
}
