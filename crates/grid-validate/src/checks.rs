//! Structural checks over the compiled network.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use grid_model::{AssetClass, Finding, FindingCode, NetworkRow, NodeRecord};

/// Branch rows (circuits and transformers) must name both endpoints. A row
/// with a missing second node cannot be placed in the network graph, so this
/// is an error-level finding.
pub fn missing_branch_endpoints(rows: &[NetworkRow]) -> Vec<Finding> {
    let mut findings = Vec::new();
    for row in rows {
        if row.asset_class == AssetClass::Reactive {
            continue;
        }
        if row.node2.as_deref().is_none_or(str::is_empty) {
            findings.push(Finding::error(
                FindingCode::MissingBranchEndpoint,
                row.sheet.clone(),
                format!("branch at node '{}' has no second endpoint", row.node1),
            ));
        }
    }
    findings
}

fn branch_degrees<'a>(
    circuits: &'a [NetworkRow],
    transformers: &'a [NetworkRow],
) -> BTreeMap<&'a str, usize> {
    let mut degrees: BTreeMap<&str, usize> = BTreeMap::new();
    for row in circuits.iter().chain(transformers) {
        *degrees.entry(row.node1.as_str()).or_default() += 1;
        if let Some(node2) = row.node2.as_deref() {
            *degrees.entry(node2).or_default() += 1;
        }
    }
    degrees
}

/// Report compiled nodes that no circuit or transformer touches.
///
/// A node known only from reactive compensation sheets is expected to be
/// unconnected in the branch graph; anything else points at a data defect in
/// the source sheets.
pub fn isolated_nodes(
    nodes: &[NodeRecord],
    circuits: &[NetworkRow],
    transformers: &[NetworkRow],
    reactive: &[NetworkRow],
) -> Vec<Finding> {
    let degrees = branch_degrees(circuits, transformers);
    let shunt_nodes: BTreeSet<&str> = reactive.iter().map(|row| row.node1.as_str()).collect();

    let mut findings = Vec::new();
    for node in nodes {
        if degrees.contains_key(node.node.as_str()) {
            continue;
        }
        let message = if shunt_nodes.contains(node.node.as_str()) {
            format!(
                "node '{}' appears only in reactive compensation data",
                node.node
            )
        } else {
            format!("node '{}' is not connected to any branch", node.node)
        };
        findings.push(Finding::warning(FindingCode::IsolatedNode, "network", message));
    }
    debug!(
        nodes = nodes.len(),
        isolated = findings.len(),
        "isolation check complete"
    );
    findings
}
