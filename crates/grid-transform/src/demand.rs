//! FES demand data filtering and node assignment.

use tracing::debug;

use grid_map::NodeIndex;
use grid_model::{DemandRow, Finding, FindingCode, RunConfig};

/// Keep rows for the configured two-digit year, scenario and demand types.
pub fn filter_demand(rows: Vec<DemandRow>, config: &RunConfig) -> Vec<DemandRow> {
    let target_year = config.year_two_digits();
    let input_count = rows.len();
    let kept: Vec<DemandRow> = rows
        .into_iter()
        .filter(|row| {
            row.year == Some(target_year)
                && row.scenario == config.fes_scenario
                && config.demand_types.iter().any(|t| t == &row.demand_type)
        })
        .collect();
    debug!(
        input_rows = input_count,
        output_rows = kept.len(),
        year = target_year,
        scenario = %config.fes_scenario,
        "demand data filtered"
    );
    kept
}

/// Resolve each GSP against the compiled node list. Unresolved GSPs keep a
/// blank node and are reported once per GSP.
pub fn assign_demand_nodes(rows: &mut [DemandRow], index: &NodeIndex) -> Vec<Finding> {
    let mut unresolved = std::collections::BTreeSet::new();
    for row in rows.iter_mut() {
        match index.resolve_name(&row.gsp) {
            Some(node) => row.etys_node = Some(node.to_string()),
            None => {
                unresolved.insert(row.gsp.clone());
            }
        }
    }
    unresolved
        .into_iter()
        .map(|gsp| {
            Finding::warning(
                FindingCode::UnresolvedNode,
                "demand data",
                format!("no node match for GSP '{gsp}'"),
            )
        })
        .collect()
}
