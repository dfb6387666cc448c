use std::collections::BTreeSet;

use grid_map::SiteNameMap;
use grid_model::{
    AssetClass, ChangeStatus, CoordinateRecord, FindingCode, NetworkRow, TransmissionOwner,
};
use grid_transform::{NetworkTables, apply_change_sequence, attach_site_details, compile_nodes, split_by_kind};

fn branch(node1: &str, node2: &str, status: Option<ChangeStatus>, year: Option<i32>) -> NetworkRow {
    NetworkRow {
        asset_class: AssetClass::Circuit,
        sheet: "B-2-1c".to_string(),
        node1: node1.to_string(),
        node2: Some(node2.to_string()),
        status,
        year,
        asset_kind: Some("OHL".to_string()),
        extra: Vec::new(),
    }
}

#[test]
fn existing_rows_without_status_are_kept() {
    let rows = vec![branch("HEYS40", "PENT40", None, None)];
    let kept = apply_change_sequence(rows, 2030);
    assert_eq!(kept.len(), 1);
}

#[test]
fn changes_beyond_the_analysis_year_are_dropped() {
    let rows = vec![branch(
        "HEYS40",
        "PENT40",
        Some(ChangeStatus::Addition),
        Some(2035),
    )];
    assert!(apply_change_sequence(rows, 2030).is_empty());
}

#[test]
fn removed_rows_delete_earlier_entries_with_same_nodes() {
    let rows = vec![
        branch("HEYS40", "PENT40", None, None),
        branch("HEYS40", "PENT40", Some(ChangeStatus::Removed), Some(2028)),
    ];
    assert!(apply_change_sequence(rows, 2030).is_empty());
}

#[test]
fn change_rows_replace_earlier_entries() {
    let mut replacement = branch("HEYS40", "PENT40", Some(ChangeStatus::Change), Some(2028));
    replacement.asset_kind = Some("Cable".to_string());
    let rows = vec![branch("HEYS40", "PENT40", None, None), replacement];
    let kept = apply_change_sequence(rows, 2030);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].asset_kind.as_deref(), Some("Cable"));
}

#[test]
fn removal_of_a_different_branch_leaves_rows_alone() {
    let rows = vec![
        branch("HEYS40", "PENT40", None, None),
        branch("HEYS40", "WYLF40", Some(ChangeStatus::Removed), Some(2028)),
    ];
    let kept = apply_change_sequence(rows, 2030);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].node2.as_deref(), Some("PENT40"));
}

#[test]
fn compiled_nodes_cover_both_endpoints_with_provenance() {
    let tables = NetworkTables {
        circuits: vec![branch("HEYS40", "PENT40", None, None)],
        transformers: Vec::new(),
        reactive: Vec::new(),
    };
    let nodes = compile_nodes(&tables);
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].node, "HEYS40");
    assert_eq!(nodes[0].voltage, Some("400"));
    assert_eq!(nodes[0].sheet_names, vec!["B-2-1c".to_string()]);
    assert_eq!(nodes[0].relevant_owners, vec![TransmissionOwner::Nget]);
}

#[test]
fn site_details_join_and_unresolved_findings() {
    let tables = NetworkTables {
        circuits: vec![branch("HEYS40", "PENT40", None, None)],
        transformers: Vec::new(),
        reactive: Vec::new(),
    };
    let mut nodes = compile_nodes(&tables);
    let sites = SiteNameMap::from_pairs([("HEYS".to_string(), "Heysham".to_string())]);
    let coordinates = vec![CoordinateRecord {
        site_code: "HEYS".to_string(),
        latitude: 54.03,
        longitude: -2.9,
    }];
    let findings = attach_site_details(&mut nodes, &sites, &coordinates);

    let heysham = nodes.iter().find(|n| n.node == "HEYS40").unwrap();
    assert_eq!(heysham.site_name.as_deref(), Some("Heysham"));
    assert_eq!(heysham.latitude, Some(54.03));

    let pentir = nodes.iter().find(|n| n.node == "PENT40").unwrap();
    assert_eq!(pentir.latitude, None);

    assert!(findings.iter().any(|finding| {
        finding.code == FindingCode::UnresolvedCoordinates && finding.message.contains("PENT")
    }));
    assert!(findings.iter().any(|finding| {
        finding.code == FindingCode::UnresolvedSiteName && finding.message.contains("PENT")
    }));
}

#[test]
fn split_by_kind_groups_rows() {
    let mut cable = branch("HEYS40", "PENT40", None, None);
    cable.asset_kind = Some("Cable".to_string());
    let mut untyped = branch("WYLF40", "PENT40", None, None);
    untyped.asset_kind = None;
    let tables = NetworkTables {
        circuits: vec![branch("HEYS40", "PENT40", None, None), cable, untyped],
        transformers: Vec::new(),
        reactive: Vec::new(),
    };
    let split = split_by_kind(&tables);
    assert_eq!(split.len(), 2);
    assert_eq!(split["OHL"].len(), 1);
    assert_eq!(split["Cable"].len(), 1);
}

#[test]
fn owner_set_is_ordered() {
    // BTreeSet ordering keeps the owner filter deterministic.
    let owners: BTreeSet<TransmissionOwner> =
        BTreeSet::from([TransmissionOwner::Ofto, TransmissionOwner::Shet]);
    let ordered: Vec<_> = owners.into_iter().collect();
    assert_eq!(ordered, vec![TransmissionOwner::Shet, TransmissionOwner::Ofto]);
}
