use std::collections::BTreeSet;

use chrono::NaiveDate;

use grid_map::{NodeIndex, ProjectNodeMap};
use grid_model::{FindingCode, IcRow, MappingEntry, TecRow, TransmissionOwner};
use grid_transform::{
    assign_nodes, derive_ic_capacities, derive_tec_capacities, filter_by_owner, join_mapping,
    sort_tec,
};

fn date(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 4, 1)
}

fn tec(status: &str, stage: Option<&str>, effective_year: i32) -> TecRow {
    TecRow {
        project_number: "P1".to_string(),
        project_name: "Project One".to_string(),
        project_status: Some(status.to_string()),
        stage: stage.map(str::to_string),
        mw_connected: Some(100.0),
        mw_change: Some(40.0),
        cumulative_capacity: Some(140.0),
        mw_effective_from: date(effective_year),
        ..TecRow::default()
    }
}

#[test]
fn built_project_effective_later_keeps_connected_capacity() {
    let mut rows = vec![tec("Built", None, 2055)];
    derive_tec_capacities(&mut rows, 2050);
    assert_eq!(rows[0].mw_capacity, Some(100.0));
}

#[test]
fn built_project_within_horizon_takes_cumulative_total() {
    let mut rows = vec![tec("Built", None, 2040)];
    derive_tec_capacities(&mut rows, 2050);
    assert_eq!(rows[0].mw_capacity, Some(140.0));
}

#[test]
fn unbuilt_project_effective_later_contributes_nothing() {
    let mut rows = vec![tec("Scoping", None, 2055)];
    derive_tec_capacities(&mut rows, 2050);
    assert_eq!(rows[0].mw_capacity, Some(0.0));
}

#[test]
fn unbuilt_staged_project_takes_increase_decrease() {
    let mut rows = vec![tec("Scoping", Some("2"), 2040)];
    derive_tec_capacities(&mut rows, 2050);
    assert_eq!(rows[0].mw_capacity, Some(40.0));
}

#[test]
fn unbuilt_unstaged_project_takes_cumulative_total() {
    let mut rows = vec![tec("Scoping", None, 2040)];
    derive_tec_capacities(&mut rows, 2050);
    assert_eq!(rows[0].mw_capacity, Some(140.0));
}

#[test]
fn undated_project_is_treated_as_within_horizon() {
    let mut row = tec("Built", None, 2040);
    row.mw_effective_from = None;
    let mut rows = vec![row];
    derive_tec_capacities(&mut rows, 2050);
    assert_eq!(rows[0].mw_capacity, Some(140.0));
}

fn ic(stage: Option<&str>, effective_year: i32) -> IcRow {
    IcRow {
        project_number: "I1".to_string(),
        project_name: "Link One".to_string(),
        stage: stage.map(str::to_string),
        mw_import_total: Some(1000.0),
        mw_export_total: Some(1000.0),
        mw_import_change: Some(250.0),
        mw_export_change: Some(200.0),
        mw_effective_from: date(effective_year),
        ..IcRow::default()
    }
}

#[test]
fn ic_link_effective_later_gets_zero_capacities() {
    let mut rows = vec![ic(None, 2055)];
    derive_ic_capacities(&mut rows, 2050);
    assert_eq!(rows[0].mw_import_capacity, Some(0.0));
    assert_eq!(rows[0].mw_export_capacity, Some(0.0));
}

#[test]
fn ic_first_stage_takes_totals() {
    let mut rows = vec![ic(Some("1"), 2040), ic(None, 2040)];
    derive_ic_capacities(&mut rows, 2050);
    for row in &rows {
        assert_eq!(row.mw_import_capacity, Some(1000.0));
        assert_eq!(row.mw_export_capacity, Some(1000.0));
    }
}

#[test]
fn ic_later_stage_takes_increase_decrease() {
    let mut rows = vec![ic(Some("2"), 2040)];
    derive_ic_capacities(&mut rows, 2050);
    assert_eq!(rows[0].mw_import_capacity, Some(250.0));
    assert_eq!(rows[0].mw_export_capacity, Some(200.0));
}

#[test]
fn mapping_join_records_unresolved_projects() {
    let map = ProjectNodeMap::from_entries([MappingEntry {
        project_number: "P1".to_string(),
        node_name: "HEYS40".to_string(),
    }]);
    let mut rows = vec![tec("Built", None, 2040), {
        let mut other = tec("Built", None, 2040);
        other.project_number = "P9".to_string();
        other
    }];
    let findings = join_mapping(&mut rows, &map, "tec register");
    assert_eq!(rows[0].mapped_node.as_deref(), Some("HEYS40"));
    assert_eq!(rows[1].mapped_node, None);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code, FindingCode::UnresolvedMapping);
    assert!(findings[0].message.contains("P9"));
}

#[test]
fn owner_filter_keeps_selected_owners() {
    let mut nget = tec("Built", None, 2040);
    nget.host_to = Some("NGET".to_string());
    let mut spt = tec("Built", None, 2040);
    spt.host_to = Some("SPT".to_string());
    let mut ofto = tec("Built", None, 2040);
    ofto.host_to = Some("OFTO".to_string());

    let owners: BTreeSet<TransmissionOwner> =
        BTreeSet::from([TransmissionOwner::Nget, TransmissionOwner::Ofto]);
    let kept = filter_by_owner(vec![nget, spt, ofto], &owners, "tec register");
    assert_eq!(kept.len(), 2);
    assert!(kept.iter().all(|row| row.host_to.as_deref() != Some("SPT")));
}

#[test]
fn owner_filter_is_skipped_when_no_host_data() {
    let rows = vec![tec("Built", None, 2040)];
    let owners: BTreeSet<TransmissionOwner> = BTreeSet::from([TransmissionOwner::Nget]);
    let kept = filter_by_owner(rows, &owners, "tec register");
    assert_eq!(kept.len(), 1);
}

#[test]
fn node_assignment_flags_high_capacity_on_low_voltage() {
    let index = NodeIndex::new(["HEYS11".to_string()]);
    let mut row = tec("Built", None, 2040);
    row.mapped_node = Some("HEYS11".to_string());
    row.mw_capacity = Some(500.0);
    let mut rows = vec![row];
    let findings = assign_nodes(&mut rows, &index, 100.0, "tec register");
    assert_eq!(rows[0].etys_node.as_deref(), Some("HEYS11"));
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code, FindingCode::HighCapacityVoltage);
}

#[test]
fn node_assignment_reports_unresolved_names() {
    let index = NodeIndex::new(["HEYS40".to_string()]);
    let mut row = tec("Built", None, 2040);
    row.mapped_node = Some("WYLF40".to_string());
    row.mw_capacity = Some(50.0);
    let mut rows = vec![row];
    let findings = assign_nodes(&mut rows, &index, 100.0, "tec register");
    assert_eq!(rows[0].etys_node, None);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code, FindingCode::UnresolvedNode);
}

#[test]
fn rows_without_mapping_are_skipped_by_assignment() {
    let index = NodeIndex::new(["HEYS40".to_string()]);
    let mut rows = vec![tec("Built", None, 2040)];
    let findings = assign_nodes(&mut rows, &index, 100.0, "tec register");
    assert!(findings.is_empty());
    assert_eq!(rows[0].etys_node, None);
}

#[test]
fn tec_rows_sort_by_project_name() {
    let mut a = tec("Built", None, 2040);
    a.project_name = "Zeta Wind".to_string();
    let mut b = tec("Built", None, 2040);
    b.project_name = "Alpha Solar".to_string();
    let mut rows = vec![a, b];
    sort_tec(&mut rows);
    assert_eq!(rows[0].project_name, "Alpha Solar");
}
