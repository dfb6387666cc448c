use std::collections::BTreeMap;

use calamine::{Data, Reader, Xlsx, open_workbook};

use grid_model::{
    AssetClass, DemandRow, HvdcRow, IcRow, NetworkRow, NodeRecord, TecRow, TransmissionOwner,
};
use grid_report::{WorkbookOutput, safe_sheet_name, write_workbook};

fn cell(range: &calamine::Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        Some(Data::String(value)) => value.clone(),
        Some(Data::Float(value)) => value.to_string(),
        Some(Data::Int(value)) => value.to_string(),
        _ => String::new(),
    }
}

#[test]
fn sheet_names_are_truncated_and_cleaned() {
    assert_eq!(safe_sheet_name("OHL"), "OHL");
    assert_eq!(
        safe_sheet_name("Series Reactor / Capacitor"),
        "Series Reactor _ Capacitor"
    );
    assert_eq!(
        safe_sheet_name("A very long asset type name that exceeds the limit"),
        "A very long asset type name tha"
    );
    assert_eq!(safe_sheet_name("Back\\Slash"), "Back_Slash");
}

#[test]
fn workbook_contains_every_sheet_with_collated_rows() {
    let nodes = vec![NodeRecord {
        node: "HEYS40".to_string(),
        voltage: Some("400"),
        sheet_names: vec!["B-2-1c".to_string(), "B-3-1c".to_string()],
        relevant_owners: vec![TransmissionOwner::Nget],
        site_name: Some("Heysham".to_string()),
        latitude: Some(54.03),
        longitude: Some(-2.9),
    }];

    let mut asset_sheets: BTreeMap<String, Vec<NetworkRow>> = BTreeMap::new();
    asset_sheets.insert(
        "OHL".to_string(),
        vec![NetworkRow {
            asset_class: AssetClass::Circuit,
            sheet: "B-2-1c".to_string(),
            node1: "HEYS40".to_string(),
            node2: Some("PENT40".to_string()),
            status: Some(grid_model::ChangeStatus::Addition),
            year: Some(2028),
            asset_kind: Some("OHL".to_string()),
            extra: vec![("OHL Length (km)".to_string(), "12.5".to_string())],
        }],
    );

    let tec = vec![TecRow {
        project_number: "P1".to_string(),
        project_name: "Plant One".to_string(),
        mapped_node: Some("HEYS4A".to_string()),
        mw_capacity: Some(1250.0),
        etys_node: Some("HEYS40".to_string()),
        ..TecRow::default()
    }];

    let ic = vec![IcRow {
        project_number: "I1".to_string(),
        project_name: "Link One".to_string(),
        asset_type: Some("Interconnector".to_string()),
        mw_import_capacity: Some(1000.0),
        mw_export_capacity: Some(1000.0),
        ..IcRow::default()
    }];

    let demand = vec![DemandRow {
        gsp: "HEYS1".to_string(),
        year: Some(50),
        scenario: "HT".to_string(),
        demand_type: "R".to_string(),
        extra: vec![("MW".to_string(), "123.4".to_string())],
        etys_node: Some("HEYS40".to_string()),
    }];

    let hvdc = vec![HvdcRow {
        planned_from: "Existing".to_string(),
        year: None,
        status: "Existing".to_string(),
        extra: vec![("Link Name".to_string(), "Western Link".to_string())],
    }];

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("collated.xlsx");
    write_workbook(
        &path,
        &WorkbookOutput {
            nodes: &nodes,
            asset_sheets: &asset_sheets,
            tec: &tec,
            ic: &ic,
            demand: &demand,
            hvdc: &hvdc,
        },
    )
    .unwrap();

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    let sheet_names = workbook.sheet_names().to_owned();
    assert_eq!(
        sheet_names,
        vec!["Nodes", "OHL", "TEC Register", "IC Register", "Demand Data", "Intra_HVDC"]
    );

    let nodes_range = workbook.worksheet_range("Nodes").unwrap();
    assert_eq!(cell(&nodes_range, 0, 0), "Node");
    assert_eq!(cell(&nodes_range, 1, 0), "HEYS40");
    assert_eq!(cell(&nodes_range, 1, 1), "400");
    assert_eq!(cell(&nodes_range, 1, 2), "B-2-1c, B-3-1c");
    assert_eq!(cell(&nodes_range, 1, 3), "NGET");
    assert_eq!(cell(&nodes_range, 1, 4), "Heysham");
    assert_eq!(cell(&nodes_range, 1, 5), "54.03");

    let ohl_range = workbook.worksheet_range("OHL").unwrap();
    assert_eq!(cell(&ohl_range, 0, 4), "OHL Length (km)");
    assert_eq!(cell(&ohl_range, 1, 0), "HEYS40");
    assert_eq!(cell(&ohl_range, 1, 1), "PENT40");
    assert_eq!(cell(&ohl_range, 1, 2), "Addition");
    assert_eq!(cell(&ohl_range, 1, 3), "2028");
    assert_eq!(cell(&ohl_range, 1, 4), "12.5");
    assert_eq!(cell(&ohl_range, 0, 5), "Sheet_Name");
    assert_eq!(cell(&ohl_range, 1, 5), "B-2-1c");

    let tec_range = workbook.worksheet_range("TEC Register").unwrap();
    assert_eq!(cell(&tec_range, 0, 9), "Node_Name");
    assert_eq!(cell(&tec_range, 1, 9), "HEYS4A");
    assert_eq!(cell(&tec_range, 1, 10), "1250");
    assert_eq!(cell(&tec_range, 1, 11), "HEYS40");

    let ic_range = workbook.worksheet_range("IC Register").unwrap();
    assert_eq!(cell(&ic_range, 1, 3), "Interconnector");
    assert_eq!(cell(&ic_range, 1, 11), "1000");

    let demand_range = workbook.worksheet_range("Demand Data").unwrap();
    assert_eq!(cell(&demand_range, 0, 4), "MW");
    assert_eq!(cell(&demand_range, 0, 5), "ETYS_Node");
    assert_eq!(cell(&demand_range, 1, 0), "HEYS1");
    assert_eq!(cell(&demand_range, 1, 5), "HEYS40");

    let hvdc_range = workbook.worksheet_range("Intra_HVDC").unwrap();
    assert_eq!(cell(&hvdc_range, 1, 0), "Existing");
    assert_eq!(cell(&hvdc_range, 1, 3), "Western Link");
}

#[test]
fn register_sheets_keep_descriptive_and_parsed_columns() {
    let tec = vec![TecRow {
        project_number: "P1".to_string(),
        project_name: "Plant One".to_string(),
        cumulative_capacity: Some(1250.0),
        mw_effective_from: chrono::NaiveDate::from_ymd_opt(2030, 4, 1),
        extra: vec![
            ("Plant Type".to_string(), "Wind Offshore".to_string()),
            ("Connection Site".to_string(), "Heysham".to_string()),
        ],
        mw_capacity: Some(1250.0),
        ..TecRow::default()
    }];
    let ic = vec![IcRow {
        project_number: "I1".to_string(),
        project_name: "Link One".to_string(),
        mw_import_total: Some(1000.0),
        extra: vec![("Connection Site".to_string(), "Pentir".to_string())],
        ..IcRow::default()
    }];

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registers.xlsx");
    let asset_sheets = BTreeMap::new();
    write_workbook(
        &path,
        &WorkbookOutput {
            nodes: &[],
            asset_sheets: &asset_sheets,
            tec: &tec,
            ic: &ic,
            demand: &[],
            hvdc: &[],
        },
    )
    .unwrap();

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    let tec_range = workbook.worksheet_range("TEC Register").unwrap();
    assert_eq!(cell(&tec_range, 0, 7), "Cumulative Total Capacity (MW)");
    assert_eq!(cell(&tec_range, 1, 7), "1250");
    assert_eq!(cell(&tec_range, 0, 8), "MW Effective From");
    assert_eq!(cell(&tec_range, 1, 8), "01/04/2030");
    assert_eq!(cell(&tec_range, 0, 9), "Plant Type");
    assert_eq!(cell(&tec_range, 1, 9), "Wind Offshore");
    assert_eq!(cell(&tec_range, 0, 10), "Connection Site");
    assert_eq!(cell(&tec_range, 1, 10), "Heysham");
    // Derived columns follow the pass-through block.
    assert_eq!(cell(&tec_range, 0, 12), "MW_Capacity");
    assert_eq!(cell(&tec_range, 1, 12), "1250");

    let ic_range = workbook.worksheet_range("IC Register").unwrap();
    assert_eq!(cell(&ic_range, 0, 5), "MW Import - Total");
    assert_eq!(cell(&ic_range, 1, 5), "1000");
    assert_eq!(cell(&ic_range, 0, 10), "Connection Site");
    assert_eq!(cell(&ic_range, 1, 10), "Pentir");
    assert_eq!(cell(&ic_range, 0, 14), "ETYS_Node");
}

#[test]
fn empty_inputs_still_produce_the_fixed_sheets() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");
    let asset_sheets = BTreeMap::new();
    write_workbook(
        &path,
        &WorkbookOutput {
            nodes: &[],
            asset_sheets: &asset_sheets,
            tec: &[],
            ic: &[],
            demand: &[],
            hvdc: &[],
        },
    )
    .unwrap();

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    assert_eq!(
        workbook.sheet_names().to_owned(),
        vec!["Nodes", "TEC Register", "IC Register", "Demand Data", "Intra_HVDC"]
    );
    let nodes_range = workbook.worksheet_range("Nodes").unwrap();
    assert_eq!(cell(&nodes_range, 0, 6), "longitude");
}
