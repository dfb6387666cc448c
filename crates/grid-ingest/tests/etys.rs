use std::path::PathBuf;

use rust_xlsxwriter::Workbook;

use grid_ingest::{
    SheetTable, canonical_header, load_etys, parse_intra_hvdc, parse_network_sheet, sheet_owner,
    site_name_pairs,
};
use grid_model::{AssetClass, ChangeStatus, TransmissionOwner};

fn fixture_workbook(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("etys.xlsx");
    let mut workbook = Workbook::new();

    let index = workbook.add_worksheet();
    index.set_name("B-1-1a").unwrap();
    index.write_string(0, 0, "Appendix B-1-1a Site Index").unwrap();
    index.write_string(1, 0, "Site Code").unwrap();
    index.write_string(1, 1, "Site Name").unwrap();
    index.write_string(2, 0, "HEYS").unwrap();
    index.write_string(2, 1, "Heysham").unwrap();
    index.write_string(3, 0, "PENT").unwrap();
    index.write_string(3, 1, "Pentir").unwrap();

    let circuits = workbook.add_worksheet();
    circuits.set_name("B-2-1c").unwrap();
    circuits.write_string(0, 0, "Appendix B-2-1c Circuits").unwrap();
    for (col, header) in ["Node1", "Node2", "Status", "Year", "Circuit Type", "OHL Length(km)"]
        .into_iter()
        .enumerate()
    {
        circuits.write_string(1, col as u16, header).unwrap();
    }
    circuits.write_string(2, 0, "HEYS40").unwrap();
    circuits.write_string(2, 1, "PENT40").unwrap();
    circuits.write_string(2, 4, "OHL").unwrap();
    circuits.write_number(2, 5, 12.5).unwrap();
    circuits.write_string(3, 0, "HEYS40").unwrap();
    circuits.write_string(3, 1, "WYLF40").unwrap();
    circuits.write_string(3, 2, "Addition").unwrap();
    circuits.write_number(3, 3, 2028.0).unwrap();
    circuits.write_string(3, 4, "Cable").unwrap();

    let hvdc = workbook.add_worksheet();
    hvdc.set_name("B-5-1").unwrap();
    hvdc.write_string(0, 0, "Appendix B-5-1 Intra-network HVDC").unwrap();
    hvdc.write_string(1, 0, "Link Name").unwrap();
    hvdc.write_string(1, 1, "Planned from year").unwrap();
    hvdc.write_string(2, 0, "Western Link").unwrap();
    hvdc.write_string(2, 1, "Existing").unwrap();
    hvdc.write_string(3, 0, "Eastern Link").unwrap();
    hvdc.write_number(3, 1, 2029.0).unwrap();

    workbook.save(&path).unwrap();
    path
}

#[test]
fn workbook_sheets_load_with_canonical_headers() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture_workbook(&dir);
    let tables = load_etys(&path).unwrap();
    assert_eq!(tables.len(), 3);

    let circuits = &tables["B-2-1c"];
    assert_eq!(
        circuits.headers,
        vec!["Node 1", "Node 2", "Status", "Year", "Circuit Type", "OHL Length (km)"]
    );
    assert_eq!(circuits.rows.len(), 2);
}

#[test]
fn circuit_rows_parse_into_typed_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture_workbook(&dir);
    let tables = load_etys(&path).unwrap();
    let rows = parse_network_sheet(&tables["B-2-1c"], AssetClass::Circuit);
    assert_eq!(rows.len(), 2);

    let existing = &rows[0];
    assert_eq!(existing.node1, "HEYS40");
    assert_eq!(existing.node2.as_deref(), Some("PENT40"));
    assert_eq!(existing.status, None);
    assert_eq!(existing.asset_kind.as_deref(), Some("OHL"));
    assert_eq!(
        existing.extra,
        vec![("OHL Length (km)".to_string(), "12.5".to_string())]
    );

    let addition = &rows[1];
    assert_eq!(addition.status, Some(ChangeStatus::Addition));
    assert_eq!(addition.year, Some(2028));
}

#[test]
fn dated_rows_with_an_unknown_status_are_dropped() {
    let owned = |values: &[&str]| values.iter().map(|v| v.to_string()).collect::<Vec<_>>();
    let table = SheetTable {
        name: "B-2-1c".to_string(),
        headers: owned(&["Node 1", "Node 2", "Status", "Year", "Circuit Type"]),
        rows: vec![
            owned(&["HEYS40", "PENT40", "Cancelled", "2030", "OHL"]),
            owned(&["HEYS40", "WYLF40", "Cancelled", "", "OHL"]),
            owned(&["HEYS40", "TORN40", "Addition", "2030", "OHL"]),
        ],
    };
    let rows = parse_network_sheet(&table, AssetClass::Circuit);

    // The dated "Cancelled" row is gone; the undated one is an existing
    // asset and stays, with no status for the sequencing step to apply.
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].node2.as_deref(), Some("WYLF40"));
    assert_eq!(rows[0].status, None);
    assert_eq!(rows[1].node2.as_deref(), Some("TORN40"));
    assert_eq!(rows[1].status, Some(ChangeStatus::Addition));
}

#[test]
fn intra_hvdc_rows_derive_year_and_status() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture_workbook(&dir);
    let tables = load_etys(&path).unwrap();
    let rows = parse_intra_hvdc(&tables["B-5-1"]);
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].planned_from, "Existing");
    assert_eq!(rows[0].year, None);
    assert_eq!(rows[0].status, "Existing");

    assert_eq!(rows[1].planned_from, "2029");
    assert_eq!(rows[1].year, Some(2029));
    assert_eq!(rows[1].status, "Addition");
    assert_eq!(
        rows[1].extra,
        vec![("Link Name".to_string(), "Eastern Link".to_string())]
    );
}

#[test]
fn site_index_sheets_yield_code_name_pairs() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture_workbook(&dir);
    let tables = load_etys(&path).unwrap();
    let pairs = site_name_pairs(&tables["B-1-1a"]);
    assert_eq!(
        pairs,
        vec![
            ("HEYS".to_string(), "Heysham".to_string()),
            ("PENT".to_string(), "Pentir".to_string()),
        ]
    );
}

#[test]
fn header_spelling_variants_canonicalise() {
    assert_eq!(canonical_header("Node1"), "Node 1");
    assert_eq!(canonical_header("Mvar Generation"), "MVAr Generation");
    assert_eq!(canonical_header("R (% on 100 MVA)"), "R (% on 100MVA)");
    assert_eq!(canonical_header("Winter Rating (MVA)"), "Winter Rating (MVA)");
}

#[test]
fn sheet_suffix_identifies_the_owner() {
    assert_eq!(sheet_owner("B-2-1a"), Some(TransmissionOwner::Shet));
    assert_eq!(sheet_owner("B-2-1b"), Some(TransmissionOwner::Spt));
    assert_eq!(sheet_owner("B-3-2c"), Some(TransmissionOwner::Nget));
    assert_eq!(sheet_owner("B-4-1d"), Some(TransmissionOwner::Ofto));
    assert_eq!(sheet_owner("B-5-1"), None);
}
