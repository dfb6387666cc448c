//! Collation pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: Read the ETYS workbook and the register, mapping,
//!    coordinate and demand CSV files
//! 2. **Collate**: Sequence network changes, compile nodes, join registers
//!    and filter demand data
//! 3. **Validate**: Structural checks over the compiled network
//! 4. **Output**: Write the collated workbook and the findings report
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use grid_ingest::{
    INDEX_SHEETS, INTRA_HVDC_SHEET, SheetTable, load_etys, parse_coordinates, parse_demand,
    parse_ic_register, parse_intra_hvdc, parse_mapping, parse_tec_register, read_csv_table,
};
use grid_map::{NodeIndex, ProjectNodeMap, SiteNameMap};
use grid_model::{
    CollationReport, CoordinateRecord, DemandRow, Finding, FindingCode, HvdcRow, IcRow,
    MappingEntry, NetworkRow, NodeRecord, RunConfig, TecRow,
};
use grid_report::{WorkbookOutput, write_workbook};
use grid_transform::{
    apply_change_sequence, assign_demand_nodes, assign_nodes, attach_site_details,
    collect_network_rows, compile_nodes, derive_ic_capacities, derive_tec_capacities,
    filter_by_owner, filter_demand, filter_intra_hvdc, join_mapping, sort_ic, sort_tec,
    split_by_kind,
};
use grid_validate::{isolated_nodes, missing_branch_endpoints, write_report_json};

/// Input file locations for one run.
#[derive(Debug, Clone)]
pub struct InputPaths {
    pub etys: PathBuf,
    pub tec: PathBuf,
    pub ic: PathBuf,
    pub tec_mapping: PathBuf,
    pub ic_mapping: PathBuf,
    pub coordinates: PathBuf,
    pub demand: PathBuf,
}

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Result of the ingest stage.
#[derive(Debug)]
pub struct IngestResult {
    /// ETYS workbook sheets with canonicalised headers.
    pub sheets: BTreeMap<String, SheetTable>,
    pub tec: Vec<TecRow>,
    pub ic: Vec<IcRow>,
    pub tec_mapping: Vec<MappingEntry>,
    pub ic_mapping: Vec<MappingEntry>,
    pub coordinates: Vec<CoordinateRecord>,
    pub demand: Vec<DemandRow>,
}

fn csv_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("input")
        .to_string()
}

/// Read every input file into typed records. A missing file or a missing
/// required column is fatal; row-level defects are handled downstream.
pub fn ingest(paths: &InputPaths) -> Result<IngestResult> {
    let ingest_span = info_span!("ingest", etys = %paths.etys.display());
    let _ingest_guard = ingest_span.enter();
    let ingest_start = Instant::now();

    let sheets = load_etys(&paths.etys)
        .with_context(|| format!("load ETYS workbook: {}", paths.etys.display()))?;

    let tec_table = read_csv_table(&paths.tec)?;
    let tec = parse_tec_register(&tec_table, &csv_name(&paths.tec))?;

    let ic_table = read_csv_table(&paths.ic)?;
    let ic = parse_ic_register(&ic_table, &csv_name(&paths.ic))?;

    let tec_mapping_table = read_csv_table(&paths.tec_mapping)?;
    let tec_mapping = parse_mapping(&tec_mapping_table, &csv_name(&paths.tec_mapping))?;

    let ic_mapping_table = read_csv_table(&paths.ic_mapping)?;
    let ic_mapping = parse_mapping(&ic_mapping_table, &csv_name(&paths.ic_mapping))?;

    let coordinates_table = read_csv_table(&paths.coordinates)?;
    let coordinates = parse_coordinates(&coordinates_table, &csv_name(&paths.coordinates))?;

    let demand_table = read_csv_table(&paths.demand)?;
    let demand = parse_demand(&demand_table, &csv_name(&paths.demand))?;

    info!(
        sheets = sheets.len(),
        tec_rows = tec.len(),
        ic_rows = ic.len(),
        coordinate_records = coordinates.len(),
        demand_rows = demand.len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(IngestResult {
        sheets,
        tec,
        ic,
        tec_mapping,
        ic_mapping,
        coordinates,
        demand,
    })
}

// ============================================================================
// Stage 2: Collate
// ============================================================================

/// Everything the collation produced, ready for output.
#[derive(Debug)]
pub struct CollatedData {
    pub nodes: Vec<NodeRecord>,
    pub asset_sheets: BTreeMap<String, Vec<NetworkRow>>,
    pub tec: Vec<TecRow>,
    pub ic: Vec<IcRow>,
    pub demand: Vec<DemandRow>,
    pub hvdc: Vec<HvdcRow>,
    pub report: CollationReport,
}

fn duplicate_findings(map: &ProjectNodeMap, source_name: &str) -> Vec<Finding> {
    map.duplicates()
        .iter()
        .map(|duplicate| {
            Finding::warning(
                FindingCode::DuplicateMappingKey,
                source_name,
                format!(
                    "project '{}' mapped twice, kept '{}' over '{}'",
                    duplicate.project_number, duplicate.kept, duplicate.replaced
                ),
            )
        })
        .collect()
}

/// Run the transformation stages over the ingested data.
pub fn collate(config: &RunConfig, input: IngestResult) -> CollatedData {
    let collate_span = info_span!("collate", year = config.year_of_analysis);
    let _collate_guard = collate_span.enter();
    let collate_start = Instant::now();
    let mut report = CollationReport::default();

    // Network: concatenate the owner sheets and play the planned changes
    // forward to the analysis year.
    let mut tables = collect_network_rows(&input.sheets, &config.selected_owners);
    tables.circuits = apply_change_sequence(tables.circuits, config.year_of_analysis);
    tables.transformers = apply_change_sequence(tables.transformers, config.year_of_analysis);
    tables.reactive = apply_change_sequence(tables.reactive, config.year_of_analysis);
    report.extend(missing_branch_endpoints(&tables.circuits));
    report.extend(missing_branch_endpoints(&tables.transformers));

    // Nodes: compile, then join site names and coordinates.
    let mut nodes = compile_nodes(&tables);
    let mut site_pairs = Vec::new();
    for sheet_name in INDEX_SHEETS {
        if let Some(table) = input.sheets.get(sheet_name) {
            site_pairs.extend(grid_ingest::site_name_pairs(table));
        }
    }
    let sites = SiteNameMap::from_pairs(site_pairs);
    report.extend(attach_site_details(&mut nodes, &sites, &input.coordinates));
    report.extend(isolated_nodes(
        &nodes,
        &tables.circuits,
        &tables.transformers,
        &tables.reactive,
    ));
    let index = NodeIndex::new(nodes.iter().map(|node| node.node.clone()));

    // TEC register.
    let tec_map = ProjectNodeMap::from_entries(input.tec_mapping);
    report.extend(duplicate_findings(&tec_map, "tec mapping"));
    let mut tec = filter_by_owner(input.tec, &config.register_owners(), "tec register");
    report.extend(join_mapping(&mut tec, &tec_map, "tec register"));
    derive_tec_capacities(&mut tec, config.year_of_analysis);
    report.extend(assign_nodes(
        &mut tec,
        &index,
        config.transmission_capacity_mw,
        "tec register",
    ));
    sort_tec(&mut tec);

    // IC register.
    let ic_map = ProjectNodeMap::from_entries(input.ic_mapping);
    report.extend(duplicate_findings(&ic_map, "ic mapping"));
    let mut ic = filter_by_owner(input.ic, &config.register_owners(), "ic register");
    report.extend(join_mapping(&mut ic, &ic_map, "ic register"));
    derive_ic_capacities(&mut ic, config.year_of_analysis);
    report.extend(assign_nodes(
        &mut ic,
        &index,
        config.transmission_capacity_mw,
        "ic register",
    ));
    sort_ic(&mut ic);

    // Demand data.
    let mut demand = filter_demand(input.demand, config);
    report.extend(assign_demand_nodes(&mut demand, &index));

    // Intra-HVDC links.
    let hvdc = match input.sheets.get(INTRA_HVDC_SHEET) {
        Some(table) => filter_intra_hvdc(parse_intra_hvdc(table), config.year_of_analysis),
        None => {
            warn!(sheet = INTRA_HVDC_SHEET, "intra-HVDC sheet not found");
            Vec::new()
        }
    };

    let asset_sheets = split_by_kind(&tables);

    info!(
        nodes = nodes.len(),
        asset_sheets = asset_sheets.len(),
        tec_rows = tec.len(),
        ic_rows = ic.len(),
        demand_rows = demand.len(),
        hvdc_rows = hvdc.len(),
        findings = report.findings.len(),
        duration_ms = collate_start.elapsed().as_millis(),
        "collation complete"
    );
    CollatedData {
        nodes,
        asset_sheets,
        tec,
        ic,
        demand,
        hvdc,
        report,
    }
}

// ============================================================================
// Stage 3: Output
// ============================================================================

/// Result of the output stage.
#[derive(Debug)]
pub struct OutputResult {
    /// Path of the collated workbook, when written.
    pub workbook: Option<PathBuf>,
    /// Path of the findings report JSON, when written.
    pub findings_report: Option<PathBuf>,
    /// Errors encountered during output.
    pub errors: Vec<String>,
}

/// Write the collated workbook and the findings report.
pub fn output(output_dir: &Path, data: &CollatedData, dry_run: bool) -> Result<OutputResult> {
    let output_span = info_span!("output", output_dir = %output_dir.display());
    let _output_guard = output_span.enter();
    let output_start = Instant::now();
    let mut errors = Vec::new();

    if dry_run {
        info!(
            duration_ms = output_start.elapsed().as_millis(),
            "output skipped (dry run)"
        );
        return Ok(OutputResult {
            workbook: None,
            findings_report: None,
            errors,
        });
    }

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create output dir: {}", output_dir.display()))?;

    let workbook_path = output_dir.join("collated_network.xlsx");
    let workbook = match write_workbook(
        &workbook_path,
        &WorkbookOutput {
            nodes: &data.nodes,
            asset_sheets: &data.asset_sheets,
            tec: &data.tec,
            ic: &data.ic,
            demand: &data.demand,
            hvdc: &data.hvdc,
        },
    ) {
        Ok(()) => Some(workbook_path),
        Err(error) => {
            errors.push(format!("workbook: {error}"));
            None
        }
    };

    let report_path = output_dir.join("findings.json");
    let findings_report = match write_report_json(&report_path, &data.report) {
        Ok(()) => Some(report_path),
        Err(error) => {
            errors.push(format!("findings report: {error}"));
            None
        }
    };

    info!(
        duration_ms = output_start.elapsed().as_millis(),
        "output complete"
    );
    Ok(OutputResult {
        workbook,
        findings_report,
        errors,
    })
}
