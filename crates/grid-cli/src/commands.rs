use std::collections::BTreeSet;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use grid_ingest::{ETYS_HEADER_ROW, read_workbook_tables, sheet_owner};
use grid_model::{RunConfig, TransmissionOwner};

use crate::cli::{CollateArgs, InspectArgs};
use crate::pipeline::{CollatedData, InputPaths, collate, ingest, output};
use crate::summary::apply_table_style;
use crate::types::{CollateResult, SheetCount};

/// List the sheets of a workbook with the owner each belongs to.
pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let tables = read_workbook_tables(&args.workbook, ETYS_HEADER_ROW)
        .with_context(|| format!("read workbook: {}", args.workbook.display()))?;
    let mut table = Table::new();
    table.set_header(vec!["Sheet", "Owner", "Columns", "Rows"]);
    apply_table_style(&mut table);
    for sheet in tables.values() {
        let owner = sheet_owner(&sheet.name)
            .map(TransmissionOwner::as_str)
            .unwrap_or("-");
        table.add_row(vec![
            sheet.name.clone(),
            owner.to_string(),
            sheet.headers.len().to_string(),
            sheet.rows.len().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Run the full collation pipeline.
pub fn run_collate(args: &CollateArgs) -> Result<CollateResult> {
    let run_span = info_span!("collate_run", output_dir = %args.output_dir.display());
    let _run_guard = run_span.enter();
    let run_start = Instant::now();

    let config = build_config(args)?;
    info!(
        year = config.year_of_analysis,
        scenario = %config.fes_scenario,
        owners = ?config.selected_owners,
        "run configuration resolved"
    );

    let paths = InputPaths {
        etys: args.etys.clone(),
        tec: args.tec.clone(),
        ic: args.ic.clone(),
        tec_mapping: args.tec_mapping.clone(),
        ic_mapping: args.ic_mapping.clone(),
        coordinates: args.coordinates.clone(),
        demand: args.demand.clone(),
    };

    let ingested = ingest(&paths)?;
    let data = collate(&config, ingested);
    let output_result = output(&args.output_dir, &data, args.dry_run)?;

    let sheets = sheet_counts(&data);
    let has_errors = data.report.has_errors() || !output_result.errors.is_empty();
    info!(
        duration_ms = run_start.elapsed().as_millis(),
        errors = data.report.error_count(),
        warnings = data.report.warning_count(),
        "run complete"
    );
    Ok(CollateResult {
        output_dir: args.output_dir.clone(),
        workbook: output_result.workbook,
        findings_report: output_result.findings_report,
        sheets,
        report: data.report,
        errors: output_result.errors,
        has_errors,
    })
}

/// Resolve the run configuration: JSON file first, then command line
/// overrides.
fn build_config(args: &CollateArgs) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("read config: {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parse config: {}", path.display()))?
        }
        None => RunConfig::default(),
    };
    if let Some(year) = args.year {
        config.year_of_analysis = year;
    }
    if let Some(scenario) = &args.scenario {
        config.fes_scenario = scenario.clone();
    }
    if !args.owners.is_empty() {
        config.selected_owners = args
            .owners
            .iter()
            .map(|owner| TransmissionOwner::from(*owner))
            .collect::<BTreeSet<_>>();
    }
    Ok(config)
}

fn sheet_counts(data: &CollatedData) -> Vec<SheetCount> {
    let mut sheets = vec![SheetCount {
        name: "Nodes".to_string(),
        rows: data.nodes.len(),
    }];
    for (kind, rows) in &data.asset_sheets {
        sheets.push(SheetCount {
            name: kind.clone(),
            rows: rows.len(),
        });
    }
    sheets.push(SheetCount {
        name: "TEC Register".to_string(),
        rows: data.tec.len(),
    });
    sheets.push(SheetCount {
        name: "IC Register".to_string(),
        rows: data.ic.len(),
    });
    sheets.push(SheetCount {
        name: "Demand Data".to_string(),
        rows: data.demand.len(),
    });
    sheets.push(SheetCount {
        name: "Intra_HVDC".to_string(),
        rows: data.hvdc.len(),
    });
    sheets
}
