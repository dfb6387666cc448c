use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, ColumnConstraint, Color, ContentArrangement, Table, Width,
};

use grid_model::{Finding, FindingSeverity};

use crate::types::CollateResult;

pub fn print_summary(result: &CollateResult) {
    println!("Output: {}", result.output_dir.display());
    if let Some(path) = &result.workbook {
        println!("Workbook: {}", path.display());
    }
    if let Some(path) = &result.findings_report {
        println!("Findings report: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Sheet"), header_cell("Rows")]);
    apply_sheet_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let mut total_rows = 0usize;
    for sheet in &result.sheets {
        total_rows += sheet.rows;
        table.add_row(vec![Cell::new(&sheet.name), Cell::new(sheet.rows)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    print_findings_table(result);
    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

fn print_findings_table(result: &CollateResult) {
    if result.report.findings.is_empty() {
        return;
    }
    let mut findings: Vec<&Finding> = result.report.findings.iter().collect();
    findings.sort_by(|a, b| {
        severity_rank(b.severity)
            .cmp(&severity_rank(a.severity))
            .then_with(|| a.subject.cmp(&b.subject))
            .then_with(|| a.message.cmp(&b.message))
    });
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Source"),
        header_cell("Message"),
    ]);
    apply_findings_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for finding in findings {
        table.add_row(vec![
            severity_cell(finding.severity),
            Cell::new(format!("{:?}", finding.code)),
            Cell::new(&finding.subject),
            Cell::new(&finding.message),
        ]);
    }
    println!();
    println!("Findings:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_sheet_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn apply_findings_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Fixed(24)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Percentage(60)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: FindingSeverity) -> Cell {
    match severity {
        FindingSeverity::Error => Cell::new("ERROR").fg(Color::Red),
        FindingSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn severity_rank(severity: FindingSeverity) -> u8 {
    match severity {
        FindingSeverity::Error => 2,
        FindingSeverity::Warning => 1,
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
