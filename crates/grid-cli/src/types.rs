use std::path::PathBuf;

use grid_model::CollationReport;

#[derive(Debug)]
pub struct CollateResult {
    pub output_dir: PathBuf,
    pub workbook: Option<PathBuf>,
    pub findings_report: Option<PathBuf>,
    pub sheets: Vec<SheetCount>,
    pub report: CollationReport,
    pub errors: Vec<String>,
    pub has_errors: bool,
}

/// Row count of one output sheet, for the run summary.
#[derive(Debug)]
pub struct SheetCount {
    pub name: String,
    pub rows: usize,
}
