//! JSON serialisation of the collation findings report.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use grid_model::CollationReport;

/// Write the findings report as pretty-printed JSON next to the output
/// workbook.
pub fn write_report_json(path: &Path, report: &CollationReport) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("create findings report: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .with_context(|| format!("write findings report: {}", path.display()))?;
    info!(
        path = %path.display(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        "findings report written"
    );
    Ok(())
}
