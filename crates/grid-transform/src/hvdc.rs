//! Intra-HVDC link filtering.

use tracing::debug;

use grid_model::HvdcRow;

/// Keep links that exist today or are planned on or before the analysis
/// year. Rows with an unparseable planned year that is not "Existing" are
/// dropped, matching the source data convention.
pub fn filter_intra_hvdc(rows: Vec<HvdcRow>, year_of_analysis: i32) -> Vec<HvdcRow> {
    let input_count = rows.len();
    let kept: Vec<HvdcRow> = rows
        .into_iter()
        .filter(|row| {
            row.planned_from.eq_ignore_ascii_case("existing")
                || row.year.is_some_and(|year| year <= year_of_analysis)
        })
        .collect();
    debug!(
        input_rows = input_count,
        output_rows = kept.len(),
        year_of_analysis,
        "intra-HVDC links filtered"
    );
    kept
}
