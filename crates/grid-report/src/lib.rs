pub mod workbook;

pub use workbook::{WorkbookOutput, safe_sheet_name, write_workbook};
