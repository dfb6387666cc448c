pub mod csv_table;
pub mod etys;
pub mod registers;
pub mod workbook;

pub use csv_table::{CsvTable, parse_f64, parse_year, read_csv_table};
pub use etys::{
    CIRCUIT_SHEETS, ETYS_HEADER_ROW, INDEX_SHEETS, INTRA_HVDC_SHEET, REACTIVE_SHEETS,
    TRANSFORMER_SHEETS, canonical_header, load_etys, parse_intra_hvdc, parse_network_sheet,
    sheet_owner, site_name_pairs,
};
pub use registers::{
    parse_coordinates, parse_demand, parse_effective_date, parse_ic_register, parse_mapping,
    parse_tec_register,
};
pub use workbook::{SheetTable, read_workbook_tables};
