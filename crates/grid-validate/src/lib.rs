pub mod checks;
pub mod report;

pub use checks::{isolated_nodes, missing_branch_endpoints};
pub use report::write_report_json;
