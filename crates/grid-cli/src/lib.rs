//! CLI library components for the grid collation tool.

pub mod logging;
pub mod pipeline;
