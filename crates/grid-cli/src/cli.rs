//! CLI argument definitions for the grid collation tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use grid_model::TransmissionOwner;

#[derive(Parser)]
#[command(
    name = "grid-collate",
    version,
    about = "Collate GB transmission network data into a single workbook",
    long_about = "Merge the ETYS Appendix B workbook, the TEC and interconnector\n\
                  registers, substation coordinates and FES demand data into one\n\
                  collated network model workbook, with a findings report for\n\
                  every reference that could not be resolved."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full collation and write the output workbook.
    Collate(CollateArgs),

    /// List the sheets of a workbook with owners and row counts.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct CollateArgs {
    /// Path to the ETYS Appendix B workbook (.xlsx).
    #[arg(long = "etys", value_name = "XLSX")]
    pub etys: PathBuf,

    /// Path to the TEC register export (.csv).
    #[arg(long = "tec", value_name = "CSV")]
    pub tec: PathBuf,

    /// Path to the interconnector register export (.csv).
    #[arg(long = "ic", value_name = "CSV")]
    pub ic: PathBuf,

    /// Path to the TEC register project-to-node mapping file (.csv).
    #[arg(long = "tec-mapping", value_name = "CSV")]
    pub tec_mapping: PathBuf,

    /// Path to the IC register project-to-node mapping file (.csv).
    #[arg(long = "ic-mapping", value_name = "CSV")]
    pub ic_mapping: PathBuf,

    /// Path to the substation coordinates file (.csv).
    #[arg(long = "coordinates", value_name = "CSV")]
    pub coordinates: PathBuf,

    /// Path to the FES demand data export (.csv).
    #[arg(long = "demand", value_name = "CSV")]
    pub demand: PathBuf,

    /// Output directory for the collated workbook and findings report.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Run configuration JSON file (command line flags take precedence).
    #[arg(long = "config", value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// Year of analysis the network model is built for.
    #[arg(long = "year", value_name = "YEAR")]
    pub year: Option<i32>,

    /// FES scenario code applied to the demand data.
    #[arg(long = "scenario", value_name = "CODE")]
    pub scenario: Option<String>,

    /// Transmission owner to include (repeatable).
    #[arg(long = "owner", value_enum, value_name = "OWNER")]
    pub owners: Vec<OwnerArg>,

    /// Collate and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Workbook to inspect (.xlsx).
    #[arg(value_name = "XLSX")]
    pub workbook: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OwnerArg {
    Shet,
    Spt,
    Nget,
    Ofto,
}

impl From<OwnerArg> for TransmissionOwner {
    fn from(arg: OwnerArg) -> Self {
        match arg {
            OwnerArg::Shet => TransmissionOwner::Shet,
            OwnerArg::Spt => TransmissionOwner::Spt,
            OwnerArg::Nget => TransmissionOwner::Nget,
            OwnerArg::Ofto => TransmissionOwner::Ofto,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
