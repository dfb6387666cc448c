pub mod config;
pub mod enums;
pub mod error;
pub mod findings;
pub mod records;
pub mod voltage;

pub use config::{ALL_DEMAND_TYPES, RunConfig};
pub use enums::{AssetClass, ChangeStatus, TransmissionOwner};
pub use error::{GridError, Result};
pub use findings::{CollationReport, Finding, FindingCode, FindingSeverity};
pub use records::{
    CoordinateRecord, DemandRow, HvdcRow, IcRow, MappingEntry, NetworkRow, NodeRecord, TecRow,
};
pub use voltage::{derive_voltage, is_transmission_voltage, prefix, site_code};
