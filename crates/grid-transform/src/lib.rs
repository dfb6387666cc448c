pub mod demand;
pub mod hvdc;
pub mod network;
pub mod nodes;
pub mod plant;

pub use demand::{assign_demand_nodes, filter_demand};
pub use hvdc::filter_intra_hvdc;
pub use network::{NetworkTables, apply_change_sequence, collect_network_rows, split_by_kind};
pub use nodes::{attach_site_details, compile_nodes};
pub use plant::{
    RegisterRecord, assign_nodes, derive_ic_capacities, derive_tec_capacities, filter_by_owner,
    join_mapping, sort_ic, sort_tec,
};
