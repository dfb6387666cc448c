pub mod nodes;
pub mod project;
pub mod sites;

pub use nodes::{NodeIndex, NodeMatch};
pub use project::{DuplicateMapping, ProjectNodeMap};
pub use sites::SiteNameMap;
