//! Project number to node name lookup built from the register mapping files.

use std::collections::BTreeMap;

use tracing::debug;

use grid_model::MappingEntry;

/// A duplicate mapping key that was overwritten during loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateMapping {
    pub project_number: String,
    pub kept: String,
    pub replaced: String,
}

/// Lookup from project number to node name.
///
/// Many projects may map to one node. A project number appearing twice is a
/// data-quality defect: the last-loaded entry wins and the collision is
/// recorded for reporting.
#[derive(Debug, Default)]
pub struct ProjectNodeMap {
    entries: BTreeMap<String, String>,
    duplicates: Vec<DuplicateMapping>,
}

impl ProjectNodeMap {
    pub fn from_entries(entries: impl IntoIterator<Item = MappingEntry>) -> Self {
        let mut map = ProjectNodeMap::default();
        for entry in entries {
            map.insert(entry);
        }
        debug!(
            entries = map.entries.len(),
            duplicates = map.duplicates.len(),
            "project node map built"
        );
        map
    }

    pub fn insert(&mut self, entry: MappingEntry) {
        if let Some(previous) = self.entries.insert(entry.project_number.clone(), entry.node_name.clone())
            && previous != entry.node_name
        {
            self.duplicates.push(DuplicateMapping {
                project_number: entry.project_number,
                kept: entry.node_name,
                replaced: previous,
            });
        }
    }

    pub fn resolve(&self, project_number: &str) -> Option<&str> {
        self.entries.get(project_number).map(String::as_str)
    }

    pub fn duplicates(&self) -> &[DuplicateMapping] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
