//! Resolution of free-text node names against the compiled ETYS node list.

use grid_model::{is_transmission_voltage, prefix};

/// How a node name was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeMatch<'a> {
    Exact(&'a str),
    /// Matched on the first five characters.
    Prefix5(&'a str),
    /// Matched on the four-character site code.
    Prefix4(&'a str),
}

impl<'a> NodeMatch<'a> {
    pub fn node(self) -> &'a str {
        match self {
            NodeMatch::Exact(node) | NodeMatch::Prefix5(node) | NodeMatch::Prefix4(node) => node,
        }
    }
}

/// Ordered index of the compiled network nodes.
///
/// Resolution tries an exact match, then the five-character prefix, then the
/// four-character site code, all case-insensitively since register mapping
/// files are free text. Site-code matches are ambiguous between voltage
/// levels at the same site, so the project's capacity decides: above the
/// transmission threshold the 275/400 kV busbars (fifth digit 2 or 4) are
/// preferred, below it the lower-voltage ones.
#[derive(Debug, Default)]
pub struct NodeIndex {
    nodes: Vec<String>,
}

impl NodeIndex {
    pub fn new(nodes: impl IntoIterator<Item = String>) -> Self {
        let mut seen = std::collections::BTreeSet::new();
        let mut ordered = Vec::new();
        for node in nodes {
            let trimmed = node.trim().to_string();
            if trimmed.is_empty() || !seen.insert(trimmed.clone()) {
                continue;
            }
            ordered.push(trimmed);
        }
        NodeIndex { nodes: ordered }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.iter().any(|node| node == name)
    }

    /// Resolve a register node name given the project's derived capacity.
    pub fn resolve(&self, name: &str, capacity_mw: f64, threshold_mw: f64) -> Option<NodeMatch<'_>> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        if let Some(node) = self.nodes.iter().find(|node| node.eq_ignore_ascii_case(name)) {
            return Some(NodeMatch::Exact(node));
        }
        let prefix5 = prefix(name, 5);
        if let Some(node) = self
            .nodes
            .iter()
            .find(|node| prefix(node, 5).eq_ignore_ascii_case(prefix5))
        {
            return Some(NodeMatch::Prefix5(node));
        }
        let prefix4 = prefix(name, 4);
        let candidates: Vec<&String> = self
            .nodes
            .iter()
            .filter(|node| prefix(node, 4).eq_ignore_ascii_case(prefix4))
            .collect();
        let first = *candidates.first()?;
        let want_transmission = capacity_mw > threshold_mw;
        let preferred = candidates
            .iter()
            .find(|node| is_transmission_voltage(node) == want_transmission);
        Some(NodeMatch::Prefix4(preferred.map_or(first.as_str(), |node| node.as_str())))
    }

    /// Resolve a GSP name from the demand data. The same exact / five / four
    /// character cascade, without the voltage preference.
    pub fn resolve_name(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        if let Some(node) = self.nodes.iter().find(|node| node.eq_ignore_ascii_case(name)) {
            return Some(node);
        }
        let prefix5 = prefix(name, 5);
        if let Some(node) = self
            .nodes
            .iter()
            .find(|node| prefix(node, 5).eq_ignore_ascii_case(prefix5))
        {
            return Some(node);
        }
        let prefix4 = prefix(name, 4);
        self.nodes
            .iter()
            .find(|node| prefix(node, 4).eq_ignore_ascii_case(prefix4))
            .map(String::as_str)
    }
}
