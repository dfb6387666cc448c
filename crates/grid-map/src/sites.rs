//! Site code to site name lookup compiled from the ETYS index sheets.

use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct SiteNameMap {
    map: BTreeMap<String, String>,
}

impl SiteNameMap {
    /// Build from (site code, site name) pairs. Later pairs win, matching
    /// the order the index sheets are loaded in.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut map = BTreeMap::new();
        for (code, name) in pairs {
            let code = code.trim().to_string();
            let name = name.trim().to_string();
            if code.is_empty() || name.is_empty() {
                continue;
            }
            map.insert(code, name);
        }
        SiteNameMap { map }
    }

    pub fn get(&self, site_code: &str) -> Option<&str> {
        self.map.get(site_code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
