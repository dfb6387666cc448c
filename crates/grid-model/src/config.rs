//! Run configuration for a collation pass.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::enums::TransmissionOwner;

/// Demand type letters in the FES demand export.
///
/// R = residential, E = electric vehicles, C = commercial, I = industrial,
/// H = heat pumps, D = district heat, T = transmission direct connects,
/// Z = electrolysers.
pub const ALL_DEMAND_TYPES: [&str; 8] = ["R", "E", "C", "I", "H", "D", "T", "Z"];

/// Tunable settings for one run, loadable from a JSON file and overridable
/// from the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Target year the network model is built for.
    pub year_of_analysis: i32,
    /// FES scenario code applied to demand data (e.g. "HT").
    pub fes_scenario: String,
    /// Demand type letters to keep.
    pub demand_types: Vec<String>,
    /// Transmission owners whose sheets and register rows are kept.
    ///
    /// OFTO should only be selected together with the three onshore owners,
    /// otherwise its nodes end up isolated.
    pub selected_owners: BTreeSet<TransmissionOwner>,
    /// Capacity above which a project is expected to connect at 275/400 kV.
    pub transmission_capacity_mw: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            year_of_analysis: 2050,
            fes_scenario: "HT".to_string(),
            demand_types: ALL_DEMAND_TYPES.iter().map(|s| (*s).to_string()).collect(),
            selected_owners: BTreeSet::from([TransmissionOwner::Nget]),
            transmission_capacity_mw: 100.0,
        }
    }
}

impl RunConfig {
    /// The analysis year as the two-digit value used by the FES demand file.
    pub fn year_two_digits(&self) -> i32 {
        self.year_of_analysis.rem_euclid(100)
    }

    /// Owners used when filtering register rows: the configured set plus
    /// OFTO, which is always carried for plant data.
    pub fn register_owners(&self) -> BTreeSet<TransmissionOwner> {
        let mut owners = self.selected_owners.clone();
        owners.insert(TransmissionOwner::Ofto);
        owners
    }
}

#[cfg(test)]
mod tests {
    use super::RunConfig;
    use crate::enums::TransmissionOwner;

    #[test]
    fn defaults() {
        let config = RunConfig::default();
        assert_eq!(config.year_of_analysis, 2050);
        assert_eq!(config.year_two_digits(), 50);
        assert!(config.selected_owners.contains(&TransmissionOwner::Nget));
        assert!(config.register_owners().contains(&TransmissionOwner::Ofto));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = RunConfig {
            year_of_analysis: 2028,
            fes_scenario: "EE".to_string(),
            ..RunConfig::default()
        };
        let json = serde_json::to_string(&config).expect("serialize config");
        let round: RunConfig = serde_json::from_str(&json).expect("deserialize config");
        assert_eq!(round.year_of_analysis, 2028);
        assert_eq!(round.fes_scenario, "EE");
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: RunConfig =
            serde_json::from_str(r#"{"year_of_analysis": 2030}"#).expect("deserialize");
        assert_eq!(config.year_of_analysis, 2030);
        assert_eq!(config.fes_scenario, "HT");
    }
}
