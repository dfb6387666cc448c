use serde::{Deserialize, Serialize};

/// Transmission owner regions covered by the ETYS Appendix B sheets.
///
/// Each network data sheet carries a single-letter suffix identifying the
/// owner whose assets it lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransmissionOwner {
    Shet,
    Spt,
    Nget,
    Ofto,
}

impl TransmissionOwner {
    pub const ALL: [TransmissionOwner; 4] = [
        TransmissionOwner::Shet,
        TransmissionOwner::Spt,
        TransmissionOwner::Nget,
        TransmissionOwner::Ofto,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TransmissionOwner::Shet => "SHET",
            TransmissionOwner::Spt => "SPT",
            TransmissionOwner::Nget => "NGET",
            TransmissionOwner::Ofto => "OFTO",
        }
    }

    /// Owner associated with an ETYS sheet name suffix (`B-2-1a` -> SHET).
    pub fn from_sheet_suffix(suffix: char) -> Option<Self> {
        match suffix {
            'a' => Some(TransmissionOwner::Shet),
            'b' => Some(TransmissionOwner::Spt),
            'c' => Some(TransmissionOwner::Nget),
            'd' => Some(TransmissionOwner::Ofto),
            _ => None,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "SHET" => Some(TransmissionOwner::Shet),
            "SPT" => Some(TransmissionOwner::Spt),
            "NGET" => Some(TransmissionOwner::Nget),
            "OFTO" => Some(TransmissionOwner::Ofto),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransmissionOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asset class of an ETYS network data sheet group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Circuit,
    Transformer,
    Reactive,
}

impl AssetClass {
    pub fn as_str(self) -> &'static str {
        match self {
            AssetClass::Circuit => "Circuit",
            AssetClass::Transformer => "Transformer",
            AssetClass::Reactive => "Reactive Compensation",
        }
    }
}

/// Status of a planned-change row in the ETYS network data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeStatus {
    Addition,
    Removed,
    Change,
}

impl ChangeStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Addition" => Some(ChangeStatus::Addition),
            "Removed" => Some(ChangeStatus::Removed),
            "Change" => Some(ChangeStatus::Change),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChangeStatus::Addition => "Addition",
            ChangeStatus::Removed => "Removed",
            ChangeStatus::Change => "Change",
        }
    }
}
