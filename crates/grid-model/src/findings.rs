use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingSeverity {
    Error,
    Warning,
}

/// Machine-readable finding codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCode {
    DuplicateMappingKey,
    UnresolvedMapping,
    UnresolvedNode,
    UnresolvedCoordinates,
    UnresolvedSiteName,
    HighCapacityVoltage,
    MissingBranchEndpoint,
    IsolatedNode,
}

/// A data-quality finding recorded during collation.
///
/// Findings never drop rows silently: the affected row is carried through
/// with blank derived fields and the defect is reported here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub code: FindingCode,
    pub severity: FindingSeverity,
    /// Human-readable message naming the affected key.
    pub message: String,
    /// Input source or pipeline stage the finding relates to.
    pub subject: String,
}

impl Finding {
    pub fn warning(code: FindingCode, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Finding {
            code,
            severity: FindingSeverity::Warning,
            message: message.into(),
            subject: subject.into(),
        }
    }

    pub fn error(code: FindingCode, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Finding {
            code,
            severity: FindingSeverity::Error,
            message: message.into(),
            subject: subject.into(),
        }
    }
}

/// All findings from one collation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollationReport {
    pub findings: Vec<Finding>,
}

impl CollationReport {
    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    pub fn error_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == FindingSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == FindingSeverity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}
