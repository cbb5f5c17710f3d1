use serde::{Deserialize, Serialize};

/// Outcome of one (certificate, species) usage check.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
}

/// Per-pair verdict inside an online validation report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateSpeciesCheck {
    pub certificate_number: String,
    pub species: String,
    pub status: CheckStatus,
    pub over_allocated: bool,
    pub mismatch: bool,
}

/// Validation verdict for one export document, one check per distinct
/// (certificate, species) pair its line items reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineValidationReport {
    pub document_number: String,
    /// False when any of the document's own reconciled rows is
    /// over-allocated or mismatched.
    pub valid: bool,
    pub checks: Vec<CertificateSpeciesCheck>,
}
