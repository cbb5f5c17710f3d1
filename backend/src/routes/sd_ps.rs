use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the processing-statement / storage-document
/// reconciliation report.
///
/// This is the external reporting shape: renamed, nullable-field view
/// of a reconciled catch, filtered to the requested window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdPsReportRow {
    pub document_number: String,
    /// "PS" or "SD".
    pub document_type: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub da: String,
    pub certificate_number: String,
    pub certificate_type: Option<String>,
    pub species: String,
    pub scientific_name: Option<String>,
    pub commodity_code: Option<String>,
    /// Weight declared on this document.
    pub weight_on_doc: f64,
    /// Declared capacity of the FCC + species group.
    pub weight_on_fcc: f64,
    /// Total drawn against the group across all documents.
    pub weight_on_all_docs: f64,
    /// Excess over the declared capacity, 0 when within tolerance.
    pub export_weight_exceeded: f64,
    /// `"fail"` when the document's own declared capacity diverges
    /// from the group's.
    pub input_weight_mismatch: Option<String>,
    pub over_used_info: Vec<String>,
    pub exporter_company_name: Option<String>,
    pub document_url: Option<String>,
}
