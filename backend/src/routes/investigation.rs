use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{LandingKey, LandingSourceKind};

/// One reconciled certificate/landing row produced by the external
/// landings reconciler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestigationReportRow {
    pub certificate_number: String,
    pub vessel_pln: String,
    pub date_landed: NaiveDate,
    pub species: String,
    /// Weight declared on the certificate for this landing.
    pub certificate_weight: f64,
    /// Live weight known for the landing, when any record satisfies it.
    pub landed_weight: Option<f64>,
    pub over_used: bool,
}

/// A landing refresh attempt that failed; the run carries on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshFailure {
    pub key: LandingKey,
    pub source: LandingSourceKind,
    pub message: String,
}

/// Result of an investigation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestigationOutcome {
    /// Reconciled rows restricted to the certificates matched by the
    /// caller's filter; sibling certificates never appear here.
    pub rows: Vec<InvestigationReportRow>,
    pub missing_keys: usize,
    pub refreshed_keys: usize,
    pub refresh_failures: Vec<RefreshFailure>,
}
