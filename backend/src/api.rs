//! Public API surface for the Rust backend.
//!
//! This file consolidates the shared types used across the report
//! pipelines. All types derive Serialize/Deserialize for JSON
//! serialization.

pub use crate::routes::investigation::InvestigationOutcome;
pub use crate::routes::investigation::InvestigationReportRow;
pub use crate::routes::investigation::RefreshFailure;
pub use crate::routes::online_validation::CertificateSpeciesCheck;
pub use crate::routes::online_validation::CheckStatus;
pub use crate::routes::online_validation::OnlineValidationReport;
pub use crate::routes::sd_ps::SdPsReportRow;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Export document kind, discriminated on the wire by the
/// `documentType` field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "processingStatement")]
    ProcessingStatement,
    #[serde(rename = "storageDocument")]
    StorageDocument,
}

impl DocumentType {
    /// Short code used in report rows.
    pub fn report_code(&self) -> &'static str {
        match self {
            DocumentType::ProcessingStatement => "PS",
            DocumentType::StorageDocument => "SD",
        }
    }
}

/// UK nation or Crown-dependency administrative region responsible for
/// a document, derived from the exporter postcode.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Authority {
    England,
    Scotland,
    Wales,
    #[serde(rename = "Northern Ireland")]
    NorthernIreland,
    #[serde(rename = "Isle of Man")]
    IsleOfMan,
    Jersey,
    Guernsey,
    Alderney,
    Sark,
}

impl Authority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Authority::England => "England",
            Authority::Scotland => "Scotland",
            Authority::Wales => "Wales",
            Authority::NorthernIreland => "Northern Ireland",
            Authority::IsleOfMan => "Isle of Man",
            Authority::Jersey => "Jersey",
            Authority::Guernsey => "Guernsey",
            Authority::Alderney => "Alderney",
            Authority::Sark => "Sark",
        }
    }

    /// Every recognized authority, in reporting order.
    pub fn all() -> [Authority; 9] {
        [
            Authority::England,
            Authority::Scotland,
            Authority::Wales,
            Authority::NorthernIreland,
            Authority::IsleOfMan,
            Authority::Jersey,
            Authority::Guernsey,
            Authority::Alderney,
            Authority::Sark,
        ]
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
