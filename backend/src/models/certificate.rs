//! Catch certificate and landing data model (investigation domain).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::document::ExporterDetails;

/// One landing declared on a catch certificate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateLanding {
    pub vessel_pln: String,
    pub date_landed: NaiveDate,
    pub species: String,
    pub export_weight: f64,
}

/// A UK catch certificate with its declared landings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatchCertificate {
    pub certificate_number: String,
    #[serde(default)]
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub exporter: Option<ExporterDetails>,
    #[serde(default)]
    pub landings: Vec<CertificateLanding>,
}

impl CatchCertificate {
    /// Landing keys referenced by this certificate, in declaration order.
    pub fn landing_keys(&self) -> Vec<LandingKey> {
        self.landings
            .iter()
            .map(|landing| LandingKey {
                vessel_pln: landing.vessel_pln.clone(),
                date_landed: landing.date_landed,
            })
            .collect()
    }
}

/// Identity of a landing: the vessel and the day it landed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingKey {
    pub vessel_pln: String,
    pub date_landed: NaiveDate,
}

/// External feed a landing record was obtained from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LandingSourceKind {
    #[serde(rename = "landing")]
    Landing,
    #[serde(rename = "eLogs")]
    ELogs,
    #[serde(rename = "salesNotes")]
    SalesNotes,
}

impl LandingSourceKind {
    /// Fixed sweep order used when refreshing a missing landing.
    pub const ALL: [LandingSourceKind; 3] = [
        LandingSourceKind::Landing,
        LandingSourceKind::ELogs,
        LandingSourceKind::SalesNotes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LandingSourceKind::Landing => "landing",
            LandingSourceKind::ELogs => "eLogs",
            LandingSourceKind::SalesNotes => "salesNotes",
        }
    }
}

/// A known landing event, as held by the store or returned by an
/// external landing source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingRecord {
    pub vessel_pln: String,
    pub date_landed: NaiveDate,
    pub species: String,
    pub live_weight: f64,
    pub source: LandingSourceKind,
}

impl LandingRecord {
    pub fn key(&self) -> LandingKey {
        LandingKey {
            vessel_pln: self.vessel_pln.clone(),
            date_landed: self.date_landed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_sweep_order() {
        let names: Vec<&str> = LandingSourceKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["landing", "eLogs", "salesNotes"]);
    }

    #[test]
    fn test_landing_key_equality() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let a = LandingKey {
            vessel_pln: "PH110".into(),
            date_landed: date,
        };
        let b = LandingKey {
            vessel_pln: "PH110".into(),
            date_landed: date,
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_certificate_landing_keys_preserve_order() {
        let cert = CatchCertificate {
            certificate_number: "GBR-CC-1".into(),
            status: None,
            created_at: "2024-03-01T00:00:00Z".parse().unwrap(),
            exporter: None,
            landings: vec![
                CertificateLanding {
                    vessel_pln: "PH110".into(),
                    date_landed: NaiveDate::from_ymd_opt(2024, 2, 27).unwrap(),
                    species: "Atlantic cod".into(),
                    export_weight: 50.0,
                },
                CertificateLanding {
                    vessel_pln: "FR229".into(),
                    date_landed: NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
                    species: "Haddock".into(),
                    export_weight: 25.0,
                },
            ],
        };

        let keys = cert.landing_keys();
        assert_eq!(keys[0].vessel_pln, "PH110");
        assert_eq!(keys[1].vessel_pln, "FR229");
    }
}
