#![allow(dead_code)]

use chrono::NaiveDate;

use fes_rust::api::Authority;
use fes_rust::models::{
    parse_documents_json, CatchCertificate, CertificateLanding, LandingRecord, LandingSourceKind,
    RawDocument,
};

/// Postcode lookup used across the integration suites: AB* resolves to
/// Scotland, CF* to Wales, everything else is unknown (England).
pub fn test_postcode_lookup(postcode: &str) -> Option<Authority> {
    if postcode.starts_with("AB") {
        Some(Authority::Scotland)
    } else if postcode.starts_with("CF") {
        Some(Authority::Wales)
    } else {
        None
    }
}

/// Build a processing statement with one catch line per
/// (certificate, species, weight, weightOnCC) tuple.
pub fn processing_statement(
    document_number: &str,
    created_at: &str,
    postcode: Option<&str>,
    lines: &[(&str, &str, f64, f64)],
) -> RawDocument {
    let catches: Vec<serde_json::Value> = lines
        .iter()
        .map(|(certificate, species, weight, weight_on_cc)| {
            serde_json::json!({
                "catchCertificateNumber": certificate,
                "species": species,
                "exportWeightBeforeProcessing": weight,
                "totalWeightLanded": weight_on_cc,
            })
        })
        .collect();

    let mut document = serde_json::json!({
        "documentType": "processingStatement",
        "documentNumber": document_number,
        "createdAt": created_at,
        "catches": catches,
    });
    if let Some(postcode) = postcode {
        document["exporter"] = serde_json::json!({
            "companyName": format!("{} Exports Ltd", document_number),
            "postcode": postcode,
        });
    }

    parse_documents_json(&serde_json::json!([document]).to_string())
        .unwrap()
        .remove(0)
}

/// Build a storage document with one catch line per
/// (certificate, product, productWeight, weightOnCC) tuple.
pub fn storage_document(
    document_number: &str,
    created_at: &str,
    postcode: Option<&str>,
    lines: &[(&str, &str, f64, f64)],
) -> RawDocument {
    let catches: Vec<serde_json::Value> = lines
        .iter()
        .map(|(certificate, product, weight, weight_on_cc)| {
            serde_json::json!({
                "certificateNumber": certificate,
                "product": product,
                "productWeight": weight,
                "weightOnCC": weight_on_cc,
            })
        })
        .collect();

    let mut document = serde_json::json!({
        "documentType": "storageDocument",
        "documentNumber": document_number,
        "createdAt": created_at,
        "catches": catches,
    });
    if let Some(postcode) = postcode {
        document["exporter"] = serde_json::json!({
            "companyName": format!("{} Cold Stores", document_number),
            "postcode": postcode,
        });
    }

    parse_documents_json(&serde_json::json!([document]).to_string())
        .unwrap()
        .remove(0)
}

pub fn landing_date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, day).unwrap()
}

/// Build a catch certificate with one landing per
/// (vessel, day-of-february, species, weight) tuple.
pub fn certificate(
    certificate_number: &str,
    created_at: &str,
    landings: &[(&str, u32, &str, f64)],
) -> CatchCertificate {
    CatchCertificate {
        certificate_number: certificate_number.to_string(),
        status: None,
        created_at: created_at.parse().unwrap(),
        exporter: None,
        landings: landings
            .iter()
            .map(|(vessel, day, species, weight)| CertificateLanding {
                vessel_pln: vessel.to_string(),
                date_landed: landing_date(*day),
                species: species.to_string(),
                export_weight: *weight,
            })
            .collect(),
    }
}

pub fn landing_record(
    vessel: &str,
    day: u32,
    species: &str,
    live_weight: f64,
    source: LandingSourceKind,
) -> LandingRecord {
    LandingRecord {
        vessel_pln: vessel.to_string(),
        date_landed: landing_date(day),
        species: species.to_string(),
        live_weight,
        source,
    }
}
