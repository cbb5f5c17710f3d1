// ============================================================================
// Raw export document model
// ============================================================================
//
// These types mirror the document-store payloads for the two export
// document shapes. Weight fields arrive as either JSON numbers or
// numeric strings depending on the submitting channel, so they are
// modeled permissively and parsed on unwind.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::DocumentType;

/// Audit event type recorded when a document is voided.
pub const VOIDED_EVENT: &str = "VOIDED";

/// Audit event type recorded when a document is pre-approved.
pub const PRE_APPROVED_EVENT: &str = "PRE_APPROVED";

/// A numeric field that may arrive as a number or as a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeightField {
    Number(f64),
    Text(String),
}

impl WeightField {
    /// Parse the field as kilograms. Malformed text yields `None`.
    pub fn as_kg(&self) -> Option<f64> {
        match self {
            WeightField::Number(value) => Some(*value),
            WeightField::Text(text) => text.trim().parse::<f64>().ok(),
        }
    }
}

/// One entry of a document's ordered audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    pub event_type: String,
    pub triggered_by: String,
    pub timestamp: DateTime<Utc>,
}

/// Exporter company details as recorded on the document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExporterDetails {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub address_one: Option<String>,
    #[serde(default)]
    pub town_city: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
}

/// Per-species line item of a processing statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingCatch {
    #[serde(default)]
    pub catch_certificate_type: Option<String>,
    #[serde(default)]
    pub catch_certificate_number: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub export_weight_before_processing: Option<WeightField>,
    #[serde(default)]
    pub export_weight_after_processing: Option<WeightField>,
    #[serde(default)]
    pub total_weight_landed: Option<WeightField>,
}

/// Per-species line item of a storage document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageCatch {
    #[serde(default)]
    pub certificate_type: Option<String>,
    #[serde(default)]
    pub certificate_number: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub commodity_code: Option<String>,
    #[serde(default)]
    pub product_weight: Option<WeightField>,
    #[serde(default, rename = "weightOnCC")]
    pub weight_on_cc: Option<WeightField>,
}

/// A processing statement as stored by the document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStatement {
    pub document_number: String,
    #[serde(default)]
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub exporter: Option<ExporterDetails>,
    #[serde(default)]
    pub audit_trail: Option<Vec<AuditEvent>>,
    #[serde(default)]
    pub investigation: Option<serde_json::Value>,
    #[serde(default)]
    pub document_url: Option<String>,
    #[serde(default)]
    pub catches: Vec<ProcessingCatch>,
}

/// A storage document as stored by the document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageDocument {
    pub document_number: String,
    #[serde(default)]
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub exporter: Option<ExporterDetails>,
    #[serde(default)]
    pub audit_trail: Option<Vec<AuditEvent>>,
    #[serde(default)]
    pub investigation: Option<serde_json::Value>,
    #[serde(default)]
    pub document_url: Option<String>,
    #[serde(default)]
    pub date_of_unloading: Option<String>,
    #[serde(default)]
    pub place_of_unloading: Option<String>,
    #[serde(default)]
    pub transport_unloaded_from: Option<String>,
    #[serde(default)]
    pub supporting_documents: Option<Vec<String>>,
    #[serde(default)]
    pub catches: Vec<StorageCatch>,
}

/// Raw export document, discriminated by the `documentType` field.
///
/// The union is exhaustive: a payload carrying any other discriminator
/// is rejected at the model boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "documentType", rename_all = "camelCase")]
pub enum RawDocument {
    ProcessingStatement(ProcessingStatement),
    StorageDocument(StorageDocument),
}

impl RawDocument {
    pub fn document_type(&self) -> DocumentType {
        match self {
            RawDocument::ProcessingStatement(_) => DocumentType::ProcessingStatement,
            RawDocument::StorageDocument(_) => DocumentType::StorageDocument,
        }
    }

    pub fn document_number(&self) -> &str {
        match self {
            RawDocument::ProcessingStatement(ps) => &ps.document_number,
            RawDocument::StorageDocument(sd) => &sd.document_number,
        }
    }

    pub fn status(&self) -> Option<&str> {
        match self {
            RawDocument::ProcessingStatement(ps) => ps.status.as_deref(),
            RawDocument::StorageDocument(sd) => sd.status.as_deref(),
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            RawDocument::ProcessingStatement(ps) => ps.created_at,
            RawDocument::StorageDocument(sd) => sd.created_at,
        }
    }

    pub fn exporter(&self) -> Option<&ExporterDetails> {
        match self {
            RawDocument::ProcessingStatement(ps) => ps.exporter.as_ref(),
            RawDocument::StorageDocument(sd) => sd.exporter.as_ref(),
        }
    }

    pub fn audit_trail(&self) -> Option<&[AuditEvent]> {
        match self {
            RawDocument::ProcessingStatement(ps) => ps.audit_trail.as_deref(),
            RawDocument::StorageDocument(sd) => sd.audit_trail.as_deref(),
        }
    }

    pub fn investigation(&self) -> Option<&serde_json::Value> {
        match self {
            RawDocument::ProcessingStatement(ps) => ps.investigation.as_ref(),
            RawDocument::StorageDocument(sd) => sd.investigation.as_ref(),
        }
    }

    pub fn document_url(&self) -> Option<&str> {
        match self {
            RawDocument::ProcessingStatement(ps) => ps.document_url.as_deref(),
            RawDocument::StorageDocument(sd) => sd.document_url.as_deref(),
        }
    }

    /// Certificate numbers referenced by this document's line items,
    /// in line-item order. Absent references are skipped.
    pub fn referenced_certificates(&self) -> Vec<String> {
        match self {
            RawDocument::ProcessingStatement(ps) => ps
                .catches
                .iter()
                .filter_map(|c| c.catch_certificate_number.clone())
                .collect(),
            RawDocument::StorageDocument(sd) => sd
                .catches
                .iter()
                .filter_map(|c| c.certificate_number.clone())
                .collect(),
        }
    }
}

fn validate_documents_payload(documents_json: &str) -> Result<()> {
    let value: serde_json::Value =
        serde_json::from_str(documents_json).context("Invalid documents JSON")?;
    if !value.is_array() {
        anyhow::bail!("Expected a top-level array of documents");
    }
    Ok(())
}

/// Parse a batch of raw documents from a JSON array string.
///
/// Input timestamps may carry any UTC offset; they are normalized to
/// UTC during deserialization.
pub fn parse_documents_json(documents_json: &str) -> Result<Vec<RawDocument>> {
    validate_documents_payload(documents_json)?;

    serde_json::from_str(documents_json).context("Failed to deserialize documents JSON")
}
