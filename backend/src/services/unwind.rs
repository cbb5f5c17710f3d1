//! Catch unwinder.
//!
//! Normalizes the two export document shapes into flat per-species
//! catch records. One raw document yields one record per catch line
//! item, preserving line-item order. Absent or malformed numeric
//! fields degrade to zero or `None` rather than erroring; the pipeline
//! favors a partial, explainable result over failing the whole report.

use chrono::{DateTime, Utc};

use crate::api::{Authority, DocumentType};
use crate::models::{
    AuditEvent, ProcessingStatement, RawDocument, StorageDocument, WeightField,
    PRE_APPROVED_EVENT, VOIDED_EVENT,
};

/// Status assigned when a document carries none.
pub const DEFAULT_STATUS: &str = "COMPLETE";

/// Storage-document fields carried through for reporting.
#[derive(Debug, Clone, Default)]
pub struct StorageDetails {
    pub date_of_unloading: Option<String>,
    pub place_of_unloading: Option<String>,
    pub transport_unloaded_from: Option<String>,
    /// Supporting document references, comma-joined when the source
    /// carries an array.
    pub supporting_documents: Option<String>,
}

/// Passthrough fields shared by both document shapes.
#[derive(Debug, Clone, Default)]
pub struct ExtendedInfo {
    pub url: Option<String>,
    pub exporter_company_name: Option<String>,
    pub investigation: Option<serde_json::Value>,
    /// Actor of the most recent VOIDED audit event, if any.
    pub voided_by: Option<String>,
    /// Actor of the most recent PRE_APPROVED audit event, if any.
    pub pre_approved_by: Option<String>,
    /// Storage-document specifics; `None` for processing statements.
    pub storage: Option<StorageDetails>,
}

/// One flattened (document, species line item) row.
#[derive(Debug, Clone)]
pub struct FlattenedCatch {
    pub document_number: String,
    pub document_type: DocumentType,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub da: Authority,
    pub certificate_number: String,
    pub certificate_type: Option<String>,
    pub species: String,
    pub scientific_name: Option<String>,
    /// Always `"N/A"` for processing statements; passthrough for
    /// storage documents.
    pub commodity_code: Option<String>,
    /// Weight declared on this document for this species.
    pub weight: f64,
    /// Capacity this document's line item claims to draw against.
    pub weight_on_cc: f64,
    pub weight_after_processing: Option<f64>,
    pub extended: ExtendedInfo,
}

fn kg_or_zero(field: Option<&WeightField>) -> f64 {
    field.and_then(WeightField::as_kg).unwrap_or(0.0)
}

fn last_audit_actor(trail: Option<&[AuditEvent]>, event_type: &str) -> Option<String> {
    trail?
        .iter()
        .filter(|event| event.event_type == event_type)
        .max_by_key(|event| event.timestamp)
        .map(|event| event.triggered_by.clone())
}

fn resolve_authority(
    document: &RawDocument,
    lookup: &dyn Fn(&str) -> Option<Authority>,
) -> Authority {
    document
        .exporter()
        .and_then(|exporter| exporter.postcode.as_deref())
        .and_then(|postcode| lookup(postcode))
        .unwrap_or(Authority::England)
}

fn extended_info(document: &RawDocument) -> ExtendedInfo {
    let storage = match document {
        RawDocument::ProcessingStatement(_) => None,
        RawDocument::StorageDocument(sd) => Some(StorageDetails {
            date_of_unloading: sd.date_of_unloading.clone(),
            place_of_unloading: sd.place_of_unloading.clone(),
            transport_unloaded_from: sd.transport_unloaded_from.clone(),
            supporting_documents: sd
                .supporting_documents
                .as_ref()
                .map(|documents| documents.join(",")),
        }),
    };

    ExtendedInfo {
        url: document.document_url().map(str::to_string),
        exporter_company_name: document
            .exporter()
            .and_then(|exporter| exporter.company_name.clone()),
        investigation: document.investigation().cloned(),
        voided_by: last_audit_actor(document.audit_trail(), VOIDED_EVENT),
        pre_approved_by: last_audit_actor(document.audit_trail(), PRE_APPROVED_EVENT),
        storage,
    }
}

fn unwind_processing_statement(
    document: &RawDocument,
    statement: &ProcessingStatement,
    da: Authority,
    status: &str,
) -> Vec<FlattenedCatch> {
    statement
        .catches
        .iter()
        .map(|item| FlattenedCatch {
            document_number: statement.document_number.clone(),
            document_type: DocumentType::ProcessingStatement,
            status: status.to_string(),
            created_at: statement.created_at,
            da,
            certificate_number: item.catch_certificate_number.clone().unwrap_or_default(),
            certificate_type: item.catch_certificate_type.clone(),
            species: item.species.clone().unwrap_or_default(),
            scientific_name: item.scientific_name.clone(),
            commodity_code: Some("N/A".to_string()),
            weight: kg_or_zero(item.export_weight_before_processing.as_ref()),
            weight_on_cc: kg_or_zero(item.total_weight_landed.as_ref()),
            weight_after_processing: item
                .export_weight_after_processing
                .as_ref()
                .and_then(WeightField::as_kg),
            extended: extended_info(document),
        })
        .collect()
}

fn unwind_storage_document(
    document: &RawDocument,
    storage: &StorageDocument,
    da: Authority,
    status: &str,
) -> Vec<FlattenedCatch> {
    storage
        .catches
        .iter()
        .map(|item| FlattenedCatch {
            document_number: storage.document_number.clone(),
            document_type: DocumentType::StorageDocument,
            status: status.to_string(),
            created_at: storage.created_at,
            da,
            certificate_number: item.certificate_number.clone().unwrap_or_default(),
            certificate_type: item.certificate_type.clone(),
            species: item.product.clone().unwrap_or_default(),
            scientific_name: item.scientific_name.clone(),
            commodity_code: item.commodity_code.clone(),
            weight: kg_or_zero(item.product_weight.as_ref()),
            weight_on_cc: kg_or_zero(item.weight_on_cc.as_ref()),
            weight_after_processing: None,
            extended: extended_info(document),
        })
        .collect()
}

/// Flatten one raw document into per-species catch records.
pub fn unwind_document(
    document: &RawDocument,
    lookup: &dyn Fn(&str) -> Option<Authority>,
) -> Vec<FlattenedCatch> {
    let status = document.status().unwrap_or(DEFAULT_STATUS);
    let da = resolve_authority(document, lookup);

    match document {
        RawDocument::ProcessingStatement(statement) => {
            unwind_processing_statement(document, statement, da, status)
        }
        RawDocument::StorageDocument(storage) => {
            unwind_storage_document(document, storage, da, status)
        }
    }
}

/// Flatten a batch of raw documents, preserving document order.
pub fn unwind_all(
    documents: &[RawDocument],
    lookup: &dyn Fn(&str) -> Option<Authority>,
) -> Vec<FlattenedCatch> {
    documents
        .iter()
        .flat_map(|document| unwind_document(document, lookup))
        .collect()
}
