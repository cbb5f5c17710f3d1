//! Data model for raw export documents and catch certificates.

pub mod certificate;
pub mod document;

pub use certificate::{
    CatchCertificate, CertificateLanding, LandingKey, LandingRecord, LandingSourceKind,
};
pub use document::{
    parse_documents_json, AuditEvent, ExporterDetails, ProcessingCatch, ProcessingStatement,
    RawDocument, StorageCatch, StorageDocument, WeightField, PRE_APPROVED_EVENT, VOIDED_EVENT,
};
