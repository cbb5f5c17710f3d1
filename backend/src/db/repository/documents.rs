//! Document repository trait for export document queries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::RepositoryResult;
use crate::api::Authority;
use crate::models::RawDocument;

/// Query filter for export documents. Empty lists mean "no restriction".
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    /// Exact document number.
    pub document_number: Option<String>,
    /// Case-insensitive substring of the exporter company name.
    pub exporter_name_contains: Option<String>,
    /// Inclusive creation window.
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    /// Lifecycle statuses; a document without one counts as COMPLETE.
    pub statuses: Vec<String>,
    /// Postcode-derived authorities.
    pub authorities: Vec<Authority>,
    /// FCC numbers; matches a document when any line item references one.
    pub certificate_numbers: Vec<String>,
}

/// Repository trait for export document operations.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Store a document, replacing any previous version with the same
    /// number. An identical payload (by checksum) is a no-op.
    ///
    /// # Returns
    /// * `Ok(String)` - The stored document's number
    /// * `Err(RepositoryError)` - If the operation fails
    async fn store_document(&self, document: &RawDocument) -> RepositoryResult<String>;

    /// Fetch a single document by its number.
    async fn fetch_document(&self, document_number: &str)
        -> RepositoryResult<Option<RawDocument>>;

    /// Fetch every document matching the filter, ordered by creation
    /// time then document number.
    async fn fetch_documents(&self, filter: &DocumentFilter)
        -> RepositoryResult<Vec<RawDocument>>;
}
