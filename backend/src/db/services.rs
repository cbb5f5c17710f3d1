//! High-level store service layer.
//!
//! This module provides repository-agnostic operations that work with
//! any implementation of the repository traits. Cross-cutting concerns
//! (deduplication logging, batch handling) live here so they stay
//! consistent regardless of the storage backend.

use log::info;

use super::repository::{
    CertificateFilter, CertificateRepository, DocumentFilter, DocumentRepository, FullRepository,
    RepositoryResult,
};
use crate::models::{CatchCertificate, RawDocument};

// ==================== Health & Connection ====================

/// Check if the store connection is healthy.
///
/// This is a simple pass-through to the repository's health check.
pub async fn health_check(repo: &dyn FullRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Document Operations ====================

/// Store a batch of raw documents.
///
/// # Returns
/// * `Ok(usize)` - Number of documents stored
pub async fn store_documents(
    repo: &dyn DocumentRepository,
    documents: &[RawDocument],
) -> RepositoryResult<usize> {
    for document in documents {
        repo.store_document(document).await?;
    }
    info!("stored {} document(s)", documents.len());
    Ok(documents.len())
}

/// Fetch documents matching the filter.
pub async fn fetch_documents(
    repo: &dyn DocumentRepository,
    filter: &DocumentFilter,
) -> RepositoryResult<Vec<RawDocument>> {
    repo.fetch_documents(filter).await
}

/// Fetch a single document by number.
pub async fn fetch_document(
    repo: &dyn DocumentRepository,
    document_number: &str,
) -> RepositoryResult<Option<RawDocument>> {
    repo.fetch_document(document_number).await
}

// ==================== Certificate Operations ====================

/// Store a batch of catch certificates.
pub async fn store_certificates(
    repo: &dyn CertificateRepository,
    certificates: &[CatchCertificate],
) -> RepositoryResult<usize> {
    for certificate in certificates {
        repo.store_certificate(certificate).await?;
    }
    info!("stored {} certificate(s)", certificates.len());
    Ok(certificates.len())
}

/// Fetch certificates matching the filter.
pub async fn fetch_certificates(
    repo: &dyn CertificateRepository,
    filter: &CertificateFilter,
) -> RepositoryResult<Vec<CatchCertificate>> {
    repo.fetch_certificates(filter).await
}
