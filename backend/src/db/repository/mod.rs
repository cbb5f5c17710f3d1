//! Repository traits: the abstract interface to the document store.

pub mod certificates;
pub mod documents;
pub mod error;

pub use certificates::{CertificateFilter, CertificateRepository};
pub use documents::{DocumentFilter, DocumentRepository};
pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

/// Convenience trait for repositories implementing every concern.
#[async_trait]
pub trait FullRepository: DocumentRepository + CertificateRepository {
    /// Check if the store connection is healthy.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
