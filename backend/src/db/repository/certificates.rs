//! Certificate repository trait for the investigation domain.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::RepositoryResult;
use crate::models::{CatchCertificate, LandingKey, LandingRecord};

/// Query filter for catch certificates.
#[derive(Debug, Clone, Default)]
pub struct CertificateFilter {
    /// Exact certificate number.
    pub certificate_number: Option<String>,
    /// Case-insensitive substring of the exporter company name.
    pub exporter_name_contains: Option<String>,
    /// Inclusive creation window.
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

/// Repository trait for catch certificate and landing operations.
#[async_trait]
pub trait CertificateRepository: Send + Sync {
    /// Store a certificate, replacing any previous version with the
    /// same number.
    async fn store_certificate(
        &self,
        certificate: &CatchCertificate,
    ) -> RepositoryResult<String>;

    /// Fetch certificates matching the filter.
    async fn fetch_certificates(
        &self,
        filter: &CertificateFilter,
    ) -> RepositoryResult<Vec<CatchCertificate>>;

    /// Fetch every certificate referencing any of the given landing
    /// keys.
    async fn fetch_certificates_by_landing_keys(
        &self,
        keys: &[LandingKey],
    ) -> RepositoryResult<Vec<CatchCertificate>>;

    /// Fetch the known landing records for the given keys.
    async fn fetch_landings(&self, keys: &[LandingKey]) -> RepositoryResult<Vec<LandingRecord>>;

    /// Store refreshed landing records.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records stored
    async fn store_landings(&self, records: Vec<LandingRecord>) -> RepositoryResult<usize>;
}
