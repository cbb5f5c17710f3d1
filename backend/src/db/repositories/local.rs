//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. All data is stored
//! in memory using HashMap and Vec structures, providing fast,
//! deterministic, and isolated execution.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::Authority;
use crate::db::checksum::calculate_checksum;
use crate::db::repository::{
    CertificateFilter, CertificateRepository, DocumentFilter, DocumentRepository, FullRepository,
    RepositoryError, RepositoryResult,
};
use crate::models::{CatchCertificate, LandingKey, LandingRecord, RawDocument};

fn no_postcodes(_postcode: &str) -> Option<Authority> {
    None
}

/// In-memory local repository.
///
/// Documents are deduplicated by payload checksum on store. Region
/// filtering derives the authority from the exporter postcode through
/// the configured lookup, falling back to England.
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
    postcode_lookup: fn(&str) -> Option<Authority>,
}

#[derive(Default)]
struct LocalData {
    documents: HashMap<String, RawDocument>,
    document_checksums: HashMap<String, String>,
    certificates: HashMap<String, CatchCertificate>,
    landings: Vec<LandingRecord>,
    is_healthy: bool,
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::with_postcode_lookup(no_postcodes)
    }

    /// Create a repository with a postcode→authority lookup used for
    /// region filtering.
    pub fn with_postcode_lookup(lookup: fn(&str) -> Option<Authority>) -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData {
                is_healthy: true,
                ..Default::default()
            })),
            postcode_lookup: lookup,
        }
    }

    /// Simulate a lost store connection; subsequent operations fail
    /// with a connection error until restored.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    fn authority_of(&self, document: &RawDocument) -> Authority {
        document
            .exporter()
            .and_then(|exporter| exporter.postcode.as_deref())
            .and_then(|postcode| (self.postcode_lookup)(postcode))
            .unwrap_or(Authority::England)
    }

    fn matches_document(&self, document: &RawDocument, filter: &DocumentFilter) -> bool {
        if let Some(ref number) = filter.document_number {
            if document.document_number() != number {
                return false;
            }
        }

        if let Some(ref fragment) = filter.exporter_name_contains {
            let company = document
                .exporter()
                .and_then(|exporter| exporter.company_name.as_deref())
                .unwrap_or("");
            if !company.to_lowercase().contains(&fragment.to_lowercase()) {
                return false;
            }
        }

        let created = document.created_at();
        if let Some(from) = filter.created_from {
            if created < from {
                return false;
            }
        }
        if let Some(to) = filter.created_to {
            if created > to {
                return false;
            }
        }

        if !filter.statuses.is_empty() {
            let status = document.status().unwrap_or("COMPLETE");
            if !filter.statuses.iter().any(|wanted| wanted == status) {
                return false;
            }
        }

        if !filter.authorities.is_empty()
            && !filter.authorities.contains(&self.authority_of(document))
        {
            return false;
        }

        if !filter.certificate_numbers.is_empty() {
            let referenced = document.referenced_certificates();
            let any_match = referenced.iter().any(|number| {
                filter
                    .certificate_numbers
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(number))
            });
            if !any_match {
                return false;
            }
        }

        true
    }

    fn matches_certificate(
        certificate: &CatchCertificate,
        filter: &CertificateFilter,
    ) -> bool {
        if let Some(ref number) = filter.certificate_number {
            if &certificate.certificate_number != number {
                return false;
            }
        }

        if let Some(ref fragment) = filter.exporter_name_contains {
            let company = certificate
                .exporter
                .as_ref()
                .and_then(|exporter| exporter.company_name.as_deref())
                .unwrap_or("");
            if !company.to_lowercase().contains(&fragment.to_lowercase()) {
                return false;
            }
        }

        if let Some(from) = filter.created_from {
            if certificate.created_at < from {
                return false;
            }
        }
        if let Some(to) = filter.created_to {
            if certificate.created_at > to {
                return false;
            }
        }

        true
    }

    fn ensure_healthy(data: &LocalData) -> RepositoryResult<()> {
        if data.is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::connection(
                "local repository marked unhealthy",
            ))
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentRepository for LocalRepository {
    async fn store_document(&self, document: &RawDocument) -> RepositoryResult<String> {
        let payload = serde_json::to_string(document)
            .map_err(|e| RepositoryError::internal(format!("encode document: {}", e)))?;
        let checksum = calculate_checksum(&payload);
        let number = document.document_number().to_string();

        let mut data = self.data.write();
        Self::ensure_healthy(&data)?;

        if data.document_checksums.get(&number) == Some(&checksum) {
            return Ok(number);
        }

        data.document_checksums.insert(number.clone(), checksum);
        data.documents.insert(number.clone(), document.clone());
        Ok(number)
    }

    async fn fetch_document(
        &self,
        document_number: &str,
    ) -> RepositoryResult<Option<RawDocument>> {
        let data = self.data.read();
        Self::ensure_healthy(&data)?;
        Ok(data.documents.get(document_number).cloned())
    }

    async fn fetch_documents(
        &self,
        filter: &DocumentFilter,
    ) -> RepositoryResult<Vec<RawDocument>> {
        let data = self.data.read();
        Self::ensure_healthy(&data)?;

        let mut documents: Vec<RawDocument> = data
            .documents
            .values()
            .filter(|document| self.matches_document(document, filter))
            .cloned()
            .collect();
        documents.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.document_number().cmp(b.document_number()))
        });
        Ok(documents)
    }
}

#[async_trait]
impl CertificateRepository for LocalRepository {
    async fn store_certificate(
        &self,
        certificate: &CatchCertificate,
    ) -> RepositoryResult<String> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data)?;

        let number = certificate.certificate_number.clone();
        data.certificates.insert(number.clone(), certificate.clone());
        Ok(number)
    }

    async fn fetch_certificates(
        &self,
        filter: &CertificateFilter,
    ) -> RepositoryResult<Vec<CatchCertificate>> {
        let data = self.data.read();
        Self::ensure_healthy(&data)?;

        let mut certificates: Vec<CatchCertificate> = data
            .certificates
            .values()
            .filter(|certificate| Self::matches_certificate(certificate, filter))
            .cloned()
            .collect();
        certificates.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.certificate_number.cmp(&b.certificate_number))
        });
        Ok(certificates)
    }

    async fn fetch_certificates_by_landing_keys(
        &self,
        keys: &[LandingKey],
    ) -> RepositoryResult<Vec<CatchCertificate>> {
        let data = self.data.read();
        Self::ensure_healthy(&data)?;

        let mut certificates: Vec<CatchCertificate> = data
            .certificates
            .values()
            .filter(|certificate| {
                certificate
                    .landing_keys()
                    .iter()
                    .any(|key| keys.contains(key))
            })
            .cloned()
            .collect();
        certificates.sort_by(|a, b| a.certificate_number.cmp(&b.certificate_number));
        Ok(certificates)
    }

    async fn fetch_landings(&self, keys: &[LandingKey]) -> RepositoryResult<Vec<LandingRecord>> {
        let data = self.data.read();
        Self::ensure_healthy(&data)?;

        Ok(data
            .landings
            .iter()
            .filter(|record| keys.contains(&record.key()))
            .cloned()
            .collect())
    }

    async fn store_landings(&self, records: Vec<LandingRecord>) -> RepositoryResult<usize> {
        let mut data = self.data.write();
        Self::ensure_healthy(&data)?;

        let stored = records.len();
        for record in records {
            let position = data.landings.iter().position(|known| {
                known.key() == record.key()
                    && known.species == record.species
                    && known.source == record.source
            });
            match position {
                Some(position) => data.landings[position] = record,
                None => data.landings.push(record),
            }
        }
        Ok(stored)
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }
}
