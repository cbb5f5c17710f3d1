//! Online validation report.
//!
//! Validates a single export document against the current FCC usage:
//! the document's FCC references are expanded into a store query so the
//! reconciliation sees every sibling drawing on the same certificates,
//! then the document's own rows are folded into one pass/fail check per
//! distinct (certificate, species) pair.

use std::collections::HashSet;

use crate::api::{
    Authority, CertificateSpeciesCheck, CheckStatus, OnlineValidationReport,
};
use crate::db::repository::{
    DocumentFilter, DocumentRepository, RepositoryError, RepositoryResult,
};

use super::allocation::build_allocation_index;
use super::reconcile::reconcile;
use super::unwind::unwind_all;

/// Validate one document's FCC usage.
///
/// Certificate numbers are upper-cased for the store query so usage is
/// de-duplicated globally across submission channels.
pub async fn run_online_validation(
    repo: &dyn DocumentRepository,
    document_number: &str,
    lookup: &dyn Fn(&str) -> Option<Authority>,
) -> RepositoryResult<OnlineValidationReport> {
    let target = repo
        .fetch_document(document_number)
        .await?
        .ok_or_else(|| {
            RepositoryError::not_found(format!("document {} not found", document_number))
        })?;

    let certificates: Vec<String> = target
        .referenced_certificates()
        .into_iter()
        .map(|number| number.to_uppercase())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let filter = DocumentFilter {
        certificate_numbers: certificates,
        ..Default::default()
    };
    let documents = repo.fetch_documents(&filter).await?;

    let catches = unwind_all(&documents, lookup);
    let index = build_allocation_index(&catches);

    let mut checks: Vec<CertificateSpeciesCheck> = Vec::new();
    for reconciled in reconcile(catches, &index) {
        if reconciled.record.document_number != document_number {
            continue;
        }

        let failed = reconciled.is_over_allocated || reconciled.is_mismatch;
        let position = checks.iter().position(|check| {
            check.certificate_number == reconciled.record.certificate_number
                && check.species == reconciled.record.species
        });
        match position {
            Some(position) => {
                let check = &mut checks[position];
                check.over_allocated |= reconciled.is_over_allocated;
                check.mismatch |= reconciled.is_mismatch;
                if failed {
                    check.status = CheckStatus::Fail;
                }
            }
            None => checks.push(CertificateSpeciesCheck {
                certificate_number: reconciled.record.certificate_number.clone(),
                species: reconciled.record.species.clone(),
                status: if failed {
                    CheckStatus::Fail
                } else {
                    CheckStatus::Pass
                },
                over_allocated: reconciled.is_over_allocated,
                mismatch: reconciled.is_mismatch,
            }),
        }
    }

    let valid = checks
        .iter()
        .all(|check| check.status == CheckStatus::Pass);

    Ok(OnlineValidationReport {
        document_number: document_number.to_string(),
        valid,
        checks,
    })
}
