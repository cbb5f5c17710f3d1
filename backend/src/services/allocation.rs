//! Allocation grouper.
//!
//! Groups flattened catches by the FCC number they reference and
//! computes, per species, the authoritative declared capacity and the
//! running allocation. Declared capacity is defined operationally:
//! whatever the earliest-submitted document claimed. Later documents
//! are reconciled against that baseline, never the other way around.

use std::collections::HashMap;

use super::unwind::FlattenedCatch;

/// One document's contribution to a certificate + species group.
#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    pub document_number: String,
    pub weight: f64,
}

/// Usage of one FCC + species pairing across all referencing documents.
#[derive(Debug, Clone)]
pub struct AllocationGroup {
    /// Document number that first referenced this pairing.
    pub created_by_document: String,
    /// Capacity, fixed by the first referencing document's claim.
    pub declared_weight: f64,
    /// Running sum of weight drawn by every referencing document.
    pub allocated_weight: f64,
    /// Ordered contributions, in allocation order.
    pub allocations_from: Vec<Contribution>,
}

/// Index of allocation groups keyed by certificate number + species.
pub type AllocationIndex = HashMap<String, AllocationGroup>;

/// Key joining a catch to its allocation group. Case-sensitive;
/// callers needing cross-run de-duplication upper-case certificate
/// numbers upstream.
pub fn allocation_key(certificate_number: &str, species: &str) -> String {
    format!("{}{}", certificate_number, species)
}

/// Build the allocation index for one reconciliation run.
///
/// The input is buffered and sorted by (certificate number, creation
/// time, document number); the tie-break on document number exists only
/// to make the ordering deterministic when timestamps collide. This is
/// the one materialized seam of the otherwise streaming pipeline.
pub fn build_allocation_index(catches: &[FlattenedCatch]) -> AllocationIndex {
    let mut ordered: Vec<&FlattenedCatch> = catches.iter().collect();
    ordered.sort_by(|a, b| {
        a.certificate_number
            .cmp(&b.certificate_number)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.document_number.cmp(&b.document_number))
    });

    let mut index = AllocationIndex::new();
    for catch in ordered {
        let key = allocation_key(&catch.certificate_number, &catch.species);
        let group = index.entry(key).or_insert_with(|| AllocationGroup {
            created_by_document: catch.document_number.clone(),
            declared_weight: catch.weight_on_cc,
            allocated_weight: 0.0,
            allocations_from: Vec::new(),
        });

        group.allocated_weight += catch.weight;
        group.allocations_from.push(Contribution {
            document_number: catch.document_number.clone(),
            weight: catch.weight,
        });
    }

    index
}
