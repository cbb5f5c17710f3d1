//! Reconciliation engine.
//!
//! Joins each flattened catch back to its allocation group, yielding a
//! decorated record with over-allocation and mismatch flags. The
//! sequence is lazy, single-pass and forward-only, and preserves the
//! original input order: `over_used_info` depends on it.

use log::warn;

use super::allocation::{allocation_key, AllocationIndex};
use super::unwind::FlattenedCatch;

/// Absolute kilogram buffer against floating-point and measurement
/// noise. Not a percentage.
pub const TOLERANCE_IN_KG: f64 = 50.0;

/// A flattened catch joined against its allocation group.
#[derive(Debug, Clone)]
pub struct ReconciledCatch {
    pub record: FlattenedCatch,
    /// Declared capacity of the group.
    pub weight_on_fcc: f64,
    /// Total allocated against the group across all documents.
    pub weight_on_all_docs: f64,
    pub is_over_allocated: bool,
    /// Exact excess when over-allocated, else 0.
    pub over_allocated_by_weight: f64,
    /// True when this document's own claimed capacity diverges from
    /// the group's declared weight. No tolerance applied.
    pub is_mismatch: bool,
    /// Document numbers emitted before this one, when the group is
    /// over-allocated; empty otherwise.
    pub over_used_info: Vec<String>,
}

/// Lazy reconciliation pass over the original catch sequence.
///
/// The engine owns one running list of document numbers shared across
/// the entire run. It is deliberately not scoped per group: emitted
/// `over_used_info` values grow monotonically across all groups
/// processed earlier in the run. Catches whose group lookup fails are
/// logged and skipped; `dropped()` reports how many.
pub struct Reconciliation<'a, I>
where
    I: Iterator<Item = FlattenedCatch>,
{
    catches: I,
    index: &'a AllocationIndex,
    seen_documents: Vec<String>,
    dropped: usize,
}

impl<'a, I> Reconciliation<'a, I>
where
    I: Iterator<Item = FlattenedCatch>,
{
    /// Count of records skipped because no allocation group matched.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    fn over_used_snapshot(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for document in &self.seen_documents {
            if !seen.contains(document) {
                seen.push(document.clone());
            }
        }
        seen
    }
}

impl<'a, I> Iterator for Reconciliation<'a, I>
where
    I: Iterator<Item = FlattenedCatch>,
{
    type Item = ReconciledCatch;

    fn next(&mut self) -> Option<ReconciledCatch> {
        loop {
            let record = self.catches.next()?;
            let key = allocation_key(&record.certificate_number, &record.species);

            let group = match self.index.get(&key) {
                Some(group) => group,
                None => {
                    warn!(
                        "no allocation group for document {} ({} / {}), dropping record",
                        record.document_number, record.certificate_number, record.species
                    );
                    self.dropped += 1;
                    continue;
                }
            };

            let is_over_allocated =
                group.allocated_weight > group.declared_weight + TOLERANCE_IN_KG;
            let over_allocated_by_weight = if is_over_allocated {
                group.allocated_weight - group.declared_weight
            } else {
                0.0
            };
            let is_mismatch = record.weight_on_cc != group.declared_weight;
            let over_used_info = if is_over_allocated {
                self.over_used_snapshot()
            } else {
                Vec::new()
            };

            self.seen_documents.push(record.document_number.clone());

            return Some(ReconciledCatch {
                weight_on_fcc: group.declared_weight,
                weight_on_all_docs: group.allocated_weight,
                is_over_allocated,
                over_allocated_by_weight,
                is_mismatch,
                over_used_info,
                record,
            });
        }
    }
}

/// Reconcile catches against the index, consuming the input sequence.
pub fn reconcile<I>(catches: I, index: &AllocationIndex) -> Reconciliation<'_, I::IntoIter>
where
    I: IntoIterator<Item = FlattenedCatch>,
{
    Reconciliation {
        catches: catches.into_iter(),
        index,
        seen_documents: Vec::new(),
        dropped: 0,
    }
}
