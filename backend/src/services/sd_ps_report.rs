//! Processing-statement / storage-document reconciliation report.
//!
//! Filters reconciled records by time window and authority and maps
//! them into the external reporting shape.

use chrono::{DateTime, TimeZone, Utc};
use log::info;

use crate::api::{Authority, SdPsReportRow};
use crate::db::repository::{DocumentFilter, DocumentRepository, RepositoryResult};

use super::allocation::build_allocation_index;
use super::reconcile::{reconcile, ReconciledCatch};
use super::unwind::unwind_all;

/// Reporting window and authority filter.
///
/// Both bounds are inclusive: a record created exactly at `to` is
/// included.
#[derive(Debug, Clone)]
pub struct ReportFilter {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub authorities: Vec<Authority>,
}

impl Default for ReportFilter {
    fn default() -> Self {
        Self {
            from: Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap(),
            to: Utc.with_ymd_and_hms(2070, 1, 1, 0, 0, 0).unwrap(),
            authorities: Authority::all().to_vec(),
        }
    }
}

impl ReportFilter {
    fn matches(&self, catch: &ReconciledCatch) -> bool {
        let created = catch.record.created_at;
        created >= self.from && created <= self.to && self.authorities.contains(&catch.record.da)
    }
}

fn to_report_row(catch: ReconciledCatch) -> SdPsReportRow {
    let ReconciledCatch {
        record,
        weight_on_fcc,
        weight_on_all_docs,
        over_allocated_by_weight,
        is_mismatch,
        over_used_info,
        ..
    } = catch;

    SdPsReportRow {
        document_type: record.document_type.report_code().to_string(),
        document_number: record.document_number,
        status: record.status,
        created_at: record.created_at,
        da: record.da.as_str().to_string(),
        certificate_number: record.certificate_number,
        certificate_type: record.certificate_type,
        species: record.species,
        scientific_name: record.scientific_name,
        commodity_code: record.commodity_code,
        weight_on_doc: record.weight,
        weight_on_fcc,
        weight_on_all_docs,
        export_weight_exceeded: over_allocated_by_weight,
        input_weight_mismatch: if is_mismatch {
            Some("fail".to_string())
        } else {
            None
        },
        over_used_info,
        exporter_company_name: record.extended.exporter_company_name,
        document_url: record.extended.url,
    }
}

/// Lazily project reconciled catches into report rows, dropping those
/// outside the window or authority list.
pub fn project_rows<'a, I>(
    catches: I,
    filter: &'a ReportFilter,
) -> impl Iterator<Item = SdPsReportRow> + 'a
where
    I: Iterator<Item = ReconciledCatch> + 'a,
{
    catches
        .filter(move |catch| filter.matches(catch))
        .map(to_report_row)
}

/// Run the full SD/PS reconciliation report: fetch matching documents,
/// unwind, index, reconcile and project.
pub async fn run_sd_ps_report(
    repo: &dyn DocumentRepository,
    document_filter: &DocumentFilter,
    report_filter: &ReportFilter,
    lookup: &dyn Fn(&str) -> Option<Authority>,
) -> RepositoryResult<Vec<SdPsReportRow>> {
    let documents = repo.fetch_documents(document_filter).await?;
    let catches = unwind_all(&documents, lookup);
    let index = build_allocation_index(&catches);

    let mut engine = reconcile(catches, &index);
    let rows: Vec<SdPsReportRow> = project_rows(engine.by_ref(), report_filter).collect();
    if engine.dropped() > 0 {
        info!(
            "sd/ps report dropped {} record(s) with no allocation group",
            engine.dropped()
        );
    }

    Ok(rows)
}
