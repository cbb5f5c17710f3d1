//! Investigation refresh orchestration.
//!
//! Before the catch-certificate/landings reconciliation can be trusted,
//! any landing that is referenced but not yet known must be refreshed
//! from the external landing feeds. The workflow is strictly
//! sequential: fetch base certificates, widen to siblings sharing the
//! same landings, detect missing landings, refresh each missing key
//! best-effort, re-fetch, reconcile, and filter the result back down to
//! the caller's base set. At most one refresh call is outstanding at a
//! time; a failed key is recorded and the run carries on.
//!
//! The detection and reconciliation algorithms themselves are external
//! collaborators injected through the traits below.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use log::warn;
use std::collections::HashSet;

use crate::api::{InvestigationOutcome, InvestigationReportRow, RefreshFailure};
use crate::db::repository::{CertificateFilter, CertificateRepository, RepositoryResult};
use crate::models::{CatchCertificate, LandingKey, LandingRecord, LandingSourceKind};
use crate::publish::{CaseMessage, CasePublisher};

use super::run_tracker::{LogLevel, RunTracker};

/// Failure reported by an external landing feed.
#[derive(Debug, thiserror::Error)]
#[error("landing source error: {0}")]
pub struct LandingSourceError(pub String);

/// External landing data feed.
///
/// An empty result is not an error; it means the feed knows nothing
/// about the key yet.
#[async_trait]
pub trait LandingDataSource: Send + Sync {
    async fn fetch_landings(
        &self,
        date_landed: NaiveDate,
        vessel_pln: &str,
        source: LandingSourceKind,
    ) -> Result<Vec<LandingRecord>, LandingSourceError>;
}

/// Pure detection of landings that are referenced but not satisfied as
/// of the requested date.
pub trait MissingLandingDetector: Send + Sync {
    fn detect(
        &self,
        certificates: &[CatchCertificate],
        landings: &[LandingRecord],
        as_of: DateTime<Utc>,
    ) -> Vec<LandingKey>;
}

/// The certificate/landings reconciliation algorithm, supplied by the
/// shared compliance library.
pub trait LandingsReconciler: Send + Sync {
    fn reconcile(
        &self,
        certificates: &[CatchCertificate],
        landings: &[LandingRecord],
    ) -> Vec<InvestigationReportRow>;
}

/// One investigation request.
#[derive(Debug, Clone)]
pub struct InvestigationRequest {
    pub run_id: String,
    pub filter: CertificateFilter,
    pub as_of: DateTime<Utc>,
}

/// Run one investigation: refresh stale landing data, reconcile, and
/// report on the certificates matching the caller's filter.
///
/// Repository failures abort the run and propagate; landing-feed
/// failures are per-key and recorded in the outcome.
pub async fn run_investigation(
    repo: &dyn CertificateRepository,
    source: &dyn LandingDataSource,
    detector: &dyn MissingLandingDetector,
    reconciler: &dyn LandingsReconciler,
    tracker: &RunTracker,
    request: &InvestigationRequest,
) -> RepositoryResult<InvestigationOutcome> {
    tracker.start_run(&request.run_id);

    match investigate(repo, source, detector, reconciler, tracker, request).await {
        Ok(outcome) => {
            tracker.complete_run(
                &request.run_id,
                Some(serde_json::json!({
                    "rows": outcome.rows.len(),
                    "missingKeys": outcome.missing_keys,
                    "refreshedKeys": outcome.refreshed_keys,
                    "refreshFailures": outcome.refresh_failures.len(),
                })),
            );
            Ok(outcome)
        }
        Err(error) => {
            tracker.fail_run(&request.run_id, error.to_string());
            Err(error)
        }
    }
}

async fn investigate(
    repo: &dyn CertificateRepository,
    source: &dyn LandingDataSource,
    detector: &dyn MissingLandingDetector,
    reconciler: &dyn LandingsReconciler,
    tracker: &RunTracker,
    request: &InvestigationRequest,
) -> RepositoryResult<InvestigationOutcome> {
    let run_id = request.run_id.as_str();

    // Step 1: base certificates; their numbers form the closure used to
    // filter the final rows.
    tracker.log(run_id, LogLevel::Info, "Fetching base certificates...");
    let base = repo.fetch_certificates(&request.filter).await?;
    let base_numbers: HashSet<String> = base
        .iter()
        .map(|certificate| certificate.certificate_number.clone())
        .collect();
    tracker.log(
        run_id,
        LogLevel::Info,
        format!("Found {} base certificate(s)", base.len()),
    );

    // Step 2: widen to sibling certificates sharing the referenced
    // landings; siblings exist only to make the reconciliation
    // mathematically correct.
    let mut keys: HashSet<LandingKey> = base
        .iter()
        .flat_map(|certificate| certificate.landing_keys())
        .collect();
    let key_list: Vec<LandingKey> = keys.iter().cloned().collect();
    let siblings = repo.fetch_certificates_by_landing_keys(&key_list).await?;

    let mut certificates = base;
    for sibling in siblings {
        if certificates
            .iter()
            .any(|c| c.certificate_number == sibling.certificate_number)
        {
            continue;
        }
        keys.extend(sibling.landing_keys());
        certificates.push(sibling);
    }
    let key_list: Vec<LandingKey> = keys.into_iter().collect();
    tracker.log(
        run_id,
        LogLevel::Info,
        format!(
            "{} certificate(s) reference {} landing key(s)",
            certificates.len(),
            key_list.len()
        ),
    );

    // Step 3 + 4: current landing knowledge, then missing-landing
    // detection.
    let landings = repo.fetch_landings(&key_list).await?;
    let missing = detector.detect(&certificates, &landings, request.as_of);
    tracker.log(
        run_id,
        LogLevel::Info,
        format!("{} landing key(s) missing", missing.len()),
    );

    // Step 5: best-effort refresh, one key at a time. All three feeds
    // are swept per key regardless of earlier success; a failed feed is
    // recorded and the loop continues.
    let mut refresh_failures: Vec<RefreshFailure> = Vec::new();
    let mut refreshed_keys = 0usize;
    for key in &missing {
        let mut fetched = false;
        for kind in LandingSourceKind::ALL {
            match source
                .fetch_landings(key.date_landed, &key.vessel_pln, kind)
                .await
            {
                Ok(records) => {
                    if records.is_empty() {
                        continue;
                    }
                    repo.store_landings(records).await?;
                    fetched = true;
                }
                Err(error) => {
                    warn!(
                        "landing refresh failed for {} / {} via {}: {}",
                        key.vessel_pln,
                        key.date_landed,
                        kind.as_str(),
                        error
                    );
                    tracker.log(
                        run_id,
                        LogLevel::Warning,
                        format!(
                            "Refresh failed for {} / {} via {}",
                            key.vessel_pln,
                            key.date_landed,
                            kind.as_str()
                        ),
                    );
                    refresh_failures.push(RefreshFailure {
                        key: key.clone(),
                        source: kind,
                        message: error.to_string(),
                    });
                }
            }
        }
        if fetched {
            refreshed_keys += 1;
        }
    }

    // Step 6: reconcile with post-refresh landing knowledge.
    let landings = repo.fetch_landings(&key_list).await?;
    let mut rows = reconciler.reconcile(&certificates, &landings);

    // Step 7: siblings must not leak into the output.
    rows.retain(|row| base_numbers.contains(&row.certificate_number));
    tracker.log(
        run_id,
        LogLevel::Success,
        format!("Reconciled {} report row(s)", rows.len()),
    );

    Ok(InvestigationOutcome {
        rows,
        missing_keys: missing.len(),
        refreshed_keys,
        refresh_failures,
    })
}

/// Publish reconciled rows to the case-management system.
///
/// Fire-and-forget: delivery failures belong to the publisher and are
/// only logged here. Returns the number of accepted messages.
pub async fn publish_cases(
    publisher: &dyn CasePublisher,
    label: &str,
    rows: &[InvestigationReportRow],
) -> usize {
    let mut published = 0;
    for row in rows {
        let payload = match serde_json::to_value(row) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(
                    "failed to encode case payload for {}: {}",
                    row.certificate_number, error
                );
                continue;
            }
        };

        let message = CaseMessage {
            label: label.to_string(),
            document_number: row.certificate_number.clone(),
            payload,
        };
        match publisher.publish(&message).await {
            Ok(()) => published += 1,
            Err(error) => warn!(
                "failed to publish case for {}: {}",
                row.certificate_number, error
            ),
        }
    }
    published
}
