//! Sync engine: upload pending learning records and drop the accepted ones.
//!
//! Flow: load config, validate it remotely, enumerate pending records, then
//! submit them one at a time. A failing record never aborts the batch; it stays
//! on disk for the next run. Config and auth failures abort before any submission.

use crate::core::config;
use crate::core::error::LearnsyncError;
use crate::core::pending::{self, PendingRecord};
use crate::core::remote::RemoteClient;
use crate::core::settings::Settings;
use crate::core::store::Store;
use crate::core::tui::{self, ItemStatus};
use crate::core::validate;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    /// Record title, or the pending file name when there is none.
    pub label: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub succeeded: usize,
    pub failures: Vec<RecordFailure>,
}

impl SyncReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Pending storage is absent or empty; no submission was attempted.
    NothingToSync,
    Completed(SyncReport),
}

impl SyncOutcome {
    pub fn succeeded(&self) -> usize {
        match self {
            SyncOutcome::NothingToSync => 0,
            SyncOutcome::Completed(report) => report.succeeded,
        }
    }

    pub fn failed(&self) -> usize {
        match self {
            SyncOutcome::NothingToSync => 0,
            SyncOutcome::Completed(report) => report.failed(),
        }
    }
}

/// Run one sync pass over the store's pending records.
pub fn sync_pending(store: &Store, client: &RemoteClient) -> Result<SyncOutcome, LearnsyncError> {
    let config = config::load(store)?;
    validate::validate_config(&config, client)?;

    let records = match pending::list_pending(store)? {
        Some(records) if !records.is_empty() => records,
        _ => return Ok(SyncOutcome::NothingToSync),
    };
    debug!(count = records.len(), "pending learnings found");

    let mut report = SyncReport::default();
    for record in &records {
        match submit_one(record, &config.api_key, &config.project_id, client) {
            Ok(()) => {
                report.succeeded += 1;
                if let Err(e) = record.remove() {
                    warn!(
                        path = %record.path.display(),
                        error = %e,
                        "learning accepted but could not be removed; it will be resubmitted"
                    );
                }
            }
            Err((label, err)) => {
                debug!(label = %label, error = %err, "learning left pending");
                report.failures.push(RecordFailure {
                    label,
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(SyncOutcome::Completed(report))
}

fn submit_one(
    record: &PendingRecord,
    api_key: &str,
    project_id: &str,
    client: &RemoteClient,
) -> Result<(), (String, LearnsyncError)> {
    let learning = record.read().map_err(|e| (record.file_name(), e))?;
    let label = learning
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| record.file_name());

    client
        .submit_learning(api_key, project_id, &learning)
        .map_err(|e| (label, e))
}

pub fn run_sync_cli(store: &Store, settings: &Settings) -> Result<(), LearnsyncError> {
    let client = RemoteClient::new(settings)?;
    tui::print_section("Syncing learnings");

    match sync_pending(store, &client)? {
        SyncOutcome::NothingToSync => {
            tui::print_status_line("Nothing to sync", ItemStatus::Skipped);
        }
        SyncOutcome::Completed(report) => {
            for failure in &report.failures {
                tui::print_status_line(
                    &format!("{}: {}", failure.label, failure.reason),
                    ItemStatus::Failed,
                );
            }
            tui::print_sync_summary(report.succeeded, report.failed());
        }
    }
    Ok(())
}
