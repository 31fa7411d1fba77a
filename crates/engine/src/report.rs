use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use common::SyncError;
use parking_lot::Mutex;

#[derive(Clone, Debug, Default)]
pub struct RunReport {
    pub items_scanned: usize,
    pub items_changed: usize,
    pub items_skipped: usize,
    pub items_failed: usize,
    pub writes_applied: usize,
    pub errors: BTreeMap<String, SyncError>,
    pub elapsed: Duration,
    pub dry_run: bool,
}

#[derive(Debug)]
pub enum ItemOutcome {
    Unchanged,
    Changed { applied: usize },
    Skipped(SyncError),
    Failed { applied: usize, error: SyncError },
}

/// Append-only accumulator shared by all workers of one run.
#[derive(Clone)]
pub struct ReportSink {
    inner: Arc<Mutex<RunReport>>,
}

impl ReportSink {
    pub fn new(dry_run: bool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RunReport {
                dry_run,
                ..RunReport::default()
            })),
        }
    }

    pub fn record(&self, rating_key: &str, outcome: ItemOutcome) {
        let mut report = self.inner.lock();
        report.items_scanned += 1;
        match outcome {
            ItemOutcome::Unchanged => {}
            ItemOutcome::Changed { applied } => {
                report.items_changed += 1;
                report.writes_applied += applied;
            }
            ItemOutcome::Skipped(error) => {
                report.items_skipped += 1;
                report.errors.entry(rating_key.to_string()).or_insert(error);
            }
            ItemOutcome::Failed { applied, error } => {
                report.items_failed += 1;
                report.writes_applied += applied;
                report.errors.entry(rating_key.to_string()).or_insert(error);
            }
        }
    }

    pub fn finish(&self, elapsed: Duration) -> RunReport {
        let mut report = self.inner.lock().clone();
        report.elapsed = elapsed;
        report
    }
}
