use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use common::{MediaTypeSelector, SyncError};
use library::{apply_plan, enumerate, fetch_item, Transport, DEFAULT_PAGE_SIZE};
use metadata::{classify, TagMap};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::report::{ItemOutcome, ReportSink, RunReport};

pub const DEFAULT_WORKERS: usize = 2;

struct WorkItem {
    selector: Arc<MediaTypeSelector>,
    rating_key: String,
}

#[derive(Clone, Default)]
struct WorkQueue {
    pending: Arc<Mutex<VecDeque<WorkItem>>>,
}

impl WorkQueue {
    fn push_all(&self, selector: &MediaTypeSelector, keys: Vec<String>) {
        let selector = Arc::new(selector.clone());
        let mut pending = self.pending.lock();
        for rating_key in keys {
            pending.push_back(WorkItem {
                selector: Arc::clone(&selector),
                rating_key,
            });
        }
    }

    fn pop(&self) -> Option<WorkItem> {
        self.pending.lock().pop_front()
    }

    fn len(&self) -> usize {
        self.pending.lock().len()
    }
}

// Records the item as failed if the worker holding it dies mid-flight.
struct InFlight<'a> {
    sink: &'a ReportSink,
    rating_key: &'a str,
    settled: bool,
}

impl<'a> InFlight<'a> {
    fn new(sink: &'a ReportSink, rating_key: &'a str) -> Self {
        Self {
            sink,
            rating_key,
            settled: false,
        }
    }

    fn settle(mut self, outcome: ItemOutcome) {
        self.settled = true;
        self.sink.record(self.rating_key, outcome);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.sink.record(
                self.rating_key,
                ItemOutcome::Failed {
                    applied: 0,
                    error: SyncError::WorkerAborted("worker stopped while processing".to_string()),
                },
            );
        }
    }
}

#[derive(Clone)]
pub struct SyncScheduler {
    transport: Arc<dyn Transport>,
    tags: Arc<TagMap>,
    page_size: usize,
    dry_run: bool,
}

impl SyncScheduler {
    pub fn new(transport: Arc<dyn Transport>, tags: TagMap) -> Self {
        Self {
            transport,
            tags: Arc::new(tags),
            page_size: DEFAULT_PAGE_SIZE,
            dry_run: false,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Enumerates every selector, then drains the pending items with
    /// `workers` concurrent workers. Listing failures abort the run; item
    /// failures are recorded in the report.
    pub async fn run(
        &self,
        selectors: &[MediaTypeSelector],
        workers: usize,
    ) -> Result<RunReport, SyncError> {
        let started = Instant::now();
        let queue = WorkQueue::default();
        for selector in selectors {
            let keys = enumerate(self.transport.as_ref(), selector, self.page_size)
                .collect_keys()
                .await?;
            if !keys.is_empty() {
                info!("{}: {} entries", selector, keys.len());
            }
            queue.push_all(selector, keys);
        }

        let sink = ReportSink::new(self.dry_run);
        let workers = workers.max(1);
        info!("Processing {} entries with {} workers", queue.len(), workers);

        let mut handles = Vec::with_capacity(workers);
        for worker in 0..workers {
            let scheduler = self.clone();
            let queue = queue.clone();
            let sink = sink.clone();
            handles.push(tokio::spawn(async move {
                scheduler.drain(worker, queue, sink).await;
            }));
        }
        for handle in handles {
            if let Err(err) = handle.await {
                warn!("Sync worker stopped abnormally: {}", err);
            }
        }
        // Only reachable when every worker died before the queue was empty.
        while let Some(item) = queue.pop() {
            sink.record(
                &item.rating_key,
                ItemOutcome::Failed {
                    applied: 0,
                    error: SyncError::WorkerAborted("no worker left".to_string()),
                },
            );
        }

        let report = sink.finish(started.elapsed());
        info!(
            "Run finished in {:.2}s: {} scanned, {} changed, {} failed",
            report.elapsed.as_secs_f64(),
            report.items_scanned,
            report.items_changed,
            report.items_failed
        );
        Ok(report)
    }

    async fn drain(&self, worker: usize, queue: WorkQueue, sink: ReportSink) {
        let mut handled = 0usize;
        while let Some(item) = queue.pop() {
            let in_flight = InFlight::new(&sink, &item.rating_key);
            let outcome = self.process(&item).await;
            in_flight.settle(outcome);
            handled += 1;
        }
        debug!("Worker {} done after {} entries", worker, handled);
    }

    async fn process(&self, item: &WorkItem) -> ItemOutcome {
        let transport = self.transport.as_ref();
        let media = match fetch_item(transport, &item.selector, &item.rating_key).await {
            Ok(media) => media,
            Err(err) if err.is_not_found() => {
                warn!("Skipping {}: {}", item.rating_key, err);
                return ItemOutcome::Skipped(err);
            }
            Err(err) => {
                warn!("Failed to fetch {}: {}", item.rating_key, err);
                return ItemOutcome::Failed {
                    applied: 0,
                    error: err,
                };
            }
        };

        let Some(plan) = classify(&media, &self.tags) else {
            return ItemOutcome::Unchanged;
        };

        if self.dry_run {
            if let Some(sort_title) = &plan.new_sort_title {
                info!("[dry run] {} < {} >", plan.title, sort_title);
            }
            for edit in &plan.tag_edits {
                info!(
                    "[dry run] {} : {} {} → {}",
                    plan.title,
                    edit.taxonomy.field(),
                    edit.old_tag,
                    edit.new_tag
                );
            }
            return ItemOutcome::Changed { applied: 0 };
        }

        let outcome = apply_plan(transport, &plan).await;
        let applied = outcome.applied;
        match outcome.into_result() {
            Ok(_) => ItemOutcome::Changed { applied },
            Err(error) => ItemOutcome::Failed { applied, error },
        }
    }
}
