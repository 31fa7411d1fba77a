pub mod config;
mod report;
mod scheduler;

use std::sync::Arc;
use std::time::Duration;

use common::{MediaTypeSelector, SyncError};
use library::{expand_selectors, filter_sections, list_sections, PlexClient, Transport};
use metadata::TagMap;

pub use report::{ItemOutcome, ReportSink, RunReport};
pub use scheduler::{SyncScheduler, DEFAULT_WORKERS};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Localizes every entry reachable through `selectors` on the server at
/// `host`, using the built-in tag table.
pub async fn run(
    host: &str,
    token: &str,
    selectors: &[MediaTypeSelector],
    workers: usize,
) -> Result<RunReport, SyncError> {
    let client = PlexClient::new(host, token, DEFAULT_TIMEOUT)?;
    SyncScheduler::new(Arc::new(client), TagMap::builtin())
        .run(selectors, workers)
        .await
}

/// Lists the server's sections, keeps the ones named in `wanted` (all when
/// empty) and expands them into selectors.
pub async fn resolve_selectors(
    transport: &dyn Transport,
    wanted: &[String],
) -> Result<Vec<MediaTypeSelector>, SyncError> {
    let sections = filter_sections(list_sections(transport).await?, wanted);
    Ok(sections.iter().flat_map(expand_selectors).collect())
}
