use common::{LocalizationPlan, SyncError, TagEdit};
use tracing::{info, warn};

use crate::transport::{Transport, TransportError};

// Type code the server uses when editing a collection entry.
const COLLECTION_TYPE: u8 = 18;

#[derive(Debug, Default)]
pub struct ApplyOutcome {
    pub applied: usize,
    pub errors: Vec<SyncError>,
}

impl ApplyOutcome {
    /// First failure, if any write was refused.
    pub fn into_result(self) -> Result<usize, SyncError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.applied),
        }
    }

    fn record(&mut self, result: Result<(), SyncError>) {
        match result {
            Ok(()) => self.applied += 1,
            Err(err) => self.errors.push(err),
        }
    }
}

/// Issues every write of `plan`. Writes are independent: a refused write is
/// recorded and the remaining ones are still attempted.
pub async fn apply_plan(transport: &dyn Transport, plan: &LocalizationPlan) -> ApplyOutcome {
    let mut outcome = ApplyOutcome::default();

    if let Some(sort_title) = &plan.new_sort_title {
        let result = put_sort_title(transport, plan, sort_title).await;
        match &result {
            Ok(()) => info!("{} < {} >", plan.title, sort_title),
            Err(err) => warn!("{}: sort title not written: {}", plan.title, err),
        }
        outcome.record(result);
    }

    if !plan.collection {
        for edit in &plan.tag_edits {
            let result = put_tag_edit(transport, plan, edit).await;
            match &result {
                Ok(()) => info!(
                    "{} : {} {} → {}",
                    plan.title,
                    edit.taxonomy.field(),
                    edit.old_tag,
                    edit.new_tag
                ),
                Err(err) => warn!(
                    "{}: {} {} not replaced: {}",
                    plan.title,
                    edit.taxonomy.field(),
                    edit.old_tag,
                    err
                ),
            }
            outcome.record(result);
        }
    }

    outcome
}

async fn put_sort_title(
    transport: &dyn Transport,
    plan: &LocalizationPlan,
    sort_title: &str,
) -> Result<(), SyncError> {
    let (path, mut query) = if plan.collection {
        (
            format!("/library/metadata/{}", plan.rating_key),
            vec![
                ("type".to_string(), COLLECTION_TYPE.to_string()),
                ("id".to_string(), plan.rating_key.clone()),
            ],
        )
    } else {
        (
            format!("/library/sections/{}/all", plan.section_id),
            vec![
                ("type".to_string(), plan.media_type.code().to_string()),
                ("id".to_string(), plan.rating_key.clone()),
                ("includeExternalMedia".to_string(), "1".to_string()),
            ],
        )
    };
    query.push(("titleSort.value".to_string(), sort_title.to_string()));
    query.push(("titleSort.locked".to_string(), "1".to_string()));
    transport.put(&path, &query).await.map_err(write_error)
}

async fn put_tag_edit(
    transport: &dyn Transport,
    plan: &LocalizationPlan,
    edit: &TagEdit,
) -> Result<(), SyncError> {
    let field = edit.taxonomy.field();
    let path = format!("/library/sections/{}/all", plan.section_id);
    let query = [
        ("type".to_string(), plan.media_type.code().to_string()),
        ("id".to_string(), plan.rating_key.clone()),
        (format!("{}.locked", field), "1".to_string()),
        (format!("{}[0].tag.tag", field), edit.new_tag.clone()),
        (format!("{}[].tag.tag-", field), edit.old_tag.clone()),
    ];
    transport.put(&path, &query).await.map_err(write_error)
}

fn write_error(err: TransportError) -> SyncError {
    match err {
        TransportError::Status(status) => SyncError::ApplyRejected {
            status,
            detail: format!("http {}", status),
        },
        other => other.into(),
    }
}
