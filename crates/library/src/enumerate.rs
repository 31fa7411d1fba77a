use common::{MediaTypeSelector, SyncError};
use tracing::debug;

use crate::plex::PageContainer;
use crate::transport::{get_container, Transport};

pub const DEFAULT_PAGE_SIZE: usize = 100;

pub fn enumerate<'a>(
    transport: &'a dyn Transport,
    selector: &MediaTypeSelector,
    page_size: usize,
) -> Pages<'a> {
    Pages {
        transport,
        selector: selector.clone(),
        page_size: page_size.max(1),
        next_start: 0,
        done: false,
    }
}

/// Lazy cursor over the rating keys of one selector. Each call fetches one
/// page; restarting means building a new cursor from offset 0.
pub struct Pages<'a> {
    transport: &'a dyn Transport,
    selector: MediaTypeSelector,
    page_size: usize,
    next_start: usize,
    done: bool,
}

impl<'a> Pages<'a> {
    pub fn selector(&self) -> &MediaTypeSelector {
        &self.selector
    }

    pub async fn next_page(&mut self) -> Result<Option<Vec<String>>, SyncError> {
        if self.done {
            return Ok(None);
        }
        let path = if self.selector.is_collection {
            format!("/library/sections/{}/collections", self.selector.section_id)
        } else {
            format!("/library/sections/{}/all", self.selector.section_id)
        };
        let query = [
            ("type".to_string(), self.selector.media_type.code().to_string()),
            ("X-Plex-Container-Start".to_string(), self.next_start.to_string()),
            ("X-Plex-Container-Size".to_string(), self.page_size.to_string()),
        ];
        let page: PageContainer = match get_container(self.transport, &path, &query).await {
            Ok(page) => page,
            Err(err) => {
                self.done = true;
                return Err(err.into());
            }
        };

        let keys: Vec<String> = page
            .metadata
            .into_iter()
            .map(|item| item.rating_key)
            .collect();
        let start = self.next_start;
        let size = page.size.unwrap_or(keys.len());
        let total = page.total_size.unwrap_or(start + size);
        if let Some(offset) = page.offset.filter(|offset| *offset != start) {
            debug!("{}: asked for {} but server reported {}", self.selector, start, offset);
        }
        debug!(
            "{}: page at {} with {} of {} entries",
            self.selector, start, size, total
        );

        // Advance from the requested start so a server that ignores the
        // offset still reaches the end; an empty page ends the listing.
        self.next_start = start + size;
        if size == 0 || self.next_start >= total {
            self.done = true;
        }
        Ok(Some(keys))
    }

    pub async fn collect_keys(mut self) -> Result<Vec<String>, SyncError> {
        let mut keys = Vec::new();
        while let Some(mut page) = self.next_page().await? {
            keys.append(&mut page);
        }
        Ok(keys)
    }
}
