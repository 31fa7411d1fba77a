mod apply;
mod catalog;
mod enumerate;
mod fetch;
mod plex;
mod transport;
#[cfg(test)]
mod testing;

pub use apply::{apply_plan, ApplyOutcome};
pub use catalog::{expand_selectors, filter_sections, list_sections, server_name};
pub use enumerate::{enumerate, Pages, DEFAULT_PAGE_SIZE};
pub use fetch::fetch_item;
pub use transport::{PlexClient, Query, Transport, TransportError};
