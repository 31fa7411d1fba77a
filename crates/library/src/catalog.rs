use common::{LibrarySection, MediaTypeSelector, SectionKind, SyncError};
use tracing::debug;

use crate::plex::{IdentityContainer, SectionsContainer};
use crate::transport::{get_container, Transport};

pub async fn server_name(transport: &dyn Transport) -> Result<String, SyncError> {
    let identity: IdentityContainer = get_container(transport, "/", &[]).await?;
    Ok(identity.friendly_name.unwrap_or_default())
}

pub async fn list_sections(transport: &dyn Transport) -> Result<Vec<LibrarySection>, SyncError> {
    let container: SectionsContainer = get_container(transport, "/library/sections", &[]).await?;
    let mut sections = Vec::new();
    for directory in container.directories {
        match SectionKind::parse(&directory.kind) {
            Some(kind) => sections.push(LibrarySection {
                id: directory.key,
                kind,
                title: directory.title,
            }),
            None => debug!(
                "Skipping section {} ({}): unsupported kind {}",
                directory.key, directory.title, directory.kind
            ),
        }
    }
    Ok(sections)
}

/// Every selector a section must be scanned under: one per media type,
/// each once for ordinary entries and once for collections.
pub fn expand_selectors(section: &LibrarySection) -> Vec<MediaTypeSelector> {
    let mut selectors = Vec::new();
    for media_type in section.kind.media_types() {
        for is_collection in [false, true] {
            selectors.push(MediaTypeSelector {
                section_id: section.id.clone(),
                media_type: *media_type,
                is_collection,
            });
        }
    }
    selectors
}

/// Keeps sections whose id or title (case-insensitive) is listed in `wanted`.
/// An empty filter keeps everything.
pub fn filter_sections(sections: Vec<LibrarySection>, wanted: &[String]) -> Vec<LibrarySection> {
    let wanted: Vec<String> = wanted
        .iter()
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
        .collect();
    if wanted.is_empty() {
        return sections;
    }
    sections
        .into_iter()
        .filter(|section| {
            wanted
                .iter()
                .any(|value| *value == section.id || *value == section.title.to_lowercase())
        })
        .collect()
}
