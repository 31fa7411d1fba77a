use common::{ItemKind, MediaItem, MediaType, MediaTypeSelector, SyncError, Tags};

use crate::plex::{DetailContainer, TagRef};
use crate::transport::{get_container, Transport, TransportError};

pub async fn fetch_item(
    transport: &dyn Transport,
    selector: &MediaTypeSelector,
    rating_key: &str,
) -> Result<MediaItem, SyncError> {
    let path = format!("/library/metadata/{}", rating_key);
    let container: DetailContainer = match get_container(transport, &path, &[]).await {
        Ok(container) => container,
        Err(TransportError::Status(404)) => {
            return Err(SyncError::ItemNotFound(rating_key.to_string()))
        }
        Err(err) => return Err(err.into()),
    };
    let detail = container
        .metadata
        .into_iter()
        .next()
        .ok_or_else(|| SyncError::ItemNotFound(rating_key.to_string()))?;

    let kind = if selector.is_collection || detail.kind.eq_ignore_ascii_case("collection") {
        ItemKind::Collection(selector.media_type)
    } else {
        ItemKind::Item(MediaType::parse(&detail.kind).unwrap_or(selector.media_type))
    };

    Ok(MediaItem {
        rating_key: detail.rating_key.unwrap_or_else(|| rating_key.to_string()),
        kind,
        title: detail.title,
        sort_title: detail.title_sort,
        tags: Tags {
            genres: tag_names(detail.genres),
            styles: tag_names(detail.styles),
            moods: tag_names(detail.moods),
        },
        section_id: detail
            .section_id
            .unwrap_or_else(|| selector.section_id.clone()),
    })
}

fn tag_names(tags: Vec<TagRef>) -> Vec<String> {
    tags.into_iter().map(|tag| tag.tag).collect()
}
