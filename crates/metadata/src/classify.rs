use common::{LocalizationPlan, MediaItem, TagEdit};

use crate::sort_key::{is_localized_sort_title, sort_key};
use crate::tags::TagMap;

/// Computes the writes needed to localize `item`. `None` means the item is
/// already localized and must not be touched.
pub fn classify(item: &MediaItem, tags: &TagMap) -> Option<LocalizationPlan> {
    let new_sort_title = if is_localized_sort_title(item.sort_title.as_deref()) {
        None
    } else {
        Some(sort_key(&item.title)).filter(|key| !key.is_empty())
    };

    let mut tag_edits = Vec::new();
    for taxonomy in item.kind.taxonomies() {
        for tag in item.tags.get(*taxonomy) {
            if let Some(localized) = tags.translate(tag) {
                tag_edits.push(TagEdit {
                    taxonomy: *taxonomy,
                    old_tag: tag.clone(),
                    new_tag: localized.to_string(),
                });
            }
        }
    }

    if new_sort_title.is_none() && tag_edits.is_empty() {
        return None;
    }

    Some(LocalizationPlan {
        rating_key: item.rating_key.clone(),
        title: item.title.clone(),
        section_id: item.section_id.clone(),
        media_type: item.kind.media_type(),
        collection: item.kind.is_collection(),
        new_sort_title,
        tag_edits,
    })
}
