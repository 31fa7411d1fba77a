mod classify;
mod sort_key;
mod tags;

pub use classify::classify;
pub use sort_key::{contains_han, is_localized_sort_title, normalize_punctuation, sort_key};
pub use tags::TagMap;
