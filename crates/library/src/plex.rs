use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(rename = "MediaContainer")]
    pub container: T,
}

#[derive(Deserialize)]
pub(crate) struct IdentityContainer {
    #[serde(rename = "friendlyName", default)]
    pub friendly_name: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct SectionsContainer {
    #[serde(rename = "Directory", default)]
    pub directories: Vec<Directory>,
}

#[derive(Deserialize)]
pub(crate) struct Directory {
    #[serde(deserialize_with = "id_string")]
    pub key: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Deserialize)]
pub(crate) struct PageContainer {
    #[serde(rename = "totalSize", default)]
    pub total_size: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
    #[serde(default)]
    pub size: Option<usize>,
    #[serde(rename = "Metadata", default)]
    pub metadata: Vec<ListedItem>,
}

#[derive(Deserialize)]
pub(crate) struct ListedItem {
    #[serde(rename = "ratingKey", deserialize_with = "id_string")]
    pub rating_key: String,
}

#[derive(Deserialize)]
pub(crate) struct DetailContainer {
    #[serde(rename = "Metadata", default)]
    pub metadata: Vec<Detail>,
}

#[derive(Deserialize)]
pub(crate) struct Detail {
    #[serde(rename = "ratingKey", default, deserialize_with = "opt_id_string")]
    pub rating_key: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "titleSort", default)]
    pub title_sort: Option<String>,
    #[serde(rename = "Genre", default)]
    pub genres: Vec<TagRef>,
    #[serde(rename = "Style", default)]
    pub styles: Vec<TagRef>,
    #[serde(rename = "Mood", default)]
    pub moods: Vec<TagRef>,
    #[serde(rename = "librarySectionID", default, deserialize_with = "opt_id_string")]
    pub section_id: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct TagRef {
    pub tag: String,
}

// The server is inconsistent about quoting identifiers.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdValue {
    Text(String),
    Number(i64),
}

impl IdValue {
    fn into_string(self) -> String {
        match self {
            IdValue::Text(value) => value,
            IdValue::Number(value) => value.to_string(),
        }
    }
}

fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    IdValue::deserialize(deserializer).map(IdValue::into_string)
}

fn opt_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<IdValue>::deserialize(deserializer)?.map(IdValue::into_string))
}
