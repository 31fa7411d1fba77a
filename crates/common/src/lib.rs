use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Movie,
    Show,
    Artist,
}

impl SectionKind {
    /// Parses the `type` attribute the server reports for a library section.
    /// Unsupported kinds (photo, etc.) yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "movie" => Some(Self::Movie),
            "show" => Some(Self::Show),
            "artist" => Some(Self::Artist),
            _ => None,
        }
    }

    pub fn media_types(self) -> &'static [MediaType] {
        match self {
            SectionKind::Movie => &[MediaType::Movie],
            SectionKind::Show => &[MediaType::Show],
            SectionKind::Artist => &[MediaType::Artist, MediaType::Album, MediaType::Track],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Movie => "movie",
            SectionKind::Show => "show",
            SectionKind::Artist => "artist",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibrarySection {
    pub id: String,
    pub kind: SectionKind,
    pub title: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Taxonomy {
    Genre,
    Style,
    Mood,
}

impl Taxonomy {
    /// Field name used in the server's edit parameters (`genre.locked`, ...).
    pub fn field(self) -> &'static str {
        match self {
            Taxonomy::Genre => "genre",
            Taxonomy::Style => "style",
            Taxonomy::Mood => "mood",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Show,
    Artist,
    Album,
    Track,
}

impl MediaType {
    pub const ALL: [MediaType; 5] = [
        MediaType::Movie,
        MediaType::Show,
        MediaType::Artist,
        MediaType::Album,
        MediaType::Track,
    ];

    pub fn code(self) -> u8 {
        match self {
            MediaType::Movie => 1,
            MediaType::Show => 2,
            MediaType::Artist => 8,
            MediaType::Album => 9,
            MediaType::Track => 10,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "movie" => Some(Self::Movie),
            "show" => Some(Self::Show),
            "artist" => Some(Self::Artist),
            "album" => Some(Self::Album),
            "track" => Some(Self::Track),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Show => "show",
            MediaType::Artist => "artist",
            MediaType::Album => "album",
            MediaType::Track => "track",
        }
    }

    /// Taxonomies whose tags are translated for this kind of entry.
    pub fn taxonomies(self) -> &'static [Taxonomy] {
        match self {
            MediaType::Movie | MediaType::Show => &[Taxonomy::Genre],
            MediaType::Artist | MediaType::Album => {
                &[Taxonomy::Genre, Taxonomy::Style, Taxonomy::Mood]
            }
            MediaType::Track => &[Taxonomy::Style, Taxonomy::Mood],
        }
    }
}

/// A leaf entry of some media type, or a collection grouping entries of that type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Item(MediaType),
    Collection(MediaType),
}

impl ItemKind {
    pub fn media_type(self) -> MediaType {
        match self {
            ItemKind::Item(kind) | ItemKind::Collection(kind) => kind,
        }
    }

    pub fn is_collection(self) -> bool {
        matches!(self, ItemKind::Collection(_))
    }

    /// Collections carry no taxonomy tags of their own.
    pub fn taxonomies(self) -> &'static [Taxonomy] {
        match self {
            ItemKind::Item(kind) => kind.taxonomies(),
            ItemKind::Collection(_) => &[],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaTypeSelector {
    pub section_id: String,
    pub media_type: MediaType,
    pub is_collection: bool,
}

impl MediaTypeSelector {
    pub fn item_kind(&self) -> ItemKind {
        if self.is_collection {
            ItemKind::Collection(self.media_type)
        } else {
            ItemKind::Item(self.media_type)
        }
    }
}

impl std::fmt::Display for MediaTypeSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "section {} {}", self.section_id, self.media_type.as_str())?;
        if self.is_collection {
            write!(f, " collections")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tags {
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub moods: Vec<String>,
}

impl Tags {
    pub fn get(&self, taxonomy: Taxonomy) -> &[String] {
        match taxonomy {
            Taxonomy::Genre => &self.genres,
            Taxonomy::Style => &self.styles,
            Taxonomy::Mood => &self.moods,
        }
    }

    pub fn get_mut(&mut self, taxonomy: Taxonomy) -> &mut Vec<String> {
        match taxonomy {
            Taxonomy::Genre => &mut self.genres,
            Taxonomy::Style => &mut self.styles,
            Taxonomy::Mood => &mut self.moods,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub rating_key: String,
    pub kind: ItemKind,
    pub title: String,
    #[serde(default)]
    pub sort_title: Option<String>,
    #[serde(default)]
    pub tags: Tags,
    pub section_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEdit {
    pub taxonomy: Taxonomy,
    pub old_tag: String,
    pub new_tag: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizationPlan {
    pub rating_key: String,
    pub title: String,
    pub section_id: String,
    pub media_type: MediaType,
    pub collection: bool,
    pub new_sort_title: Option<String>,
    pub tag_edits: Vec<TagEdit>,
}

impl LocalizationPlan {
    pub fn write_count(&self) -> usize {
        usize::from(self.new_sort_title.is_some()) + self.tag_edits.len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncError {
    UpstreamUnavailable(String),
    ItemNotFound(String),
    ApplyRejected { status: u16, detail: String },
    WorkerAborted(String),
}

impl SyncError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SyncError::ItemNotFound(_))
    }
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::UpstreamUnavailable(detail) => write!(f, "upstream unavailable: {}", detail),
            SyncError::ItemNotFound(key) => write!(f, "item not found: {}", key),
            SyncError::ApplyRejected { status, detail } => {
                write!(f, "write rejected (http {}): {}", status, detail)
            }
            SyncError::WorkerAborted(detail) => write!(f, "worker aborted: {}", detail),
        }
    }
}

impl std::error::Error for SyncError {}
