#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use common::{MediaType, MediaTypeSelector};
use library::{Query, Transport, TransportError};
use parking_lot::Mutex;
use serde_json::{json, Value};

#[derive(Clone, Debug)]
pub struct FakeEntry {
    pub rating_key: String,
    pub section_id: String,
    pub media_type: MediaType,
    pub collection: bool,
    pub title: String,
    pub title_sort: Option<String>,
    pub genres: Vec<String>,
    pub styles: Vec<String>,
    pub moods: Vec<String>,
    pub locked: HashSet<String>,
}

impl FakeEntry {
    pub fn movie(rating_key: &str, title: &str, title_sort: Option<&str>, genres: &[&str]) -> Self {
        Self {
            rating_key: rating_key.to_string(),
            section_id: "1".to_string(),
            media_type: MediaType::Movie,
            collection: false,
            title: title.to_string(),
            title_sort: title_sort.map(str::to_string),
            genres: genres.iter().map(|tag| tag.to_string()).collect(),
            styles: Vec::new(),
            moods: Vec::new(),
            locked: HashSet::new(),
        }
    }

    pub fn in_section(mut self, section_id: &str, media_type: MediaType) -> Self {
        self.section_id = section_id.to_string();
        self.media_type = media_type;
        self
    }

    pub fn as_collection(mut self) -> Self {
        self.collection = true;
        self
    }

    pub fn with_styles(mut self, styles: &[&str]) -> Self {
        self.styles = styles.iter().map(|tag| tag.to_string()).collect();
        self
    }

    pub fn with_moods(mut self, moods: &[&str]) -> Self {
        self.moods = moods.iter().map(|tag| tag.to_string()).collect();
        self
    }

    fn tags_mut(&mut self, field: &str) -> Option<&mut Vec<String>> {
        match field {
            "genre" => Some(&mut self.genres),
            "style" => Some(&mut self.styles),
            "mood" => Some(&mut self.moods),
            _ => None,
        }
    }

    fn detail(&self) -> Value {
        let tags = |values: &[String]| -> Vec<Value> {
            values.iter().map(|tag| json!({ "tag": tag })).collect()
        };
        let kind = if self.collection {
            "collection"
        } else {
            self.media_type.as_str()
        };
        let mut detail = json!({
            "ratingKey": self.rating_key,
            "type": kind,
            "title": self.title,
            "librarySectionID": self.section_id.parse::<i64>().unwrap_or_default(),
            "Genre": tags(&self.genres),
            "Style": tags(&self.styles),
            "Mood": tags(&self.moods),
        });
        if let Some(title_sort) = &self.title_sort {
            detail["titleSort"] = json!(title_sort);
        }
        detail
    }
}

/// In-memory media server that honours the listing, detail and edit
/// endpoints the sync core talks to.
#[derive(Default)]
pub struct FakePlex {
    pub sections: Vec<(String, String, String)>,
    pub entries: Mutex<BTreeMap<String, FakeEntry>>,
    pub puts: Mutex<Vec<(String, Vec<(String, String)>)>>,
    pub detail_gets: Mutex<Vec<String>>,
    pub reject_writes: HashSet<String>,
    pub failing_details: HashSet<String>,
    pub vanished: HashSet<String>,
    pub panicking: HashSet<String>,
    pub listing_down: bool,
    pub latency: Option<Duration>,
}

impl FakePlex {
    pub fn new(entries: Vec<FakeEntry>) -> Self {
        Self {
            sections: vec![("1".to_string(), "movie".to_string(), "Movies".to_string())],
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|entry| (entry.rating_key.clone(), entry))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    pub fn entry(&self, rating_key: &str) -> FakeEntry {
        self.entries.lock().get(rating_key).cloned().unwrap()
    }

    pub fn put_count(&self) -> usize {
        self.puts.lock().len()
    }

    fn listing(&self, section_id: &str, collections: bool, query: &Query) -> Value {
        let type_code: u8 = param(query, "type").and_then(|v| v.parse().ok()).unwrap_or(0);
        let start: usize = param(query, "X-Plex-Container-Start")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let size: usize = param(query, "X-Plex-Container-Size")
            .and_then(|v| v.parse().ok())
            .unwrap_or(50);
        let keys: Vec<String> = self
            .entries
            .lock()
            .values()
            .filter(|entry| {
                entry.section_id == section_id
                    && entry.collection == collections
                    && entry.media_type.code() == type_code
            })
            .map(|entry| entry.rating_key.clone())
            .collect();
        let page: Vec<Value> = keys
            .iter()
            .skip(start)
            .take(size)
            .map(|key| json!({ "ratingKey": key }))
            .collect();
        json!({
            "MediaContainer": {
                "totalSize": keys.len(),
                "offset": start,
                "size": page.len(),
                "Metadata": page,
            }
        })
    }

    fn apply_edit(&self, query: &Query) -> Result<(), TransportError> {
        let id = param(query, "id").ok_or(TransportError::Status(400))?;
        if self.reject_writes.contains(id) {
            return Err(TransportError::Status(400));
        }
        let mut entries = self.entries.lock();
        let entry = entries.get_mut(id).ok_or(TransportError::Status(404))?;
        if let Some(title_sort) = param(query, "titleSort.value") {
            entry.title_sort = Some(title_sort.to_string());
        }
        for field in ["genre", "style", "mood"] {
            if param(query, &format!("{}.locked", field)) == Some("1") {
                entry.locked.insert(field.to_string());
            }
            let added = param(query, &format!("{}[0].tag.tag", field)).map(str::to_string);
            let removed = param(query, &format!("{}[].tag.tag-", field)).map(str::to_string);
            if let Some(tags) = entry.tags_mut(field) {
                if let Some(removed) = removed {
                    tags.retain(|tag| *tag != removed);
                }
                if let Some(added) = added {
                    if !tags.contains(&added) {
                        tags.push(added);
                    }
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for FakePlex {
    async fn get(&self, path: &str, query: &Query) -> Result<Value, TransportError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if path == "/" {
            return Ok(json!({ "MediaContainer": { "friendlyName": "fake" } }));
        }
        if path == "/library/sections" {
            if self.listing_down {
                return Err(TransportError::Status(503));
            }
            let directories: Vec<Value> = self
                .sections
                .iter()
                .map(|(key, kind, title)| json!({ "key": key, "type": kind, "title": title }))
                .collect();
            return Ok(json!({ "MediaContainer": { "Directory": directories } }));
        }
        if let Some(rest) = path.strip_prefix("/library/sections/") {
            if self.listing_down {
                return Err(TransportError::Unreachable("connection refused".to_string()));
            }
            if let Some(section_id) = rest.strip_suffix("/all") {
                return Ok(self.listing(section_id, false, query));
            }
            if let Some(section_id) = rest.strip_suffix("/collections") {
                return Ok(self.listing(section_id, true, query));
            }
        }
        if let Some(rating_key) = path.strip_prefix("/library/metadata/") {
            self.detail_gets.lock().push(rating_key.to_string());
            if self.panicking.contains(rating_key) {
                panic!("detail handler crashed for {}", rating_key);
            }
            if self.failing_details.contains(rating_key) {
                return Err(TransportError::Status(500));
            }
            if self.vanished.contains(rating_key) {
                return Err(TransportError::Status(404));
            }
            return match self.entries.lock().get(rating_key) {
                Some(entry) => Ok(json!({ "MediaContainer": { "Metadata": [entry.detail()] } })),
                None => Err(TransportError::Status(404)),
            };
        }
        Err(TransportError::Status(404))
    }

    async fn put(&self, path: &str, query: &Query) -> Result<(), TransportError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.puts.lock().push((path.to_string(), query.to_vec()));
        self.apply_edit(query)
    }
}

pub fn param<'a>(query: &'a Query, key: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

pub fn movie_selectors() -> Vec<MediaTypeSelector> {
    vec![
        MediaTypeSelector {
            section_id: "1".to_string(),
            media_type: MediaType::Movie,
            is_collection: false,
        },
        MediaTypeSelector {
            section_id: "1".to_string(),
            media_type: MediaType::Movie,
            is_collection: true,
        },
    ]
}
