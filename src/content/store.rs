//! Content store - loads CMS feeds from the data directory

use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::Entry;
use crate::error::{ContentError, Result};

/// Entries of one content type, keyed by entry id in export order
pub type Feed = IndexMap<String, Entry>;

/// Reads content-type feeds from the fixed export layout
///
/// ```text
/// <data_dir>/entries/<content_type>/<locale>.json
/// <data_dir>/assets/assets.json
/// ```
#[derive(Debug, Clone)]
pub struct ContentStore {
    data_dir: PathBuf,
    locale: String,
}

impl ContentStore {
    /// Create a store rooted at the site's data directory
    pub fn new<P: AsRef<Path>>(data_dir: P, locale: &str) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            locale: locale.to_string(),
        }
    }

    /// Path of the feed file for a content type
    pub fn feed_path(&self, content_type: &str) -> PathBuf {
        if content_type == "assets" {
            self.data_dir.join("assets").join("assets.json")
        } else {
            self.data_dir
                .join("entries")
                .join(content_type)
                .join(format!("{}.json", self.locale))
        }
    }

    /// Load a content type's feed
    ///
    /// Returns `None` when the file is missing, unreadable, or holds an empty
    /// or falsy document. Malformed JSON is an error.
    pub fn load(&self, content_type: &str) -> Result<Option<Feed>> {
        let path = self.feed_path(content_type);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No {} feed at {:?}", content_type, path);
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!("Failed to read {} feed {:?}: {}", content_type, path, e);
                return Ok(None);
            }
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        let value: Value = serde_json::from_str(&content).map_err(|source| ContentError::Json {
            path: path.clone(),
            source,
        })?;

        let feed = into_feed(value, &path)?;
        if let Some(feed) = &feed {
            tracing::debug!("Loaded {} {} entries", feed.len(), content_type);
        }
        Ok(feed)
    }
}

/// Normalize a parsed feed document into an ordered entry map
fn into_feed(value: Value, path: &Path) -> Result<Option<Feed>> {
    let unexpected = || ContentError::UnexpectedFeed {
        path: path.to_path_buf(),
    };

    match value {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Object(map) if map.is_empty() => Ok(None),
        Value::Array(items) if items.is_empty() => Ok(None),

        // A singleton exported as the bare entry
        Value::Object(map) if map.get("uid").is_some_and(Value::is_string) => {
            let entry: Entry = map.into_iter().collect();
            let key = entry.uid().ok_or_else(unexpected)?.to_string();
            Ok(Some(IndexMap::from([(key, entry)])))
        }

        // id -> entry; non-entry values such as export metadata are skipped
        Value::Object(map) => {
            let mut feed = Feed::new();
            for (key, value) in map {
                match Entry::from_value(value) {
                    Some(entry) => insert_unique(&mut feed, key, entry, path),
                    None => tracing::debug!("Ignoring non-entry field {:?} in {:?}", key, path),
                }
            }
            Ok(if feed.is_empty() { None } else { Some(feed) })
        }

        Value::Array(items) => {
            let mut feed = Feed::new();
            for (index, item) in items.into_iter().enumerate() {
                let entry = Entry::from_value(item).ok_or_else(unexpected)?;
                let key = entry
                    .uid()
                    .map(str::to_string)
                    .unwrap_or_else(|| index.to_string());
                insert_unique(&mut feed, key, entry, path);
            }
            Ok(Some(feed))
        }

        _ => Err(unexpected()),
    }
}

/// Insert an entry without replacing one already stored under the same key
///
/// A clashing key gets the entry's position appended, so duplicate UIDs in an
/// export keep every entry.
fn insert_unique(feed: &mut Feed, key: String, entry: Entry, path: &Path) {
    if !feed.contains_key(&key) {
        feed.insert(key, entry);
        return;
    }

    let mut suffix = feed.len();
    let mut unique = format!("{}#{}", key, suffix);
    while feed.contains_key(&unique) {
        suffix += 1;
        unique = format!("{}#{}", key, suffix);
    }
    tracing::warn!(
        "Duplicate entry key {:?} in {:?}, keeping it as {:?}",
        key,
        path,
        unique
    );
    feed.insert(unique, entry);
}

/// Find the entry whose `uid` field matches
pub fn find_by_uid<'a>(feed: &'a Feed, uid: &str) -> Option<&'a Entry> {
    feed.values().find(|entry| entry.uid() == Some(uid))
}
