//! Generator module - writes documents into the site's collection directories

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ContentError, Result};

/// Writes generated documents under the site source directory
#[derive(Debug, Clone)]
pub struct Emitter {
    source_dir: PathBuf,
}

impl Emitter {
    pub fn new<P: AsRef<Path>>(source_dir: P) -> Self {
        Self {
            source_dir: source_dir.as_ref().to_path_buf(),
        }
    }

    /// Absolute path of a collection directory such as `_posts`
    pub fn collection_dir(&self, collection: &str) -> PathBuf {
        self.source_dir.join(collection)
    }

    /// Write a document into a collection, creating the directory if needed
    ///
    /// An existing file with the same name is overwritten.
    pub fn write(&self, collection: &str, filename: &str, document: &str) -> Result<PathBuf> {
        let dir = self.collection_dir(collection);
        fs::create_dir_all(&dir).map_err(|source| ContentError::Io {
            path: dir.clone(),
            source,
        })?;

        let path = dir.join(filename);
        fs::write(&path, document).map_err(|source| ContentError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Wrote {:?}", path);
        Ok(path)
    }
}
