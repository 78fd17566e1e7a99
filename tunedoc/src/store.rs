//! File-backed guide store
//!
//! One JSON document per guide under the store directory. Writes are
//! full replaces of the whole document; there is no partial update path.
//! Absence is a distinct outcome (`Ok(None)`), never an error.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::guide::Guide;

/// Directory-backed guide collection
#[derive(Debug)]
pub struct GuideStore {
    root: PathBuf,
}

impl GuideStore {
    /// Open a store, creating its directory if needed
    pub fn open<P: Into<PathBuf>>(root: P) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    /// Location of the store directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn guide_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    /// Persist a guide, replacing any existing document at its id
    pub fn save(&self, guide: &Guide) -> Result<(), StoreError> {
        let path = self.guide_path(&guide.id);
        let json = serde_json::to_string_pretty(guide).map_err(|source| StoreError::Encode {
            id: guide.id.clone(),
            source,
        })?;

        fs::write(&path, json).map_err(|source| StoreError::Io { path, source })?;
        Ok(())
    }

    /// Fetch a guide by id; an absent id is `Ok(None)`, not an error
    pub fn load(&self, id: &str) -> Result<Option<Guide>, StoreError> {
        let path = self.guide_path(id);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let guide =
            serde_json::from_str(&content).map_err(|source| StoreError::Decode { path, source })?;
        Ok(Some(guide))
    }

    /// Fetch every stored guide, ordered by id
    pub fn list(&self) -> Result<Vec<Guide>, StoreError> {
        let entries = fs::read_dir(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;

        let mut guides = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: self.root.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            let guide = serde_json::from_str(&content)
                .map_err(|source| StoreError::Decode { path, source })?;
            guides.push(guide);
        }

        guides.sort_by(|a: &Guide, b: &Guide| a.id.cmp(&b.id));
        Ok(guides)
    }
}

/// Errors that can occur accessing the guide store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store IO error at {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode guide `{id}`: {source}")]
    Encode {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode {path}: {source}", path = .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
