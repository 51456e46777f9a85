//! Favorites persisted through a key-value storage port
//!
//! The whole list lives under one key as a JSON array. Every mutation reads
//! the list, changes it, and rewrites it wholesale.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use futures::future::try_join_all;

use crate::api::MetadataClient;
use crate::error::{CineError, Result};
use crate::models::MovieItem;

/// Storage key holding the favorites list
pub const FAVORITES_KEY: &str = "favorites-movies";

/// Message shown when there are no favorites
pub const EMPTY_FAVORITES: &str = "No favorites yet. Press f on a card to save!";

/// Key-value persistence port
pub trait Storage: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage under the platform data dir (~/.local/share/cinetui)
    pub fn default_location() -> Option<Self> {
        dirs::data_dir().map(|p| Self::new(p.join("cinetui")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    /// Write to a sibling temp file and rename over the target
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// In-memory storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Favorites list backed by a [`Storage`]
pub struct FavoritesStore {
    storage: Box<dyn Storage>,
}

impl FavoritesStore {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    /// Current list, newest first; empty when absent or unreadable
    pub fn list(&self) -> Vec<MovieItem> {
        let Some(raw) = self.storage.get(FAVORITES_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring corrupt favorites");
            Vec::new()
        })
    }

    pub fn is_favorite(&self, imdb_id: &str) -> bool {
        self.list().iter().any(|fav| fav.imdb_id == imdb_id)
    }

    /// Remove the item if present, otherwise prepend it
    ///
    /// Returns whether the item is a favorite afterwards. On a failed write
    /// the persisted list is unchanged.
    pub fn toggle(&mut self, item: &MovieItem) -> Result<bool> {
        let mut favs = self.list();
        let before = favs.len();
        favs.retain(|fav| fav.imdb_id != item.imdb_id);

        let now_favorite = favs.len() == before;
        if now_favorite {
            favs.insert(0, item.clone());
        }

        let json = serde_json::to_string(&favs)
            .map_err(|e| CineError::Storage(format!("serialize favorites: {}", e)))?;
        self.storage.set(FAVORITES_KEY, &json)?;

        tracing::info!(imdb_id = %item.imdb_id, favorite = now_favorite, "favorite toggled");
        Ok(now_favorite)
    }
}

/// Fill in details for favorites saved from brief records
///
/// Entries that already carry a rating are used as they are; the rest are
/// looked up concurrently. Order is preserved.
pub async fn enrich_favorites(
    client: &MetadataClient,
    favorites: Vec<MovieItem>,
) -> Result<Vec<MovieItem>> {
    let lookups = favorites.into_iter().map(|item| async move {
        if item.is_detailed() {
            Ok(item)
        } else {
            client.details(&item.imdb_id).await
        }
    });
    try_join_all(lookups).await
}
