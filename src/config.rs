//! Configuration management for cinetui
//!
//! Handles config file loading/saving and endpoint/key lookup.
//! Config is stored at ~/.config/cinetui/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::{MetadataClient, StreamClient};
use crate::error::CineError;
use crate::favorites::{FavoritesStore, FileStorage, MemoryStorage};
use crate::player::PlayerType;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Metadata API key
    pub omdb_api_key: Option<String>,
    /// Metadata API base URL (defaults to the public endpoint)
    pub metadata_base_url: Option<String>,
    /// Streaming API base URL
    pub stream_api_base_url: Option<String>,
    /// Local player used for playback
    #[serde(default)]
    pub player: PlayerType,
    /// Open the player fullscreen
    #[serde(default)]
    pub fullscreen: bool,
    /// Where downloads are saved
    pub download_dir: Option<PathBuf>,
}

impl Config {
    /// Get config file path (~/.config/cinetui/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cinetui").join("config.toml"))
    }

    /// Load config from the default location, or defaults if not found
    pub fn load() -> Self {
        Self::path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    /// Load config from a specific file, or defaults if missing/invalid
    pub fn load_from(path: &Path) -> Self {
        let Ok(raw) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        toml::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            Self::default()
        })
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::path().ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Metadata API key: OMDB_API_KEY env var, then the config file
    pub fn omdb_api_key(&self) -> Option<String> {
        env_non_empty("OMDB_API_KEY").or_else(|| self.omdb_api_key.clone())
    }

    /// Streaming API base URL: STREAM_API_BASE_URL env var, then the config file
    pub fn stream_api_base_url(&self) -> Option<String> {
        env_non_empty("STREAM_API_BASE_URL").or_else(|| self.stream_api_base_url.clone())
    }

    /// Download directory, defaulting to the platform download dir
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .unwrap_or_else(crate::download::Downloader::default_dir)
    }

    /// Metadata client; the API key is required
    pub fn metadata_client(&self) -> std::result::Result<MetadataClient, CineError> {
        let key = self
            .omdb_api_key()
            .ok_or_else(|| CineError::NotConfigured("OMDB_API_KEY".into()))?;
        Ok(match &self.metadata_base_url {
            Some(base) => MetadataClient::with_base_url(key, base.as_str()),
            None => MetadataClient::new(key),
        })
    }

    /// Streaming client, if an endpoint is configured
    pub fn stream_client(&self) -> Option<StreamClient> {
        self.stream_api_base_url().map(StreamClient::new)
    }

    /// Favorites persisted under the data dir
    ///
    /// Falls back to an in-memory list when no data dir exists.
    pub fn favorites_store(&self) -> FavoritesStore {
        match FileStorage::default_location() {
            Some(storage) => FavoritesStore::new(storage),
            None => {
                tracing::warn!("no data directory, favorites will not be saved");
                FavoritesStore::new(MemoryStorage::new())
            }
        }
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
