//! cinetui - terminal movie and series browser
//!
//! Search a metadata API, keep a favorites list, and play or download
//! streams resolved through a streaming API.
//!
//! # Modules
//!
//! - `models` - Metadata records, filters, stream descriptors
//! - `api` - Metadata and streaming API clients
//! - `favorites` - Persisted favorites behind a storage port
//! - `player` / `download` - Playback and download capabilities
//! - `app` / `controller` - View state, session state machine, effects
//! - `ui` - ratatui rendering
//! - `cli` / `commands` - Scriptable command surface

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod download;
pub mod error;
pub mod favorites;
pub mod logging;
pub mod models;
pub mod player;
pub mod ui;

// Re-export commonly used types
pub use api::{MetadataClient, StreamClient};
pub use app::{App, AppState};
pub use controller::{Controller, Services};
pub use error::{CineError, Result};
pub use favorites::{FavoritesStore, FileStorage, MemoryStorage, Storage};
pub use models::{MediaType, MovieItem, PlaylistEntry, SearchFilters, StreamDescriptor};
