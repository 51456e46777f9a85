//! Data structures shared across cinetui
//!
//! - **Metadata**: movie/series records as the metadata API returns them
//! - **Streaming**: stream descriptors, playlists and their classification

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CineError, Result};

/// Sentinel the metadata API uses for absent values
pub const NOT_AVAILABLE: &str = "N/A";

// =============================================================================
// Metadata Models
// =============================================================================

/// Media type of a title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Series,
    Episode,
    #[default]
    #[serde(other)]
    Unknown,
}

impl MediaType {
    /// Value used in the metadata API `type` filter
    pub fn as_query(&self) -> Option<&'static str> {
        match self {
            MediaType::Movie => Some("movie"),
            MediaType::Series => Some("series"),
            MediaType::Episode => Some("episode"),
            MediaType::Unknown => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Movie => write!(f, "Movie"),
            MediaType::Series => write!(f, "Series"),
            MediaType::Episode => write!(f, "Episode"),
            MediaType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A movie, series or episode record
///
/// Search results only fill the identity fields; `details` lookups fill the
/// rest. Field names follow the metadata API so persisted favorites stay
/// readable by both.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MovieItem {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Type", default)]
    pub media_type: MediaType,
    #[serde(rename = "Poster", default)]
    pub poster: String,
    #[serde(rename = "Plot", default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(rename = "imdbRating", default, skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Runtime", default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(rename = "Genre", default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(rename = "Director", default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(rename = "Actors", default, skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>,
    #[serde(rename = "Awards", default, skip_serializing_if = "Option::is_none")]
    pub awards: Option<String>,
    #[serde(rename = "BoxOffice", default, skip_serializing_if = "Option::is_none")]
    pub box_office: Option<String>,
    #[serde(rename = "Rated", default, skip_serializing_if = "Option::is_none")]
    pub rated: Option<String>,
}

/// Drop empty values and the "N/A" sentinel
fn available(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty() && *v != NOT_AVAILABLE)
}

impl MovieItem {
    /// Poster URL, if the record has a real one
    pub fn poster_url(&self) -> Option<&str> {
        available(Some(self.poster.as_str()))
    }

    /// Rating, skipping "N/A"
    pub fn rating(&self) -> Option<&str> {
        available(self.imdb_rating.as_deref())
    }

    /// Runtime, skipping "N/A"
    pub fn runtime(&self) -> Option<&str> {
        available(self.runtime.as_deref())
    }

    /// First segment of the comma-separated genre list
    pub fn first_genre(&self) -> Option<&str> {
        available(self.genre.as_deref())
            .and_then(|g| g.split(',').next())
            .map(str::trim)
            .filter(|g| !g.is_empty())
    }

    pub fn awards(&self) -> Option<&str> {
        available(self.awards.as_deref())
    }

    pub fn box_office(&self) -> Option<&str> {
        available(self.box_office.as_deref())
    }

    /// Whether this record already carries detail fields
    ///
    /// A rating field (even "N/A") only comes from a detail lookup.
    pub fn is_detailed(&self) -> bool {
        self.imdb_rating.as_deref().is_some_and(|r| !r.is_empty())
    }
}

impl fmt::Display for MovieItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) [{}]", self.title, self.year, self.media_type)
    }
}

/// Optional filters for a metadata search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub media_type: Option<MediaType>,
    pub year: Option<String>,
    pub page: Option<u32>,
}

impl SearchFilters {
    pub fn media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }

    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Query string suffix (`&type=..&y=..&page=..`), empty values omitted
    pub fn to_query(&self) -> String {
        let mut query = String::new();
        if let Some(kind) = self.media_type.and_then(|t| t.as_query()) {
            query.push_str(&format!("&type={}", urlencoding::encode(kind)));
        }
        if let Some(year) = self.year.as_deref().map(str::trim).filter(|y| !y.is_empty()) {
            query.push_str(&format!("&y={}", urlencoding::encode(year)));
        }
        if let Some(page) = self.page.filter(|p| *p > 0) {
            query.push_str(&format!("&page={}", page));
        }
        query
    }
}

// =============================================================================
// Streaming Models
// =============================================================================

/// One entry of a stream playlist
///
/// Leaves carry a `file`; inner nodes carry a `folder` of further entries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaylistEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<Vec<PlaylistEntry>>,
}

impl PlaylistEntry {
    pub fn leaf(title: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            file: Some(file.into()),
            folder: None,
        }
    }

    pub fn folder(title: impl Into<String>, entries: Vec<PlaylistEntry>) -> Self {
        Self {
            title: title.into(),
            file: None,
            folder: Some(entries),
        }
    }

    /// Nested entries, empty for leaves
    pub fn children(&self) -> &[PlaylistEntry] {
        self.folder.as_deref().unwrap_or_default()
    }

    /// Playable file, if non-empty
    pub fn playable_file(&self) -> Option<&str> {
        self.file.as_deref().filter(|f| !f.is_empty())
    }
}

/// Stream descriptor returned by the streaming API for a title
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StreamDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playlist: Option<Vec<PlaylistEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// A selectable language variant of a movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamOption {
    pub title: String,
    pub file: String,
}

/// How a descriptor should be presented
#[derive(Debug, Clone, PartialEq)]
pub enum Playback {
    /// Season → episode → language selection
    Series {
        seasons: Vec<PlaylistEntry>,
        key: String,
    },
    /// One option per language; the first one auto-plays
    Movie {
        options: Vec<StreamOption>,
        key: String,
    },
}

impl StreamDescriptor {
    /// True when any playlist entry carries a folder array
    ///
    /// Lenient on purpose: mixed flat and nested entries still count.
    pub fn is_series(&self) -> bool {
        self.playlist
            .as_ref()
            .is_some_and(|pl| pl.iter().any(|entry| entry.folder.is_some()))
    }

    /// Classify the descriptor into a series or movie playback
    pub fn classify(&self) -> Result<Playback> {
        let key = self.key.as_deref().filter(|k| !k.is_empty());

        if let (true, Some(seasons), Some(key)) = (self.is_series(), &self.playlist, key) {
            return Ok(Playback::Series {
                seasons: seasons.clone(),
                key: key.to_string(),
            });
        }

        let options: Vec<StreamOption> = match &self.playlist {
            Some(playlist) => playlist
                .iter()
                .map(|entry| StreamOption {
                    title: entry.title.clone(),
                    file: entry.file.clone().unwrap_or_default(),
                })
                .collect(),
            None => vec![StreamOption {
                title: "Default".to_string(),
                file: self.link.clone().unwrap_or_default(),
            }],
        };

        let playable = options.first().is_some_and(|o| !o.file.is_empty());
        match key {
            Some(key) if playable => Ok(Playback::Movie {
                options,
                key: key.to_string(),
            }),
            _ => Err(CineError::NoStreamAvailable),
        }
    }

    /// Pick a playable file by zero-based indices
    ///
    /// Movies use `language` only; series use all three.
    pub fn pick(&self, season: usize, episode: usize, language: usize) -> Result<(String, String)> {
        match self.classify()? {
            Playback::Movie { options, key } => options
                .get(language)
                .filter(|o| !o.file.is_empty())
                .map(|o| (o.file.clone(), key))
                .ok_or(CineError::NoStreamAvailable),
            Playback::Series { seasons, key } => seasons
                .get(season)
                .and_then(|s| s.children().get(episode))
                .and_then(|e| e.children().get(language))
                .and_then(|l| l.playable_file())
                .map(|file| (file.to_string(), key))
                .ok_or(CineError::NoStreamAvailable),
        }
    }
}
