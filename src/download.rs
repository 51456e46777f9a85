//! Saves a resolved stream URL to disk
//!
//! The remote file is written as-is; no transcoding or segment assembly.

use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::error::{CineError, Result};

/// Downloads streams into a directory
#[derive(Debug, Clone)]
pub struct Downloader {
    dir: PathBuf,
    client: reqwest::Client,
}

impl Downloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Platform download dir, falling back to the current directory
    pub fn default_dir() -> PathBuf {
        dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Target path for a title (`<title>.mp4`)
    pub fn target_for(&self, title: Option<&str>) -> PathBuf {
        self.dir.join(format!("{}.mp4", file_stem(title)))
    }

    /// Stream `url` into `<dir>/<title>.mp4`, returning the path written
    pub async fn download(&self, url: &str, title: Option<&str>) -> Result<PathBuf> {
        let target = self.target_for(title);
        tracing::info!(%url, path = %target.display(), "download started");

        let mut response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CineError::InvalidResponse(format!("HTTP {}", status.as_u16())));
        }

        tokio::fs::create_dir_all(&self.dir).await?;
        let mut file = tokio::fs::File::create(&target).await?;
        let mut written: u64 = 0;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::info!(path = %target.display(), bytes = written, "download finished");
        Ok(target)
    }
}

/// File-system safe name for a title, `movie` when absent
fn file_stem(title: Option<&str>) -> String {
    let cleaned: String = title
        .unwrap_or_default()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim().trim_matches('.');
    if cleaned.is_empty() {
        "movie".to_string()
    } else {
        cleaned.to_string()
    }
}
