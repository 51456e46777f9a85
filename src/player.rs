//! Video player capability
//!
//! Playback is delegated to an external player process (mpv or VLC). The
//! controller owns a single [`Player`] and destroys it before every load.

use serde::{Deserialize, Serialize};
use std::process::Stdio;
use tokio::process::{Child, Command};

use crate::error::{CineError, Result};

/// Supported local players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerType {
    /// mpv media player (default)
    #[default]
    Mpv,
    /// VLC media player
    Vlc,
}

impl PlayerType {
    /// Get the command name for this player
    pub fn command(&self) -> &'static str {
        match self {
            PlayerType::Vlc => {
                // On macOS, VLC is an app bundle
                #[cfg(target_os = "macos")]
                if std::path::Path::new("/Applications/VLC.app").exists() {
                    return "/Applications/VLC.app/Contents/MacOS/VLC";
                }
                "vlc"
            }
            PlayerType::Mpv => "mpv",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PlayerType::Vlc => "VLC",
            PlayerType::Mpv => "mpv",
        }
    }
}

impl std::fmt::Display for PlayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Where loaded media is presented
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaSink {
    /// Window title
    pub title: String,
    pub fullscreen: bool,
}

/// Narrow player capability
pub trait Player: Send {
    /// Point subsequent loads at a presentation surface
    fn attach(&mut self, sink: MediaSink);
    /// Start playing a URL
    fn load(&mut self, url: &str) -> Result<()>;
    /// Stop playback and release the instance
    fn destroy(&mut self);
    fn is_active(&self) -> bool;
}

/// Player backed by a local mpv/VLC process
pub struct LocalPlayer {
    player_type: PlayerType,
    sink: MediaSink,
    child: Option<Child>,
}

impl LocalPlayer {
    pub fn new(player_type: PlayerType) -> Self {
        Self {
            player_type,
            sink: MediaSink::default(),
            child: None,
        }
    }

    pub fn player_type(&self) -> PlayerType {
        self.player_type
    }

    /// Wait for the running player to exit
    pub async fn wait(&mut self) -> Result<()> {
        if let Some(child) = self.child.as_mut() {
            let status = child
                .wait()
                .await
                .map_err(|e| CineError::UnsupportedPlayback(e.to_string()))?;
            tracing::info!(player = %self.player_type, %status, "player exited");
        }
        self.child = None;
        Ok(())
    }

    /// Build the player command line for a URL
    fn command_for(&self, url: &str) -> Command {
        let mut cmd = Command::new(self.player_type.command());
        cmd.arg(url);

        match self.player_type {
            PlayerType::Vlc => {
                cmd.arg("--no-video-title-show");
                if !self.sink.title.is_empty() {
                    cmd.arg("--meta-title").arg(&self.sink.title);
                }
                if self.sink.fullscreen {
                    cmd.arg("--fullscreen");
                }
            }
            PlayerType::Mpv => {
                cmd.arg("--force-window=immediate");
                if !self.sink.title.is_empty() {
                    cmd.arg(format!("--force-media-title={}", self.sink.title));
                }
                if self.sink.fullscreen {
                    cmd.arg("--fs");
                }
            }
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        cmd
    }
}

impl Player for LocalPlayer {
    fn attach(&mut self, sink: MediaSink) {
        self.sink = sink;
    }

    fn load(&mut self, url: &str) -> Result<()> {
        self.destroy();

        let child = self.command_for(url).spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CineError::UnsupportedPlayback(format!(
                    "{} not found, install it first",
                    self.player_type.command()
                ))
            } else {
                CineError::UnsupportedPlayback(e.to_string())
            }
        })?;

        tracing::info!(player = %self.player_type, pid = ?child.id(), "player started");
        self.child = Some(child);
        Ok(())
    }

    fn destroy(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.start_kill() {
                tracing::debug!(error = %e, "player already exited");
            }
        }
    }

    fn is_active(&self) -> bool {
        self.child.is_some()
    }
}

impl Drop for LocalPlayer {
    fn drop(&mut self) {
        self.destroy();
    }
}
