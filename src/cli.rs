//! CLI - Command Line Interface for cinetui
//!
//! Every TUI action is scriptable. Output is JSON when `--json` is given or
//! stdout is not a terminal.
//!
//! # Examples
//!
//! ```bash
//! # Search with filters
//! cinetui search "the matrix" --type movie --year 1999
//!
//! # Inspect and play streams
//! cinetui streams tt0133093
//! cinetui play tt0903747 -s 1 -e 2 -l 1
//!
//! # Favorites
//! cinetui favorites toggle tt0133093
//! cinetui favorites list --json
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::error::CineError;
use crate::models::MediaType;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    /// General error
    Error = 1,
    InvalidArgs = 2,
    NetworkError = 3,
    /// Metadata API had no result
    NotFound = 4,
    /// No playable stream
    NoStream = 5,
    /// Local player could not start
    PlaybackFailed = 6,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

impl From<&CineError> for ExitCode {
    fn from(error: &CineError) -> Self {
        match error {
            CineError::NotFound(_) => ExitCode::NotFound,
            CineError::NoStreamAvailable => ExitCode::NoStream,
            CineError::Network(_) => ExitCode::NetworkError,
            CineError::UnsupportedPlayback(_) => ExitCode::PlaybackFailed,
            CineError::NotConfigured(_) => ExitCode::InvalidArgs,
            CineError::InvalidResponse(_) | CineError::Storage(_) => ExitCode::Error,
        }
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// cinetui - terminal movie and series browser
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "cinetui",
    version,
    about = "Browse, favorite and stream movies and series from the terminal",
    long_about = "Search movie and series metadata, keep a favorites list, \
                  and play or download streams with a local player.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  cinetui                              Launch interactive TUI\n\
                  cinetui search \"inception\"           Search for titles\n\
                  cinetui play tt1375666               Play the first language\n\
                  cinetui favorites list --json        List favorites"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for movies and series
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Get details for a title
    #[command(visible_alias = "i")]
    Info(InfoCmd),

    /// Show the stream options for a title
    #[command(visible_alias = "st")]
    Streams(StreamsCmd),

    /// Resolve a playlist file into a playable URL
    Resolve(ResolveCmd),

    /// Play a title in the local player
    #[command(visible_alias = "p")]
    Play(PlayCmd),

    /// Download a title's stream to disk
    #[command(visible_alias = "dl")]
    Download(DownloadCmd),

    /// List or toggle favorites
    #[command(visible_alias = "fav")]
    Favorites(FavoritesCmd),
}

// =============================================================================
// Search Command
// =============================================================================

/// Search for titles by query
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query (title, keywords)
    #[arg(required = true)]
    pub query: String,

    /// Filter by media type
    #[arg(long = "type", short = 't', value_enum)]
    pub media_type: Option<MediaTypeFilter>,

    /// Release year
    #[arg(long, short = 'y')]
    pub year: Option<String>,

    /// Result page (10 per page)
    #[arg(long, short = 'p')]
    pub page: Option<u32>,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "10")]
    pub limit: usize,

    /// Skip the per-result detail lookups
    #[arg(long)]
    pub brief: bool,
}

/// Media type filter for search
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaTypeFilter {
    Movie,
    Series,
    Episode,
}

impl From<MediaTypeFilter> for MediaType {
    fn from(filter: MediaTypeFilter) -> Self {
        match filter {
            MediaTypeFilter::Movie => MediaType::Movie,
            MediaTypeFilter::Series => MediaType::Series,
            MediaTypeFilter::Episode => MediaType::Episode,
        }
    }
}

// =============================================================================
// Info / Streams / Resolve Commands
// =============================================================================

/// Get detailed information about a title
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// IMDB ID (e.g., tt1375666)
    #[arg(required = true)]
    pub imdb_id: String,
}

/// Show how a title can be streamed
#[derive(Args, Debug)]
pub struct StreamsCmd {
    /// IMDB ID (e.g., tt1375666)
    #[arg(required = true)]
    pub imdb_id: String,
}

/// Resolve a playlist file with its key
#[derive(Args, Debug)]
pub struct ResolveCmd {
    /// Playlist file reference
    #[arg(required = true)]
    pub file: String,

    /// Key from the stream descriptor
    #[arg(long, short = 'k', required = true)]
    pub key: String,
}

// =============================================================================
// Play / Download Commands
// =============================================================================

/// Which playlist entry to use (1-based)
#[derive(Args, Debug, Clone, Copy)]
pub struct Selection {
    /// Season number (series only)
    #[arg(long, short = 's', default_value = "1")]
    pub season: usize,

    /// Episode number (series only)
    #[arg(long, short = 'e', default_value = "1")]
    pub episode: usize,

    /// Language option number
    #[arg(long, short = 'l', default_value = "1")]
    pub language: usize,
}

impl Selection {
    /// Zero-based (season, episode, language), `None` if any is 0
    pub fn indices(&self) -> Option<(usize, usize, usize)> {
        Some((
            self.season.checked_sub(1)?,
            self.episode.checked_sub(1)?,
            self.language.checked_sub(1)?,
        ))
    }
}

/// Resolve a stream and open it in the local player
#[derive(Args, Debug)]
pub struct PlayCmd {
    /// IMDB ID (e.g., tt1375666)
    #[arg(required = true)]
    pub imdb_id: String,

    #[command(flatten)]
    pub selection: Selection,

    /// Open the player fullscreen
    #[arg(long, short = 'f')]
    pub fullscreen: bool,
}

/// Resolve a stream and save it as `<title>.mp4`
#[derive(Args, Debug)]
pub struct DownloadCmd {
    /// IMDB ID (e.g., tt1375666)
    #[arg(required = true)]
    pub imdb_id: String,

    #[command(flatten)]
    pub selection: Selection,

    /// Output directory (defaults to the configured download dir)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

// =============================================================================
// Favorites Command
// =============================================================================

#[derive(Args, Debug)]
pub struct FavoritesCmd {
    #[command(subcommand)]
    pub action: FavoritesAction,
}

#[derive(Subcommand, Debug)]
pub enum FavoritesAction {
    /// List saved favorites
    #[command(visible_alias = "ls")]
    List,

    /// Add a title, or remove it if already saved
    Toggle {
        /// IMDB ID (e.g., tt1375666)
        imdb_id: String,
    },
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Stream summary for `streams`
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StreamsSummary {
    Movie {
        options: Vec<crate::models::StreamOption>,
    },
    Series {
        seasons: Vec<SeasonSummary>,
    },
}

#[derive(Debug, Serialize)]
pub struct SeasonSummary {
    pub title: String,
    pub episodes: Vec<EpisodeSummary>,
}

#[derive(Debug, Serialize)]
pub struct EpisodeSummary {
    pub title: String,
    pub languages: Vec<String>,
}

/// Result of `play` / `download`
#[derive(Debug, Serialize)]
pub struct StreamResponse {
    pub imdb_id: String,
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Result of `favorites toggle`
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub imdb_id: String,
    pub favorite: bool,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for CLI commands
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print a human line, or the data as JSON
    pub fn print_or<T: Serialize>(&self, data: T, human: impl FnOnce() -> String) -> anyhow::Result<()> {
        if self.json {
            self.print(data)
        } else {
            println!("{}", human());
            Ok(())
        }
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Report a library error with its semantic exit code
    pub fn fail(&self, error: &CineError) -> ExitCode {
        self.error(error.to_string(), ExitCode::from(error))
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// IMDB ID Validation
// =============================================================================

/// Validate IMDB ID format (tt followed by digits)
pub fn validate_imdb_id(id: &str) -> Result<&str, &'static str> {
    if id.starts_with("tt") && id.len() >= 9 && id[2..].chars().all(|c| c.is_ascii_digit()) {
        Ok(id)
    } else {
        Err("Invalid IMDB ID format (expected tt followed by 7+ digits)")
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from(["cinetui"]);
        assert!(!cli.is_cli_mode());
    }

    #[test]
    fn test_search_with_filters() {
        let cli = Cli::parse_from([
            "cinetui", "search", "matrix", "-t", "movie", "-y", "1999", "-p", "2", "--brief",
        ]);
        match cli.command {
            Some(Command::Search(cmd)) => {
                assert_eq!(cmd.query, "matrix");
                assert_eq!(cmd.media_type, Some(MediaTypeFilter::Movie));
                assert_eq!(cmd.year.as_deref(), Some("1999"));
                assert_eq!(cmd.page, Some(2));
                assert!(cmd.brief);
                assert_eq!(cmd.limit, 10);
            }
            other => panic!("Expected Search command, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "cinetui", "--json", "--quiet", "-vv", "--config", "/tmp/c.toml", "info", "tt1375666",
        ]);
        assert!(cli.json);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn test_play_selection_defaults_and_indices() {
        let cli = Cli::parse_from(["cinetui", "play", "tt0903747", "-s", "2", "-e", "3"]);
        match cli.command {
            Some(Command::Play(cmd)) => {
                assert_eq!(cmd.selection.indices(), Some((1, 2, 0)));
                assert!(!cmd.fullscreen);
            }
            other => panic!("Expected Play command, got {:?}", other),
        }

        let zero = Selection {
            season: 0,
            episode: 1,
            language: 1,
        };
        assert_eq!(zero.indices(), None);
    }

    #[test]
    fn test_resolve_requires_key() {
        assert!(Cli::try_parse_from(["cinetui", "resolve", "file-ref"]).is_err());
        let cli = Cli::parse_from(["cinetui", "resolve", "file-ref", "--key", "abc"]);
        assert!(matches!(cli.command, Some(Command::Resolve(ResolveCmd { ref key, .. })) if key == "abc"));
    }

    #[test]
    fn test_favorites_subcommands() {
        let cli = Cli::parse_from(["cinetui", "favorites", "toggle", "tt1375666"]);
        match cli.command {
            Some(Command::Favorites(FavoritesCmd {
                action: FavoritesAction::Toggle { imdb_id },
            })) => assert_eq!(imdb_id, "tt1375666"),
            other => panic!("Expected favorites toggle, got {:?}", other),
        }
        let cli = Cli::parse_from(["cinetui", "fav", "ls"]);
        assert!(matches!(
            cli.command,
            Some(Command::Favorites(FavoritesCmd {
                action: FavoritesAction::List
            }))
        ));
    }

    #[test]
    fn test_validate_imdb_id() {
        assert!(validate_imdb_id("tt1375666").is_ok());
        assert!(validate_imdb_id("tt12345678").is_ok());
        assert!(validate_imdb_id("1375666").is_err());
        assert!(validate_imdb_id("tt123").is_err());
        assert!(validate_imdb_id("ttabcdefg").is_err());
    }

    #[test]
    fn test_exit_codes_from_errors() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(
            ExitCode::from(&CineError::NotFound("Movie not found!".into())),
            ExitCode::NotFound
        );
        assert_eq!(ExitCode::from(&CineError::NoStreamAvailable), ExitCode::NoStream);
        assert_eq!(
            ExitCode::from(&CineError::UnsupportedPlayback("mpv".into())),
            ExitCode::PlaybackFailed
        );
        assert_eq!(i32::from(ExitCode::PlaybackFailed), 6);
    }
}
