//! CLI Command Handlers
//!
//! Implements all CLI commands by calling the appropriate backend services.
//! Each handler takes CLI args, the loaded config and Output, returns ExitCode.

use crate::cli::{
    DownloadCmd, EpisodeSummary, ExitCode, FavoritesAction, FavoritesCmd, InfoCmd, Output,
    PlayCmd, ResolveCmd, SearchCmd, SeasonSummary, Selection, StreamResponse, StreamsCmd,
    StreamsSummary, ToggleResponse,
};
use crate::config::Config;
use crate::download::Downloader;
use crate::error::{CineError, Result};
use crate::models::{MovieItem, Playback, SearchFilters};
use crate::player::{LocalPlayer, MediaSink, Player};

/// Print data, mapping serialization failures to a general error
fn emit<T: serde::Serialize>(output: &Output, data: T, human: impl FnOnce() -> String) -> ExitCode {
    match output.print_or(data, human) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

fn summary_line(item: &MovieItem) -> String {
    let mut line = format!("{}  {}", item.imdb_id, item);
    if let Some(rating) = item.rating() {
        line.push_str(&format!("  ★ {}", rating));
    }
    if let Some(genre) = item.first_genre() {
        line.push_str(&format!("  {}", genre));
    }
    line
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, config: &Config, output: &Output) -> ExitCode {
    let client = match config.metadata_client() {
        Ok(client) => client,
        Err(e) => return output.fail(&e),
    };

    let filters = SearchFilters {
        media_type: cmd.media_type.map(Into::into),
        year: cmd.year,
        page: cmd.page,
    };
    output.info(format!("Searching for: {}", cmd.query));

    let results = if cmd.brief {
        client.search_brief(&cmd.query, &filters).await
    } else {
        client.search(&cmd.query, &filters).await
    };

    match results {
        Ok(mut items) => {
            items.truncate(cmd.limit);
            emit(output, &items, || {
                items.iter().map(summary_line).collect::<Vec<_>>().join("\n")
            })
        }
        Err(e) => output.fail(&e),
    }
}

// =============================================================================
// Info Command
// =============================================================================

pub async fn info_cmd(cmd: InfoCmd, config: &Config, output: &Output) -> ExitCode {
    let client = match config.metadata_client() {
        Ok(client) => client,
        Err(e) => return output.fail(&e),
    };

    output.info(format!("Getting info for: {}", cmd.imdb_id));
    match client.details(&cmd.imdb_id).await {
        Ok(item) => emit(output, &item, || {
            let mut lines = vec![summary_line(&item)];
            for (label, value) in [
                ("Rated", item.rated.as_deref()),
                ("Runtime", item.runtime()),
                ("Genre", item.genre.as_deref()),
                ("Director", item.director.as_deref()),
                ("Actors", item.actors.as_deref()),
                ("Awards", item.awards()),
                ("Box office", item.box_office()),
                ("Plot", item.plot.as_deref()),
            ] {
                if let Some(value) = value {
                    lines.push(format!("{:<10} {}", label, value));
                }
            }
            lines.join("\n")
        }),
        Err(e) => output.fail(&e),
    }
}

// =============================================================================
// Streams / Resolve Commands
// =============================================================================

fn summarize(playback: Playback) -> StreamsSummary {
    match playback {
        Playback::Movie { options, .. } => StreamsSummary::Movie { options },
        Playback::Series { seasons, .. } => StreamsSummary::Series {
            seasons: seasons
                .iter()
                .map(|season| SeasonSummary {
                    title: season.title.clone(),
                    episodes: season
                        .children()
                        .iter()
                        .map(|episode| EpisodeSummary {
                            title: episode.title.clone(),
                            languages: episode.children().iter().map(|l| l.title.clone()).collect(),
                        })
                        .collect(),
                })
                .collect(),
        },
    }
}

fn describe_summary(summary: &StreamsSummary) -> String {
    match summary {
        StreamsSummary::Movie { options } => options
            .iter()
            .enumerate()
            .map(|(i, o)| format!("{:>2}. {}", i + 1, o.title))
            .collect::<Vec<_>>()
            .join("\n"),
        StreamsSummary::Series { seasons } => seasons
            .iter()
            .enumerate()
            .flat_map(|(s, season)| {
                std::iter::once(format!("{:>2}. {}", s + 1, season.title)).chain(
                    season.episodes.iter().enumerate().map(|(e, episode)| {
                        format!("    {:>2}. {} [{}]", e + 1, episode.title, episode.languages.join(", "))
                    }),
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub async fn streams_cmd(cmd: StreamsCmd, config: &Config, output: &Output) -> ExitCode {
    let Some(client) = config.stream_client() else {
        return output.fail(&CineError::NotConfigured("Streaming API".into()));
    };

    output.info(format!("Fetching streams for: {}", cmd.imdb_id));
    match client.media_info(&cmd.imdb_id).await.and_then(|d| d.classify()) {
        Ok(playback) => {
            let summary = summarize(playback);
            let human = describe_summary(&summary);
            emit(output, &summary, || human)
        }
        Err(e) => output.fail(&e),
    }
}

pub async fn resolve_cmd(cmd: ResolveCmd, config: &Config, output: &Output) -> ExitCode {
    let Some(client) = config.stream_client() else {
        return output.fail(&CineError::NotConfigured("Streaming API".into()));
    };

    match client.resolve_stream(&cmd.file, &cmd.key).await {
        Ok(url) => emit(output, serde_json::json!({ "url": url }), || url.clone()),
        Err(e) => output.fail(&e),
    }
}

// =============================================================================
// Play / Download Commands
// =============================================================================

/// A resolved stream for one title
struct Resolved {
    title: Option<String>,
    url: String,
}

/// Look up title and stream descriptor, pick an entry and resolve it
async fn resolve_selection(config: &Config, imdb_id: &str, selection: Selection) -> Result<Resolved> {
    let streams = config
        .stream_client()
        .ok_or_else(|| CineError::NotConfigured("Streaming API".into()))?;
    let (season, episode, language) = selection
        .indices()
        .ok_or(CineError::NoStreamAvailable)?;

    // The title only names the window and file; a failed lookup is not fatal
    let title = async {
        match config.metadata_client() {
            Ok(client) => client.details(imdb_id).await.ok().map(|item| item.title),
            Err(_) => None,
        }
    };
    let (title, descriptor) = tokio::join!(title, streams.media_info(imdb_id));

    let (file, key) = descriptor?.pick(season, episode, language)?;
    let url = streams.resolve_stream(&file, &key).await?;
    Ok(Resolved { title, url })
}

pub async fn play_cmd(cmd: PlayCmd, config: &Config, output: &Output) -> ExitCode {
    if cmd.selection.indices().is_none() {
        return output.error("Season, episode and language start at 1", ExitCode::InvalidArgs);
    }

    output.info(format!("Resolving stream for: {}", cmd.imdb_id));
    let resolved = match resolve_selection(config, &cmd.imdb_id, cmd.selection).await {
        Ok(resolved) => resolved,
        Err(e) => return output.fail(&e),
    };

    let title = resolved.title.clone().unwrap_or_else(|| cmd.imdb_id.clone());
    let mut player = LocalPlayer::new(config.player);
    player.attach(MediaSink {
        title: title.clone(),
        fullscreen: cmd.fullscreen || config.fullscreen,
    });
    if let Err(e) = player.load(&resolved.url) {
        return output.fail(&e);
    }

    let response = StreamResponse {
        imdb_id: cmd.imdb_id.clone(),
        title: title.clone(),
        url: resolved.url.clone(),
        player: Some(player.player_type().to_string()),
        path: None,
    };
    let code = emit(output, &response, || {
        format!("▶ Playing {} in {}", title, player.player_type())
    });

    if let Err(e) = player.wait().await {
        return output.fail(&e);
    }
    code
}

pub async fn download_cmd(cmd: DownloadCmd, config: &Config, output: &Output) -> ExitCode {
    if cmd.selection.indices().is_none() {
        return output.error("Season, episode and language start at 1", ExitCode::InvalidArgs);
    }

    output.info(format!("Resolving stream for: {}", cmd.imdb_id));
    let resolved = match resolve_selection(config, &cmd.imdb_id, cmd.selection).await {
        Ok(resolved) => resolved,
        Err(e) => return output.fail(&e),
    };

    let downloader = Downloader::new(cmd.output.unwrap_or_else(|| config.download_dir()));
    output.info(format!(
        "Downloading to {}",
        downloader.target_for(resolved.title.as_deref()).display()
    ));

    match downloader.download(&resolved.url, resolved.title.as_deref()).await {
        Ok(path) => {
            let response = StreamResponse {
                imdb_id: cmd.imdb_id.clone(),
                title: resolved.title.unwrap_or_default(),
                url: resolved.url,
                player: None,
                path: Some(path.clone()),
            };
            emit(output, &response, || format!("Saved to {}", path.display()))
        }
        Err(e) => output.fail(&e),
    }
}

// =============================================================================
// Favorites Command
// =============================================================================

pub async fn favorites_cmd(cmd: FavoritesCmd, config: &Config, output: &Output) -> ExitCode {
    let mut store = config.favorites_store();

    match cmd.action {
        FavoritesAction::List => {
            let items = store.list();
            emit(output, &items, || {
                if items.is_empty() {
                    crate::favorites::EMPTY_FAVORITES.to_string()
                } else {
                    items.iter().map(summary_line).collect::<Vec<_>>().join("\n")
                }
            })
        }
        FavoritesAction::Toggle { imdb_id } => {
            // Removal needs no lookup; additions are stored with details
            let item = match store.list().into_iter().find(|f| f.imdb_id == imdb_id) {
                Some(existing) => existing,
                None => {
                    let client = match config.metadata_client() {
                        Ok(client) => client,
                        Err(e) => return output.fail(&e),
                    };
                    match client.details(&imdb_id).await {
                        Ok(item) => item,
                        Err(e) => return output.fail(&e),
                    }
                }
            };

            match store.toggle(&item) {
                Ok(favorite) => {
                    let response = ToggleResponse {
                        imdb_id: item.imdb_id.clone(),
                        favorite,
                    };
                    emit(output, &response, || {
                        if favorite {
                            format!("♥ Added {}", item)
                        } else {
                            format!("Removed {}", item)
                        }
                    })
                }
                Err(e) => output.fail(&e),
            }
        }
    }
}
