//! Presentation controller
//!
//! Owns the [`App`], the favorites store and the single player instance.
//! Synchronous effects (favorites, playback) run here; network work is
//! returned as [`Action`]s for the caller to spawn, and its results come
//! back through [`Controller::apply`].

use std::collections::VecDeque;
use std::sync::Arc;

use crossterm::event::KeyEvent;

use crate::api::{MetadataClient, StreamClient};
use crate::app::{Action, App, Effect, Msg};
use crate::download::Downloader;
use crate::error::{CineError, Result};
use crate::favorites::{enrich_favorites, FavoritesStore};
use crate::player::{MediaSink, Player};

// =============================================================================
// Services
// =============================================================================

/// Network-facing capabilities, cheap to clone into spawned tasks
#[derive(Clone)]
pub struct Services {
    pub metadata: Arc<MetadataClient>,
    /// Streaming API, absent when no endpoint is configured
    pub streams: Option<Arc<StreamClient>>,
    /// Download capability, absent when disabled
    pub downloader: Option<Arc<Downloader>>,
}

impl Services {
    pub fn new(metadata: MetadataClient) -> Self {
        Self {
            metadata: Arc::new(metadata),
            streams: None,
            downloader: None,
        }
    }

    pub fn with_streams(mut self, streams: StreamClient) -> Self {
        self.streams = Some(Arc::new(streams));
        self
    }

    pub fn with_downloader(mut self, downloader: Downloader) -> Self {
        self.downloader = Some(Arc::new(downloader));
        self
    }

    fn streams(&self) -> Result<&StreamClient> {
        self.streams
            .as_deref()
            .ok_or_else(|| CineError::NotConfigured("Streaming API".into()))
    }

    /// Carry out one action, turning errors into display text
    pub async fn run(&self, action: Action) -> Msg {
        match action {
            Action::LoadShelf {
                index,
                generation,
                query,
                filters,
            } => Msg::ShelfLoaded {
                index,
                generation,
                result: self.metadata.search(&query, &filters).await.map_err(describe),
            },

            Action::Search {
                generation,
                query,
                filters,
            } => Msg::SearchDone {
                generation,
                result: self.metadata.search(&query, &filters).await.map_err(describe),
            },

            Action::LoadFavorites { generation, items } => Msg::FavoritesLoaded {
                generation,
                result: enrich_favorites(&self.metadata, items).await.map_err(describe),
            },

            Action::ShowInfo {
                generation,
                imdb_id,
            } => Msg::InfoLoaded {
                generation,
                result: self.metadata.details(&imdb_id).await.map_err(describe),
            },

            Action::OpenStream {
                generation,
                imdb_id,
            } => {
                let result = match self.streams() {
                    Ok(client) => client.media_info(&imdb_id).await,
                    Err(e) => Err(e),
                };
                Msg::MediaInfo {
                    generation,
                    result: result.map_err(describe),
                }
            }

            Action::ResolveStream {
                generation,
                file,
                key,
            } => {
                let result = match self.streams() {
                    Ok(client) => client.resolve_stream(&file, &key).await,
                    Err(e) => Err(e),
                };
                Msg::StreamResolved {
                    generation,
                    result: result.map_err(describe),
                }
            }

            Action::Download { url, title } => {
                let result = match &self.downloader {
                    Some(downloader) => {
                        let title = Some(title.as_str()).filter(|t| !t.trim().is_empty());
                        downloader.download(&url, title).await
                    }
                    None => Err(CineError::NotConfigured("Downloads".into())),
                };
                Msg::Downloaded {
                    result: result.map_err(describe),
                }
            }
        }
    }
}

fn describe(error: CineError) -> String {
    tracing::warn!(%error, "request failed");
    error.to_string()
}

// =============================================================================
// Controller
// =============================================================================

pub struct Controller {
    pub app: App,
    services: Services,
    favorites: FavoritesStore,
    player: Box<dyn Player>,
    fullscreen: bool,
}

impl Controller {
    pub fn new(
        mut app: App,
        services: Services,
        favorites: FavoritesStore,
        player: Box<dyn Player>,
    ) -> Self {
        app.can_download = services.downloader.is_some();
        Self {
            app,
            services,
            favorites,
            player,
            fullscreen: false,
        }
    }

    /// Open the player fullscreen
    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn player(&self) -> &dyn Player {
        self.player.as_ref()
    }

    /// Initial work: home shelves and favorites
    pub fn start(&mut self) -> Vec<Action> {
        let mut effects = self.app.load_shelves();
        effects.extend(self.app.load_favorites(self.favorites.list()));
        self.execute(effects)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        let effects = self.app.handle_key(key);
        self.execute(effects)
    }

    /// Apply a finished action
    pub fn apply(&mut self, msg: Msg) -> Vec<Action> {
        let effects = self.app.apply(msg);
        self.execute(effects)
    }

    /// Run an action and everything it triggers to completion
    pub async fn perform(&mut self, action: Action) {
        let mut pending = VecDeque::from([action]);
        while let Some(action) = pending.pop_front() {
            let msg = self.services.run(action).await;
            pending.extend(self.apply(msg));
        }
    }

    /// Stop playback and release the player
    pub fn shutdown(&mut self) {
        self.player.destroy();
    }

    /// Run synchronous effects, collecting network work
    fn execute(&mut self, effects: Vec<Effect>) -> Vec<Action> {
        let mut queue = VecDeque::from(effects);
        let mut actions = Vec::new();

        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Fetch(action) => actions.push(action),
                Effect::ToggleFavorite(item) => match self.favorites.toggle(&item) {
                    Ok(now_favorite) => {
                        self.app.notice = Some(if now_favorite {
                            format!("Added {} to favorites", item.title)
                        } else {
                            format!("Removed {} from favorites", item.title)
                        });
                        queue.extend(self.app.load_favorites(self.favorites.list()));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "favorite toggle failed");
                        self.app.notice = Some(e.to_string());
                    }
                },
                Effect::Play { url, title } => {
                    self.player.destroy();
                    self.player.attach(MediaSink {
                        title,
                        fullscreen: self.fullscreen,
                    });
                    match self.player.load(&url) {
                        Ok(()) => self.app.playback_started(),
                        Err(e) => {
                            tracing::warn!(error = %e, "playback failed");
                            self.app.playback_failed(e.to_string());
                        }
                    }
                }
                Effect::StopPlayback => self.player.destroy(),
            }
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SessionPhase;
    use crate::favorites::MemoryStorage;
    use crate::models::MovieItem;
    use std::sync::Mutex;

    /// Records player calls
    #[derive(Default, Clone)]
    struct Recorder {
        calls: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl Player for Recorder {
        fn attach(&mut self, sink: MediaSink) {
            self.calls.lock().unwrap().push(format!("attach {}", sink.title));
        }

        fn load(&mut self, url: &str) -> Result<()> {
            self.calls.lock().unwrap().push(format!("load {}", url));
            if self.fail {
                Err(CineError::UnsupportedPlayback("mpv not found".into()))
            } else {
                Ok(())
            }
        }

        fn destroy(&mut self) {
            self.calls.lock().unwrap().push("destroy".into());
        }

        fn is_active(&self) -> bool {
            false
        }
    }

    fn controller(player: Recorder) -> Controller {
        Controller::new(
            App::new(),
            Services::new(MetadataClient::with_base_url("key", "http://127.0.0.1:9")),
            FavoritesStore::new(MemoryStorage::new()),
            Box::new(player),
        )
    }

    fn item(id: &str) -> MovieItem {
        MovieItem {
            imdb_id: id.into(),
            title: "Up".into(),
            imdb_rating: Some("8.3".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_play_destroys_before_load() {
        let recorder = Recorder::default();
        let mut controller = controller(recorder.clone());
        controller.app.open_stream(item("tt1"));

        controller.execute(vec![Effect::Play {
            url: "https://cdn/up.m3u8".into(),
            title: "Up".into(),
        }]);

        let calls = recorder.calls.lock().unwrap().clone();
        assert_eq!(calls, vec!["destroy", "attach Up", "load https://cdn/up.m3u8"]);
        assert_eq!(controller.app.session().unwrap().phase, SessionPhase::Playing);
    }

    #[test]
    fn test_play_failure_is_inline() {
        let recorder = Recorder {
            fail: true,
            ..Default::default()
        };
        let mut controller = controller(recorder);
        controller.app.open_stream(item("tt1"));
        controller.execute(vec![Effect::Play {
            url: "x".into(),
            title: "Up".into(),
        }]);

        let session = controller.app.session().unwrap();
        assert_eq!(session.phase, SessionPhase::Error);
        assert_eq!(
            session.error.as_deref(),
            Some("Playback not supported: mpv not found")
        );
    }

    #[test]
    fn test_toggle_favorite_refreshes_list() {
        let mut controller = controller(Recorder::default());
        let actions = controller.execute(vec![Effect::ToggleFavorite(item("tt1"))]);

        assert!(controller.app.is_favorite("tt1"));
        assert!(matches!(actions.as_slice(), [Action::LoadFavorites { items, .. }] if items.len() == 1));

        controller.execute(vec![Effect::ToggleFavorite(item("tt1"))]);
        assert!(!controller.app.is_favorite("tt1"));
        assert!(controller.app.favorites.empty_message().is_some());
    }

    #[tokio::test]
    async fn test_stream_without_endpoint_reports_not_configured() {
        let mut controller = controller(Recorder::default());
        let effects = controller.app.open_stream(item("tt1"));
        let actions = controller.execute(effects);
        for action in actions {
            controller.perform(action).await;
        }

        let session = controller.app.session().unwrap();
        assert_eq!(session.phase, SessionPhase::Error);
        assert_eq!(session.error.as_deref(), Some("Streaming API is not configured"));
    }
}
