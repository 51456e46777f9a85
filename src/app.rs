//! App state and core application logic
//!
//! Holds the view state, the streaming session state machine and key
//! handling. Nothing here touches the network: key presses and finished
//! requests turn into [`Effect`]s that the controller carries out.

use std::collections::HashSet;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::favorites::EMPTY_FAVORITES;
use crate::models::*;

/// Maximum cards kept per home shelf
pub const SHELF_LIMIT: usize = 15;

// =============================================================================
// App State Enum
// =============================================================================

/// Top-level view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Home shelves (latest, trending, ...)
    #[default]
    Home,
    /// Search results
    Search,
    /// Saved favorites
    Favorites,
}

impl AppState {
    fn next(self) -> Self {
        match self {
            AppState::Home => AppState::Search,
            AppState::Search => AppState::Favorites,
            AppState::Favorites => AppState::Home,
        }
    }

    fn prev(self) -> Self {
        match self {
            AppState::Home => AppState::Favorites,
            AppState::Search => AppState::Home,
            AppState::Favorites => AppState::Search,
        }
    }
}

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Search box (and filters) focused
    Editing,
}

/// Loading state for async operations
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading(Option<String>),
    Error(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoadingState::Loading(Some(msg)) => Some(msg),
            LoadingState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

// =============================================================================
// Selection State
// =============================================================================

/// Cursor over a list of `len` items
#[derive(Debug, Clone, Default)]
pub struct ListState {
    pub selected: usize,
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.len.saturating_sub(1);
    }

    /// Update length, clamping the selection
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

// =============================================================================
// Async Work
// =============================================================================

/// Network work requested by the app
///
/// Each request carries the generation of the region it will update; the
/// answer is dropped if that region has moved on in the meantime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadShelf {
        index: usize,
        generation: u64,
        query: String,
        filters: SearchFilters,
    },
    Search {
        generation: u64,
        query: String,
        filters: SearchFilters,
    },
    LoadFavorites {
        generation: u64,
        items: Vec<MovieItem>,
    },
    ShowInfo {
        generation: u64,
        imdb_id: String,
    },
    OpenStream {
        generation: u64,
        imdb_id: String,
    },
    ResolveStream {
        generation: u64,
        file: String,
        key: String,
    },
    Download {
        url: String,
        title: String,
    },
}

/// Outcome of an [`Action`]; errors are already rendered to text
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    ShelfLoaded {
        index: usize,
        generation: u64,
        result: Result<Vec<MovieItem>, String>,
    },
    SearchDone {
        generation: u64,
        result: Result<Vec<MovieItem>, String>,
    },
    FavoritesLoaded {
        generation: u64,
        result: Result<Vec<MovieItem>, String>,
    },
    InfoLoaded {
        generation: u64,
        result: Result<MovieItem, String>,
    },
    MediaInfo {
        generation: u64,
        result: Result<StreamDescriptor, String>,
    },
    StreamResolved {
        generation: u64,
        result: Result<String, String>,
    },
    Downloaded {
        result: Result<PathBuf, String>,
    },
}

/// Something the controller has to do on the app's behalf
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch(Action),
    ToggleFavorite(MovieItem),
    Play { url: String, title: String },
    StopPlayback,
}

// =============================================================================
// View-Specific State
// =============================================================================

/// One horizontal row of cards on the home view
#[derive(Debug, Clone)]
pub struct Shelf {
    pub title: String,
    pub query: String,
    pub filters: SearchFilters,
    pub items: Vec<MovieItem>,
    pub list: ListState,
    pub loading: LoadingState,
    pub generation: u64,
}

impl Shelf {
    pub fn new(title: &str, query: &str, filters: SearchFilters) -> Self {
        Self {
            title: title.to_string(),
            query: query.to_string(),
            filters,
            items: Vec::new(),
            list: ListState::default(),
            loading: LoadingState::Idle,
            generation: 0,
        }
    }

    pub fn selected_item(&self) -> Option<&MovieItem> {
        self.items.get(self.list.selected)
    }
}

/// Default home shelves for a given year
pub fn default_shelves(current_year: i32) -> Vec<Shelf> {
    let year = current_year.to_string();
    vec![
        Shelf::new(
            "Latest Movies",
            "movie",
            SearchFilters::default().media_type(MediaType::Movie).year(&year),
        ),
        Shelf::new(
            "Latest Web Series",
            "series",
            SearchFilters::default().media_type(MediaType::Series).year(&year),
        ),
        Shelf::new(
            "Trending Movies",
            "avengers",
            SearchFilters::default().media_type(MediaType::Movie),
        ),
        Shelf::new(
            "Action Movies",
            "action",
            SearchFilters::default().media_type(MediaType::Movie),
        ),
    ]
}

/// Home view state
#[derive(Debug, Clone, Default)]
pub struct HomeState {
    pub shelves: Vec<Shelf>,
    pub selected: usize,
}

impl HomeState {
    pub fn selected_shelf(&self) -> Option<&Shelf> {
        self.shelves.get(self.selected)
    }

    fn selected_shelf_mut(&mut self) -> Option<&mut Shelf> {
        self.shelves.get_mut(self.selected)
    }
}

/// Field focused while editing the search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Query,
    Type,
    Year,
    Page,
}

impl SearchField {
    fn next(self) -> Self {
        match self {
            SearchField::Query => SearchField::Type,
            SearchField::Type => SearchField::Year,
            SearchField::Year => SearchField::Page,
            SearchField::Page => SearchField::Query,
        }
    }
}

/// Text input with a cursor
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index();
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.value.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index();
            self.value.remove(at);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Text before and after the cursor
    pub fn split(&self) -> (&str, &str) {
        self.value.split_at(self.byte_index())
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

/// Search view state
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: TextInput,
    pub year: TextInput,
    pub page: TextInput,
    pub media_type: Option<MediaType>,
    /// Advanced filters panel visible
    pub filters_open: bool,
    pub field: SearchField,
    pub results: Vec<MovieItem>,
    pub list: ListState,
    pub loading: LoadingState,
    pub generation: u64,
}

impl SearchState {
    /// Filters as currently entered
    pub fn filters(&self) -> SearchFilters {
        SearchFilters {
            media_type: self.media_type,
            year: Some(self.year.value.trim().to_string()).filter(|y| !y.is_empty()),
            page: self.page.value.trim().parse().ok(),
        }
    }

    /// Cycle the type filter: any → movie → series → episode → any
    pub fn cycle_type(&mut self) {
        self.media_type = match self.media_type {
            None => Some(MediaType::Movie),
            Some(MediaType::Movie) => Some(MediaType::Series),
            Some(MediaType::Series) => Some(MediaType::Episode),
            _ => None,
        };
    }

    fn active_input(&mut self) -> Option<&mut TextInput> {
        match self.field {
            SearchField::Query => Some(&mut self.query),
            SearchField::Year => Some(&mut self.year),
            SearchField::Page => Some(&mut self.page),
            SearchField::Type => None,
        }
    }

    pub fn set_results(&mut self, results: Vec<MovieItem>) {
        self.list = ListState::new(results.len());
        self.results = results;
        self.loading = LoadingState::Idle;
    }

    pub fn selected_result(&self) -> Option<&MovieItem> {
        self.results.get(self.list.selected)
    }
}

/// Favorites view state
#[derive(Debug, Clone, Default)]
pub struct FavoritesState {
    pub items: Vec<MovieItem>,
    pub list: ListState,
    pub loading: LoadingState,
    pub generation: u64,
}

impl FavoritesState {
    /// Fixed message when nothing is saved
    pub fn empty_message(&self) -> Option<&'static str> {
        (self.items.is_empty() && self.loading == LoadingState::Idle).then_some(EMPTY_FAVORITES)
    }

    pub fn selected_item(&self) -> Option<&MovieItem> {
        self.items.get(self.list.selected)
    }
}

/// Read-only detail panel
#[derive(Debug, Clone)]
pub struct InfoState {
    pub imdb_id: String,
    pub detail: Option<MovieItem>,
    pub loading: LoadingState,
    pub generation: u64,
}

// =============================================================================
// Streaming Session
// =============================================================================

/// Where a streaming session is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    /// Fetching the stream descriptor
    Resolving,
    /// Waiting on season/episode/language picks
    SeriesSelecting,
    /// Resolving a file into a playable URL
    ResolvingStream,
    Playing,
    /// Failure shown inline; the modal stays open
    Error,
}

/// Column of the series selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectColumn {
    #[default]
    Season,
    Episode,
    Language,
}

/// Cascading season → episode → language selects
///
/// Picking a season clears episode and language; picking an episode clears
/// language.
#[derive(Debug, Clone, Default)]
pub struct SeriesSelector {
    pub seasons: Vec<PlaylistEntry>,
    pub column: SelectColumn,
    pub cursor: [usize; 3],
    pub season: Option<usize>,
    pub episode: Option<usize>,
    pub language: Option<usize>,
}

impl SeriesSelector {
    pub fn new(seasons: Vec<PlaylistEntry>) -> Self {
        Self {
            seasons,
            ..Default::default()
        }
    }

    pub fn episodes(&self) -> &[PlaylistEntry] {
        self.season
            .and_then(|s| self.seasons.get(s))
            .map(PlaylistEntry::children)
            .unwrap_or_default()
    }

    pub fn languages(&self) -> &[PlaylistEntry] {
        self.episode
            .and_then(|e| self.episodes().get(e))
            .map(PlaylistEntry::children)
            .unwrap_or_default()
    }

    /// Options of a column
    pub fn column_entries(&self, column: SelectColumn) -> &[PlaylistEntry] {
        match column {
            SelectColumn::Season => &self.seasons,
            SelectColumn::Episode => self.episodes(),
            SelectColumn::Language => self.languages(),
        }
    }

    fn column_index(column: SelectColumn) -> usize {
        match column {
            SelectColumn::Season => 0,
            SelectColumn::Episode => 1,
            SelectColumn::Language => 2,
        }
    }

    pub fn cursor_of(&self, column: SelectColumn) -> usize {
        self.cursor[Self::column_index(column)]
    }

    pub fn move_cursor(&mut self, down: bool) {
        let len = self.column_entries(self.column).len();
        let slot = &mut self.cursor[Self::column_index(self.column)];
        if down {
            if len > 0 && *slot < len - 1 {
                *slot += 1;
            }
        } else {
            *slot = slot.saturating_sub(1);
        }
    }

    pub fn next_column(&mut self) {
        self.column = match self.column {
            SelectColumn::Season => SelectColumn::Episode,
            SelectColumn::Episode => SelectColumn::Language,
            SelectColumn::Language => SelectColumn::Language,
        };
    }

    pub fn prev_column(&mut self) {
        self.column = match self.column {
            SelectColumn::Language => SelectColumn::Episode,
            _ => SelectColumn::Season,
        };
    }

    pub fn pick_season(&mut self, index: usize) {
        if index >= self.seasons.len() {
            return;
        }
        self.season = Some(index);
        self.episode = None;
        self.language = None;
        self.cursor = [index, 0, 0];
        self.column = SelectColumn::Episode;
    }

    pub fn pick_episode(&mut self, index: usize) {
        if index >= self.episodes().len() {
            return;
        }
        self.episode = Some(index);
        self.language = None;
        self.cursor[1] = index;
        self.cursor[2] = 0;
        self.column = SelectColumn::Language;
    }

    /// Pick a language, returning its playable file
    pub fn pick_language(&mut self, index: usize) -> Option<String> {
        let file = self.languages().get(index)?.playable_file()?.to_string();
        self.language = Some(index);
        self.cursor[2] = index;
        Some(file)
    }
}

/// The streaming modal for one opened title
#[derive(Debug, Clone)]
pub struct StreamSession {
    pub item: MovieItem,
    pub phase: SessionPhase,
    pub generation: u64,
    /// Generation of the latest stream resolution
    pub resolve_generation: u64,
    pub key: Option<String>,
    /// Movie language options
    pub options: Vec<StreamOption>,
    pub option_list: ListState,
    /// Series selector, when the title is a series
    pub series: Option<SeriesSelector>,
    pub error: Option<String>,
    /// Most recently resolved stream URL
    pub stream_url: Option<String>,
}

impl StreamSession {
    fn new(item: MovieItem, generation: u64) -> Self {
        Self {
            item,
            phase: SessionPhase::Resolving,
            generation,
            resolve_generation: 0,
            key: None,
            options: Vec::new(),
            option_list: ListState::default(),
            series: None,
            error: None,
            stream_url: None,
        }
    }
}

/// Modal layered over the views
#[derive(Debug, Clone, Default)]
pub enum Overlay {
    #[default]
    None,
    Info(InfoState),
    Stream(Box<StreamSession>),
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug, Default)]
pub struct App {
    pub state: AppState,
    pub running: bool,
    pub input_mode: InputMode,
    pub overlay: Overlay,
    /// One-line status shown in the status bar
    pub notice: Option<String>,

    pub home: HomeState,
    pub search: SearchState,
    pub favorites: FavoritesState,
    /// Identifiers currently saved as favorites
    pub favorite_ids: HashSet<String>,

    /// Whether a downloader is available
    pub can_download: bool,
    next_generation: u64,
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            ..Default::default()
        }
    }

    /// Install home shelves
    pub fn with_shelves(mut self, shelves: Vec<Shelf>) -> Self {
        self.home.shelves = shelves;
        self
    }

    fn bump(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_favorite(&self, imdb_id: &str) -> bool {
        self.favorite_ids.contains(imdb_id)
    }

    /// Card currently under the cursor in the active view
    pub fn selected_item(&self) -> Option<&MovieItem> {
        match self.state {
            AppState::Home => self.home.selected_shelf().and_then(Shelf::selected_item),
            AppState::Search => self.search.selected_result(),
            AppState::Favorites => self.favorites.selected_item(),
        }
    }

    pub fn session(&self) -> Option<&StreamSession> {
        match &self.overlay {
            Overlay::Stream(session) => Some(&**session),
            _ => None,
        }
    }

    fn session_mut(&mut self) -> Option<&mut StreamSession> {
        match &mut self.overlay {
            Overlay::Stream(session) => Some(&mut **session),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Requests
    // -------------------------------------------------------------------------

    /// Start (or restart) loading every home shelf
    pub fn load_shelves(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        for index in 0..self.home.shelves.len() {
            let generation = self.bump();
            let shelf = &mut self.home.shelves[index];
            shelf.generation = generation;
            shelf.loading = LoadingState::Loading(None);
            effects.push(Effect::Fetch(Action::LoadShelf {
                index,
                generation,
                query: shelf.query.clone(),
                filters: shelf.filters.clone(),
            }));
        }
        effects
    }

    /// Submit the search box; empty queries are ignored
    pub fn submit_search(&mut self) -> Vec<Effect> {
        let query = self.search.query.value.trim().to_string();
        if query.is_empty() {
            return Vec::new();
        }
        let generation = self.bump();
        self.search.generation = generation;
        self.search.results.clear();
        self.search.list = ListState::default();
        self.search.loading = LoadingState::Loading(Some("Searching...".into()));
        self.state = AppState::Search;
        self.input_mode = InputMode::Normal;

        vec![Effect::Fetch(Action::Search {
            generation,
            query,
            filters: self.search.filters(),
        })]
    }

    /// Show the persisted favorites, enriching the ones without details
    pub fn load_favorites(&mut self, items: Vec<MovieItem>) -> Vec<Effect> {
        self.favorite_ids = items.iter().map(|i| i.imdb_id.clone()).collect();
        let generation = self.bump();
        self.favorites.generation = generation;

        if items.is_empty() {
            self.favorites.items.clear();
            self.favorites.list = ListState::default();
            self.favorites.loading = LoadingState::Idle;
            return Vec::new();
        }

        self.favorites.loading = LoadingState::Loading(None);
        vec![Effect::Fetch(Action::LoadFavorites { generation, items })]
    }

    /// Open the detail panel for a title
    pub fn open_info(&mut self, imdb_id: &str) -> Vec<Effect> {
        let generation = self.bump();
        self.overlay = Overlay::Info(InfoState {
            imdb_id: imdb_id.to_string(),
            detail: None,
            loading: LoadingState::Loading(Some("Loading...".into())),
            generation,
        });
        vec![Effect::Fetch(Action::ShowInfo {
            generation,
            imdb_id: imdb_id.to_string(),
        })]
    }

    /// Open the streaming modal for a title
    ///
    /// Any previous playback is stopped first.
    pub fn open_stream(&mut self, item: MovieItem) -> Vec<Effect> {
        let generation = self.bump();
        let imdb_id = item.imdb_id.clone();
        self.overlay = Overlay::Stream(Box::new(StreamSession::new(item, generation)));
        vec![
            Effect::StopPlayback,
            Effect::Fetch(Action::OpenStream {
                generation,
                imdb_id,
            }),
        ]
    }

    /// Close whatever modal is open; playback stops with it
    pub fn close_overlay(&mut self) -> Vec<Effect> {
        let was_stream = matches!(self.overlay, Overlay::Stream(_));
        self.overlay = Overlay::None;
        if was_stream {
            vec![Effect::StopPlayback]
        } else {
            Vec::new()
        }
    }

    /// Resolve a file of the open session
    fn resolve(&mut self, file: String) -> Vec<Effect> {
        let generation = self.bump();
        let Some(session) = self.session_mut() else {
            return Vec::new();
        };
        let Some(key) = session.key.clone() else {
            return Vec::new();
        };
        session.resolve_generation = generation;
        session.phase = SessionPhase::ResolvingStream;
        session.error = None;
        vec![Effect::Fetch(Action::ResolveStream {
            generation,
            file,
            key,
        })]
    }

    /// Play a movie language option by index
    pub fn play_option(&mut self, index: usize) -> Vec<Effect> {
        let Some(session) = self.session_mut() else {
            return Vec::new();
        };
        let Some(file) = session.options.get(index).map(|o| o.file.clone()) else {
            return Vec::new();
        };
        session.option_list.selected = index;
        self.resolve(file)
    }

    /// Download the last resolved stream
    pub fn download(&mut self) -> Vec<Effect> {
        if !self.can_download {
            self.notice = Some("Downloads are not available".into());
            return Vec::new();
        }
        let Some(session) = self.session_mut() else {
            return Vec::new();
        };
        let Some(url) = session.stream_url.clone() else {
            session.error = Some("No stream available to download".into());
            return Vec::new();
        };
        let title = session.item.title.clone();
        self.notice = Some(format!("Downloading {}...", title));
        vec![Effect::Fetch(Action::Download { url, title })]
    }

    // -------------------------------------------------------------------------
    // Playback results (reported by the controller)
    // -------------------------------------------------------------------------

    pub fn playback_started(&mut self) {
        if let Some(session) = self.session_mut() {
            session.phase = SessionPhase::Playing;
            session.error = None;
        }
    }

    pub fn playback_failed(&mut self, message: impl Into<String>) {
        if let Some(session) = self.session_mut() {
            session.phase = SessionPhase::Error;
            session.error = Some(message.into());
        }
    }

    // -------------------------------------------------------------------------
    // Applying Results
    // -------------------------------------------------------------------------

    /// Apply a finished request; stale generations are ignored
    pub fn apply(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::ShelfLoaded {
                index,
                generation,
                result,
            } => {
                if let Some(shelf) = self.home.shelves.get_mut(index) {
                    if shelf.generation == generation {
                        match result {
                            Ok(mut items) => {
                                items.truncate(SHELF_LIMIT);
                                shelf.list = ListState::new(items.len());
                                shelf.items = items;
                                shelf.loading = LoadingState::Idle;
                            }
                            Err(_) => {
                                shelf.loading = LoadingState::Error("Failed to load content".into())
                            }
                        }
                    }
                }
                Vec::new()
            }

            Msg::SearchDone { generation, result } => {
                if self.search.generation == generation {
                    match result {
                        Ok(items) => self.search.set_results(items),
                        Err(e) => {
                            let message = if e.is_empty() { "Search failed".to_string() } else { e };
                            self.search.loading = LoadingState::Error(message);
                        }
                    }
                }
                Vec::new()
            }

            Msg::FavoritesLoaded { generation, result } => {
                if self.favorites.generation == generation {
                    match result {
                        Ok(items) => {
                            self.favorites.list.set_len(items.len());
                            self.favorites.items = items;
                            self.favorites.loading = LoadingState::Idle;
                        }
                        Err(_) => {
                            self.favorites.loading =
                                LoadingState::Error("Error loading favorite details".into());
                        }
                    }
                }
                Vec::new()
            }

            Msg::InfoLoaded { generation, result } => {
                if let Overlay::Info(info) = &mut self.overlay {
                    if info.generation == generation {
                        match result {
                            Ok(detail) => {
                                info.detail = Some(detail);
                                info.loading = LoadingState::Idle;
                            }
                            Err(_) => {
                                info.loading =
                                    LoadingState::Error("Failed to load information.".into())
                            }
                        }
                    }
                }
                Vec::new()
            }

            Msg::MediaInfo { generation, result } => self.apply_media_info(generation, result),

            Msg::StreamResolved { generation, result } => {
                let Some(session) = self.session_mut() else {
                    return Vec::new();
                };
                if session.resolve_generation != generation {
                    return Vec::new();
                }
                match result {
                    Ok(url) => {
                        session.stream_url = Some(url.clone());
                        vec![Effect::Play {
                            url,
                            title: session.item.title.clone(),
                        }]
                    }
                    Err(e) => {
                        session.phase = SessionPhase::Error;
                        session.error = Some(e);
                        Vec::new()
                    }
                }
            }

            Msg::Downloaded { result } => {
                self.notice = Some(match result {
                    Ok(path) => format!("Saved to {}", path.display()),
                    Err(e) => format!("Download failed: {}", e),
                });
                Vec::new()
            }
        }
    }

    fn apply_media_info(
        &mut self,
        generation: u64,
        result: Result<StreamDescriptor, String>,
    ) -> Vec<Effect> {
        let Some(session) = self.session_mut() else {
            return Vec::new();
        };
        if session.generation != generation {
            return Vec::new();
        }

        let playback = result.and_then(|d| d.classify().map_err(|e| e.to_string()));
        match playback {
            Err(e) => {
                session.phase = SessionPhase::Error;
                session.error = Some(e);
                Vec::new()
            }
            Ok(Playback::Series { seasons, key }) => {
                session.key = Some(key);
                session.series = Some(SeriesSelector::new(seasons));
                session.phase = SessionPhase::SeriesSelecting;
                Vec::new()
            }
            Ok(Playback::Movie { options, key }) => {
                session.key = Some(key);
                session.option_list = ListState::new(options.len());
                session.options = options;
                self.play_option(0)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle a key press, returning the work it requires
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        self.notice = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return Vec::new();
        }

        if matches!(self.overlay, Overlay::Info(_)) {
            return self.handle_info_key(key);
        }
        if matches!(self.overlay, Overlay::Stream(_)) {
            return self.handle_stream_key(key);
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else {
            self.handle_normal_key(key)
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => return self.submit_search(),
            KeyCode::Tab => {
                self.search.field = if self.search.filters_open {
                    self.search.field.next()
                } else {
                    SearchField::Query
                };
            }
            KeyCode::Char(c) => match self.search.field {
                SearchField::Type => self.search.cycle_type(),
                SearchField::Year | SearchField::Page if !c.is_ascii_digit() => {}
                _ => {
                    if let Some(input) = self.search.active_input() {
                        input.insert(c);
                    }
                }
            },
            KeyCode::Left if self.search.field == SearchField::Type => self.search.cycle_type(),
            KeyCode::Right if self.search.field == SearchField::Type => self.search.cycle_type(),
            code => {
                if let Some(input) = self.search.active_input() {
                    match code {
                        KeyCode::Backspace => input.backspace(),
                        KeyCode::Delete => input.delete(),
                        KeyCode::Left => input.left(),
                        KeyCode::Right => input.right(),
                        KeyCode::Home => input.home(),
                        KeyCode::End => input.end(),
                        _ => {}
                    }
                }
            }
        }
        Vec::new()
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return Vec::new();
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.state = AppState::Search;
                self.search.field = SearchField::Query;
                self.input_mode = InputMode::Editing;
                return Vec::new();
            }
            KeyCode::Char('a') => {
                self.search.filters_open = !self.search.filters_open;
                if !self.search.filters_open {
                    self.search.field = SearchField::Query;
                }
                return Vec::new();
            }
            KeyCode::Tab => {
                self.state = self.state.next();
                return Vec::new();
            }
            KeyCode::BackTab => {
                self.state = self.state.prev();
                return Vec::new();
            }
            KeyCode::Esc => {
                self.state = AppState::Home;
                return Vec::new();
            }
            KeyCode::Enter => {
                return match self.selected_item().cloned() {
                    Some(item) => self.open_stream(item),
                    None => Vec::new(),
                };
            }
            KeyCode::Char('i') => {
                return match self.selected_item().map(|i| i.imdb_id.clone()) {
                    Some(id) => self.open_info(&id),
                    None => Vec::new(),
                };
            }
            KeyCode::Char('f') => {
                return match self.selected_item().cloned() {
                    Some(item) => vec![Effect::ToggleFavorite(item)],
                    None => Vec::new(),
                };
            }
            _ => {}
        }

        match self.state {
            AppState::Home => self.handle_home_key(key),
            AppState::Search => {
                move_list(&mut self.search.list, key.code);
                Vec::new()
            }
            AppState::Favorites => {
                move_list(&mut self.favorites.list, key.code);
                Vec::new()
            }
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.home.selected = self.home.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.home.selected + 1 < self.home.shelves.len() {
                    self.home.selected += 1;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                if let Some(shelf) = self.home.selected_shelf_mut() {
                    shelf.list.up();
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if let Some(shelf) = self.home.selected_shelf_mut() {
                    shelf.list.down();
                }
            }
            KeyCode::Char('r') => return self.load_shelves(),
            _ => {}
        }
        Vec::new()
    }

    fn handle_info_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('i') | KeyCode::Enter => {
                self.close_overlay()
            }
            _ => Vec::new(),
        }
    }

    fn handle_stream_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return self.close_overlay(),
            KeyCode::Char('d') => return self.download(),
            _ => {}
        }

        let Some(session) = self.session_mut() else {
            return Vec::new();
        };

        if let Some(series) = session.series.as_mut() {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => series.move_cursor(false),
                KeyCode::Down | KeyCode::Char('j') => series.move_cursor(true),
                KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => series.prev_column(),
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => series.next_column(),
                KeyCode::Enter => {
                    let index = series.cursor_of(series.column);
                    match series.column {
                        SelectColumn::Season => series.pick_season(index),
                        SelectColumn::Episode => series.pick_episode(index),
                        SelectColumn::Language => {
                            if let Some(file) = series.pick_language(index) {
                                return self.resolve(file);
                            }
                        }
                    }
                }
                _ => {}
            }
            return Vec::new();
        }

        match key.code {
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') | KeyCode::Char('h') => {
                session.option_list.up();
            }
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') | KeyCode::Char('l') => {
                session.option_list.down();
            }
            KeyCode::Enter => {
                let index = session.option_list.selected;
                return self.play_option(index);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                if index < session.options.len() {
                    return self.play_option(index);
                }
            }
            _ => {}
        }
        Vec::new()
    }
}

fn move_list(list: &mut ListState, code: KeyCode) {
    match code {
        KeyCode::Up | KeyCode::Left | KeyCode::Char('k') | KeyCode::Char('h') => list.up(),
        KeyCode::Down | KeyCode::Right | KeyCode::Char('j') | KeyCode::Char('l') => list.down(),
        KeyCode::Home => list.first(),
        KeyCode::End => list.last(),
        _ => {}
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn item(id: &str, title: &str) -> MovieItem {
        MovieItem {
            imdb_id: id.to_string(),
            title: title.to_string(),
            year: "2020".to_string(),
            ..Default::default()
        }
    }

    fn fetches(effects: &[Effect]) -> Vec<&Action> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Fetch(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    fn app_with_results() -> App {
        let mut app = App::new();
        app.state = AppState::Search;
        app.search.set_results(vec![item("tt1", "One"), item("tt2", "Two")]);
        app
    }

    fn series_descriptor() -> StreamDescriptor {
        StreamDescriptor {
            playlist: Some(vec![
                PlaylistEntry::folder(
                    "Season 1",
                    vec![
                        PlaylistEntry::folder(
                            "Episode 1",
                            vec![
                                PlaylistEntry::leaf("English", "s1e1-en"),
                                PlaylistEntry::leaf("Hindi", "s1e1-hi"),
                            ],
                        ),
                        PlaylistEntry::folder(
                            "Episode 2",
                            vec![PlaylistEntry::leaf("English", "s1e2-en")],
                        ),
                    ],
                ),
                PlaylistEntry::folder(
                    "Season 2",
                    vec![PlaylistEntry::folder(
                        "Episode 1",
                        vec![PlaylistEntry::leaf("English", "s2e1-en")],
                    )],
                ),
            ]),
            key: Some("secret".into()),
            ..Default::default()
        }
    }

    fn open_session(app: &mut App) -> u64 {
        app.open_stream(item("tt1", "One"));
        app.session().unwrap().generation
    }

    // -------------------------------------------------------------------------
    // ListState / TextInput
    // -------------------------------------------------------------------------

    #[test]
    fn test_list_state_navigation() {
        let mut list = ListState::new(3);
        list.down();
        list.down();
        list.down();
        assert_eq!(list.selected, 2);
        list.up();
        assert_eq!(list.selected, 1);
        list.set_len(1);
        assert_eq!(list.selected, 0);
    }

    #[test]
    fn test_text_input_unicode_cursor() {
        let mut input = TextInput::default();
        for c in "amélie".chars() {
            input.insert(c);
        }
        input.left();
        input.left();
        input.left();
        input.backspace();
        assert_eq!(input.value, "amlie");
        assert_eq!(input.split(), ("am", "lie"));
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    #[test]
    fn test_empty_query_is_ignored() {
        let mut app = App::new();
        app.search.query.value = "   ".into();
        assert!(app.submit_search().is_empty());
        assert!(!app.search.loading.is_loading());
    }

    #[test]
    fn test_typing_and_submitting_search() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('/')));
        assert_eq!(app.input_mode, InputMode::Editing);
        for c in "up".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }

        let effects = app.handle_key(key(KeyCode::Enter));
        match fetches(&effects).as_slice() {
            [Action::Search { query, filters, .. }] => {
                assert_eq!(query, "up");
                assert_eq!(filters, &SearchFilters::default());
            }
            other => panic!("unexpected actions {:?}", other),
        }
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.search.loading.is_loading());
    }

    #[test]
    fn test_advanced_filters_editing() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('a')));
        app.handle_key(key(KeyCode::Char('/')));
        for c in "matrix".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Tab)); // type
        app.handle_key(key(KeyCode::Right)); // movie
        app.handle_key(key(KeyCode::Right)); // series
        app.handle_key(key(KeyCode::Tab)); // year
        for c in "19x99".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Tab)); // page
        app.handle_key(key(KeyCode::Char('2')));

        let filters = app.search.filters();
        assert_eq!(filters.media_type, Some(MediaType::Series));
        assert_eq!(filters.year.as_deref(), Some("1999"));
        assert_eq!(filters.page, Some(2));
        assert_eq!(app.search.query.value, "matrix");
    }

    #[test]
    fn test_stale_search_results_are_dropped() {
        let mut app = App::new();
        app.search.query.value = "first".into();
        let first = match fetches(&app.submit_search())[0] {
            Action::Search { generation, .. } => *generation,
            _ => unreachable!(),
        };
        app.search.query.value = "second".into();
        app.submit_search();

        app.apply(Msg::SearchDone {
            generation: first,
            result: Ok(vec![item("tt9", "Stale")]),
        });
        assert!(app.search.results.is_empty());
        assert!(app.search.loading.is_loading());
    }

    #[test]
    fn test_search_error_is_inline() {
        let mut app = App::new();
        app.search.query.value = "zzzz".into();
        app.submit_search();
        let generation = app.search.generation;
        app.apply(Msg::SearchDone {
            generation,
            result: Err("Movie not found!".into()),
        });
        assert_eq!(app.search.loading.message(), Some("Movie not found!"));
    }

    // -------------------------------------------------------------------------
    // Shelves / Favorites / Info
    // -------------------------------------------------------------------------

    #[test]
    fn test_shelves_truncate_and_fail_independently() {
        let mut app = App::new().with_shelves(default_shelves(2024));
        let effects = app.load_shelves();
        assert_eq!(fetches(&effects).len(), 4);

        let many: Vec<_> = (0..20).map(|i| item(&format!("tt{}", i), "x")).collect();
        let (g0, g1) = (app.home.shelves[0].generation, app.home.shelves[1].generation);
        app.apply(Msg::ShelfLoaded { index: 0, generation: g0, result: Ok(many) });
        app.apply(Msg::ShelfLoaded { index: 1, generation: g1, result: Err("boom".into()) });

        assert_eq!(app.home.shelves[0].items.len(), SHELF_LIMIT);
        assert_eq!(
            app.home.shelves[1].loading.message(),
            Some("Failed to load content")
        );
        assert!(app.home.shelves[2].loading.is_loading());
    }

    #[test]
    fn test_default_shelves_use_current_year() {
        let shelves = default_shelves(2031);
        assert_eq!(shelves[0].filters.year.as_deref(), Some("2031"));
        assert_eq!(shelves[1].filters.media_type, Some(MediaType::Series));
        assert_eq!(shelves[2].query, "avengers");
    }

    #[test]
    fn test_empty_favorites_message() {
        let mut app = App::new();
        assert!(app.load_favorites(Vec::new()).is_empty());
        assert_eq!(app.favorites.empty_message(), Some(EMPTY_FAVORITES));
    }

    #[test]
    fn test_favorites_error_message() {
        let mut app = App::new();
        app.load_favorites(vec![item("tt1", "One")]);
        assert!(app.is_favorite("tt1"));
        let generation = app.favorites.generation;
        app.apply(Msg::FavoritesLoaded {
            generation,
            result: Err("Network error".into()),
        });
        assert_eq!(
            app.favorites.loading.message(),
            Some("Error loading favorite details")
        );
        assert_eq!(app.favorites.empty_message(), None);
    }

    #[test]
    fn test_favorite_key_requests_toggle() {
        let mut app = app_with_results();
        app.handle_key(key(KeyCode::Down));
        let effects = app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(effects, vec![Effect::ToggleFavorite(item("tt2", "Two"))]);
    }

    #[test]
    fn test_info_panel_failure() {
        let mut app = app_with_results();
        app.handle_key(key(KeyCode::Char('i')));
        let generation = match &app.overlay {
            Overlay::Info(info) => info.generation,
            _ => panic!("info overlay expected"),
        };
        app.apply(Msg::InfoLoaded {
            generation,
            result: Err("x".into()),
        });
        match &app.overlay {
            Overlay::Info(info) => {
                assert_eq!(info.loading.message(), Some("Failed to load information."))
            }
            _ => panic!("info overlay expected"),
        }
        app.handle_key(key(KeyCode::Esc));
        assert!(matches!(app.overlay, Overlay::None));
    }

    // -------------------------------------------------------------------------
    // Streaming Session
    // -------------------------------------------------------------------------

    #[test]
    fn test_enter_opens_stream_session() {
        let mut app = app_with_results();
        let effects = app.handle_key(key(KeyCode::Enter));
        assert_eq!(effects[0], Effect::StopPlayback);
        assert!(matches!(
            fetches(&effects)[0],
            Action::OpenStream { imdb_id, .. } if imdb_id == "tt1"
        ));
        assert_eq!(app.session().unwrap().phase, SessionPhase::Resolving);
    }

    #[test]
    fn test_movie_autoplays_first_option() {
        let mut app = App::new();
        let generation = open_session(&mut app);
        let descriptor = StreamDescriptor {
            playlist: Some(vec![
                PlaylistEntry::leaf("English", "en-file"),
                PlaylistEntry::leaf("Hindi", "hi-file"),
            ]),
            key: Some("secret".into()),
            ..Default::default()
        };

        let effects = app.apply(Msg::MediaInfo {
            generation,
            result: Ok(descriptor),
        });
        match fetches(&effects).as_slice() {
            [Action::ResolveStream { file, key, .. }] => {
                assert_eq!(file, "en-file");
                assert_eq!(key, "secret");
            }
            other => panic!("unexpected actions {:?}", other),
        }
        let session = app.session().unwrap();
        assert_eq!(session.phase, SessionPhase::ResolvingStream);
        assert_eq!(session.options.len(), 2);
    }

    #[test]
    fn test_resolved_stream_requests_playback() {
        let mut app = App::new();
        let generation = open_session(&mut app);
        app.apply(Msg::MediaInfo {
            generation,
            result: Ok(StreamDescriptor {
                link: Some("direct".into()),
                key: Some("k".into()),
                ..Default::default()
            }),
        });
        let resolve_generation = app.session().unwrap().resolve_generation;

        let effects = app.apply(Msg::StreamResolved {
            generation: resolve_generation,
            result: Ok("https://cdn/one.m3u8".into()),
        });
        assert_eq!(
            effects,
            vec![Effect::Play {
                url: "https://cdn/one.m3u8".into(),
                title: "One".into()
            }]
        );
        app.playback_started();
        let session = app.session().unwrap();
        assert_eq!(session.phase, SessionPhase::Playing);
        assert_eq!(session.stream_url.as_deref(), Some("https://cdn/one.m3u8"));
    }

    #[test]
    fn test_series_cascade_resets_downstream() {
        let mut app = App::new();
        let generation = open_session(&mut app);
        let effects = app.apply(Msg::MediaInfo {
            generation,
            result: Ok(series_descriptor()),
        });
        assert!(effects.is_empty());
        assert_eq!(app.session().unwrap().phase, SessionPhase::SeriesSelecting);

        // Season 1, episode 1
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Enter));
        {
            let series = app.session().unwrap().series.as_ref().unwrap();
            assert_eq!(series.languages().len(), 2);
            assert_eq!(series.column, SelectColumn::Language);
        }

        // Back to seasons, pick season 2: episode and language reset
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        let series = app.session().unwrap().series.as_ref().unwrap();
        assert_eq!(series.season, Some(1));
        assert_eq!(series.episode, None);
        assert!(series.languages().is_empty());
        assert_eq!(series.episodes().len(), 1);
    }

    #[test]
    fn test_series_language_pick_resolves() {
        let mut app = App::new();
        let generation = open_session(&mut app);
        app.apply(Msg::MediaInfo {
            generation,
            result: Ok(series_descriptor()),
        });
        app.handle_key(key(KeyCode::Enter)); // season 1
        app.handle_key(key(KeyCode::Enter)); // episode 1
        app.handle_key(key(KeyCode::Down)); // Hindi
        let effects = app.handle_key(key(KeyCode::Enter));

        match fetches(&effects).as_slice() {
            [Action::ResolveStream { file, key, .. }] => {
                assert_eq!(file, "s1e1-hi");
                assert_eq!(key, "secret");
            }
            other => panic!("unexpected actions {:?}", other),
        }
        assert_eq!(app.session().unwrap().phase, SessionPhase::ResolvingStream);
    }

    #[test]
    fn test_resolve_error_keeps_modal_open() {
        let mut app = App::new();
        let generation = open_session(&mut app);
        app.apply(Msg::MediaInfo {
            generation,
            result: Ok(StreamDescriptor {
                link: Some("direct".into()),
                key: Some("k".into()),
                ..Default::default()
            }),
        });
        let resolve_generation = app.session().unwrap().resolve_generation;
        app.apply(Msg::StreamResolved {
            generation: resolve_generation,
            result: Err("No stream available".into()),
        });

        let session = app.session().unwrap();
        assert_eq!(session.phase, SessionPhase::Error);
        assert_eq!(session.error.as_deref(), Some("No stream available"));
    }

    #[test]
    fn test_media_info_without_stream_is_error() {
        let mut app = App::new();
        let generation = open_session(&mut app);
        app.apply(Msg::MediaInfo {
            generation,
            result: Ok(StreamDescriptor::default()),
        });
        assert_eq!(app.session().unwrap().phase, SessionPhase::Error);
    }

    #[test]
    fn test_close_discards_session_and_late_responses() {
        let mut app = App::new();
        let generation = open_session(&mut app);
        let effects = app.handle_key(key(KeyCode::Esc));
        assert_eq!(effects, vec![Effect::StopPlayback]);
        assert!(app.session().is_none());

        let effects = app.apply(Msg::MediaInfo {
            generation,
            result: Ok(series_descriptor()),
        });
        assert!(effects.is_empty());
        assert!(matches!(app.overlay, Overlay::None));
    }

    #[test]
    fn test_superseded_session_ignores_old_media_info() {
        let mut app = App::new();
        let old = open_session(&mut app);
        app.open_stream(item("tt2", "Two"));

        app.apply(Msg::MediaInfo {
            generation: old,
            result: Ok(series_descriptor()),
        });
        let session = app.session().unwrap();
        assert_eq!(session.item.imdb_id, "tt2");
        assert_eq!(session.phase, SessionPhase::Resolving);
    }

    #[test]
    fn test_download_without_stream() {
        let mut app = App::new();
        app.can_download = true;
        open_session(&mut app);
        let effects = app.handle_key(key(KeyCode::Char('d')));
        assert!(effects.is_empty());
        assert_eq!(
            app.session().unwrap().error.as_deref(),
            Some("No stream available to download")
        );
    }

    #[test]
    fn test_download_uses_last_stream_and_title() {
        let mut app = App::new();
        app.can_download = true;
        open_session(&mut app);
        if let Overlay::Stream(session) = &mut app.overlay {
            session.stream_url = Some("https://cdn/one.m3u8".into());
        }
        let effects = app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(
            effects,
            vec![Effect::Fetch(Action::Download {
                url: "https://cdn/one.m3u8".into(),
                title: "One".into()
            })]
        );
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    #[test]
    fn test_tab_cycles_views() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.state, AppState::Search);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.state, AppState::Favorites);
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.state, AppState::Search);
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Home);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.running);

        let mut app = App::new();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }
}
