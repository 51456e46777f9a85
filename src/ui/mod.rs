//! Terminal UI
//!
//! Built with ratatui. Rendering only reads [`App`]; all state changes go
//! through key handling and the controller.

pub mod card;
pub mod detail;
pub mod home;
pub mod player;
pub mod search;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{App, AppState, InputMode, Overlay};

/// Rect of at most `width` x `height` centered in `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draw the whole interface
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Theme::text()), area);

    let filters_height = if app.search.filters_open {
        search::FILTERS_HEIGHT
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),              // Header
            Constraint::Length(filters_height), // Advanced filters
            Constraint::Min(1),                 // Content
            Constraint::Length(1),              // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    if app.search.filters_open {
        search::render_filters(frame, chunks[1], app);
    }

    match app.state {
        AppState::Home => home::render(frame, chunks[2], app),
        AppState::Search => search::render_results(frame, chunks[2], app),
        AppState::Favorites => search::render_favorites(frame, chunks[2], app),
    }

    render_status_bar(frame, chunks[3], app);

    match &app.overlay {
        Overlay::None => {}
        Overlay::Info(info) => detail::render(frame, area, info),
        Overlay::Stream(session) => player::render(frame, area, session, app.can_download),
    }
}

/// Logo, view tabs and search box
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12), // Logo
            Constraint::Length(32), // Tabs
            Constraint::Min(1),     // Search box
        ])
        .split(area);

    let bordered = || {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border())
    };

    let logo = Paragraph::new(Line::from(vec![
        Span::styled("CINE", Theme::title()),
        Span::styled("TUI", Theme::heading()),
    ]))
    .alignment(Alignment::Center)
    .block(bordered());
    frame.render_widget(logo, header_chunks[0]);

    let tabs: Vec<Span> = [
        (AppState::Home, "Home"),
        (AppState::Search, "Search"),
        (AppState::Favorites, "Favorites"),
    ]
    .into_iter()
    .flat_map(|(state, label)| {
        [
            Span::styled(format!(" {} ", label), Theme::tab(app.state == state)),
            Span::styled("│", Theme::dimmed()),
        ]
    })
    .collect();
    frame.render_widget(
        Paragraph::new(Line::from(tabs)).block(bordered()),
        header_chunks[1],
    );

    search::render_search_box(frame, header_chunks[2], app);
}

/// Mode, notice and key hints
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::PRIMARY),
        ),
        InputMode::Editing => Span::styled(
            " INSERT ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::ACCENT),
        ),
    };

    let middle = match &app.notice {
        Some(notice) => Span::styled(format!(" {} ", notice), Theme::warning()),
        None => Span::raw(""),
    };

    let help = match app.input_mode {
        InputMode::Editing => " ↵:search  Tab:field  Esc:cancel ",
        InputMode::Normal => " q:quit  /:search  Tab:view  ↵:play  i:info  f:fav  a:filters ",
    };

    let status_line = Line::from(vec![
        mode_indicator,
        middle,
        Span::raw(" │ "),
        Span::styled(help, Theme::keybind_desc()),
    ]);

    frame.render_widget(Paragraph::new(status_line).style(Theme::status_bar()), area);
}
