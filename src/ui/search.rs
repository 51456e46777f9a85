//! Search box, advanced filters and result grid

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::{App, InputMode, SearchField, TextInput};
use crate::ui::card::render_grid;
use crate::ui::Theme;

/// Height of the filters bar when open
pub const FILTERS_HEIGHT: u16 = 3;

fn editing(app: &App, field: SearchField) -> bool {
    app.input_mode == InputMode::Editing && app.search.field == field
}

/// Input text with a cursor bar when focused
fn input_text(input: &TextInput, focused: bool, placeholder: &str) -> String {
    if focused {
        let (before, after) = input.split();
        format!("{}│{}", before, after)
    } else if input.value.is_empty() {
        placeholder.to_string()
    } else {
        input.value.clone()
    }
}

/// Search box shown in the header
pub fn render_search_box(frame: &mut Frame, area: Rect, app: &App) {
    let focused = editing(app, SearchField::Query);
    let text = format!(
        "⌕ {}",
        input_text(&app.search.query, focused, "Type / to search...")
    );

    let search_box = Paragraph::new(text).style(Theme::input(focused)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if focused {
                Theme::border_focused()
            } else {
                Theme::border()
            })
            .title(Span::styled(" SEARCH ", Theme::title())),
    );
    frame.render_widget(search_box, area);
}

/// Type / year / page filters
pub fn render_filters(frame: &mut Frame, area: Rect, app: &App) {
    let search = &app.search;
    let type_label = search
        .media_type
        .map(|t| t.to_string())
        .unwrap_or_else(|| "Any".to_string());

    let field = |label: &'static str, value: String, focused: bool| {
        vec![
            Span::styled(label, Theme::keybind_desc()),
            Span::styled(
                format!(" {} ", value),
                if focused {
                    Theme::input_cursor()
                } else {
                    Theme::input(false)
                },
            ),
            Span::raw("   "),
        ]
    };

    let mut spans = Vec::new();
    spans.extend(field(
        "Type",
        format!("◂ {} ▸", type_label),
        editing(app, SearchField::Type),
    ));
    spans.extend(field(
        "Year",
        input_text(&search.year, editing(app, SearchField::Year), "----"),
        editing(app, SearchField::Year),
    ));
    spans.extend(field(
        "Page",
        input_text(&search.page, editing(app, SearchField::Page), "1"),
        editing(app, SearchField::Page),
    ));

    let filters = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border())
            .title(Span::styled(" FILTERS ", Theme::heading())),
    );
    frame.render_widget(filters, area);
}

/// Result grid
pub fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let search = &app.search;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(
            format!(" RESULTS ({}) ", search.results.len()),
            Theme::title(),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if search.loading.is_loading() {
        let loading = Paragraph::new("⟳ Searching...")
            .style(Theme::loading())
            .alignment(Alignment::Center);
        frame.render_widget(loading, inner);
        return;
    }

    if let Some(message) = search.loading.message().filter(|_| search.loading.is_error()) {
        let error = Paragraph::new(message)
            .style(Theme::error())
            .alignment(Alignment::Center);
        frame.render_widget(error, inner);
        return;
    }

    if search.results.is_empty() {
        let empty = Paragraph::new("Type / to search for movies and series...")
            .style(Theme::dimmed())
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    render_grid(frame, inner, &search.results, search.list.selected, |id| {
        app.is_favorite(id)
    });
}

/// Favorites grid
pub fn render_favorites(frame: &mut Frame, area: Rect, app: &App) {
    let favorites = &app.favorites;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(
            format!(" ♥ FAVORITES ({}) ", app.favorite_ids.len()),
            Theme::title(),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let status = if favorites.loading.is_loading() {
        Some(Paragraph::new("⟳ Loading favorites...").style(Theme::loading()))
    } else if favorites.loading.is_error() {
        favorites
            .loading
            .message()
            .map(|m| Paragraph::new(m.to_string()).style(Theme::error()))
    } else {
        favorites
            .empty_message()
            .map(|m| Paragraph::new(m).style(Theme::dimmed()))
    };

    match status {
        Some(paragraph) => frame.render_widget(paragraph.alignment(Alignment::Center), inner),
        None => render_grid(frame, inner, &favorites.items, favorites.list.selected, |id| {
            app.is_favorite(id)
        }),
    }
}
