//! Streaming modal
//!
//! Shows the session phase, the language options of a movie or the
//! season/episode/language selects of a series, and inline errors.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use crate::app::{SelectColumn, SeriesSelector, SessionPhase, StreamSession};
use crate::ui::{centered_rect, Theme};

/// Status line text for a phase
pub fn phase_label(phase: &SessionPhase) -> &'static str {
    match phase {
        SessionPhase::Resolving => "⟳ Fetching stream info...",
        SessionPhase::SeriesSelecting => "Pick a season, episode and language",
        SessionPhase::ResolvingStream => "⟳ Resolving stream...",
        SessionPhase::Playing => "▶ Playing",
        SessionPhase::Error => "✗ Playback error",
    }
}

fn phase_style(phase: &SessionPhase) -> Style {
    match phase {
        SessionPhase::Playing => Theme::success(),
        SessionPhase::Error => Theme::error(),
        SessionPhase::SeriesSelecting => Theme::text(),
        _ => Theme::loading(),
    }
}

pub fn render(frame: &mut Frame, area: Rect, session: &StreamSession, can_download: bool) {
    let popup = centered_rect(90, 22, area);
    frame.render_widget(Clear, popup);

    let mut hints = vec![
        Span::styled(" ↵ ", Theme::keybind()),
        Span::styled("play ", Theme::keybind_desc()),
    ];
    if can_download {
        hints.push(Span::styled(" d ", Theme::keybind()));
        hints.push(Span::styled("download ", Theme::keybind_desc()));
    }
    hints.push(Span::styled(" Esc ", Theme::keybind()));
    hints.push(Span::styled("close ", Theme::keybind_desc()));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Theme::border_focused())
        .title(Span::styled(format!(" ▶ {} ", session.item.title), Theme::title()))
        .title_bottom(Line::from(hints))
        .style(Theme::card(false));

    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Phase
            Constraint::Length(2), // Error
            Constraint::Min(1),    // Options
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(phase_label(&session.phase)).style(phase_style(&session.phase)),
        chunks[0],
    );

    if let Some(error) = &session.error {
        frame.render_widget(
            Paragraph::new(error.as_str())
                .style(Theme::error())
                .wrap(Wrap { trim: true }),
            chunks[1],
        );
    }

    if let Some(series) = &session.series {
        render_series(frame, chunks[2], series);
    } else if !session.options.is_empty() {
        let items: Vec<ListItem> = session
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                ListItem::new(format!(" {} {} ", i + 1, option.title))
                    .style(Theme::list_item(i == session.option_list.selected))
            })
            .collect();
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border_focused())
                .title(Span::styled(" LANGUAGE ", Theme::heading())),
        );
        frame.render_widget(list, chunks[2]);
    }
}

fn render_series(frame: &mut Frame, area: Rect, series: &SeriesSelector) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .split(area);

    let specs = [
        (SelectColumn::Season, " SEASON ", series.season, "No seasons"),
        (SelectColumn::Episode, " EPISODE ", series.episode, "Pick a season"),
        (SelectColumn::Language, " LANGUAGE ", series.language, "Pick an episode"),
    ];

    for (rect, (column, title, picked, empty)) in columns.iter().zip(specs) {
        let focused = series.column == column;
        let entries = series.column_entries(column);
        let cursor = series.cursor_of(column);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if focused {
                Theme::border_focused()
            } else {
                Theme::border()
            })
            .title(Span::styled(title, Theme::heading()));

        if entries.is_empty() {
            frame.render_widget(
                Paragraph::new(empty).style(Theme::dimmed()).block(block),
                *rect,
            );
            continue;
        }

        let items: Vec<ListItem> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if focused && i == cursor {
                    Theme::list_item(true)
                } else if picked == Some(i) {
                    Theme::picked()
                } else {
                    Theme::list_item(false)
                };
                ListItem::new(format!(" {} ", entry.title)).style(style)
            })
            .collect();
        frame.render_widget(List::new(items).block(block), *rect);
    }
}
