//! Home view: one horizontal shelf of cards per curated query

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::{App, LoadingState, Shelf};
use crate::ui::card::{render_row, CARD_HEIGHT};
use crate::ui::Theme;

/// Rows used by one shelf: heading plus a row of cards
const SHELF_HEIGHT: u16 = CARD_HEIGHT + 2;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let shelves = &app.home.shelves;
    if shelves.is_empty() {
        return;
    }

    // Keep the selected shelf on screen
    let visible = (area.height / SHELF_HEIGHT).max(1) as usize;
    let offset = app.home.selected.saturating_sub(visible - 1);

    for (slot, (index, shelf)) in shelves.iter().enumerate().skip(offset).take(visible).enumerate() {
        let y = area.y + slot as u16 * SHELF_HEIGHT;
        let height = SHELF_HEIGHT.min(area.bottom().saturating_sub(y));
        let rect = Rect::new(area.x, y, area.width, height);
        render_shelf(frame, rect, app, shelf, index == app.home.selected);
    }
}

fn render_shelf(frame: &mut Frame, area: Rect, app: &App, shelf: &Shelf, focused: bool) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(format!(" {} ", shelf.title), Theme::heading()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &shelf.loading {
        LoadingState::Loading(_) => {
            let loading = Paragraph::new("⟳ Loading...").style(Theme::loading());
            frame.render_widget(loading, inner);
        }
        LoadingState::Error(message) => {
            let error = Paragraph::new(message.as_str()).style(Theme::error());
            frame.render_widget(error, inner);
        }
        LoadingState::Idle => {
            let selected = focused.then_some(shelf.list.selected);
            render_row(frame, inner, &shelf.items, selected, |id| app.is_favorite(id));
        }
    }
}
