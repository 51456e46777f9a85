//! Movie cards
//!
//! A card shows the poster indicator, title, year, optional rating/runtime
//! and first genre, and the favorite marker. Cards are laid out either as a
//! single scrolling row (home shelves) or as a grid (search, favorites).

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::models::MovieItem;
use crate::ui::Theme;

/// Card size in cells, borders included
pub const CARD_WIDTH: u16 = 26;
pub const CARD_HEIGHT: u16 = 7;

/// Text shown in place of a missing poster
pub const NO_POSTER: &str = "[ no poster ]";

/// Content lines of a card
pub fn card_lines(item: &MovieItem, favorite: bool) -> Vec<Line<'static>> {
    let poster = match item.poster_url() {
        Some(_) => Line::from(Span::styled("▣ poster", Theme::dimmed())),
        None => Line::from(Span::styled(NO_POSTER, Theme::poster())),
    };

    let mut meta = vec![Span::styled(item.year.clone(), Theme::year())];
    if let Some(rating) = item.rating() {
        meta.push(Span::styled(" ★ ", Theme::rating()));
        meta.push(Span::styled(rating.to_string(), Theme::rating()));
    }
    if let Some(runtime) = item.runtime() {
        meta.push(Span::styled(" · ", Theme::dimmed()));
        meta.push(Span::styled(runtime.to_string(), Theme::duration()));
    }

    let genre = item
        .first_genre()
        .map(|g| Line::from(Span::styled(g.to_string(), Theme::genre())))
        .unwrap_or_default();

    let marker = if favorite { "♥ saved" } else { "♡ f:save" };
    let actions = Line::from(vec![
        Span::styled(marker, Theme::favorite(favorite)),
        Span::styled("  i:info", Theme::keybind_desc()),
    ]);

    vec![
        poster,
        Line::from(Span::styled(item.title.clone(), Theme::title())),
        Line::from(meta),
        genre,
        actions,
    ]
}

/// Render one card
pub fn render_card(frame: &mut Frame, area: Rect, item: &MovieItem, selected: bool, favorite: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(Theme::card_border(selected))
        .style(Theme::card(selected));

    let card = Paragraph::new(card_lines(item, favorite)).block(block);
    frame.render_widget(card, area);
}

/// First index to draw so that `selected` stays visible
fn scroll_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 {
        0
    } else {
        selected.saturating_sub(visible - 1)
    }
}

/// Render items as a single horizontal row
pub fn render_row(
    frame: &mut Frame,
    area: Rect,
    items: &[MovieItem],
    selected: Option<usize>,
    is_favorite: impl Fn(&str) -> bool,
) {
    let visible = (area.width / CARD_WIDTH).max(1) as usize;
    let offset = scroll_offset(selected.unwrap_or(0), visible);

    for (slot, (index, item)) in items.iter().enumerate().skip(offset).take(visible).enumerate() {
        let x = area.x + slot as u16 * CARD_WIDTH;
        let width = CARD_WIDTH.min(area.right().saturating_sub(x));
        let rect = Rect::new(x, area.y, width, CARD_HEIGHT.min(area.height));
        render_card(frame, rect, item, selected == Some(index), is_favorite(&item.imdb_id));
    }
}

/// Render items as a grid, scrolled by rows
pub fn render_grid(
    frame: &mut Frame,
    area: Rect,
    items: &[MovieItem],
    selected: usize,
    is_favorite: impl Fn(&str) -> bool,
) {
    let columns = (area.width / CARD_WIDTH).max(1) as usize;
    let rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let first_row = scroll_offset(selected / columns, rows);

    for (index, item) in items.iter().enumerate().skip(first_row * columns) {
        let row = index / columns - first_row;
        if row >= rows {
            break;
        }
        let col = index % columns;
        let x = area.x + col as u16 * CARD_WIDTH;
        let y = area.y + row as u16 * CARD_HEIGHT;
        let rect = Rect::new(
            x,
            y,
            CARD_WIDTH.min(area.right().saturating_sub(x)),
            CARD_HEIGHT.min(area.bottom().saturating_sub(y)),
        );
        render_card(frame, rect, item, index == selected, is_favorite(&item.imdb_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_card_shows_optional_fields() {
        let item = MovieItem {
            imdb_id: "tt1375666".into(),
            title: "Inception".into(),
            year: "2010".into(),
            poster: "https://img/inception.jpg".into(),
            imdb_rating: Some("8.8".into()),
            runtime: Some("148 min".into()),
            genre: Some("Action, Sci-Fi".into()),
            ..Default::default()
        };
        let card = text(&card_lines(&item, true));
        assert!(card.contains("Inception"));
        assert!(card.contains("2010 ★ 8.8 · 148 min"));
        assert!(card.contains("Action"));
        assert!(!card.contains("Sci-Fi"));
        assert!(card.contains("♥ saved"));
        assert!(!card.contains(NO_POSTER));
    }

    #[test]
    fn test_card_placeholder_for_missing_poster() {
        let item = MovieItem {
            imdb_id: "tt1".into(),
            title: "Obscure".into(),
            year: "1999".into(),
            poster: "N/A".into(),
            imdb_rating: Some("N/A".into()),
            ..Default::default()
        };
        let card = text(&card_lines(&item, false));
        assert!(card.contains(NO_POSTER));
        assert!(!card.contains('★'));
        assert!(card.contains("♡ f:save"));
    }

    #[test]
    fn test_scroll_offset_keeps_selection_visible() {
        assert_eq!(scroll_offset(0, 3), 0);
        assert_eq!(scroll_offset(2, 3), 0);
        assert_eq!(scroll_offset(5, 3), 3);
    }
}
