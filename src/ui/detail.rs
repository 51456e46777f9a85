//! Read-only info panel for one title

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::app::InfoState;
use crate::models::MovieItem;
use crate::ui::{centered_rect, Theme};

/// Detail lines; awards and box office only when available
pub fn info_lines(item: &MovieItem) -> Vec<Line<'static>> {
    let row = |label: &'static str, value: Option<&str>| -> Option<Line<'static>> {
        value.map(|v| {
            Line::from(vec![
                Span::styled(format!("{:<10}", label), Theme::keybind_desc()),
                Span::styled(v.to_string(), Theme::text()),
            ])
        })
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(item.title.clone(), Theme::title()),
            Span::styled(format!(" ({})", item.year), Theme::year()),
        ]),
        Line::from(""),
    ];

    let rating = item.rating().map(|r| format!("★ {}", r));
    lines.extend(
        [
            row("Type", Some(&item.media_type.to_string())),
            row("Rated", item.rated.as_deref()),
            row("Genre", item.genre.as_deref()),
            row("Runtime", item.runtime.as_deref()),
            row("Rating", rating.as_deref()),
            row("Director", item.director.as_deref()),
            row("Actors", item.actors.as_deref()),
            row("Awards", item.awards()),
            row("Box office", item.box_office()),
        ]
        .into_iter()
        .flatten(),
    );

    if let Some(plot) = item.plot.as_deref() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(plot.to_string(), Theme::text())));
    }
    lines
}

pub fn render(frame: &mut Frame, area: Rect, info: &InfoState) {
    let popup = centered_rect(70, 20, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Theme::border_focused())
        .title(Span::styled(" INFO ", Theme::title()))
        .title_bottom(Line::from(Span::styled(" Esc close ", Theme::keybind_desc())))
        .style(Theme::card(false));

    let content = match (&info.detail, info.loading.message()) {
        (Some(detail), _) => Paragraph::new(info_lines(detail)).style(Theme::text()),
        (None, Some(message)) if info.loading.is_error() => {
            Paragraph::new(message.to_string()).style(Theme::error())
        }
        _ => Paragraph::new("⟳ Loading...").style(Theme::loading()),
    };

    frame.render_widget(content.wrap(Wrap { trim: true }).block(block), popup);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flatten(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_info_skips_unavailable_awards() {
        let item = MovieItem {
            imdb_id: "tt1".into(),
            title: "Up".into(),
            year: "2009".into(),
            rated: Some("PG".into()),
            awards: Some("N/A".into()),
            box_office: Some("$293,004,164".into()),
            plot: Some("A balloon adventure.".into()),
            ..Default::default()
        };
        let text = flatten(&info_lines(&item));
        assert!(text.contains("Up (2009)"));
        assert!(text.contains("PG"));
        assert!(!text.contains("Awards"));
        assert!(text.contains("$293,004,164"));
        assert!(text.contains("A balloon adventure."));
    }
}
