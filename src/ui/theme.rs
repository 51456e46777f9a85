//! Neon theme for cinetui
//!
//! Color palette and style helpers shared by every view.

use ratatui::style::{Color, Modifier, Style};

/// Color palette and styles
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #0a0a0f
    pub const BACKGROUND: Color = Color::Rgb(0x0a, 0x0a, 0x0f);

    /// Primary: #00fff2 (cyan neon)
    pub const PRIMARY: Color = Color::Rgb(0x00, 0xff, 0xf2);

    /// Secondary: #ff00ff (magenta)
    pub const SECONDARY: Color = Color::Rgb(0xff, 0x00, 0xff);

    /// Accent: #ffff00 (yellow), used for ratings
    pub const ACCENT: Color = Color::Rgb(0xff, 0xff, 0x00);

    /// Highlight: #ff0080 (hot pink), used for favorites
    pub const HIGHLIGHT: Color = Color::Rgb(0xff, 0x00, 0x80);

    pub const TEXT: Color = Color::Rgb(0xe0, 0xe0, 0xe0);
    pub const DIM: Color = Color::Rgb(0x40, 0x40, 0x50);
    pub const SUCCESS: Color = Color::Rgb(0x00, 0xff, 0x00);
    pub const WARNING: Color = Color::Rgb(0xff, 0xaa, 0x00);
    pub const ERROR: Color = Color::Rgb(0xff, 0x00, 0x40);

    // ═══════════════════════════════════════════════════════════════════════
    // DERIVED COLORS
    // ═══════════════════════════════════════════════════════════════════════

    /// Card and modal background
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x14, 0x14, 0x1e);

    /// Selected card background
    pub const BACKGROUND_HOVER: Color = Color::Rgb(0x1e, 0x1e, 0x2d);

    pub const BORDER: Color = Color::Rgb(0x00, 0x80, 0x78);
    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Shelf / section heading
    pub fn heading() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    pub fn loading() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::BORDER_FOCUSED)
    }

    /// Border for a card, brighter when selected
    pub fn card_border(selected: bool) -> Style {
        if selected {
            Self::border_focused().add_modifier(Modifier::BOLD)
        } else {
            Self::border()
        }
    }

    /// Card body
    pub fn card(selected: bool) -> Style {
        let bg = if selected {
            Self::BACKGROUND_HOVER
        } else {
            Self::BACKGROUND_LIGHT
        };
        Style::default().fg(Self::TEXT).bg(bg)
    }

    /// Poster placeholder text
    pub fn poster() -> Style {
        Style::default()
            .fg(Self::DIM)
            .bg(Self::BACKGROUND_LIGHT)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn year() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn genre() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    pub fn duration() -> Style {
        Style::default().fg(Self::TEXT)
    }

    /// Rating badge
    pub fn rating() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Favorite marker, filled or outlined
    pub fn favorite(active: bool) -> Style {
        if active {
            Style::default()
                .fg(Self::HIGHLIGHT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Self::DIM)
        }
    }

    /// Row of a selector list
    pub fn list_item(selected: bool) -> Style {
        if selected {
            Style::default()
                .fg(Self::BACKGROUND)
                .bg(Self::PRIMARY)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Self::TEXT)
        }
    }

    /// Option that has been picked but is not under the cursor
    pub fn picked() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Input field, brighter when focused
    pub fn input(focused: bool) -> Style {
        let fg = if focused { Self::PRIMARY } else { Self::TEXT };
        Style::default().fg(fg).bg(Self::BACKGROUND_LIGHT)
    }

    pub fn input_cursor() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::SLOW_BLINK)
    }

    /// Active tab in the header
    pub fn tab(active: bool) -> Style {
        if active {
            Style::default()
                .fg(Self::PRIMARY)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Self::DIM)
        }
    }

    pub fn keybind() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn keybind_desc() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }
}
