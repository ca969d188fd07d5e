//! Board colors.
//!
//! Tiles must stay readable at a glance from a distance, so both palettes keep
//! strong contrast between a tile, a hovered tile and the dwell fill.
//! `ThemeMode::Auto` follows the OS setting.

use ratatui::style::Color;

use crate::config::ThemeMode;

/// Semantic colors used by every widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Screen background
    pub background: Color,
    /// Idle tile and key background
    pub tile: Color,
    /// Background of the tile under the pointer
    pub tile_hover: Color,
    /// Dwell progress bar drawn over a pending tile
    pub dwell_fill: Color,
    /// Borders and section titles
    pub primary: Color,
    /// Key hints and small highlights
    pub accent: Color,
    /// Active tab and selected option
    pub selected: Color,
    /// Borders of the other tabs
    pub tab_idle: Color,

    /// Tile labels and body text
    pub text: Color,
    /// Labels and status text
    pub text_secondary: Color,
    /// Hints
    pub text_muted: Color,

    /// Last spoken phrase
    pub success: Color,
    /// Edit mode badge
    pub warning: Color,
    /// Error overlay and messages
    pub error: Color,
}

impl Theme {
    /// Resolves a configured theme mode, asking the OS for `Auto`.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
            ThemeMode::Auto => match dark_light::detect() {
                Ok(dark_light::Mode::Light) => Self::light(),
                Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => Self::dark(),
            },
        }
    }

    /// Light text on dark tiles.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            background: Color::Black,
            tile: Color::Rgb(28, 32, 40),
            tile_hover: Color::Rgb(40, 60, 90),
            dwell_fill: Color::Rgb(0, 150, 110),
            primary: Color::Cyan,
            accent: Color::Yellow,
            selected: Color::Yellow,
            tab_idle: Color::Gray,

            text: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }

    /// Dark text on pale tiles.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            background: Color::White,
            tile: Color::Rgb(242, 242, 238),
            tile_hover: Color::Rgb(200, 220, 245),
            dwell_fill: Color::Rgb(120, 200, 160),
            primary: Color::Blue,
            accent: Color::Rgb(180, 100, 0),
            selected: Color::Rgb(180, 100, 0),
            tab_idle: Color::Rgb(170, 170, 170),

            text: Color::Black,
            text_secondary: Color::Rgb(60, 60, 60),
            text_muted: Color::Rgb(110, 110, 110),

            success: Color::Rgb(0, 120, 0),
            warning: Color::Rgb(200, 100, 0),
            error: Color::Red,
        }
    }
}
