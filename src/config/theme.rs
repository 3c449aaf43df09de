//! Theme configuration options for fidx
//!
//! This module defines the `[theme]` table of fidx.toml. Every colour is a [ColorPair];
//! anything left at "default" falls back to the internal palette.

use crate::utils::parse_color;

use ratatui::style::{Color, Style};
use serde::Deserialize;

use std::sync::LazyLock;

const NORD_GREEN: Color = Color::Rgb(0xA3, 0xBE, 0x8C);
const NORD_FROST: Color = Color::Rgb(0x88, 0xC0, 0xD0);
const NORD_PURPLE: Color = Color::Rgb(0xB4, 0x8E, 0xAD);
const NORD_RED: Color = Color::Rgb(0xBF, 0x61, 0x6A);
const MUTED: Color = Color::Indexed(241);

/// Theme configuration options
/// # Examples
/// ```toml
/// [theme]
/// title.fg = "#A3BE8C"
/// selection.bg = "#3B4252"
/// error.fg = "red"
/// ```
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Theme {
    title: ColorPair,
    accent: ColorPair,
    border: ColorPair,
    path: ColorPair,
    selection: ColorPair,
    directory: ColorPair,
    help: ColorPair,
    error: ColorPair,
    success: ColorPair,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            title: ColorPair::fg(NORD_GREEN),
            accent: ColorPair::fg(NORD_FROST),
            border: ColorPair::fg(NORD_PURPLE),
            path: ColorPair::fg(NORD_PURPLE),
            selection: ColorPair {
                fg: NORD_GREEN,
                bg: Color::Indexed(236),
            },
            directory: ColorPair::fg(NORD_FROST),
            help: ColorPair::fg(MUTED),
            error: ColorPair::fg(NORD_RED),
            success: ColorPair::fg(NORD_GREEN),
        }
    }
}

impl Theme {
    /// Internal default theme, used for fallback when a colour is set to Reset.
    pub fn internal_defaults() -> &'static Self {
        static DEFAULT: LazyLock<Theme> = LazyLock::new(Theme::default);
        &DEFAULT
    }

    pub fn title_style(&self) -> Style {
        self.title.style_or(&Theme::internal_defaults().title)
    }

    pub fn accent_style(&self) -> Style {
        self.accent.style_or(&Theme::internal_defaults().accent)
    }

    pub fn border_style(&self) -> Style {
        self.border.style_or(&Theme::internal_defaults().border)
    }

    pub fn path_style(&self) -> Style {
        self.path.style_or(&Theme::internal_defaults().path)
    }

    pub fn selection_style(&self) -> Style {
        self.selection
            .style_or(&Theme::internal_defaults().selection)
    }

    pub fn directory_style(&self) -> Style {
        self.directory
            .style_or(&Theme::internal_defaults().directory)
    }

    pub fn help_style(&self) -> Style {
        self.help.style_or(&Theme::internal_defaults().help)
    }

    pub fn error_style(&self) -> Style {
        self.error.style_or(&Theme::internal_defaults().error)
    }

    pub fn success_style(&self) -> Style {
        self.success.style_or(&Theme::internal_defaults().success)
    }
}

/// ColorPair struct to hold foreground and background colors.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    #[serde(default, deserialize_with = "deserialize_color_field")]
    fg: Color,
    #[serde(default, deserialize_with = "deserialize_color_field")]
    bg: Color,
}

impl Default for ColorPair {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

impl ColorPair {
    const fn fg(fg: Color) -> Self {
        Self {
            fg,
            bg: Color::Reset,
        }
    }

    /// Resolves the ColorPair by replacing Reset colors with those from another ColorPair.
    pub fn resolve(&self, other: &ColorPair) -> Self {
        Self {
            fg: if self.fg == Color::Reset {
                other.fg
            } else {
                self.fg
            },
            bg: if self.bg == Color::Reset {
                other.bg
            } else {
                self.bg
            },
        }
    }

    /// Converts the ColorPair to a Style, falling back to the provided ColorPair for Reset colors.
    pub fn style_or(&self, fallback: &ColorPair) -> Style {
        let resolved = self.resolve(fallback);
        Style::default().fg(resolved.fg).bg(resolved.bg)
    }
}

fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}
