//! ANSI colors for the terminal palettes.

use crossterm::style::Color;
use foliosh_core::models::Theme;

const fn rgb(hex: u32) -> Color {
    Color::Rgb {
        r: (hex >> 16) as u8,
        g: (hex >> 8) as u8,
        b: hex as u8,
    }
}

/// Semantic colors used by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub dim: Color,
    /// Prompt, headings, ASCII art
    pub accent: Color,
    pub directory: Color,
    pub success: Color,
    /// `grep` matches
    pub highlight: Color,
    pub error: Color,
}

impl Palette {
    pub const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::TokyoNight => Self {
                fg: rgb(0xc0caf5),
                dim: rgb(0x565f89),
                accent: rgb(0x7aa2f7),
                directory: rgb(0x7dcfff),
                success: rgb(0x9ece6a),
                highlight: rgb(0xe0af68),
                error: rgb(0xf7768e),
            },
            Theme::Dracula => Self {
                fg: rgb(0xf8f8f2),
                dim: rgb(0x6272a4),
                accent: rgb(0xbd93f9),
                directory: rgb(0x8be9fd),
                success: rgb(0x50fa7b),
                highlight: rgb(0xf1fa8c),
                error: rgb(0xff5555),
            },
            Theme::Gruvbox => Self {
                fg: rgb(0xebdbb2),
                dim: rgb(0x928374),
                accent: rgb(0x83a598),
                directory: rgb(0x8ec07c),
                success: rgb(0xb8bb26),
                highlight: rgb(0xfabd2f),
                error: rgb(0xfb4934),
            },
        }
    }
}
