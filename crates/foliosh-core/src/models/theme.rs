//! Terminal color palettes.

use std::fmt;
use std::str::FromStr;

/// One of the fixed terminal palettes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    TokyoNight,
    Dracula,
    Gruvbox,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::TokyoNight, Theme::Dracula, Theme::Gruvbox];

    pub fn name(self) -> &'static str {
        match self {
            Self::TokyoNight => "tokyonight",
            Self::Dracula => "dracula",
            Self::Gruvbox => "gruvbox",
        }
    }

    /// Comma-separated list of every palette name.
    pub fn available() -> String {
        Self::ALL.map(Theme::name).join(", ")
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error returned when a theme name is not one of [`Theme::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Theme '{0}' not found. Available themes: {available}", available = Theme::available())]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}
