//! Terminal-related data types for scrollback rendering.

use std::fmt;

/// Who produced a scrollback line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineRole {
    /// Echo of something the user submitted
    Input,
    /// Result of a command
    Output,
    /// Messages from the terminal itself (welcome banner, sub-program exits)
    System,
}

/// Text styling for file listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextStyle {
    /// Directory entries
    Directory,
    /// Regular file entries
    File,
    /// Hidden files (dimmed)
    Hidden,
}

/// One name in an `ls` listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListEntry {
    pub name: String,
    pub style: TextStyle,
}

/// A run of text inside a `grep` match, possibly highlighted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub highlighted: bool,
}

/// A structured piece of display content.
///
/// The view layer decides colors and layout; [`fmt::Display`] gives the
/// plain-text fallback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// Plain paragraph
    Text(String),
    /// Confirmation text (green)
    Success(String),
    /// Section heading (bold)
    Heading(String),
    /// ASCII art (banner, logos)
    Ascii(String),
    /// Preformatted file content
    Pre(String),
    /// Aligned `key<separator>value` rows (help listing, contact card)
    Pairs {
        pairs: Vec<(String, String)>,
        separator: &'static str,
    },
    /// Directory listing
    Listing(Vec<ListEntry>),
    /// Matching lines with highlighted spans
    Matches(Vec<Vec<Span>>),
}

/// Rich display element: an ordered list of blocks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rich {
    blocks: Vec<Block>,
}

impl Rich {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style push.
    pub fn with(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Builder-style paragraph push.
    pub fn text(self, s: impl Into<String>) -> Self {
        self.with(Block::Text(s.into()))
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn extend(&mut self, other: Rich) {
        self.blocks.extend(other.blocks);
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl From<Block> for Rich {
    fn from(block: Block) -> Self {
        Self {
            blocks: vec![block],
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) | Self::Success(s) | Self::Heading(s) | Self::Ascii(s) | Self::Pre(s) => {
                write!(f, "{}", s)
            }
            Self::Pairs { pairs, separator } => {
                let width = pairs.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
                let rows: Vec<String> = pairs
                    .iter()
                    .map(|(k, v)| format!("  {:<width$}{}{}", k, separator, v, width = width))
                    .collect();
                write!(f, "{}", rows.join("\n"))
            }
            Self::Listing(entries) => {
                let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
                write!(f, "{}", names.join("  "))
            }
            Self::Matches(lines) => {
                let rendered: Vec<String> = lines
                    .iter()
                    .map(|spans| spans.iter().map(|s| s.text.as_str()).collect())
                    .collect();
                write!(f, "{}", rendered.join("\n"))
            }
        }
    }
}

impl fmt::Display for Rich {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", block)?;
        }
        Ok(())
    }
}

/// The content of a scrollback line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineData {
    /// Echoed prompt with the submitted input (already masked for passwords)
    Prompt { prompt: String, input: String },
    /// Literal text output
    Text(String),
    /// Structured output
    Rich(Rich),
}

impl fmt::Display for LineData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prompt { prompt, input } if input.is_empty() => write!(f, "{}", prompt),
            Self::Prompt { prompt, input } => write!(f, "{} {}", prompt, input),
            Self::Text(s) => write!(f, "{}", s),
            Self::Rich(r) => write!(f, "{}", r),
        }
    }
}

/// A single line of scrollback with a session-unique ID.
#[derive(Clone, Debug)]
pub struct OutputLine {
    /// Increasing ID for efficient keying by the renderer
    pub id: usize,
    pub role: LineRole,
    pub data: LineData,
}

impl OutputLine {
    pub fn new(id: usize, role: LineRole, data: LineData) -> Self {
        Self { id, role, data }
    }
}

impl PartialEq for OutputLine {
    fn eq(&self, other: &Self) -> bool {
        // Only compare content, not ID
        self.role == other.role && self.data == other.data
    }
}
