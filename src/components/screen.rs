//! Scrollback renderer.
//!
//! The line editor already shows what the user typed, so input echoes are
//! skipped and only output and system lines are printed. Lines are written
//! once, tracked by id; a new screen epoch clears the display.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Print, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};
use foliosh_core::backend::Backend;
use foliosh_core::core::Terminal;
use foliosh_core::models::{Block, LineData, LineRole, OutputLine, Rich, TextStyle};

use super::Palette;

#[derive(Debug, Default)]
pub struct Screen {
    last_id: Option<usize>,
    epoch: u64,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print every line added since the previous call.
    pub fn render<B: Backend>(&mut self, out: &mut impl Write, terminal: &Terminal<B>) -> io::Result<()> {
        if terminal.screen_epoch() != self.epoch {
            self.epoch = terminal.screen_epoch();
            self.last_id = None;
            execute!(out, Clear(ClearType::All), Clear(ClearType::Purge), MoveTo(0, 0))?;
        }

        let palette = Palette::for_theme(terminal.theme());
        for line in terminal.lines() {
            if self.last_id.is_some_and(|id| line.id <= id) {
                continue;
            }
            self.last_id = Some(line.id);
            if line.role == LineRole::Input {
                continue;
            }
            queue!(out, Print(render_line(line, &palette)), Print("\n"))?;
        }
        out.flush()
    }
}

/// ANSI-styled text for one scrollback line.
pub fn render_line(line: &OutputLine, palette: &Palette) -> String {
    match &line.data {
        LineData::Prompt { prompt, input } => {
            format!("{} {}", prompt.as_str().with(palette.accent), input.as_str().with(palette.fg))
        }
        LineData::Text(text) if line.role == LineRole::System => {
            text.as_str().with(palette.dim).to_string()
        }
        LineData::Text(text) => text.as_str().with(palette.fg).to_string(),
        LineData::Rich(rich) => render_rich(rich, palette),
    }
}

fn render_rich(rich: &Rich, palette: &Palette) -> String {
    rich.blocks()
        .iter()
        .map(|block| render_block(block, palette))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_block(block: &Block, palette: &Palette) -> String {
    match block {
        Block::Text(s) | Block::Pre(s) => s.as_str().with(palette.fg).to_string(),
        Block::Success(s) => s.as_str().with(palette.success).to_string(),
        Block::Heading(s) => s.as_str().with(palette.accent).bold().to_string(),
        Block::Ascii(s) => s.as_str().with(palette.accent).to_string(),
        Block::Pairs { pairs, separator } => {
            let width = pairs.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
            pairs
                .iter()
                .map(|(key, value)| {
                    format!(
                        "  {}{}{}",
                        format!("{:<width$}", key, width = width).with(palette.accent),
                        (*separator).with(palette.dim),
                        value.as_str().with(palette.fg)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
        Block::Listing(entries) => entries
            .iter()
            .map(|entry| match entry.style {
                TextStyle::Directory => entry.name.as_str().with(palette.directory).bold().to_string(),
                TextStyle::File => entry.name.as_str().with(palette.fg).to_string(),
                TextStyle::Hidden => entry.name.as_str().with(palette.dim).to_string(),
            })
            .collect::<Vec<_>>()
            .join("  "),
        Block::Matches(lines) => lines
            .iter()
            .map(|spans| {
                spans
                    .iter()
                    .map(|span| {
                        if span.highlighted {
                            span.text.as_str().with(palette.highlight).bold().to_string()
                        } else {
                            span.text.as_str().with(palette.fg).to_string()
                        }
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
