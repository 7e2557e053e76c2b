//! Full-screen programs launched by `pacman`, `vim` and `post edit`.
//!
//! Each one owns the line editor until it returns; the caller then reports
//! the exit to the session.

use std::io::Write;

use crossterm::style::Stylize;
use foliosh_core::models::Post;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use super::{InputHelper, Palette};

pub type LineEditor = Editor<InputHelper, DefaultHistory>;

const PACMAN_ART: &str = r"
   .--.
  / _.-'   .  .  .  .  .
  \  '-.
   '--'    ᗣ       ᗣ
";

/// How the post editor was left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorAction {
    Save(String),
    Cancel,
}

/// `None` when the user pressed Ctrl-C or Ctrl-D.
fn read(rl: &mut LineEditor, prompt: &str) -> anyhow::Result<Option<String>> {
    match rl.readline(prompt) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn minigame(rl: &mut LineEditor, out: &mut impl Write, palette: &Palette) -> anyhow::Result<()> {
    writeln!(out, "{}", PACMAN_ART.with(palette.highlight))?;
    writeln!(out, "{}", "Press Enter to quit.".with(palette.dim))?;
    read(rl, "")?;
    Ok(())
}

fn is_quit(command: &str) -> bool {
    matches!(command, "q" | "q!" | "wq" | "x" | "quit")
}

/// Numbered file content, `vim` style.
pub fn numbered(content: &str, palette: &Palette) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let width = lines.len().to_string().len();
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            format!(
                "{} {}",
                format!("{:>width$}", i + 1, width = width).with(palette.dim),
                line
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn view_file(
    rl: &mut LineEditor,
    out: &mut impl Write,
    palette: &Palette,
    filename: &str,
    content: &str,
) -> anyhow::Result<()> {
    writeln!(out, "{}", numbered(content, palette))?;
    writeln!(
        out,
        "{}",
        format!("\"{}\" {}L [readonly]  :q to quit", filename, content.lines().count())
            .with(palette.dim)
    )?;
    out.flush()?;

    while let Some(line) = read(rl, ":")? {
        let command = line.trim().trim_start_matches(':');
        if is_quit(command) {
            break;
        }
        if !command.is_empty() {
            writeln!(out, "{}", format!("E492: Not an editor command: {}", command).with(palette.error))?;
        }
    }
    Ok(())
}

/// Collect replacement content for `post` line by line. A lone `.` saves,
/// `:q` cancels.
pub fn edit_post(
    rl: &mut LineEditor,
    out: &mut impl Write,
    palette: &Palette,
    post: &Post,
) -> anyhow::Result<EditorAction> {
    writeln!(out, "{}", format!("Editing \"{}\" ({})", post.title, post.slug).with(palette.accent).bold())?;
    if let Some(current) = post.content.as_deref().filter(|c| !c.is_empty()) {
        writeln!(out, "{}", "Current content:".with(palette.dim))?;
        writeln!(out, "{}", numbered(current, palette))?;
    }
    writeln!(
        out,
        "{}",
        "Type the new content. A line with a single '.' saves, ':q' cancels.".with(palette.dim)
    )?;
    out.flush()?;

    let mut buffer: Vec<String> = Vec::new();
    loop {
        let Some(line) = read(rl, "| ")? else {
            return Ok(EditorAction::Cancel);
        };
        match line.as_str() {
            "." => return Ok(EditorAction::Save(buffer.join("\n"))),
            ":q" | ":q!" => return Ok(EditorAction::Cancel),
            _ => buffer.push(line),
        }
    }
}
