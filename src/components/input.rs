//! Line editor integration.
//!
//! The session owns completion and history, so the editor's own history is
//! disabled. Tab asks [`Terminal::tab`], Up and Down are bound to
//! [`Terminal::history_up`] and [`Terminal::history_down`].

use std::borrow::Cow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crossterm::style::Stylize;
use foliosh_core::backend::MemoryBackend;
use foliosh_core::core::Terminal;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::{
    Cmd, ConditionalEventHandler, Context, Event, EventContext, Helper, Hinter, Movement,
    RepeatCount, Validator,
};
use tokio::runtime::Runtime;

use super::Palette;

/// Session shared between the main loop and editor callbacks.
pub type SharedTerminal = Arc<Mutex<Terminal<MemoryBackend>>>;

/// Lock the session. A panic while holding the lock does not leave the
/// session in a torn state, so poisoning is ignored.
pub fn lock(terminal: &SharedTerminal) -> MutexGuard<'_, Terminal<MemoryBackend>> {
    terminal.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Helper, Hinter, Validator)]
pub struct InputHelper {
    terminal: SharedTerminal,
    runtime: Arc<Runtime>,
    /// Replace typed characters with `*`
    pub masking: bool,
}

impl InputHelper {
    pub fn new(terminal: SharedTerminal, runtime: Arc<Runtime>) -> Self {
        Self {
            terminal,
            runtime,
            masking: false,
        }
    }
}

impl Completer for InputHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let typed = &line[..pos];
        let mut terminal = lock(&self.terminal);
        terminal.set_input(typed);
        self.runtime.block_on(terminal.tab());

        if terminal.input() != typed {
            let replacement = terminal.input().to_string();
            return Ok((
                0,
                vec![Pair {
                    display: replacement.clone(),
                    replacement,
                }],
            ));
        }

        // Candidates insert nothing; the editor only lists them
        let listed = terminal
            .suggestions()
            .iter()
            .map(|s| Pair {
                display: s.clone(),
                replacement: String::new(),
            })
            .collect();
        Ok((pos, listed))
    }
}

impl Highlighter for InputHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.masking {
            Cow::Owned("*".repeat(line.chars().count()))
        } else {
            Cow::Borrowed(line)
        }
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(&'s self, prompt: &'p str, _default: bool) -> Cow<'b, str> {
        let palette = Palette::for_theme(lock(&self.terminal).theme());
        Cow::Owned(prompt.with(palette.accent).to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        self.masking
    }
}

#[derive(Clone, Copy, Debug)]
pub enum HistoryDirection {
    Older,
    Newer,
}

/// Up/Down binding that browses the session history.
pub struct HistoryKey {
    terminal: SharedTerminal,
    direction: HistoryDirection,
}

impl HistoryKey {
    pub fn new(terminal: SharedTerminal, direction: HistoryDirection) -> Self {
        Self { terminal, direction }
    }
}

impl ConditionalEventHandler for HistoryKey {
    fn handle(&self, _evt: &Event, _n: RepeatCount, _positive: bool, ctx: &EventContext) -> Option<Cmd> {
        let mut terminal = lock(&self.terminal);
        if terminal.history().cursor().is_none() {
            terminal.set_input(ctx.line());
        }
        match self.direction {
            HistoryDirection::Older => terminal.history_up(),
            HistoryDirection::Newer => terminal.history_down(),
        }
        if terminal.input() == ctx.line() {
            return Some(Cmd::Noop);
        }
        Some(Cmd::Replace(Movement::WholeLine, Some(terminal.input().to_string())))
    }
}
