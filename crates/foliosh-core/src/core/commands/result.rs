//! Command execution result types.

use crate::models::{Block, Post, Rich, Theme};

/// Which credential flow a password prompt belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthKind {
    Login,
    Signup,
}

/// A pending login or signup waiting for its password.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthAction {
    pub kind: AuthKind,
    pub email: String,
}

/// Instruction from a command for the session to change mode or apply a
/// side effect. Commands never touch session state themselves.
#[derive(Clone, Debug, PartialEq)]
pub enum Directive {
    /// Treat the next submitted line as a password
    RequestPassword(AuthAction),
    SetTheme(Theme),
    StartTutorial,
    StartMinigame,
    StartFileViewer { filename: String, content: String },
    /// Open the post editor
    EditEntity(Post),
}

/// Value returned by a command handler.
#[derive(Clone, Debug, PartialEq)]
pub enum CommandOutput {
    /// Literal text; empty text appends nothing
    Text(String),
    Rich(Rich),
    /// Empty the scrollback
    Clear,
    Directive(Directive),
}

impl CommandOutput {
    /// Output that appends nothing.
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }
}

impl From<Rich> for CommandOutput {
    fn from(rich: Rich) -> Self {
        Self::Rich(rich)
    }
}

impl From<Block> for CommandOutput {
    fn from(block: Block) -> Self {
        Self::Rich(block.into())
    }
}

impl From<Directive> for CommandOutput {
    fn from(directive: Directive) -> Self {
        Self::Directive(directive)
    }
}

/// Outcome of dispatching one line.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Dispatch {
    /// `None` for blank input
    pub output: Option<CommandOutput>,
    /// New working directory requested by a filesystem-aware command
    pub cwd: Option<String>,
}
