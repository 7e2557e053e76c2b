//! Command registry and dispatch.
//!
//! This module provides:
//! - [`Registry`] of named commands, each tagged with its calling convention
//! - [`CommandOutput`] and [`Directive`] returned by handlers
//! - [`dispatch`] for tokenizing and executing a line
//!
//! # Architecture
//!
//! Every registered command carries a [`Handler`] fixed at registration
//! time. [`Handler::Plain`] commands receive their arguments only;
//! [`Handler::FilesystemAware`] commands additionally receive an
//! [`FsContext`] through which they read and change the working directory.

mod auth;
mod execute;
mod files;
mod info;
mod posts;
mod result;

pub use auth::complete_auth;
pub use info::welcome_banner;
pub use execute::{FsContext, Services, dispatch, execute};
pub use result::{AuthAction, AuthKind, CommandOutput, Directive, Dispatch};

// =============================================================================
// Handlers
// =============================================================================

/// Commands that take arguments only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlainCommand {
    Help,
    Welcome,
    About,
    Contact,
    Date,
    Echo,
    Clear,
    Signup,
    Login,
    Logout,
    Whoami,
    Blog,
    Post,
    Theme,
    Guestbook,
    Neofetch,
    Tutorial,
    Pacman,
}

/// Commands that take arguments plus the working-directory context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FsCommand {
    Projects,
    Ls,
    Cd,
    Cat,
    Pwd,
    Grep,
    Vim,
}

/// Calling convention of a registered command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handler {
    Plain(PlainCommand),
    FilesystemAware(FsCommand),
}

/// Where a command is listed in `help`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    General,
    FileSystem,
}

// =============================================================================
// Registry
// =============================================================================

/// A registered command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    /// Invocation shown in `help`, e.g. `cat [file]`
    pub usage: &'static str,
    pub summary: &'static str,
    pub section: Section,
    pub handler: Handler,
}

/// Name to handler mapping, kept in registration order.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: Vec<CommandSpec>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in command.
    pub fn builtin() -> Self {
        use FsCommand as F;
        use PlainCommand as P;
        use Section::{FileSystem, General};

        let builtins = [
            ("help", "help", "Show this help message.", General, Handler::Plain(P::Help)),
            ("welcome", "welcome", "Display the welcome banner.", General, Handler::Plain(P::Welcome)),
            ("about", "about", "Display information about me (or use `cat about.txt`).", General, Handler::Plain(P::About)),
            ("projects", "projects", "Navigate to projects directory.", General, Handler::FilesystemAware(F::Projects)),
            ("contact", "contact", "Show my contact information (or use `cat contact.txt`).", General, Handler::Plain(P::Contact)),
            ("date", "date", "Display the current date and time.", General, Handler::Plain(P::Date)),
            ("echo", "echo [text]", "Print text to the terminal.", General, Handler::Plain(P::Echo)),
            ("clear", "clear", "Clear the terminal screen.", General, Handler::Plain(P::Clear)),
            ("signup", "signup [email]", "Create a new account.", General, Handler::Plain(P::Signup)),
            ("login", "login [email]", "Log in to an account.", General, Handler::Plain(P::Login)),
            ("logout", "logout", "Log out from the current account.", General, Handler::Plain(P::Logout)),
            ("whoami", "whoami", "Display the current user.", General, Handler::Plain(P::Whoami)),
            ("blog", "blog", "View published blog posts (or visit /blog).", General, Handler::Plain(P::Blog)),
            ("post", "post [subcommand]", "Manage posts. Try 'post list', 'post show [slug]', 'post edit [slug]'.", General, Handler::Plain(P::Post)),
            ("theme", "theme <name>", "Switch the terminal color theme.", General, Handler::Plain(P::Theme)),
            ("guestbook", "guestbook", "Where to find the guestbook.", General, Handler::Plain(P::Guestbook)),
            ("neofetch", "neofetch", "Display system information.", General, Handler::Plain(P::Neofetch)),
            ("ls", "ls [path]", "List files and directories.", FileSystem, Handler::FilesystemAware(F::Ls)),
            ("cd", "cd [path]", "Change directory (e.g., `cd projects`, `cd ..`).", FileSystem, Handler::FilesystemAware(F::Cd)),
            ("cat", "cat [file]", "Display file content.", FileSystem, Handler::FilesystemAware(F::Cat)),
            ("pwd", "pwd", "Print name of current/working directory.", FileSystem, Handler::FilesystemAware(F::Pwd)),
            ("tutorial", "tutorial", "Start an interactive tutorial.", General, Handler::Plain(P::Tutorial)),
            ("grep", "grep [pattern] [file]", "Search for a pattern in a file.", FileSystem, Handler::FilesystemAware(F::Grep)),
            ("pacman", "pacman", "Play a game of Pac-Man.", General, Handler::Plain(P::Pacman)),
            ("vim", "vim [file]", "Open a file in a simulated Vim editor.", FileSystem, Handler::FilesystemAware(F::Vim)),
        ];

        let mut registry = Self::new();
        for (name, usage, summary, section, handler) in builtins {
            registry.register(CommandSpec {
                name,
                usage,
                summary,
                section,
                handler,
            });
        }
        registry
    }

    /// Add a command. A command with the same name is replaced in place.
    pub fn register(&mut self, spec: CommandSpec) {
        match self.entries.iter_mut().find(|e| e.name == spec.name) {
            Some(existing) => {
                tracing::debug!(name = spec.name, "replacing registered command");
                *existing = spec;
            }
            None => self.entries.push(spec),
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// All commands in registration order.
    pub fn entries(&self) -> &[CommandSpec] {
        &self.entries
    }

    /// Names starting with `prefix`, in registration order.
    pub fn names_with_prefix(&self, prefix: &str) -> Vec<&'static str> {
        self.entries
            .iter()
            .map(|e| e.name)
            .filter(|name| name.starts_with(prefix))
            .collect()
    }

    /// Commands listed under `section`.
    pub fn section(&self, section: Section) -> impl Iterator<Item = &CommandSpec> {
        self.entries.iter().filter(move |e| e.section == section)
    }
}
