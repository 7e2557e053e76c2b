//! Terminal session state machine.
//!
//! [`Terminal`] owns everything that changes while a visitor types: the
//! mode, working directory, scrollback, input buffer and history. Commands
//! only return values; the session is the single place that interprets
//! them.
//!
//! ```text
//! Normal --RequestPassword--> AwaitingPassword --(any line)--> Normal
//! Normal --StartTutorial----> Tutorial --(last step | exit)--> Normal
//! Normal --StartMinigame / StartFileViewer / EditEntity--> Subprogram --(exit)--> Normal
//! ```

use crate::backend::Backend;
use crate::config::{APP_HOST, GUEST_NAME, MAX_SCROLLBACK};
use crate::core::VirtualFs;
use crate::core::autocomplete;
use crate::core::commands::{
    self, AuthAction, CommandOutput, Directive, Registry, Services, complete_auth,
    welcome_banner,
};
use crate::core::history::InputHistory;
use crate::core::parser::parse_input;
use crate::core::tutorial::{self, Advance, Invocation};
use crate::models::{LineData, LineRole, OutputLine, Post, Rich, Site, Theme, User};
use crate::utils::RingBuffer;

/// A full-screen program that owns the keyboard until it exits.
#[derive(Clone, Debug, PartialEq)]
pub enum Subprogram {
    Minigame,
    FileViewer { filename: String, content: String },
    PostEditor(Post),
}

/// What the next submitted line means.
#[derive(Clone, Debug, PartialEq)]
pub enum Mode {
    Normal,
    /// The next line is a password for this action
    AwaitingPassword(AuthAction),
    Tutorial { step: usize },
    /// Line input and Tab are ignored
    Subprogram(Subprogram),
}

/// Prompt directory: `~` for the root, `~/<last segment>` elsewhere.
fn prompt_cwd(cwd: &str) -> String {
    match cwd.rsplit('/').find(|s| !s.is_empty()) {
        Some(last) => format!("~/{}", last),
        None => "~".to_string(),
    }
}

pub struct Terminal<B> {
    backend: B,
    site: Site,
    fs: VirtualFs,
    registry: Registry,
    mode: Mode,
    cwd: String,
    user: Option<User>,
    theme: Theme,
    lines: RingBuffer<OutputLine>,
    next_line_id: usize,
    screen_epoch: u64,
    input: String,
    suggestions: Vec<String>,
    history: InputHistory,
}

impl<B: Backend> Terminal<B> {
    /// New session at `/` showing the welcome banner.
    pub fn new(backend: B, site: Site) -> Self {
        let fs = VirtualFs::from_site(&site);
        let mut terminal = Self {
            backend,
            fs,
            registry: Registry::builtin(),
            mode: Mode::Normal,
            cwd: "/".to_string(),
            user: None,
            theme: Theme::default(),
            lines: RingBuffer::new(MAX_SCROLLBACK),
            next_line_id: 0,
            screen_epoch: 0,
            input: String::new(),
            suggestions: Vec::new(),
            history: InputHistory::new(),
            site,
        };
        let banner = welcome_banner(&terminal.site);
        terminal.push_line(LineRole::System, LineData::Rich(banner));
        terminal
    }

    /// Limit the scrollback to `capacity` lines.
    pub fn with_scrollback(mut self, capacity: usize) -> Self {
        let mut lines = RingBuffer::new(capacity);
        lines.extend(self.lines.iter().cloned());
        self.lines = lines;
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Apply a palette without printing anything (restored preferences).
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Scrollback, oldest first.
    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &OutputLine> + ExactSizeIterator {
        self.lines.iter()
    }

    /// Incremented whenever the scrollback is cleared.
    pub fn screen_epoch(&self) -> u64 {
        self.screen_epoch
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the input buffer. Visible suggestions are dismissed.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
        self.suggestions.clear();
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn history(&self) -> &InputHistory {
        &self.history
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn fs(&self) -> &VirtualFs {
        &self.fs
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Prompt for the current user, directory and mode.
    pub fn prompt(&self) -> String {
        if matches!(self.mode, Mode::AwaitingPassword(_)) {
            return "Password:".to_string();
        }
        let name = self.user.as_ref().map_or(GUEST_NAME, |u| u.display_name());
        format!("{}@{}:{}$", name, APP_HOST, prompt_cwd(&self.cwd))
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Refresh the signed-in user from the backend.
    pub async fn sync_user(&mut self) {
        self.user = self.backend.current_user().await;
    }

    /// Submit the input buffer.
    pub async fn submit(&mut self) {
        let line = std::mem::take(&mut self.input);
        self.submit_line(&line).await;
    }

    /// Submit `line` as if typed. Taking `&mut self` means a second line
    /// cannot start while this one is still awaiting the backend.
    pub async fn submit_line(&mut self, line: &str) {
        self.suggestions.clear();
        self.input.clear();

        match &self.mode {
            Mode::Subprogram(_) => {
                tracing::debug!("line ignored while a sub-program runs");
                return;
            }
            Mode::AwaitingPassword(action) => {
                let action = action.clone();
                self.submit_password(&action, line).await;
                return;
            }
            Mode::Normal | Mode::Tutorial { .. } => {}
        }

        let prompt = self.prompt();
        if line.trim().is_empty() {
            self.push_line(
                LineRole::Input,
                LineData::Prompt {
                    prompt,
                    input: String::new(),
                },
            );
            self.history.reset_cursor();
            return;
        }

        self.push_line(
            LineRole::Input,
            LineData::Prompt {
                prompt,
                input: line.to_string(),
            },
        );
        self.history.push(line);

        match self.mode {
            Mode::Tutorial { step } => self.run_tutorial_step(step, line).await,
            _ => self.run_command(line).await,
        }
        self.sync_user().await;
    }

    async fn submit_password(&mut self, action: &AuthAction, password: &str) {
        self.push_line(
            LineRole::Input,
            LineData::Prompt {
                prompt: "Password:".to_string(),
                input: "*".repeat(password.chars().count()),
            },
        );
        self.set_mode(Mode::Normal);
        self.history.reset_cursor();

        let message = complete_auth(action, password, &self.backend).await;
        self.push_text(message);
        self.sync_user().await;
    }

    async fn run_command(&mut self, line: &str) {
        let dispatch = commands::dispatch(line, self.services(), &self.cwd).await;
        if let Some(cwd) = dispatch.cwd {
            self.cwd = cwd;
        }
        if let Some(output) = dispatch.output {
            self.apply(output);
        }
    }

    async fn run_tutorial_step(&mut self, step: usize, line: &str) {
        let Some(parsed) = parse_input(line) else {
            return;
        };
        let advance = tutorial::advance(
            step,
            &Invocation {
                command: &parsed.name,
                args: &parsed.args,
                cwd: &self.cwd,
                fs: &self.fs,
            },
        );

        match advance {
            Advance::Exit => {
                self.set_mode(Mode::Normal);
                self.push_text("Exited tutorial.");
            }
            Advance::Rejected => self.push_text(tutorial::hint(step)),
            Advance::Accepted { next } => {
                let dispatch = commands::execute(&parsed, self.services(), &self.cwd).await;
                if let Some(cwd) = dispatch.cwd {
                    self.cwd = cwd;
                }

                // Directives are not acted on inside the tutorial
                let mut rich = Rich::new();
                match dispatch.output {
                    Some(CommandOutput::Text(text)) if !text.is_empty() => rich = rich.text(text),
                    Some(CommandOutput::Rich(output)) => rich.extend(output),
                    _ => {}
                }
                rich.extend(tutorial::accepted(step, next));
                self.push_line(LineRole::Output, LineData::Rich(rich));

                self.set_mode(match next {
                    Some(step) => Mode::Tutorial { step },
                    None => Mode::Normal,
                });
            }
        }
    }

    /// Tab: complete the input buffer. Ignored outside normal and tutorial
    /// mode.
    pub async fn tab(&mut self) {
        if !matches!(self.mode, Mode::Normal | Mode::Tutorial { .. }) {
            return;
        }
        let completion = autocomplete::complete(&self.input, &self.cwd, self.services()).await;
        if completion.is_empty() {
            return;
        }
        if let Some(input) = completion.input {
            self.input = input;
        }
        self.suggestions = completion.suggestions;
    }

    /// Up arrow: recall an older line.
    pub fn history_up(&mut self) {
        if matches!(self.mode, Mode::Subprogram(_)) {
            return;
        }
        self.suggestions.clear();
        if let Some(entry) = self.history.older(&self.input) {
            self.input = entry.to_string();
        }
    }

    /// Down arrow: recall a newer line, or the stashed live buffer.
    pub fn history_down(&mut self) {
        if matches!(self.mode, Mode::Subprogram(_)) {
            return;
        }
        self.suggestions.clear();
        if let Some(entry) = self.history.newer() {
            self.input = entry.to_string();
        }
    }

    /// Exit signal from the running sub-program.
    pub fn exit_subprogram(&mut self) {
        let Mode::Subprogram(program) = &self.mode else {
            return;
        };
        let message = match program {
            Subprogram::Minigame => "Game over. Hope you had fun!".to_string(),
            Subprogram::FileViewer { filename, .. } => format!("\"{}\" closed.", filename),
            Subprogram::PostEditor(_) => "Edit cancelled.".to_string(),
        };
        self.set_mode(Mode::Normal);
        self.push_line(LineRole::System, LineData::Text(message));
    }

    /// Save from the post editor. The editor stays open on failure.
    pub async fn save_edit(&mut self, content: &str) {
        let Mode::Subprogram(Subprogram::PostEditor(post)) = &self.mode else {
            return;
        };
        let (id, title) = (post.id, post.title.clone());

        match self.backend.update_post_content(id, content).await {
            Ok(()) => {
                self.set_mode(Mode::Normal);
                self.push_line(
                    LineRole::System,
                    LineData::Text(format!("Post \"{}\" saved successfully.", title)),
                );
            }
            Err(e) => self.push_line(
                LineRole::System,
                LineData::Text(format!("Failed to save post: {}", e)),
            ),
        }
    }

    /// Close the post editor without saving.
    pub fn cancel_edit(&mut self) {
        if matches!(self.mode, Mode::Subprogram(Subprogram::PostEditor(_))) {
            self.exit_subprogram();
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn services(&self) -> Services<'_, B> {
        Services {
            fs: &self.fs,
            registry: &self.registry,
            backend: &self.backend,
            site: &self.site,
        }
    }

    fn set_mode(&mut self, mode: Mode) {
        tracing::debug!(from = ?self.mode, to = ?mode, "mode transition");
        self.mode = mode;
    }

    fn push_line(&mut self, role: LineRole, data: LineData) {
        let line = OutputLine::new(self.next_line_id, role, data);
        self.next_line_id += 1;
        self.lines.push(line);
    }

    fn push_text(&mut self, text: impl Into<String>) {
        self.push_line(LineRole::Output, LineData::Text(text.into()));
    }

    fn apply(&mut self, output: CommandOutput) {
        match output {
            CommandOutput::Text(text) if text.is_empty() => {}
            CommandOutput::Text(text) => self.push_text(text),
            CommandOutput::Rich(rich) if rich.is_empty() => {}
            CommandOutput::Rich(rich) => self.push_line(LineRole::Output, LineData::Rich(rich)),
            CommandOutput::Clear => {
                self.lines.clear();
                self.screen_epoch += 1;
            }
            CommandOutput::Directive(directive) => self.apply_directive(directive),
        }
    }

    fn apply_directive(&mut self, directive: Directive) {
        match directive {
            Directive::RequestPassword(action) => self.set_mode(Mode::AwaitingPassword(action)),
            Directive::SetTheme(theme) => {
                self.theme = theme;
                self.push_text(format!("Theme set to {}", theme));
            }
            Directive::StartTutorial => {
                self.set_mode(Mode::Tutorial { step: 0 });
                self.push_line(LineRole::Output, LineData::Rich(tutorial::prompt(0)));
            }
            Directive::StartMinigame => {
                self.set_mode(Mode::Subprogram(Subprogram::Minigame));
                self.push_text("Starting Pac-Man...");
            }
            Directive::StartFileViewer { filename, content } => {
                self.set_mode(Mode::Subprogram(Subprogram::FileViewer { filename, content }));
            }
            Directive::EditEntity(post) => {
                self.set_mode(Mode::Subprogram(Subprogram::PostEditor(post)));
            }
        }
    }
}
