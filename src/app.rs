//! Root application: owns the session, the line editor and the renderer.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use foliosh_core::backend::MemoryBackend;
use foliosh_core::core::{Mode, Subprogram, Terminal};
use foliosh_core::models::{Site, Theme};
use rustyline::error::ReadlineError;
use rustyline::{CompletionType, Config, EventHandler, KeyCode, KeyEvent, Modifiers};
use tokio::runtime::Runtime;

use crate::components::input::{HistoryDirection, HistoryKey};
use crate::components::subprogram::{self, EditorAction, LineEditor};
use crate::components::{InputHelper, Palette, Screen, SharedTerminal, lock};
use crate::config;

pub struct App {
    terminal: SharedTerminal,
    runtime: Arc<Runtime>,
    editor: LineEditor,
    screen: Screen,
}

impl App {
    pub fn new(backend: MemoryBackend, site: Site, theme: Theme, runtime: Runtime) -> anyhow::Result<Self> {
        let mut terminal = Terminal::new(backend, site);
        terminal.set_theme(theme);
        let terminal = Arc::new(Mutex::new(terminal));
        let runtime = Arc::new(runtime);

        let config = Config::builder()
            .auto_add_history(false)
            .completion_type(CompletionType::List)
            .completion_show_all_if_ambiguous(true)
            .build();
        let mut editor = LineEditor::with_config(config)?;
        editor.set_helper(Some(InputHelper::new(terminal.clone(), runtime.clone())));
        for (key, direction) in [
            (KeyCode::Up, HistoryDirection::Older),
            (KeyCode::Down, HistoryDirection::Newer),
        ] {
            editor.bind_sequence(
                KeyEvent(key, Modifiers::NONE),
                EventHandler::Conditional(Box::new(HistoryKey::new(terminal.clone(), direction))),
            );
        }

        Ok(Self {
            terminal,
            runtime,
            editor,
            screen: Screen::new(),
        })
    }

    /// Read-eval-render loop. Returns on Ctrl-D.
    pub fn run(mut self) -> anyhow::Result<()> {
        let mut stdout = io::stdout();
        self.render(&mut stdout)?;

        loop {
            let (prompt, masking) = {
                let terminal = lock(&self.terminal);
                (terminal.prompt(), matches!(terminal.mode(), Mode::AwaitingPassword(_)))
            };
            if let Some(helper) = self.editor.helper_mut() {
                helper.masking = masking;
            }

            match self.editor.readline(&format!("{} ", prompt)) {
                Ok(line) => self.submit(&line),
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            }
            self.render(&mut stdout)?;
            self.run_subprogram(&mut stdout)?;
        }
        Ok(())
    }

    fn submit(&self, line: &str) {
        let mut terminal = lock(&self.terminal);
        let theme = terminal.theme();
        terminal.set_input(line);
        self.runtime.block_on(terminal.submit());

        if terminal.theme() != theme {
            if let Err(e) = config::save_theme(terminal.theme()) {
                tracing::warn!("could not save theme: {:#}", e);
            }
        }
    }

    fn render(&mut self, out: &mut impl Write) -> io::Result<()> {
        let terminal = lock(&self.terminal);
        self.screen.render(out, &terminal)
    }

    /// Drive sub-programs until the session is back at the prompt.
    fn run_subprogram(&mut self, out: &mut impl Write) -> anyhow::Result<()> {
        loop {
            let (mode, theme) = {
                let terminal = lock(&self.terminal);
                (terminal.mode().clone(), terminal.theme())
            };
            let Mode::Subprogram(program) = mode else {
                return Ok(());
            };
            let palette = Palette::for_theme(theme);

            match program {
                Subprogram::Minigame => {
                    subprogram::minigame(&mut self.editor, out, &palette)?;
                    lock(&self.terminal).exit_subprogram();
                }
                Subprogram::FileViewer { filename, content } => {
                    subprogram::view_file(&mut self.editor, out, &palette, &filename, &content)?;
                    lock(&self.terminal).exit_subprogram();
                }
                Subprogram::PostEditor(post) => {
                    match subprogram::edit_post(&mut self.editor, out, &palette, &post)? {
                        EditorAction::Save(content) => {
                            let mut terminal = lock(&self.terminal);
                            self.runtime.block_on(terminal.save_edit(&content));
                        }
                        EditorAction::Cancel => lock(&self.terminal).cancel_edit(),
                    }
                }
            }
            self.render(out)?;
        }
    }
}
