//! Command execution.

use super::result::{CommandOutput, Dispatch};
use super::{FsCommand, Handler, PlainCommand, Registry, auth, files, info, posts};
use crate::backend::Backend;
use crate::core::VirtualFs;
use crate::core::parser::{ParsedCommand, parse_input};
use crate::models::Site;

/// Collaborators every handler may read from.
pub struct Services<'a, B> {
    pub fs: &'a VirtualFs,
    pub registry: &'a Registry,
    pub backend: &'a B,
    pub site: &'a Site,
}

// Manual impls: `B` itself need not be `Clone`.
impl<B> Clone for Services<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for Services<'_, B> {}

/// Working-directory access handed to filesystem-aware commands.
#[derive(Debug, Clone)]
pub struct FsContext {
    cwd: String,
    new_cwd: Option<String>,
}

impl FsContext {
    pub fn new(cwd: impl Into<String>) -> Self {
        Self {
            cwd: cwd.into(),
            new_cwd: None,
        }
    }

    /// Working directory at the time the command started.
    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    /// Request a directory change, applied after the command returns.
    pub fn set_cwd(&mut self, path: impl Into<String>) {
        self.new_cwd = Some(path.into());
    }

    pub fn into_new_cwd(self) -> Option<String> {
        self.new_cwd
    }
}

/// Tokenize and execute one line.
///
/// Blank input yields no output; an unknown name yields a
/// "command not found" line.
pub async fn dispatch<B: Backend>(line: &str, services: Services<'_, B>, cwd: &str) -> Dispatch {
    match parse_input(line) {
        Some(parsed) => execute(&parsed, services, cwd).await,
        None => Dispatch::default(),
    }
}

/// Execute an already tokenized command.
pub async fn execute<B: Backend>(
    parsed: &ParsedCommand,
    services: Services<'_, B>,
    cwd: &str,
) -> Dispatch {
    let Some(spec) = services.registry.get(&parsed.name) else {
        return Dispatch {
            output: Some(CommandOutput::Text(format!(
                "Command not found: {}. Type 'help' for available commands.",
                parsed.name
            ))),
            cwd: None,
        };
    };

    tracing::debug!(command = spec.name, args = parsed.args.len(), "executing command");

    let args = parsed.args.as_slice();
    match spec.handler {
        Handler::Plain(command) => Dispatch {
            output: Some(run_plain(command, args, services).await),
            cwd: None,
        },
        Handler::FilesystemAware(command) => {
            let mut ctx = FsContext::new(cwd);
            let output = run_fs(command, args, &mut ctx, services).await;
            Dispatch {
                output: Some(output),
                cwd: ctx.into_new_cwd(),
            }
        }
    }
}

async fn run_plain<B: Backend>(
    command: PlainCommand,
    args: &[String],
    services: Services<'_, B>,
) -> CommandOutput {
    use PlainCommand as P;

    match command {
        P::Help => info::help(services.registry),
        P::Welcome => info::welcome(services.site),
        P::About => info::about(services.backend).await,
        P::Contact => services.site.contact_card().into(),
        P::Date => info::date(),
        P::Echo => CommandOutput::Text(args.join(" ")),
        P::Clear => CommandOutput::Clear,
        P::Signup => auth::signup(args),
        P::Login => auth::login(args),
        P::Logout => auth::logout(services.backend).await,
        P::Whoami => auth::whoami(services.backend).await,
        P::Blog => posts::blog(services.backend).await,
        P::Post => posts::post(args, services.backend).await,
        P::Theme => info::theme(args),
        P::Guestbook => info::guestbook(),
        P::Neofetch => info::neofetch(services.backend).await,
        P::Tutorial => info::tutorial(),
        P::Pacman => info::pacman(),
    }
}

async fn run_fs<B: Backend>(
    command: FsCommand,
    args: &[String],
    ctx: &mut FsContext,
    services: Services<'_, B>,
) -> CommandOutput {
    use FsCommand as F;

    match command {
        F::Projects => files::projects(args, ctx, services.fs),
        F::Ls => files::ls(args, ctx.cwd(), services.fs),
        F::Cd => files::cd(args, ctx, services.fs),
        F::Cat => files::cat(args, ctx, services).await,
        F::Pwd => CommandOutput::Text(ctx.cwd().to_string()),
        F::Grep => files::grep(args, ctx, services).await,
        F::Vim => files::vim(args, ctx, services).await,
    }
}
