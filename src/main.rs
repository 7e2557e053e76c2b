mod app;
mod components;
mod config;

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use foliosh_core::backend::MemoryBackend;
use foliosh_core::models::{Site, Theme};
use tracing_subscriber::EnvFilter;

use app::App;

/// A portfolio you explore from the command line.
#[derive(Parser, Debug)]
#[command(name = "foliosh", version, about)]
struct Args {
    /// Site document to serve instead of the embedded one
    #[arg(long, value_name = "FILE")]
    site: Option<PathBuf>,

    /// Palette to start with (tokyonight, dracula, gruvbox)
    #[arg(long)]
    theme: Option<Theme>,

    /// Log at debug level unless FOLIOSH_LOG says otherwise
    #[arg(long)]
    debug: bool,

    /// Seed an admin account
    #[arg(long, value_name = "EMAIL:PASSWORD")]
    admin: Vec<Credentials>,

    /// Seed a regular account
    #[arg(long, value_name = "EMAIL:PASSWORD")]
    user: Vec<Credentials>,
}

#[derive(Clone, Debug)]
struct Credentials {
    email: String,
    password: String,
}

impl FromStr for Credentials {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((email, password)) if !email.is_empty() && !password.is_empty() => Ok(Self {
                email: email.to_string(),
                password: password.to_string(),
            }),
            _ => Err(format!("expected EMAIL:PASSWORD, got '{}'", s)),
        }
    }
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(config::LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_site(path: Option<&PathBuf>) -> anyhow::Result<Site> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading site document {}", path.display()))?;
            Site::from_json(&json).with_context(|| format!("parsing {}", path.display()))
        }
        None => Site::embedded().context("parsing embedded site document"),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    let site = load_site(args.site.as_ref())?;
    let mut backend = MemoryBackend::new().with_about(site.about.clone());
    for c in &args.admin {
        backend = backend.with_account(&c.email, &c.password, true);
    }
    for c in &args.user {
        backend = backend.with_account(&c.email, &c.password, false);
    }
    tracing::debug!(admins = args.admin.len(), users = args.user.len(), "backend seeded");

    let theme = args.theme.or_else(config::load_theme).unwrap_or_default();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("starting runtime")?;

    App::new(backend, site, theme, runtime)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_parse() {
        let c: Credentials = "ada@example.com:pa:ss".parse().unwrap();
        assert_eq!(c.email, "ada@example.com");
        assert_eq!(c.password, "pa:ss");
        assert!("nopassword".parse::<Credentials>().is_err());
        assert!(":pw".parse::<Credentials>().is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "foliosh",
            "--theme",
            "gruvbox",
            "--admin",
            "a@b.c:secret",
        ])
        .unwrap();
        assert_eq!(args.theme, Some(Theme::Gruvbox));
        assert_eq!(args.admin.len(), 1);
        assert!(Args::try_parse_from(["foliosh", "--theme", "solarized"]).is_err());
    }
}
