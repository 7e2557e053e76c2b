//! Informational and launcher commands.

use super::result::{CommandOutput, Directive};
use super::{Registry, Section};
use crate::backend::Backend;
use crate::config::{APP_HOST, ASCII_BANNER, GUEST_NAME, GUESTBOOK_URL, NEOFETCH_ART, WELCOME_MESSAGE};
use crate::models::{Block, Rich, Site, Theme};
use crate::utils::now_timestamp;

/// Help listing generated from the registry.
pub fn help(registry: &Registry) -> CommandOutput {
    let pairs = |section| {
        registry
            .section(section)
            .map(|c| (c.usage.to_string(), c.summary.to_string()))
            .collect::<Vec<_>>()
    };

    Rich::new()
        .text("Available commands:")
        .with(Block::Pairs {
            pairs: pairs(Section::General),
            separator: " - ",
        })
        .with(Block::Heading("File System Commands:".to_string()))
        .with(Block::Pairs {
            pairs: pairs(Section::FileSystem),
            separator: " - ",
        })
        .into()
}

pub fn welcome(site: &Site) -> CommandOutput {
    welcome_banner(site).into()
}

/// Banner shown by `welcome` and when a session starts.
pub fn welcome_banner(site: &Site) -> Rich {
    Rich::new()
        .with(Block::Ascii(ASCII_BANNER.trim_end().to_string()))
        .with(Block::Heading(WELCOME_MESSAGE.to_string()))
        .text(format!(
            "GitHub: {}  |  Explore the site: /blog",
            site.owner.github
        ))
}

pub async fn about<B: Backend>(backend: &B) -> CommandOutput {
    match backend.about().await {
        Ok(text) => CommandOutput::Text(text),
        Err(e) => CommandOutput::Text(format!("Error fetching about: {}", e)),
    }
}

pub fn date() -> CommandOutput {
    CommandOutput::Text(now_timestamp())
}

pub fn theme(args: &[String]) -> CommandOutput {
    let Some(name) = args.first() else {
        return CommandOutput::Text(format!(
            "Usage: theme <theme_name>\nAvailable themes: {}",
            Theme::available()
        ));
    };

    match name.parse::<Theme>() {
        Ok(theme) => Directive::SetTheme(theme).into(),
        Err(e) => CommandOutput::Text(e.to_string()),
    }
}

pub fn guestbook() -> CommandOutput {
    Rich::new()
        .text("You can view and sign the guestbook on the website.")
        .text(format!("Navigate to {} to see it.", GUESTBOOK_URL))
        .into()
}

pub async fn neofetch<B: Backend>(backend: &B) -> CommandOutput {
    let user = backend.current_user().await;
    let name = user.as_ref().map_or(GUEST_NAME, |u| u.display_name());

    let facts = [
        ("OS", std::env::consts::OS),
        ("Kernel", "Rust"),
        ("Shell", "foliosh"),
        ("Uptime", "since you arrived"),
        ("CPU", std::env::consts::ARCH),
        ("Memory", "1024MB"),
    ];

    Rich::new()
        .with(Block::Ascii(NEOFETCH_ART.trim_end().to_string()))
        .with(Block::Success(format!("{}@{}", name, APP_HOST)))
        .text("------------------")
        .with(Block::Pairs {
            pairs: facts
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            separator: ": ",
        })
        .into()
}

pub fn tutorial() -> CommandOutput {
    Directive::StartTutorial.into()
}

pub fn pacman() -> CommandOutput {
    Directive::StartMinigame.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    #[test]
    fn test_help_lists_every_command() {
        let registry = Registry::builtin();
        let text = match help(&registry) {
            CommandOutput::Rich(rich) => rich.to_string(),
            other => panic!("unexpected {other:?}"),
        };
        assert!(text.starts_with("Available commands:\n"));
        for spec in registry.entries() {
            assert!(text.contains(spec.usage), "{} missing", spec.name);
        }
        let fs_heading = text.find("File System Commands:").unwrap();
        assert!(text.find("grep [pattern] [file]").unwrap() > fs_heading);
        assert!(text.find("Start an interactive tutorial.").unwrap() < fs_heading);
    }

    #[test]
    fn test_theme() {
        assert_eq!(
            theme(&[]),
            CommandOutput::text("Usage: theme <theme_name>\nAvailable themes: tokyonight, dracula, gruvbox")
        );
        assert_eq!(
            theme(&["gruvbox".to_string()]),
            CommandOutput::Directive(Directive::SetTheme(Theme::Gruvbox))
        );
        assert_eq!(
            theme(&["nord".to_string()]),
            CommandOutput::text("Theme 'nord' not found. Available themes: tokyonight, dracula, gruvbox")
        );
    }

    #[tokio::test]
    async fn test_about_error() {
        let backend = MemoryBackend::new();
        backend.set_outage(Some("timeout"));
        assert_eq!(about(&backend).await, CommandOutput::text("Error fetching about: timeout"));
    }

    #[tokio::test]
    async fn test_neofetch_guest() {
        let backend = MemoryBackend::new();
        let CommandOutput::Rich(rich) = neofetch(&backend).await else {
            panic!("expected rich output");
        };
        assert!(rich.blocks().contains(&Block::Success("guest@portfolio".into())));
    }
}
