//! Filesystem commands: `ls`, `cd`, `cat`, `grep`, `vim`, `projects`.

use regex::RegexBuilder;

use super::execute::{FsContext, Services};
use super::result::{CommandOutput, Directive};
use crate::backend::Backend;
use crate::config::PROJECTS_DIR;
use crate::core::error::BackendError;
use crate::core::filesystem::{FileContent, Node, Producer, VirtualFs};
use crate::models::{Block, ListEntry, Rich, Span, TextStyle};

/// File content after producers have run.
enum Readable {
    Text(String),
    Rich(Rich),
}

async fn read_file<B: Backend>(
    content: &FileContent,
    services: Services<'_, B>,
) -> Result<Readable, BackendError> {
    Ok(match content {
        FileContent::Static(text) => Readable::Text(text.clone()),
        FileContent::Produced(Producer::About) => Readable::Text(services.backend.about().await?),
        FileContent::Produced(Producer::Contact) => Readable::Rich(services.site.contact_card()),
    })
}

pub fn ls(args: &[String], cwd: &str, fs: &VirtualFs) -> CommandOutput {
    let path = args.first().map(String::as_str).unwrap_or(".");

    match fs.get_node(path, cwd) {
        None => CommandOutput::Text(format!(
            "ls: cannot access '{}': No such file or directory",
            path
        )),
        Some(Node::File(_)) => {
            CommandOutput::text(path.rsplit('/').next().unwrap_or_default())
        }
        Some(Node::Directory(_)) => {
            let entries: Vec<ListEntry> = fs
                .list_dir(path, cwd)
                .unwrap_or_default()
                .into_iter()
                .map(|e| ListEntry {
                    style: if e.is_dir {
                        TextStyle::Directory
                    } else if e.name.starts_with('.') {
                        TextStyle::Hidden
                    } else {
                        TextStyle::File
                    },
                    name: e.name,
                })
                .collect();

            if entries.is_empty() {
                CommandOutput::empty()
            } else {
                Block::Listing(entries).into()
            }
        }
    }
}

pub fn cd(args: &[String], ctx: &mut FsContext, fs: &VirtualFs) -> CommandOutput {
    let path = args.first().map(String::as_str).unwrap_or("/");

    match fs.get_node(path, ctx.cwd()) {
        None => CommandOutput::Text(format!("cd: no such file or directory: {}", path)),
        Some(Node::File(_)) => CommandOutput::Text(format!("cd: not a directory: {}", path)),
        Some(Node::Directory(_)) => {
            let resolved = VirtualFs::resolve_path(path, ctx.cwd());
            ctx.set_cwd(resolved);
            CommandOutput::empty()
        }
    }
}

pub fn projects(args: &[String], ctx: &mut FsContext, fs: &VirtualFs) -> CommandOutput {
    ctx.set_cwd(PROJECTS_DIR);

    let mut rich = Rich::new().text(
        "Changed directory to /projects. Use `ls` to see projects, and `cat [filename]` to view details.",
    );
    match ls(args, PROJECTS_DIR, fs) {
        CommandOutput::Rich(listing) => rich.extend(listing),
        CommandOutput::Text(text) if !text.is_empty() => rich.push(Block::Text(text)),
        _ => {}
    }
    rich.into()
}

pub async fn cat<B: Backend>(
    args: &[String],
    ctx: &FsContext,
    services: Services<'_, B>,
) -> CommandOutput {
    let Some(path) = args.first() else {
        return CommandOutput::text("cat: missing file operand");
    };

    let content = match services.fs.get_node(path, ctx.cwd()) {
        None => return CommandOutput::Text(format!("cat: {}: No such file or directory", path)),
        Some(Node::Directory(_)) => {
            return CommandOutput::Text(format!("cat: {}: Is a directory", path));
        }
        Some(Node::File(content)) => content,
    };

    match (content, read_file(content, services).await) {
        (_, Err(e)) => CommandOutput::Text(format!("cat: {}: {}", path, e)),
        (FileContent::Static(_), Ok(Readable::Text(text))) => Block::Pre(text).into(),
        (_, Ok(Readable::Text(text))) => CommandOutput::Text(text),
        (_, Ok(Readable::Rich(rich))) => rich.into(),
    }
}

pub async fn grep<B: Backend>(
    args: &[String],
    ctx: &FsContext,
    services: Services<'_, B>,
) -> CommandOutput {
    let [pattern, file, ..] = args else {
        return CommandOutput::text("usage: grep PATTERN FILE");
    };

    let content = match services.fs.get_node(file, ctx.cwd()) {
        None => return CommandOutput::Text(format!("grep: {}: No such file or directory", file)),
        Some(Node::Directory(_)) => {
            return CommandOutput::Text(format!("grep: {}: Is a directory", file));
        }
        Some(Node::File(content)) => content,
    };

    let text = match read_file(content, services).await {
        Ok(Readable::Text(text)) => text,
        Ok(Readable::Rich(_)) => return CommandOutput::Text(format!("grep: cannot search in {}", file)),
        Err(e) => return CommandOutput::Text(format!("grep: {}: {}", file, e)),
    };

    let matches = highlight_matches(pattern, &text);
    if matches.is_empty() {
        CommandOutput::empty()
    } else {
        Block::Matches(matches).into()
    }
}

/// Lines containing `pattern` (case-insensitive literal), split into spans.
fn highlight_matches(pattern: &str, text: &str) -> Vec<Vec<Span>> {
    let needle = pattern.to_lowercase();
    let re = RegexBuilder::new(&regex::escape(pattern))
        .case_insensitive(true)
        .build()
        .ok();

    text.lines()
        .filter(|line| line.to_lowercase().contains(&needle))
        .map(|line| {
            let Some(re) = &re else {
                return vec![Span {
                    text: line.to_string(),
                    highlighted: false,
                }];
            };

            let mut spans = Vec::new();
            let mut last = 0;
            for m in re.find_iter(line) {
                if m.start() > last {
                    spans.push(Span {
                        text: line[last..m.start()].to_string(),
                        highlighted: false,
                    });
                }
                spans.push(Span {
                    text: m.as_str().to_string(),
                    highlighted: true,
                });
                last = m.end();
            }
            if last < line.len() {
                spans.push(Span {
                    text: line[last..].to_string(),
                    highlighted: false,
                });
            }
            spans
        })
        .collect()
}

pub async fn vim<B: Backend>(
    args: &[String],
    ctx: &FsContext,
    services: Services<'_, B>,
) -> CommandOutput {
    let Some(path) = args.first() else {
        return CommandOutput::text("vim: File name must be specified");
    };

    let content = match services.fs.get_node(path, ctx.cwd()) {
        None => return CommandOutput::Text(format!("vim: Cannot find file \"{}\"", path)),
        Some(Node::Directory(_)) => {
            return CommandOutput::Text(format!("vim: \"{}\" is a directory", path));
        }
        Some(Node::File(content)) => content,
    };

    match read_file(content, services).await {
        Ok(Readable::Text(text)) => Directive::StartFileViewer {
            filename: path.clone(),
            content: text,
        }
        .into(),
        Ok(Readable::Rich(_)) => CommandOutput::Text(format!(
            "vim: Cannot open \"{}\". File does not contain plain text.",
            path
        )),
        Err(e) => CommandOutput::Text(format!("vim: {}: {}", path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::core::commands::Registry;
    use crate::models::Site;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    struct Fixture {
        fs: VirtualFs,
        registry: Registry,
        backend: MemoryBackend,
        site: Site,
    }

    impl Fixture {
        fn new() -> Self {
            let site = Site::embedded().unwrap();
            Self {
                fs: VirtualFs::from_site(&site),
                registry: Registry::builtin(),
                backend: MemoryBackend::new().with_about("I write Rust.\nI love terminals."),
                site,
            }
        }

        fn services(&self) -> Services<'_, MemoryBackend> {
            Services {
                fs: &self.fs,
                registry: &self.registry,
                backend: &self.backend,
                site: &self.site,
            }
        }
    }

    #[test]
    fn test_ls_root_styles() {
        let fx = Fixture::new();
        let CommandOutput::Rich(rich) = ls(&[], "/", &fx.fs) else {
            panic!("expected listing");
        };
        let Block::Listing(entries) = &rich.blocks()[0] else {
            panic!("expected listing block");
        };
        assert_eq!(entries[0].name, "mycode");
        assert_eq!(entries[0].style, TextStyle::Directory);
        assert_eq!(entries[2].style, TextStyle::File);
    }

    #[test]
    fn test_ls_file_and_missing() {
        let fx = Fixture::new();
        assert_eq!(
            ls(&args("projects/project-beta.txt"), "/", &fx.fs),
            CommandOutput::text("project-beta.txt")
        );
        assert_eq!(
            ls(&args("nope"), "/", &fx.fs),
            CommandOutput::text("ls: cannot access 'nope': No such file or directory")
        );
    }

    #[test]
    fn test_cd_errors() {
        let fx = Fixture::new();
        let mut ctx = FsContext::new("/");
        assert_eq!(
            cd(&args("nowhere"), &mut ctx, &fx.fs),
            CommandOutput::text("cd: no such file or directory: nowhere")
        );
        assert_eq!(
            cd(&args("quotes.txt"), &mut ctx, &fx.fs),
            CommandOutput::text("cd: not a directory: quotes.txt")
        );
        assert_eq!(ctx.into_new_cwd(), None);
    }

    #[test]
    fn test_cd_defaults_to_root() {
        let fx = Fixture::new();
        let mut ctx = FsContext::new("/projects");
        cd(&[], &mut ctx, &fx.fs);
        assert_eq!(ctx.into_new_cwd().as_deref(), Some("/"));
    }

    #[test]
    fn test_projects_changes_directory() {
        let fx = Fixture::new();
        let mut ctx = FsContext::new("/mycode");
        let output = projects(&[], &mut ctx, &fx.fs);
        assert_eq!(ctx.into_new_cwd().as_deref(), Some("/projects"));
        let text = match output {
            CommandOutput::Rich(rich) => rich.to_string(),
            other => panic!("unexpected {other:?}"),
        };
        assert!(text.starts_with("Changed directory to /projects."));
        assert!(text.contains("project-alpha.txt  project-beta.txt  project-gamma.txt"));
    }

    #[tokio::test]
    async fn test_cat_messages() {
        let fx = Fixture::new();
        let ctx = FsContext::new("/");
        assert_eq!(
            cat(&[], &ctx, fx.services()).await,
            CommandOutput::text("cat: missing file operand")
        );
        assert_eq!(
            cat(&args("/nonexistent"), &ctx, fx.services()).await,
            CommandOutput::text("cat: /nonexistent: No such file or directory")
        );
        assert_eq!(
            cat(&args("projects"), &ctx, fx.services()).await,
            CommandOutput::text("cat: projects: Is a directory")
        );
    }

    #[tokio::test]
    async fn test_cat_contents() {
        let fx = Fixture::new();
        let ctx = FsContext::new("/");
        assert!(matches!(
            cat(&args("quotes.txt"), &ctx, fx.services()).await,
            CommandOutput::Rich(r) if matches!(r.blocks(), [Block::Pre(_)])
        ));
        assert_eq!(
            cat(&args("about.txt"), &ctx, fx.services()).await,
            CommandOutput::text("I write Rust.\nI love terminals.")
        );
        assert_eq!(
            cat(&args("contact.txt"), &ctx, fx.services()).await,
            CommandOutput::Rich(fx.site.contact_card())
        );
    }

    #[tokio::test]
    async fn test_cat_backend_failure() {
        let fx = Fixture::new();
        fx.backend.set_outage(Some("offline"));
        assert_eq!(
            cat(&args("about.txt"), &FsContext::new("/"), fx.services()).await,
            CommandOutput::text("cat: about.txt: offline")
        );
    }

    #[tokio::test]
    async fn test_grep_highlights_case_insensitively() {
        let fx = Fixture::new();
        let ctx = FsContext::new("/");
        let CommandOutput::Rich(rich) = grep(&args("LOVE quotes.txt"), &ctx, fx.services()).await
        else {
            panic!("expected matches");
        };
        let Block::Matches(lines) = &rich.blocks()[0] else {
            panic!("expected matches block");
        };
        assert_eq!(lines.len(), 1);
        let highlighted: Vec<&str> = lines[0]
            .iter()
            .filter(|s| s.highlighted)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(highlighted, vec!["love"]);
    }

    #[tokio::test]
    async fn test_grep_edge_cases() {
        let fx = Fixture::new();
        let ctx = FsContext::new("/");
        assert_eq!(
            grep(&args("love"), &ctx, fx.services()).await,
            CommandOutput::text("usage: grep PATTERN FILE")
        );
        assert_eq!(
            grep(&args("zebra quotes.txt"), &ctx, fx.services()).await,
            CommandOutput::empty()
        );
        assert_eq!(
            grep(&args("a contact.txt"), &ctx, fx.services()).await,
            CommandOutput::text("grep: cannot search in contact.txt")
        );
        assert_eq!(
            grep(&args("a mycode"), &ctx, fx.services()).await,
            CommandOutput::text("grep: mycode: Is a directory")
        );
        assert!(matches!(
            grep(&args("love about.txt"), &ctx, fx.services()).await,
            CommandOutput::Rich(_)
        ));
    }

    #[test]
    fn test_pattern_is_literal() {
        let spans = highlight_matches("a.c", "abc a.c");
        assert_eq!(spans.len(), 1);
        assert_eq!(
            spans[0],
            vec![
                Span {
                    text: "abc ".into(),
                    highlighted: false
                },
                Span {
                    text: "a.c".into(),
                    highlighted: true
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_vim() {
        let fx = Fixture::new();
        let ctx = FsContext::new("/mycode");
        assert_eq!(
            vim(&[], &ctx, fx.services()).await,
            CommandOutput::text("vim: File name must be specified")
        );
        assert_eq!(
            vim(&args("Missing.tsx"), &ctx, fx.services()).await,
            CommandOutput::text("vim: Cannot find file \"Missing.tsx\"")
        );
        assert_eq!(
            vim(&args(".."), &ctx, fx.services()).await,
            CommandOutput::text("vim: \"..\" is a directory")
        );
        assert_eq!(
            vim(&args("../contact.txt"), &ctx, fx.services()).await,
            CommandOutput::text("vim: Cannot open \"../contact.txt\". File does not contain plain text.")
        );
        match vim(&args("Counter.tsx"), &ctx, fx.services()).await {
            CommandOutput::Directive(Directive::StartFileViewer { filename, content }) => {
                assert_eq!(filename, "Counter.tsx");
                assert!(content.contains("useState"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
