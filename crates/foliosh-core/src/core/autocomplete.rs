//! Tab completion for command names, `post` subcommands, paths and slugs.
//!
//! Resolution is the same everywhere:
//! - No candidates: nothing happens
//! - One candidate: the word is completed and a separator appended
//! - Several: the word is extended to the candidates' common prefix when
//!   that adds something, otherwise the candidates are listed
//!
//! Command names are the exception: several matches are always listed.

use crate::backend::Backend;
use crate::config::{PATH_COMMANDS, POST_SUBCOMMANDS, PRIVATE_SLUG_SUBCOMMANDS};
use crate::core::commands::Services;
use crate::core::filesystem::Node;
use crate::core::parser::split_partial;

// ============================================================================
// Public Types
// ============================================================================

/// Result of a completion attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Completion {
    /// Replacement for the whole input line, if it changes
    pub input: Option<String>,
    /// Candidates to show when no single completion exists
    pub suggestions: Vec<String>,
}

impl Completion {
    fn none() -> Self {
        Self::default()
    }

    fn replace(input: String) -> Self {
        Self {
            input: Some(input),
            suggestions: Vec::new(),
        }
    }

    fn suggest(suggestions: Vec<String>) -> Self {
        Self {
            input: None,
            suggestions,
        }
    }

    /// Nothing to apply.
    pub fn is_empty(&self) -> bool {
        self.input.is_none() && self.suggestions.is_empty()
    }
}

// ============================================================================
// Completion Context
// ============================================================================

/// What the word under the cursor is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompletionMode {
    Command,
    Subcommand,
    Path,
    Slug,
    None,
}

impl CompletionMode {
    fn from_parts(parts: &[&str]) -> Self {
        let command = parts[0];
        match parts.len() {
            1 => Self::Command,
            2 if command == "post" => Self::Subcommand,
            n if PATH_COMMANDS.contains(&command) || (command == "grep" && n >= 3) => Self::Path,
            3 if command == "post" => Self::Slug,
            _ => Self::None,
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Complete the partial line `input` typed in `cwd`.
///
/// Backend failures while looking up slugs are logged and yield no change.
pub async fn complete<B: Backend>(input: &str, cwd: &str, services: Services<'_, B>) -> Completion {
    let parts = split_partial(input);
    let mode = CompletionMode::from_parts(&parts);
    tracing::debug!(?mode, words = parts.len(), "tab completion");

    match mode {
        CompletionMode::Command => complete_command(parts[0], services),
        CompletionMode::Subcommand => complete_subcommand(parts[0], parts[1]),
        CompletionMode::Path => complete_path(&parts, cwd, services),
        CompletionMode::Slug => complete_slug(parts[1], parts[2], services).await,
        CompletionMode::None => Completion::none(),
    }
}

fn complete_command<B>(word: &str, services: Services<'_, B>) -> Completion {
    let mut matches: Vec<String> = services
        .registry
        .names_with_prefix(word)
        .into_iter()
        .map(str::to_string)
        .collect();

    match matches.len() {
        0 => Completion::none(),
        1 => Completion::replace(format!("{} ", matches[0])),
        _ => {
            matches.sort();
            Completion::suggest(matches)
        }
    }
}

fn complete_subcommand(command: &str, word: &str) -> Completion {
    let matches: Vec<String> = POST_SUBCOMMANDS
        .iter()
        .filter(|s| s.starts_with(word))
        .map(|s| s.to_string())
        .collect();

    resolve(&format!("{} ", command), word, matches, |_| " ")
}

fn complete_path<B>(parts: &[&str], cwd: &str, services: Services<'_, B>) -> Completion {
    let Some((&partial, earlier)) = parts.split_last() else {
        return Completion::none();
    };
    let (dir_part, name_part) = match partial.rfind('/') {
        Some(idx) => (&partial[..=idx], &partial[idx + 1..]),
        None => ("", partial),
    };

    let search = if dir_part.is_empty() { "." } else { dir_part };
    let Some(Node::Directory(children)) = services.fs.get_node(search, cwd) else {
        return Completion::none();
    };

    let matches: Vec<String> = children
        .keys()
        .filter(|name| name.starts_with(name_part))
        .cloned()
        .collect();

    let prefix = format!("{} {}", earlier.join(" "), dir_part);
    resolve(&prefix, name_part, matches, |name| match children.get(name) {
        Some(Node::Directory(_)) => "/",
        _ => " ",
    })
}

async fn complete_slug<B: Backend>(sub: &str, word: &str, services: Services<'_, B>) -> Completion {
    let public = sub == "show";
    if !public && !PRIVATE_SLUG_SUBCOMMANDS.contains(&sub) {
        return Completion::none();
    }

    let signed_in = services.backend.current_user().await.is_some();
    if !public && !signed_in {
        return Completion::none();
    }

    let hits = match services.backend.search_slugs(word).await {
        Ok(hits) => hits,
        Err(e) => {
            tracing::warn!(error = %e, "slug lookup failed during completion");
            return Completion::none();
        }
    };

    let matches: Vec<String> = hits
        .into_iter()
        .filter(|h| h.is_published || signed_in)
        .map(|h| h.slug)
        .collect();

    resolve(&format!("post {} ", sub), word, matches, |_| " ")
}

// ============================================================================
// Resolution
// ============================================================================

/// Apply single/common-prefix/suggestion resolution.
///
/// `prefix` is the untouched part of the line before the word being
/// completed; `suffix` gives the separator appended after a single match.
fn resolve<'a>(
    prefix: &str,
    typed: &str,
    mut matches: Vec<String>,
    suffix: impl Fn(&str) -> &'a str,
) -> Completion {
    match matches.len() {
        0 => Completion::none(),
        1 => {
            let only = &matches[0];
            Completion::replace(format!("{}{}{}", prefix, only, suffix(only)))
        }
        _ => {
            matches.sort();
            let common = sorted_common_prefix(&matches);
            if common.chars().count() > typed.chars().count() {
                Completion::replace(format!("{}{}", prefix, common))
            } else {
                Completion::suggest(matches)
            }
        }
    }
}

/// Common leading run of the first and last element of a sorted list.
fn sorted_common_prefix(sorted: &[String]) -> String {
    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return String::new();
    };

    first
        .chars()
        .zip(last.chars())
        .take_while(|(a, b)| a == b)
        .map(|(a, _)| a)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::core::VirtualFs;
    use crate::core::commands::Registry;
    use crate::models::{Post, Site};
    use chrono::Utc;

    struct Fixture {
        fs: VirtualFs,
        registry: Registry,
        backend: MemoryBackend,
        site: Site,
    }

    fn post(slug: &str, is_published: bool) -> Post {
        Post {
            id: 0,
            title: slug.to_string(),
            slug: slug.to_string(),
            content: None,
            is_published,
            published_at: is_published.then(Utc::now),
            created_at: Utc::now(),
            author_id: 1,
            tags: Vec::new(),
        }
    }

    impl Fixture {
        fn new() -> Self {
            let site = Site::embedded().unwrap();
            Self {
                fs: VirtualFs::from_site(&site),
                registry: Registry::builtin(),
                backend: MemoryBackend::new()
                    .with_account("admin@example.com", "hunter22", true)
                    .with_post(post("rust-async", true))
                    .with_post(post("rust-atomics", true))
                    .with_post(post("rust-draft", false))
                    .with_post(post("zig", true)),
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

        async fn complete(&self, input: &str, cwd: &str) -> Completion {
            complete(input, cwd, self.services()).await
        }
    }

    fn replaced(input: &str) -> Completion {
        Completion::replace(input.to_string())
    }

    fn suggested(items: &[&str]) -> Completion {
        Completion::suggest(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_sorted_common_prefix() {
        let v = |s: &[&str]| s.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(sorted_common_prefix(&v(&["project-alpha", "project-beta"])), "project-");
        assert_eq!(sorted_common_prefix(&v(&["a", "b"])), "");
        assert_eq!(sorted_common_prefix(&[]), "");
    }

    #[tokio::test]
    async fn test_command_single_match() {
        let fx = Fixture::new();
        assert_eq!(fx.complete("pro", "/").await, replaced("projects "));
    }

    #[tokio::test]
    async fn test_command_ambiguous_lists_all() {
        let fx = Fixture::new();
        assert_eq!(
            fx.complete("p", "/").await,
            suggested(&["pacman", "post", "projects", "pwd"])
        );
        // No common-prefix extension for command names
        assert_eq!(fx.complete("lo", "/").await, suggested(&["login", "logout"]));
    }

    #[tokio::test]
    async fn test_command_no_match() {
        let fx = Fixture::new();
        assert!(fx.complete("xyz", "/").await.is_empty());
    }

    #[tokio::test]
    async fn test_subcommands() {
        let fx = Fixture::new();
        assert_eq!(fx.complete("post sh", "/").await, replaced("post show "));
        assert_eq!(fx.complete("post ", "/").await.suggestions.len(), 7);
        assert_eq!(fx.complete("post u", "/").await, replaced("post untag "));
    }

    #[tokio::test]
    async fn test_path_directory_gets_slash() {
        let fx = Fixture::new();
        assert_eq!(fx.complete("cd proj", "/").await, replaced("cd projects/"));
    }

    #[tokio::test]
    async fn test_path_common_prefix_extension() {
        let fx = Fixture::new();
        assert_eq!(
            fx.complete("cat projects/p", "/").await,
            replaced("cat projects/project-")
        );
        assert_eq!(
            fx.complete("cat projects/project-", "/").await,
            suggested(&["project-alpha.txt", "project-beta.txt", "project-gamma.txt"])
        );
        assert_eq!(
            fx.complete("cat projects/project-b", "/").await,
            replaced("cat projects/project-beta.txt ")
        );
    }

    #[tokio::test]
    async fn test_path_relative_to_cwd() {
        let fx = Fixture::new();
        assert_eq!(fx.complete("vim ../q", "/projects").await, replaced("vim ../quotes.txt "));
        assert_eq!(fx.complete("ls ", "/mycode").await, suggested(&["Counter.tsx", "GreetingsPlanet.tsx"]));
    }

    #[tokio::test]
    async fn test_path_through_file_is_noop() {
        let fx = Fixture::new();
        assert!(fx.complete("cat quotes.txt/x", "/").await.is_empty());
        assert!(fx.complete("cd nowhere/x", "/").await.is_empty());
    }

    #[tokio::test]
    async fn test_grep_file_argument() {
        let fx = Fixture::new();
        assert_eq!(fx.complete("grep love qu", "/").await, replaced("grep love quotes.txt "));
        assert!(fx.complete("grep lo", "/").await.is_empty());
    }

    #[tokio::test]
    async fn test_slug_show_hides_drafts_from_guests() {
        let fx = Fixture::new();
        assert_eq!(fx.complete("post show r", "/").await, replaced("post show rust-a"));
        assert_eq!(
            fx.complete("post show rust-a", "/").await,
            suggested(&["rust-async", "rust-atomics"])
        );
        assert_eq!(fx.complete("post show z", "/").await, replaced("post show zig "));
    }

    #[tokio::test]
    async fn test_slug_signed_in_sees_drafts() {
        let fx = Fixture::new();
        fx.backend.sign_in("admin@example.com", "hunter22").await.unwrap();
        assert_eq!(fx.complete("post show rust-", "/").await,
            suggested(&["rust-async", "rust-atomics", "rust-draft"]));
        assert_eq!(fx.complete("post edit rust-d", "/").await, replaced("post edit rust-draft "));
    }

    #[tokio::test]
    async fn test_slug_private_requires_session() {
        let fx = Fixture::new();
        assert!(fx.complete("post edit r", "/").await.is_empty());
        assert!(fx.complete("post new r", "/").await.is_empty());
    }

    #[tokio::test]
    async fn test_slug_backend_failure_is_noop() {
        let fx = Fixture::new();
        fx.backend.set_outage(Some("down"));
        assert!(fx.complete("post show r", "/").await.is_empty());
    }
}
