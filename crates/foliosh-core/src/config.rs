//! Terminal configuration.
//!
//! Centralizes the constants used throughout the interpreter.
//! Site data and art are loaded at compile time using `include_str!`.

// =============================================================================
// Embedded Assets
// =============================================================================

/// Default site document (owner, about text, quotes, projects, code samples).
pub const SITE_JSON: &str = include_str!("../assets/site.json");

/// ASCII banner shown by `welcome` and at session start.
pub const ASCII_BANNER: &str = include_str!("../assets/text/banner.txt");

/// ASCII art shown by `neofetch`.
pub const NEOFETCH_ART: &str = include_str!("../assets/text/neofetch.txt");

// =============================================================================
// Identity
// =============================================================================

/// Host name shown in the prompt.
pub const APP_HOST: &str = "portfolio";

/// User name shown when nobody is signed in.
pub const GUEST_NAME: &str = "guest";

/// Tagline printed under the banner.
pub const WELCOME_MESSAGE: &str =
    "Welcome to my interactive portfolio! Type 'help' to see available commands.";

// =============================================================================
// Limits
// =============================================================================

/// Maximum number of remembered input lines.
pub const MAX_COMMAND_HISTORY: usize = 50;

/// Maximum number of scrollback lines kept before the oldest are evicted.
pub const MAX_SCROLLBACK: usize = 1000;

// =============================================================================
// Completion vocabulary
// =============================================================================

/// Subcommands of `post`, in help order.
pub const POST_SUBCOMMANDS: &[&str] = &["new", "publish", "list", "show", "edit", "tag", "untag"];

/// Commands whose arguments are filesystem paths.
pub const PATH_COMMANDS: &[&str] = &["cd", "ls", "cat", "vim"];

/// `post` subcommands whose first argument is a slug that requires a session.
pub const PRIVATE_SLUG_SUBCOMMANDS: &[&str] = &["edit", "publish", "tag", "untag"];

// =============================================================================
// Paths
// =============================================================================

/// Directory holding one file per project.
pub const PROJECTS_DIR: &str = "/projects";

/// Public URL prefix for blog posts.
pub const BLOG_URL: &str = "/blog";

/// Public URL of the guestbook page.
pub const GUESTBOOK_URL: &str = "/guestbook";
