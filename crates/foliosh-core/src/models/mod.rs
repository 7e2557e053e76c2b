//! Data models and types for the terminal.
//!
//! Contains domain types for:
//! - [`OutputLine`], [`Rich`], [`Block`] - Scrollback content
//! - [`Site`], [`Project`] - Static content the filesystem is built from
//! - [`Post`], [`User`] - Records exchanged with the backend
//! - [`Theme`] - Terminal palettes

mod post;
mod site;
mod terminal;
mod theme;
mod user;

pub use post::{NewPost, Post, SlugHit};
pub use site::{CodeSample, Owner, Project, Site};
pub use terminal::{Block, LineData, LineRole, ListEntry, OutputLine, Rich, Span, TextStyle};
pub use theme::{Theme, UnknownTheme};
pub use user::User;
