//! Data-access capability injected into the interpreter.
//!
//! Everything the terminal needs from the outside world (auth session,
//! posts, the "about" document) goes through [`Backend`]. The interpreter
//! never reaches for a global client, so tests can run against
//! [`MemoryBackend`].

#[cfg(any(test, feature = "mock"))]
mod memory;

#[cfg(any(test, feature = "mock"))]
pub use memory::MemoryBackend;

use crate::core::error::BackendError;
use crate::models::{NewPost, Post, SlugHit, User};

/// Asynchronous content and authentication collaborator.
///
/// Futures are awaited on the session's single-threaded executor and need
/// not be `Send`.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// The signed-in user, if any.
    async fn current_user(&self) -> Option<User>;

    /// Start a session with e-mail and password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<User, BackendError>;

    /// Register a new account. Does not start a session.
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), BackendError>;

    async fn sign_out(&self) -> Result<(), BackendError>;

    /// Text served for `about` and `/about.txt`.
    async fn about(&self) -> Result<String, BackendError>;

    /// Published posts, newest publication first.
    async fn published_posts(&self) -> Result<Vec<Post>, BackendError>;

    /// Every post, newest creation first. Requires an editor session.
    async fn all_posts(&self) -> Result<Vec<Post>, BackendError>;

    /// Look up a post by slug. Drafts are only visible to signed-in users.
    async fn find_post(&self, slug: &str) -> Result<Option<Post>, BackendError>;

    /// Create an unpublished draft.
    async fn create_post(&self, post: NewPost) -> Result<Post, BackendError>;

    /// Mark a post as published now.
    async fn publish_post(&self, slug: &str) -> Result<Post, BackendError>;

    async fn update_post_content(&self, id: u64, content: &str) -> Result<(), BackendError>;

    /// Attach tags (created on demand) to a post.
    async fn tag_post(&self, slug: &str, tags: &[String]) -> Result<(), BackendError>;

    /// Detach tags from a post, returning how many were removed.
    async fn untag_post(&self, slug: &str, tags: &[String]) -> Result<usize, BackendError>;

    /// Slugs starting with `prefix`, compared case-insensitively.
    async fn search_slugs(&self, prefix: &str) -> Result<Vec<SlugHit>, BackendError>;
}
