//! In-memory [`Backend`] used by tests and the demo binary.

use std::cell::RefCell;

use chrono::Utc;

use super::Backend;
use crate::core::error::BackendError;
use crate::models::{NewPost, Post, SlugHit, User};

#[derive(Debug, Clone)]
struct Account {
    id: u64,
    email: String,
    password: String,
    admin: bool,
}

#[derive(Debug, Default)]
struct State {
    accounts: Vec<Account>,
    session: Option<u64>,
    posts: Vec<Post>,
    about: String,
    outage: Option<String>,
}

impl State {
    fn check_outage(&self) -> Result<(), BackendError> {
        match &self.outage {
            Some(msg) => Err(BackendError::Network(msg.clone())),
            None => Ok(()),
        }
    }

    fn session_account(&self) -> Option<&Account> {
        let id = self.session?;
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Rows are writable only by admin sessions.
    fn require_admin(&self) -> Result<&Account, BackendError> {
        match self.session_account() {
            Some(account) if account.admin => Ok(account),
            _ => Err(BackendError::PermissionDenied),
        }
    }

    fn post_mut(&mut self, slug: &str) -> Result<&mut Post, BackendError> {
        self.posts
            .iter_mut()
            .find(|p| p.slug == slug)
            .ok_or(BackendError::NotFound)
    }
}

/// Backend holding accounts and posts in process memory.
///
/// Mirrors the hosted backend's row policies: anyone may read published
/// posts, signed-in users may read drafts, admins may write.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: RefCell<State>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_about(self, about: impl Into<String>) -> Self {
        self.state.borrow_mut().about = about.into();
        self
    }

    /// Register an account. `admin` accounts may manage posts.
    pub fn with_account(self, email: &str, password: &str, admin: bool) -> Self {
        {
            let mut state = self.state.borrow_mut();
            let id = state.accounts.len() as u64 + 1;
            state.accounts.push(Account {
                id,
                email: email.to_string(),
                password: password.to_string(),
                admin,
            });
        }
        self
    }

    /// Seed a post. Its id is reassigned to keep ids unique.
    pub fn with_post(self, mut post: Post) -> Self {
        {
            let mut state = self.state.borrow_mut();
            post.id = state.posts.len() as u64 + 1;
            state.posts.push(post);
        }
        self
    }

    /// Make every subsequent call fail with a network error (`None` restores).
    pub fn set_outage(&self, message: Option<&str>) {
        self.state.borrow_mut().outage = message.map(str::to_string);
    }
}

impl Backend for MemoryBackend {
    async fn current_user(&self) -> Option<User> {
        let state = self.state.borrow();
        state.session_account().map(|a| User {
            id: a.id,
            email: a.email.clone(),
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<User, BackendError> {
        let mut state = self.state.borrow_mut();
        state.check_outage()?;
        let account = state
            .accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
            .cloned()
            .ok_or_else(|| BackendError::Auth("Invalid login credentials".into()))?;
        state.session = Some(account.id);
        Ok(User {
            id: account.id,
            email: account.email,
        })
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), BackendError> {
        let mut state = self.state.borrow_mut();
        state.check_outage()?;
        if state.accounts.iter().any(|a| a.email == email) {
            return Err(BackendError::Auth("User already registered".into()));
        }
        if password.len() < 6 {
            return Err(BackendError::Auth(
                "Password should be at least 6 characters.".into(),
            ));
        }
        let id = state.accounts.len() as u64 + 1;
        state.accounts.push(Account {
            id,
            email: email.to_string(),
            password: password.to_string(),
            admin: false,
        });
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        let mut state = self.state.borrow_mut();
        state.check_outage()?;
        state.session = None;
        Ok(())
    }

    async fn about(&self) -> Result<String, BackendError> {
        let state = self.state.borrow();
        state.check_outage()?;
        Ok(state.about.clone())
    }

    async fn published_posts(&self) -> Result<Vec<Post>, BackendError> {
        let state = self.state.borrow();
        state.check_outage()?;
        let mut posts: Vec<Post> = state.posts.iter().filter(|p| p.is_published).cloned().collect();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at).then(b.id.cmp(&a.id)));
        Ok(posts)
    }

    async fn all_posts(&self) -> Result<Vec<Post>, BackendError> {
        let state = self.state.borrow();
        state.check_outage()?;
        state.require_admin()?;
        let mut posts = state.posts.clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(posts)
    }

    async fn find_post(&self, slug: &str) -> Result<Option<Post>, BackendError> {
        let state = self.state.borrow();
        state.check_outage()?;
        let signed_in = state.session.is_some();
        Ok(state
            .posts
            .iter()
            .find(|p| p.slug == slug && (p.is_published || signed_in))
            .cloned())
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, BackendError> {
        let mut state = self.state.borrow_mut();
        state.check_outage()?;
        state.require_admin()?;
        if state.posts.iter().any(|p| p.slug == post.slug) {
            return Err(BackendError::Conflict);
        }
        let created = Post {
            id: state.posts.iter().map(|p| p.id).max().unwrap_or(0) + 1,
            title: post.title,
            slug: post.slug,
            content: None,
            is_published: false,
            published_at: None,
            created_at: Utc::now(),
            author_id: post.author_id,
            tags: Vec::new(),
        };
        state.posts.push(created.clone());
        Ok(created)
    }

    async fn publish_post(&self, slug: &str) -> Result<Post, BackendError> {
        let mut state = self.state.borrow_mut();
        state.check_outage()?;
        state.require_admin()?;
        let post = state.post_mut(slug)?;
        post.is_published = true;
        post.published_at = Some(Utc::now());
        Ok(post.clone())
    }

    async fn update_post_content(&self, id: u64, content: &str) -> Result<(), BackendError> {
        let mut state = self.state.borrow_mut();
        state.check_outage()?;
        state.require_admin()?;
        let post = state
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(BackendError::NotFound)?;
        post.content = Some(content.to_string());
        Ok(())
    }

    async fn tag_post(&self, slug: &str, tags: &[String]) -> Result<(), BackendError> {
        let mut state = self.state.borrow_mut();
        state.check_outage()?;
        state.require_admin()?;
        let post = state.post_mut(slug)?;
        for tag in tags {
            if !post.tags.contains(tag) {
                post.tags.push(tag.clone());
            }
        }
        Ok(())
    }

    async fn untag_post(&self, slug: &str, tags: &[String]) -> Result<usize, BackendError> {
        let mut state = self.state.borrow_mut();
        state.check_outage()?;
        state.require_admin()?;
        let post = state.post_mut(slug)?;
        let before = post.tags.len();
        post.tags.retain(|t| !tags.contains(t));
        Ok(before - post.tags.len())
    }

    async fn search_slugs(&self, prefix: &str) -> Result<Vec<SlugHit>, BackendError> {
        let state = self.state.borrow();
        state.check_outage()?;
        let prefix = prefix.to_lowercase();
        Ok(state
            .posts
            .iter()
            .filter(|p| p.slug.to_lowercase().starts_with(&prefix))
            .map(|p| SlugHit {
                slug: p.slug.clone(),
                is_published: p.is_published,
            })
            .collect())
    }
}
