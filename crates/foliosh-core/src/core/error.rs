//! Error types for the interpreter core.
//!
//! - [`BackendError`] - Failures reported by the content/auth backend
//! - [`SiteError`] - Malformed site documents
//!
//! Command handlers turn every [`BackendError`] into an output line; none of
//! these reach the view layer.

use thiserror::Error;

/// Failure reported by a [`Backend`](crate::backend::Backend) call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Signed in, but the account lacks the rights for this operation
    #[error("permission denied")]
    PermissionDenied,
    /// The requested record does not exist (or is hidden from the caller)
    #[error("not found")]
    NotFound,
    /// A unique key (e.g. a post slug) is already taken
    #[error("already exists")]
    Conflict,
    /// Credential failure from sign-in or sign-up
    #[error("{0}")]
    Auth(String),
    /// Transport failure
    #[error("{0}")]
    Network(String),
    /// The backend rejected or failed the query
    #[error("{0}")]
    Query(String),
}

/// Site document could not be loaded.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("invalid site document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid site document: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_messages_are_raw() {
        assert_eq!(
            BackendError::Network("connection reset".into()).to_string(),
            "connection reset"
        );
        assert_eq!(BackendError::PermissionDenied.to_string(), "permission denied");
    }
}
