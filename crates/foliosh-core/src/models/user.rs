//! Authenticated user as reported by the backend session.

/// Signed-in account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub email: String,
}

impl User {
    /// Name shown in the prompt: the local part of the e-mail address.
    pub fn display_name(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }
}
