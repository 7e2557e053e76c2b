//! Session commands: `signup`, `login`, `logout`, `whoami`.

use super::result::{AuthAction, AuthKind, CommandOutput, Directive};
use crate::backend::Backend;
use crate::config::GUEST_NAME;

fn request_password(kind: AuthKind, args: &[String], usage: &str) -> CommandOutput {
    match args.first() {
        Some(email) => Directive::RequestPassword(AuthAction {
            kind,
            email: email.clone(),
        })
        .into(),
        None => CommandOutput::text(usage),
    }
}

pub fn signup(args: &[String]) -> CommandOutput {
    request_password(AuthKind::Signup, args, "Usage: signup <email>")
}

pub fn login(args: &[String]) -> CommandOutput {
    request_password(AuthKind::Login, args, "Usage: login <email>")
}

pub async fn logout<B: Backend>(backend: &B) -> CommandOutput {
    match backend.sign_out().await {
        Ok(()) => CommandOutput::text("Logged out successfully."),
        Err(e) => CommandOutput::Text(format!("Logout failed: {}", e)),
    }
}

pub async fn whoami<B: Backend>(backend: &B) -> CommandOutput {
    match backend.current_user().await {
        Some(user) => CommandOutput::Text(user.email),
        None => CommandOutput::text(GUEST_NAME),
    }
}

/// Finish a login or signup once the password has been entered.
pub async fn complete_auth<B: Backend>(action: &AuthAction, password: &str, backend: &B) -> String {
    match action.kind {
        AuthKind::Login => match backend.sign_in(&action.email, password).await {
            Ok(user) => format!("Logged in as {}", user.email),
            Err(e) => format!("Login failed: {}", e),
        },
        AuthKind::Signup => match backend.sign_up(&action.email, password).await {
            Ok(()) => {
                "Signup successful! Please check your email for a confirmation link.".to_string()
            }
            Err(e) => format!("Signup failed: {}", e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    #[test]
    fn test_login_requests_password() {
        assert_eq!(login(&[]), CommandOutput::text("Usage: login <email>"));
        assert_eq!(
            login(&["a@b.c".to_string()]),
            CommandOutput::Directive(Directive::RequestPassword(AuthAction {
                kind: AuthKind::Login,
                email: "a@b.c".into(),
            }))
        );
        assert_eq!(signup(&[]), CommandOutput::text("Usage: signup <email>"));
    }

    #[tokio::test]
    async fn test_complete_login() {
        let backend = MemoryBackend::new().with_account("ada@example.com", "pw123456", false);
        let action = AuthAction {
            kind: AuthKind::Login,
            email: "ada@example.com".into(),
        };
        assert_eq!(
            complete_auth(&action, "wrong", &backend).await,
            "Login failed: Invalid login credentials"
        );
        assert_eq!(
            complete_auth(&action, "pw123456", &backend).await,
            "Logged in as ada@example.com"
        );
        assert_eq!(whoami(&backend).await, CommandOutput::text("ada@example.com"));
        assert_eq!(logout(&backend).await, CommandOutput::text("Logged out successfully."));
        assert_eq!(whoami(&backend).await, CommandOutput::text("guest"));
    }

    #[tokio::test]
    async fn test_complete_signup() {
        let backend = MemoryBackend::new();
        let action = AuthAction {
            kind: AuthKind::Signup,
            email: "new@example.com".into(),
        };
        assert_eq!(
            complete_auth(&action, "123", &backend).await,
            "Signup failed: Password should be at least 6 characters."
        );
        assert_eq!(
            complete_auth(&action, "123456", &backend).await,
            "Signup successful! Please check your email for a confirmation link."
        );
    }
}
