//! Auth service
//!
//! Registration, login and logout on top of the identity provider port.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Deserialize;

use crate::domain::entities::{NewUser, Session, User};
use crate::domain::ports::IdentityProvider;
use crate::error::{AppError, DomainError, FieldErrors};

pub const USERNAME_MAX_LEN: usize = 150;
pub const PASSWORD_MIN_LEN: usize = 8;

const REQUIRED: &str = "This field is required.";

// Letters, digits and @ . + - _
static USERNAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.@+-]+$").expect("USERNAME_PATTERN: invalid regex pattern")
});
pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";

/// Submitted registration form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

impl RegistrationForm {
    /// Field-level validation that does not need the identity store
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = FieldErrors::new();
        let mut add = |field: &str, message: &str| {
            errors
                .entry(field.to_string())
                .or_default()
                .push(message.to_string());
        };

        let username = self.username.trim();
        if username.is_empty() {
            add("username", REQUIRED);
        } else {
            if username.chars().count() > USERNAME_MAX_LEN {
                add(
                    "username",
                    "Ensure this value has at most 150 characters.",
                );
            }
            if !USERNAME_PATTERN.is_match(username) {
                add(
                    "username",
                    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
                );
            }
        }

        let email = self.email.trim();
        if email.is_empty() {
            add("email", REQUIRED);
        } else if !looks_like_email(email) {
            add("email", "Enter a valid email address.");
        }

        if self.password1.is_empty() {
            add("password1", REQUIRED);
        } else {
            if self.password1.chars().count() < PASSWORD_MIN_LEN {
                add(
                    "password2",
                    "This password is too short. It must contain at least 8 characters.",
                );
            }
            if self.password1.chars().all(|c| c.is_ascii_digit()) {
                add("password2", "This password is entirely numeric.");
            }
            if !username.is_empty() && self.password1.eq_ignore_ascii_case(username) {
                add("password2", "The password is too similar to the username.");
            }
        }

        if self.password2.is_empty() {
            add("password2", REQUIRED);
        } else if !self.password1.is_empty() && self.password1 != self.password2 {
            add("password2", "The two password fields didn't match.");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::InvalidFields(errors).into())
        }
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Service for user accounts and sessions
pub struct AuthService<IP>
where
    IP: IdentityProvider + ?Sized,
{
    identity: Arc<IP>,
}

impl<IP> AuthService<IP>
where
    IP: IdentityProvider + ?Sized,
{
    pub fn new(identity: Arc<IP>) -> Self {
        Self { identity }
    }

    /// Register a new user account
    pub async fn register(&self, form: &RegistrationForm) -> Result<User, AppError> {
        form.validate()?;

        let username = form.username.trim();
        let taken = || {
            let mut errors = FieldErrors::new();
            errors.insert(
                "username".to_string(),
                vec!["A user with that username already exists.".to_string()],
            );
            AppError::Domain(DomainError::InvalidFields(errors))
        };

        if self.identity.find_user_by_username(username).await?.is_some() {
            return Err(taken());
        }

        let new_user = NewUser {
            username: username.to_string(),
            email: form.email.trim().to_string(),
            password: form.password1.clone(),
        };

        let user = self.identity.create_user(&new_user).await.map_err(|e| match e {
            DomainError::AlreadyExists(_) => taken(),
            e => AppError::Domain(e),
        })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Check credentials and open a session
    pub async fn login(&self, username: &str, password: &str) -> Result<(User, Session), AppError> {
        let user = self
            .identity
            .authenticate(username.trim(), password)
            .await?
            .ok_or_else(|| DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        let session = self.identity.establish_session(&user).await?;

        tracing::info!(
            user_id = %session.user_id,
            session_id = %session.id,
            expires_at = %session.expires_at,
            "User logged in"
        );
        Ok((user, session))
    }

    /// Resolve a session token to its user
    pub async fn current_user(&self, token: &str) -> Result<Option<User>, AppError> {
        Ok(self.identity.resolve_session(token).await?)
    }

    /// End a session
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        self.identity.terminate_session(token).await?;
        tracing::info!("User logged out");
        Ok(())
    }
}
