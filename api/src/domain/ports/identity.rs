//! Identity provider port
//!
//! Credential storage, password verification and session bookkeeping live
//! behind this trait so services never touch password hashes or session
//! storage directly.

use async_trait::async_trait;

use crate::domain::entities::{NewUser, Session, User};
use crate::error::DomainError;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a user account. Fails with `AlreadyExists` if the username is taken.
    async fn create_user(&self, user: &NewUser) -> Result<User, DomainError>;

    /// Find a user by username (exact match)
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Check a username/password pair. `None` means the credentials do not match.
    async fn authenticate(&self, username: &str, password: &str)
        -> Result<Option<User>, DomainError>;

    /// Start a new session for a user and return it with its raw token
    async fn establish_session(&self, user: &User) -> Result<Session, DomainError>;

    /// Resolve a raw session token to its user, ignoring expired sessions
    async fn resolve_session(&self, token: &str) -> Result<Option<User>, DomainError>;

    /// End the session identified by a raw token. Unknown tokens are a no-op.
    async fn terminate_session(&self, token: &str) -> Result<(), DomainError>;
}
