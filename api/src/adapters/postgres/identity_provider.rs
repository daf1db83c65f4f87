//! PostgreSQL adapter for IdentityProvider
//!
//! Users live in `auth_user` with Argon2 password hashes; sessions live in
//! `user_sessions` keyed by the SHA-256 of the bearer token.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};

use crate::auth::{generate_session_token, hash_password, hash_session_token, verify_password};
use crate::domain::entities::{NewUser, Session, SessionId, User, UserId};
use crate::domain::ports::IdentityProvider;
use crate::entity::{auth_user, user_sessions};
use crate::error::DomainError;

/// PostgreSQL implementation of IdentityProvider
pub struct PostgresIdentityProvider {
    db: DatabaseConnection,
    session_ttl: Duration,
}

impl PostgresIdentityProvider {
    pub fn new(db: DatabaseConnection, session_ttl: Duration) -> Self {
        Self { db, session_ttl }
    }

    async fn find_model_by_username(
        &self,
        username: &str,
    ) -> Result<Option<auth_user::Model>, DomainError> {
        auth_user::Entity::find()
            .filter(auth_user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}

#[async_trait]
impl IdentityProvider for PostgresIdentityProvider {
    async fn create_user(&self, user: &NewUser) -> Result<User, DomainError> {
        if self.find_model_by_username(&user.username).await?.is_some() {
            return Err(DomainError::AlreadyExists(format!(
                "User '{}' already exists",
                user.username
            )));
        }

        let password_hash = hash_password(&user.password)?;
        let now = Utc::now().fixed_offset();

        let model = auth_user::ActiveModel {
            password: Set(password_hash),
            last_login: Set(None),
            is_superuser: Set(false),
            username: Set(user.username.clone()),
            first_name: Set(String::new()),
            last_name: Set(String::new()),
            email: Set(user.email.clone()),
            is_staff: Set(false),
            is_active: Set(true),
            date_joined: Set(now),
            ..Default::default()
        };

        // Unique index on username catches a concurrent registration
        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| insert_user_error(e, &user.username))?;

        Ok(result.into())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self.find_model_by_username(username).await?.map(|m| m.into()))
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let Some(model) = self.find_model_by_username(username).await? else {
            return Ok(None);
        };

        if !model.is_active || !verify_password(password, &model.password) {
            return Ok(None);
        }

        let now = Utc::now().fixed_offset();
        let updated = auth_user::ActiveModel {
            id: Set(model.id),
            last_login: Set(Some(now)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Some(updated.into()))
    }

    async fn establish_session(&self, user: &User) -> Result<Session, DomainError> {
        let token = generate_session_token();
        let id = SessionId::new();
        let now = Utc::now();
        let expires_at = now + self.session_ttl;

        user_sessions::ActiveModel {
            id: Set(id.0),
            token_hash: Set(hash_session_token(&token)),
            user_id: Set(user.id.0),
            created_at: Set(now.fixed_offset()),
            expires_at: Set(expires_at.fixed_offset()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Session {
            id,
            token,
            user_id: user.id,
            expires_at,
        })
    }

    async fn resolve_session(&self, token: &str) -> Result<Option<User>, DomainError> {
        let now = Utc::now().fixed_offset();

        let result = user_sessions::Entity::find()
            .filter(user_sessions::Column::TokenHash.eq(hash_session_token(token)))
            .filter(user_sessions::Column::ExpiresAt.gt(now))
            .find_also_related(auth_user::Entity)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.and_then(|(_, user)| user).map(|m| m.into()))
    }

    async fn terminate_session(&self, token: &str) -> Result<(), DomainError> {
        user_sessions::Entity::delete_many()
            .filter(user_sessions::Column::TokenHash.eq(hash_session_token(token)))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}

fn insert_user_error(err: DbErr, username: &str) -> DomainError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::AlreadyExists(format!("User '{}' already exists", username))
        }
        _ => DomainError::Database(err.to_string()),
    }
}

/// Convert SeaORM model to domain entity (the password hash stays behind)
impl From<auth_user::Model> for User {
    fn from(model: auth_user::Model) -> Self {
        User {
            id: UserId(model.id),
            username: model.username,
            email: model.email,
            date_joined: model.date_joined.with_timezone(&Utc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_constraint_insert_errors_are_database_errors() {
        let err = insert_user_error(DbErr::Custom("connection reset".to_string()), "alice");
        assert!(matches!(err, DomainError::Database(msg) if msg.contains("connection reset")));

        // Driver wording alone does not make a constraint violation
        let err = insert_user_error(
            DbErr::Custom("duplicate key value violates unique constraint".to_string()),
            "alice",
        );
        assert!(matches!(err, DomainError::Database(_)));
    }
}
