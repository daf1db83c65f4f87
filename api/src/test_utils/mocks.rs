//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    Choice, ChoiceId, ExternalPost, NewUser, Question, QuestionId, Session, SessionId, User,
    UserId,
};
use crate::domain::ports::{ChoiceRepository, FeedClient, IdentityProvider, QuestionRepository};
use crate::error::{DomainError, FeedError};

// ============================================================================
// In-Memory Question Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryQuestionRepository {
    questions: Arc<RwLock<HashMap<QuestionId, Question>>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a question for testing
    pub fn with_question(self, question: Question) -> Self {
        self.questions
            .write()
            .unwrap()
            .insert(question.id, question);
        self
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<Question>, DomainError> {
        let questions = self.questions.read().unwrap();
        Ok(questions.get(id).cloned())
    }

    async fn find_latest(&self, limit: u64) -> Result<Vec<Question>, DomainError> {
        let questions = self.questions.read().unwrap();
        let mut sorted: Vec<_> = questions.values().cloned().collect();
        sorted.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        Ok(sorted.into_iter().take(limit as usize).collect())
    }
}

// ============================================================================
// In-Memory Choice Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryChoiceRepository {
    choices: Arc<RwLock<HashMap<ChoiceId, Choice>>>,
}

impl InMemoryChoiceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a choice for testing
    pub fn with_choice(self, choice: Choice) -> Self {
        self.choices.write().unwrap().insert(choice.id, choice);
        self
    }

    /// Current tally of a choice
    pub fn votes_of(&self, id: ChoiceId) -> Option<i32> {
        self.choices.read().unwrap().get(&id).map(|c| c.votes)
    }

    /// Sum of all tallies across every question
    pub fn total_votes(&self) -> i64 {
        self.choices
            .read()
            .unwrap()
            .values()
            .map(|c| i64::from(c.votes))
            .sum()
    }
}

#[async_trait]
impl ChoiceRepository for InMemoryChoiceRepository {
    async fn find_by_question(
        &self,
        question_id: &QuestionId,
    ) -> Result<Vec<Choice>, DomainError> {
        let choices = self.choices.read().unwrap();
        let mut found: Vec<_> = choices
            .values()
            .filter(|c| c.question_id == *question_id)
            .cloned()
            .collect();
        found.sort_by_key(|c| c.id);
        Ok(found)
    }

    async fn increment_votes(
        &self,
        question_id: &QuestionId,
        choice_id: &ChoiceId,
    ) -> Result<Option<Choice>, DomainError> {
        let mut choices = self.choices.write().unwrap();
        match choices.get_mut(choice_id) {
            Some(choice) if choice.question_id == *question_id => {
                choice.votes += 1;
                Ok(Some(choice.clone()))
            }
            _ => Ok(None),
        }
    }
}

// ============================================================================
// In-Memory Identity Provider
// ============================================================================

struct StoredUser {
    user: User,
    password: String,
}

struct StoredSession {
    user_id: UserId,
    expires_at: chrono::DateTime<Utc>,
}

/// Identity provider backed by hash maps.
///
/// Passwords are kept in plaintext and session tokens are stored as-is;
/// clones share the same state.
#[derive(Clone)]
pub struct InMemoryIdentityProvider {
    users: Arc<RwLock<HashMap<String, StoredUser>>>,
    sessions: Arc<RwLock<HashMap<String, StoredSession>>>,
    next_id: Arc<RwLock<i32>>,
    session_ttl: Duration,
}

impl Default for InMemoryIdentityProvider {
    fn default() -> Self {
        Self {
            users: Arc::default(),
            sessions: Arc::default(),
            next_id: Arc::new(RwLock::new(1)),
            session_ttl: Duration::hours(1),
        }
    }
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sessions expire this long after login
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, username: &str, password: &str) -> Self {
        let id = self.allocate_id();
        self.users.write().unwrap().insert(
            username.to_string(),
            StoredUser {
                user: User {
                    id,
                    username: username.to_string(),
                    email: format!("{}@example.com", username),
                    date_joined: Utc::now(),
                },
                password: password.to_string(),
            },
        );
        self
    }

    /// Number of live session records
    pub fn session_count(&self) -> usize {
        self.sessions.read().unwrap().len()
    }

    fn allocate_id(&self) -> UserId {
        let mut next = self.next_id.write().unwrap();
        let id = UserId(*next);
        *next += 1;
        id
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn create_user(&self, new_user: &NewUser) -> Result<User, DomainError> {
        if self.users.read().unwrap().contains_key(&new_user.username) {
            return Err(DomainError::AlreadyExists(format!(
                "User '{}' already exists",
                new_user.username
            )));
        }

        let user = User {
            id: self.allocate_id(),
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            date_joined: Utc::now(),
        };

        self.users.write().unwrap().insert(
            user.username.clone(),
            StoredUser {
                user: user.clone(),
                password: new_user.password.clone(),
            },
        );

        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.get(username).map(|s| s.user.clone()))
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users
            .get(username)
            .filter(|s| s.password == password)
            .map(|s| s.user.clone()))
    }

    async fn establish_session(&self, user: &User) -> Result<Session, DomainError> {
        let token = uuid::Uuid::new_v4().simple().to_string();
        let expires_at = Utc::now() + self.session_ttl;

        self.sessions.write().unwrap().insert(
            token.clone(),
            StoredSession {
                user_id: user.id,
                expires_at,
            },
        );

        Ok(Session {
            id: SessionId::new(),
            token,
            user_id: user.id,
            expires_at,
        })
    }

    async fn resolve_session(&self, token: &str) -> Result<Option<User>, DomainError> {
        let sessions = self.sessions.read().unwrap();
        let Some(session) = sessions.get(token) else {
            return Ok(None);
        };
        if session.expires_at <= Utc::now() {
            return Ok(None);
        }

        let users = self.users.read().unwrap();
        Ok(users
            .values()
            .find(|s| s.user.id == session.user_id)
            .map(|s| s.user.clone()))
    }

    async fn terminate_session(&self, token: &str) -> Result<(), DomainError> {
        self.sessions.write().unwrap().remove(token);
        Ok(())
    }
}

// ============================================================================
// Mock Feed Client
// ============================================================================

enum FeedBehavior {
    Posts(Vec<ExternalPost>),
    Status(u16),
    Undecodable,
}

pub struct MockFeedClient {
    behavior: FeedBehavior,
}

impl MockFeedClient {
    /// Upstream answers 200 with these posts
    pub fn with_posts(posts: Vec<ExternalPost>) -> Self {
        Self {
            behavior: FeedBehavior::Posts(posts),
        }
    }

    /// Upstream answers with a non-success status
    pub fn failing_with_status(status: u16) -> Self {
        Self {
            behavior: FeedBehavior::Status(status),
        }
    }

    /// Upstream answers 200 with a body that is not a post list
    pub fn failing_to_decode() -> Self {
        Self {
            behavior: FeedBehavior::Undecodable,
        }
    }
}

#[async_trait]
impl FeedClient for MockFeedClient {
    async fn fetch_posts(&self) -> Result<Vec<ExternalPost>, FeedError> {
        match &self.behavior {
            FeedBehavior::Posts(posts) => Ok(posts.clone()),
            FeedBehavior::Status(status) => Err(FeedError::Status { status: *status }),
            FeedBehavior::Undecodable => Err(FeedError::Deserialization(
                "invalid type: map, expected a sequence".to_string(),
            )),
        }
    }
}
