//! Repository port traits
//!
//! These traits define the interface for poll data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{Choice, ChoiceId, Question, QuestionId};
use crate::error::DomainError;

/// Repository for Question entities
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Find a question by ID
    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<Question>, DomainError>;

    /// Most recently published questions, newest first
    async fn find_latest(&self, limit: u64) -> Result<Vec<Question>, DomainError>;
}

/// Repository for Choice entities
#[async_trait]
pub trait ChoiceRepository: Send + Sync {
    /// All choices of a question, ordered by ID
    async fn find_by_question(&self, question_id: &QuestionId)
        -> Result<Vec<Choice>, DomainError>;

    /// Atomically add one vote to a choice of the given question.
    ///
    /// Returns the updated choice, or `None` when no choice with that ID
    /// belongs to the question. Implementations must not lose concurrent
    /// increments.
    async fn increment_votes(
        &self,
        question_id: &QuestionId,
        choice_id: &ChoiceId,
    ) -> Result<Option<Choice>, DomainError>;
}
