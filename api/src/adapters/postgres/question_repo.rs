//! PostgreSQL adapter for QuestionRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, QuerySelect};

use crate::domain::entities::{Question, QuestionId};
use crate::domain::ports::QuestionRepository;
use crate::entity::polls_question;
use crate::error::DomainError;

/// PostgreSQL implementation of QuestionRepository
pub struct PostgresQuestionRepository {
    db: DatabaseConnection,
}

impl PostgresQuestionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl QuestionRepository for PostgresQuestionRepository {
    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<Question>, DomainError> {
        let result = polls_question::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_latest(&self, limit: u64) -> Result<Vec<Question>, DomainError> {
        let results = polls_question::Entity::find()
            .order_by_desc(polls_question::Column::PubDate)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<polls_question::Model> for Question {
    fn from(model: polls_question::Model) -> Self {
        Question {
            id: QuestionId(model.id),
            question_text: model.question_text,
            pub_date: model.pub_date.with_timezone(&Utc),
        }
    }
}
