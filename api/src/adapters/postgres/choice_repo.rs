//! PostgreSQL adapter for ChoiceRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::domain::entities::{Choice, ChoiceId, QuestionId};
use crate::domain::ports::ChoiceRepository;
use crate::entity::polls_choice;
use crate::error::DomainError;

/// PostgreSQL implementation of ChoiceRepository
pub struct PostgresChoiceRepository {
    db: DatabaseConnection,
}

impl PostgresChoiceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ChoiceRepository for PostgresChoiceRepository {
    async fn find_by_question(
        &self,
        question_id: &QuestionId,
    ) -> Result<Vec<Choice>, DomainError> {
        let results = polls_choice::Entity::find()
            .filter(polls_choice::Column::QuestionId.eq(question_id.0))
            .order_by_asc(polls_choice::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn increment_votes(
        &self,
        question_id: &QuestionId,
        choice_id: &ChoiceId,
    ) -> Result<Option<Choice>, DomainError> {
        // UPDATE ... SET votes = votes + 1 RETURNING *; the row lock orders concurrent votes
        let updated = polls_choice::Entity::update_many()
            .col_expr(
                polls_choice::Column::Votes,
                Expr::col(polls_choice::Column::Votes).add(1),
            )
            .filter(polls_choice::Column::Id.eq(choice_id.0))
            .filter(polls_choice::Column::QuestionId.eq(question_id.0))
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(updated.into_iter().next().map(|m| m.into()))
    }
}

/// Convert SeaORM model to domain entity
impl From<polls_choice::Model> for Choice {
    fn from(model: polls_choice::Model) -> Self {
        Choice {
            id: ChoiceId(model.id),
            question_id: QuestionId(model.question_id),
            choice_text: model.choice_text,
            votes: model.votes,
        }
    }
}
